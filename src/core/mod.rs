// src/core/mod.rs

pub mod cache;
pub mod parse;
pub mod paths;
pub mod registry;
pub mod resolver;
