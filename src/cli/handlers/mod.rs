// src/cli/handlers/mod.rs

// This module contains the logic for each CLI action.

pub mod check;
pub mod commons;
pub mod list;
pub mod options;
pub mod pick;
pub mod show;
