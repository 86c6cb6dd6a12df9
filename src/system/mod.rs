//! # System Interaction Layer
//!
//! The boundary between resolution logic and the operating system.
//!
//! ## Modules
//!
//! - **`runner`**: Spawns external commands, enforces the optional deadline,
//!   and captures the first line of standard output. Also home to the
//!   `CommandRunner` trait, which lets resolution logic be exercised against
//!   stub runners instead of real processes.

pub mod runner;
