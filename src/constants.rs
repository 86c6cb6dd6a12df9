// src/constants.rs

/// The name of the definitions file looked up in the working directory.
pub const DEFINITIONS_FILENAME: &str = "tandem.toml";

/// The name of the per-user configuration directory (under the system config dir).
pub const CONFIG_DIR_NAME: &str = "tandem";

/// Separator between a key and its label in static secondary entries.
pub const KEY_LABEL_SEPARATOR: char = ':';

/// Separator between option labels on a command's first output line.
pub const CSV_SEPARATOR: char = ',';

/// How often the runner polls a child process while waiting on a deadline.
pub const WAIT_POLL_INTERVAL_MS: u64 = 25;
