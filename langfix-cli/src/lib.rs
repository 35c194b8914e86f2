//! CLI library for testing purposes

pub mod config;
pub mod fix;
pub mod report;
pub mod validation;

pub use config::{FileConfig, Overrides, Settings, load_config};
pub use fix::{FixCommandOptions, run_fix_command};
pub use report::Mode;
