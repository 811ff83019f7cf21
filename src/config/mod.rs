pub mod args;
mod r#impl;
mod structs;

pub use args::{Cli, FlagOverrides};
pub use r#impl::{CONFIG_FILE_NAME, ENV_PREFIX, default_config_path, load_config, load_config_from};
pub use structs::*;
