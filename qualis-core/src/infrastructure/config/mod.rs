pub mod project;

pub use crate::domain::project::QualisConfig;
pub use project::{CONFIG_CANDIDATES, apply_overrides, load_config, load_config_with};
