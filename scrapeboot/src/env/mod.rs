pub mod builder;

pub use builder::{activate, ensure_environment, upgrade_pip, EnvContext};
