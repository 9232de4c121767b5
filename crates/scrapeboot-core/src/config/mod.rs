//! Unified configuration layer.
//!
//! All environment variable reads are centralized here; business code goes
//! through the structured configs instead of calling `std::env::var` directly.
//!
//! - `loader`: `env_or`, `env_optional`, `env_bool` helpers + `.env` loading
//! - `schema`: `BootstrapConfig`, `ObservabilityConfig`

pub mod loader;
pub mod schema;

pub use loader::{env_bool, env_optional, env_or, load_dotenv};
pub use schema::{BootstrapConfig, ObservabilityConfig};
pub use schema::{ENV_DIR_NAME, MANIFEST_NAME, OUTPUT_DIR_NAME, TARGET_SCRIPT_NAME};
