pub mod builder;
pub mod config;
pub mod controller;
pub mod error;
pub mod layers;
pub mod model;
pub mod params;
pub mod registry;
pub mod state;
pub mod types;

pub use builder::UserApi;
pub use config::{AppConfig, ConfigError, ConfigValue, FromConfigValue, SeedSettings, ServerSettings};
pub use error::{HttpError, RegistryError};
pub use layers::{catch_panic_layer, default_cors, default_trace, init_tracing};
pub use model::{User, UserFilter, UserInput};
pub use registry::UserRegistry;
pub use state::AppState;
pub use types::{ApiResult, JsonResult};
