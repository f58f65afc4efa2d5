pub mod credentials;
pub mod settings;

pub use credentials::EnvFile;
pub use settings::{ConfigError, Settings};
