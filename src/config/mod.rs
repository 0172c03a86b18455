pub mod endpoint;
pub mod toml_config;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use endpoint::{EndpointConfig, ResolvedApi};
pub use toml_config::TomlConfig;
