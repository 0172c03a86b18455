pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{AnchorSaver, ConsoleNotifier, LocalStorage, ObjectUrlStore};
pub use config::{EndpointConfig, ResolvedApi, TomlConfig};
pub use crate::core::dispatcher::{DispatchOutcome, DownloadDispatcher, RequestOptions, Target};
pub use crate::core::submit::{DocumentSubmitter, PreparedRequest};
pub use domain::model::{DocumentKind, FormData, LineItem, PayloadStyle, SavedFile};
pub use utils::error::{DocError, Result};
