pub mod dispatcher;
pub mod forms;
pub mod health;
pub mod submit;

pub use crate::domain::model::{DocumentKind, FormData, LineItem, PayloadStyle, SavedFile};
pub use crate::domain::ports::{ConfigProvider, FileSaver, Notifier, Storage};
pub use crate::utils::error::Result;
