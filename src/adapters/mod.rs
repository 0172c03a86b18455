// Adapters layer: concrete implementations of the domain ports.

pub mod anchor;
pub mod notifier;
pub mod object_url;
pub mod storage;

pub use anchor::{AnchorSaver, SaveLink};
pub use notifier::ConsoleNotifier;
pub use object_url::{ObjectUrl, ObjectUrlStore};
pub use storage::LocalStorage;
