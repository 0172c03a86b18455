use crate::core::Notifier;

/// Prints alerts to stderr, where a terminal user will see them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn alert(&self, message: &str) {
        eprintln!("❌ {}", message);
    }
}
