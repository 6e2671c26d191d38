use crate::core::Notifier;

/// Prints user-facing messages to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn error(&self, message: &str) {
        eprintln!("❌ {}", message);
    }
}
