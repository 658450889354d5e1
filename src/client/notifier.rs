use async_trait::async_trait;

/// Blocking user-facing messages and confirmations
///
/// Implemented by the terminal console, and by recorders in tests.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Show a message the user has to acknowledge
    async fn alert(&self, message: &str);

    /// Ask a yes/no question; `true` means the user agreed
    async fn confirm(&self, message: &str) -> bool;
}
