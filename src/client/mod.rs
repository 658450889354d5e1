// Client layer - item management UI state and the HTTP transport it drives
pub mod console;
pub mod http;
pub mod manager;
pub mod notifier;

pub use console::run_console;
pub use http::{ClientError, ItemBackend, ItemsClient};
pub use manager::{FormMode, ItemForm, ItemManager};
pub use notifier::Notifier;
