// linkshelf services
// Services provide the client's building blocks: backend access, filtering,
// pagination, settings, notifications and polling.

pub mod api_client;
pub mod filter_engine;
pub mod notifier;
pub mod pagination;
pub mod poller;
pub mod settings_store;
