pub mod account_handlers;

pub use account_handlers::{create_account_handler, get_account_handler, health_handler};
