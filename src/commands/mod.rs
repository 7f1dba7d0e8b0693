pub mod app_command;
pub mod request;

pub use app_command::{AppCommand, HELP_TEXT};
pub use request::{ApiRequest, FetchCommand};
