pub mod app_command;
pub mod edit;

pub use app_command::AppCommand;
pub use edit::LocalEdit;
