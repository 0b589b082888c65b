// Interactive workflows
pub mod crud;      // View, create, update and delete handlers
pub mod menu;      // Menu loop and dispatch

pub use crud::{handle_create_command, handle_delete_command, handle_update_command, handle_view_command};
pub use menu::{run_menu, MenuChoice};
