//! Custom widget components

mod action_menu;
mod details_panel;
mod header;
pub mod modal_overlay;
mod result_dialog;
mod service_list;
mod status_bar;

pub use action_menu::ActionMenu;
pub use details_panel::DetailsPanel;
pub use header::MainHeader;
pub use result_dialog::ResultDialog;
pub use service_list::ServiceList;
pub use status_bar::StatusBar;
