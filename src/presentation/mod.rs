// Presentation layer - View model, text rendering and terminal commands
pub mod dashboard_view;
pub mod datetime;
pub mod grouped_list;
pub mod handlers;
pub mod links;
pub mod terminal;
