pub mod dashboard;
pub mod lesson_panel;
pub mod navbar;
pub mod status_panel;
