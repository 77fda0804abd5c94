pub mod app_mode;
pub mod explorer_view;
