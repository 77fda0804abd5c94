pub mod confirmation_overlay;
pub mod footer_bar;
pub mod prompt_overlay;
pub mod status_bar;
