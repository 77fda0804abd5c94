pub mod editor;
pub mod explorer;
pub mod sign_in;
