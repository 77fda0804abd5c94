pub(crate) mod confirmation;
pub(crate) mod editor;
pub(crate) mod explorer;
pub(crate) mod prompt;
pub(crate) mod sign_in;
