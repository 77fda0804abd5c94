pub mod app;
pub mod domain;
pub mod infra;
pub mod runtime;
pub mod ui;

// Re-exports for convenience
pub use infra::api;
pub use infra::session;
