//! Shared app dependency container for managers and background tasks.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::app::AppEvent;
use crate::infra::api::ConfigApi;

/// Shared app dependencies used by managers and spawned request tasks.
pub struct AppServices {
    api: Arc<dyn ConfigApi>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    export_dir: PathBuf,
}

impl AppServices {
    /// Creates a shared service container.
    pub(crate) fn new(
        api: Arc<dyn ConfigApi>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
        export_dir: PathBuf,
    ) -> Self {
        Self {
            api,
            event_tx,
            export_dir,
        }
    }

    /// Returns the shared backend client for async request tasks.
    pub(crate) fn api(&self) -> Arc<dyn ConfigApi> {
        Arc::clone(&self.api)
    }

    /// Returns a clone of the app event sender.
    pub(crate) fn event_sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.event_tx.clone()
    }

    /// Returns the directory exported buffers are written to.
    pub(crate) fn export_dir(&self) -> &Path {
        self.export_dir.as_path()
    }
}
