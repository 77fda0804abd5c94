use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use url::Url;

use propman::app::{App, propman_home};
use propman::infra::api::HttpConfigApi;
use propman::infra::session::SessionContext;

const LOG_FILE: &str = "propman.log";

/// Terminal console for hierarchical configuration artifacts.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Base URL of the property-manager backend.
    #[arg(long, default_value = "http://127.0.0.1:8992/")]
    base_url: Url,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    let home = propman_home();
    std::fs::create_dir_all(&home)?;

    // Log to a file under the propman home; stdout belongs to the TUI.
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(home.join(LOG_FILE))?;
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    let export_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let session = SessionContext::load(&home);
    let api = HttpConfigApi::new(args.base_url.clone(), session.handle());
    let mut app = App::new(
        Arc::new(api),
        session,
        export_dir,
        args.base_url.to_string(),
    );

    propman::runtime::run(&mut app).await
}
