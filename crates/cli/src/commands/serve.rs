//! Serve Commands
//!
//! Runs the fixture server in the foreground for manual checks.

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::info;

use scenariogen_e2e::{FixtureServer, HarnessConfig};

use crate::output;

#[derive(Args)]
pub struct ServeArgs {
    /// Directory to serve (defaults to the bundled sample app)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Entry file the printed URL points at
    #[arg(long)]
    pub entry: Option<String>,

    /// Harness configuration file
    #[arg(long, env = "SCENARIOGEN_E2E_CONFIG")]
    pub config: Option<PathBuf>,
}

pub async fn execute(args: ServeArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            let mut config = HarnessConfig::load(path)?;
            let base = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            config.resolve_paths(base);
            config
        }
        None => HarnessConfig::from_env()?,
    };

    if let Some(dir) = args.dir {
        config.fixture.root_dir = dir;
    }
    if let Some(entry) = args.entry {
        config.fixture.entry_file = entry;
    }

    let mut server = FixtureServer::spawn(config.fixture.clone())?;
    let url = server.entry_url().unwrap_or_default().to_string();
    output::print_success(&format!(
        "Serving {} at {}",
        config.fixture.root_dir.display(),
        url
    ));
    output::print_info("Press Ctrl-C to stop");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;

    info!("Shutting down");
    server.shutdown()?;
    Ok(())
}
