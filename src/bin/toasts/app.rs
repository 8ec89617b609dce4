use std::path::{Path, PathBuf};

use tokio::signal;
use tokio::task::LocalSet;
use tokio::time::sleep;
use toasts::Result;
use toasts::ToastManager;
use toasts::config::Config;
use toasts::error::ConfigError;
use toasts::telemetry::init_tracing;
use tracing::{info, warn};

use super::cli::Cli;
use super::display::{ConsoleDisplay, FALLBACK_LIFETIME};

const DEFAULT_CONFIG: &str = "toasts.toml";

pub async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.log_filter.as_deref(), cli.json_logs)?;

    let config = load_config(cli.config.as_deref())?;
    info!(ids = %config.ids, "configuration loaded");
    let manager = ToastManager::from_config(&config);

    if cli.toasts.is_empty() {
        info!("no toast requested, nothing to show");
        return Ok(());
    }

    if cli.dry_run {
        let _log = manager.subscribe(|toasts| {
            if let Some(toast) = toasts.last() {
                info!(
                    id = %toast.id(),
                    kind = %toast.kind(),
                    title = toast.title(),
                    message = toast.message(),
                    duration = ?toast.duration(),
                    "dry-run: would show toast"
                );
            }
        });
        for input in cli.toasts {
            manager.add(input);
        }
        manager.clear_all();
        return Ok(());
    }

    let local = LocalSet::new();
    local
        .run_until(async move {
            let display = ConsoleDisplay::attach(&manager, FALLBACK_LIFETIME);
            for input in cli.toasts {
                manager.add(input);
            }

            tokio::select! {
                biased;
                _ = signal::ctrl_c() => {
                    info!("interrupted, clearing toasts");
                    manager.clear_all();
                }
                () = display.emptied() => {
                    info!("all toasts dismissed");
                }
                () = sleep(cli.max_wait) => {
                    let remaining = manager.clear_all();
                    warn!(remaining, "max wait elapsed, clearing remaining toasts");
                }
            }
        })
        .await;

    Ok(())
}

fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => {
            std::fs::metadata(path).map_err(|source| ConfigError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
            path.to_path_buf()
        }
        None => PathBuf::from(DEFAULT_CONFIG),
    };
    Config::from_env_and_file(&path)
}
