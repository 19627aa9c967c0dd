use std::io;
use std::path::PathBuf;

use tokio::process::Command;

use crate::models::portfolio;

/// Hands the portfolio catalog off to the public-site consumer after every
/// catalog mutation.
///
/// Two steps, both best-effort: write the catalog snapshot as JSON (an
/// array of portfolio item records), then run the configured sync command
/// if there is one. Neither step can fail the mutation that triggered it —
/// every error is logged and absorbed.
#[derive(Clone)]
pub struct SyncNotifier {
    snapshot_path: PathBuf,
    command: Option<String>,
}

impl SyncNotifier {
    pub fn new(snapshot_path: impl Into<PathBuf>, command: Option<String>) -> Self {
        Self {
            snapshot_path: snapshot_path.into(),
            command,
        }
    }

    /// Configure from `SYNC_SNAPSHOT_PATH` (default `portfolio_snapshot.json`)
    /// and `SYNC_COMMAND` (optional).
    pub fn from_env() -> Self {
        let snapshot_path = std::env::var("SYNC_SNAPSHOT_PATH")
            .unwrap_or_else(|_| "portfolio_snapshot.json".to_string());
        let command = std::env::var("SYNC_COMMAND")
            .ok()
            .filter(|c| !c.trim().is_empty());
        Self::new(snapshot_path, command)
    }

    /// Propagate the catalog to the consumer. Never fails the caller.
    pub async fn notify(&self, items: &[portfolio::Model]) {
        if let Err(e) = self.write_snapshot(items).await {
            tracing::error!("failed to write portfolio snapshot: {e}");
        }
        self.run_command().await;
    }

    async fn write_snapshot(&self, items: &[portfolio::Model]) -> io::Result<()> {
        let json = serde_json::to_vec_pretty(items).map_err(io::Error::other)?;
        tokio::fs::write(&self.snapshot_path, json).await?;
        tracing::info!(
            count = items.len(),
            path = %self.snapshot_path.display(),
            "wrote portfolio snapshot"
        );
        Ok(())
    }

    async fn run_command(&self) {
        let Some(cmd) = &self.command else {
            return;
        };
        match Command::new("sh").arg("-c").arg(cmd).output().await {
            Ok(output) if output.status.success() => {
                tracing::info!(
                    stdout = %String::from_utf8_lossy(&output.stdout).trim_end(),
                    "sync command completed"
                );
            }
            Ok(output) => {
                tracing::warn!(
                    status = %output.status,
                    stderr = %String::from_utf8_lossy(&output.stderr).trim_end(),
                    "sync command exited with failure"
                );
            }
            Err(e) => tracing::error!("failed to run sync command: {e}"),
        }
    }
}
