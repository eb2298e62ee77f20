use anyhow::Context;
use lab_config::LabConfig;

use crate::cli::ServeArgs;

pub async fn handle(args: &ServeArgs, mut config: LabConfig) -> anyhow::Result<()> {
    if let Some(host) = &args.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate().context("invalid server settings")?;

    lab_server::serve(&config, shutdown_signal())
        .await
        .context("sql sandbox server failed")
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for ctrl-c; shutting down");
        return;
    }
    tracing::info!("ctrl-c received, draining connections");
}
