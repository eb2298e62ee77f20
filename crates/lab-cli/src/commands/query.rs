use std::sync::Arc;

use anyhow::Context;
use lab_config::LabConfig;
use lab_sandbox::SandboxProbe;

use crate::cli::QueryArgs;
use crate::output;

pub async fn handle(args: &QueryArgs, config: &LabConfig) -> anyhow::Result<()> {
    let sql = args.sql.clone();
    let sandbox = config.sandbox.clone();
    let probe = Arc::new(SandboxProbe::new());

    let outcome = tokio::task::spawn_blocking(move || lab_sandbox::run_query(&sql, &sandbox, &probe))
        .await
        .context("sandbox task failed")?
        .map_err(|error| anyhow::anyhow!(error.engine_message()))
        .context("query failed")?;

    output::print(&outcome, args.format)
}
