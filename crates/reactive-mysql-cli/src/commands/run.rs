use std::path::Path;

use reactive_mysql_client::ShutdownContext;
use reactive_mysql_config::RuntimeConfig;
use tokio::runtime::Handle;
use tracing::info;

pub async fn run(config_path: &Path, event_loops: Option<i32>) -> anyhow::Result<()> {
    let config = RuntimeConfig::from_file(config_path)?;
    let recorder = super::recorder();
    let shutdown = ShutdownContext::new();

    let pools = match recorder.configure_all(
        &Handle::current(),
        Some(super::event_loop_count(event_loops)),
        &config,
        &shutdown,
    ) {
        Ok(pools) => pools,
        Err(e) => {
            // Pools built before the failure are already registered.
            shutdown.run_shutdown_tasks();
            return Err(e.into());
        }
    };

    for (name, pool) in &pools {
        let options = pool.connect_options();
        info!(
            datasource = %name,
            host = %options.host,
            port = options.port,
            database = %options.database,
            "pool ready"
        );
    }

    // ── Shutdown signal ────────────────────────────────────────

    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");

    let closed = shutdown.run_shutdown_tasks();
    info!(tasks = closed, "rmysql stopped");
    Ok(())
}
