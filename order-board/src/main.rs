use std::sync::Arc;

use order_board::{BoardConfig, HttpOrderSource, OrderBoard, logger};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = BoardConfig::from_env()?;
    logger::init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    tracing::info!(api = %config.api_base_url, "Starting order board");

    let source = HttpOrderSource::new(&config)?;
    let board = Arc::new(OrderBoard::new(Arc::new(source), config.time_window()));

    let cancel = CancellationToken::new();
    let worker = {
        let board = board.clone();
        let cancel = cancel.clone();
        let period = config.refresh_interval();
        tokio::spawn(async move { board.run(period, cancel).await })
    };

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown requested");
    cancel.cancel();
    worker.await?;

    if let Some(snapshot) = board.snapshot() {
        tracing::info!(
            orders = snapshot.orders.len(),
            refreshed_at = %snapshot.refreshed_at,
            "Last snapshot"
        );
    }

    Ok(())
}
