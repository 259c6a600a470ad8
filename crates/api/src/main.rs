use std::sync::Arc;

use anyhow::Context;

use shopkeep_api::app::{self, AppServices};
use shopkeep_infra::AppConfig;
use shopkeep_observability::LogFormat;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    shopkeep_observability::init(LogFormat::from_pretty_flag(config.pretty_logs));

    let services = AppServices::from_config(&config).context("failed to load catalog")?;
    let app = app::build_app(Arc::new(services));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        items = %config.items_path.display(),
        suppliers = %config.suppliers_path.display(),
        "listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
