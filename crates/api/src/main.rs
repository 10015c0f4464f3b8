use anyhow::Context as _;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    notably_observability::init();

    let config = notably_api::config::ApiConfig::from_env()?;
    let bind_addr = config.bind_addr.clone();
    let app = notably_api::app::build_app(config);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
