use anyhow::Context;

use medimart_web::config::WebConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    medimart_observability::init("medimart-web");

    let config = WebConfig::from_env().context("invalid web configuration")?;
    if !config.secure_cookies {
        tracing::warn!("MEDIMART_SECURE_COOKIES not enabled; session cookies sent without Secure");
    }

    let bind_addr = config.bind_addr;
    let app = medimart_web::app::build_app(config);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
