use cooklang_gateway::{router, Gateway, GatewayConfig};
use log::info;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GatewayConfig::load()?;
    let gateway = Gateway::from_config(&config)?;
    info!("Available providers: {}", gateway.providers().join(", "));

    let app = router(Arc::new(gateway));

    let address = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Cooklang import gateway listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
