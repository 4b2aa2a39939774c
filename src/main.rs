use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;

use medref::router::init_router;
use medref::state::init_app_state;
use medref_config::ServerConfig;
use medref_observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let server_config = ServerConfig::from_env();
    let state =
        init_app_state(&server_config).context("Refusing to start with an invalid access policy")?;

    info!(
        login_path = %state.policy.login_path(),
        unmapped_routes = %state.policy.unmapped_policy(),
        metrics = state.metrics.is_some(),
        "Access policy loaded"
    );

    let app = init_router(state);

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!(address = %address, "Server running");
    info!("Swagger UI available at http://{}/swagger-ui", address);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
