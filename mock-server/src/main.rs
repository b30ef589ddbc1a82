use mock_server::{config::ServerConfig, new_object_id, AppState, User};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mock_server=debug,tower_http=debug".into()),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let token = config.session_token.clone().unwrap_or_else(new_object_id);
    let state = AppState::new().with_session(token.clone(), User::new("demo", "demo@example.com"));

    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, cookie = %token, "listening");
    mock_server::run(listener, state).await?;
    Ok(())
}
