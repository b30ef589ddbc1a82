use mock_server::{new_object_id, AppState, User};
use tracing::{error, info};

use crate::config::HarnessConfig;

/// Start the mock service on a random local port with one registered
/// session, and return the config that points at it.
///
/// The server runs on its own thread with a current-thread runtime and lives
/// until the process exits.
pub fn spawn_mock_server() -> std::io::Result<HarnessConfig> {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let addr = std_listener.local_addr()?;
    std_listener.set_nonblocking(true)?;

    let cookie = new_object_id();
    let state = AppState::new().with_session(cookie.clone(), User::new("harness", "harness@example.com"));
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    std::thread::spawn(move || {
        let result = runtime.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener)?;
            mock_server::run(listener, state).await
        });
        if let Err(e) = result {
            error!(error = %e, "mock server stopped");
        }
    });

    info!(%addr, "mock server started");
    Ok(HarnessConfig {
        base_url: format!("http://{addr}"),
        cookie,
    })
}
