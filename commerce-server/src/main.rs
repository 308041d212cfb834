use commerce_server::{Config, Server, ServerState, init_logger, print_banner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment (dotenv, logging)
    let _ = dotenv::dotenv();
    init_logger();

    print_banner();

    tracing::info!("Commerce server starting...");

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize server state (database, locks)
    let state = ServerState::initialize(&config).await?;

    // 4. Run the HTTP server
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
