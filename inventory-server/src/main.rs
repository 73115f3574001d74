use inventory_server::{Config, Server, ServerState, init_logger_with_file, print_banner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Environment first: config and logging both read it
    dotenv::dotenv().ok();

    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    print_banner();
    tracing::info!(
        environment = %config.environment,
        backend = %config.backend_api_url,
        "Inventory gateway starting..."
    );

    let state = ServerState::initialize(&config);
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        anyhow::bail!("server exited with error: {}", e);
    }

    Ok(())
}
