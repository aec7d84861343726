use anyhow::Context;
use pos_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 加载 .env 和配置
    dotenv::dotenv().ok();
    let config = Config::from_env();

    // 2. 日志
    setup_environment(&config);
    print_banner();
    tracing::info!(
        environment = %config.environment,
        work_dir = %config.work_dir,
        "🦀 POS server starting..."
    );

    // 3. 初始化服务器状态 (桌台、redb、JWT)
    let state = ServerState::initialize(&config).context("failed to initialize server state")?;

    // 4. 启动 HTTP 服务器
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
