//! ledgergate - 账本合约 REST 网关
//!
//! 启动流程：
//! - 加载配置、初始化日志
//! - 在钱包中确认身份，连接账本网关（失败即退出，不绑定端口）
//! - 由声明式路由表构建 HTTP 服务

use ledgergate::config::{load_config, print_config, LogConfig};
use ledgergate::domain::route_table;
use ledgergate::infrastructure::bootstrap::{checked_routes, connect_ledger};
use ledgergate::infrastructure::http::{AppState, HttpServer, ServerConfig};

fn init_tracing(log: &LogConfig) {
    let log_filter = format!("{},ledgergate={},tower_http=debug", log.level, log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    tracing::info!("ledgergate - ledger REST gateway");
    print_config(&config);

    let routes = checked_routes(route_table())?;

    // 连接账本（身份缺失或网关不可达时直接退出）
    let gateway = match connect_ledger(&config).await {
        Ok(gateway) => gateway,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to ledger, not starting server");
            return Err(e.into());
        }
    };

    let server_config = ServerConfig::new(&config.server.host, config.server.port)
        .with_static_files(&config.server.static_dir, config.server.index_path());
    let server = HttpServer::new(server_config, AppState::new(gateway), routes);

    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
