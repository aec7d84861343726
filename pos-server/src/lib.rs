//! POS Server - 餐厅桌台、账单和点单核心
//!
//! # 架构概述
//!
//! - **桌台会话** (`pos::registry`): 每张桌台最多一个进行中的会话
//! - **账单存储** (`pos::store`): 加菜/改菜/清空/状态更新，revision 乐观锁
//! - **桌台视图** (`pos::view`): 纯函数投影为 `TableBlock`
//! - **持久化** (`pos::storage`): redb 写穿，重启后恢复进行中的桌台
//! - **认证** (`auth`): JWT + 角色检查
//! - **HTTP API** (`api`): axum 路由和处理器
//!
//! # 模块结构
//!
//! ```text
//! pos-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── auth/          # JWT 认证、角色
//! ├── api/           # HTTP 路由和处理器
//! ├── pos/           # 桌台会话和账单核心
//! └── utils/         # 日志
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod pos;
pub mod utils;

// Re-exports
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use pos::{PosError, PosStore};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Initialize logging from the loaded configuration
pub fn setup_environment(config: &Config) {
    init_logger_with_file(
        Some(&config.log_level),
        config.log_json,
        config.log_dir.as_deref(),
    );
}

pub fn print_banner() {
    println!(
        r#"
    ____  ____  _____
   / __ \/ __ \/ ___/
  / /_/ / / / /\__ \
 / ____/ /_/ /___/ /
/_/    \____//____/
    "#
    );
}
