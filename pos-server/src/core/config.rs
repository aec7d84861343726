use crate::auth::JwtConfig;
use std::path::PathBuf;

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (数据库在 `database/pos.redb`) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 (`RUST_LOG` 优先) |
/// | LOG_JSON | false | JSON 格式日志 |
/// | LOG_DIR | - | 日志目录 (存在时按天滚动) |
/// | POS_SEED_FILE | - | 桌台/菜单 JSON；未设置时使用内置平面图 |
/// | POS_IN_MEMORY | false | 不落盘 (测试/演示) |
/// | JWT_SECRET 等 | - | 见 [`JwtConfig::from_env`] |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/srv/pos HTTP_PORT=8080 cargo run -p pos-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    pub seed_file: Option<String>,
    pub in_memory: bool,
    pub jwt: JwtConfig,
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .ok()
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// 从环境变量加载配置，未设置时使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: env_flag("LOG_JSON"),
            log_dir: env_opt("LOG_DIR"),
            seed_file: env_opt("POS_SEED_FILE"),
            in_memory: env_flag("POS_IN_MEMORY"),
            jwt: JwtConfig::from_env(),
        }
    }

    /// 使用自定义值覆盖部分配置 (测试场景)
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// Path of the redb file under the work dir
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database").join("pos.redb")
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path() {
        let config = Config::with_overrides("/tmp/pos-work", 4000);
        assert_eq!(config.http_port, 4000);
        assert_eq!(
            config.database_path(),
            PathBuf::from("/tmp/pos-work/database/pos.redb")
        );
    }
}
