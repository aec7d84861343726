use std::sync::Arc;

use crate::auth::JwtService;
use crate::core::{Config, Result};
use crate::pos::{FloorPlan, PosStorage, PosStore};

/// 服务器状态 - 持有所有服务的共享引用
///
/// Clone 只复制 Arc，成本极低。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | pos | 桌台/账单存储 |
/// | jwt_service | JWT 认证服务 |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub pos: Arc<PosStore>,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    pub fn new(config: Config, pos: PosStore, jwt_service: JwtService) -> Self {
        Self {
            config,
            pos: Arc::new(pos),
            jwt_service: Arc::new(jwt_service),
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 校验 JWT 配置
    /// 2. 加载桌台和菜单 (种子文件或内置平面图)
    /// 3. 打开 redb 并恢复进行中的桌台
    pub fn initialize(config: &Config) -> Result<Self> {
        config.jwt.validate()?;

        let floor = match &config.seed_file {
            Some(path) => {
                tracing::info!(path = %path, "Loading floor plan from seed file");
                FloorPlan::from_file(path)?
            }
            None => FloorPlan::builtin(),
        };
        tracing::info!(
            tables = floor.tables.len(),
            menu_items = floor.menu.len(),
            "Floor plan loaded"
        );

        let storage = if config.in_memory {
            tracing::warn!("POS_IN_MEMORY enabled, checks will not survive a restart");
            PosStorage::open_in_memory()?
        } else {
            let path = config.database_path();
            tracing::info!(path = %path.display(), "Opening POS database");
            PosStorage::open(path)?
        };

        let pos = PosStore::open(floor, storage)?;
        let jwt_service = JwtService::with_config(config.jwt.clone());

        Ok(Self::new(config.clone(), pos, jwt_service))
    }
}
