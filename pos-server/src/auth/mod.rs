//! 认证授权模块
//!
//! - [`JwtService`] - JWT 令牌验证
//! - [`CurrentUser`] - 当前用户上下文
//! - [`require_auth`] - 认证 + 角色中间件

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod roles;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
pub use roles::{POS_ROLES, is_pos_role};
