//! POS API 模块
//!
//! | 方法 | 路径 | 说明 |
//! |------|------|------|
//! | GET | /pos/bootstrap | 桌台、进行中的会话/账单、菜单 |
//! | GET | /pos/floor | 桌台视图 (TableBlock) |
//! | POST | /pos/sessions | 开台 (单桌) |
//! | POST | /pos/tables/{tableId}/checks | 获取或创建桌台账单 (支持拼桌) |
//! | GET | /pos/checks/{checkId} | 账单详情 |
//! | PATCH | /pos/checks/{checkId} | 更新账单状态 (乐观锁) |
//! | POST | /pos/checks/{checkId}/lines | 加菜 |
//! | PATCH | /pos/checks/{checkId}/lines | 改菜 |
//! | DELETE | /pos/checks/{checkId}/lines | 清空 |
//! | DELETE | /pos/checks/{checkId}/lines/{lineId} | 删除单行 |
//!
//! 认证由全局 `require_auth` 中间件完成。

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/pos", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/bootstrap", get(handler::bootstrap))
        .route("/floor", get(handler::floor))
        .route("/sessions", post(handler::create_session))
        .route("/tables/{table_id}/checks", post(handler::ensure_check))
        .route(
            "/checks/{check_id}",
            get(handler::get_check).patch(handler::update_check),
        )
        .route(
            "/checks/{check_id}/lines",
            post(handler::add_line)
                .patch(handler::update_line)
                .delete(handler::clear_lines),
        )
        .route("/checks/{check_id}/lines/{line_id}", delete(handler::remove_line))
}
