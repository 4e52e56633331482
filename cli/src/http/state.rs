//! HTTP服务器状态管理

use std::sync::Arc;

use stepify_core::api::AppContext;

/// 应用状态（在所有handlers间共享）
#[derive(Clone)]
pub struct AppState {
    pub ctx: Arc<AppContext>,
}

impl AppState {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx: Arc::new(ctx) }
    }
}
