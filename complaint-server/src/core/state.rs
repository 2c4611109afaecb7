use std::sync::Arc;

use crate::auth::{AdminAccount, JwtService};
use crate::complaints::{AdminListController, ComplaintService};
use crate::core::{Config, Result};
use crate::store::{ComplaintRepository, RedbComplaintStore, SLOT_FILE};
use shared::query::ListState;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，每个请求克隆一份。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | repo | Arc<dyn ComplaintRepository> | 投诉存储 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | admin | Arc<AdminAccount> | 管理员账号 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub repo: Arc<dyn ComplaintRepository>,
    pub jwt_service: Arc<JwtService>,
    pub admin: Arc<AdminAccount>,
}

impl ServerState {
    /// 打开 `<WORK_DIR>/complaints.redb` 并构建状态
    pub fn initialize(config: &Config) -> Result<Self> {
        let work_dir = config.work_dir();
        std::fs::create_dir_all(&work_dir)?;

        let db_path = work_dir.join(SLOT_FILE);
        let store = RedbComplaintStore::open(&db_path)?;
        tracing::info!(path = %db_path.display(), "Complaint store opened");

        Ok(Self::with_repository(config.clone(), Arc::new(store)))
    }

    /// 使用外部提供的存储 (测试、嵌入)
    pub fn with_repository(config: Config, repo: Arc<dyn ComplaintRepository>) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let admin = Arc::new(config.admin.clone());
        Self {
            config,
            repo,
            jwt_service,
            admin,
        }
    }

    pub fn complaints(&self) -> ComplaintService {
        ComplaintService::new(self.repo.clone())
    }

    pub fn admin_list(&self, state: ListState) -> AdminListController {
        AdminListController::with_state(self.repo.clone(), state)
    }
}
