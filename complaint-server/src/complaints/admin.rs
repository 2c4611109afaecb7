//! 管理列表控制器
//!
//! 持有表格视图状态 ([`ListState`]) 并执行单条记录修改。
//! 每次查看都重新读取存储。

use chrono::Utc;
use shared::error::AppResult;
use shared::models::{
    AdminComplaintCreate, Complaint, ComplaintStats, ComplaintStatus, FieldUpdate,
};
use shared::query::{ListState, PaginatedResponse, SortKey};
use std::sync::Arc;

use crate::store::{ComplaintRepository, Mutation};

/// 管理表格控制器
pub struct AdminListController {
    repo: Arc<dyn ComplaintRepository>,
    state: ListState,
}

impl AdminListController {
    pub fn new(repo: Arc<dyn ComplaintRepository>) -> Self {
        Self::with_state(repo, ListState::default())
    }

    pub fn with_state(repo: Arc<dyn ComplaintRepository>, state: ListState) -> Self {
        Self { repo, state }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    // ========== 视图状态 ==========

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.state.set_search(search);
    }

    pub fn toggle_sort(&mut self, key: SortKey) {
        self.state.toggle_sort(key);
    }

    pub fn set_page(&mut self, page: u32) {
        self.state.set_page(page);
    }

    /// 排序、过滤后的当前页
    pub fn view(&self) -> PaginatedResponse<Complaint> {
        self.state.apply(&self.repo.load())
    }

    pub fn stats(&self) -> ComplaintStats {
        ComplaintStats::from_complaints(&self.repo.load())
    }

    // ========== 修改 ==========

    /// 修改指定投诉的单个字段
    ///
    /// id 不存在返回 `Ok(None)`；非法值返回错误，记录不变。
    pub fn update_field(&self, id: i64, update: FieldUpdate) -> AppResult<Option<Complaint>> {
        let field = update.field_name();
        let result = self.repo.mutate(|items| {
            match items.iter_mut().find(|c| c.id == id) {
                Some(c) => {
                    let mut edited = c.clone();
                    match update.apply(&mut edited) {
                        Ok(()) => {
                            *c = edited.clone();
                            Mutation::changed(Ok(Some(edited)))
                        }
                        Err(e) => Mutation::unchanged(Err(e)),
                    }
                }
                None => Mutation::unchanged(Ok(None)),
            }
        })?;

        match &result {
            Ok(Some(_)) => tracing::info!(id, field, "Complaint field updated"),
            Ok(None) => tracing::warn!(id, field, "Field update skipped, complaint not found"),
            Err(e) => tracing::debug!(id, field, error = %e, "Field update rejected"),
        }
        result
    }

    /// 标记已解决 (重复调用不写入)
    pub fn resolve(&self, id: i64) -> AppResult<Option<Complaint>> {
        let resolved = self.repo.mutate(|items| {
            match items.iter_mut().find(|c| c.id == id) {
                Some(c) if c.is_resolved() => Mutation::unchanged(Some(c.clone())),
                Some(c) => {
                    c.status = ComplaintStatus::Resolved;
                    Mutation::changed(Some(c.clone()))
                }
                None => Mutation::unchanged(None),
            }
        })?;

        match &resolved {
            Some(_) => tracing::info!(id, "Complaint resolved"),
            None => tracing::warn!(id, "Resolve skipped, complaint not found"),
        }
        Ok(resolved)
    }

    /// 删除投诉，不存在时返回 `false`
    pub fn delete(&self, id: i64) -> AppResult<bool> {
        let removed = self.repo.mutate(|items| {
            let before = items.len();
            items.retain(|c| c.id != id);
            if items.len() < before {
                Mutation::changed(true)
            } else {
                Mutation::unchanged(false)
            }
        })?;

        if removed {
            tracing::info!(id, "Complaint deleted");
        } else {
            tracing::warn!(id, "Delete skipped, complaint not found");
        }
        Ok(removed)
    }

    /// 管理员新建: 以新 id 追加待处理投诉
    pub fn create(&self, create: AdminComplaintCreate) -> AppResult<Complaint> {
        let create = create.validated()?;
        let now = Utc::now();
        let complaint = self.repo.mutate(|items| {
            let id = Complaint::next_id(items, now.timestamp_millis());
            let complaint = Complaint::from_admin(id, now, create);
            items.push(complaint.clone());
            Mutation::changed(complaint)
        })?;

        tracing::info!(id = complaint.id, "Complaint created by admin");
        Ok(complaint)
    }
}
