//! 投诉提交与远程 API 操作

use chrono::{DateTime, Utc};
use shared::error::AppResult;
use shared::models::{Complaint, ComplaintDraft};
use std::sync::Arc;

use crate::store::{ComplaintRepository, Mutation};

/// 投诉受理服务
#[derive(Clone)]
pub struct ComplaintService {
    repo: Arc<dyn ComplaintRepository>,
}

impl ComplaintService {
    pub fn new(repo: Arc<dyn ComplaintRepository>) -> Self {
        Self { repo }
    }

    /// 校验公共提交并追加为待处理投诉
    pub fn submit(&self, draft: ComplaintDraft) -> AppResult<Complaint> {
        self.submit_at(draft, Utc::now())
    }

    pub(crate) fn submit_at(&self, draft: ComplaintDraft, now: DateTime<Utc>) -> AppResult<Complaint> {
        let draft = draft.validated()?;
        let complaint = self.repo.mutate(|items| {
            let id = Complaint::next_id(items, now.timestamp_millis());
            let complaint = Complaint::from_draft(id, now, draft);
            items.push(complaint.clone());
            Mutation::changed(complaint)
        })?;

        tracing::info!(
            id = complaint.id,
            complaint_type = %complaint.complaint_type,
            urgency = %complaint.urgency,
            attachments = complaint.attachments.len(),
            "Complaint submitted"
        );
        Ok(complaint)
    }

    pub fn list(&self) -> Vec<Complaint> {
        self.repo.load()
    }

    /// 替换已有投诉的市民可编辑字段
    ///
    /// id 不存在时返回 `None`，不写入。
    pub fn replace(&self, id: i64, draft: ComplaintDraft) -> AppResult<Option<Complaint>> {
        let draft = draft.validated()?;
        let updated = self.repo.mutate(|items| {
            match items.iter_mut().find(|c| c.id == id) {
                Some(c) => {
                    c.apply_draft(draft);
                    Mutation::changed(Some(c.clone()))
                }
                None => Mutation::unchanged(None),
            }
        })?;

        match &updated {
            Some(_) => tracing::info!(id, "Complaint replaced"),
            None => tracing::warn!(id, "Replace skipped, complaint not found"),
        }
        Ok(updated)
    }
}
