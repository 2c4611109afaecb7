//! 列表查询
//!
//! 管理表格视图状态与 排序 → 过滤 → 分页 流程。
//! `GET /api/admin/complaints` 与保存本地列表的客户端共用。

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::models::Complaint;

/// 管理表格每页数量
pub const PAGE_SIZE: u32 = 10;

/// 可排序列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Id,
    Name,
    Type,
    Location,
    Status,
    Date,
    Urgency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortConfig {
    /// 按此列升序比较
    ///
    /// 紧急程度按优先级，日期按时间，id 按数值，其余按显示文本。
    fn compare_asc(&self, a: &Complaint, b: &Complaint) -> Ordering {
        match self.key {
            SortKey::Id => a.id.cmp(&b.id),
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::Type => a.complaint_type.as_str().cmp(b.complaint_type.as_str()),
            SortKey::Location => a.location.cmp(&b.location),
            SortKey::Status => a.status.as_str().cmp(b.status.as_str()),
            SortKey::Date => a.date.cmp(&b.date),
            SortKey::Urgency => a.urgency.priority().cmp(&b.urgency.priority()),
        }
    }

    /// 原地稳定排序，相等项保持原顺序
    pub fn sort(&self, items: &mut [Complaint]) {
        match self.direction {
            SortDirection::Asc => items.sort_by(|a, b| self.compare_asc(a, b)),
            SortDirection::Desc => items.sort_by(|a, b| self.compare_asc(b, a)),
        }
    }
}

/// `GET /api/admin/complaints` 查询参数
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<SortDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

/// 管理列表视图状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListState {
    pub search: String,
    pub sort: Option<SortConfig>,
    /// 从 1 开始
    pub page: u32,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: None,
            page: 1,
        }
    }
}

impl ListState {
    /// 同一列切换方向，新列从降序开始
    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort = Some(match self.sort {
            Some(cfg) if cfg.key == key => SortConfig {
                key,
                direction: cfg.direction.flip(),
            },
            _ => SortConfig {
                key,
                direction: SortDirection::Desc,
            },
        });
    }

    /// 修改搜索文本并回到第一页
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    /// 第 0 页按第 1 页处理
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// 先排序，再过滤，再截取当前页
    ///
    /// `total` 与 `total_pages` 针对过滤后的列表；超出末页时 `data` 为空。
    pub fn apply(&self, items: &[Complaint]) -> PaginatedResponse<Complaint> {
        let mut sorted = items.to_vec();
        if let Some(cfg) = &self.sort {
            cfg.sort(&mut sorted);
        }

        let needle = self.search.trim().to_lowercase();
        let filtered: Vec<Complaint> = if needle.is_empty() {
            sorted
        } else {
            sorted
                .into_iter()
                .filter(|c| c.search_text().contains(&needle))
                .collect()
        };

        let total = filtered.len() as u64;
        let page = self.page.max(1);
        let start = ((page - 1) as usize).saturating_mul(PAGE_SIZE as usize);
        let data = filtered
            .into_iter()
            .skip(start)
            .take(PAGE_SIZE as usize)
            .collect();

        PaginatedResponse::new(data, total, page, PAGE_SIZE)
    }

    pub fn to_query(&self) -> ListQuery {
        ListQuery {
            search: (!self.search.is_empty()).then(|| self.search.clone()),
            sort: self.sort.map(|s| s.key),
            direction: self.sort.map(|s| s.direction),
            page: Some(self.page),
        }
    }
}

impl From<ListQuery> for ListState {
    fn from(q: ListQuery) -> Self {
        Self {
            search: q.search.unwrap_or_default(),
            sort: q.sort.map(|key| SortConfig {
                key,
                direction: q.direction.unwrap_or_default(),
            }),
            page: q.page.unwrap_or(1).max(1),
        }
    }
}

/// 分页响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// 当前页数据
    pub data: Vec<T>,
    /// 过滤后的总记录数
    pub total: u64,
    /// 当前页码 (从 1 开始)
    pub page: u32,
    /// 每页数量
    pub limit: u32,
    /// 总页数
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = if limit > 0 {
            total.div_ceil(limit as u64) as u32
        } else {
            1
        };

        Self {
            data,
            total,
            page,
            limit,
            total_pages,
        }
    }
}
