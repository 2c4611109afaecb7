//! 投诉模型
//!
//! 唯一持久化的实体: 市民提交的交通问题投诉。
//! 公共表单、管理表格与远程 API 共用同一结构。

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidateEmail};

use crate::error::{AppError, AppResult, ErrorCode};

// ── 限制 ────────────────────────────────────────────────────────────

/// 每条投诉最多附件数
pub const MAX_ATTACHMENTS: usize = 3;

/// 单个附件上限 (5 MiB)
pub const MAX_ATTACHMENT_SIZE: u64 = 5 * 1024 * 1024;

/// 姓名、地点
pub const MAX_NAME_LEN: usize = 200;

/// 问题描述
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// 邮箱 (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

// ── 枚举值域 ──────────────────────────────────────────────────────

/// 投诉类型
///
/// 序列化为显示标签 (`"Road Damage"`)，搜索与排序也按此文本。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplaintType {
    #[serde(rename = "Traffic Congestion")]
    TrafficCongestion,
    #[serde(rename = "Signal Malfunction")]
    SignalMalfunction,
    #[serde(rename = "Road Damage")]
    RoadDamage,
    #[serde(rename = "Illegal Parking")]
    IllegalParking,
    #[serde(rename = "Accident Report")]
    AccidentReport,
    #[serde(rename = "Urban Navigation")]
    UrbanNavigation,
    #[serde(rename = "Other")]
    Other,
}

impl ComplaintType {
    pub const ALL: [ComplaintType; 7] = [
        Self::TrafficCongestion,
        Self::SignalMalfunction,
        Self::RoadDamage,
        Self::IllegalParking,
        Self::AccidentReport,
        Self::UrbanNavigation,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TrafficCongestion => "Traffic Congestion",
            Self::SignalMalfunction => "Signal Malfunction",
            Self::RoadDamage => "Road Damage",
            Self::IllegalParking => "Illegal Parking",
            Self::AccidentReport => "Accident Report",
            Self::UrbanNavigation => "Urban Navigation",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ComplaintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| invalid_domain_value("type", s))
    }
}

/// 紧急程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

impl Urgency {
    pub const ALL: [Urgency; 4] = [Self::Critical, Self::High, Self::Medium, Self::Low];

    /// 排序优先级: critical=4 > high=3 > medium=2 > low=1
    pub fn priority(&self) -> u8 {
        match self {
            Self::Critical => 4,
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|u| u.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| invalid_domain_value("urgency", s))
    }
}

/// 投诉状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    #[default]
    Pending,
    InProgress,
    Resolved,
}

impl ComplaintStatus {
    pub const ALL: [ComplaintStatus; 3] = [Self::Pending, Self::InProgress, Self::Resolved];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
        }
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| invalid_domain_value("status", s))
    }
}

fn invalid_domain_value(field: &str, value: &str) -> AppError {
    AppError::with_message(
        ErrorCode::InvalidComplaintField,
        format!("'{}' is not a valid {}", value, field),
    )
    .with_detail("field", field)
}

// ── 日期 ───────────────────────────────────────────────────────────

/// 按存储格式输出时间 (`2025-01-01T08:30:00.000Z`)
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// 解析 RFC 3339 时间或 `YYYY-MM-DD` 日期 (按 UTC 零点)
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

mod iso_date {
    use super::*;

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format_date(date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        parse_date(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", raw)))
    }
}

mod iso_date_opt {
    use super::*;

    pub fn serialize<S: Serializer>(date: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_some(&format_date(d)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(d)? {
            Some(raw) => parse_date(&raw)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", raw))),
            None => Ok(None),
        }
    }
}

// ── 实体 ──────────────────────────────────────────────────────────

/// 附件元数据 (不保存文件内容)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub filename: String,
    pub media_type: String,
    /// 字节数
    pub size: u64,
}

impl Attachment {
    pub fn new(filename: impl Into<String>, media_type: impl Into<String>, size: u64) -> Self {
        Self {
            filename: filename.into(),
            media_type: media_type.into(),
            size,
        }
    }
}

/// 投诉记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complaint {
    /// 创建时间 (毫秒时间戳)，唯一且不可变
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "type")]
    pub complaint_type: ComplaintType,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub urgency: Urgency,
    #[serde(default)]
    pub status: ComplaintStatus,
    #[serde(with = "iso_date")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl Complaint {
    /// 由公共提交构建记录
    pub fn from_draft(id: i64, date: DateTime<Utc>, draft: ComplaintDraft) -> Self {
        Self {
            id,
            name: draft.name,
            email: Some(draft.email),
            complaint_type: draft.complaint_type,
            location: draft.location,
            description: Some(draft.description),
            urgency: draft.urgency,
            status: ComplaintStatus::Pending,
            date,
            attachments: draft.attachments,
        }
    }

    /// 由管理员表单构建记录
    pub fn from_admin(id: i64, now: DateTime<Utc>, create: AdminComplaintCreate) -> Self {
        Self {
            id,
            name: create.name,
            email: None,
            complaint_type: create.complaint_type,
            location: create.location,
            description: None,
            urgency: create.urgency,
            status: ComplaintStatus::Pending,
            date: create.date.unwrap_or(now),
            attachments: Vec::new(),
        }
    }

    /// 替换市民可编辑字段，保留 id、状态和日期
    pub fn apply_draft(&mut self, draft: ComplaintDraft) {
        self.name = draft.name;
        self.email = Some(draft.email);
        self.complaint_type = draft.complaint_type;
        self.location = draft.location;
        self.description = Some(draft.description);
        self.urgency = draft.urgency;
        self.attachments = draft.attachments;
    }

    /// 在 `now_ms` 创建的记录的下一个 id
    ///
    /// 通常就是创建时间戳；若时钟未超过已有最大 id，则取最大 id + 1。
    pub fn next_id(existing: &[Complaint], now_ms: i64) -> i64 {
        let max = existing.iter().map(|c| c.id).max().unwrap_or(i64::MIN);
        if now_ms > max { now_ms } else { max + 1 }
    }

    pub fn is_resolved(&self) -> bool {
        self.status == ComplaintStatus::Resolved
    }

    pub fn date_iso(&self) -> String {
        format_date(&self.date)
    }

    /// 管理搜索匹配的小写文本: 姓名、类型、地点、状态、日期、紧急程度
    pub fn search_text(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.name,
            self.complaint_type,
            self.location,
            self.status,
            self.date_iso(),
            self.urgency
        )
        .to_lowercase()
    }
}

// ── 请求体 ────────────────────────────────────────────────────────

/// 公共提交请求体，远程创建/更新也使用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ComplaintDraft {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email, length(max = 254))]
    pub email: String,
    #[serde(rename = "type")]
    pub complaint_type: ComplaintType,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    #[serde(default)]
    pub urgency: Urgency,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl ComplaintDraft {
    /// 去除首尾空白并校验提交规则
    ///
    /// 附件限制在文本字段之后检查，使用独立错误码。
    pub fn validated(mut self) -> AppResult<Self> {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_string();
        self.location = self.location.trim().to_string();
        self.description = self.description.trim().to_string();
        self.validate()?;
        check_attachments(&self.attachments)?;
        Ok(self)
    }
}

/// 检查附件数量、单个大小和文件名
pub fn check_attachments(attachments: &[Attachment]) -> AppResult<()> {
    if attachments.len() > MAX_ATTACHMENTS {
        return Err(AppError::with_message(
            ErrorCode::TooManyAttachments,
            format!(
                "At most {} attachments are allowed, got {}",
                MAX_ATTACHMENTS,
                attachments.len()
            ),
        )
        .with_detail("field", "attachments"));
    }
    for a in attachments {
        if a.filename.trim().is_empty() {
            return Err(AppError::invalid_field(
                "attachments",
                "Attachment filename must not be empty",
            ));
        }
        if a.size > MAX_ATTACHMENT_SIZE {
            return Err(AppError::with_message(
                ErrorCode::AttachmentTooLarge,
                format!(
                    "{} is {} bytes, max {} bytes",
                    a.filename, a.size, MAX_ATTACHMENT_SIZE
                ),
            )
            .with_detail("field", "attachments")
            .with_detail("filename", a.filename.clone()));
        }
    }
    Ok(())
}

/// 管理员新建投诉表单
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AdminComplaintCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(rename = "type")]
    pub complaint_type: ComplaintType,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    #[serde(default)]
    pub urgency: Urgency,
    #[serde(default, with = "iso_date_opt", skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

impl AdminComplaintCreate {
    pub fn validated(mut self) -> AppResult<Self> {
        self.name = self.name.trim().to_string();
        self.location = self.location.trim().to_string();
        self.validate()?;
        Ok(self)
    }
}

/// 单字段编辑
///
/// 格式: `{"field": "urgency", "value": "high"}`，枚举字段只接受合法值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FieldUpdate {
    Name(String),
    #[serde(rename = "type")]
    Type(ComplaintType),
    Location(String),
    Urgency(Urgency),
    Status(ComplaintStatus),
    /// RFC 3339 或 `YYYY-MM-DD`
    Date(String),
    Email(String),
    Description(String),
}

impl FieldUpdate {
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Type(_) => "type",
            Self::Location(_) => "location",
            Self::Urgency(_) => "urgency",
            Self::Status(_) => "status",
            Self::Date(_) => "date",
            Self::Email(_) => "email",
            Self::Description(_) => "description",
        }
    }

    /// 解析表格编辑器发送的 `(field, value)`
    pub fn parse(field: &str, value: &str) -> AppResult<Self> {
        match field {
            "name" => Ok(Self::Name(value.to_string())),
            "type" => value.parse().map(Self::Type),
            "location" => Ok(Self::Location(value.to_string())),
            "urgency" => value.parse().map(Self::Urgency),
            "status" => value.parse().map(Self::Status),
            "date" => Ok(Self::Date(value.to_string())),
            "email" => Ok(Self::Email(value.to_string())),
            "description" => Ok(Self::Description(value.to_string())),
            other => Err(AppError::with_message(
                ErrorCode::InvalidComplaintField,
                format!("'{}' is not an editable field", other),
            )
            .with_detail("field", other)),
        }
    }

    /// 校验新值并写入 `complaint`
    ///
    /// 出错时记录保持不变。
    pub fn apply(self, complaint: &mut Complaint) -> AppResult<()> {
        match self {
            Self::Name(v) => complaint.name = required_text("name", &v, MAX_NAME_LEN)?,
            Self::Location(v) => {
                complaint.location = required_text("location", &v, MAX_NAME_LEN)?
            }
            Self::Description(v) => {
                complaint.description = Some(required_text("description", &v, MAX_DESCRIPTION_LEN)?)
            }
            Self::Email(v) => {
                let v = required_text("email", &v, MAX_EMAIL_LEN)?;
                if !v.validate_email() {
                    return Err(AppError::invalid_field("email", "email is not a valid address"));
                }
                complaint.email = Some(v);
            }
            Self::Date(v) => {
                complaint.date = parse_date(&v).ok_or_else(|| {
                    AppError::with_message(
                        ErrorCode::InvalidComplaintField,
                        format!("'{}' is not a valid date", v),
                    )
                    .with_detail("field", "date")
                })?
            }
            Self::Type(t) => complaint.complaint_type = t,
            Self::Urgency(u) => complaint.urgency = u,
            Self::Status(s) => complaint.status = s,
        }
        Ok(())
    }
}

fn required_text(field: &str, value: &str, max_len: usize) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::invalid_field(
            field,
            format!("{field} must not be empty"),
        ));
    }
    if value.chars().count() > max_len {
        return Err(AppError::invalid_field(
            field,
            format!("{field} is too long (max {max_len})"),
        ));
    }
    Ok(value.to_string())
}

/// 状态统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub resolved: usize,
}

impl ComplaintStats {
    pub fn from_complaints(complaints: &[Complaint]) -> Self {
        complaints.iter().fold(
            Self {
                total: complaints.len(),
                ..Default::default()
            },
            |mut acc, c| {
                match c.status {
                    ComplaintStatus::Pending => acc.pending += 1,
                    ComplaintStatus::InProgress => acc.in_progress += 1,
                    ComplaintStatus::Resolved => acc.resolved += 1,
                }
                acc
            },
        )
    }
}
