//! 投诉存储层
//!
//! 全部投诉保存在一个存储槽中，作为一个 JSON 数组整体读写。
//!
//! - [`RedbComplaintStore`] - redb 文件存储 (生产)
//! - [`MemoryComplaintStore`] - 内存存储 (测试、嵌入)

mod memory;
mod redb_store;

pub use memory::MemoryComplaintStore;
pub use redb_store::{RedbComplaintStore, SLOT_FILE};

use shared::error::AppError;
use shared::models::Complaint;
use thiserror::Error;

/// 存储错误
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Mutation closure was not invoked")]
    MutationSkipped,
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        tracing::error!(error = %err, "Complaint storage failure");
        AppError::database(format!("Storage failure: {}", err))
    }
}

/// 读-改-写闭包的结果
///
/// `changed == false` 表示集合未变，不写入。
#[derive(Debug)]
pub struct Mutation<R> {
    pub value: R,
    pub changed: bool,
}

impl<R> Mutation<R> {
    pub fn changed(value: R) -> Self {
        Self {
            value,
            changed: true,
        }
    }

    pub fn unchanged(value: R) -> Self {
        Self {
            value,
            changed: false,
        }
    }
}

/// 投诉存储槽访问
pub trait ComplaintRepository: Send + Sync {
    /// 读取全部投诉
    ///
    /// 槽缺失或损坏时返回空列表并记录 `warn`。
    fn load(&self) -> Vec<Complaint>;

    /// 用 `complaints` 覆盖存储槽 (后写者胜)
    fn save(&self, complaints: &[Complaint]) -> StorageResult<()>;

    /// 在一次独占写事务中对当前集合执行 `f`
    ///
    /// 仅当 `f` 返回 `true` 时写回；`f` 恰好调用一次。
    fn transact(&self, f: &mut dyn FnMut(&mut Vec<Complaint>) -> bool) -> StorageResult<()>;
}

impl dyn ComplaintRepository {
    /// 原子读-改-写，返回由集合计算出的值
    pub fn mutate<R>(
        &self,
        f: impl FnOnce(&mut Vec<Complaint>) -> Mutation<R>,
    ) -> StorageResult<R> {
        let mut f = Some(f);
        let mut out = None;
        self.transact(&mut |items: &mut Vec<Complaint>| match f.take() {
            Some(f) => {
                let m = f(items);
                out = Some(m.value);
                m.changed
            }
            None => false,
        })?;
        out.ok_or(StorageError::MutationSkipped)
    }
}
