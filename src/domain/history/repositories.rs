use super::entities::{HistoryPage, HistoryRecord};
use super::value_objects::HistoryQuery;
use crate::domain::errors::HistoryResult;

/// Server-side prompt history store
#[allow(async_fn_in_trait)]
pub trait HistoryRepository {
    async fn fetch_page(&self, query: &HistoryQuery) -> HistoryResult<HistoryPage>;

    async fn fetch_record(&self, id: i64) -> HistoryResult<HistoryRecord>;

    async fn delete_record(&self, id: i64) -> HistoryResult<()>;
}
