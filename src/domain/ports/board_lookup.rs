use crate::domain::entities::Board;
use crate::domain::errors::DomainResult;

/// Read access to boards, used to resolve notification links and titles.
#[async_trait::async_trait]
pub trait BoardLookup: Send + Sync {
    async fn get_board(&self, board_id: &str) -> DomainResult<Option<Board>>;
}
