use async_trait::async_trait;
use marquee_models::{BrowseMode, PageResult};

use crate::error::TmdbError;

/// One page worth of list query: which mode, which release-year bounds,
/// which page cursor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageQuery {
    pub mode: BrowseMode,
    pub year_range: (u16, u16),
    pub page: u32,
}

/// Seam between the paginated query layer and the remote service. The real
/// implementation is [`crate::TmdbClient`]; tests substitute scripted pages.
#[async_trait]
pub trait TitleSource: Send + Sync {
    async fn fetch_page(&self, query: &PageQuery) -> Result<PageResult, TmdbError>;
}
