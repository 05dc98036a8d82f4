//! Loader error types

use cs_routing::PageId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Failed to load page {page}: {reason}")]
    Fetch { page: PageId, reason: String },

    #[error("Page {0} was dropped before it resolved")]
    Abandoned(PageId),
}
