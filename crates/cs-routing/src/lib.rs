//! CyberSoluce Routing
//!
//! Client-side route resolution for the CyberSoluce front-end:
//! - Static route table, first match in declaration order wins
//! - Parametric segments (`:id`) bound as named inputs
//! - Legacy domain paths kept as aliases of the current ones
//! - Catch-all `*` redirects to `/`, replacing the history entry

mod error;
mod history;
mod location;
mod page;
mod pattern;
mod router;
mod table;

pub use error::RoutingError;
pub use history::{History, HistoryEntry};
pub use location::Location;
pub use page::PageId;
pub use pattern::{PathParams, PathPattern, Segment};
pub use router::{Navigation, NavigationKind, Router};
pub use table::{Resolution, RouteEntry, RouteTable, RouteTarget};

pub type Result<T> = std::result::Result<T, RoutingError>;
