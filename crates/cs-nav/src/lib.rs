//! CyberSoluce Navigation Menu
//!
//! Static menu tree plus the per-session state that drives it:
//! - Leaves highlight by prefix match (`/` only on exact match)
//! - Groups highlight when any child does, aliases included
//! - At most one group open at a time
//! - Inline bar above the breakpoint, collapsible menu below it

mod entry;
mod error;
mod menu;
mod state;
mod view;

pub use entry::{href_matches, Icon, NavEntry};
pub use error::NavError;
pub use menu::NavMenu;
pub use state::{Chevron, MenuAction, MenuState, Viewport, DEFAULT_BREAKPOINT};
pub use view::{CallToAction, GroupPresentation, Layout, NavChildView, NavItemView, NavView};

pub type Result<T> = std::result::Result<T, NavError>;
