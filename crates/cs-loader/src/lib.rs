//! CyberSoluce Page Loader
//!
//! Page units other than the home page are fetched on first navigation:
//! - One in-flight fetch per page, shared by every requester
//! - Cached after the first success, retried after a failure
//! - The outlet shows one shared fallback while a fetch is pending
//! - Last navigation wins; late results for older requests are dropped

mod error;
mod loader;
mod module;
mod outlet;

pub use error::LoadError;
pub use loader::LazyLoader;
pub use module::{BundledSource, DelayedSource, ModuleFuture, ModuleSource, PageModule};
pub use outlet::{Fallback, OutletState, RouteOutlet, ShowOutcome};

pub type Result<T> = std::result::Result<T, LoadError>;
