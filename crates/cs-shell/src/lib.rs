//! CyberSoluce Shell
//!
//! Composes the application: providers around a router, the navigation bar
//! beside a route outlet, and error boundaries that keep a failing page from
//! taking the rest of the screen down with it.

mod app;
mod boundary;
mod config;
mod error;
mod providers;
mod startup;
mod view;

pub use app::App;
pub use boundary::{BoundaryState, ErrorBoundary, FallbackUi, Guarded};
pub use config::{Config, Runtime};
pub use error::{RenderFault, ShellError};
pub use providers::{
    Analytics, AuthProvider, AuthSession, Modal, ModalHost, ModalStack, Notification,
    NotificationCenter, NotificationSink, ProviderKind, ProviderStack, StaticAuth, Theme,
    ThemeProvider, ThemeState, TracingAnalytics,
};
pub use startup::{preload, BundledReferenceData, PreloadFuture, ReferenceData};
pub use view::{AppView, ContentView, PageRenderer, PageView, Screen, TitleRenderer};

// Re-export the composed crates
pub use cs_loader::{
    BundledSource, DelayedSource, Fallback, LazyLoader, LoadError, ModuleSource, OutletState,
    PageModule, RouteOutlet,
};
pub use cs_nav::{MenuState, NavMenu, NavView, Viewport};
pub use cs_routing::{Location, Navigation, PageId, PathParams, RouteTable, Router, RoutingError};

pub type Result<T> = std::result::Result<T, ShellError>;

/// Initialize logging. `RUST_LOG` wins over the runtime's default level.
pub fn init_logging(runtime: Runtime) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(runtime.default_log_directive()));

    fmt().with_env_filter(filter).with_target(true).init();
}
