//! Application state container
//!
//! Owns the router, the navigation menu and the route outlet, wrapped in the
//! provider stack and two error boundaries: one around the whole screen and
//! one around the routed content.

use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use cs_loader::{
    Fallback, LazyLoader, ModuleSource, OutletState, PageModule, RouteOutlet, ShowOutcome,
};
use cs_nav::{MenuAction, MenuState, NavMenu, NavView, Viewport};
use cs_routing::{HistoryEntry, Location, Navigation, PageId, RouteTable, Router};

use crate::boundary::{BoundaryState, ErrorBoundary, Guarded};
use crate::config::Config;
use crate::error::RenderFault;
use crate::providers::ProviderStack;
use crate::startup::{self, BundledReferenceData, ReferenceData};
use crate::view::{AppView, ContentView, PageRenderer, Screen, TitleRenderer};
use crate::Result;

/// One mounted application session
pub struct App {
    /// Configuration
    config: Config,
    /// Theme, notifications, auth, modals and analytics
    providers: ProviderStack,
    /// Reference data preloaded on mount
    reference_data: Arc<dyn ReferenceData>,
    /// Turns a loaded page unit into its view
    renderer: Arc<dyn PageRenderer>,
    /// Route table and session history
    router: Mutex<Router>,
    /// Navigation menu (immutable)
    menu: Arc<NavMenu>,
    /// Open group, mobile menu and hover
    menu_state: RwLock<MenuState>,
    viewport: RwLock<Viewport>,
    /// Region where the routed page renders
    outlet: RouteOutlet,
    /// Boundary around the whole screen
    app_boundary: Mutex<ErrorBoundary>,
    /// Boundary around the routed content only
    content_boundary: Mutex<ErrorBoundary>,
    /// Set by the first `mount`
    mounted: AtomicBool,
}

impl App {
    pub fn new(config: Config, source: Arc<dyn ModuleSource>) -> Result<Self> {
        let table = Arc::new(RouteTable::standard()?);
        let menu = Arc::new(NavMenu::standard(&table)?);
        let router = Router::new(table).with_max_redirects(config.max_redirects);

        let loader = LazyLoader::new(source);
        for page in PageId::ALL.iter().filter(|p| p.is_eager()) {
            loader.register(PageModule::new(*page));
        }
        let outlet = RouteOutlet::new(
            loader,
            Fallback {
                text: config.loading_text.clone(),
            },
        );

        tracing::info!(
            app = %config.app_name,
            version = %config.version,
            runtime = %config.runtime,
            "Application created"
        );

        Ok(Self {
            providers: ProviderStack::in_memory(&config),
            reference_data: Arc::new(BundledReferenceData::new()),
            renderer: Arc::new(TitleRenderer),
            router: Mutex::new(router),
            menu,
            menu_state: RwLock::new(MenuState::new()),
            viewport: RwLock::new(Viewport::Desktop),
            outlet,
            app_boundary: Mutex::new(ErrorBoundary::new("app")),
            content_boundary: Mutex::new(ErrorBoundary::new("content")),
            mounted: AtomicBool::new(false),
            config,
        })
    }

    pub fn with_providers(mut self, providers: ProviderStack) -> Self {
        self.providers = providers;
        self
    }

    pub fn with_reference_data(mut self, reference_data: Arc<dyn ReferenceData>) -> Self {
        self.reference_data = reference_data;
        self
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn PageRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn providers(&self) -> &ProviderStack {
        &self.providers
    }

    pub fn menu(&self) -> &NavMenu {
        &self.menu
    }

    pub fn outlet(&self) -> &RouteOutlet {
        &self.outlet
    }

    pub fn current_location(&self) -> Location {
        self.router.lock().current().clone()
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.router.lock().history().entries().to_vec()
    }

    pub fn content_state(&self) -> BoundaryState {
        self.content_boundary.lock().state().clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    /// Mount the application: preload reference data and show the initial
    /// location. Only the first call has any effect.
    pub async fn mount(&self) -> Result<Option<Navigation>> {
        if self
            .mounted
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("Already mounted");
            return Ok(None);
        }

        tracing::info!(initial = %self.config.initial_path, "Mounting application");

        let initial = self.config.initial_path.clone();
        let (_, navigation) = futures_util::future::join(
            startup::preload(self.reference_data.as_ref()),
            self.start(&initial),
        )
        .await;

        navigation.map(Some)
    }

    /// Full reload: fresh boundaries and menu state, then re-show the
    /// current location.
    pub async fn reload(&self) -> Result<Navigation> {
        tracing::info!("Reloading application");

        self.app_boundary.lock().remount();
        self.content_boundary.lock().remount();
        *self.menu_state.write() = MenuState::new();

        let (navigation, ticket) = {
            let mut router = self.router.lock();
            let href = router.current().href();
            (router.replace(&href)?, self.outlet.ticket())
        };
        self.show(navigation, ticket).await
    }

    // Outlet tickets are taken under the router lock so the outlet commits
    // in the order routes were settled.

    async fn start(&self, href: &str) -> Result<Navigation> {
        let (navigation, ticket) = {
            let mut router = self.router.lock();
            (router.start(href)?, self.outlet.ticket())
        };
        self.show(navigation, ticket).await
    }

    pub async fn navigate(&self, href: &str) -> Result<Navigation> {
        let (navigation, ticket) = {
            let mut router = self.router.lock();
            (router.navigate(href)?, self.outlet.ticket())
        };
        self.show(navigation, ticket).await
    }

    pub async fn back(&self) -> Result<Option<Navigation>> {
        let step = {
            let mut router = self.router.lock();
            router
                .back()?
                .map(|navigation| (navigation, self.outlet.ticket()))
        };
        match step {
            Some((navigation, ticket)) => self.show(navigation, ticket).await.map(Some),
            None => Ok(None),
        }
    }

    pub async fn forward(&self) -> Result<Option<Navigation>> {
        let step = {
            let mut router = self.router.lock();
            router
                .forward()?
                .map(|navigation| (navigation, self.outlet.ticket()))
        };
        match step {
            Some((navigation, ticket)) => self.show(navigation, ticket).await.map(Some),
            None => Ok(None),
        }
    }

    async fn show(&self, navigation: Navigation, ticket: u64) -> Result<Navigation> {
        self.providers
            .analytics
            .track_page_view(&navigation.location.path, navigation.page.title());

        let outcome = self
            .outlet
            .show_ticketed(
                ticket,
                navigation.location.clone(),
                navigation.page,
                navigation.params.clone(),
            )
            .await;

        match outcome {
            ShowOutcome::Shown => {}
            ShowOutcome::Failed(e) => self.content_boundary.lock().fail(e.into()),
            ShowOutcome::Superseded => {
                tracing::debug!(path = %navigation.location.path, "Navigation superseded");
            }
        }

        Ok(navigation)
    }

    pub fn viewport(&self) -> Viewport {
        *self.viewport.read()
    }

    pub fn set_viewport_width(&self, width: u32) -> Viewport {
        let viewport = Viewport::from_width(width, self.config.mobile_breakpoint);
        let previous = std::mem::replace(&mut *self.viewport.write(), viewport);

        if previous != viewport {
            tracing::debug!(width, viewport = ?viewport, "Viewport changed");
            if viewport == Viewport::Desktop {
                self.menu_state.write().close_mobile();
            }
        }
        viewport
    }

    pub fn menu_state(&self) -> MenuState {
        self.menu_state.read().clone()
    }

    /// Click a top-level menu entry. Groups toggle their flyout; links
    /// navigate.
    pub async fn click_menu(&self, name: &str) -> Result<Option<Navigation>> {
        let viewport = self.viewport();
        let action = self.menu_state.write().click(&self.menu, name, viewport)?;

        match action {
            MenuAction::Toggled { .. } => Ok(None),
            MenuAction::Navigate(href) => self.navigate(&href).await.map(Some),
        }
    }

    pub async fn select_menu_child(&self, group: &str, child: &str) -> Result<Navigation> {
        let viewport = self.viewport();
        let href = self
            .menu_state
            .write()
            .select_child(&self.menu, group, child, viewport)?;
        self.navigate(&href).await
    }

    pub fn toggle_mobile_menu(&self) {
        self.menu_state.write().toggle_mobile();
    }

    pub fn dismiss_menus(&self) {
        self.menu_state.write().dismiss();
    }

    pub fn hover_menu(&self, name: &str) {
        self.menu_state.write().hover_enter(name);
    }

    pub fn leave_menu(&self) {
        self.menu_state.write().hover_leave();
    }

    pub fn render(&self) -> Screen {
        let mut boundary = self.app_boundary.lock();
        match boundary.render(|| self.render_app()) {
            Guarded::Rendered(view) => Screen::App(view),
            Guarded::Fallback(ui) => Screen::Crashed(ui),
        }
    }

    fn render_app(&self) -> std::result::Result<AppView, RenderFault> {
        let path = self.current_location().path;
        let nav = NavView::render(&self.menu, &self.menu_state.read(), &path, self.viewport());

        let content = match self.content_boundary.lock().render(|| self.render_content()) {
            Guarded::Rendered(content) => content,
            Guarded::Fallback(ui) => ContentView::Failed(ui),
        };

        Ok(AppView {
            app_name: self.config.app_name.clone(),
            theme: self.providers.theme.current_theme(),
            nav,
            content,
        })
    }

    fn render_content(&self) -> std::result::Result<ContentView, RenderFault> {
        match self.outlet.state() {
            OutletState::Idle => Ok(ContentView::Blank),
            OutletState::Pending { .. } => Ok(ContentView::Loading {
                text: self.outlet.fallback().text.clone(),
            }),
            OutletState::Ready {
                location,
                module,
                params,
            } => self
                .renderer
                .render(&module, &location, &params)
                .map(ContentView::Page),
            OutletState::Failed { error, .. } => Err(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::Analytics;
    use crate::view::PageView;
    use cs_loader::{BundledSource, LoadError, ModuleFuture};
    use cs_routing::{PathParams, RoutingError};
    use std::collections::HashMap;
    use tokio::sync::oneshot;

    fn app() -> App {
        App::new(Config::default(), Arc::new(BundledSource)).unwrap()
    }

    fn page_view(screen: &Screen) -> Option<PageView> {
        match &screen.app()?.content {
            ContentView::Page(view) => Some(view.clone()),
            _ => None,
        }
    }

    fn paths(app: &App) -> Vec<String> {
        app.history().iter().map(|e| e.location.path.clone()).collect()
    }

    /// Holds each fetch until released by the test
    #[derive(Default)]
    struct GatedSource {
        gates: Mutex<HashMap<PageId, oneshot::Receiver<std::result::Result<(), String>>>>,
    }

    impl GatedSource {
        fn gate(&self, page: PageId) -> oneshot::Sender<std::result::Result<(), String>> {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().insert(page, rx);
            tx
        }
    }

    impl ModuleSource for GatedSource {
        fn fetch(&self, page: PageId) -> ModuleFuture {
            let gate = self.gates.lock().remove(&page);
            Box::pin(async move {
                match gate {
                    Some(rx) => match rx.await {
                        Ok(Ok(())) => Ok(PageModule::new(page)),
                        Ok(Err(reason)) => Err(LoadError::Fetch { page, reason }),
                        Err(_) => Err(LoadError::Abandoned(page)),
                    },
                    None => Ok(PageModule::new(page)),
                }
            })
        }
    }

    struct PanickingRenderer;

    impl PageRenderer for PanickingRenderer {
        fn render(
            &self,
            module: &PageModule,
            location: &Location,
            params: &PathParams,
        ) -> std::result::Result<PageView, RenderFault> {
            if module.page == PageId::Dashboard {
                panic!("dashboard widget crashed");
            }
            TitleRenderer.render(module, location, params)
        }
    }

    #[derive(Default)]
    struct RecordingAnalytics {
        views: Mutex<Vec<String>>,
    }

    impl Analytics for RecordingAnalytics {
        fn track_page_view(&self, path: &str, _title: &str) {
            self.views.lock().push(path.to_string());
        }
    }

    #[tokio::test]
    async fn test_mount_renders_home_without_fallback() {
        let app = app();
        let mut states = app.outlet().subscribe();

        let navigation = app.mount().await.unwrap().unwrap();
        assert_eq!(navigation.page, PageId::Home);

        // Home is bundled eagerly: the only state ever published is Ready
        assert!(states.has_changed().unwrap());
        assert!(matches!(*states.borrow_and_update(), OutletState::Ready { .. }));

        let view = page_view(&app.render()).unwrap();
        assert_eq!(view.page, PageId::Home);
        assert_eq!(view.path, "/");
    }

    #[tokio::test]
    async fn test_preloads_run_once() {
        let data = Arc::new(BundledReferenceData::new());
        let app = app().with_reference_data(data.clone());

        assert!(app.mount().await.unwrap().is_some());
        assert!(app.mount().await.unwrap().is_none());
        app.navigate("/dashboard").await.unwrap();

        assert!(app.is_mounted());
        assert_eq!(data.ermits_loads(), 1);
        assert_eq!(data.nist_loads(), 1);
    }

    #[tokio::test]
    async fn test_mount_on_deep_link() {
        let config = Config {
            initial_path: "/docs/getting-started".to_string(),
            ..Config::default()
        };
        let app = App::new(config, Arc::new(BundledSource)).unwrap();
        app.mount().await.unwrap();

        let view = page_view(&app.render()).unwrap();
        assert_eq!(view.page, PageId::Documentation);
        assert_eq!(view.params.get("docId"), Some("getting-started"));
        assert_eq!(paths(&app), vec!["/docs/getting-started"]);
    }

    #[tokio::test]
    async fn test_unmatched_path_redirects_home() {
        let app = app();
        app.mount().await.unwrap();
        app.navigate("/pricing").await.unwrap();

        let navigation = app.navigate("/no/such/page").await.unwrap();
        assert_eq!(navigation.page, PageId::Home);
        assert_eq!(
            navigation.redirected_from.map(|l| l.path),
            Some("/no/such/page".to_string())
        );
        assert_eq!(app.current_location().path, "/");

        // The bad location never stays in history
        assert_eq!(paths(&app), vec!["/", "/pricing", "/"]);
        assert_eq!(page_view(&app.render()).unwrap().page, PageId::Home);
    }

    #[tokio::test]
    async fn test_lazy_page_shows_fallback_while_loading() {
        let source = Arc::new(GatedSource::default());
        let release = source.gate(PageId::Dashboard);
        let app = Arc::new(App::new(Config::default(), source).unwrap());
        app.mount().await.unwrap();

        let pending = tokio::spawn({
            let app = app.clone();
            async move { app.navigate("/dashboard").await }
        });
        while !app.outlet().state().is_pending() {
            tokio::task::yield_now().await;
        }

        let screen = app.render();
        assert_eq!(
            screen.app().unwrap().content,
            ContentView::Loading {
                text: "Loading application...".to_string()
            }
        );
        // Navigation chrome already reflects the new path
        assert!(screen.app().unwrap().nav.item("Governance").unwrap().active);

        release.send(Ok(())).unwrap();
        pending.await.unwrap().unwrap();
        assert_eq!(page_view(&app.render()).unwrap().page, PageId::Dashboard);
    }

    #[tokio::test]
    async fn test_stale_resolution_is_discarded() {
        let source = Arc::new(GatedSource::default());
        let release_slow = source.gate(PageId::Dashboard);
        let app = Arc::new(App::new(Config::default(), source).unwrap());
        app.mount().await.unwrap();

        let slow = tokio::spawn({
            let app = app.clone();
            async move { app.navigate("/dashboard").await }
        });
        while !app.outlet().state().is_pending() {
            tokio::task::yield_now().await;
        }

        app.navigate("/pricing").await.unwrap();
        assert_eq!(page_view(&app.render()).unwrap().page, PageId::Pricing);

        release_slow.send(Ok(())).unwrap();
        slow.await.unwrap().unwrap();

        assert_eq!(page_view(&app.render()).unwrap().page, PageId::Pricing);
        assert_eq!(app.current_location().path, "/pricing");
        // The module itself is still cached for later
        assert!(app.outlet().loader().cached(PageId::Dashboard).is_some());
    }

    #[tokio::test]
    async fn test_failed_load_is_contained_to_content() {
        let source = Arc::new(GatedSource::default());
        let release = source.gate(PageId::Compliance);
        let app = Arc::new(App::new(Config::default(), source).unwrap());
        app.mount().await.unwrap();

        let pending = tokio::spawn({
            let app = app.clone();
            async move { app.navigate("/compliance").await }
        });
        while !app.outlet().state().is_pending() {
            tokio::task::yield_now().await;
        }
        release.send(Err("network down".to_string())).unwrap();
        pending.await.unwrap().unwrap();

        let screen = app.render();
        let view = screen.app().unwrap();
        match &view.content {
            ContentView::Failed(ui) => assert!(ui.message.contains("network down")),
            other => panic!("Expected Failed content, got {:?}", other),
        }
        assert!(matches!(app.content_state(), BoundaryState::Failed { .. }));

        // Menu still works
        app.click_menu("Domains").await.unwrap();
        assert!(app.menu_state().is_open("Domains"));
        let navigation = app.select_menu_child("Domains", "CyberCaution").await.unwrap();
        assert_eq!(navigation.location.path, "/domains/threat-intelligence");

        // No automatic retry of the failed subtree
        assert!(matches!(
            app.render().app().unwrap().content,
            ContentView::Failed(_)
        ));

        app.reload().await.unwrap();
        assert_eq!(app.content_state(), BoundaryState::Healthy);
        assert_eq!(
            page_view(&app.render()).unwrap().path,
            "/domains/threat-intelligence"
        );
    }

    #[tokio::test]
    async fn test_render_panic_is_caught_by_content_boundary() {
        let app = app().with_renderer(Arc::new(PanickingRenderer));
        app.mount().await.unwrap();
        app.navigate("/dashboard").await.unwrap();

        let screen = app.render();
        let view = screen.app().unwrap();
        assert!(matches!(view.content, ContentView::Failed(_)));
        assert!(view.nav.item("Governance").unwrap().active);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_navigations_agree_with_router() {
        let app = Arc::new(app());
        app.mount().await.unwrap();

        let paths = ["/dashboard", "/pricing", "/about", "/nist/controls", "/workflow"];
        let tasks: Vec<_> = (0..40)
            .map(|i| {
                let app = app.clone();
                let href = paths[i % paths.len()];
                tokio::spawn(async move { app.navigate(href).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let current = app.current_location();
        assert_eq!(app.outlet().latest(), Some(current.clone()));
        match app.outlet().state() {
            OutletState::Ready { location, .. } => assert_eq!(location, current),
            other => panic!("Expected Ready, got {:?}", other),
        }
        assert_eq!(page_view(&app.render()).unwrap().path, current.path);
    }

    #[tokio::test]
    async fn test_menu_click_navigates_and_closes_groups() {
        let app = app();
        app.mount().await.unwrap();

        assert!(app.click_menu("Governance").await.unwrap().is_none());
        assert!(app.click_menu("Domains").await.unwrap().is_none());
        assert_eq!(app.menu_state().open_group(), Some("Domains"));

        let navigation = app.click_menu("Home").await.unwrap().unwrap();
        assert_eq!(navigation.page, PageId::Home);
        assert_eq!(app.menu_state().open_group(), None);
    }

    #[tokio::test]
    async fn test_mobile_menu() {
        let app = app();
        app.mount().await.unwrap();
        assert_eq!(app.set_viewport_width(600), Viewport::Mobile);

        assert!(app.render().app().unwrap().nav.items.is_empty());

        app.toggle_mobile_menu();
        let nav = app.render().app().unwrap().nav.clone();
        assert!(nav.menu_open);
        assert!(!nav.items.is_empty());
        assert_eq!(nav.call_to_action.label, "Dashboard");

        app.click_menu("Governance").await.unwrap();
        app.select_menu_child("Governance", "Budget Simulator").await.unwrap();
        assert!(!app.menu_state().is_mobile_open());

        app.toggle_mobile_menu();
        assert_eq!(app.set_viewport_width(1440), Viewport::Desktop);
        assert!(!app.menu_state().is_mobile_open());
    }

    #[tokio::test]
    async fn test_back_and_forward() {
        let app = app();
        app.mount().await.unwrap();
        app.navigate("/pricing").await.unwrap();
        app.navigate("/about").await.unwrap();

        let back = app.back().await.unwrap().unwrap();
        assert_eq!(back.location.path, "/pricing");
        assert_eq!(page_view(&app.render()).unwrap().page, PageId::Pricing);

        let forward = app.forward().await.unwrap().unwrap();
        assert_eq!(forward.location.path, "/about");
        assert!(app.forward().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_page_views_are_tracked() {
        let analytics = Arc::new(RecordingAnalytics::default());
        let config = Config::default();
        let providers = ProviderStack::in_memory(&config).with_analytics(analytics.clone());
        let app = App::new(config, Arc::new(BundledSource))
            .unwrap()
            .with_providers(providers);

        app.mount().await.unwrap();
        app.navigate("/assessment").await.unwrap();

        assert_eq!(*analytics.views.lock(), vec!["/", "/assessment"]);
    }

    #[tokio::test]
    async fn test_foreign_origin_is_rejected() {
        let app = app();
        app.mount().await.unwrap();

        let err = app.navigate("https://evil.example/login").await.unwrap_err();
        assert!(matches!(
            err,
            crate::ShellError::Routing(RoutingError::InvalidPath(_))
        ));
        assert_eq!(app.current_location().path, "/");
    }

    #[test]
    fn test_screen_serializes() {
        let json = serde_json::to_value(Screen::Crashed(ErrorBoundary::new("app").fallback_ui()))
            .unwrap();
        assert_eq!(json["kind"], "crashed");
    }
}
