//! Screen view models handed to the renderer

use serde::Serialize;

use cs_loader::PageModule;
use cs_nav::NavView;
use cs_routing::{Location, PageId, PathParams};

use crate::boundary::FallbackUi;
use crate::error::RenderFault;
use crate::providers::Theme;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub page: PageId,
    pub title: String,
    pub path: String,
    pub params: PathParams,
}

/// Turns a resolved page unit into its view
pub trait PageRenderer: Send + Sync {
    fn render(
        &self,
        module: &PageModule,
        location: &Location,
        params: &PathParams,
    ) -> Result<PageView, RenderFault>;
}

/// Page content lives outside the shell; this renders the page header only
#[derive(Debug, Default, Clone, Copy)]
pub struct TitleRenderer;

impl PageRenderer for TitleRenderer {
    fn render(
        &self,
        module: &PageModule,
        location: &Location,
        params: &PathParams,
    ) -> Result<PageView, RenderFault> {
        Ok(PageView {
            page: module.page,
            title: module.title.clone(),
            path: location.path.clone(),
            params: params.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContentView {
    /// Nothing requested yet
    Blank,
    Loading { text: String },
    Page(PageView),
    Failed(FallbackUi),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppView {
    pub app_name: String,
    pub theme: Theme,
    pub nav: NavView,
    pub content: ContentView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Screen {
    App(AppView),
    /// The outermost boundary caught a failure
    Crashed(FallbackUi),
}

impl Screen {
    pub fn app(&self) -> Option<&AppView> {
        match self {
            Screen::App(view) => Some(view),
            Screen::Crashed(_) => None,
        }
    }
}
