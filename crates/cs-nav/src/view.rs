//! Per-render view model
//!
//! Derived fresh from `(menu, state, path, viewport)` on every render and
//! never stored.

use serde::Serialize;

use crate::entry::{Icon, NavEntry};
use crate::menu::NavMenu;
use crate::state::{Chevron, MenuState, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Horizontal bar with overlay flyouts
    Inline,
    /// Single vertical menu behind a toggle button
    Collapsible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupPresentation {
    Flyout,
    InlineList,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavChildView {
    pub name: String,
    pub href: String,
    pub icon: Icon,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItemView {
    pub name: String,
    pub href: Option<String>,
    pub icon: Icon,
    pub active: bool,
    pub open: bool,
    pub chevron: Option<Chevron>,
    pub presentation: Option<GroupPresentation>,
    /// Populated only while the group is open
    pub children: Vec<NavChildView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallToAction {
    pub label: String,
    pub href: String,
    pub icon: Icon,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavView {
    pub layout: Layout,
    /// Mobile only: whether the slide-out menu is showing
    pub menu_open: bool,
    /// Empty on mobile while the slide-out menu is closed
    pub items: Vec<NavItemView>,
    pub call_to_action: CallToAction,
}

impl NavView {
    pub fn render(menu: &NavMenu, state: &MenuState, path: &str, viewport: Viewport) -> Self {
        let layout = match viewport {
            Viewport::Desktop => Layout::Inline,
            Viewport::Mobile => Layout::Collapsible,
        };
        let show_items = layout == Layout::Inline || state.is_mobile_open();

        let items = if show_items {
            menu.entries()
                .iter()
                .map(|entry| item_view(entry, state, path, viewport))
                .collect()
        } else {
            Vec::new()
        };

        let label = match viewport {
            Viewport::Desktop => "Command Center",
            Viewport::Mobile => "Dashboard",
        };

        Self {
            layout,
            menu_open: state.is_mobile_open(),
            items,
            call_to_action: CallToAction {
                label: label.to_string(),
                href: "/dashboard".to_string(),
                icon: Icon::BarChart,
            },
        }
    }

    pub fn item(&self, name: &str) -> Option<&NavItemView> {
        self.items.iter().find(|i| i.name == name)
    }
}

fn item_view(entry: &NavEntry, state: &MenuState, path: &str, viewport: Viewport) -> NavItemView {
    let active = entry.is_active(path);

    if !entry.is_group() {
        return NavItemView {
            name: entry.name.clone(),
            href: entry.href.clone(),
            icon: entry.icon,
            active,
            open: false,
            chevron: None,
            presentation: None,
            children: Vec::new(),
        };
    }

    let open = state.is_open(&entry.name);
    let children = if open {
        entry
            .children
            .iter()
            .filter_map(|child| {
                child.href.as_ref().map(|href| NavChildView {
                    name: child.name.clone(),
                    href: href.clone(),
                    icon: child.icon,
                    active: child.is_active(path),
                })
            })
            .collect()
    } else {
        Vec::new()
    };

    let presentation = match viewport {
        Viewport::Desktop => GroupPresentation::Flyout,
        Viewport::Mobile => GroupPresentation::InlineList,
    };

    NavItemView {
        name: entry.name.clone(),
        href: None,
        icon: entry.icon,
        active,
        open,
        chevron: Some(state.chevron(&entry.name, viewport)),
        presentation: Some(presentation),
        children,
    }
}
