//! Menu state
//!
//! Transient, per-navbar state owned by the renderer. Group open state is a
//! single `Option`, so two flyouts can never be open together:
//! ```text
//! Closed ──click G──▶ Open(G) ──click G──▶ Closed
//!                       │
//!                       └──click H──▶ Open(H)
//! ```

use serde::{Deserialize, Serialize};

use crate::error::NavError;
use crate::menu::NavMenu;
use crate::Result;

pub const DEFAULT_BREAKPOINT: u32 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewport {
    Desktop,
    Mobile,
}

impl Viewport {
    pub fn from_width(width: u32, breakpoint: u32) -> Self {
        if width >= breakpoint {
            Viewport::Desktop
        } else {
            Viewport::Mobile
        }
    }
}

/// Chevron affordance next to a group name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chevron {
    Closed,
    /// Pointer is over the group (desktop only)
    Hovered,
    Open,
}

/// What a click on a top-level entry asks the caller to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// A group flyout was opened or closed
    Toggled { group: String, open: bool },
    /// Follow a link
    Navigate(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuState {
    open_group: Option<String>,
    mobile_open: bool,
    hovered: Option<String>,
}

impl MenuState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_group(&self) -> Option<&str> {
        self.open_group.as_deref()
    }

    pub fn is_open(&self, group: &str) -> bool {
        self.open_group.as_deref() == Some(group)
    }

    pub fn is_mobile_open(&self) -> bool {
        self.mobile_open
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Click on a top-level entry.
    ///
    /// Groups toggle with mutual exclusion; leaves close every flyout and,
    /// on mobile, the slide-out menu as well.
    pub fn click(&mut self, menu: &NavMenu, name: &str, viewport: Viewport) -> Result<MenuAction> {
        let entry = menu.find(name)?;

        if entry.is_group() {
            let open = !self.is_open(name);
            self.open_group = open.then(|| name.to_string());
            tracing::debug!(group = %name, open, "Menu group toggled");
            return Ok(MenuAction::Toggled {
                group: name.to_string(),
                open,
            });
        }

        self.open_group = None;
        if viewport == Viewport::Mobile {
            self.mobile_open = false;
        }

        let href = entry
            .href
            .clone()
            .ok_or_else(|| NavError::UnknownEntry(name.to_string()))?;
        Ok(MenuAction::Navigate(href))
    }

    /// Pick an entry inside a group's flyout, returning its href.
    ///
    /// The flyout stays open on desktop so several entries can be visited in
    /// turn; on mobile the slide-out menu closes since it covers the page.
    pub fn select_child(
        &mut self,
        menu: &NavMenu,
        group: &str,
        child: &str,
        viewport: Viewport,
    ) -> Result<String> {
        let entry = menu.group(group)?;
        let href = entry
            .child(child)
            .and_then(|c| c.href.clone())
            .ok_or_else(|| NavError::UnknownChild {
                group: group.to_string(),
                child: child.to_string(),
            })?;

        if viewport == Viewport::Mobile {
            self.mobile_open = false;
        }

        Ok(href)
    }

    /// Backdrop click: close every flyout
    pub fn dismiss(&mut self) {
        self.open_group = None;
    }

    pub fn toggle_mobile(&mut self) {
        self.mobile_open = !self.mobile_open;
    }

    pub fn close_mobile(&mut self) {
        self.mobile_open = false;
    }

    pub fn hover_enter(&mut self, name: &str) {
        self.hovered = Some(name.to_string());
    }

    pub fn hover_leave(&mut self) {
        self.hovered = None;
    }

    /// Open state wins over hover; hover has no effect on mobile.
    pub fn chevron(&self, group: &str, viewport: Viewport) -> Chevron {
        if self.is_open(group) {
            Chevron::Open
        } else if viewport == Viewport::Desktop && self.hovered.as_deref() == Some(group) {
            Chevron::Hovered
        } else {
            Chevron::Closed
        }
    }
}
