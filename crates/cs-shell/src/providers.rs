//! Provider composition
//!
//! Cross-cutting collaborators wrapped around the routed content, outermost
//! first: theme, notifications, auth session, modal stack, then the router.
//! The shell only consumes their interfaces; the in-memory implementations
//! here back headless runs and tests.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Theme,
    Notification,
    Auth,
    Modal,
    Router,
}

// === Auth ===

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user_id: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

pub trait AuthProvider: Send + Sync {
    fn is_authenticated(&self) -> bool;
    fn session(&self) -> Option<AuthSession>;
}

/// Holds whatever session it was last given
#[derive(Debug, Default)]
pub struct StaticAuth {
    session: RwLock<Option<AuthSession>>,
}

impl StaticAuth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sign_in(&self, session: AuthSession) {
        tracing::info!(user_id = %session.user_id, "Session started");
        *self.session.write() = Some(session);
    }

    pub fn sign_out(&self) {
        *self.session.write() = None;
    }
}

impl AuthProvider for StaticAuth {
    fn is_authenticated(&self) -> bool {
        self.session
            .read()
            .as_ref()
            .is_some_and(|s| s.expires_at > Utc::now())
    }

    fn session(&self) -> Option<AuthSession> {
        self.session.read().clone()
    }
}

// === Theme ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

pub trait ThemeProvider: Send + Sync {
    fn current_theme(&self) -> Theme;
    /// Flip the theme, returning the new one
    fn toggle(&self) -> Theme;
}

#[derive(Debug)]
pub struct ThemeState {
    theme: RwLock<Theme>,
}

impl ThemeState {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme: RwLock::new(theme),
        }
    }
}

impl Default for ThemeState {
    fn default() -> Self {
        Self::new(Theme::Light)
    }
}

impl ThemeProvider for ThemeState {
    fn current_theme(&self) -> Theme {
        *self.theme.read()
    }

    fn toggle(&self) -> Theme {
        let mut theme = self.theme.write();
        *theme = match *theme {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
        *theme
    }
}

// === Notifications ===

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

pub trait NotificationSink: Send + Sync {
    /// Queue a message for display, returning its id
    fn push(&self, message: String) -> String;
}

#[derive(Debug, Default)]
pub struct NotificationCenter {
    items: RwLock<Vec<Notification>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.items.read().clone()
    }

    pub fn dismiss(&self, id: &str) -> bool {
        let mut items = self.items.write();
        let before = items.len();
        items.retain(|n| n.id != id);
        items.len() != before
    }
}

impl NotificationSink for NotificationCenter {
    fn push(&self, message: String) -> String {
        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            message,
            created_at: Utc::now(),
        };
        let id = notification.id.clone();
        self.items.write().push(notification);
        id
    }
}

// === Modals ===

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modal {
    pub id: String,
    pub component: String,
}

pub trait ModalHost: Send + Sync {
    fn open(&self, component: &str) -> String;
    /// Close the topmost modal
    fn close(&self) -> Option<Modal>;
}

#[derive(Debug, Default)]
pub struct ModalStack {
    stack: RwLock<Vec<Modal>>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn top(&self) -> Option<Modal> {
        self.stack.read().last().cloned()
    }

    pub fn depth(&self) -> usize {
        self.stack.read().len()
    }
}

impl ModalHost for ModalStack {
    fn open(&self, component: &str) -> String {
        let modal = Modal {
            id: Uuid::new_v4().to_string(),
            component: component.to_string(),
        };
        let id = modal.id.clone();
        self.stack.write().push(modal);
        id
    }

    fn close(&self) -> Option<Modal> {
        self.stack.write().pop()
    }
}

// === Analytics ===

pub trait Analytics: Send + Sync {
    fn track_page_view(&self, path: &str, title: &str);
}

/// Reports page views as tracing events under the `analytics` target
#[derive(Debug, Clone)]
pub struct TracingAnalytics {
    tracking_id: Option<String>,
    enabled: bool,
}

impl TracingAnalytics {
    pub fn new(config: &Config) -> Self {
        Self {
            tracking_id: config.analytics_id.clone(),
            enabled: config.analytics_enabled(),
        }
    }
}

impl Analytics for TracingAnalytics {
    fn track_page_view(&self, path: &str, title: &str) {
        if !self.enabled {
            return;
        }
        tracing::info!(
            target: "analytics",
            tracking_id = self.tracking_id.as_deref().unwrap_or_default(),
            path,
            title,
            "page_view"
        );
    }
}

// === Composition ===

/// The collaborators available to everything under the shell
#[derive(Clone)]
pub struct ProviderStack {
    pub theme: Arc<dyn ThemeProvider>,
    pub notifications: Arc<dyn NotificationSink>,
    pub auth: Arc<dyn AuthProvider>,
    pub modals: Arc<dyn ModalHost>,
    pub analytics: Arc<dyn Analytics>,
}

impl ProviderStack {
    const LAYERS: [ProviderKind; 5] = [
        ProviderKind::Theme,
        ProviderKind::Notification,
        ProviderKind::Auth,
        ProviderKind::Modal,
        ProviderKind::Router,
    ];

    pub fn in_memory(config: &Config) -> Self {
        Self {
            theme: Arc::new(ThemeState::default()),
            notifications: Arc::new(NotificationCenter::new()),
            auth: Arc::new(StaticAuth::new()),
            modals: Arc::new(ModalStack::new()),
            analytics: Arc::new(TracingAnalytics::new(config)),
        }
    }

    pub fn with_analytics(mut self, analytics: Arc<dyn Analytics>) -> Self {
        self.analytics = analytics;
        self
    }

    pub fn with_auth(mut self, auth: Arc<dyn AuthProvider>) -> Self {
        self.auth = auth;
        self
    }

    /// Nesting order, outermost first
    pub fn layers() -> &'static [ProviderKind] {
        &Self::LAYERS
    }
}
