//! Navigation entries

use serde::{Deserialize, Serialize};

/// Symbolic icon reference, mapped to artwork by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Home,
    BarChart,
    Box,
    Shield,
    Lock,
    FileText,
    Users,
    GitBranch,
    Target,
    Package,
    Presentation,
    Calculator,
    CheckSquare,
    Calendar,
    Database,
    Bell,
    UserCircle,
    FolderOpen,
    Brain,
    DollarSign,
    BookOpen,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavEntry {
    /// Display name, unique among siblings
    pub name: String,
    /// Target path; `None` for groups, which only open their flyout
    pub href: Option<String>,
    pub icon: Icon,
    /// Child entries; non-empty only for groups
    pub children: Vec<NavEntry>,
    /// Other paths that render the same page as `href`
    pub aliases: Vec<String>,
}

impl NavEntry {
    pub fn leaf(name: &str, href: &str, icon: Icon) -> Self {
        Self {
            name: name.to_string(),
            href: Some(href.to_string()),
            icon,
            children: Vec::new(),
            aliases: Vec::new(),
        }
    }

    pub fn group(name: &str, icon: Icon, children: Vec<NavEntry>) -> Self {
        Self {
            name: name.to_string(),
            href: None,
            icon,
            children,
            aliases: Vec::new(),
        }
    }

    pub fn with_aliases(mut self, aliases: Vec<String>) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn is_group(&self) -> bool {
        !self.children.is_empty() || self.href.is_none()
    }

    pub fn child(&self, name: &str) -> Option<&NavEntry> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Whether this entry should be highlighted for `path`.
    ///
    /// A group is active exactly when one of its children is.
    pub fn is_active(&self, path: &str) -> bool {
        if self.is_group() {
            return self.children.iter().any(|c| c.is_active(path));
        }

        self.href
            .iter()
            .chain(self.aliases.iter())
            .any(|href| href_matches(href, path))
    }
}

/// Leaf rule: `/` matches only itself, everything else matches by prefix.
pub fn href_matches(href: &str, path: &str) -> bool {
    if href == "/" {
        path == "/"
    } else {
        path.starts_with(href)
    }
}
