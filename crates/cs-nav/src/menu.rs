//! Navigation menu
//!
//! The menu is validated once and then shared read-only. Child aliases for
//! the standard menu come from the route table, so a renamed or legacy path
//! keeps highlighting its section without a separate keyword list.

use std::collections::HashSet;

use cs_routing::RouteTable;

use crate::entry::{Icon, NavEntry};
use crate::error::NavError;
use crate::Result;

#[derive(Debug, Clone)]
pub struct NavMenu {
    entries: Vec<NavEntry>,
}

impl NavMenu {
    pub fn new(entries: Vec<NavEntry>) -> Result<Self> {
        validate_level(&entries, true)?;
        Ok(Self { entries })
    }

    /// The CyberSoluce top bar, with aliases taken from `table`.
    pub fn standard(table: &RouteTable) -> Result<Self> {
        let entries = vec![
            NavEntry::leaf("Home", "/", Icon::Home),
            NavEntry::leaf("Workflow", "/workflow", Icon::BarChart),
            NavEntry::group(
                "Domains",
                Icon::Box,
                vec![
                    NavEntry::leaf("CyberCaution", "/domains/threat-intelligence", Icon::Shield),
                    NavEntry::leaf("VendorSoluce", "/domains/supply-chain-risk", Icon::Box),
                    NavEntry::leaf("CyberCorrect", "/domains/compliance-management", Icon::Lock),
                    NavEntry::leaf("CyberCertitude", "/domains/training-awareness", Icon::FileText),
                ],
            ),
            NavEntry::group(
                "Governance",
                Icon::Users,
                vec![
                    NavEntry::leaf("Dashboard", "/dashboard", Icon::BarChart),
                    NavEntry::leaf("Framework Mapper", "/framework-mapper", Icon::GitBranch),
                    NavEntry::leaf("Maturity Tracker", "/maturity-tracker", Icon::Target),
                    NavEntry::leaf("Compliance Orchestrator", "/compliance-orchestrator", Icon::Users),
                    NavEntry::leaf("Audit Packager", "/audit-packager", Icon::Package),
                    NavEntry::leaf("Executive Reporting", "/executive-reporting", Icon::Presentation),
                    NavEntry::leaf("Budget Simulator", "/budget-simulator", Icon::Calculator),
                ],
            ),
            NavEntry::group(
                "Orchestration",
                Icon::CheckSquare,
                vec![
                    NavEntry::leaf("Task Management", "/orchestration/tasks", Icon::CheckSquare),
                    NavEntry::leaf("Timeline Management", "/orchestration/timelines", Icon::Calendar),
                    NavEntry::leaf("Evidence Vault", "/orchestration/evidence", Icon::Database),
                    NavEntry::leaf("Notification Center", "/orchestration/notifications", Icon::Bell),
                    NavEntry::leaf("NIST Controls", "/nist/controls", Icon::Shield),
                    NavEntry::leaf("NIST Compliance", "/nist/compliance", Icon::CheckSquare),
                    NavEntry::leaf("NIST Evidence", "/nist/evidence", Icon::Database),
                    NavEntry::leaf("NIST Tasks", "/nist/tasks", Icon::CheckSquare),
                    NavEntry::leaf("NIST Team", "/nist/team", Icon::UserCircle),
                    NavEntry::leaf("NIST Assets", "/nist/assets", Icon::FolderOpen),
                    NavEntry::leaf("NIST Policies", "/nist/policies", Icon::FileText),
                    NavEntry::leaf("NIST Calendar", "/nist/calendar", Icon::Calendar),
                ],
            ),
            NavEntry::leaf("Intelligence", "/intelligence", Icon::Brain),
            NavEntry::leaf("Pricing", "/pricing", Icon::DollarSign),
            NavEntry::leaf("Resources", "/resources", Icon::BookOpen),
        ];

        let entries = entries
            .into_iter()
            .map(|entry| attach_aliases(entry, table))
            .collect();

        Self::new(entries)
    }

    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    pub fn find(&self, name: &str) -> Result<&NavEntry> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| NavError::UnknownEntry(name.to_string()))
    }

    pub fn group(&self, name: &str) -> Result<&NavEntry> {
        let entry = self.find(name)?;
        if !entry.is_group() {
            return Err(NavError::NotAGroup(name.to_string()));
        }
        Ok(entry)
    }

    pub fn groups(&self) -> impl Iterator<Item = &NavEntry> {
        self.entries.iter().filter(|e| e.is_group())
    }

    /// Names of all top-level entries highlighted for `path`
    pub fn active_names(&self, path: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.is_active(path))
            .map(|e| e.name.as_str())
            .collect()
    }
}

fn attach_aliases(mut entry: NavEntry, table: &RouteTable) -> NavEntry {
    if entry.is_group() {
        entry.children = entry
            .children
            .into_iter()
            .map(|child| attach_aliases(child, table))
            .collect();
        return entry;
    }

    let Some(href) = entry.href.clone() else {
        return entry;
    };
    let Some(page) = table.page_for(&href) else {
        return entry;
    };

    let aliases: Vec<String> = table
        .static_paths_for(page)
        .into_iter()
        .filter(|path| *path != href)
        .map(str::to_string)
        .collect();

    if !aliases.is_empty() {
        tracing::debug!(entry = %entry.name, ?aliases, "Menu entry aliases");
    }

    entry.with_aliases(aliases)
}

fn validate_level(entries: &[NavEntry], top_level: bool) -> Result<()> {
    let mut names = HashSet::new();

    for entry in entries {
        if !names.insert(entry.name.as_str()) {
            return Err(NavError::DuplicateName(entry.name.clone()));
        }

        if entry.is_group() {
            if !top_level {
                return Err(NavError::NestedTooDeep(entry.name.clone()));
            }
            if entry.children.is_empty() {
                return Err(NavError::EmptyGroup(entry.name.clone()));
            }
            validate_level(&entry.children, false)?;
            continue;
        }

        for href in entry.href.iter().chain(entry.aliases.iter()) {
            if !href.starts_with('/') {
                return Err(NavError::InvalidHref {
                    name: entry.name.clone(),
                    href: href.clone(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> NavMenu {
        NavMenu::standard(&RouteTable::standard().unwrap()).unwrap()
    }

    #[test]
    fn test_dashboard_highlights_governance() {
        let menu = standard();
        let governance = menu.group("Governance").unwrap();

        assert!(governance.is_active("/dashboard"));
        assert!(governance.child("Dashboard").unwrap().is_active("/dashboard"));
        assert_eq!(menu.active_names("/dashboard"), vec!["Governance"]);
    }

    #[test]
    fn test_resources_prefix() {
        let menu = standard();
        assert_eq!(menu.active_names("/resources/whitepaper-1"), vec!["Resources"]);
    }

    #[test]
    fn test_home_only_at_root() {
        let menu = standard();
        assert_eq!(menu.active_names("/"), vec!["Home"]);
        assert!(!menu.active_names("/pricing").contains(&"Home"));
    }

    #[test]
    fn test_legacy_domain_paths_highlight_domains() {
        let menu = standard();
        let domains = menu.group("Domains").unwrap();

        let caution = domains.child("CyberCaution").unwrap();
        assert_eq!(caution.aliases, vec!["/domains/ransomware".to_string()]);

        for path in [
            "/domains/ransomware",
            "/domains/supply-chain",
            "/domains/privacy",
            "/domains/sensitive-info",
        ] {
            assert_eq!(menu.active_names(path), vec!["Domains"], "path {}", path);
        }
    }

    #[test]
    fn test_compliance_page_is_not_governance() {
        // Only real children light up a group, not shared substrings
        let menu = standard();
        assert!(menu.active_names("/compliance").is_empty());
        assert_eq!(menu.active_names("/nist/team"), vec!["Orchestration"]);
    }

    #[test]
    fn test_rejects_grandchildren() {
        let nested = vec![NavEntry::group(
            "Outer",
            Icon::Box,
            vec![NavEntry::group(
                "Inner",
                Icon::Box,
                vec![NavEntry::leaf("Leaf", "/leaf", Icon::Box)],
            )],
        )];
        assert_eq!(
            NavMenu::new(nested).unwrap_err(),
            NavError::NestedTooDeep("Inner".to_string())
        );
    }

    #[test]
    fn test_rejects_bad_entries() {
        let empty = vec![NavEntry::group("Empty", Icon::Box, vec![])];
        assert!(matches!(NavMenu::new(empty), Err(NavError::EmptyGroup(_))));

        let dup = vec![
            NavEntry::leaf("Home", "/", Icon::Home),
            NavEntry::leaf("Home", "/home", Icon::Home),
        ];
        assert!(matches!(NavMenu::new(dup), Err(NavError::DuplicateName(_))));

        let relative = vec![NavEntry::leaf("About", "about", Icon::Home)];
        assert!(matches!(NavMenu::new(relative), Err(NavError::InvalidHref { .. })));
    }
}
