//! Route table
//!
//! Built once at startup and never mutated. Entries are tried in declaration
//! order; the single `*` fallback is always last, so every path resolves.

use serde::Serialize;

use crate::error::RoutingError;
use crate::page::PageId;
use crate::pattern::{PathParams, PathPattern};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RouteTarget {
    /// Render a page unit
    Page { page: PageId },
    /// Navigate elsewhere; `replace` overwrites the current history entry
    Redirect { to: String, replace: bool },
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteEntry {
    pub pattern: PathPattern,
    pub target: RouteTarget,
}

impl RouteEntry {
    pub fn page(pattern: &str, page: PageId) -> Result<Self> {
        Ok(Self {
            pattern: PathPattern::parse(pattern)?,
            target: RouteTarget::Page { page },
        })
    }

    pub fn redirect(pattern: &str, to: &str, replace: bool) -> Result<Self> {
        Ok(Self {
            pattern: PathPattern::parse(pattern)?,
            target: RouteTarget::Redirect {
                to: to.to_string(),
                replace,
            },
        })
    }

    pub fn is_fallback(&self) -> bool {
        self.pattern.is_wildcard()
    }
}

/// Outcome of resolving a path against the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Resolution {
    Render {
        page: PageId,
        params: PathParams,
        pattern: String,
    },
    Redirect {
        to: String,
        replace: bool,
    },
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Validate and freeze a list of entries.
    pub fn new(entries: Vec<RouteEntry>) -> Result<Self> {
        let mut fallback_at = None;
        for (index, entry) in entries.iter().enumerate() {
            if entry.is_fallback() {
                if fallback_at.is_some() {
                    return Err(RoutingError::DuplicateFallback);
                }
                fallback_at = Some(index);
            }
        }

        match fallback_at {
            None => return Err(RoutingError::MissingFallback),
            Some(index) if index + 1 != entries.len() => {
                let after = entries[index + 1].pattern.to_string();
                return Err(RoutingError::FallbackNotLast(after));
            }
            Some(_) => {}
        }

        tracing::debug!(routes = entries.len(), "Route table built");

        Ok(Self { entries })
    }

    /// The CyberSoluce route surface.
    pub fn standard() -> Result<Self> {
        use PageId::*;

        let pages: &[(&str, PageId)] = &[
            // Public
            ("/", Home),
            ("/about", About),
            ("/pricing", Pricing),
            ("/contact", Contact),
            ("/security", Security),
            ("/platform", Platform),
            ("/demo", Demo),
            ("/experience", ExperienceIt),
            ("/support", Support),
            ("/careers", Careers),
            ("/partners", Partners),
            ("/blog", Blog),
            ("/compliance", Compliance),
            ("/implementation", Implementation),
            ("/resources", Resources),
            ("/docs", Documentation),
            ("/docs/:docId", Documentation),
            ("/terms", Terms),
            ("/privacy", Privacy),
            // Domain products
            ("/domains/threat-intelligence", Ransomware),
            ("/domains/supply-chain-risk", SupplyChain),
            ("/domains/compliance-management", PrivacyProtection),
            ("/domains/training-awareness", SensitiveInfo),
            // Legacy domain paths
            ("/domains/ransomware", Ransomware),
            ("/domains/supply-chain", SupplyChain),
            ("/domains/privacy", PrivacyProtection),
            ("/domains/sensitive-info", SensitiveInfo),
            // Assessments
            ("/assessment", Assessment),
            ("/assessment/:id", Assessment),
            ("/ransomware-assessment", RansomwareAssessment),
            ("/ransomware-results", RansomwareResults),
            ("/ransomware-recommendations", RansomwareRecommendations),
            ("/cui-assessment", CuiAssessment),
            ("/cui-results", CuiResults),
            ("/cui-recommendations", CuiRecommendations),
            ("/assessments/nist-csf", NistCsfAssessment),
            // Auth
            ("/login", Login),
            ("/signup", Signup),
            ("/forgot-password", ForgotPassword),
            ("/demo-credentials", DemoCredentials),
            // Governance
            ("/dashboard", Dashboard),
            ("/workflow", UnifiedWorkflow),
            ("/framework-mapper", FrameworkMapper),
            ("/maturity-tracker", MaturityTracker),
            ("/compliance-orchestrator", ComplianceOrchestrator),
            ("/audit-packager", AuditPackager),
            ("/budget-simulator", BudgetSimulator),
            ("/executive-reporting", ExecutiveReporting),
            ("/intelligence", IntelligenceEngine),
            // Orchestration
            ("/orchestration/tasks", TaskManagement),
            ("/orchestration/timelines", TimelineManagement),
            ("/orchestration/evidence", EvidenceVault),
            ("/orchestration/notifications", NotificationCenter),
            // NIST implementation
            ("/nist/compliance", NistCompliance),
            ("/nist/evidence", NistEvidence),
            ("/nist/calendar", NistCalendar),
            ("/nist/assets", NistAssets),
            ("/nist/policies", NistPolicies),
            ("/nist/controls", NistControls),
            ("/nist/team", NistTeam),
            ("/nist/tasks", NistTasks),
            // ERMITS assessments
            ("/assessments/multi-framework", MultiFrameworkAssessment),
            ("/assessments/comparison", AssessmentComparison),
            ("/assessments/templates", AssessmentTemplates),
            ("/assessments/policies", PolicyRepository),
            ("/assessments/:frameworkId", Assessment),
        ];

        let mut entries = pages
            .iter()
            .map(|(pattern, page)| RouteEntry::page(pattern, *page))
            .collect::<Result<Vec<_>>>()?;
        entries.push(RouteEntry::redirect("*", "/", true)?);

        Self::new(entries)
    }

    /// Resolve a normalized path. Total: the fallback always matches.
    pub fn resolve(&self, path: &str) -> Resolution {
        for entry in &self.entries {
            if let Some(params) = entry.pattern.matches(path) {
                return match &entry.target {
                    RouteTarget::Page { page } => Resolution::Render {
                        page: *page,
                        params,
                        pattern: entry.pattern.to_string(),
                    },
                    RouteTarget::Redirect { to, replace } => Resolution::Redirect {
                        to: to.clone(),
                        replace: *replace,
                    },
                };
            }
        }

        // Unreachable for a validated table
        Resolution::Redirect {
            to: "/".to_string(),
            replace: true,
        }
    }

    /// Page a path renders, if it renders one directly.
    pub fn page_for(&self, path: &str) -> Option<PageId> {
        match self.resolve(path) {
            Resolution::Render { page, .. } => Some(page),
            Resolution::Redirect { .. } => None,
        }
    }

    /// Static paths bound to `page`, in declaration order.
    pub fn static_paths_for(&self, page: PageId) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.pattern.is_static())
            .filter(|e| matches!(e.target, RouteTarget::Page { page: p } if p == page))
            .map(|e| e.pattern.as_str())
            .collect()
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
