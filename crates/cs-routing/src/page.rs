//! Page units
//!
//! Every view the router can render is one variant of [`PageId`]. Dispatch goes
//! through this closed set rather than free-form component names, so a route
//! can only ever point at a page that exists.

use serde::{Deserialize, Serialize};

macro_rules! pages {
    ($($variant:ident => ($key:literal, $title:literal)),+ $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum PageId {
            $(
                #[serde(rename = $key)]
                $variant,
            )+
        }

        impl PageId {
            /// All page units in declaration order
            pub const ALL: &'static [PageId] = &[$(PageId::$variant),+];

            /// Stable kebab-case key
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(PageId::$variant => $key,)+
                }
            }

            /// Human-readable title, reported with page views
            pub fn title(&self) -> &'static str {
                match self {
                    $(PageId::$variant => $title,)+
                }
            }
        }

        impl std::str::FromStr for PageId {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($key => Ok(PageId::$variant),)+
                    _ => Err(format!("Unknown page: {}", s)),
                }
            }
        }
    };
}

pages! {
    Home => ("home", "Home"),
    About => ("about", "About"),
    Pricing => ("pricing", "Pricing"),
    Contact => ("contact", "Contact"),
    Security => ("security", "Security"),
    Platform => ("platform", "Platform"),
    Demo => ("demo", "Demo"),
    ExperienceIt => ("experience-it", "Experience It"),
    Support => ("support", "Support"),
    Careers => ("careers", "Careers"),
    Partners => ("partners", "Partners"),
    Blog => ("blog", "Blog"),
    Compliance => ("compliance", "Compliance"),
    Implementation => ("implementation", "Implementation"),
    Resources => ("resources", "Resources"),
    Documentation => ("documentation", "Documentation"),
    Terms => ("terms", "Terms of Service"),
    Privacy => ("privacy", "Privacy Policy"),
    Ransomware => ("ransomware", "CyberCaution"),
    SupplyChain => ("supply-chain", "VendorSoluce"),
    PrivacyProtection => ("privacy-protection", "CyberCorrect"),
    SensitiveInfo => ("sensitive-info", "CyberCertitude"),
    Assessment => ("assessment", "Assessment"),
    RansomwareAssessment => ("ransomware-assessment", "Ransomware Assessment"),
    RansomwareResults => ("ransomware-results", "Ransomware Results"),
    RansomwareRecommendations => ("ransomware-recommendations", "Ransomware Recommendations"),
    CuiAssessment => ("cui-assessment", "CUI Assessment"),
    CuiResults => ("cui-results", "CUI Results"),
    CuiRecommendations => ("cui-recommendations", "CUI Recommendations"),
    NistCsfAssessment => ("nist-csf-assessment", "NIST CSF Assessment"),
    Login => ("login", "Log In"),
    Signup => ("signup", "Sign Up"),
    ForgotPassword => ("forgot-password", "Forgot Password"),
    DemoCredentials => ("demo-credentials", "Demo Credentials"),
    Dashboard => ("dashboard", "Dashboard"),
    UnifiedWorkflow => ("unified-workflow", "Workflow"),
    FrameworkMapper => ("framework-mapper", "Framework Mapper"),
    MaturityTracker => ("maturity-tracker", "Maturity Tracker"),
    ComplianceOrchestrator => ("compliance-orchestrator", "Compliance Orchestrator"),
    AuditPackager => ("audit-packager", "Audit Packager"),
    BudgetSimulator => ("budget-simulator", "Budget Simulator"),
    ExecutiveReporting => ("executive-reporting", "Executive Reporting"),
    IntelligenceEngine => ("intelligence-engine", "Intelligence"),
    TaskManagement => ("task-management", "Task Management"),
    TimelineManagement => ("timeline-management", "Timeline Management"),
    EvidenceVault => ("evidence-vault", "Evidence Vault"),
    NotificationCenter => ("notification-center", "Notification Center"),
    NistCompliance => ("nist-compliance", "NIST Compliance"),
    NistEvidence => ("nist-evidence", "NIST Evidence"),
    NistCalendar => ("nist-calendar", "NIST Calendar"),
    NistAssets => ("nist-assets", "NIST Assets"),
    NistPolicies => ("nist-policies", "NIST Policies"),
    NistControls => ("nist-controls", "NIST Controls"),
    NistTeam => ("nist-team", "NIST Team"),
    NistTasks => ("nist-tasks", "NIST Tasks"),
    MultiFrameworkAssessment => ("multi-framework-assessment", "Multi-Framework Assessment"),
    AssessmentComparison => ("assessment-comparison", "Assessment Comparison"),
    AssessmentTemplates => ("assessment-templates", "Assessment Templates"),
    PolicyRepository => ("policy-repository", "Policy Repository"),
}

impl PageId {
    /// Eager pages ship with the initial bundle and never show the loading fallback.
    pub fn is_eager(&self) -> bool {
        matches!(self, PageId::Home)
    }
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
