//! Application configuration

use serde::{Deserialize, Serialize};

use crate::error::ShellError;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Runtime {
    Development,
    Staging,
    Production,
}

impl Runtime {
    /// Log filter used when `RUST_LOG` is unset: info and below only in
    /// development, warnings through staging, errors everywhere.
    pub fn default_log_directive(&self) -> &'static str {
        match self {
            Runtime::Development => "debug",
            Runtime::Staging => "warn",
            Runtime::Production => "error",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Runtime::Development => "development",
            Runtime::Staging => "staging",
            Runtime::Production => "production",
        }
    }
}

impl std::fmt::Display for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Runtime {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Runtime::Development),
            "staging" => Ok(Runtime::Staging),
            "production" | "prod" => Ok(Runtime::Production),
            _ => Err(format!("Unknown runtime: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Product name shown in logs and page titles
    pub app_name: String,
    pub version: String,
    pub runtime: Runtime,
    /// Location the session starts at
    pub initial_path: String,
    /// Text of the shared loading fallback
    pub loading_text: String,
    /// Viewport width (px) at and above which the inline menu bar is used
    pub mobile_breakpoint: u32,
    /// Redirect hops allowed before a navigation is treated as a loop
    pub max_redirects: usize,
    /// Analytics tracking id; page views are only reported in production
    pub analytics_id: Option<String>,
}

impl Config {
    /// Defaults overridden by `CS_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(runtime) = lookup("CS_RUNTIME") {
            config.runtime = runtime.parse().map_err(ShellError::Config)?;
        }
        if let Some(id) = lookup("CS_ANALYTICS_ID").filter(|id| !id.trim().is_empty()) {
            config.analytics_id = Some(id);
        }
        if let Some(width) = lookup("CS_MOBILE_BREAKPOINT") {
            config.mobile_breakpoint = width.trim().parse().map_err(|_| {
                ShellError::Config(format!("CS_MOBILE_BREAKPOINT is not a width: {}", width))
            })?;
        }
        if let Some(path) = lookup("CS_INITIAL_PATH") {
            config.initial_path = path;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.mobile_breakpoint == 0 {
            return Err(ShellError::Config("mobile_breakpoint must be positive".to_string()));
        }
        if self.max_redirects == 0 {
            return Err(ShellError::Config("max_redirects must be positive".to_string()));
        }
        Ok(())
    }

    pub fn analytics_enabled(&self) -> bool {
        self.runtime == Runtime::Production && self.analytics_id.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "CyberSoluce".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            runtime: Runtime::Development,
            initial_path: "/".to_string(),
            loading_text: "Loading application...".to_string(),
            mobile_breakpoint: cs_nav::DEFAULT_BREAKPOINT,
            max_redirects: 8,
            analytics_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.runtime, Runtime::Development);
        assert_eq!(config.mobile_breakpoint, 1024);
        assert!(!config.analytics_enabled());
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("CS_RUNTIME", "prod"),
            ("CS_ANALYTICS_ID", "G-TEST123"),
            ("CS_MOBILE_BREAKPOINT", "768"),
        ]))
        .unwrap();

        assert_eq!(config.runtime, Runtime::Production);
        assert_eq!(config.mobile_breakpoint, 768);
        assert!(config.analytics_enabled());
    }

    #[test]
    fn test_bad_env_values() {
        assert!(Config::from_lookup(lookup(&[("CS_RUNTIME", "qa")])).is_err());
        assert!(Config::from_lookup(lookup(&[("CS_MOBILE_BREAKPOINT", "wide")])).is_err());
        assert!(Config::from_lookup(lookup(&[("CS_MOBILE_BREAKPOINT", "0")])).is_err());
    }

    #[test]
    fn test_from_json_partial() {
        let config = Config::from_json(r#"{"runtime": "staging", "initial_path": "/dashboard"}"#)
            .unwrap();
        assert_eq!(config.runtime, Runtime::Staging);
        assert_eq!(config.initial_path, "/dashboard");
        assert_eq!(config.loading_text, "Loading application...");
    }

    #[test]
    fn test_log_directive_per_runtime() {
        assert_eq!(Runtime::Development.default_log_directive(), "debug");
        assert_eq!(Runtime::Staging.default_log_directive(), "warn");
        assert_eq!(Runtime::Production.default_log_directive(), "error");
    }
}
