//! Environment-driven settings for synthesized role catalogs.

use tracing::debug;

pub const ENV_BOOTSTRAP_SUPERUSER: &str = "AUTHID_BOOTSTRAP_SUPERUSER";
pub const ENV_INCLUDE_PREDEFINED: &str = "AUTHID_INCLUDE_PREDEFINED";

/// Name used for the bootstrap superuser when neither the environment nor the OS supplies one.
pub const DEFAULT_SUPERUSER_NAME: &str = "postgres";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Name shown for the bootstrap superuser (OID 10).
    pub bootstrap_superuser: String,
    /// List the predefined `pg_*` roles in synthesized tables.
    pub include_predefined: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { bootstrap_superuser: DEFAULT_SUPERUSER_NAME.to_string(), include_predefined: true }
    }
}

impl CatalogConfig {
    /// Read settings from the process environment. The superuser name defaults
    /// to the current OS user, matching how initdb names the bootstrap role.
    pub fn from_env() -> Self {
        let lookup = |key: &str| std::env::var(key).ok();
        let os_user = whoami::username();
        Self::from_lookup(lookup, Some(os_user))
    }

    /// Build settings from an arbitrary key lookup. Split out so tests do not touch
    /// process-wide environment state.
    pub fn from_lookup<F>(lookup: F, os_user: Option<String>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let bootstrap_superuser = lookup(ENV_BOOTSTRAP_SUPERUSER)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .or_else(|| os_user.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
            .unwrap_or_else(|| DEFAULT_SUPERUSER_NAME.to_string());
        let include_predefined = lookup(ENV_INCLUDE_PREDEFINED)
            .map(|v| parse_flag(&v))
            .unwrap_or(true);
        debug!(
            target: "authid::config",
            "catalog config: bootstrap_superuser='{}', include_predefined={}",
            bootstrap_superuser, include_predefined
        );
        Self { bootstrap_superuser, include_predefined }
    }
}

fn parse_flag(v: &str) -> bool {
    !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off")
}

/// Per-build context handed to system table builders.
#[derive(Debug, Clone, Default)]
pub struct CatalogContext {
    pub config: CatalogConfig,
}

impl CatalogContext {
    pub fn new(config: CatalogConfig) -> Self { Self { config } }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let m: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k: &str| m.get(k).cloned()
    }

    #[test]
    fn env_overrides_os_user() {
        let cfg = CatalogConfig::from_lookup(lookup_from(&[(ENV_BOOTSTRAP_SUPERUSER, "admin")]), Some("alice".into()));
        assert_eq!(cfg.bootstrap_superuser, "admin");
        assert!(cfg.include_predefined);
    }

    #[test]
    fn falls_back_to_os_user_then_default() {
        let cfg = CatalogConfig::from_lookup(lookup_from(&[]), Some("alice".into()));
        assert_eq!(cfg.bootstrap_superuser, "alice");
        let cfg = CatalogConfig::from_lookup(lookup_from(&[(ENV_BOOTSTRAP_SUPERUSER, "  ")]), Some(String::new()));
        assert_eq!(cfg.bootstrap_superuser, DEFAULT_SUPERUSER_NAME);
    }

    #[test]
    fn predefined_flag_parsing() {
        for off in ["0", "false", "No", " off "] {
            let cfg = CatalogConfig::from_lookup(lookup_from(&[(ENV_INCLUDE_PREDEFINED, off)]), None);
            assert!(!cfg.include_predefined, "{off} should disable");
        }
        let cfg = CatalogConfig::from_lookup(lookup_from(&[(ENV_INCLUDE_PREDEFINED, "yes")]), None);
        assert!(cfg.include_predefined);
    }
}
