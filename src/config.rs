use crate::error::{BoostError, Result};
use std::sync::RwLock;

/// Environment override for the instance hostname.
pub const DOMAIN_ENV: &str = "CROSSBOOST_DOMAIN";
/// Environment override for the API access key.
pub const ACCESS_KEY_ENV: &str = "CROSSBOOST_ACCESS_KEY";

#[derive(Debug, Default)]
struct StoredSettings {
    domain: String,
    access_key: String,
}

/// Instance settings with deployment-level overrides.
///
/// Stored values are only mutated through the setters, which normalize at
/// write time; readers never normalize. Override values are fixed at
/// construction and always win over stored ones. The lock flags tell an
/// admin surface to render the fields read-only.
pub struct ConfigStore {
    stored: RwLock<StoredSettings>,
    override_domain: Option<String>,
    override_access_key: Option<String>,
}

impl ConfigStore {
    /// Store with no overrides.
    pub fn new() -> Self {
        Self {
            stored: RwLock::default(),
            override_domain: None,
            override_access_key: None,
        }
    }

    /// Store whose overrides come from `CROSSBOOST_DOMAIN` and
    /// `CROSSBOOST_ACCESS_KEY`, when set and non-empty.
    pub fn from_env() -> Self {
        Self::with_overrides(
            std::env::var(DOMAIN_ENV).ok().as_deref(),
            std::env::var(ACCESS_KEY_ENV).ok().as_deref(),
        )
    }

    /// Store with explicit override values. Overrides go through the same
    /// normalization as writes; an empty value counts as no override.
    pub fn with_overrides(domain: Option<&str>, access_key: Option<&str>) -> Self {
        Self {
            stored: RwLock::default(),
            override_domain: domain.map(normalize_domain).filter(|v| !v.is_empty()),
            override_access_key: access_key
                .map(str::to_string)
                .filter(|v| !v.is_empty()),
        }
    }

    pub fn domain(&self) -> String {
        match &self.override_domain {
            Some(v) => v.clone(),
            None => self.stored.read().unwrap().domain.clone(),
        }
    }

    pub fn access_key(&self) -> String {
        match &self.override_access_key {
            Some(v) => v.clone(),
            None => self.stored.read().unwrap().access_key.clone(),
        }
    }

    pub fn set_domain(&self, value: &str) {
        self.stored.write().unwrap().domain = normalize_domain(value);
    }

    /// The access key is an opaque secret, stored as-is.
    pub fn set_access_key(&self, value: &str) {
        self.stored.write().unwrap().access_key = value.to_string();
    }

    pub fn domain_locked(&self) -> bool {
        self.override_domain.is_some()
    }

    pub fn access_key_locked(&self) -> bool {
        self.override_access_key.is_some()
    }

    /// True when any field is overridden. A half-overridden store invites
    /// edits that silently do nothing, so the surface locks both fields.
    pub fn locked(&self) -> bool {
        self.domain_locked() || self.access_key_locked()
    }

    /// Both effective values, or the first missing one as an error.
    pub fn require(&self) -> Result<(String, String)> {
        let domain = self.domain();
        if domain.is_empty() {
            return Err(BoostError::ConfigMissing("domain"));
        }
        let access_key = self.access_key();
        if access_key.is_empty() {
            return Err(BoostError::ConfigMissing("access key"));
        }
        Ok((domain, access_key))
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize a user-entered hostname: strip the scheme and surrounding
/// slashes and whitespace. `"https://mastodon.social/"` becomes
/// `"mastodon.social"`.
pub fn normalize_domain(value: &str) -> String {
    let v = value.trim().trim_matches('/');
    let v = v
        .strip_prefix("https://")
        .or_else(|| v.strip_prefix("http://"))
        .unwrap_or(v);
    v.trim_matches('/').trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_normalize_domain() {
        assert_eq!(normalize_domain("https://mastodon.social/"), "mastodon.social");
        assert_eq!(normalize_domain("http://mastodon.social"), "mastodon.social");
        assert_eq!(normalize_domain("mastodon.social"), "mastodon.social");
        assert_eq!(normalize_domain("  https://mastodon.social/  "), "mastodon.social");
        assert_eq!(normalize_domain("/mastodon.social/"), "mastodon.social");
        assert_eq!(normalize_domain(""), "");
    }

    #[test]
    fn test_setters_normalize_at_write_time() {
        let config = ConfigStore::new();
        config.set_domain("https://mastodon.social/");
        config.set_access_key("  secret  ");

        assert_eq!(config.domain(), "mastodon.social");
        // The key is opaque, stored exactly as given.
        assert_eq!(config.access_key(), "  secret  ");
    }

    #[test]
    fn test_overrides_shadow_stored_values() {
        let config = ConfigStore::with_overrides(Some("https://fixed.example/"), None);
        config.set_domain("stored.example");
        config.set_access_key("stored-key");

        assert_eq!(config.domain(), "fixed.example");
        assert_eq!(config.access_key(), "stored-key");
    }

    #[test]
    fn test_lock_flags() {
        let config = ConfigStore::new();
        assert!(!config.locked());

        let config = ConfigStore::with_overrides(Some("fixed.example"), None);
        assert!(config.domain_locked());
        assert!(!config.access_key_locked());
        assert!(config.locked(), "either override locks the surface");

        let config = ConfigStore::with_overrides(Some("fixed.example"), Some("key"));
        assert!(config.domain_locked());
        assert!(config.access_key_locked());
        assert!(config.locked());
    }

    #[test]
    fn test_empty_override_counts_as_absent() {
        let config = ConfigStore::with_overrides(Some(""), Some(""));
        config.set_domain("stored.example");

        assert_eq!(config.domain(), "stored.example");
        assert!(!config.locked());
    }

    #[test]
    fn test_require_reports_first_missing_field() {
        let config = ConfigStore::new();
        assert!(matches!(
            config.require(),
            Err(BoostError::ConfigMissing("domain"))
        ));

        config.set_domain("mastodon.social");
        assert!(matches!(
            config.require(),
            Err(BoostError::ConfigMissing("access key"))
        ));

        config.set_access_key("ABC123");
        let (domain, key) = config.require().unwrap();
        assert_eq!(domain, "mastodon.social");
        assert_eq!(key, "ABC123");
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        std::env::set_var(DOMAIN_ENV, "https://env.example/");
        std::env::set_var(ACCESS_KEY_ENV, "env-key");

        let config = ConfigStore::from_env();
        config.set_domain("stored.example");

        assert_eq!(config.domain(), "env.example");
        assert_eq!(config.access_key(), "env-key");
        assert!(config.locked());

        std::env::remove_var(DOMAIN_ENV);
        std::env::remove_var(ACCESS_KEY_ENV);
    }

    #[test]
    #[serial]
    fn test_from_env_without_variables() {
        std::env::remove_var(DOMAIN_ENV);
        std::env::remove_var(ACCESS_KEY_ENV);

        let config = ConfigStore::from_env();
        assert!(!config.locked());
        assert_eq!(config.domain(), "");
    }
}
