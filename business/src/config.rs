use clinidesk_states::State;
use std::any::Any;
use ustr::Ustr;

/// Deployment configuration for the console.
///
/// The base URL is selected at compile time through the `env_*` cargo
/// features; tests override it with [`BusinessConfig::new`] pointing at a
/// mock server. On wasm the base is empty so every request stays
/// same-origin.
#[derive(Debug, Clone)]
pub struct BusinessConfig {
    pub api_base_url: String,
}

impl BusinessConfig {
    pub fn new(base_url: String) -> Self {
        Self {
            api_base_url: base_url,
        }
    }

    /// Root of the admin dashboard JSON API.
    pub fn dashboard_url(&self) -> Ustr {
        if self.api_base_url.is_empty() {
            Ustr::from("/admin-dashboard")
        } else {
            Ustr::from(&format!("{}/admin-dashboard", self.api_base_url))
        }
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            api_base_url: if cfg!(target_arch = "wasm32") {
                String::new()
            } else if cfg!(feature = "env_test") {
                "https://clinidesk-test.sanvicente.health".to_owned()
            } else if cfg!(feature = "env_test_internal") {
                "https://clinidesk-test-internal.sanvicente.health".to_owned()
            } else if cfg!(feature = "env_pr") {
                "https://clinidesk-pr.sanvicente.health".to_owned()
            } else if cfg!(feature = "env_internal") {
                "https://clinidesk-internal.sanvicente.health".to_owned()
            } else if cfg!(feature = "env_nightly") {
                "https://clinidesk-nightly.sanvicente.health".to_owned()
            } else {
                "https://clinidesk.sanvicente.health".to_owned()
            },
        }
    }
}

impl State for BusinessConfig {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_url_appends_path() {
        let config = BusinessConfig::new("https://example.com".to_owned());
        assert_eq!(
            config.dashboard_url(),
            Ustr::from("https://example.com/admin-dashboard")
        );
    }

    #[test]
    fn empty_base_stays_relative() {
        let config = BusinessConfig::new(String::new());
        assert_eq!(config.dashboard_url(), Ustr::from("/admin-dashboard"));
    }

    #[test]
    fn default_base_matches_build_environment() {
        let config = BusinessConfig::default();

        if cfg!(target_arch = "wasm32") {
            assert_eq!(config.api_base_url, "");
        } else if cfg!(feature = "env_test") {
            assert_eq!(
                config.api_base_url,
                "https://clinidesk-test.sanvicente.health"
            );
        } else if cfg!(feature = "env_nightly") {
            assert_eq!(
                config.api_base_url,
                "https://clinidesk-nightly.sanvicente.health"
            );
        } else if cfg!(any(feature = "env_pr", feature = "env_internal", feature = "env_test_internal")) {
            assert!(config.api_base_url.starts_with("https://clinidesk-"));
        } else {
            assert_eq!(config.api_base_url, "https://clinidesk.sanvicente.health");
        }
    }
}
