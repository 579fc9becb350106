use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tracing: TracingConfig,
    pub server: ServerConfig,
    #[serde(default)]
    pub pages: PagesConfig,
    #[serde(default)]
    pub filtering: FilteringConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TracingConfig {
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

/// Settings for the generic page views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagesConfig {
    /// Template every generic page extends (default: `base.html`)
    #[serde(default = "default_base_template")]
    pub base_template: String,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            base_template: default_base_template(),
        }
    }
}

/// Settings for query-string filter validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilteringConfig {
    /// Parameter names exempt from lookup validation, typically
    /// pagination and formatting controls.
    #[serde(default = "default_skip_params")]
    pub skip_params: Vec<String>,
}

impl Default for FilteringConfig {
    fn default() -> Self {
        Self {
            skip_params: default_skip_params(),
        }
    }
}

/// Settings consulted when a group gate denies a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Where to redirect denied requests. No value means denials get a
    /// plain 403 response instead of a redirect.
    #[serde(default)]
    pub login_url: Option<String>,
    /// Query parameter carrying the original path on the redirect
    /// (default: `next`)
    #[serde(default = "default_redirect_field")]
    pub redirect_field: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_url: None,
            redirect_field: default_redirect_field(),
        }
    }
}

fn default_base_template() -> String {
    "base.html".to_string()
}

fn default_skip_params() -> Vec<String> {
    ["offset", "limit", "format", "fields", "omit", "expand"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_redirect_field() -> String {
    "next".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filtering_defaults_cover_pagination_params() {
        let config = FilteringConfig::default();
        for param in ["offset", "limit", "format", "fields", "omit", "expand"] {
            assert!(config.skip_params.iter().any(|p| p == param));
        }
    }

    #[test]
    fn test_auth_config_defaults_to_no_redirect() {
        let config = AuthConfig::default();
        assert!(config.login_url.is_none());
        assert_eq!(config.redirect_field, "next");
    }

    #[test]
    fn test_sections_fall_back_to_defaults_when_omitted() {
        let config: Config = serde_json::from_str(r#"{"server": {"port": 3000}}"#)
            .expect("Failed to deserialize minimal config");
        assert_eq!(config.pages.base_template, "base.html");
        assert!(!config.filtering.skip_params.is_empty());
    }
}
