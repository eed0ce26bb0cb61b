use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::filters::DEFAULT_BLOCKED_TERMS;
use crate::core::registration::DEFAULT_STUDENT_EMAIL_DOMAIN;
use crate::core::tags::DEFAULT_TAGS;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub collection: CollectionSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub recommendation: RecommendationSettings,
    #[serde(default)]
    pub moderation: ModerationSettings,
    #[serde(default)]
    pub vocabulary: VocabularySettings,
    #[serde(default)]
    pub registration: RegistrationSettings,
    #[serde(default)]
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

/// Which document store backs the service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Appwrite,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    #[serde(default)]
    pub backend: StoreBackend,
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub database_id: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// JSON seed file for the memory backend
    pub seed_path: Option<String>,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            endpoint: String::new(),
            api_key: String::new(),
            project_id: String::new(),
            database_id: String::new(),
            page_size: default_page_size(),
            timeout_secs: default_timeout_secs(),
            seed_path: None,
        }
    }
}

fn default_page_size() -> usize { 100 }
fn default_timeout_secs() -> u64 { 10 }

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSettings {
    #[serde(default = "default_clubs_collection")]
    pub clubs: String,
    #[serde(default = "default_events_collection")]
    pub events: String,
    #[serde(default = "default_users_collection")]
    pub users: String,
}

impl Default for CollectionSettings {
    fn default() -> Self {
        Self {
            clubs: default_clubs_collection(),
            events: default_events_collection(),
            users: default_users_collection(),
        }
    }
}

fn default_clubs_collection() -> String { "clubs".to_string() }
fn default_events_collection() -> String { "events".to_string() }
fn default_users_collection() -> String { "users".to_string() }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    /// L2 cache; only the in-process tier is used when unset
    pub redis_url: Option<String>,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationSettings {
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
    #[serde(default)]
    pub weights: WeightsConfig,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            weights: WeightsConfig::default(),
        }
    }
}

fn default_limit() -> usize { 5 }
fn default_max_limit() -> usize { 50 }

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_tag_overlap_weight")]
    pub tag_overlap: f64,
    #[serde(default = "default_popularity_weight")]
    pub popularity: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            tag_overlap: default_tag_overlap_weight(),
            popularity: default_popularity_weight(),
        }
    }
}

fn default_tag_overlap_weight() -> f64 { 3.0 }
fn default_popularity_weight() -> f64 { 0.1 }

#[derive(Debug, Clone, Deserialize)]
pub struct ModerationSettings {
    #[serde(default = "default_blocked_terms")]
    pub blocked_terms: Vec<String>,
}

impl Default for ModerationSettings {
    fn default() -> Self {
        Self {
            blocked_terms: default_blocked_terms(),
        }
    }
}

fn default_blocked_terms() -> Vec<String> {
    DEFAULT_BLOCKED_TERMS.iter().map(|t| t.to_string()).collect()
}

#[derive(Debug, Clone, Deserialize)]
pub struct VocabularySettings {
    #[serde(default = "default_tags")]
    pub tags: Vec<String>,
}

impl Default for VocabularySettings {
    fn default() -> Self {
        Self { tags: default_tags() }
    }
}

fn default_tags() -> Vec<String> {
    DEFAULT_TAGS.iter().map(|t| t.to_string()).collect()
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationSettings {
    #[serde(default = "default_student_email_domain")]
    pub student_email_domain: String,
    #[serde(default)]
    pub approved_club_emails: Vec<String>,
}

impl Default for RegistrationSettings {
    fn default() -> Self {
        Self {
            student_email_domain: default_student_email_domain(),
            approved_club_emails: Vec::new(),
        }
    }
}

fn default_student_email_domain() -> String { DEFAULT_STUDENT_EMAIL_DOMAIN.to_string() }

/// Bearer token verification. Set `jwt_secret` for HS256 or
/// `public_key_pem` for RS256.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: Option<String>,
    pub public_key_pem: Option<String>,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration files (config/default.toml, then config/local.toml)
    /// 3. Environment variables (prefixed with CLUBFEED)
    /// 4. `STORE_API_KEY` and `JWT_SECRET`
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CLUBFEED__SERVER__PORT -> server.port
            .add_source(environment());

        apply_secret_overrides(builder)?.build()?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment());

        apply_secret_overrides(builder)?.build()?.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("CLUBFEED")
        .prefix_separator("__")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("moderation.blocked_terms")
        .with_list_parse_key("vocabulary.tags")
        .with_list_parse_key("registration.approved_club_emails")
        .try_parsing(true)
}

/// Plain secret variables win over everything else
fn apply_secret_overrides(
    mut builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    if let Ok(api_key) = std::env::var("STORE_API_KEY") {
        builder = builder.set_override("store.api_key", api_key)?;
    }
    if let Ok(secret) = std::env::var("JWT_SECRET") {
        builder = builder.set_override("auth.jwt_secret", secret)?;
    }
    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_default_weights() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.tag_overlap, 3.0);
        assert_eq!(weights.popularity, 0.1);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let settings: Settings = Config::builder().build().unwrap().try_deserialize().unwrap();

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.store.backend, StoreBackend::Appwrite);
        assert_eq!(settings.collection.users, "users");
        assert_eq!(settings.recommendation.default_limit, 5);
        assert_eq!(settings.moderation.blocked_terms, vec!["test", "members only"]);
        assert_eq!(settings.registration.student_email_domain, "@ucsc.edu");
        assert!(settings.cache.redis_url.is_none());
        assert!(!settings.vocabulary.tags.is_empty());
    }

    #[test]
    fn test_toml_overrides() {
        let toml = r#"
            [store]
            backend = "memory"
            seed_path = "data/seed.json"

            [moderation]
            blocked_terms = ["draft"]

            [recommendation]
            max_limit = 20
        "#;

        let settings: Settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.store.backend, StoreBackend::Memory);
        assert_eq!(settings.store.seed_path.as_deref(), Some("data/seed.json"));
        assert_eq!(settings.moderation.blocked_terms, vec!["draft"]);
        assert_eq!(settings.recommendation.max_limit, 20);
        assert_eq!(settings.recommendation.default_limit, 5);
    }
}
