use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::{MatchThresholds, PillarWeights};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub appwrite: AppwriteSettings,
    pub collection: CollectionSettings,
    pub security: SecuritySettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppwriteSettings {
    pub endpoint: String,
    pub api_key: String,
    pub project_id: String,
    pub database_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSettings {
    pub groups: String,
    pub users: String,
    pub questionnaire_responses: String,
    pub matches: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecuritySettings {
    /// Bearer token required on POST /matches/run
    pub admin_secret: String,
}

/// Matching thresholds — operator-tunable, never inlined in the algorithm
#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_trio_min_score")]
    pub trio_min_score: f64,
    #[serde(default = "default_trio_strong_pair_score")]
    pub trio_strong_pair_score: f64,
    #[serde(default = "default_availability_gap_hours")]
    pub availability_gap_hours: f64,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            trio_min_score: default_trio_min_score(),
            trio_strong_pair_score: default_trio_strong_pair_score(),
            availability_gap_hours: default_availability_gap_hours(),
        }
    }
}

impl MatchingSettings {
    pub fn thresholds(&self) -> MatchThresholds {
        MatchThresholds {
            trio_min_score: self.trio_min_score,
            trio_strong_pair_score: self.trio_strong_pair_score,
            availability_gap_hours: self.availability_gap_hours,
        }
    }
}

fn default_trio_min_score() -> f64 { 70.0 }
fn default_trio_strong_pair_score() -> f64 { 65.0 }
fn default_availability_gap_hours() -> f64 { 10.0 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

/// Pillar weights. Must sum to 1.0; validated at load time.
#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_skills_weight")]
    pub skills: f64,
    #[serde(default = "default_availability_weight")]
    pub availability: f64,
    #[serde(default = "default_work_style_weight")]
    pub work_style: f64,
    #[serde(default = "default_motivation_weight")]
    pub motivation: f64,
    #[serde(default = "default_experience_weight")]
    pub experience: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            skills: default_skills_weight(),
            availability: default_availability_weight(),
            work_style: default_work_style_weight(),
            motivation: default_motivation_weight(),
            experience: default_experience_weight(),
        }
    }
}

impl WeightsConfig {
    pub fn weights(&self) -> PillarWeights {
        PillarWeights {
            skills: self.skills,
            availability: self.availability,
            work_style: self.work_style,
            motivation: self.motivation,
            experience: self.experience,
        }
    }

    fn sum(&self) -> f64 {
        self.skills + self.availability + self.work_style + self.motivation + self.experience
    }
}

fn default_skills_weight() -> f64 { 0.35 }
fn default_availability_weight() -> f64 { 0.25 }
fn default_work_style_weight() -> f64 { 0.20 }
fn default_motivation_weight() -> f64 { 0.15 }
fn default_experience_weight() -> f64 { 0.05 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with SPROUT_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with SPROUT_)
            // e.g., SPROUT_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("SPROUT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        let settings: Self = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("SPROUT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Self = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let sum = self.scoring.weights.sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(ConfigError::Message(format!(
                "scoring.weights must sum to 1.0, got {}",
                sum
            )));
        }
        Ok(())
    }
}

/// Honor plain environment variables the deployment platform sets directly,
/// without the SPROUT_ prefix
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    // ADMIN_SECRET takes precedence over any file value
    if let Ok(secret) = env::var("ADMIN_SECRET") {
        builder = builder.set_override("security.admin_secret", secret)?;
    }
    if let Ok(endpoint) = env::var("APPWRITE_ENDPOINT") {
        builder = builder.set_override("appwrite.endpoint", endpoint)?;
    }
    if let Ok(api_key) = env::var("APPWRITE_API_KEY") {
        builder = builder.set_override("appwrite.api_key", api_key)?;
    }

    builder.build()
}
