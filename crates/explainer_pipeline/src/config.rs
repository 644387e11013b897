//! Layered TOML configuration.
//!
//! Sources, later overriding earlier:
//! 1. Bundled defaults (`explainer.toml` shipped with the crate)
//! 2. `~/.config/explainer/explainer.toml`
//! 3. `./explainer.toml`
//!
//! [`ExplainerConfig::from_file`] replaces 2 and 3 with one explicit file.

use crate::{PromptTemplate, RequestOptions};
use config::{Config, ConfigBuilder, File, FileFormat, builder::DefaultState};
use derive_getters::Getters;
use explainer_error::{ConfigError, ExplainerError, ExplainerResult};
use explainer_render::RenderSettings;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../explainer.toml");

/// Text-generation provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct ModelSettings {
    /// Provider name used in logs
    provider: String,
    /// Model identifier
    model: String,
    /// Chat completions URL
    base_url: String,
    /// Environment variable holding the API key
    api_key_env: String,
    /// Sampling temperature
    temperature: Option<f32>,
    /// Completion token limit
    max_tokens: Option<u32>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            provider: "groq".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            base_url: "https://api.groq.com/openai/v1/chat/completions".to_string(),
            api_key_env: "GROQ_API_KEY".to_string(),
            temperature: None,
            max_tokens: None,
        }
    }
}

/// Retry budget and timeouts for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct PipelineSettings {
    /// Correction requests allowed per run
    max_corrections: u32,
    /// Limit on each text-generation request, in seconds
    llm_timeout_secs: Option<u64>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            max_corrections: 3,
            llm_timeout_secs: None,
        }
    }
}

/// The three instructional templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct TemplateSet {
    /// Storyboard planning
    plan: PromptTemplate,
    /// Code generation
    code: PromptTemplate,
    /// Error correction
    correction: PromptTemplate,
}

impl TemplateSet {
    /// Bundle the three templates.
    pub fn new(plan: PromptTemplate, code: PromptTemplate, correction: PromptTemplate) -> Self {
        Self {
            plan,
            code,
            correction,
        }
    }

    /// Check each template references the placeholders its requester fills.
    ///
    /// # Errors
    ///
    /// Returns the first template problem found.
    pub fn validate(&self) -> ExplainerResult<()> {
        self.plan.validate("plan", &["topic"])?;
        self.code.validate("code", &["plan", "identifier"])?;
        self.correction.validate("correction", &["code", "error"])?;
        Ok(())
    }
}

/// Complete Explainer configuration.
///
/// # Example
///
/// ```
/// use explainer_pipeline::ExplainerConfig;
///
/// let config = ExplainerConfig::bundled().unwrap();
/// assert_eq!(*config.pipeline().max_corrections(), 3);
/// assert_eq!(config.model().api_key_env(), "GROQ_API_KEY");
/// assert!(config.templates().plan().user().contains("{topic}"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct ExplainerConfig {
    /// Provider settings
    #[serde(default)]
    model: ModelSettings,
    /// Renderer invocation
    #[serde(default)]
    renderer: RenderSettings,
    /// Retry budget and timeouts
    #[serde(default)]
    pipeline: PipelineSettings,
    /// Instructional templates
    templates: TemplateSet,
}

impl ExplainerConfig {
    /// Bundled defaults only.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled file fails to parse or validate.
    pub fn bundled() -> ExplainerResult<Self> {
        Self::build(bundled_source())
    }

    /// Load configuration with precedence: current dir > home dir > bundled.
    ///
    /// User files are optional and silently skipped if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file fails to parse or the merged
    /// configuration is invalid.
    #[instrument]
    pub fn load() -> ExplainerResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder = bundled_source();
        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/explainer/explainer.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }
        builder = builder.add_source(File::with_name("explainer").required(false));

        Self::build(builder)
    }

    /// Load bundled defaults overridden by one explicit file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, fails to parse, or the merged
    /// configuration is invalid.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> ExplainerResult<Self> {
        debug!("Loading configuration from file");
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::new(format!(
                "Configuration file not found: {}",
                path.display()
            ))
            .into());
        }
        Self::build(bundled_source().add_source(File::from(path).format(FileFormat::Toml)))
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> ExplainerResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                ExplainerError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                ExplainerError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;
        config.templates.validate()?;
        Ok(config)
    }

    /// Same configuration with a different correction budget.
    pub fn with_max_corrections(mut self, max_corrections: u32) -> Self {
        self.pipeline.max_corrections = max_corrections;
        self
    }

    /// Limit on each text-generation request.
    pub fn llm_timeout(&self) -> Option<Duration> {
        self.pipeline.llm_timeout_secs.map(Duration::from_secs)
    }

    /// Per-request options derived from the model and pipeline settings.
    pub fn request_options(&self) -> RequestOptions {
        RequestOptions::default()
            .with_temperature(self.model.temperature)
            .with_max_tokens(self.model.max_tokens)
            .with_timeout(self.llm_timeout())
    }
}

fn bundled_source() -> ConfigBuilder<DefaultState> {
    Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
}
