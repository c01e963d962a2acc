//! Scaffolder configuration
//!
//! Loaded from several sources, later ones overriding earlier ones:
//!
//! 1. Hardcoded defaults
//! 2. `~/.config/create-c-t/config.toml` (user config, XDG)
//! 3. `./create-c-t.toml`
//! 4. Environment variables with the `CREATE_C_T_` prefix
//!
//! ```toml
//! default_project_name = "web"
//! default_package_manager = "pnpm"
//! templates_dir = "/opt/company/templates"
//! ```

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Deserializer, Serialize};

use crate::prompt::FALLBACK_PROJECT_NAME;

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "CREATE_C_T_";

/// Local config file name
pub const LOCAL_CONFIG_FILE: &str = "create-c-t.toml";

/// Scaffolder settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffolderConfig {
    /// Project name offered when none is given on the command line
    #[serde(deserialize_with = "deserialize_text")]
    pub default_project_name: String,

    /// Manager used in printed instructions when the hint is missing
    #[serde(deserialize_with = "deserialize_text")]
    pub default_package_manager: String,

    /// Extra template root searched before all others
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_path"
    )]
    pub templates_dir: Option<PathBuf>,

    /// Environment variable carrying the package manager user agent
    #[serde(deserialize_with = "deserialize_text")]
    pub user_agent_var: String,
}

/// Scalar read where text is expected
///
/// Environment values are parsed before extraction, so `2024` or `true` in
/// `CREATE_C_T_DEFAULT_PROJECT_NAME` arrive as a number or a boolean.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Bool(bool),
}

impl From<Scalar> for String {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Text(text) => text,
            Scalar::Unsigned(n) => n.to_string(),
            Scalar::Signed(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Scalar::deserialize(deserializer).map(String::from)
}

fn deserialize_optional_path<'de, D>(deserializer: D) -> Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    let scalar = Option::<Scalar>::deserialize(deserializer)?;
    Ok(scalar.map(|s| PathBuf::from(String::from(s))))
}

impl Default for ScaffolderConfig {
    fn default() -> Self {
        Self {
            default_project_name: FALLBACK_PROJECT_NAME.to_string(),
            default_package_manager: "npm".to_string(),
            templates_dir: None,
            user_agent_var: "npm_config_user_agent".to_string(),
        }
    }
}

impl ScaffolderConfig {
    /// Load configuration from the standard locations
    ///
    /// # Errors
    ///
    /// Returns an error if a config file cannot be parsed or a value has the
    /// wrong type.
    pub fn load() -> anyhow::Result<Self> {
        let mut figment = Self::defaults()?;

        let user_config = Self::recommended_path();
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }

        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            figment = figment.merge(Toml::file(&local_config));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).lowercase(true));

        let config: Self = figment.extract()?;
        tracing::debug!(?config, "loaded configuration");
        Ok(config)
    }

    /// Load configuration from a specific file, still honoring environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, cannot be parsed, or a value
    /// has the wrong type.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.is_file() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        let config = Self::defaults()?
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).lowercase(true))
            .extract()?;

        Ok(config)
    }

    /// `~/.config/create-c-t/config.toml`, or `./config.toml` without a config dir
    #[must_use]
    pub fn recommended_path() -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from("./config.toml"),
            |config_dir| config_dir.join("create-c-t").join("config.toml"),
        )
    }

    fn defaults() -> anyhow::Result<Figment> {
        Ok(Figment::new().merge(Toml::string(&toml::to_string(&Self::default())?)))
    }
}
