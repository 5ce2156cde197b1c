// Application settings
// Loaded from ~/.config/smilefetch/settings.toml (or --config)

use serde::{Deserialize, Serialize};
use smilefetch_core::PercentEncoding;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const DEFAULT_API_BASE: &str = "https://pubchem.ncbi.nlm.nih.gov/rest/pug";
pub const DEFAULT_QUERY_URL: &str = "https://pubchem.ncbi.nlm.nih.gov/#query=";
pub const DEFAULT_OUTPUT_PREFIX: &str = "processed_";

/// Remote lookup settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupSettings {
    /// PUG REST root, without the entity kind
    pub api_base: String,

    /// Web search link prefix; the encoded name is appended
    pub query_url: String,

    /// How names are escaped in request paths and query links
    pub percent_encoding: PercentEncoding,

    /// Request timeout in seconds. None = transport default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            query_url: DEFAULT_QUERY_URL.to_string(),
            percent_encoding: PercentEncoding::default(),
            timeout_secs: None,
        }
    }
}

/// Status cell background colors, as RRGGBB hex
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FillSettings {
    pub compound_found: String,
    pub substance_found: String,
    pub not_found: String,
}

impl Default for FillSettings {
    fn default() -> Self {
        Self {
            compound_found: "92D050".to_string(),
            substance_found: "FFC000".to_string(),
            not_found: "FF3300".to_string(),
        }
    }
}

impl FillSettings {
    /// Parsed colors in (compound found, substance, not found) order.
    pub fn rgb(&self) -> Result<(u32, u32, u32), ConfigError> {
        Ok((
            parse_hex_color("compound_found", &self.compound_found)?,
            parse_hex_color("substance_found", &self.substance_found)?,
            parse_hex_color("not_found", &self.not_found)?,
        ))
    }
}

/// Report output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Prepended to the input file name to form the output file name
    pub output_prefix: String,

    pub fill: FillSettings,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
            fill: FillSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub lookup: LookupSettings,
    pub report: ReportSettings,
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("smilefetch");
        config_dir.join("settings.toml")
    }

    /// Load settings from the default location. A missing file is not an
    /// error: defaults are used.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load and validate settings from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let settings: Settings =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_http_url("lookup.api_base", &self.lookup.api_base)?;
        require_http_url("lookup.query_url", &self.lookup.query_url)?;

        if self.lookup.timeout_secs == Some(0) {
            return Err(ConfigError::Invalid(
                "lookup.timeout_secs must be greater than 0".into(),
            ));
        }

        let prefix = &self.report.output_prefix;
        if prefix.is_empty() {
            // An empty prefix would overwrite the input file.
            return Err(ConfigError::Invalid("report.output_prefix must not be empty".into()));
        }
        if prefix.contains('/') || prefix.contains('\\') {
            return Err(ConfigError::Invalid(format!(
                "report.output_prefix must be a plain file name prefix, got '{prefix}'"
            )));
        }

        self.report.fill.rgb()?;
        Ok(())
    }
}

fn require_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{field} must start with http:// or https://, got '{value}'"
        )))
    }
}

/// Parse `RRGGBB` or `#RRGGBB` into 0xRRGGBB.
fn parse_hex_color(field: &str, value: &str) -> Result<u32, ConfigError> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConfigError::Invalid(format!(
            "report.fill.{field} must be a 6-digit hex color, got '{value}'"
        )));
    }
    u32::from_str_radix(hex, 16)
        .map_err(|e| ConfigError::Invalid(format!("report.fill.{field}: {e}")))
}
