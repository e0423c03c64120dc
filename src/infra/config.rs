//! Configuration loading from TOML files
//!
//! Config file is selected via:
//! 1. --config <path> command line argument
//! 2. CONFIG_FILE environment variable
//! 3. Default: config/dev.toml
//!
//! Defaults reproduce the query matrices the collection scripts have
//! always run with, so every binary works without a config file.

use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

/// A coordinate query target for AirNow
#[derive(Debug, Clone, Deserialize)]
pub struct AirNowLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
}

/// An EPA AQS monitoring site
#[derive(Debug, Clone, Deserialize)]
pub struct EpaSite {
    /// Two-digit state code
    pub state: String,
    /// Three-digit county code
    pub county: String,
    /// Four-digit site code
    pub site: String,
    pub name: String,
}

/// A named EPA parameter code (e.g. "PM2.5" -> "88101")
#[derive(Debug, Clone, Deserialize)]
pub struct EpaParameter {
    pub name: String,
    pub code: String,
}

/// A country/city query target for OpenAQ
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAqLocation {
    pub country: String,
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { data_dir: default_data_dir() }
    }
}

fn default_data_dir() -> String {
    "./data/api_data".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: default_timeout_secs() }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct AirNowConfig {
    #[serde(default = "default_airnow_base_url")]
    pub base_url: String,
    #[serde(default = "default_airnow_api_key")]
    pub api_key: String,
    /// Distance in miles to look for monitors
    #[serde(default = "default_airnow_distance")]
    pub distance_miles: u32,
    #[serde(default = "default_airnow_locations")]
    pub locations: Vec<AirNowLocation>,
}

impl Default for AirNowConfig {
    fn default() -> Self {
        Self {
            base_url: default_airnow_base_url(),
            api_key: default_airnow_api_key(),
            distance_miles: default_airnow_distance(),
            locations: default_airnow_locations(),
        }
    }
}

fn default_airnow_base_url() -> String {
    "https://www.airnowapi.org/aq/observation/latLong/current/".to_string()
}

fn default_airnow_api_key() -> String {
    "YOUR_AIRNOW_API_KEY".to_string()
}

fn default_airnow_distance() -> u32 {
    25
}

fn default_airnow_locations() -> Vec<AirNowLocation> {
    vec![
        AirNowLocation { latitude: 40.7128, longitude: -74.0060, name: "new_york".to_string() },
        AirNowLocation { latitude: 34.0522, longitude: -118.2437, name: "los_angeles".to_string() },
        AirNowLocation { latitude: 41.8781, longitude: -87.6298, name: "chicago".to_string() },
    ]
}

#[derive(Debug, Clone, Deserialize)]
pub struct EpaConfig {
    #[serde(default = "default_epa_base_url")]
    pub base_url: String,
    #[serde(default = "default_epa_email")]
    pub email: String,
    #[serde(default = "default_epa_api_key")]
    pub api_key: String,
    #[serde(default = "default_epa_sites")]
    pub sites: Vec<EpaSite>,
    #[serde(default = "default_epa_parameters")]
    pub parameters: Vec<EpaParameter>,
    /// Size of the trailing date window, in days
    #[serde(default = "default_epa_lookback_days")]
    pub lookback_days: i64,
    #[serde(default = "default_epa_delay_secs")]
    pub delay_secs: u64,
}

impl Default for EpaConfig {
    fn default() -> Self {
        Self {
            base_url: default_epa_base_url(),
            email: default_epa_email(),
            api_key: default_epa_api_key(),
            sites: default_epa_sites(),
            parameters: default_epa_parameters(),
            lookback_days: default_epa_lookback_days(),
            delay_secs: default_epa_delay_secs(),
        }
    }
}

fn default_epa_base_url() -> String {
    "https://aqs.epa.gov/data/api/sampleData/bysite".to_string()
}

fn default_epa_email() -> String {
    "your_registered_email@example.com".to_string()
}

fn default_epa_api_key() -> String {
    "YOUR_EPA_API_KEY".to_string()
}

fn default_epa_sites() -> Vec<EpaSite> {
    vec![
        EpaSite {
            state: "36".to_string(),
            county: "081".to_string(),
            site: "0124".to_string(),
            name: "Queens_NY".to_string(),
        },
        EpaSite {
            state: "06".to_string(),
            county: "037".to_string(),
            site: "1103".to_string(),
            name: "LosAngeles_CA".to_string(),
        },
        EpaSite {
            state: "48".to_string(),
            county: "201".to_string(),
            site: "1039".to_string(),
            name: "Houston_TX".to_string(),
        },
    ]
}

fn default_epa_parameters() -> Vec<EpaParameter> {
    [
        ("Ozone", "44201"),
        ("PM2.5", "88101"),
        ("PM10", "81102"),
        ("NO2", "42602"),
        ("SO2", "42401"),
        ("CO", "42101"),
    ]
    .into_iter()
    .map(|(name, code)| EpaParameter { name: name.to_string(), code: code.to_string() })
    .collect()
}

fn default_epa_lookback_days() -> i64 {
    30
}

fn default_epa_delay_secs() -> u64 {
    2
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAqConfig {
    #[serde(default = "default_openaq_base_url")]
    pub base_url: String,
    #[serde(default = "default_openaq_limit")]
    pub limit: u32,
    #[serde(default = "default_openaq_locations")]
    pub locations: Vec<OpenAqLocation>,
    #[serde(default = "default_openaq_parameters")]
    pub parameters: Vec<String>,
    #[serde(default = "default_openaq_delay_secs")]
    pub delay_secs: u64,
}

impl Default for OpenAqConfig {
    fn default() -> Self {
        Self {
            base_url: default_openaq_base_url(),
            limit: default_openaq_limit(),
            locations: default_openaq_locations(),
            parameters: default_openaq_parameters(),
            delay_secs: default_openaq_delay_secs(),
        }
    }
}

fn default_openaq_base_url() -> String {
    "https://api.openaq.org/v2/measurements".to_string()
}

fn default_openaq_limit() -> u32 {
    1000
}

fn default_openaq_locations() -> Vec<OpenAqLocation> {
    vec![
        OpenAqLocation { country: "US".to_string(), city: Some("Los Angeles".to_string()) },
        OpenAqLocation { country: "IN".to_string(), city: Some("Delhi".to_string()) },
        OpenAqLocation { country: "CN".to_string(), city: Some("Beijing".to_string()) },
        OpenAqLocation { country: "GB".to_string(), city: Some("London".to_string()) },
    ]
}

fn default_openaq_parameters() -> Vec<String> {
    ["pm25", "pm10", "no2", "o3"].into_iter().map(str::to_string).collect()
}

fn default_openaq_delay_secs() -> u64 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct WaqiConfig {
    #[serde(default = "default_waqi_base_url")]
    pub base_url: String,
    #[serde(default = "default_waqi_cities")]
    pub cities: Vec<String>,
    #[serde(default = "default_waqi_min_delay_secs")]
    pub min_delay_secs: f64,
    #[serde(default = "default_waqi_max_delay_secs")]
    pub max_delay_secs: f64,
}

impl Default for WaqiConfig {
    fn default() -> Self {
        Self {
            base_url: default_waqi_base_url(),
            cities: default_waqi_cities(),
            min_delay_secs: default_waqi_min_delay_secs(),
            max_delay_secs: default_waqi_max_delay_secs(),
        }
    }
}

fn default_waqi_base_url() -> String {
    "https://aqicn.org/city".to_string()
}

fn default_waqi_cities() -> Vec<String> {
    [
        "Beijing",
        "Delhi",
        "London",
        "Los Angeles",
        "Mexico City",
        "Mumbai",
        "Paris",
        "São Paulo",
        "Shanghai",
        "Tokyo",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

fn default_waqi_min_delay_secs() -> f64 {
    3.0
}

fn default_waqi_max_delay_secs() -> f64 {
    7.0
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub airnow: AirNowConfig,
    #[serde(default)]
    pub epa: EpaConfig,
    #[serde(default)]
    pub openaq: OpenAqConfig,
    #[serde(default)]
    pub waqi: WaqiConfig,
}

/// Main configuration struct used throughout the application
#[derive(Debug, Clone)]
pub struct Config {
    data_dir: String,
    http_timeout_secs: u64,
    airnow: AirNowConfig,
    epa: EpaConfig,
    openaq: OpenAqConfig,
    waqi: WaqiConfig,
    config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            http_timeout_secs: default_timeout_secs(),
            airnow: AirNowConfig::default(),
            epa: EpaConfig::default(),
            openaq: OpenAqConfig::default(),
            waqi: WaqiConfig::default(),
            config_file: "default".to_string(),
        }
    }
}

impl Config {
    /// Determine the config file path from the CLI value or environment
    pub fn resolve_config_path(cli_value: Option<&str>) -> String {
        if let Some(path) = cli_value {
            return path.to_string();
        }

        if let Ok(path) = env::var("CONFIG_FILE") {
            return path;
        }

        "config/dev.toml".to_string()
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let toml_config: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(Self {
            data_dir: toml_config.output.data_dir,
            http_timeout_secs: toml_config.http.timeout_secs,
            airnow: toml_config.airnow,
            epa: toml_config.epa,
            openaq: toml_config.openaq,
            waqi: toml_config.waqi,
            config_file: path.display().to_string(),
        })
    }

    /// Load configuration - tries the TOML file first, falls back to defaults
    pub fn load_from_path(path: &str) -> Self {
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: {}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Override the output directory (used by --data-dir)
    pub fn with_data_dir(mut self, data_dir: &str) -> Self {
        self.data_dir = data_dir.to_string();
        self
    }

    pub fn data_dir(&self) -> &str {
        &self.data_dir
    }

    pub fn http_timeout_secs(&self) -> u64 {
        self.http_timeout_secs
    }

    pub fn airnow(&self) -> &AirNowConfig {
        &self.airnow
    }

    pub fn epa(&self) -> &EpaConfig {
        &self.epa
    }

    pub fn openaq(&self) -> &OpenAqConfig {
        &self.openaq
    }

    pub fn waqi(&self) -> &WaqiConfig {
        &self.waqi
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data_dir(), "./data/api_data");
        assert_eq!(config.http_timeout_secs(), 10);
        assert_eq!(config.airnow().distance_miles, 25);
        assert_eq!(config.airnow().locations.len(), 3);
        assert_eq!(config.epa().sites.len(), 3);
        assert_eq!(config.epa().parameters.len(), 6);
        assert_eq!(config.epa().lookback_days, 30);
        assert_eq!(config.openaq().limit, 1000);
        assert_eq!(config.waqi().cities.len(), 10);
    }

    #[test]
    fn test_epa_parameter_codes_keep_declared_order() {
        let config = Config::default();
        let codes: Vec<&str> =
            config.epa().parameters.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, &["44201", "88101", "81102", "42602", "42401", "42101"]);
    }

    #[test]
    fn test_resolve_config_path_prefers_cli_value() {
        assert_eq!(
            Config::resolve_config_path(Some("config/prod.toml")),
            "config/prod.toml"
        );
    }

    #[test]
    fn test_with_data_dir_override() {
        let config = Config::default().with_data_dir("/tmp/aq");
        assert_eq!(config.data_dir(), "/tmp/aq");
    }
}
