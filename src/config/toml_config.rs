use crate::domain::ports::PlacesConfig;
use crate::utils::error::{ActionError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub search: SearchConfig,
    pub geocoder: GeocoderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub endpoint: String,
    /// Usually "${FOURSQUARE_API_KEY}" so the key stays out of the file.
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderConfig {
    pub endpoint: String,
    pub user_agent: Option<String>,
    pub reverse_min_interval_ms: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ActionError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ActionError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${FOURSQUARE_API_KEY})
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_url("search.endpoint", &self.search.endpoint)?;
        validate_url("geocoder.endpoint", &self.geocoder.endpoint)?;
        validate_non_empty_string("search.api_key", &self.search.api_key)?;

        // A leftover ${VAR} means the environment variable was never set.
        if self.search.api_key.starts_with("${") {
            return Err(ActionError::MissingConfigError {
                field: "search.api_key".to_string(),
            });
        }

        if let Some(interval) = self.geocoder.reverse_min_interval_ms {
            validate_range("geocoder.reverse_min_interval_ms", interval, 100, 60_000)?;
        }

        Ok(())
    }
}

impl PlacesConfig for TomlConfig {
    fn search_endpoint(&self) -> &str {
        &self.search.endpoint
    }

    fn api_key(&self) -> &str {
        &self.search.api_key
    }

    fn geocoder_endpoint(&self) -> &str {
        &self.geocoder.endpoint
    }

    fn geocoder_user_agent(&self) -> &str {
        self.geocoder
            .user_agent
            .as_deref()
            .unwrap_or(crate::adapters::nominatim::DEFAULT_USER_AGENT)
    }

    fn reverse_min_interval(&self) -> Duration {
        self.geocoder
            .reverse_min_interval_ms
            .map(Duration::from_millis)
            .unwrap_or(crate::adapters::nominatim::DEFAULT_REVERSE_MIN_INTERVAL)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
