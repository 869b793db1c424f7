pub mod toml_config;

pub use toml_config::TomlConfig;

use crate::domain::ports::PlacesConfig;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_url, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "places-actions")]
#[command(about = "Find restaurants and coffee houses around an address")]
pub struct CliConfig {
    /// Address tokens, repeatable: --address "221B Baker Street" --address London
    #[arg(long = "address", required = true)]
    pub address: Vec<String>,

    /// Search radius in kilometers, numeric or spelled out ("fifty")
    #[arg(long, default_value = "ten")]
    pub radius: String,

    /// restaurants | coffee houses | both restaurants and coffee houses
    #[arg(long, default_value = "both restaurants and coffee houses")]
    pub place_type: String,

    /// Load search/geocoder settings from a TOML file instead of flags
    #[arg(long)]
    pub config: Option<String>,

    // Never serialized back out, so the key stays out of config dumps.
    #[arg(long, env = "FOURSQUARE_API_KEY", default_value = "", hide_env_values = true)]
    #[serde(skip)]
    pub api_key: String,

    #[arg(long, default_value = "https://api.foursquare.com/v3/places/search")]
    pub search_endpoint: String,

    #[arg(long, default_value = "https://nominatim.openstreetmap.org")]
    pub geocoder_endpoint: String,

    #[arg(long, default_value = "places-actions")]
    pub geocoder_user_agent: String,

    /// Minimum spacing between reverse-geocode calls
    #[arg(long, default_value = "100")]
    pub reverse_min_interval_ms: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl PlacesConfig for CliConfig {
    fn search_endpoint(&self) -> &str {
        &self.search_endpoint
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn geocoder_endpoint(&self) -> &str {
        &self.geocoder_endpoint
    }

    fn geocoder_user_agent(&self) -> &str {
        &self.geocoder_user_agent
    }

    fn reverse_min_interval(&self) -> Duration {
        Duration::from_millis(self.reverse_min_interval_ms)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("search_endpoint", &self.search_endpoint)?;
        validate_url("geocoder_endpoint", &self.geocoder_endpoint)?;
        validate_non_empty_string("api_key", &self.api_key)?;
        validate_non_empty_string("geocoder_user_agent", &self.geocoder_user_agent)?;
        // The provider expects at least 100 ms between reverse calls.
        validate_range(
            "reverse_min_interval_ms",
            self.reverse_min_interval_ms,
            100,
            60_000,
        )?;
        Ok(())
    }
}
