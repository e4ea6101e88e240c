use sanpo_ors::{ORS_DEFAULT_BASE_URL, OrsClientParams};
use sanpo_store::StoreClientParams;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_key: String,
    pub ors_api_key: String,
    pub ors_base_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let supabase_url = require("SUPABASE_URL")?;
        // the service key bypasses row level security, the anon key is enough for public routes
        let supabase_key = get("SUPABASE_SERVICE_KEY")
            .or_else(|| get("SUPABASE_KEY"))
            .ok_or(ConfigError::Missing("SUPABASE_SERVICE_KEY"))?;
        let ors_api_key = require("ORS_API_KEY")?;
        let ors_base_url = get("ORS_BASE_URL").unwrap_or_else(|| ORS_DEFAULT_BASE_URL.to_string());

        Ok(Self {
            supabase_url,
            supabase_key,
            ors_api_key,
            ors_base_url,
        })
    }

    pub fn store_params(&self) -> StoreClientParams {
        StoreClientParams {
            base_url: self.supabase_url.clone(),
            api_key: self.supabase_key.clone(),
        }
    }

    pub fn ors_params(&self) -> OrsClientParams {
        OrsClientParams {
            base_url: self.ors_base_url.clone(),
            api_key: self.ors_api_key.clone(),
        }
    }
}
