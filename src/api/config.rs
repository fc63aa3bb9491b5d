//! Server configuration: calculation settings plus the CORS policy read from
//! the deployment environment.

use crate::core::CalcSettings;

/// Environment variables that each hold one allowed front-end origin.
pub const ORIGIN_ENV_VARS: [&str; 5] = [
    "FRONTEND_URL_1",
    "FRONTEND_URL_2",
    "FRONTEND_URL_3",
    "LOCAL_HOST",
    "POSTMAN_HEADER",
];

pub const FIREBASE_PROJECT_ENV_VAR: &str = "FIREBASE_PROJECT_NAME";
pub const ALLOW_NO_ORIGIN_ENV_VAR: &str = "ALLOW_NO_ORIGIN";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorsConfig {
    /// Allowed origins in `scheme://host[:port]/` form.
    pub allowed_origins: Vec<String>,
    /// Hosting project whose `https://<project>--<channel>` preview origins are allowed.
    pub firebase_project: Option<String>,
    /// Answer requests without an `Origin` header with a wildcard.
    pub allow_no_origin: bool,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let allowed_origins = ORIGIN_ENV_VARS
            .iter()
            .filter_map(|key| lookup(key))
            .filter(|origin| !origin.is_empty())
            .collect();
        let firebase_project = lookup(FIREBASE_PROJECT_ENV_VAR).filter(|name| !name.is_empty());
        let allow_no_origin = lookup(ALLOW_NO_ORIGIN_ENV_VAR)
            .map(|value| value == "true")
            .unwrap_or(true);

        Self {
            allowed_origins,
            firebase_project,
            allow_no_origin,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerConfig {
    pub settings: CalcSettings,
    pub cors: CorsConfig,
}
