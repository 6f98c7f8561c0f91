//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use folio_infra::{DatabaseConfig, SendGridConfig, SidecarConfig};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    /// `None` falls back to the built-in default password.
    pub admin_password: Option<String>,
    pub admin_rate_limit: AdminRateLimit,
    /// `None` when no SendGrid key and recipient are configured.
    pub mail: Option<SendGridConfig>,
    pub object_storage: SidecarConfig,
    /// Absolute site origin used in sitemap entries, without trailing slash.
    pub site_url: String,
    pub production: bool,
}

/// Request budget for `POST /api/admin/verify`, per client address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminRateLimit {
    pub max_requests: u32,
    pub window_secs: u64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database = get("DATABASE_URL").map(|url| DatabaseConfig {
            url,
            max_connections: parse_or(get("DB_MAX_CONNECTIONS"), 10),
            min_connections: parse_or(get("DB_MIN_CONNECTIONS"), 1),
        });

        let mail = match (get("SENDGRID_API_KEY"), get("CONTACT_TO_EMAIL")) {
            (Some(api_key), Some(to_email)) => Some(SendGridConfig {
                api_key,
                from_email: get("CONTACT_FROM_EMAIL").unwrap_or_else(|| to_email.clone()),
                to_email,
            }),
            (Some(_), None) => {
                tracing::warn!("SENDGRID_API_KEY set without CONTACT_TO_EMAIL, mail relay disabled");
                None
            }
            _ => None,
        };

        let production = get("RUST_ENV")
            .map(|v| v == "production" || v == "prod")
            .unwrap_or(false);

        Self {
            host: get("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(get("PORT"), 8080),
            database,
            admin_password: get("ADMIN_PASSWORD"),
            admin_rate_limit: AdminRateLimit {
                max_requests: parse_or(get("ADMIN_RATE_LIMIT_MAX_REQUESTS"), 10),
                window_secs: parse_or(get("ADMIN_RATE_LIMIT_WINDOW_SECS"), 60),
            },
            mail,
            object_storage: SidecarConfig {
                endpoint: get("OBJECT_STORAGE_SIDECAR")
                    .unwrap_or_else(|| "http://127.0.0.1:1106".to_string()),
                private_dir: get("PRIVATE_OBJECT_DIR"),
            },
            site_url: get("SITE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| "https://alexshyaka.site".to_string()),
            production,
        }
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}
