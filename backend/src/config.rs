//! Runtime configuration read from the process environment.
//!
//! Every setting has a default so the server starts with no environment at
//! all. Malformed values are logged and replaced by the default.

use log::warn;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const LOCAL_BACKEND_URL: &str = "http://localhost:8080";
pub const DEPLOYED_BACKEND_URL: &str = "https://finnza-backend-2l9v.onrender.com";

const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:4200";
const DEFAULT_FILTER_DEBOUNCE_MS: u64 = 300;
const DEFAULT_NOTIFICATION_TTL_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Upstream REST backend the host UI should talk to
    pub backend_base_url: String,
    pub allowed_origin: String,
    /// Seed for the projected-balance running sum
    pub opening_balance: f64,
    pub filter_debounce: Duration,
    pub notification_ttl: Duration,
    pub seed_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            backend_base_url: LOCAL_BACKEND_URL.to_string(),
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
            opening_balance: 0.0,
            filter_debounce: Duration::from_millis(DEFAULT_FILTER_DEBOUNCE_MS),
            notification_ttl: Duration::from_secs(DEFAULT_NOTIFICATION_TTL_SECS),
            seed_file: None,
        }
    }
}

impl AppConfig {
    /// Build the configuration from the real process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let hostname = lookup("FINNZA_HOSTNAME").unwrap_or_default();

        Self {
            bind_addr: parse_or("FINNZA_BIND_ADDR", lookup("FINNZA_BIND_ADDR"), defaults.bind_addr),
            backend_base_url: resolve_backend_url(lookup("BACKEND_API_URL"), &hostname),
            allowed_origin: lookup("FINNZA_ALLOWED_ORIGIN")
                .filter(|origin| !origin.trim().is_empty())
                .unwrap_or(defaults.allowed_origin),
            opening_balance: parse_or(
                "FINNZA_OPENING_BALANCE",
                lookup("FINNZA_OPENING_BALANCE"),
                defaults.opening_balance,
            ),
            filter_debounce: Duration::from_millis(parse_or(
                "FINNZA_FILTER_DEBOUNCE_MS",
                lookup("FINNZA_FILTER_DEBOUNCE_MS"),
                DEFAULT_FILTER_DEBOUNCE_MS,
            )),
            notification_ttl: Duration::from_secs(parse_or(
                "FINNZA_NOTIFICATION_TTL_SECS",
                lookup("FINNZA_NOTIFICATION_TTL_SECS"),
                DEFAULT_NOTIFICATION_TTL_SECS,
            )),
            seed_file: lookup("FINNZA_SEED_FILE")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}

/// Pick the upstream backend URL: an explicit override wins, otherwise local
/// hostnames get the development URL and anything else the deployed one.
pub fn resolve_backend_url(override_url: Option<String>, hostname: &str) -> String {
    if let Some(url) = override_url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
        return url.trim_end_matches('/').to_string();
    }

    if is_local_hostname(hostname) {
        LOCAL_BACKEND_URL.to_string()
    } else {
        DEPLOYED_BACKEND_URL.to_string()
    }
}

pub fn is_local_hostname(hostname: &str) -> bool {
    matches!(hostname.trim(), "" | "localhost" | "127.0.0.1")
}

fn parse_or<T: FromStr>(name: &str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(value) => match value.trim().parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!("⚙️ CONFIG: Ignoring malformed {}={:?}, using default", name, value);
                default
            }
        },
        None => default,
    }
}
