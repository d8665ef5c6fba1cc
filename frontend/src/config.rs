use tracing::Level;

/// Delay before the global error handler sends an expired session to login
pub const UNAUTHORIZED_REDIRECT_MS: u32 = 2000;
/// Toasts close themselves after this long
pub const TOAST_DURATION_MS: u32 = 5000;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// API origin, without a trailing slash
    pub api_url: String,
    pub log_level: Level,
}

impl AppConfig {
    /// Values are baked in at build time; there is no process environment in the browser.
    pub fn from_env() -> Self {
        Self {
            api_url: option_env!("SMART_AGENDA_API_URL")
                .unwrap_or("http://localhost:3333")
                .trim_end_matches('/')
                .to_string(),
            log_level: option_env!("SMART_AGENDA_LOG")
                .unwrap_or("info")
                .parse()
                .unwrap_or(Level::INFO),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_have_no_trailing_slash() {
        let config = AppConfig::from_env();
        assert!(!config.api_url.ends_with('/'));
        assert!(config.api_url.starts_with("http"));
    }
}
