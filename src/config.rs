use crate::fonts::{FontRequest, FontRole, FontSettings, DEFAULT_FONT_TIMEOUT};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub templates_dir: PathBuf,
    pub session_ttl: Duration,
    pub fonts: Vec<FontRequest>,
    pub font_settings: FontSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5080,
            templates_dir: PathBuf::from("templates"),
            session_ttl: Duration::from_secs(1800),
            fonts: crate::fonts::default_requests(),
            font_settings: FontSettings::default(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        dotenvy::dotenv().ok();
        let defaults = Config::default();

        let host = env_or("HOST", &defaults.host);
        let port: u16 = env_or("PORT", "5080").parse().unwrap_or(defaults.port);

        let templates_dir = std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(env_or("TEMPLATES_DIR", "templates"));

        let session_ttl = env_or("SESSION_TTL_SECS", "1800")
            .parse()
            .map(Duration::from_secs)
            .unwrap_or(defaults.session_ttl);

        let timeout = env_or("FONT_TIMEOUT_SECS", "5")
            .parse()
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_FONT_TIMEOUT);
        let load_system_fonts = env_or("LOAD_SYSTEM_FONTS", "true")
            .parse()
            .unwrap_or(true);
        let font_dirs = env_opt("FONT_DIRS")
            .map(|dirs| std::env::split_paths(&dirs).collect())
            .unwrap_or_default();

        let fonts = defaults
            .fonts
            .into_iter()
            .map(|request| {
                let prefix = match request.role {
                    FontRole::Sans => "FONT_SANS",
                    FontRole::Serif => "FONT_SERIF",
                };
                FontRequest {
                    family: env_opt(&format!("{}_FAMILY", prefix)).unwrap_or(request.family),
                    url: env_opt(&format!("{}_URL", prefix)),
                    role: request.role,
                }
            })
            .collect();

        if timeout.is_zero() {
            return Err("FONT_TIMEOUT_SECS must be at least 1".into());
        }

        Ok(Self {
            host,
            port,
            templates_dir,
            session_ttl,
            fonts,
            font_settings: FontSettings {
                timeout,
                load_system_fonts,
                font_dirs,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.port, 5080);
        assert_eq!(config.session_ttl, Duration::from_secs(1800));
        assert_eq!(config.font_settings.timeout, Duration::from_secs(5));
        assert!(config.font_settings.load_system_fonts);
        assert_eq!(config.fonts.len(), 2);
        assert!(config.fonts.iter().all(|f| f.url.is_none()));
    }
}
