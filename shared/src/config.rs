//! 运行时配置 (Client configuration)
//!
//! 浏览器包在运行时没有环境变量，配置在构建期通过 `option_env!` 注入后传入这里；
//! 未设置或为空的值回退到默认值。

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub log_level: LogLevel,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl ClientConfig {
    pub fn new(api_url: Option<&str>, log_level: Option<&str>) -> Self {
        let api_url = api_url
            .map(|v| v.trim().trim_end_matches('/'))
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .to_string();

        let log_level = log_level
            .and_then(LogLevel::parse)
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self { api_url, log_level }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset_or_blank() {
        assert_eq!(ClientConfig::new(None, None), ClientConfig::default());
        assert_eq!(ClientConfig::new(Some("  "), Some("")).api_url, DEFAULT_API_URL);
    }

    #[test]
    fn trims_api_url() {
        let cfg = ClientConfig::new(Some(" https://api.example.cl/ "), None);
        assert_eq!(cfg.api_url, "https://api.example.cl");
    }

    #[test]
    fn parses_log_level() {
        assert_eq!(ClientConfig::new(None, Some("DEBUG")).log_level, LogLevel::Debug);
        assert_eq!(ClientConfig::new(None, Some("warning")).log_level, LogLevel::Warn);
        assert_eq!(ClientConfig::new(None, Some("loud")).log_level, LogLevel::Info);
        assert_eq!(tracing::Level::from(LogLevel::Error), tracing::Level::ERROR);
    }
}
