//! Process configuration read from the environment

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

/// Configuration for a wizard session
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Module to start with instead of asking
    pub module: Option<String>,
    pub log_format: LogFormat,
    pub conversation_id: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            module: non_blank("MIPE_MODULE").map(|v| v.trim().to_string()),
            log_format: non_blank("MIPE_LOG_FORMAT")
                .map(|v| LogFormat::parse(&v))
                .unwrap_or_default(),
            conversation_id: non_blank("MIPE_CONVERSATION_ID"),
        }
    }

    /// Configured conversation id, or a fresh one
    pub fn conversation_id(&self) -> String {
        self.conversation_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
    }
}
