use super::models::Config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Non-fatal checks on an assembled configuration.
pub fn validate(config: &Config) -> ConfigWarnings {
    let mut warnings = ConfigWarnings::default();

    if config.tmdb.api_key.is_none() {
        warnings.push_with_hint(
            "TMDB_API_KEY is not set; movie endpoints will answer 502",
            "Export TMDB_API_KEY or set `api_key` under [tmdb] in marquee.toml",
        );
    }

    if config.cache.capacity == 0 {
        warnings.push("Page cache capacity is 0; every request hits TMDB");
    }

    if config.dev_mode {
        warnings.push("Development mode enabled; CORS allows any origin");
    }

    warnings
}
