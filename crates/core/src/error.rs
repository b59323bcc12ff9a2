use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("typing.phrases must not be empty")]
    NoPhrases,
    #[error("typing.phrases[{0}] is empty")]
    EmptyPhrase(usize),
    #[error("particles.palette must not be empty")]
    EmptyPalette,
    #[error("{name} must be in (0, 1], got {value}")]
    Factor { name: &'static str, value: f64 },
    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },
    #[error("typing delays must not all be zero")]
    StalledTyping,
    #[error("{name} must be at most {max}, got {value}")]
    TooMany {
        name: &'static str,
        value: usize,
        max: usize,
    },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("preference storage is unavailable")]
    Unavailable,
    #[error("storage rejected write of {key}: {reason}")]
    Rejected { key: String, reason: String },
}
