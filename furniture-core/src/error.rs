use thiserror::Error;

/// Failure to read a configuration document.
///
/// Only syntactically broken JSON ends up here; bad values inside a
/// well-formed document are coerced to defaults during resolution.
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("invalid furniture config: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_error_mentions_config() {
        let err: SpecError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(format!("{err}").contains("furniture config"));
    }
}
