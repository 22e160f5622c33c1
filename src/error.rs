#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum MedFinderError {
    #[error("HTTP client initialization failed: {0}")]
    HttpClientInit(reqwest::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error from {api}: {message}")]
    Api { api: String, message: String },

    #[error("API JSON error from {api}: {source}")]
    ApiJson {
        api: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("PDF error: {0}")]
    Pdf(String),
}

#[cfg(test)]
mod tests {
    use super::MedFinderError;

    #[test]
    fn api_error_display_includes_api_name() {
        let err = MedFinderError::Api {
            api: "rxnav".to_string(),
            message: "HTTP 500".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("rxnav"));
        assert!(msg.contains("HTTP 500"));
    }

    #[test]
    fn pdf_error_display_includes_detail() {
        let err = MedFinderError::Pdf("font load failed".to_string());
        assert!(err.to_string().contains("font load failed"));
    }

    #[test]
    fn api_json_error_carries_source() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = MedFinderError::ApiJson {
            api: "rxnav".to_string(),
            source,
        };
        assert!(err.to_string().contains("rxnav"));
    }
}
