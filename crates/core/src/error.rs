//! Unified error types for dls-encoder.
//!
//! Only [`Error::ParseFailed`] ever leaves the extraction core. The other
//! variants belong to the batch pipeline around it, which records the failing
//! item and moves on to the next one.

/// Unified error types for the encoder pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document text could not be interpreted as markup.
    #[error("PARSE_FAILED: {0}")]
    ParseFailed(String),

    /// A product page could not be read from disk.
    #[error("READ_FAILED: {0}")]
    ReadFailed(String),

    /// The source directory listing failed.
    #[error("TARGETS_UNAVAILABLE: {0}")]
    TargetsUnavailable(String),

    /// No cover image exists for the item.
    #[error("IMAGE_NOT_FOUND: {0}")]
    ImageNotFound(String),

    /// Walking the image directory failed.
    #[error("IMAGE_LOOKUP_FAILED: {0}")]
    ImageLookupFailed(String),

    /// The item's source directory holds no supported audio file.
    #[error("AUDIO_NOT_FOUND: {0}")]
    AudioNotFound(String),

    /// The output directory could not be emptied or created.
    #[error("OUTPUT_DIR_FAILED: {0}")]
    OutputDirFailed(String),

    /// Persisting parsed records failed.
    #[error("SAVE_FAILED: {0}")]
    SaveFailed(String),

    /// The encoder returned a failure.
    #[error("ENCODE_FAILED: {0}")]
    EncodeFailed(String),

    /// The batch was interrupted.
    #[error("CANCELLED")]
    Cancelled,

    /// A required external program is unavailable.
    #[error("DEPENDENCY_MISSING: {0}")]
    DependencyMissing(String),

    /// Generating a product page from a template failed.
    #[error("TEMPLATE_FAILED: {0}")]
    TemplateFailed(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SaveFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::ParseFailed("document is empty".to_string());
        assert!(err.to_string().contains("PARSE_FAILED"));
        assert!(err.to_string().contains("document is empty"));
    }

    #[test]
    fn test_cancelled_display() {
        assert_eq!(Error::Cancelled.to_string(), "CANCELLED");
    }

    #[test]
    fn test_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::SaveFailed(_)));
    }
}
