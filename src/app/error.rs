use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("document error: {0}")]
    Document(String),

    #[error("render error: {0}")]
    Render(String),
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such document");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert!(app_err.to_string().contains("no such document"));
    }

    #[test]
    fn test_error_display() {
        let err = AppError::Document("encrypted documents are not supported".to_string());
        assert_eq!(
            err.to_string(),
            "document error: encrypted documents are not supported"
        );

        let err = AppError::Render("pdftoppm exited with status 1".to_string());
        assert_eq!(err.to_string(), "render error: pdftoppm exited with status 1");
    }
}
