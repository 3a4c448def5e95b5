#[cfg(test)]
mod tests {
    use crate::error::{CatalogError, TutorError};

    #[test]
    fn test_error_creation() {
        let error = TutorError::new("Test error", "test_stage");
        assert_eq!(error.message, "Test error");
        assert_eq!(error.stage, "test_stage");
    }

    #[test]
    fn test_error_with_context() {
        let error = TutorError::new("Test error", "test_stage")
            .with_context("Additional context");
        assert!(error.context.is_some());
        assert_eq!(error.context.unwrap(), "Additional context");
    }

    #[test]
    fn test_error_display() {
        let error = TutorError::new("Test error", "test_stage")
            .with_context("context")
            .with_source("source");
        let display = format!("{}", error);
        assert!(display.contains("[test_stage]"));
        assert!(display.contains("Test error"));
        assert!(display.contains("(context: context)"));
        assert!(display.contains("(source: source)"));
    }

    #[test]
    fn test_catalog_error_converts_with_stage() {
        let error: TutorError = CatalogError::Cycle(vec!["a".into(), "b".into(), "a".into()]).into();
        assert_eq!(error.stage, "catalog");
        assert!(error.message.contains("a -> b -> a"));
    }

    #[test]
    fn test_json_error_converts() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json");
        let error: TutorError = parse.unwrap_err().into();
        assert_eq!(error.stage, "json_parse");
        assert_eq!(error.source.as_deref(), Some("serde_json"));
    }

    #[test]
    fn test_logging_initializes_once() {
        assert!(crate::logging::init_logging().is_ok());
        let err = crate::logging::init_logging().unwrap_err();
        assert_eq!(err.stage, "startup");
    }
}
