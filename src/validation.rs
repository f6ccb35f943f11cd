/// Upload and input validation
///
/// Validates upload metadata against kind-specific requirements before any
/// state is touched.
use crate::catalog::models::{VideoKind, VideoUpload};
use crate::error::{CoreError, CoreResult};
use crate::media::store::MediaBlob;
use std::collections::HashMap;

/// Validation error detail
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

/// Validation result with detailed errors
pub type ValidationResult = Result<(), Vec<ValidationError>>;

type KindValidator = Box<dyn Fn(&VideoUpload, Option<&MediaBlob>) -> ValidationResult + Send + Sync>;

/// Upload validator
pub struct UploadValidator {
    /// Kind-specific validators
    validators: HashMap<VideoKind, KindValidator>,
}

impl UploadValidator {
    /// Create a new upload validator
    pub fn new() -> Self {
        let mut validator = Self {
            validators: HashMap::new(),
        };

        validator.register_short_form_validator();
        validator.register_long_form_validator();

        validator
    }

    /// Validate an upload against its kind's requirements
    pub fn validate(&self, upload: &VideoUpload, blob: Option<&MediaBlob>) -> ValidationResult {
        self.validate_basic(upload)?;

        if let Some(validator_fn) = self.validators.get(&upload.kind) {
            return validator_fn(upload, blob);
        }

        Ok(())
    }

    /// Basic validation for all uploads
    fn validate_basic(&self, upload: &VideoUpload) -> ValidationResult {
        let mut errors = Vec::new();

        if upload.title.trim().is_empty() {
            errors.push(ValidationError {
                path: "$.title".to_string(),
                message: "Required field 'title' is missing".to_string(),
            });
        }

        if upload.title.len() > 200 {
            errors.push(ValidationError {
                path: "$.title".to_string(),
                message: format!(
                    "Title exceeds maximum length of 200 characters: {}",
                    upload.title.len()
                ),
            });
        }

        if upload.description.len() > 2000 {
            errors.push(ValidationError {
                path: "$.description".to_string(),
                message: format!(
                    "Description exceeds maximum length of 2000 characters: {}",
                    upload.description.len()
                ),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Register the short-form validator
    fn register_short_form_validator(&mut self) {
        self.validators.insert(
            VideoKind::Short,
            Box::new(|upload: &VideoUpload, blob: Option<&MediaBlob>| {
                let mut errors = Vec::new();

                if blob.is_none() {
                    errors.push(ValidationError {
                        path: "$.media".to_string(),
                        message: "Short-form upload requires a media file".to_string(),
                    });
                }

                // Short-form videos are always free
                if upload.price.unwrap_or(0) > 0 {
                    errors.push(ValidationError {
                        path: "$.price".to_string(),
                        message: "Short-form videos cannot be priced".to_string(),
                    });
                }

                if errors.is_empty() {
                    Ok(())
                } else {
                    Err(errors)
                }
            }),
        );
    }

    /// Register the long-form validator
    fn register_long_form_validator(&mut self) {
        self.validators.insert(
            VideoKind::Long,
            Box::new(|upload: &VideoUpload, _blob: Option<&MediaBlob>| {
                let mut errors = Vec::new();

                match upload.media_url.as_deref().map(str::trim) {
                    None | Some("") => errors.push(ValidationError {
                        path: "$.mediaUrl".to_string(),
                        message: "Long-form upload requires an external video URL".to_string(),
                    }),
                    Some(url) => {
                        if !url.starts_with("http://") && !url.starts_with("https://") {
                            errors.push(ValidationError {
                                path: "$.mediaUrl".to_string(),
                                message: "Video URL must be an http(s) address".to_string(),
                            });
                        }
                    }
                }

                if errors.is_empty() {
                    Ok(())
                } else {
                    Err(errors)
                }
            }),
        );
    }
}

impl Default for UploadValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert validation errors to a CoreError
pub fn validation_errors_to_core_error(errors: Vec<ValidationError>) -> CoreError {
    let messages: Vec<String> = errors
        .iter()
        .map(|e| format!("{}: {}", e.path, e.message))
        .collect();

    CoreError::InvalidUpload(messages.join("; "))
}

/// Validate comment text before appension
pub fn validate_comment_text(text: &str) -> CoreResult<()> {
    if text.trim().is_empty() {
        return Err(CoreError::Validation(
            "Comment text cannot be empty".to_string(),
        ));
    }

    if text.len() > 500 {
        return Err(CoreError::Validation(format!(
            "Comment exceeds maximum length of 500 characters: {}",
            text.len()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_upload() -> VideoUpload {
        VideoUpload {
            title: "Amazing Short Video".to_string(),
            description: "A short clip".to_string(),
            kind: VideoKind::Short,
            media_url: None,
            price: None,
        }
    }

    fn long_upload(url: Option<&str>) -> VideoUpload {
        VideoUpload {
            title: "Deep Dive Into Topic".to_string(),
            description: "A comprehensive tutorial".to_string(),
            kind: VideoKind::Long,
            media_url: url.map(String::from),
            price: Some(29),
        }
    }

    fn blob() -> MediaBlob {
        MediaBlob {
            file_name: "clip.mp4".to_string(),
            data: b"bytes".to_vec(),
        }
    }

    #[test]
    fn test_short_form_with_blob_valid() {
        let validator = UploadValidator::new();
        assert!(validator.validate(&short_upload(), Some(&blob())).is_ok());
    }

    #[test]
    fn test_short_form_without_blob_invalid() {
        let validator = UploadValidator::new();

        let result = validator.validate(&short_upload(), None);
        let errors = result.unwrap_err();
        assert!(errors.iter().any(|e| e.path == "$.media"));
    }

    #[test]
    fn test_short_form_with_price_invalid() {
        let validator = UploadValidator::new();

        let mut upload = short_upload();
        upload.price = Some(50);

        let errors = validator.validate(&upload, Some(&blob())).unwrap_err();
        assert!(errors.iter().any(|e| e.path == "$.price"));
    }

    #[test]
    fn test_long_form_with_url_valid() {
        let validator = UploadValidator::new();
        assert!(validator
            .validate(&long_upload(Some("https://www.youtube.com/embed/abc")), None)
            .is_ok());
    }

    #[test]
    fn test_long_form_missing_url_invalid() {
        let validator = UploadValidator::new();

        for upload in [long_upload(None), long_upload(Some("")), long_upload(Some("   "))] {
            let errors = validator.validate(&upload, None).unwrap_err();
            assert!(errors.iter().any(|e| e.path == "$.mediaUrl"));
        }
    }

    #[test]
    fn test_long_form_non_http_url_invalid() {
        let validator = UploadValidator::new();

        let errors = validator
            .validate(&long_upload(Some("ftp://example.com/video")), None)
            .unwrap_err();
        assert!(errors.iter().any(|e| e.path == "$.mediaUrl"));
    }

    #[test]
    fn test_empty_title_invalid() {
        let validator = UploadValidator::new();

        let mut upload = short_upload();
        upload.title = "   ".to_string();

        let errors = validator.validate(&upload, Some(&blob())).unwrap_err();
        assert!(errors.iter().any(|e| e.path == "$.title"));
    }

    #[test]
    fn test_comment_text_validation() {
        assert!(validate_comment_text("This is amazing!").is_ok());
        assert!(validate_comment_text("").is_err());
        assert!(validate_comment_text("   \n\t ").is_err());
        assert!(validate_comment_text(&"a".repeat(501)).is_err());
    }

    #[test]
    fn test_errors_collapse_to_invalid_upload() {
        let validator = UploadValidator::new();
        let errors = validator.validate(&short_upload(), None).unwrap_err();

        let err = validation_errors_to_core_error(errors);
        match err {
            CoreError::InvalidUpload(msg) => assert!(msg.contains("$.media")),
            other => panic!("Expected InvalidUpload, got {:?}", other),
        }
    }
}
