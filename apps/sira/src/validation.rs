//! Checks run before any network call.

use std::path::Path;

use crate::errors::ClientError;

pub const PROMPT_MIN_CHARS: usize = 100;
pub const PROMPT_MAX_CHARS: usize = 3000;

pub const MSG_PROMPT_EMPTY: &str = "يرجى كتابة وصف لخبراتك أولاً.";
pub const MSG_PROMPT_TOO_SHORT: &str =
    "النص قصير جداً. يرجى كتابة 100 حرف على الأقل للحصول على سيرة ذاتية دقيقة.";
pub const MSG_PROMPT_TOO_LONG: &str = "النص طويل جداً. الحد الأقصى 3000 حرف.";
pub const MSG_PDF_ONLY: &str = "يرجى رفع ملف بصيغة PDF فقط.";
pub const MSG_PASSWORD_MISMATCH: &str = "كلمات المرور غير متطابقة";
pub const MSG_REGISTRATION_INCOMPLETE: &str = "يرجى تعبئة جميع الحقول المطلوبة.";

const PDF_MAGIC: &[u8] = b"%PDF";

/// Returns the trimmed prompt. Length is counted in characters, not bytes.
pub fn validate_prompt(prompt: &str) -> Result<&str, ClientError> {
    let trimmed = prompt.trim();
    let chars = trimmed.chars().count();
    if chars == 0 {
        return Err(ClientError::Validation(MSG_PROMPT_EMPTY.to_string()));
    }
    if chars < PROMPT_MIN_CHARS {
        return Err(ClientError::Validation(MSG_PROMPT_TOO_SHORT.to_string()));
    }
    if chars > PROMPT_MAX_CHARS {
        return Err(ClientError::Validation(MSG_PROMPT_TOO_LONG.to_string()));
    }
    Ok(trimmed)
}

/// Accepts only `.pdf` files whose contents start with the PDF signature.
pub fn validate_pdf_upload(path: &Path, contents: &[u8]) -> Result<(), ClientError> {
    let has_pdf_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if !has_pdf_extension || !contents.starts_with(PDF_MAGIC) {
        return Err(ClientError::Validation(MSG_PDF_ONLY.to_string()));
    }
    Ok(())
}

pub fn validate_registration(
    username: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), ClientError> {
    if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        return Err(ClientError::Validation(
            MSG_REGISTRATION_INCOMPLETE.to_string(),
        ));
    }
    if password != confirm_password {
        return Err(ClientError::Validation(MSG_PASSWORD_MISMATCH.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: ClientError) -> String {
        err.user_message()
    }

    #[test]
    fn test_prompt_bounds_count_characters() {
        // 99 Arabic letters are 198 bytes but still too short.
        let short = "ب".repeat(99);
        assert_eq!(
            message(validate_prompt(&short).unwrap_err()),
            MSG_PROMPT_TOO_SHORT
        );
        let ok = "ب".repeat(100);
        assert_eq!(validate_prompt(&ok).unwrap(), ok);
        let long = "a".repeat(3001);
        assert_eq!(
            message(validate_prompt(&long).unwrap_err()),
            MSG_PROMPT_TOO_LONG
        );
    }

    #[test]
    fn test_prompt_is_trimmed_before_counting() {
        let padded = format!("   {}   ", "a".repeat(99));
        assert!(validate_prompt(&padded).is_err());
        let padded = format!("  {}\n", "a".repeat(120));
        assert_eq!(validate_prompt(&padded).unwrap().len(), 120);
        assert_eq!(
            message(validate_prompt("   ").unwrap_err()),
            MSG_PROMPT_EMPTY
        );
    }

    #[test]
    fn test_pdf_upload_checks_extension_and_magic() {
        assert!(validate_pdf_upload(Path::new("cv.PDF"), b"%PDF-1.7").is_ok());
        assert!(validate_pdf_upload(Path::new("cv.docx"), b"%PDF-1.7").is_err());
        assert!(validate_pdf_upload(Path::new("cv.pdf"), b"PK\x03\x04").is_err());
    }

    #[test]
    fn test_registration_password_mismatch() {
        assert_eq!(
            message(validate_registration("sara", "s@x.io", "abc12345", "abc1234").unwrap_err()),
            MSG_PASSWORD_MISMATCH
        );
        assert!(validate_registration("sara", "s@x.io", "abc12345", "abc12345").is_ok());
        assert!(validate_registration(" ", "s@x.io", "p", "p").is_err());
    }
}
