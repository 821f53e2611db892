//! Modular-crypt record string parsing.
//!
//! Credential records use the `$<tag>$...` form shared by bcrypt and
//! PHC-style encodings. Parsing here only splits structure; digest
//! interpretation stays inside each scheme handler.

use gatekey_core::error::AppError;
use gatekey_core::result::AppResult;

/// Splits a record into its `$`-separated fields, without the leading `$`.
///
/// For `$2b$12$abc` this yields `["2b", "12", "abc"]`.
pub(crate) fn fields(record: &str) -> AppResult<Vec<&str>> {
    let body = record
        .strip_prefix('$')
        .ok_or_else(|| AppError::malformed_record("record does not start with '$'"))?;
    let fields: Vec<&str> = body.split('$').collect();
    if fields.first().is_none_or(|tag| tag.is_empty()) {
        return Err(AppError::malformed_record("record has an empty scheme tag"));
    }
    Ok(fields)
}

/// Extracts the scheme tag from a record, e.g. `2b` or `argon2id`.
pub fn scheme_tag(record: &str) -> AppResult<&str> {
    Ok(fields(record)?[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_splits_bcrypt_record() {
        let parts = fields("$2b$12$abcdefghijklmnopqrstuv").unwrap();
        assert_eq!(parts, vec!["2b", "12", "abcdefghijklmnopqrstuv"]);
    }

    #[test]
    fn test_fields_splits_phc_record() {
        let parts = fields("$argon2id$v=19$m=19456,t=2,p=1$salt$hash").unwrap();
        assert_eq!(parts[0], "argon2id");
        assert_eq!(parts[2], "m=19456,t=2,p=1");
    }

    #[test]
    fn test_scheme_tag() {
        assert_eq!(scheme_tag("$2b$12$xyz").unwrap(), "2b");
        assert_eq!(scheme_tag("$argon2id$v=19$rest").unwrap(), "argon2id");
    }

    #[test]
    fn test_missing_dollar_prefix_is_malformed() {
        assert!(scheme_tag("not-a-real-record").is_err());
    }

    #[test]
    fn test_empty_tag_is_malformed() {
        assert!(scheme_tag("$$12$xyz").is_err());
        assert!(scheme_tag("$").is_err());
    }
}
