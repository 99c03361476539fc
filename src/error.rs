//! Unified error model for catalog lookups, descriptor validation and table builds.
//! Variants carry a stable `code` plus a human message, and map onto pgwire
//! SQLSTATE fields so a postgres-wired frontend can surface them unchanged.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppError {
    UserInput { code: String, message: String },
    NotFound { code: String, message: String },
    Conflict { code: String, message: String },
    Internal { code: String, message: String },
}

impl AppError {
    pub fn code_str(&self) -> &str {
        match self {
            AppError::UserInput { code, .. }
            | AppError::NotFound { code, .. }
            | AppError::Conflict { code, .. }
            | AppError::Internal { code, .. } => code.as_str(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::UserInput { message, .. }
            | AppError::NotFound { message, .. }
            | AppError::Conflict { message, .. }
            | AppError::Internal { message, .. } => message.as_str(),
        }
    }

    pub fn user<S: Into<String>>(code: S, msg: S) -> Self { AppError::UserInput { code: code.into(), message: msg.into() } }
    pub fn not_found<S: Into<String>>(code: S, msg: S) -> Self { AppError::NotFound { code: code.into(), message: msg.into() } }
    pub fn conflict<S: Into<String>>(code: S, msg: S) -> Self { AppError::Conflict { code: code.into(), message: msg.into() } }
    pub fn internal<S: Into<String>>(code: S, msg: S) -> Self { AppError::Internal { code: code.into(), message: msg.into() } }

    /// Pgwire mapping: return (sqlstate, severity, message)
    pub fn pgwire_fields(&self) -> (&'static str, &'static str, String) {
        let msg = self.message().to_string();
        match self {
            AppError::UserInput { .. } => ("22023", "ERROR", msg), // invalid_parameter_value
            AppError::NotFound { .. } => ("42704", "ERROR", msg),  // undefined_object
            AppError::Conflict { .. } => ("42710", "ERROR", msg),  // duplicate_object
            AppError::Internal { .. } => ("XX000", "ERROR", msg),  // internal_error
        }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code_str(), self.message())
    }
}

impl std::error::Error for AppError {}

pub type AppResult<T> = Result<T, AppError>;

impl From<polars::prelude::PolarsError> for AppError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        AppError::Internal { code: "frame_build".into(), message: err.to_string() }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal { code: "json_encode".into(), message: err.to_string() }
    }
}

impl From<std::fmt::Error> for AppError {
    fn from(err: std::fmt::Error) -> Self {
        AppError::Internal { code: "render_failed".into(), message: err.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pgwire_fields_mapping() {
        let (code, sev, msg) = AppError::not_found("unknown_role", "role \"x\" does not exist").pgwire_fields();
        assert_eq!(code, "42704");
        assert_eq!(sev, "ERROR");
        assert_eq!(msg, "role \"x\" does not exist");

        let (code, _, _) = AppError::conflict("duplicate_oid", "dup").pgwire_fields();
        assert_eq!(code, "42710");

        let (code, _, _) = AppError::internal("natts_mismatch", "x").pgwire_fields();
        assert_eq!(code, "XX000");
    }

    #[test]
    fn display_includes_code_and_message() {
        let e = AppError::user("bad_attnum", "attribute number 0 is out of range");
        assert_eq!(e.to_string(), "bad_attnum: attribute number 0 is out of range");
    }

    #[test]
    fn conversions_map_to_internal() {
        let e: AppError = std::fmt::Error.into();
        assert_eq!(e.code_str(), "render_failed");
        let e: AppError = serde_json::from_str::<u32>("x").unwrap_err().into();
        assert_eq!(e.code_str(), "json_encode");
        assert_eq!(e.pgwire_fields().0, "XX000");
    }

    #[test]
    fn serializes_with_type_tag() {
        let e = AppError::not_found("unknown_column", "no column");
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v["type"], "not_found");
        assert_eq!(v["code"], "unknown_column");
        let back: AppError = serde_json::from_value(v).unwrap();
        assert_eq!(back, e);
    }
}
