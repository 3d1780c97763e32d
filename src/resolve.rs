//! Best-effort lookup outcomes.
//!
//! Resolvers in this crate never surface errors to the request path. Each
//! lookup returns either the live value or its documented fallback, and the
//! handler composes the two cases explicitly.

use reqwest::StatusCode;
use thiserror::Error;

/// Outcome of a lookup that substitutes a documented fallback on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved<T> {
    /// Live value from the authoritative source.
    Value(T),
    /// Documented substitute used because the lookup failed.
    Fallback(T),
}

impl<T> Resolved<T> {
    /// Borrow the carried value, live or fallback.
    pub fn get(&self) -> &T {
        match self {
            Resolved::Value(value) | Resolved::Fallback(value) => value,
        }
    }

    /// Consume the outcome, keeping the carried value.
    pub fn into_inner(self) -> T {
        match self {
            Resolved::Value(value) | Resolved::Fallback(value) => value,
        }
    }

    /// Whether the fallback was substituted.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Resolved::Fallback(_))
    }
}

/// Why a lookup failed before its fallback was substituted.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The outbound call failed in transport or while decoding the body.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("unexpected status {0}")]
    Status(StatusCode),

    /// The endpoint answered without a usable value.
    #[error("empty response value")]
    Empty,
}
