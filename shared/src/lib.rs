//! Shared types and browser-independent logic for the Smart Agenda client.

pub mod booking;
pub mod cache;
pub mod calendar;
pub mod contact;
pub mod endpoints;
pub mod error;
pub mod format;
pub mod models;
pub mod organization;
pub mod schedule;
pub mod search;
pub mod session;
pub mod validation;

pub use endpoints::{ApiRequest, HttpMethod};
pub use error::{ApiError, ApiErrorKind, ApiResult, FieldErrors, SubmitError};
pub use models::*;
