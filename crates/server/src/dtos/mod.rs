pub mod allotment;
pub mod batch;
pub mod comment;
pub mod content;
pub mod notification;
pub mod payment;
pub mod schedule;
pub mod student;
pub mod teacher;
pub mod timetable;
pub mod user;

use crate::error::ApiError;
use std::str::FromStr;

/// Parses a wire enum name, naming the field in the error
pub(crate) fn parse_enum<T: FromStr>(field: &str, value: &str) -> Result<T, ApiError> {
    value
        .parse()
        .map_err(|_| ApiError::bad_request(format!("Unknown {field} '{value}'")))
}
