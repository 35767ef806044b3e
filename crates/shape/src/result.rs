//! Non-throwing parse result.

use serde::Serialize;
use serde::ser::SerializeStruct;

use crate::error::ParseError;

/// Outcome of a `parse_safe` call.
///
/// Serializes to `{"success": true, "data": ...}` or
/// `{"success": false, "reason": "..."}`.
#[derive(Debug, Clone, PartialEq)]
pub enum SafeParse<T> {
    Success(T),
    Failure(ParseError),
}

impl<T> SafeParse<T> {
    pub const fn success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure(_) => None,
        }
    }

    /// The failure detail, if parsing failed.
    pub const fn error(&self) -> Option<&ParseError> {
        match self {
            Self::Success(_) => None,
            Self::Failure(err) => Some(err),
        }
    }

    /// Rendered failure message (path and message), if parsing failed.
    pub fn reason(&self) -> Option<String> {
        self.error().map(ToString::to_string)
    }

    pub fn into_result(self) -> Result<T, ParseError> {
        self.into()
    }
}

impl<T> From<Result<T, ParseError>> for SafeParse<T> {
    fn from(result: Result<T, ParseError>) -> Self {
        match result {
            Ok(data) => Self::Success(data),
            Err(err) => Self::Failure(err),
        }
    }
}

impl<T> From<SafeParse<T>> for Result<T, ParseError> {
    fn from(result: SafeParse<T>) -> Self {
        match result {
            SafeParse::Success(data) => Ok(data),
            SafeParse::Failure(err) => Err(err),
        }
    }
}

impl<T: Serialize> Serialize for SafeParse<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut out = serializer.serialize_struct("SafeParse", 2)?;
        match self {
            Self::Success(data) => {
                out.serialize_field("success", &true)?;
                out.serialize_field("data", data)?;
            }
            Self::Failure(err) => {
                out.serialize_field("success", &false)?;
                out.serialize_field("reason", &err.to_string())?;
            }
        }
        out.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use serde_json::json;

    #[test]
    fn accessors() {
        let ok: SafeParse<Value> = SafeParse::Success(Value::from(1));
        assert!(ok.success());
        assert_eq!(ok.data(), Some(&Value::from(1)));
        assert_eq!(ok.reason(), None);

        let failed: SafeParse<Value> = Err(ParseError::missing().prefixed("a")).into();
        assert!(!failed.success());
        assert_eq!(failed.reason().as_deref(), Some("a: required value is missing"));
        assert!(failed.into_result().is_err());
    }

    #[test]
    fn serializes_tagged_shape() {
        let ok = SafeParse::Success(Value::from("x"));
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({"success": true, "data": "x"})
        );

        let failed: SafeParse<Value> = SafeParse::Failure(ParseError::missing());
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({"success": false, "reason": "required value is missing"})
        );
    }
}
