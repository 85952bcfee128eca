//! Request extractors that reject with [`HandlerError`] instead of axum's defaults.

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::HandlerError;

/// The `{personId}` path segment parsed as a signed decimal integer.
///
/// Anything that does not parse is a server-side failure (500), not a client error.
///
/// ```ignore
/// async fn get_person(PersonId(id): PersonId) -> String {
///     format!("person {id}")
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonId(pub i32);

impl PersonId {
    pub fn parse(raw: &str) -> Result<Self, HandlerError> {
        raw.parse()
            .map(PersonId)
            .map_err(|_| HandlerError::InvalidId(raw.to_owned()))
    }
}

impl<S> FromRequestParts<S> for PersonId
where
    S: Send + Sync,
{
    type Rejection = HandlerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| HandlerError::InvalidId(e.body_text()))?;

        PersonId::parse(&raw)
    }
}

/// JSON request body decoded without looking at `Content-Type`.
///
/// Unreadable or malformed bodies are rejected with 400 "bad data".
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = HandlerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(HandlerError::ReadBody)?;

        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(HandlerError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_signed_integers() {
        assert_eq!(PersonId::parse("42").unwrap(), PersonId(42));
        assert_eq!(PersonId::parse("-3").unwrap(), PersonId(-3));
        assert_eq!(PersonId::parse("+7").unwrap(), PersonId(7));
    }

    #[test]
    fn test_parse_rejects_non_integers() {
        for raw in ["abc", "", "1.5", "99999999999"] {
            let err = PersonId::parse(raw).unwrap_err();
            assert!(matches!(err, HandlerError::InvalidId(_)), "{raw}");
        }
    }
}
