use axum::{
    extract::rejection::BytesRejection,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use thiserror::Error;

/// Coarse classification of a [`PersonError`], independent of context wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Storage,
}

#[derive(Debug, Error)]
pub enum PersonError {
    #[error("person {0} not found")]
    NotFound(i32),

    #[error("storage error: {0}")]
    Storage(#[from] DbErr),

    #[error("{context}: {source}")]
    Context {
        context: &'static str,
        source: Box<PersonError>,
    },
}

pub type PersonResult<T> = Result<T, PersonError>;

impl PersonError {
    /// Wrap with the name of the operation that failed, keeping the original as source.
    pub fn context(self, context: &'static str) -> Self {
        PersonError::Context {
            context,
            source: Box::new(self),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PersonError::NotFound(_) => ErrorKind::NotFound,
            PersonError::Storage(_) => ErrorKind::Storage,
            PersonError::Context { source, .. } => source.kind(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

pub trait ResultExt<T> {
    fn context(self, context: &'static str) -> PersonResult<T>;
}

impl<T> ResultExt<T> for PersonResult<T> {
    fn context(self, context: &'static str) -> PersonResult<T> {
        self.map_err(|e| e.context(context))
    }
}

/// Failures surfaced by the HTTP handlers.
///
/// Each variant renders as a short plain-text body; the detailed cause is only logged.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("failed to read request body: {0}")]
    ReadBody(#[source] BytesRejection),

    #[error("failed to decode person: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("invalid person id {0:?}")]
    InvalidId(String),

    #[error("failed to encode response: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("{message}: {source}")]
    Usecase {
        status: StatusCode,
        message: &'static str,
        source: PersonError,
    },
}

impl HandlerError {
    pub fn usecase(status: StatusCode, message: &'static str, source: PersonError) -> Self {
        HandlerError::Usecase {
            status,
            message,
            source,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            HandlerError::ReadBody(_) | HandlerError::Decode(_) => StatusCode::BAD_REQUEST,
            HandlerError::InvalidId(_) | HandlerError::Encode(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            HandlerError::Usecase { status, .. } => *status,
        }
    }

    /// Body text sent to the client.
    pub fn public_message(&self) -> &'static str {
        match self {
            HandlerError::ReadBody(_) | HandlerError::Decode(_) => "bad data",
            HandlerError::InvalidId(_) => "unknown error",
            HandlerError::Encode(_) => "can't make person",
            HandlerError::Usecase { message, .. } => *message,
        }
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::info!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let mut response = (status, format!("{}\n", self.public_message())).into_response();
        let headers = response.headers_mut();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        headers.insert(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        );
        response
    }
}
