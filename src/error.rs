use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::fmt::{self, Debug, Display};
use std::io;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::storage_error(err)
    }
}

impl From<tempfile::PersistError> for Error {
    fn from(err: tempfile::PersistError) -> Self {
        Error::storage_error(err.error)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::serialization_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::reqwest_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            1..=99 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            102 => (StatusCode::NOT_FOUND, self.message.as_str()),
            103 => (StatusCode::FORBIDDEN, self.message.as_str()),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl Error {
    pub fn storage_error<T: Display>(err: T) -> Error {
        Error {
            code: 2,
            message: format!("storage error: {}", err),
        }
    }

    pub fn reqwest_error(err: reqwest::Error) -> Error {
        Error {
            code: 3,
            message: format!("reqwest error: {}", err),
        }
    }

    pub fn upstream_error() -> Error {
        Error {
            code: 4,
            message: "upstream error".into(),
        }
    }

    pub fn unexpected_error() -> Error {
        Error {
            code: 5,
            message: "unexpected error".into(),
        }
    }

    pub fn serialization_error<T: Debug>(err: T) -> Error {
        Error {
            code: 6,
            message: format!("serialization error: {:?}", err),
        }
    }

    pub fn server_error<T: Display>(err: T) -> Error {
        Error {
            code: 7,
            message: format!("server error: {}", err),
        }
    }

    pub fn invalid_input_error() -> Error {
        Error {
            code: 101,
            message: "invalid input".into(),
        }
    }

    pub fn not_found_error() -> Error {
        Error {
            code: 102,
            message: "not found".into(),
        }
    }

    pub fn locked_error() -> Error {
        Error {
            code: 103,
            message: "places are locked".into(),
        }
    }

    pub fn is_storage_error(&self) -> bool {
        self.code == 2
    }

    pub fn is_invalid_input_error(&self) -> bool {
        self.code == 101
    }

    pub fn is_not_found_error(&self) -> bool {
        self.code == 102
    }

    pub fn is_locked_error(&self) -> bool {
        self.code == 103
    }
}

#[test]
fn internal_errors_hide_their_message() {
    let response = Error::storage_error("disk full").into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = Error::not_found_error().into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = Error::locked_error().into_response();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = Error::invalid_input_error().into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
