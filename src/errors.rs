use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::db::StoreError;

pub const SERVER_ERROR_MESSAGE: &str = "Ошибка сервера";
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "Запрашиваемый ресурс не найден";
pub const UNAUTHORIZED_MESSAGE: &str = "Необходима авторизация";
pub const INVALID_BODY_MESSAGE: &str = "Переданы некорректные данные";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(&'static str),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("Server error")]
    ServerError,
    #[error("Unauthorized")]
    Unauthorized,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::ServerError => (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, UNAUTHORIZED_MESSAGE),
        };

        let body = Json(serde_json::json!({
            "message": message
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        ApiError::BadRequest(INVALID_BODY_MESSAGE)
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Rejected path parameter: {}", rejection.body_text());
        ApiError::BadRequest(INVALID_BODY_MESSAGE)
    }
}

/// Client-facing messages for one store-backed operation
///
/// Each handler owns one of these; `resolve` turns a store outcome into the
/// matching response using these texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorMessages {
    /// Malformed identifier or schema violation
    pub bad_request: &'static str,
    /// Well-formed identifier that matched nothing
    pub not_found: &'static str,
}

pub mod messages {
    use super::ErrorMessages;

    const USER_NOT_FOUND: &str = "Запрашиваемый пользователь не найден";
    const CARD_NOT_FOUND: &str = "Карточка не найдена";
    const INVALID_CARD_ID: &str = "Некорректный _id карточки";

    pub const GET_USER: ErrorMessages = ErrorMessages {
        bad_request: "Некорректный _id пользователя",
        not_found: USER_NOT_FOUND,
    };

    pub const CURRENT_USER: ErrorMessages = GET_USER;

    pub const CREATE_USER: ErrorMessages = ErrorMessages {
        bad_request: "Переданы некорректные данные при создании пользователя",
        not_found: USER_NOT_FOUND,
    };

    pub const UPDATE_PROFILE: ErrorMessages = ErrorMessages {
        bad_request: "Переданы некорректные данные при обновлении профиля",
        not_found: USER_NOT_FOUND,
    };

    pub const UPDATE_AVATAR: ErrorMessages = ErrorMessages {
        bad_request: "Переданы некорректные данные при обновлении аватара",
        not_found: USER_NOT_FOUND,
    };

    pub const CREATE_CARD: ErrorMessages = ErrorMessages {
        bad_request: "Переданы некорректные данные при создании карточки",
        not_found: CARD_NOT_FOUND,
    };

    pub const CARD_BY_ID: ErrorMessages = ErrorMessages {
        bad_request: INVALID_CARD_ID,
        not_found: CARD_NOT_FOUND,
    };
}

impl ApiError {
    /// Maps a store failure to a client error by category
    ///
    /// Malformed identifiers and schema violations are the client's fault;
    /// everything else is logged and reported as a generic server error.
    pub fn from_store(err: StoreError, messages: &ErrorMessages) -> Self {
        match err {
            StoreError::MalformedId(_) | StoreError::Validation(_) => {
                tracing::debug!("Rejected store input: {}", err);
                ApiError::BadRequest(messages.bad_request)
            }
            StoreError::Database(_) | StoreError::Pool(_) | StoreError::Task(_) => {
                ApiError::server_fault(err)
            }
        }
    }

    /// Logs a store failure and reports it as a generic server error
    ///
    /// Used directly by operations that take no client input, where every
    /// failure is the server's.
    pub fn server_fault(err: StoreError) -> Self {
        error!("Store operation failed: {}", err);
        ApiError::ServerError
    }
}

/// Resolves the outcome of an identifier-addressed store operation
///
/// `Ok(None)` becomes NotFound, store failures go through
/// [`ApiError::from_store`].
pub fn resolve<T>(outcome: Result<Option<T>, StoreError>, messages: &ErrorMessages) -> Result<T, ApiError> {
    outcome
        .map_err(|err| ApiError::from_store(err, messages))?
        .ok_or(ApiError::NotFound(messages.not_found))
}
