use crate::api::ApiError;
use crate::calendar::CalendarError;
use crate::forms::FormError;
use axum::http::StatusCode;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
        }
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl From<CalendarError> for AppError {
    fn from(err: CalendarError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<FormError> for AppError {
    fn from(err: FormError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        match &err {
            ApiError::Unauthenticated => Self::unauthorized(err.to_string()),
            ApiError::Rejected { status, message } => {
                let status = StatusCode::from_u16(status.as_u16())
                    .unwrap_or(StatusCode::BAD_GATEWAY);
                if status.is_client_error() {
                    Self {
                        status,
                        message: message.clone(),
                    }
                } else {
                    Self::bad_gateway(err.to_string())
                }
            }
            ApiError::Transport(_) => Self::bad_gateway(err.to_string()),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
