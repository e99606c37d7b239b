use crate::data_store::StoreError;
use actix_web::error::UrlGenerationError;
use actix_web::http::StatusCode;
use actix_web::ResponseError;
use std::fmt::{Display, Formatter};

/// Error type of the ui endpoint functions
///
/// Each variant maps to an HTTP status code and to a user-facing heading and explanation, which
/// the [crate::web::ui::error_page::error_page_middleware] puts into the error page. The string
/// payloads are technical details for the log and are only shown for client errors.
#[derive(Debug)]
pub enum AppError {
    PageNotFound,
    EntityNotFound,
    InvalidData(String),
    TransactionConflict,
    DatabaseUnavailable(String),
    Internal(String),
}

impl AppError {
    /// Heading of the error page
    pub fn title(&self) -> &'static str {
        match self {
            AppError::PageNotFound => "Page not found",
            AppError::EntityNotFound => "Not found",
            AppError::InvalidData(_) => "Invalid data",
            AppError::TransactionConflict => "Please retry",
            AppError::DatabaseUnavailable(_) | AppError::Internal(_) => "Server error",
        }
    }

    pub fn explanation(&self) -> &'static str {
        match self {
            AppError::PageNotFound => {
                "The page you requested does not exist. Maybe the link you followed is outdated."
            }
            AppError::EntityNotFound => {
                "The venue, artist or show you requested does not exist (anymore)."
            }
            AppError::InvalidData(_) => "The submitted data could not be processed.",
            AppError::TransactionConflict => {
                "Your request collided with a concurrent change of the same data. Please try again."
            }
            AppError::DatabaseUnavailable(_) => {
                "The database is currently not reachable. Please try again later."
            }
            AppError::Internal(_) => "Something went wrong on our side. Please try again later.",
        }
    }

    /// Details which may be shown to the user, i.e. the reason of rejected input data
    pub fn public_detail(&self) -> Option<&str> {
        match self {
            AppError::InvalidData(e) => Some(e),
            _ => None,
        }
    }

    /// Whether the error is caused by the server or database rather than by the request
    pub fn is_server_fault(&self) -> bool {
        matches!(
            self,
            AppError::DatabaseUnavailable(_) | AppError::Internal(_)
        )
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotExisting => Self::EntityNotFound,
            StoreError::TransactionConflict => Self::TransactionConflict,
            StoreError::ConnectionError(e) => Self::DatabaseUnavailable(e),
            StoreError::InvalidInputData(e) => Self::InvalidData(e),
            StoreError::ConflictEntityExists => {
                Self::InvalidData("An identical entry exists already".to_owned())
            }
            StoreError::QueryError(e) => Self::Internal(format!("Query failed: {}", e)),
            StoreError::InvalidDataInDatabase(e) => {
                Self::Internal(format!("Stored data is malformed: {}", e))
            }
        }
    }
}

impl From<actix_web::error::BlockingError> for AppError {
    fn from(_e: actix_web::error::BlockingError) -> Self {
        Self::Internal("Blocking thread pool is gone".to_owned())
    }
}

impl From<askama::Error> for AppError {
    fn from(value: askama::Error) -> Self {
        Self::Internal(format!("Template rendering failed: {}", value))
    }
}

impl From<UrlGenerationError> for AppError {
    fn from(value: UrlGenerationError) -> Self {
        Self::Internal(format!("URL generation failed: {}", value))
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())?;
        match self {
            AppError::InvalidData(e) | AppError::DatabaseUnavailable(e) | AppError::Internal(e) => {
                write!(f, ": {}", e)
            }
            _ => Ok(()),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::PageNotFound | AppError::EntityNotFound => StatusCode::NOT_FOUND,
            AppError::InvalidData(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::TransactionConflict => StatusCode::SERVICE_UNAVAILABLE,
            AppError::DatabaseUnavailable(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
