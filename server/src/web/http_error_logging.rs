use crate::web::ui::error::AppError;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Next;
use log::{log, Level};

/// An actix-web middleware logging every error returned by an endpoint handler
///
/// Client errors ([AppError]s which are not a server fault) are logged as warnings, everything
/// else as errors.
pub async fn error_logging_middleware<B: MessageBody>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<B>, actix_web::Error> {
    let response = next.call(req).await?;

    if let Some(error) = response.response().error() {
        let level = match error.as_error::<AppError>() {
            Some(app_error) if !app_error.is_server_fault() => Level::Warn,
            _ => Level::Error,
        };
        log!(
            level,
            "HTTP {} on {} <{}>: {}",
            response.response().status(),
            response.request().method(),
            response.request().uri(),
            error
        );
    }
    Ok(response)
}
