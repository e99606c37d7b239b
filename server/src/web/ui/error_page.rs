//! Rendering of HTML error pages for errors returned by endpoint handlers
//!
//! The pages are generated in a middleware instead of [actix_web::ResponseError::error_response],
//! because only the middleware has access to the request, which the base template needs for
//! generating URLs.
use crate::web::ui::base_template::BaseTemplateContext;
use crate::web::ui::error::AppError;
use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::middleware::Next;
use actix_web::web::Html;
use actix_web::{HttpRequest, HttpResponse, Responder};
use askama::Template;

/// An actix-web middleware replacing the response of failed handlers with an error page
///
/// [AppError]s get their specific heading and explanation, any other error is presented by its
/// string representation. If the error page itself cannot be rendered, a plain text response is
/// sent instead.
pub async fn error_page_middleware<B: MessageBody>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B, String>>, actix_web::Error> {
    let response = next.call(req).await?;
    let Some(error) = response.response().error() else {
        return Ok(response.map_into_left_body());
    };

    let status = error.as_response_error().status_code();
    let content = match error.as_error::<AppError>() {
        Some(app_error) => ErrorContent {
            title: app_error.title().to_owned(),
            explanation: app_error.explanation().to_owned(),
            detail: app_error.public_detail().map(str::to_owned),
        },
        None => ErrorContent {
            title: status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_owned(),
            explanation: error.to_string(),
            detail: None,
        },
    };
    let (req, _res) = response.into_parts();
    let page = render_error_page(&req, status, content);
    Ok(ServiceResponse::new(req, page).map_into_right_body())
}

struct ErrorContent {
    title: String,
    explanation: String,
    detail: Option<String>,
}

fn render_error_page(
    req: &HttpRequest,
    status: StatusCode,
    content: ErrorContent,
) -> HttpResponse<String> {
    let tmpl = ErrorPageTemplate {
        base: BaseTemplateContext {
            request: req,
            page_title: &content.title,
        },
        status,
        content: &content,
        url: req.full_url(),
        timestamp: chrono::Utc::now(),
    };
    match tmpl.render() {
        Ok(body) => (Html::new(body), status).respond_to(req),
        Err(e) => (
            format!(
                "{}\n{}\n(Error page could not be rendered: {})",
                content.title, content.explanation, e
            ),
            status,
        )
            .respond_to(req),
    }
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorPageTemplate<'a> {
    base: BaseTemplateContext<'a>,
    status: StatusCode,
    content: &'a ErrorContent,
    url: url::Url,
    timestamp: chrono::DateTime<chrono::Utc>,
}
