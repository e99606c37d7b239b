//! The server-rendered HTML user interface
//!
//! All endpoints are registered in one actix-web scope (see [configure_app]), which is wrapped in
//! the middlewares for flash messages, error logging and error pages.
use crate::web::http_error_logging::error_logging_middleware;
use actix_web::http::header::{CacheControl, CacheDirective};
use actix_web::middleware::from_fn;
use actix_web::{get, web, HttpResponse, Responder};
use error::AppError;
use error_page::error_page_middleware;
use flash::flash_middleware;
use rust_embed::Embed;

mod askama_filters;
mod base_template;
mod endpoints;
pub mod error;
mod error_page;
mod flash;
mod form_values;
mod sub_templates;
#[cfg(test)]
mod tests;
mod time_calculation;
mod util;
mod validation;

pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.service(
        get_ui_service()
            .wrap(from_fn(error_logging_middleware))
            .wrap(from_fn(flash_middleware))
            .wrap(from_fn(error_page_middleware)),
    );
}

fn get_ui_service() -> actix_web::Scope {
    web::scope("")
        .service(static_resources)
        .service(endpoints::index::index)
        .service(endpoints::venues_list::venues_list)
        .service(endpoints::search::search_venues)
        .service(endpoints::edit_venue::new_venue_form)
        .service(endpoints::edit_venue::new_venue)
        .service(endpoints::show_venue::show_venue)
        .service(endpoints::edit_venue::edit_venue_form)
        .service(endpoints::edit_venue::edit_venue)
        .service(endpoints::delete_venue::delete_venue_form)
        .service(endpoints::delete_venue::delete_venue)
        .service(endpoints::delete_venue::delete_venue_by_method)
        .service(endpoints::artists_list::artists_list)
        .service(endpoints::search::search_artists)
        .service(endpoints::edit_artist::new_artist_form)
        .service(endpoints::edit_artist::new_artist)
        .service(endpoints::show_artist::show_artist)
        .service(endpoints::edit_artist::edit_artist_form)
        .service(endpoints::edit_artist::edit_artist)
        .service(endpoints::delete_artist::delete_artist_form)
        .service(endpoints::delete_artist::delete_artist)
        .service(endpoints::delete_artist::delete_artist_by_method)
        .service(endpoints::shows_list::shows_list)
        .service(endpoints::new_show::new_show_form)
        .service(endpoints::new_show::new_show)
        .default_service(web::to(not_found_handler))
}

#[derive(Embed)]
#[folder = "static/"]
struct Resources;

impl Resources {
    fn handle_embedded_file(path: &str) -> HttpResponse {
        match Self::get(path) {
            Some(content) => HttpResponse::Ok()
                .content_type(mime_guess::from_path(path).first_or_octet_stream().as_ref())
                .append_header(CacheControl(vec![CacheDirective::MaxAge(86400 * 365)]))
                .body(content.data.into_owned()),
            None => {
                HttpResponse::NotFound().body(format!("Static resource file '{}' not found", path))
            }
        }
    }
}

#[get("/static/{_:.*}")]
async fn static_resources(path: web::Path<String>) -> impl Responder {
    Resources::handle_embedded_file(path.as_str())
}

async fn not_found_handler() -> Result<&'static str, AppError> {
    Err(AppError::PageNotFound)
}
