use crate::data_store::models::FullVenue;
use crate::data_store::VenueId;
use crate::web::ui::base_template::BaseTemplateContext;
use crate::web::ui::error::AppError;
use crate::web::ui::flash::{FlashMessage, FlashesInterface};
use crate::web::AppState;
use actix_web::web::{Html, Redirect};
use actix_web::{delete, get, post, web, HttpRequest, Responder};
use askama::Template;

#[get("/venues/{venue_id:\\d+}/delete")]
pub async fn delete_venue_form(
    path: web::Path<VenueId>,
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let venue_id = path.into_inner();
    let (venue, num_shows) = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok((
            store.get_venue(venue_id)?,
            store.get_venue_shows(venue_id)?.len(),
        ))
    })
    .await??;

    let page_title = format!("Delete {}", venue.venue.name);
    let tmpl = DeleteVenueFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: &page_title,
        },
        venue: &venue,
        num_shows,
    };
    Ok(Html::new(tmpl.render()?))
}

#[post("/venues/{venue_id:\\d+}/delete")]
pub async fn delete_venue(
    path: web::Path<VenueId>,
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    delete_venue_and_redirect(path.into_inner(), state, &req).await
}

/// Deletion via the HTTP DELETE method, e.g. from a `fetch()` call in the browser. Responds with
/// the same redirect as the form-based deletion.
#[delete("/venues/{venue_id:\\d+}")]
pub async fn delete_venue_by_method(
    path: web::Path<VenueId>,
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    delete_venue_and_redirect(path.into_inner(), state, &req).await
}

async fn delete_venue_and_redirect(
    venue_id: VenueId,
    state: web::Data<AppState>,
    req: &HttpRequest,
) -> Result<Redirect, AppError> {
    let result = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        let venue = store.get_venue(venue_id)?;
        store.delete_venue(venue_id)?;
        Ok(venue.venue.name)
    })
    .await?;

    match result {
        Ok(venue_name) => {
            req.add_flash_message(FlashMessage::success(format!(
                "Venue {} was successfully deleted.",
                venue_name
            )));
            Ok(Redirect::to(req.url_for_static("venues_list")?.to_string()).see_other())
        }
        Err(AppError::TransactionConflict) => {
            req.add_flash_message(FlashMessage::error(
                "An error occurred. The venue could not be deleted due to a concurrent database access. Please retry.".to_owned(),
            ));
            Ok(Redirect::to(
                req.url_for("show_venue", [venue_id.to_string()])?
                    .to_string(),
            )
            .see_other())
        }
        Err(e) => Err(e),
    }
}

#[derive(Template)]
#[template(path = "delete_venue_form.html")]
struct DeleteVenueFormTemplate<'a> {
    base: BaseTemplateContext<'a>,
    venue: &'a FullVenue,
    num_shows: usize,
}

impl DeleteVenueFormTemplate<'_> {
    fn post_url(&self) -> Result<url::Url, AppError> {
        Ok(self
            .base
            .request
            .url_for("delete_venue", [self.venue.venue.id.to_string()])?)
    }

    fn cancel_url(&self) -> Result<url::Url, AppError> {
        Ok(self
            .base
            .request
            .url_for("show_venue", [self.venue.venue.id.to_string()])?)
    }
}
