use crate::data_store::models::{FullShow, FullVenue};
use crate::data_store::VenueId;
use crate::web::ui::base_template::BaseTemplateContext;
use crate::web::ui::error::AppError;
use crate::web::ui::sub_templates::show_card::{ShowCardSubject, ShowCardTemplate};
use crate::web::ui::time_calculation::{partition_shows, PartitionedShows};
use crate::web::AppState;
use actix_web::web::Html;
use actix_web::{get, web, HttpRequest, Responder};
use askama::Template;

#[get("/venues/{venue_id:\\d+}")]
pub async fn show_venue(
    path: web::Path<VenueId>,
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let venue_id = path.into_inner();
    let now = chrono::Utc::now();
    let timezone = state.timezone;
    let (venue, shows) = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok((store.get_venue(venue_id)?, store.get_venue_shows(venue_id)?))
    })
    .await??;

    let shows = partition_shows(shows, now);
    let tmpl = ShowVenueTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: &venue.venue.name,
        },
        venue: &venue,
        shows: &shows,
        timezone,
    };
    Ok(Html::new(tmpl.render()?))
}

#[derive(Template)]
#[template(path = "show_venue.html")]
struct ShowVenueTemplate<'a> {
    base: BaseTemplateContext<'a>,
    venue: &'a FullVenue,
    shows: &'a PartitionedShows,
    timezone: chrono_tz::Tz,
}

impl<'a> ShowVenueTemplate<'a> {
    fn show_cards(&self, shows: &'a [FullShow]) -> Vec<ShowCardTemplate<'a>> {
        shows
            .iter()
            .map(|show| {
                ShowCardTemplate::new(
                    self.base.request,
                    show,
                    ShowCardSubject::Artist,
                    self.timezone,
                )
            })
            .collect()
    }

    fn edit_url(&self) -> Result<url::Url, AppError> {
        Ok(self
            .base
            .request
            .url_for("edit_venue_form", [self.venue.venue.id.to_string()])?)
    }

    fn delete_url(&self) -> Result<url::Url, AppError> {
        Ok(self
            .base
            .request
            .url_for("delete_venue_form", [self.venue.venue.id.to_string()])?)
    }
}
