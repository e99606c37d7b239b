use crate::data_store::models::{EntitySummary, VenueArea};
use crate::web::ui::base_template::BaseTemplateContext;
use crate::web::ui::error::AppError;
use crate::web::AppState;
use actix_web::web::Html;
use actix_web::{get, web, HttpRequest, Responder};
use askama::Template;

#[get("/venues")]
pub async fn venues_list(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let now = chrono::Utc::now();
    let areas = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok(store.get_venue_areas(now)?)
    })
    .await??;

    let tmpl = VenuesListTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Venues",
        },
        areas: &areas,
    };
    Ok(Html::new(tmpl.render()?))
}

#[derive(Template)]
#[template(path = "venues_list.html")]
struct VenuesListTemplate<'a> {
    base: BaseTemplateContext<'a>,
    areas: &'a Vec<VenueArea>,
}

impl VenuesListTemplate<'_> {
    fn venue_url(&self, venue: &EntitySummary) -> Result<String, AppError> {
        Ok(self
            .base
            .request
            .url_for("show_venue", [venue.id.to_string()])?
            .to_string())
    }
}
