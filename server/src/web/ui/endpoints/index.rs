use crate::data_store::models::EntitySummary;
use crate::web::ui::base_template::BaseTemplateContext;
use crate::web::ui::error::AppError;
use crate::web::ui::util::NUM_RECENT_ENTITIES;
use crate::web::AppState;
use actix_web::web::Html;
use actix_web::{get, web, HttpRequest, Responder};
use askama::Template;

#[get("/")]
pub async fn index(state: web::Data<AppState>, req: HttpRequest) -> Result<impl Responder, AppError> {
    let now = chrono::Utc::now();
    let (recent_venues, recent_artists) = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok((
            store.get_recent_venues(NUM_RECENT_ENTITIES, now)?,
            store.get_recent_artists(NUM_RECENT_ENTITIES, now)?,
        ))
    })
    .await??;

    let tmpl = IndexTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Home",
        },
        recent_venues: &recent_venues,
        recent_artists: &recent_artists,
    };
    Ok(Html::new(tmpl.render()?))
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    base: BaseTemplateContext<'a>,
    recent_venues: &'a Vec<EntitySummary>,
    recent_artists: &'a Vec<EntitySummary>,
}

impl IndexTemplate<'_> {
    fn venue_url(&self, venue: &EntitySummary) -> Result<String, AppError> {
        Ok(self
            .base
            .request
            .url_for("show_venue", [venue.id.to_string()])?
            .to_string())
    }

    fn artist_url(&self, artist: &EntitySummary) -> Result<String, AppError> {
        Ok(self
            .base
            .request
            .url_for("show_artist", [artist.id.to_string()])?
            .to_string())
    }
}
