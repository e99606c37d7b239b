use crate::data_store::models::{FullArtist, FullShow};
use crate::data_store::ArtistId;
use crate::web::ui::base_template::BaseTemplateContext;
use crate::web::ui::error::AppError;
use crate::web::ui::sub_templates::show_card::{ShowCardSubject, ShowCardTemplate};
use crate::web::ui::time_calculation::{partition_shows, PartitionedShows};
use crate::web::AppState;
use actix_web::web::Html;
use actix_web::{get, web, HttpRequest, Responder};
use askama::Template;

#[get("/artists/{artist_id:\\d+}")]
pub async fn show_artist(
    path: web::Path<ArtistId>,
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let artist_id = path.into_inner();
    let now = chrono::Utc::now();
    let timezone = state.timezone;
    let (artist, shows) = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok((store.get_artist(artist_id)?, store.get_artist_shows(artist_id)?))
    })
    .await??;

    let shows = partition_shows(shows, now);
    let tmpl = ShowArtistTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: &artist.artist.name,
        },
        artist: &artist,
        shows: &shows,
        timezone,
    };
    Ok(Html::new(tmpl.render()?))
}

#[derive(Template)]
#[template(path = "show_artist.html")]
struct ShowArtistTemplate<'a> {
    base: BaseTemplateContext<'a>,
    artist: &'a FullArtist,
    shows: &'a PartitionedShows,
    timezone: chrono_tz::Tz,
}

impl<'a> ShowArtistTemplate<'a> {
    fn show_cards(&self, shows: &'a [FullShow]) -> Vec<ShowCardTemplate<'a>> {
        shows
            .iter()
            .map(|show| {
                ShowCardTemplate::new(
                    self.base.request,
                    show,
                    ShowCardSubject::Venue,
                    self.timezone,
                )
            })
            .collect()
    }

    fn edit_url(&self) -> Result<url::Url, AppError> {
        Ok(self
            .base
            .request
            .url_for("edit_artist_form", [self.artist.artist.id.to_string()])?)
    }

    fn delete_url(&self) -> Result<url::Url, AppError> {
        Ok(self
            .base
            .request
            .url_for("delete_artist_form", [self.artist.artist.id.to_string()])?)
    }
}
