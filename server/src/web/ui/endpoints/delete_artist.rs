use crate::data_store::models::FullArtist;
use crate::data_store::ArtistId;
use crate::web::ui::base_template::BaseTemplateContext;
use crate::web::ui::error::AppError;
use crate::web::ui::flash::{FlashMessage, FlashesInterface};
use crate::web::AppState;
use actix_web::web::{Html, Redirect};
use actix_web::{delete, get, post, web, HttpRequest, Responder};
use askama::Template;

#[get("/artists/{artist_id:\\d+}/delete")]
pub async fn delete_artist_form(
    path: web::Path<ArtistId>,
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let artist_id = path.into_inner();
    let (artist, num_shows) = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok((
            store.get_artist(artist_id)?,
            store.get_artist_shows(artist_id)?.len(),
        ))
    })
    .await??;

    let page_title = format!("Delete {}", artist.artist.name);
    let tmpl = DeleteArtistFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: &page_title,
        },
        artist: &artist,
        num_shows,
    };
    Ok(Html::new(tmpl.render()?))
}

#[post("/artists/{artist_id:\\d+}/delete")]
pub async fn delete_artist(
    path: web::Path<ArtistId>,
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    delete_artist_and_redirect(path.into_inner(), state, &req).await
}

/// Deletion via the HTTP DELETE method, e.g. from a `fetch()` call in the browser. Responds with
/// the same redirect as the form-based deletion.
#[delete("/artists/{artist_id:\\d+}")]
pub async fn delete_artist_by_method(
    path: web::Path<ArtistId>,
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    delete_artist_and_redirect(path.into_inner(), state, &req).await
}

async fn delete_artist_and_redirect(
    artist_id: ArtistId,
    state: web::Data<AppState>,
    req: &HttpRequest,
) -> Result<Redirect, AppError> {
    let result = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        let artist = store.get_artist(artist_id)?;
        store.delete_artist(artist_id)?;
        Ok(artist.artist.name)
    })
    .await?;

    match result {
        Ok(artist_name) => {
            req.add_flash_message(FlashMessage::success(format!(
                "Artist {} was successfully deleted.",
                artist_name
            )));
            Ok(Redirect::to(req.url_for_static("artists_list")?.to_string()).see_other())
        }
        Err(AppError::TransactionConflict) => {
            req.add_flash_message(FlashMessage::error(
                "An error occurred. The artist could not be deleted due to a concurrent database access. Please retry.".to_owned(),
            ));
            Ok(Redirect::to(
                req.url_for("show_artist", [artist_id.to_string()])?
                    .to_string(),
            )
            .see_other())
        }
        Err(e) => Err(e),
    }
}

#[derive(Template)]
#[template(path = "delete_artist_form.html")]
struct DeleteArtistFormTemplate<'a> {
    base: BaseTemplateContext<'a>,
    artist: &'a FullArtist,
    num_shows: usize,
}

impl DeleteArtistFormTemplate<'_> {
    fn post_url(&self) -> Result<url::Url, AppError> {
        Ok(self
            .base
            .request
            .url_for("delete_artist", [self.artist.artist.id.to_string()])?)
    }

    fn cancel_url(&self) -> Result<url::Url, AppError> {
        Ok(self
            .base
            .request
            .url_for("show_artist", [self.artist.artist.id.to_string()])?)
    }
}
