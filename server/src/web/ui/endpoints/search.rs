use crate::data_store::models::EntitySummary;
use crate::web::ui::base_template::BaseTemplateContext;
use crate::web::ui::error::AppError;
use crate::web::AppState;
use actix_web::web::{Form, Html};
use actix_web::{post, web, HttpRequest, Responder};
use askama::Template;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct SearchFormData {
    #[serde(default)]
    search_term: String,
}

#[post("/venues/search")]
pub async fn search_venues(
    state: web::Data<AppState>,
    data: Form<SearchFormData>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let search_term = data.into_inner().search_term.trim().to_owned();
    let term = search_term.clone();
    let now = chrono::Utc::now();
    let results = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok(store.search_venues(&term, now)?)
    })
    .await??;

    let tmpl = SearchResultsTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Venue Search",
        },
        search_term: &search_term,
        results: &results,
        kind: SearchKind::Venues,
    };
    Ok(Html::new(tmpl.render()?))
}

#[post("/artists/search")]
pub async fn search_artists(
    state: web::Data<AppState>,
    data: Form<SearchFormData>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let search_term = data.into_inner().search_term.trim().to_owned();
    let term = search_term.clone();
    let now = chrono::Utc::now();
    let results = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok(store.search_artists(&term, now)?)
    })
    .await??;

    let tmpl = SearchResultsTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Artist Search",
        },
        search_term: &search_term,
        results: &results,
        kind: SearchKind::Artists,
    };
    Ok(Html::new(tmpl.render()?))
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SearchKind {
    Venues,
    Artists,
}

#[derive(Template)]
#[template(path = "search_results.html")]
struct SearchResultsTemplate<'a> {
    base: BaseTemplateContext<'a>,
    search_term: &'a str,
    results: &'a Vec<EntitySummary>,
    kind: SearchKind,
}

impl SearchResultsTemplate<'_> {
    fn entity_plural(&self) -> &'static str {
        match self.kind {
            SearchKind::Venues => "venues",
            SearchKind::Artists => "artists",
        }
    }

    fn search_url(&self) -> Result<url::Url, AppError> {
        let route = match self.kind {
            SearchKind::Venues => "search_venues",
            SearchKind::Artists => "search_artists",
        };
        Ok(self.base.request.url_for_static(route)?)
    }

    fn result_url(&self, entity: &EntitySummary) -> Result<url::Url, AppError> {
        let route = match self.kind {
            SearchKind::Venues => "show_venue",
            SearchKind::Artists => "show_artist",
        };
        Ok(self.base.request.url_for(route, [entity.id.to_string()])?)
    }
}
