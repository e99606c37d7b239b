use crate::data_store::models::FullShow;
use crate::web::ui::base_template::BaseTemplateContext;
use crate::web::ui::error::AppError;
use crate::web::ui::sub_templates::show_card::{ShowCardSubject, ShowCardTemplate};
use crate::web::AppState;
use actix_web::web::Html;
use actix_web::{get, web, HttpRequest, Responder};
use askama::Template;

#[get("/shows")]
pub async fn shows_list(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let timezone = state.timezone;
    let shows = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok(store.get_shows()?)
    })
    .await??;

    let tmpl = ShowsListTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Shows",
        },
        shows: &shows,
        timezone,
    };
    Ok(Html::new(tmpl.render()?))
}

#[derive(Template)]
#[template(path = "shows_list.html")]
struct ShowsListTemplate<'a> {
    base: BaseTemplateContext<'a>,
    shows: &'a Vec<FullShow>,
    timezone: chrono_tz::Tz,
}

impl<'a> ShowsListTemplate<'a> {
    fn show_cards(&self) -> Vec<ShowCardTemplate<'a>> {
        self.shows
            .iter()
            .map(|show| {
                ShowCardTemplate::new(self.base.request, show, ShowCardSubject::Both, self.timezone)
            })
            .collect()
    }
}
