use crate::data_store::models::{EntitySummary, Show};
use crate::data_store::StoreError;
use crate::web::ui::base_template::BaseTemplateContext;
use crate::web::ui::error::AppError;
use crate::web::ui::form_values::FormValue;
use crate::web::ui::sub_templates::form_inputs::{
    FormFieldTemplate, InputType, SelectEntry, SelectTemplate,
};
use crate::web::ui::validation::{DateTimeLocal, Int32FromList};
use crate::web::ui::util;
use crate::web::AppState;
use actix_web::web::{Form, Html};
use actix_web::{get, post, web, HttpRequest, Responder};
use askama::Template;
use serde::Deserialize;
use std::borrow::Cow;

#[get("/shows/create")]
pub async fn new_show_form(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let timezone = state.timezone;
    let (venues, artists) = load_selectable_entities(state).await?;

    let form_data = ShowFormData::for_new_show(chrono::Utc::now(), timezone);
    let tmpl = NewShowFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "New Show",
        },
        form_data: &form_data,
        venues: &venues,
        artists: &artists,
        timezone,
    };
    Ok(Html::new(tmpl.render()?))
}

#[post("/shows/create")]
pub async fn new_show(
    state: web::Data<AppState>,
    data: Form<ShowFormData>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let timezone = state.timezone;
    let (venues, artists) = load_selectable_entities(state.clone()).await?;

    let mut form_data = data.into_inner();
    let show = form_data.validate(
        &venues.iter().map(|v| v.id).collect(),
        &artists.iter().map(|a| a.id).collect(),
        timezone,
    );

    let result: util::FormSubmitResult<()> = if let Some(show) = show {
        web::block(move || -> Result<_, StoreError> {
            let mut store = state.store.get_facade()?;
            store.create_show(show)
        })
        .await?
        .into()
    } else {
        util::FormSubmitResult::ValidationError
    };

    let tmpl = NewShowFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "New Show",
        },
        form_data: &form_data,
        venues: &venues,
        artists: &artists,
        timezone,
    };

    util::create_edit_form_response(
        result,
        &tmpl,
        "Show",
        "listed",
        |()| Ok(req.url_for_static("shows_list")?),
        &req,
    )
}

async fn load_selectable_entities(
    state: web::Data<AppState>,
) -> Result<(Vec<EntitySummary>, Vec<EntitySummary>), AppError> {
    let now = chrono::Utc::now();
    web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok((store.get_venue_list(now)?, store.get_artist_list(now)?))
    })
    .await?
}

#[derive(Deserialize)]
pub struct ShowFormData {
    venue_id: FormValue<Int32FromList>,
    artist_id: FormValue<Int32FromList>,
    start_time: FormValue<DateTimeLocal>,
}

impl ShowFormData {
    fn for_new_show(now: chrono::DateTime<chrono::Utc>, timezone: chrono_tz::Tz) -> Self {
        Self {
            venue_id: FormValue::empty(),
            artist_id: FormValue::empty(),
            start_time: DateTimeLocal(now.with_timezone(&timezone)).into(),
        }
    }

    fn validate(
        &mut self,
        venue_ids: &Vec<i32>,
        artist_ids: &Vec<i32>,
        timezone: chrono_tz::Tz,
    ) -> Option<Show> {
        let venue_id = self.venue_id.validate_with(venue_ids);
        let artist_id = self.artist_id.validate_with(artist_ids);
        let start_time = self.start_time.validate_with(timezone);

        Some(Show {
            artist_id: artist_id?.into_inner(),
            venue_id: venue_id?.into_inner(),
            start_time: start_time?.into_inner(),
        })
    }
}

#[derive(Template)]
#[template(path = "new_show_form.html")]
struct NewShowFormTemplate<'a> {
    base: BaseTemplateContext<'a>,
    form_data: &'a ShowFormData,
    venues: &'a Vec<EntitySummary>,
    artists: &'a Vec<EntitySummary>,
    timezone: chrono_tz::Tz,
}

impl<'a> NewShowFormTemplate<'a> {
    fn post_url(&self) -> Result<url::Url, AppError> {
        Ok(self.base.request.url_for_static("new_show")?)
    }

    fn time_zone_info(&self) -> String {
        format!("Local time in {}", self.timezone)
    }

    fn venue_entries(&self) -> Vec<SelectEntry<'a>> {
        select_entries(self.venues)
    }

    fn artist_entries(&self) -> Vec<SelectEntry<'a>> {
        select_entries(self.artists)
    }
}

fn select_entries(entities: &[EntitySummary]) -> Vec<SelectEntry<'_>> {
    entities
        .iter()
        .map(|e| SelectEntry {
            value: Cow::Owned(e.id.to_string()),
            text: Cow::Borrowed(e.name.as_str()),
        })
        .collect()
}
