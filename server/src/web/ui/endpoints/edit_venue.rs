use crate::data_store::models::{FullNewVenue, FullVenue, NewVenue};
use crate::data_store::{StoreError, VenueId};
use crate::web::ui::base_template::BaseTemplateContext;
use crate::web::ui::error::AppError;
use crate::web::ui::form_values::{CheckboxValue, FormValue};
use crate::web::ui::sub_templates::form_inputs::{
    CheckboxTemplate, FormFieldTemplate, InputType, SelectEntry, SelectTemplate,
};
use crate::web::ui::validation::US_STATES;
use crate::web::ui::{util, validation};
use crate::web::AppState;
use actix_web::web::{Form, Html};
use actix_web::{get, post, web, HttpRequest, Responder};
use askama::Template;
use serde::Deserialize;
use std::borrow::Cow;

#[get("/venues/create")]
pub async fn new_venue_form(req: HttpRequest) -> Result<impl Responder, AppError> {
    let form_data = VenueFormData::default();
    let tmpl = EditVenueFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "New Venue",
        },
        form_data: &form_data,
        venue_id: None,
    };
    Ok(Html::new(tmpl.render()?))
}

#[post("/venues/create")]
pub async fn new_venue(
    state: web::Data<AppState>,
    data: Form<VenueFormData>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let mut form_data = data.into_inner();
    let venue = form_data.validate();
    let venue_name = form_data.name.string_value().to_owned();

    let result: util::FormSubmitResult<VenueId> = if let Some(venue) = venue {
        web::block(move || -> Result<_, StoreError> {
            let mut store = state.store.get_facade()?;
            store.create_venue(venue)
        })
        .await?
        .into()
    } else {
        util::FormSubmitResult::ValidationError
    };

    let tmpl = EditVenueFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "New Venue",
        },
        form_data: &form_data,
        venue_id: None,
    };

    util::create_edit_form_response(
        result,
        &tmpl,
        &format!("Venue {}", venue_name),
        "listed",
        |venue_id| Ok(req.url_for("show_venue", [venue_id.to_string()])?),
        &req,
    )
}

#[get("/venues/{venue_id:\\d+}/edit")]
pub async fn edit_venue_form(
    path: web::Path<VenueId>,
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let venue_id = path.into_inner();
    let venue = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok(store.get_venue(venue_id)?)
    })
    .await??;

    let page_title = format!("Edit {}", venue.venue.name);
    let form_data: VenueFormData = venue.into();
    let tmpl = EditVenueFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: &page_title,
        },
        form_data: &form_data,
        venue_id: Some(venue_id),
    };
    Ok(Html::new(tmpl.render()?))
}

#[post("/venues/{venue_id:\\d+}/edit")]
pub async fn edit_venue(
    path: web::Path<VenueId>,
    state: web::Data<AppState>,
    data: Form<VenueFormData>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let venue_id = path.into_inner();
    let store = state.store.clone();
    let old_venue = web::block(move || -> Result<_, AppError> {
        let mut store = store.get_facade()?;
        Ok(store.get_venue(venue_id)?)
    })
    .await??;

    let mut form_data = data.into_inner();
    let venue = form_data.validate();
    let venue_name = form_data.name.string_value().to_owned();

    let result: util::FormSubmitResult<()> = if let Some(venue) = venue {
        web::block(move || -> Result<_, StoreError> {
            let mut store = state.store.get_facade()?;
            store.update_venue(venue_id, venue)
        })
        .await?
        .into()
    } else {
        util::FormSubmitResult::ValidationError
    };

    let page_title = format!("Edit {}", old_venue.venue.name);
    let tmpl = EditVenueFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: &page_title,
        },
        form_data: &form_data,
        venue_id: Some(venue_id),
    };

    util::create_edit_form_response(
        result,
        &tmpl,
        &format!("Venue {}", venue_name),
        "updated",
        |()| Ok(req.url_for("show_venue", [venue_id.to_string()])?),
        &req,
    )
}

#[derive(Deserialize, Default)]
pub struct VenueFormData {
    name: FormValue<validation::Name>,
    city: FormValue<validation::Name>,
    state: FormValue<validation::UsState>,
    address: FormValue<validation::Address>,
    phone: FormValue<validation::PhoneNumber>,
    genres: FormValue<validation::GenreList>,
    website_link: FormValue<validation::OptionalUrl>,
    facebook_link: FormValue<validation::OptionalUrl>,
    image_link: FormValue<validation::OptionalUrl>,
    #[serde(default)]
    seeking_talent: CheckboxValue,
    seeking_description: FormValue<validation::OptionalText>,
}

impl VenueFormData {
    fn validate(&mut self) -> Option<FullNewVenue> {
        let name = self.name.validate();
        let city = self.city.validate();
        let state = self.state.validate();
        let address = self.address.validate();
        let phone = self.phone.validate();
        let genres = self.genres.validate();
        let website = self.website_link.validate();
        let facebook_link = self.facebook_link.validate();
        let image_link = self.image_link.validate();
        let seeking_description = self.seeking_description.validate();

        Some(FullNewVenue {
            venue: NewVenue {
                name: name?.into_inner(),
                city: city?.into_inner(),
                state: state?.into_inner(),
                address: address?.into_inner(),
                phone: phone?.into_inner(),
                seeking_talent: self.seeking_talent.is_checked(),
                seeking_description: seeking_description?.into_inner(),
                website: website?.into_inner(),
                facebook_link: facebook_link?.into_inner(),
                image_link: image_link?.into_inner(),
            },
            genres: genres?.into_inner(),
        })
    }
}

impl From<FullVenue> for VenueFormData {
    fn from(value: FullVenue) -> Self {
        let venue = value.venue;
        Self {
            name: validation::NonEmptyString(venue.name).into(),
            city: validation::NonEmptyString(venue.city).into(),
            state: validation::UsState(venue.state).into(),
            address: validation::NonEmptyString(venue.address).into(),
            phone: validation::PhoneNumber(venue.phone).into(),
            genres: validation::GenreList(value.genres).into(),
            website_link: validation::OptionalUrl(venue.website).into(),
            facebook_link: validation::OptionalUrl(venue.facebook_link).into(),
            image_link: validation::OptionalUrl(venue.image_link).into(),
            seeking_talent: venue.seeking_talent.into(),
            seeking_description: validation::OptionalText(venue.seeking_description).into(),
        }
    }
}

#[derive(Template)]
#[template(path = "edit_venue_form.html")]
struct EditVenueFormTemplate<'a> {
    base: BaseTemplateContext<'a>,
    form_data: &'a VenueFormData,
    venue_id: Option<VenueId>,
}

impl EditVenueFormTemplate<'_> {
    fn is_new(&self) -> bool {
        self.venue_id.is_none()
    }

    fn post_url(&self) -> Result<url::Url, AppError> {
        match self.venue_id {
            None => Ok(self.base.request.url_for_static("new_venue")?),
            Some(venue_id) => Ok(self
                .base
                .request
                .url_for("edit_venue", [venue_id.to_string()])?),
        }
    }

    fn cancel_url(&self) -> Result<url::Url, AppError> {
        match self.venue_id {
            None => Ok(self.base.request.url_for_static("venues_list")?),
            Some(venue_id) => Ok(self
                .base
                .request
                .url_for("show_venue", [venue_id.to_string()])?),
        }
    }

    fn state_entries(&self) -> Vec<SelectEntry<'static>> {
        US_STATES
            .iter()
            .map(|s| SelectEntry {
                value: Cow::Borrowed(*s),
                text: Cow::Borrowed(*s),
            })
            .collect()
    }
}
