use crate::data_store::models::{FullNewArtist, FullArtist, NewArtist};
use crate::data_store::{StoreError, ArtistId};
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

#[get("/artists/create")]
pub async fn new_artist_form(req: HttpRequest) -> Result<impl Responder, AppError> {
    let form_data = ArtistFormData::default();
    let tmpl = EditArtistFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "New Artist",
        },
        form_data: &form_data,
        artist_id: None,
    };
    Ok(Html::new(tmpl.render()?))
}

#[post("/artists/create")]
pub async fn new_artist(
    state: web::Data<AppState>,
    data: Form<ArtistFormData>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let mut form_data = data.into_inner();
    let artist = form_data.validate();
    let artist_name = form_data.name.string_value().to_owned();

    let result: util::FormSubmitResult<ArtistId> = if let Some(artist) = artist {
        web::block(move || -> Result<_, StoreError> {
            let mut store = state.store.get_facade()?;
            store.create_artist(artist)
        })
        .await?
        .into()
    } else {
        util::FormSubmitResult::ValidationError
    };

    let tmpl = EditArtistFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "New Artist",
        },
        form_data: &form_data,
        artist_id: None,
    };

    util::create_edit_form_response(
        result,
        &tmpl,
        &format!("Artist {}", artist_name),
        "listed",
        |artist_id| Ok(req.url_for("show_artist", [artist_id.to_string()])?),
        &req,
    )
}

#[get("/artists/{artist_id:\\d+}/edit")]
pub async fn edit_artist_form(
    path: web::Path<ArtistId>,
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let artist_id = path.into_inner();
    let artist = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok(store.get_artist(artist_id)?)
    })
    .await??;

    let page_title = format!("Edit {}", artist.artist.name);
    let form_data: ArtistFormData = artist.into();
    let tmpl = EditArtistFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: &page_title,
        },
        form_data: &form_data,
        artist_id: Some(artist_id),
    };
    Ok(Html::new(tmpl.render()?))
}

#[post("/artists/{artist_id:\\d+}/edit")]
pub async fn edit_artist(
    path: web::Path<ArtistId>,
    state: web::Data<AppState>,
    data: Form<ArtistFormData>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let artist_id = path.into_inner();
    let store = state.store.clone();
    let old_artist = web::block(move || -> Result<_, AppError> {
        let mut store = store.get_facade()?;
        Ok(store.get_artist(artist_id)?)
    })
    .await??;

    let mut form_data = data.into_inner();
    let artist = form_data.validate();
    let artist_name = form_data.name.string_value().to_owned();

    let result: util::FormSubmitResult<()> = if let Some(artist) = artist {
        web::block(move || -> Result<_, StoreError> {
            let mut store = state.store.get_facade()?;
            store.update_artist(artist_id, artist)
        })
        .await?
        .into()
    } else {
        util::FormSubmitResult::ValidationError
    };

    let page_title = format!("Edit {}", old_artist.artist.name);
    let tmpl = EditArtistFormTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: &page_title,
        },
        form_data: &form_data,
        artist_id: Some(artist_id),
    };

    util::create_edit_form_response(
        result,
        &tmpl,
        &format!("Artist {}", artist_name),
        "updated",
        |()| Ok(req.url_for("show_artist", [artist_id.to_string()])?),
        &req,
    )
}

#[derive(Deserialize, Default)]
pub struct ArtistFormData {
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
    seeking_venue: CheckboxValue,
    seeking_description: FormValue<validation::OptionalText>,
}

impl ArtistFormData {
    fn validate(&mut self) -> Option<FullNewArtist> {
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

        Some(FullNewArtist {
            artist: NewArtist {
                name: name?.into_inner(),
                city: city?.into_inner(),
                state: state?.into_inner(),
                address: address?.into_inner(),
                phone: phone?.into_inner(),
                seeking_venue: self.seeking_venue.is_checked(),
                seeking_description: seeking_description?.into_inner(),
                website: website?.into_inner(),
                facebook_link: facebook_link?.into_inner(),
                image_link: image_link?.into_inner(),
            },
            genres: genres?.into_inner(),
        })
    }
}

impl From<FullArtist> for ArtistFormData {
    fn from(value: FullArtist) -> Self {
        let artist = value.artist;
        Self {
            name: validation::NonEmptyString(artist.name).into(),
            city: validation::NonEmptyString(artist.city).into(),
            state: validation::UsState(artist.state).into(),
            address: validation::NonEmptyString(artist.address).into(),
            phone: validation::PhoneNumber(artist.phone).into(),
            genres: validation::GenreList(value.genres).into(),
            website_link: validation::OptionalUrl(artist.website).into(),
            facebook_link: validation::OptionalUrl(artist.facebook_link).into(),
            image_link: validation::OptionalUrl(artist.image_link).into(),
            seeking_venue: artist.seeking_venue.into(),
            seeking_description: validation::OptionalText(artist.seeking_description).into(),
        }
    }
}

#[derive(Template)]
#[template(path = "edit_artist_form.html")]
struct EditArtistFormTemplate<'a> {
    base: BaseTemplateContext<'a>,
    form_data: &'a ArtistFormData,
    artist_id: Option<ArtistId>,
}

impl EditArtistFormTemplate<'_> {
    fn is_new(&self) -> bool {
        self.artist_id.is_none()
    }

    fn post_url(&self) -> Result<url::Url, AppError> {
        match self.artist_id {
            None => Ok(self.base.request.url_for_static("new_artist")?),
            Some(artist_id) => Ok(self
                .base
                .request
                .url_for("edit_artist", [artist_id.to_string()])?),
        }
    }

    fn cancel_url(&self) -> Result<url::Url, AppError> {
        match self.artist_id {
            None => Ok(self.base.request.url_for_static("artists_list")?),
            Some(artist_id) => Ok(self
                .base
                .request
                .url_for("show_artist", [artist_id.to_string()])?),
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
