//! One-shot notification messages ("flashes") for the next rendered page
//!
//! Flashes are stored in a cookie as a JSON list, so they survive the redirect after a successful
//! form submission. Endpoint handlers add flashes via [FlashesInterface::add_flash_message]. The
//! base template consumes them via [FlashesInterface::get_and_clear_flashes]. The
//! [flash_middleware] reads the cookie from the request and writes back the remaining flashes
//! into the response.
use actix_web::cookie::Cookie;
use actix_web::http::header::{HeaderValue, SET_COOKIE};
use actix_web::{HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum FlashType {
    Success,
    Error,
}

impl FlashType {
    /// CSS class for rendering the flash message box of this type
    pub fn css_class(&self) -> &'static str {
        match self {
            FlashType::Success => "flash-success",
            FlashType::Error => "flash-error",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FlashMessage {
    pub flash_type: FlashType,
    pub message: String,
}

impl FlashMessage {
    pub fn success(message: String) -> Self {
        Self {
            flash_type: FlashType::Success,
            message,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            flash_type: FlashType::Error,
            message,
        }
    }
}

struct Flashes {
    flashes: Vec<FlashMessage>,
}

const COOKIE_NAME: &str = "flash";

impl Flashes {
    fn from_cookie(request: &HttpRequest) -> Result<Self, serde_json::Error> {
        let cookie = request.cookie(COOKIE_NAME);
        if let Some(cookie) = cookie {
            Ok(Flashes {
                flashes: serde_json::from_str(cookie.value())?,
            })
        } else {
            Ok(Flashes { flashes: vec![] })
        }
    }

    fn into_cookie(self) -> Result<Cookie<'static>, serde_json::Error> {
        let mut result = if self.flashes.is_empty() {
            let mut cookie = Cookie::new(COOKIE_NAME, "");
            cookie.make_removal();
            cookie
        } else {
            Cookie::new(COOKIE_NAME, serde_json::to_string(&self.flashes)?)
        };
        result.set_path("/");
        Ok(result)
    }
}

pub trait FlashesInterface {
    fn add_flash_message(&self, flash: FlashMessage);

    fn get_and_clear_flashes(&self) -> Vec<FlashMessage>;
}

impl FlashesInterface for HttpRequest {
    fn add_flash_message(&self, flash: FlashMessage) {
        if let Some(flashes) = self.extensions_mut().get_mut::<Flashes>() {
            flashes.flashes.push(flash);
            return;
        }
        // Must not be within the `if let` statement to avoid panicking of the `extensions` RefCell
        self.extensions_mut().insert(Flashes {
            flashes: vec![flash],
        });
    }

    fn get_and_clear_flashes(&self) -> Vec<FlashMessage> {
        self.extensions_mut()
            .get_mut::<Flashes>()
            .map(|flashes| std::mem::take(&mut flashes.flashes))
            .unwrap_or_default()
    }
}

pub async fn flash_middleware(
    req: actix_web::dev::ServiceRequest,
    next: actix_web::middleware::Next<impl actix_web::body::MessageBody>,
) -> Result<actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>, actix_web::Error> {
    let had_flash_cookie = req.cookie(COOKIE_NAME).is_some();
    // Ignore errors while parsing flashes from Request
    if let Ok(flashes) = Flashes::from_cookie(req.request()) {
        req.extensions_mut().insert(flashes);
    }

    let mut response = next.call(req).await?;

    let flashes = response.request().extensions_mut().remove::<Flashes>();
    if let Some(flashes) = flashes {
        // Don't send a removal cookie if the client did not have a flash cookie in the first place
        if had_flash_cookie || !flashes.flashes.is_empty() {
            let cookie = flashes
                .into_cookie()
                .map_err(actix_web::error::ErrorInternalServerError)?;
            let val = HeaderValue::from_str(&cookie.encoded().to_string())?;
            response.headers_mut().append(SET_COOKIE, val);
        }
    }
    Ok(response)
}

// Inspiration: https://docs.rs/actix-session/latest/src/actix_session/session.rs.html
