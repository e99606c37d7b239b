use crate::web::ui::flash::{FlashMessage, FlashesInterface};
use crate::web::ui::Resources;
use actix_web::error::UrlGenerationError;
use actix_web::HttpRequest;

/// Template context of the `base.html` layout. Every page template embeds it as field `base`.
#[derive(Debug)]
pub struct BaseTemplateContext<'a> {
    pub request: &'a HttpRequest,
    /// HTML title, suffixed with the application name
    pub page_title: &'a str,
}

/// Entries of the navigation bar: route name, label and whether the entry is an action (shown on
/// the right side)
const NAV_ENTRIES: [(&str, &str, bool); 6] = [
    ("venues_list", "Venues", false),
    ("artists_list", "Artists", false),
    ("shows_list", "Shows", false),
    ("new_venue_form", "List a venue", true),
    ("new_artist_form", "List an artist", true),
    ("new_show_form", "Post a show", true),
];

pub struct NavLink {
    pub url: String,
    pub label: &'static str,
    /// The current page is this entry's page or a subpage of it
    pub active: bool,
}

impl BaseTemplateContext<'_> {
    /// URL of an embedded static file with its content hash as query parameter, so browsers may
    /// cache it for long
    pub fn url_for_static(&self, file: &str) -> Result<String, UrlGenerationError> {
        let mut url = self.request.url_for("static_resources", [file])?;
        if let Some(resource) = Resources::get(file) {
            let version: String = resource.metadata.sha256_hash()[..8]
                .iter()
                .map(|b| format!("{:02x}", b))
                .collect();
            url.query_pairs_mut().append_pair("v", &version);
        }
        Ok(url.to_string())
    }

    /// URL of a named route without path parameters
    pub fn url_for_page(&self, name: &str) -> Result<String, UrlGenerationError> {
        Ok(self.request.url_for_static(name)?.to_string())
    }

    pub fn nav_links(&self, actions: bool) -> Result<Vec<NavLink>, UrlGenerationError> {
        let current_path = self.request.path();
        NAV_ENTRIES
            .iter()
            .filter(|(_, _, is_action)| *is_action == actions)
            .map(|(name, label, _)| {
                let url = self.request.url_for_static(name)?;
                Ok(NavLink {
                    active: current_path == url.path()
                        || (!actions && current_path.starts_with(&format!("{}/", url.path()))),
                    url: url.to_string(),
                    label: *label,
                })
            })
            .collect()
    }

    pub fn get_flashes(&self) -> Vec<FlashMessage> {
        self.request.get_and_clear_flashes()
    }
}
