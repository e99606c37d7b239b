use crate::data_store::models::FullShow;
use crate::web::ui::time_calculation::format_show_time;
use actix_web::error::UrlGenerationError;
use actix_web::HttpRequest;
use askama::Template;

/// Which side of a show is displayed in a [ShowCardTemplate]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShowCardSubject {
    /// Show the performing artist, e.g. on the venue page
    Artist,
    /// Show the venue, e.g. on the artist page
    Venue,
    /// Show artist and venue, e.g. in the list of all shows
    Both,
}

#[derive(Template)]
#[template(path = "sub_templates/show_card.html")]
pub struct ShowCardTemplate<'a> {
    request: &'a HttpRequest,
    show: &'a FullShow,
    subject: ShowCardSubject,
    timezone: chrono_tz::Tz,
}

impl<'a> ShowCardTemplate<'a> {
    pub fn new(
        request: &'a HttpRequest,
        show: &'a FullShow,
        subject: ShowCardSubject,
        timezone: chrono_tz::Tz,
    ) -> Self {
        Self {
            request,
            show,
            subject,
            timezone,
        }
    }

    fn image_link(&self) -> Option<&str> {
        match self.subject {
            ShowCardSubject::Venue => self.show.venue_image_link.as_deref(),
            ShowCardSubject::Artist | ShowCardSubject::Both => {
                self.show.artist_image_link.as_deref()
            }
        }
    }

    fn shows_artist(&self) -> bool {
        self.subject != ShowCardSubject::Venue
    }

    fn shows_venue(&self) -> bool {
        self.subject != ShowCardSubject::Artist
    }

    fn formatted_start_time(&self) -> String {
        format_show_time(&self.show.show.start_time, self.timezone)
    }

    fn artist_url(&self) -> Result<String, UrlGenerationError> {
        Ok(self
            .request
            .url_for("show_artist", [self.show.show.artist_id.to_string()])?
            .to_string())
    }

    fn venue_url(&self) -> Result<String, UrlGenerationError> {
        Ok(self
            .request
            .url_for("show_venue", [self.show.show.venue_id.to_string()])?
            .to_string())
    }
}

mod filters {
    pub use crate::web::ui::askama_filters::ellipsis;
}
