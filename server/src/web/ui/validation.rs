use crate::web::ui::form_values::{FormInputValidator, FormRepresentation, FromFormInput};
use chrono::TimeZone;
use lazy_static::lazy_static;
use std::fmt::Debug;

/// Two-letter codes of the US states (and the federal district), as offered in the venue and
/// artist forms
pub const US_STATES: [&str; 51] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH", "OK", "OR",
    "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA",
    "WV", "WI", "WY",
];

// Maximum lengths in characters, as limited by the database columns
pub const MAX_GENRE_LENGTH: usize = 128;
pub const MAX_NAME_LENGTH: usize = 256;
pub const MAX_ADDRESS_LENGTH: usize = 512;
pub const MAX_PHONE_LENGTH: usize = 32;
pub const MAX_URL_LENGTH: usize = 512;

fn check_length(value: &str, max_length: usize) -> Result<(), String> {
    if value.chars().count() > max_length {
        Err(format!("Must not be longer than {} characters", max_length))
    } else {
        Ok(())
    }
}

/// Required text of at most `MAX_LENGTH` characters
#[derive(Default, Debug)]
pub struct NonEmptyString<const MAX_LENGTH: usize>(pub String);

/// Name or city of a venue or artist
pub type Name = NonEmptyString<MAX_NAME_LENGTH>;
pub type Address = NonEmptyString<MAX_ADDRESS_LENGTH>;

impl<const MAX_LENGTH: usize> NonEmptyString<MAX_LENGTH> {
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl<const MAX_LENGTH: usize> FormRepresentation for NonEmptyString<MAX_LENGTH> {
    fn to_form_string(self) -> String {
        self.0
    }
}

impl<const MAX_LENGTH: usize> FromFormInput for NonEmptyString<MAX_LENGTH> {
    fn from_form_input(value: &str) -> Result<Self, String> {
        let value = value.trim();
        if value.is_empty() {
            return Err("Must not be empty".to_owned());
        }
        check_length(value, MAX_LENGTH)?;
        Ok(Self(value.to_owned()))
    }
}

/// Optional free text: Empty (or whitespace-only) input is represented as `None`
#[derive(Default, Debug, PartialEq)]
pub struct OptionalText(pub Option<String>);

impl OptionalText {
    pub fn into_inner(self) -> Option<String> {
        self.0
    }
}

impl FormRepresentation for OptionalText {
    fn to_form_string(self) -> String {
        self.0.unwrap_or_default()
    }
}

impl FromFormInput for OptionalText {
    fn from_form_input(value: &str) -> Result<Self, String> {
        let value = value.trim();
        Ok(Self(if value.is_empty() {
            None
        } else {
            Some(value.to_owned())
        }))
    }
}

#[derive(Default, Debug, PartialEq)]
pub struct UsState(pub String);

impl UsState {
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FormRepresentation for UsState {
    fn to_form_string(self) -> String {
        self.0
    }
}

impl FromFormInput for UsState {
    fn from_form_input(value: &str) -> Result<Self, String> {
        let value = value.trim().to_uppercase();
        if US_STATES.contains(&value.as_str()) {
            Ok(Self(value))
        } else {
            Err("Not a known US state".to_owned())
        }
    }
}

#[derive(Default, Debug, PartialEq)]
pub struct PhoneNumber(pub String);

impl PhoneNumber {
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FormRepresentation for PhoneNumber {
    fn to_form_string(self) -> String {
        self.0
    }
}

impl FromFormInput for PhoneNumber {
    fn from_form_input(value: &str) -> Result<Self, String> {
        lazy_static! {
            static ref RE: regex::Regex =
                regex::Regex::new(r"^\+?[0-9][0-9 ()./-]{5,29}[0-9]$").unwrap();
        }
        let value = value.trim();
        if RE.is_match(value) {
            Ok(Self(value.to_owned()))
        } else {
            Err("Not a valid phone number (e.g. 123-123-1234)".to_owned())
        }
    }
}

/// An optional absolute http(s) URL, e.g. for website, Facebook or image links
#[derive(Default, Debug, PartialEq)]
pub struct OptionalUrl(pub Option<String>);

impl OptionalUrl {
    pub fn into_inner(self) -> Option<String> {
        self.0
    }
}

impl FormRepresentation for OptionalUrl {
    fn to_form_string(self) -> String {
        self.0.unwrap_or_default()
    }
}

impl FromFormInput for OptionalUrl {
    fn from_form_input(value: &str) -> Result<Self, String> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(Self(None));
        }
        check_length(value, MAX_URL_LENGTH)?;
        let url = url::Url::parse(value).map_err(|e| format!("Not a valid URL: {}", e))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err("URL must start with http:// or https://".to_owned());
        }
        Ok(Self(Some(value.to_owned())))
    }
}

/// A comma-separated list of genre tags
///
/// Tags are trimmed. Empty tags are dropped, so the empty string represents an empty list.
#[derive(Default, Debug, PartialEq)]
pub struct GenreList(pub Vec<String>);

impl GenreList {
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl FormRepresentation for GenreList {
    fn to_form_string(self) -> String {
        self.0.join(", ")
    }
}

impl FromFormInput for GenreList {
    fn from_form_input(value: &str) -> Result<Self, String> {
        let genres = value
            .split(',')
            .map(|g| g.trim())
            .filter(|g| !g.is_empty())
            .map(|g| {
                if g.chars().count() > MAX_GENRE_LENGTH {
                    Err(format!(
                        "Genre '{}…' is longer than {} characters",
                        g.chars().take(20).collect::<String>(),
                        MAX_GENRE_LENGTH
                    ))
                } else {
                    Ok(g.to_owned())
                }
            })
            .collect::<Result<Vec<String>, String>>()?;
        Ok(Self(genres))
    }
}

#[derive(Default, Debug, PartialEq)]
pub struct Int32FromList(pub i32);

impl Int32FromList {
    pub fn into_inner(self) -> i32 {
        self.0
    }
}

impl FormRepresentation for Int32FromList {
    fn to_form_string(self) -> String {
        self.0.to_string()
    }
}

impl FormInputValidator<Int32FromList> for &Vec<i32> {
    fn validate_input(self, value: &str) -> Result<Int32FromList, String> {
        let id: i32 = value.parse().map_err(|e| format!("Not an id: {}", e))?;
        if self.contains(&id) {
            Ok(Int32FromList(id))
        } else {
            Err("Unknown id".to_owned())
        }
    }
}

/// A local date and time, as submitted by an HTML `datetime-local` input, interpreted in the given
/// time zone
#[derive(Debug, PartialEq)]
pub struct DateTimeLocal(pub chrono::DateTime<chrono_tz::Tz>);

impl DateTimeLocal {
    pub fn into_inner(self) -> chrono::DateTime<chrono::Utc> {
        self.0.with_timezone(&chrono::Utc)
    }
}

impl FormRepresentation for DateTimeLocal {
    fn to_form_string(self) -> String {
        self.0.naive_local().format("%Y-%m-%dT%H:%M").to_string()
    }
}

impl FormInputValidator<DateTimeLocal> for chrono_tz::Tz {
    fn validate_input(self, value: &str) -> Result<DateTimeLocal, String> {
        // See https://developer.mozilla.org/en-US/docs/Web/HTML/Guides/Date_and_time_formats#local_date_and_time_strings
        let value = value.trim();
        let naive = chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
            .or_else(|_| chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
            .or_else(|_| chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S"))
            .or_else(|_| chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M"))
            .map_err(|_| "Not a valid date and time (YYYY-MM-DDTHH:MM)".to_owned())?;
        // Ambiguous local times (end of daylight saving time) resolve to the earlier instant
        self.from_local_datetime(&naive)
            .earliest()
            .map(DateTimeLocal)
            .ok_or_else(|| format!("{} does not exist in time zone {}", naive, self.name()))
    }
}
