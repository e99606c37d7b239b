use crate::data_store::{ArtistId, VenueId};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

#[derive(Clone, Debug, Queryable, Selectable, Identifiable)]
#[diesel(table_name=super::schema::venues)]
pub struct Venue {
    pub id: VenueId,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
}

// `treat_none_as_null` is required for clearing optional links when updating an existing venue
#[derive(Clone, Debug, Insertable, AsChangeset)]
#[diesel(table_name=super::schema::venues)]
#[diesel(treat_none_as_null = true)]
pub struct NewVenue {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
}

impl From<Venue> for NewVenue {
    fn from(value: Venue) -> Self {
        Self {
            name: value.name,
            city: value.city,
            state: value.state,
            address: value.address,
            phone: value.phone,
            seeking_talent: value.seeking_talent,
            seeking_description: value.seeking_description,
            website: value.website,
            facebook_link: value.facebook_link,
            image_link: value.image_link,
        }
    }
}

/// A venue together with its genre tags (in insertion order)
#[derive(Clone, Debug)]
pub struct FullVenue {
    pub venue: Venue,
    pub genres: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct FullNewVenue {
    pub venue: NewVenue,
    pub genres: Vec<String>,
}

impl From<FullVenue> for FullNewVenue {
    fn from(value: FullVenue) -> Self {
        Self {
            venue: value.venue.into(),
            genres: value.genres,
        }
    }
}

// Introduce type for the genre rows of a venue, to allow grouped retrieval of the genres using
// Diesel's .grouped_by() method.
#[derive(Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name=super::schema::venue_genres)]
#[diesel(belongs_to(Venue))]
pub struct VenueGenre {
    pub id: i32,
    pub genre_name: String,
    pub venue_id: VenueId,
}

#[derive(Clone, Debug, Queryable, Selectable, Identifiable)]
#[diesel(table_name=super::schema::artists)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
}

#[derive(Clone, Debug, Insertable, AsChangeset)]
#[diesel(table_name=super::schema::artists)]
#[diesel(treat_none_as_null = true)]
pub struct NewArtist {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
}

impl From<Artist> for NewArtist {
    fn from(value: Artist) -> Self {
        Self {
            name: value.name,
            city: value.city,
            state: value.state,
            address: value.address,
            phone: value.phone,
            seeking_venue: value.seeking_venue,
            seeking_description: value.seeking_description,
            website: value.website,
            facebook_link: value.facebook_link,
            image_link: value.image_link,
        }
    }
}

/// An artist together with its genre tags (in insertion order)
#[derive(Clone, Debug)]
pub struct FullArtist {
    pub artist: Artist,
    pub genres: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct FullNewArtist {
    pub artist: NewArtist,
    pub genres: Vec<String>,
}

impl From<FullArtist> for FullNewArtist {
    fn from(value: FullArtist) -> Self {
        Self {
            artist: value.artist.into(),
            genres: value.genres,
        }
    }
}

#[derive(Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name=super::schema::artist_genres)]
#[diesel(belongs_to(Artist))]
pub struct ArtistGenre {
    pub id: i32,
    pub genre_name: String,
    pub artist_id: ArtistId,
}

/// A booking of an artist at a venue.
///
/// There can only be one show per (artist, venue) pair, as this pair is the primary key.
#[derive(Clone, Debug, PartialEq, Queryable, Selectable, Insertable)]
#[diesel(table_name=super::schema::shows)]
pub struct Show {
    pub artist_id: ArtistId,
    pub venue_id: VenueId,
    pub start_time: DateTime<Utc>,
}

/// A show, joined with the display data of its venue and artist
#[derive(Clone, Debug)]
pub struct FullShow {
    pub show: Show,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
}

/// Just the location columns of a venue, as required for grouping venues by area
#[derive(Clone, Debug, Queryable, Selectable)]
#[diesel(table_name=super::schema::venues)]
pub struct VenueLocation {
    pub id: VenueId,
    pub name: String,
    pub city: String,
    pub state: String,
}

/// Short representation of a venue or artist for lists and search results
#[derive(Clone, Debug, PartialEq)]
pub struct EntitySummary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// All venues of one (city, state) combination
#[derive(Clone, Debug, PartialEq)]
pub struct VenueArea {
    pub city: String,
    pub state: String,
    pub venues: Vec<EntitySummary>,
}

/// The complete contents of the directory, used for bulk import and export.
///
/// When importing, the ids of the venues and artists are only used to resolve the references of
/// the shows. The imported entities get new ids from the database.
#[derive(Clone, Debug, Default)]
pub struct DirectoryContents {
    pub venues: Vec<FullVenue>,
    pub artists: Vec<FullArtist>,
    pub shows: Vec<Show>,
}
