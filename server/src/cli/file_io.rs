use crate::cli_error::CliError;
use crate::data_store::models::{Artist, DirectoryContents, FullArtist, FullVenue, Show, Venue};
use crate::data_store::{connect_store, ArtistId, FyyurStore, VenueId};
use crate::setup::DatabaseSettings;
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

/// File format for importing and exporting the whole directory as JSON
#[derive(Serialize, Deserialize, Default)]
struct SavedDirectory {
    #[serde(default)]
    venues: Vec<SavedVenue>,
    #[serde(default)]
    artists: Vec<SavedArtist>,
    #[serde(default)]
    shows: Vec<SavedShow>,
}

#[derive(Serialize, Deserialize)]
struct SavedVenue {
    id: VenueId,
    name: String,
    city: String,
    state: String,
    address: String,
    phone: String,
    #[serde(default)]
    seeking_talent: bool,
    #[serde(default)]
    seeking_description: Option<String>,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    facebook_link: Option<String>,
    #[serde(default)]
    image_link: Option<String>,
    #[serde(default)]
    genres: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct SavedArtist {
    id: ArtistId,
    name: String,
    city: String,
    state: String,
    address: String,
    phone: String,
    #[serde(default)]
    seeking_venue: bool,
    #[serde(default)]
    seeking_description: Option<String>,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    facebook_link: Option<String>,
    #[serde(default)]
    image_link: Option<String>,
    #[serde(default)]
    genres: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct SavedShow {
    venue_id: VenueId,
    artist_id: ArtistId,
    start_time: DateTime<Utc>,
}

impl From<SavedVenue> for FullVenue {
    fn from(value: SavedVenue) -> Self {
        FullVenue {
            venue: Venue {
                id: value.id,
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
            },
            genres: value.genres,
        }
    }
}

impl From<FullVenue> for SavedVenue {
    fn from(value: FullVenue) -> Self {
        let venue = value.venue;
        SavedVenue {
            id: venue.id,
            name: venue.name,
            city: venue.city,
            state: venue.state,
            address: venue.address,
            phone: venue.phone,
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description,
            website: venue.website,
            facebook_link: venue.facebook_link,
            image_link: venue.image_link,
            genres: value.genres,
        }
    }
}

impl From<SavedArtist> for FullArtist {
    fn from(value: SavedArtist) -> Self {
        FullArtist {
            artist: Artist {
                id: value.id,
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
            },
            genres: value.genres,
        }
    }
}

impl From<FullArtist> for SavedArtist {
    fn from(value: FullArtist) -> Self {
        let artist = value.artist;
        SavedArtist {
            id: artist.id,
            name: artist.name,
            city: artist.city,
            state: artist.state,
            address: artist.address,
            phone: artist.phone,
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description,
            website: artist.website,
            facebook_link: artist.facebook_link,
            image_link: artist.image_link,
            genres: value.genres,
        }
    }
}

impl From<SavedShow> for Show {
    fn from(value: SavedShow) -> Self {
        Show {
            artist_id: value.artist_id,
            venue_id: value.venue_id,
            start_time: value.start_time,
        }
    }
}

impl From<Show> for SavedShow {
    fn from(value: Show) -> Self {
        SavedShow {
            venue_id: value.venue_id,
            artist_id: value.artist_id,
            start_time: value.start_time,
        }
    }
}

impl From<SavedDirectory> for DirectoryContents {
    fn from(value: SavedDirectory) -> Self {
        DirectoryContents {
            venues: value.venues.into_iter().map(|v| v.into()).collect(),
            artists: value.artists.into_iter().map(|a| a.into()).collect(),
            shows: value.shows.into_iter().map(|s| s.into()).collect(),
        }
    }
}

/// Import venues, artists and shows from a JSON file into the database.
///
/// The ids in the file are only used for resolving the shows' references. All imported venues and
/// artists get new ids, so the import can be repeated or applied to a non-empty database.
pub fn load_directory_from_file(
    settings: &DatabaseSettings,
    path: &PathBuf,
) -> Result<(), CliError> {
    let data_store_pool = connect_store(settings)?;
    let mut data_store = data_store_pool.get_facade()?;

    let f = File::open(path).map_err(|error| CliError::File {
        path: path.clone(),
        error,
    })?;
    let data: SavedDirectory = serde_json::from_reader(BufReader::new(f))?;
    info!(
        "Importing {} venues, {} artists and {} shows from {:?} ...",
        data.venues.len(),
        data.artists.len(),
        data.shows.len(),
        path
    );

    data_store.import_directory(data.into())?;

    Ok(())
}

/// Export all venues, artists and shows from the database into a JSON file.
pub fn export_directory_to_file(
    settings: &DatabaseSettings,
    path: &PathBuf,
) -> Result<(), CliError> {
    let data_store_pool = connect_store(settings)?;
    let mut data_store = data_store_pool.get_facade()?;

    let data = SavedDirectory {
        venues: data_store
            .get_full_venues()?
            .into_iter()
            .map(|v| v.into())
            .collect(),
        artists: data_store
            .get_full_artists()?
            .into_iter()
            .map(|a| a.into())
            .collect(),
        shows: data_store
            .get_shows()?
            .into_iter()
            .map(|s| s.show.into())
            .collect(),
    };

    let f = File::create(path).map_err(|error| CliError::File {
        path: path.clone(),
        error,
    })?;
    serde_json::to_writer_pretty(BufWriter::new(f), &data)?;

    Ok(())
}
