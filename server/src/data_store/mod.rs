//! The persistence layer: the database interface
//!
//! The primary entry point to this module is the function [connect_store], which returns an
//! object implementing the [FyyurStore] trait. This object can be shared between threads in a
//! global application state and be used to create [FyyurStoreFacade] instances for interaction
//! with the database. These provide a CRUD-like interface, using the data models from the [models]
//! module.
//!
//! The primary implementation of [FyyurStore] ([postgres::PgDataStore]) wraps a PostgreSQL
//! connection pool and its corresponding [FyyurStoreFacade] objects
//! ([postgres::PgDataStoreFacade]) hold a reference to one pooled connection each, using the Diesel
//! query DSL for implementing the database interaction. Every facade method runs in its own
//! database transaction, which is rolled back when the method returns an error.
//!
//! There is also a mock implementation for unittests.

use crate::setup::DatabaseSettings;
use chrono::{DateTime, Utc};

pub mod models;
mod postgres;
mod schema;
#[cfg(test)]
pub mod store_mock;
pub mod util;

/// Create a [FyyurStore] with a connection pool for the configured PostgreSQL database
pub fn connect_store(settings: &DatabaseSettings) -> Result<impl FyyurStore, StoreError> {
    postgres::PgDataStore::new(&settings.database_url)
}

pub type VenueId = i32;
pub type ArtistId = i32;

pub trait FyyurStoreFacade {
    /// Get all venues, grouped by their (city, state) area.
    ///
    /// Areas are sorted by (state, city), venues within an area by name. Each venue summary
    /// carries the number of the venue's shows starting after `now`.
    fn get_venue_areas(&mut self, now: DateTime<Utc>) -> Result<Vec<models::VenueArea>, StoreError>;

    /// Get all venues, sorted by name, each with the number of its shows starting after `now`
    fn get_venue_list(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<Vec<models::EntitySummary>, StoreError>;

    /// Get the `limit` most recently created venues, newest first
    fn get_recent_venues(
        &mut self,
        limit: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<models::EntitySummary>, StoreError>;

    fn get_venue(&mut self, venue_id: VenueId) -> Result<models::FullVenue, StoreError>;

    /// Get all venues including their genres, sorted by id
    fn get_full_venues(&mut self) -> Result<Vec<models::FullVenue>, StoreError>;

    /// Get all shows of the venue, joined with the data of the performing artist, sorted by
    /// start time
    fn get_venue_shows(&mut self, venue_id: VenueId) -> Result<Vec<models::FullShow>, StoreError>;

    /// Get all venues whose name contains `search_term` (case-insensitive), sorted by name
    fn search_venues(
        &mut self,
        search_term: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<models::EntitySummary>, StoreError>;

    /// Create a new venue with its genres and return the new venue's id
    fn create_venue(&mut self, venue: models::FullNewVenue) -> Result<VenueId, StoreError>;

    /// Update all fields of an existing venue and replace its genres
    ///
    /// # return value
    /// - `Ok(())` if the venue has been updated successfully
    /// - `Err(StoreError::NotExisting)` if there is no venue with the given id
    /// - `Err(_)` if something different went wrong, as usual
    fn update_venue(
        &mut self,
        venue_id: VenueId,
        venue: models::FullNewVenue,
    ) -> Result<(), StoreError>;

    /// Delete the venue, including its genres and shows
    fn delete_venue(&mut self, venue_id: VenueId) -> Result<(), StoreError>;

    /// Get all artists, sorted by name, each with the number of its shows starting after `now`
    fn get_artist_list(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<Vec<models::EntitySummary>, StoreError>;

    /// Get the `limit` most recently created artists, newest first
    fn get_recent_artists(
        &mut self,
        limit: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<models::EntitySummary>, StoreError>;

    fn get_artist(&mut self, artist_id: ArtistId) -> Result<models::FullArtist, StoreError>;

    /// Get all artists including their genres, sorted by id
    fn get_full_artists(&mut self) -> Result<Vec<models::FullArtist>, StoreError>;

    /// Get all shows of the artist, joined with the data of the venue, sorted by start time
    fn get_artist_shows(&mut self, artist_id: ArtistId)
        -> Result<Vec<models::FullShow>, StoreError>;

    /// Get all artists whose name contains `search_term` (case-insensitive), sorted by name
    fn search_artists(
        &mut self,
        search_term: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<models::EntitySummary>, StoreError>;

    fn create_artist(&mut self, artist: models::FullNewArtist) -> Result<ArtistId, StoreError>;

    /// Update all fields of an existing artist and replace its genres
    ///
    /// # return value
    /// - `Ok(())` if the artist has been updated successfully
    /// - `Err(StoreError::NotExisting)` if there is no artist with the given id
    /// - `Err(_)` if something different went wrong, as usual
    fn update_artist(
        &mut self,
        artist_id: ArtistId,
        artist: models::FullNewArtist,
    ) -> Result<(), StoreError>;

    /// Delete the artist, including its genres and shows
    fn delete_artist(&mut self, artist_id: ArtistId) -> Result<(), StoreError>;

    /// Get all shows, joined with venue and artist data, sorted by start time
    fn get_shows(&mut self) -> Result<Vec<models::FullShow>, StoreError>;

    /// Create a new show.
    ///
    /// # return value
    /// - `Ok(())` if the show has been created successfully
    /// - `Err(StoreError::ConflictEntityExists)` if there is already a show of this artist at this
    ///   venue
    /// - `Err(StoreError::InvalidInputData)` if the venue or artist does not exist
    /// - `Err(_)` if something different went wrong, as usual
    fn create_show(&mut self, show: models::Show) -> Result<(), StoreError>;

    /// Import venues, artists and shows in a single transaction.
    ///
    /// The ids of the given venues and artists are only used for resolving the shows' references.
    fn import_directory(&mut self, data: models::DirectoryContents) -> Result<(), StoreError>;
}

pub trait FyyurStore: Send + Sync {
    fn get_facade<'a>(&'a self) -> Result<Box<dyn FyyurStoreFacade + 'a>, StoreError>;
}

#[derive(Debug)]
pub enum StoreError {
    /// Connection the database failed. See string description for details.
    ConnectionError(String),
    /// The query could not be executed because of some error not covered by the other members (see
    /// string description)
    QueryError(diesel::result::Error),
    /// Database transaction could not be commited due to a conflicting concurrent transaction
    TransactionConflict,
    /// The requested entity does not exist
    NotExisting,
    /// The entity could not be created because it already exists.
    ConflictEntityExists,
    /// The provided data is invalid, i.e. it does not match the expected ranges or violates a
    /// SQL constraint. See string description for details.
    InvalidInputData(String),
    /// Some data queried from the database could not be deserialized. See string description for
    /// details.
    InvalidDataInDatabase(String),
}

impl From<diesel::result::Error> for StoreError {
    fn from(error: diesel::result::Error) -> Self {
        match error {
            diesel::result::Error::NotFound => Self::NotExisting,
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                _,
            ) => Self::ConflictEntityExists,
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::SerializationFailure,
                _,
            ) => Self::TransactionConflict,
            diesel::result::Error::DatabaseError(
                e @ diesel::result::DatabaseErrorKind::ForeignKeyViolation
                | e @ diesel::result::DatabaseErrorKind::CheckViolation
                | e @ diesel::result::DatabaseErrorKind::NotNullViolation,
                info,
            ) => Self::InvalidInputData(
                info.constraint_name()
                    .and_then(postgres::description_for_postgres_constraint)
                    .map(|d| d.to_owned())
                    .unwrap_or_else(|| format!("{:?}: {}", e, info.message())),
            ),
            diesel::result::Error::SerializationError(e) => Self::InvalidInputData(e.to_string()),
            diesel::result::Error::DeserializationError(e) => {
                Self::InvalidDataInDatabase(e.to_string())
            }
            _ => Self::QueryError(error),
        }
    }
}

impl From<r2d2::Error> for StoreError {
    fn from(error: r2d2::Error) -> Self {
        Self::ConnectionError(error.to_string())
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Error connecting to database: {}", e),
            Self::QueryError(e) => write!(f, "Error while executing database query: {}", e),
            Self::TransactionConflict => f.write_str("Database transaction could not be commited due to a conflicting concurrent transaction"),
            Self::NotExisting => f.write_str("Database record does not exist."),
            Self::ConflictEntityExists => f.write_str("Database record exists already."),
            Self::InvalidInputData(e) => {
                write!(f, "Data to be stored in database is not valid: {}", e)
            }
            StoreError::InvalidDataInDatabase(e) => {
                write!(f, "Data queried from database could not be deserialized: {}", e)
            },
        }
    }
}

impl std::error::Error for StoreError {}
