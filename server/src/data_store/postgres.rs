use super::{models, schema, util, ArtistId, FyyurStore, FyyurStoreFacade, StoreError, VenueId};
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use std::collections::HashMap;

#[derive(Clone)]
pub struct PgDataStore {
    pool: diesel::r2d2::Pool<diesel::r2d2::ConnectionManager<PgConnection>>,
}

impl PgDataStore {
    pub fn new(database_url: &str) -> Result<Self, StoreError> {
        let connection_manager = diesel::r2d2::ConnectionManager::<PgConnection>::new(database_url);
        Ok(Self {
            pool: diesel::r2d2::Pool::builder()
                .test_on_check_out(true)
                .min_idle(Some(2))
                .build(connection_manager)?,
        })
    }
}

impl FyyurStore for PgDataStore {
    fn get_facade<'a>(&'a self) -> Result<Box<dyn FyyurStoreFacade + 'a>, StoreError> {
        Ok(Box::new(PgDataStoreFacade::with_pooled_connection(
            self.pool.get()?,
        )))
    }
}

pub struct PgDataStoreFacade {
    connection: diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<PgConnection>>,
}

impl PgDataStoreFacade {
    pub fn with_pooled_connection(
        connection: diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<PgConnection>>,
    ) -> Self {
        Self { connection }
    }
}

impl FyyurStoreFacade for PgDataStoreFacade {
    fn get_venue_areas(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<Vec<models::VenueArea>, StoreError> {
        use schema::venues::dsl::*;

        self.connection.transaction(|connection| {
            let the_venues = venues
                .order_by((state.asc(), city.asc(), name.asc(), id.asc()))
                .select(models::VenueLocation::as_select())
                .load::<models::VenueLocation>(connection)?;
            let upcoming_shows = upcoming_shows_by_venue(now, connection)?;
            Ok(util::group_venues_by_area(the_venues, &upcoming_shows))
        })
    }

    fn get_venue_list(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<Vec<models::EntitySummary>, StoreError> {
        use schema::venues::dsl::*;

        self.connection.transaction(|connection| {
            let the_venues = venues
                .order_by((name.asc(), id.asc()))
                .select((id, name))
                .load::<(VenueId, String)>(connection)?;
            let upcoming_shows = upcoming_shows_by_venue(now, connection)?;
            Ok(util::summaries_with_upcoming_shows(
                the_venues,
                &upcoming_shows,
            ))
        })
    }

    fn get_recent_venues(
        &mut self,
        limit: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<models::EntitySummary>, StoreError> {
        use schema::venues::dsl::*;

        self.connection.transaction(|connection| {
            let the_venues = venues
                .order_by(id.desc())
                .limit(limit)
                .select((id, name))
                .load::<(VenueId, String)>(connection)?;
            let upcoming_shows = upcoming_shows_by_venue(now, connection)?;
            Ok(util::summaries_with_upcoming_shows(
                the_venues,
                &upcoming_shows,
            ))
        })
    }

    fn get_venue(&mut self, venue_id: VenueId) -> Result<models::FullVenue, StoreError> {
        use schema::{venue_genres, venues};

        self.connection.transaction(|connection| {
            let venue = venues::table
                .filter(venues::id.eq(venue_id))
                .select(models::Venue::as_select())
                .first::<models::Venue>(connection)?;
            let genres = models::VenueGenre::belonging_to(&venue)
                .order_by(venue_genres::id.asc())
                .select(venue_genres::genre_name)
                .load::<String>(connection)?;
            Ok(models::FullVenue { venue, genres })
        })
    }

    fn get_full_venues(&mut self) -> Result<Vec<models::FullVenue>, StoreError> {
        use schema::{venue_genres, venues};

        self.connection.transaction(|connection| {
            let the_venues = venues::table
                .order_by(venues::id.asc())
                .select(models::Venue::as_select())
                .load::<models::Venue>(connection)?;
            let the_genres = models::VenueGenre::belonging_to(&the_venues)
                .order_by(venue_genres::id.asc())
                .select(models::VenueGenre::as_select())
                .load::<models::VenueGenre>(connection)?
                .grouped_by(&the_venues);
            Ok(the_venues
                .into_iter()
                .zip(the_genres)
                .map(|(venue, genres)| models::FullVenue {
                    venue,
                    genres: genres.into_iter().map(|g| g.genre_name).collect(),
                })
                .collect())
        })
    }

    fn get_venue_shows(&mut self, venue_id: VenueId) -> Result<Vec<models::FullShow>, StoreError> {
        use schema::venues;

        self.connection.transaction(|connection| {
            // Report a missing venue instead of an empty list of shows
            venues::table
                .filter(venues::id.eq(venue_id))
                .select(venues::id)
                .first::<VenueId>(connection)?;
            Ok(load_full_shows(ShowFilter::AtVenue(venue_id), connection)?)
        })
    }

    fn search_venues(
        &mut self,
        search_term: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<models::EntitySummary>, StoreError> {
        use schema::venues::dsl::*;

        self.connection.transaction(|connection| {
            let the_venues = venues
                .filter(name.ilike(util::substring_like_pattern(search_term)))
                .order_by((name.asc(), id.asc()))
                .select((id, name))
                .load::<(VenueId, String)>(connection)?;
            let upcoming_shows = upcoming_shows_by_venue(now, connection)?;
            Ok(util::summaries_with_upcoming_shows(
                the_venues,
                &upcoming_shows,
            ))
        })
    }

    fn create_venue(&mut self, venue: models::FullNewVenue) -> Result<VenueId, StoreError> {
        self.connection
            .transaction(|connection| Ok(insert_venue(&venue, connection)?))
    }

    fn update_venue(
        &mut self,
        venue_id: VenueId,
        venue: models::FullNewVenue,
    ) -> Result<(), StoreError> {
        use schema::venues::dsl::*;

        self.connection.transaction(|connection| {
            let count = diesel::update(venues)
                .filter(id.eq(venue_id))
                .set(&venue.venue)
                .execute(connection)?;
            if count == 0 {
                return Err(StoreError::NotExisting);
            }
            replace_venue_genres(venue_id, &venue.genres, connection)?;
            Ok(())
        })
    }

    fn delete_venue(&mut self, venue_id: VenueId) -> Result<(), StoreError> {
        use schema::venues::dsl::*;

        // Genres and shows of the venue are deleted by the database (ON DELETE CASCADE)
        self.connection.transaction(|connection| {
            let count = diesel::delete(venues.filter(id.eq(venue_id))).execute(connection)?;
            if count == 0 {
                return Err(StoreError::NotExisting);
            }
            Ok(())
        })
    }

    fn get_artist_list(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<Vec<models::EntitySummary>, StoreError> {
        use schema::artists::dsl::*;

        self.connection.transaction(|connection| {
            let the_artists = artists
                .order_by((name.asc(), id.asc()))
                .select((id, name))
                .load::<(ArtistId, String)>(connection)?;
            let upcoming_shows = upcoming_shows_by_artist(now, connection)?;
            Ok(util::summaries_with_upcoming_shows(
                the_artists,
                &upcoming_shows,
            ))
        })
    }

    fn get_recent_artists(
        &mut self,
        limit: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<models::EntitySummary>, StoreError> {
        use schema::artists::dsl::*;

        self.connection.transaction(|connection| {
            let the_artists = artists
                .order_by(id.desc())
                .limit(limit)
                .select((id, name))
                .load::<(ArtistId, String)>(connection)?;
            let upcoming_shows = upcoming_shows_by_artist(now, connection)?;
            Ok(util::summaries_with_upcoming_shows(
                the_artists,
                &upcoming_shows,
            ))
        })
    }

    fn get_artist(&mut self, artist_id: ArtistId) -> Result<models::FullArtist, StoreError> {
        use schema::{artist_genres, artists};

        self.connection.transaction(|connection| {
            let artist = artists::table
                .filter(artists::id.eq(artist_id))
                .select(models::Artist::as_select())
                .first::<models::Artist>(connection)?;
            let genres = models::ArtistGenre::belonging_to(&artist)
                .order_by(artist_genres::id.asc())
                .select(artist_genres::genre_name)
                .load::<String>(connection)?;
            Ok(models::FullArtist { artist, genres })
        })
    }

    fn get_full_artists(&mut self) -> Result<Vec<models::FullArtist>, StoreError> {
        use schema::{artist_genres, artists};

        self.connection.transaction(|connection| {
            let the_artists = artists::table
                .order_by(artists::id.asc())
                .select(models::Artist::as_select())
                .load::<models::Artist>(connection)?;
            let the_genres = models::ArtistGenre::belonging_to(&the_artists)
                .order_by(artist_genres::id.asc())
                .select(models::ArtistGenre::as_select())
                .load::<models::ArtistGenre>(connection)?
                .grouped_by(&the_artists);
            Ok(the_artists
                .into_iter()
                .zip(the_genres)
                .map(|(artist, genres)| models::FullArtist {
                    artist,
                    genres: genres.into_iter().map(|g| g.genre_name).collect(),
                })
                .collect())
        })
    }

    fn get_artist_shows(
        &mut self,
        artist_id: ArtistId,
    ) -> Result<Vec<models::FullShow>, StoreError> {
        use schema::artists;

        self.connection.transaction(|connection| {
            // Report a missing artist instead of an empty list of shows
            artists::table
                .filter(artists::id.eq(artist_id))
                .select(artists::id)
                .first::<ArtistId>(connection)?;
            Ok(load_full_shows(ShowFilter::ByArtist(artist_id), connection)?)
        })
    }

    fn search_artists(
        &mut self,
        search_term: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<models::EntitySummary>, StoreError> {
        use schema::artists::dsl::*;

        self.connection.transaction(|connection| {
            let the_artists = artists
                .filter(name.ilike(util::substring_like_pattern(search_term)))
                .order_by((name.asc(), id.asc()))
                .select((id, name))
                .load::<(ArtistId, String)>(connection)?;
            let upcoming_shows = upcoming_shows_by_artist(now, connection)?;
            Ok(util::summaries_with_upcoming_shows(
                the_artists,
                &upcoming_shows,
            ))
        })
    }

    fn create_artist(&mut self, artist: models::FullNewArtist) -> Result<ArtistId, StoreError> {
        self.connection
            .transaction(|connection| Ok(insert_artist(&artist, connection)?))
    }

    fn update_artist(
        &mut self,
        artist_id: ArtistId,
        artist: models::FullNewArtist,
    ) -> Result<(), StoreError> {
        use schema::artists::dsl::*;

        self.connection.transaction(|connection| {
            let count = diesel::update(artists)
                .filter(id.eq(artist_id))
                .set(&artist.artist)
                .execute(connection)?;
            if count == 0 {
                return Err(StoreError::NotExisting);
            }
            replace_artist_genres(artist_id, &artist.genres, connection)?;
            Ok(())
        })
    }

    fn delete_artist(&mut self, artist_id: ArtistId) -> Result<(), StoreError> {
        use schema::artists::dsl::*;

        // Genres and shows of the artist are deleted by the database (ON DELETE CASCADE)
        self.connection.transaction(|connection| {
            let count = diesel::delete(artists.filter(id.eq(artist_id))).execute(connection)?;
            if count == 0 {
                return Err(StoreError::NotExisting);
            }
            Ok(())
        })
    }

    fn get_shows(&mut self) -> Result<Vec<models::FullShow>, StoreError> {
        Ok(load_full_shows(ShowFilter::All, &mut self.connection)?)
    }

    fn create_show(&mut self, show: models::Show) -> Result<(), StoreError> {
        use schema::shows::dsl::*;

        self.connection.transaction(|connection| {
            diesel::insert_into(shows).values(&show).execute(connection)?;
            Ok(())
        })
    }

    fn import_directory(&mut self, data: models::DirectoryContents) -> Result<(), StoreError> {
        use schema::shows::dsl::*;

        self.connection.transaction(|connection| {
            let mut new_venue_ids: HashMap<VenueId, VenueId> = HashMap::new();
            for venue in data.venues {
                let imported_id = venue.venue.id;
                let new_id = insert_venue(&venue.into(), connection)?;
                new_venue_ids.insert(imported_id, new_id);
            }

            let mut new_artist_ids: HashMap<ArtistId, ArtistId> = HashMap::new();
            for artist in data.artists {
                let imported_id = artist.artist.id;
                let new_id = insert_artist(&artist.into(), connection)?;
                new_artist_ids.insert(imported_id, new_id);
            }

            for show in data.shows {
                let new_show = models::Show {
                    venue_id: *new_venue_ids.get(&show.venue_id).ok_or_else(|| {
                        StoreError::InvalidInputData(format!(
                            "Show references unknown venue {}",
                            show.venue_id
                        ))
                    })?,
                    artist_id: *new_artist_ids.get(&show.artist_id).ok_or_else(|| {
                        StoreError::InvalidInputData(format!(
                            "Show references unknown artist {}",
                            show.artist_id
                        ))
                    })?,
                    start_time: show.start_time,
                };
                diesel::insert_into(shows)
                    .values(&new_show)
                    .execute(connection)?;
            }
            Ok(())
        })
    }
}

/// Selection of shows for [load_full_shows]
enum ShowFilter {
    All,
    AtVenue(VenueId),
    ByArtist(ArtistId),
}

/// Load shows, joined with their venue's and artist's names and images, sorted by start time
fn load_full_shows(
    filter: ShowFilter,
    connection: &mut PgConnection,
) -> Result<Vec<models::FullShow>, diesel::result::Error> {
    use schema::{artists, shows, venues};

    let mut query = shows::table
        .inner_join(venues::table)
        .inner_join(artists::table)
        .select((
            models::Show::as_select(),
            venues::name,
            venues::image_link,
            artists::name,
            artists::image_link,
        ))
        .order_by((
            shows::start_time.asc(),
            shows::venue_id.asc(),
            shows::artist_id.asc(),
        ))
        .into_boxed();
    match filter {
        ShowFilter::All => {}
        ShowFilter::AtVenue(the_venue_id) => {
            query = query.filter(shows::venue_id.eq(the_venue_id));
        }
        ShowFilter::ByArtist(the_artist_id) => {
            query = query.filter(shows::artist_id.eq(the_artist_id));
        }
    }

    Ok(query
        .load::<(models::Show, String, Option<String>, String, Option<String>)>(connection)?
        .into_iter()
        .map(
            |(show, venue_name, venue_image_link, artist_name, artist_image_link)| {
                models::FullShow {
                    show,
                    venue_name,
                    venue_image_link,
                    artist_name,
                    artist_image_link,
                }
            },
        )
        .collect())
}

/// Count the shows per venue that start after `now`. Venues without such shows are not included.
fn upcoming_shows_by_venue(
    now: DateTime<Utc>,
    connection: &mut PgConnection,
) -> Result<HashMap<VenueId, i64>, diesel::result::Error> {
    use schema::shows::dsl::*;

    Ok(shows
        .filter(start_time.gt(now))
        .group_by(venue_id)
        .select((venue_id, diesel::dsl::count_star()))
        .load::<(VenueId, i64)>(connection)?
        .into_iter()
        .collect())
}

/// Count the shows per artist that start after `now`. Artists without such shows are not
/// included.
fn upcoming_shows_by_artist(
    now: DateTime<Utc>,
    connection: &mut PgConnection,
) -> Result<HashMap<ArtistId, i64>, diesel::result::Error> {
    use schema::shows::dsl::*;

    Ok(shows
        .filter(start_time.gt(now))
        .group_by(artist_id)
        .select((artist_id, diesel::dsl::count_star()))
        .load::<(ArtistId, i64)>(connection)?
        .into_iter()
        .collect())
}

fn insert_venue(
    venue: &models::FullNewVenue,
    connection: &mut PgConnection,
) -> Result<VenueId, diesel::result::Error> {
    use schema::venues::dsl::*;

    let new_id = diesel::insert_into(venues)
        .values(&venue.venue)
        .returning(id)
        .get_result::<VenueId>(connection)?;
    replace_venue_genres(new_id, &venue.genres, connection)?;
    Ok(new_id)
}

/// Delete all genre rows of the venue and insert the given genres instead
fn replace_venue_genres(
    the_venue_id: VenueId,
    genres: &[String],
    connection: &mut PgConnection,
) -> Result<(), diesel::result::Error> {
    use schema::venue_genres::dsl::*;

    diesel::delete(venue_genres.filter(venue_id.eq(the_venue_id))).execute(connection)?;

    diesel::insert_into(venue_genres)
        .values(
            genres
                .iter()
                .map(|genre| (venue_id.eq(the_venue_id), genre_name.eq(genre.as_str())))
                .collect::<Vec<_>>(),
        )
        .execute(connection)
        .map(|_| ())
}

fn insert_artist(
    artist: &models::FullNewArtist,
    connection: &mut PgConnection,
) -> Result<ArtistId, diesel::result::Error> {
    use schema::artists::dsl::*;

    let new_id = diesel::insert_into(artists)
        .values(&artist.artist)
        .returning(id)
        .get_result::<ArtistId>(connection)?;
    replace_artist_genres(new_id, &artist.genres, connection)?;
    Ok(new_id)
}

/// Delete all genre rows of the artist and insert the given genres instead
fn replace_artist_genres(
    the_artist_id: ArtistId,
    genres: &[String],
    connection: &mut PgConnection,
) -> Result<(), diesel::result::Error> {
    use schema::artist_genres::dsl::*;

    diesel::delete(artist_genres.filter(artist_id.eq(the_artist_id))).execute(connection)?;

    diesel::insert_into(artist_genres)
        .values(
            genres
                .iter()
                .map(|genre| (artist_id.eq(the_artist_id), genre_name.eq(genre.as_str())))
                .collect::<Vec<_>>(),
        )
        .execute(connection)
        .map(|_| ())
}

/// Get a human-readable description of the consistency expectation that is checked by a specific
/// constraint in our Postgres database schema by the constraint's name.
///
/// These are visible to the user when creating or updating entities inconsistently.
///
/// Returns None, when no human-readable description is present of the given constraint name. This
/// may be the case when we don't expect this constraint to be violated by a user interaction.
pub fn description_for_postgres_constraint(constraint_name: &str) -> Option<&'static str> {
    match constraint_name {
        "shows_venue_id_fkey" => Some("Show's venue must reference an existing venue."),
        "shows_artist_id_fkey" => Some("Show's artist must reference an existing artist."),
        "venue_genres_venue_id_fkey" => Some("Genre must reference an existing venue."),
        "artist_genres_artist_id_fkey" => Some("Genre must reference an existing artist."),
        _ => None,
    }
}
