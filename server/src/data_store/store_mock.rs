use crate::data_store::models::{
    Artist, DirectoryContents, EntitySummary, FullArtist, FullNewArtist, FullNewVenue, FullShow,
    FullVenue, Show, Venue, VenueArea, VenueLocation,
};
use crate::data_store::{
    util, ArtistId, FyyurStore, FyyurStoreFacade, StoreError, VenueId,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

/**
 * A mock [FyyurStore] implementation for testing.
 *
 * The simulated database consists of the [StoreMockData] structure with vectors of entities. These
 * can be directly modified by the tests.
 *
 * Except from checking for entity existence and the uniqueness of shows, the interface functions
 * of this mock don't do any error checking. Instead, the [StoreMockData.next_error] attribute can
 * be set to simulate a database error.
 */
#[derive(Default)]
pub struct StoreMock {
    pub data: Mutex<StoreMockData>,
}

impl FyyurStore for StoreMock {
    fn get_facade<'a>(&'a self) -> Result<Box<dyn FyyurStoreFacade + 'a>, StoreError> {
        Ok(Box::new(StoreMockFacade { store: self }))
    }
}

#[derive(Default)]
pub struct StoreMockData {
    pub venues: Vec<FullVenue>,
    pub artists: Vec<FullArtist>,
    pub shows: Vec<Show>,
    /// If not none, the next call to a store facade method will return this error.
    pub next_error: Option<StoreError>,
}

impl StoreMockData {
    fn next_venue_id(&self) -> VenueId {
        self.venues.iter().map(|v| v.venue.id).max().unwrap_or(0) + 1
    }

    fn next_artist_id(&self) -> ArtistId {
        self.artists.iter().map(|a| a.artist.id).max().unwrap_or(0) + 1
    }

    fn upcoming_shows_by_venue(&self, now: DateTime<Utc>) -> HashMap<VenueId, i64> {
        let mut result = HashMap::new();
        for show in self.shows.iter().filter(|s| s.start_time > now) {
            *result.entry(show.venue_id).or_insert(0) += 1;
        }
        result
    }

    fn upcoming_shows_by_artist(&self, now: DateTime<Utc>) -> HashMap<ArtistId, i64> {
        let mut result = HashMap::new();
        for show in self.shows.iter().filter(|s| s.start_time > now) {
            *result.entry(show.artist_id).or_insert(0) += 1;
        }
        result
    }

    fn venue_summaries<'b>(
        &self,
        venues: impl Iterator<Item = &'b FullVenue>,
        now: DateTime<Utc>,
    ) -> Vec<EntitySummary> {
        util::summaries_with_upcoming_shows(
            venues
                .map(|v| (v.venue.id, v.venue.name.clone()))
                .collect(),
            &self.upcoming_shows_by_venue(now),
        )
    }

    fn artist_summaries<'b>(
        &self,
        artists: impl Iterator<Item = &'b FullArtist>,
        now: DateTime<Utc>,
    ) -> Vec<EntitySummary> {
        util::summaries_with_upcoming_shows(
            artists
                .map(|a| (a.artist.id, a.artist.name.clone()))
                .collect(),
            &self.upcoming_shows_by_artist(now),
        )
    }

    fn full_shows(&self, filter: impl Fn(&Show) -> bool) -> Vec<FullShow> {
        let mut result: Vec<FullShow> = self
            .shows
            .iter()
            .filter(|s| filter(s))
            .filter_map(|show| {
                let venue = self.venues.iter().find(|v| v.venue.id == show.venue_id)?;
                let artist = self.artists.iter().find(|a| a.artist.id == show.artist_id)?;
                Some(FullShow {
                    show: show.clone(),
                    venue_name: venue.venue.name.clone(),
                    venue_image_link: venue.venue.image_link.clone(),
                    artist_name: artist.artist.name.clone(),
                    artist_image_link: artist.artist.image_link.clone(),
                })
            })
            .collect();
        result.sort_by_key(|s| (s.show.start_time, s.show.venue_id, s.show.artist_id));
        result
    }

    fn sorted_by_name(mut summaries: Vec<EntitySummary>) -> Vec<EntitySummary> {
        summaries.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        summaries
    }

    fn insert_venue(&mut self, venue: FullNewVenue) -> VenueId {
        let venue_id = self.next_venue_id();
        self.venues.push(venue_from_new(venue_id, venue));
        venue_id
    }

    fn insert_artist(&mut self, artist: FullNewArtist) -> ArtistId {
        let artist_id = self.next_artist_id();
        self.artists.push(artist_from_new(artist_id, artist));
        artist_id
    }
}

fn venue_from_new(venue_id: VenueId, venue: FullNewVenue) -> FullVenue {
    let new_venue = venue.venue;
    FullVenue {
        venue: Venue {
            id: venue_id,
            name: new_venue.name,
            city: new_venue.city,
            state: new_venue.state,
            address: new_venue.address,
            phone: new_venue.phone,
            seeking_talent: new_venue.seeking_talent,
            seeking_description: new_venue.seeking_description,
            website: new_venue.website,
            facebook_link: new_venue.facebook_link,
            image_link: new_venue.image_link,
        },
        genres: venue.genres,
    }
}

fn artist_from_new(artist_id: ArtistId, artist: FullNewArtist) -> FullArtist {
    let new_artist = artist.artist;
    FullArtist {
        artist: Artist {
            id: artist_id,
            name: new_artist.name,
            city: new_artist.city,
            state: new_artist.state,
            address: new_artist.address,
            phone: new_artist.phone,
            seeking_venue: new_artist.seeking_venue,
            seeking_description: new_artist.seeking_description,
            website: new_artist.website,
            facebook_link: new_artist.facebook_link,
            image_link: new_artist.image_link,
        },
        genres: artist.genres,
    }
}

struct StoreMockFacade<'a> {
    store: &'a StoreMock,
}

impl<'a> StoreMockFacade<'a> {
    /// Lock the mock data or return the simulated error, if one has been set
    fn lock(&self) -> Result<std::sync::MutexGuard<'a, StoreMockData>, StoreError> {
        let mut data = self.store.data.lock().expect("Error while locking mutex.");
        if let Some(e) = data.next_error.take() {
            return Err(e);
        }
        Ok(data)
    }
}

impl<'a> FyyurStoreFacade for StoreMockFacade<'a> {
    fn get_venue_areas(&mut self, now: DateTime<Utc>) -> Result<Vec<VenueArea>, StoreError> {
        let data = self.lock()?;
        let mut locations: Vec<VenueLocation> = data
            .venues
            .iter()
            .map(|v| VenueLocation {
                id: v.venue.id,
                name: v.venue.name.clone(),
                city: v.venue.city.clone(),
                state: v.venue.state.clone(),
            })
            .collect();
        locations.sort_by(|a, b| {
            (&a.state, &a.city, &a.name, a.id).cmp(&(&b.state, &b.city, &b.name, b.id))
        });
        Ok(util::group_venues_by_area(
            locations,
            &data.upcoming_shows_by_venue(now),
        ))
    }

    fn get_venue_list(&mut self, now: DateTime<Utc>) -> Result<Vec<EntitySummary>, StoreError> {
        let data = self.lock()?;
        Ok(StoreMockData::sorted_by_name(
            data.venue_summaries(data.venues.iter(), now),
        ))
    }

    fn get_recent_venues(
        &mut self,
        limit: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<EntitySummary>, StoreError> {
        let data = self.lock()?;
        let mut result = data.venue_summaries(data.venues.iter(), now);
        result.sort_by_key(|s| std::cmp::Reverse(s.id));
        result.truncate(limit.max(0) as usize);
        Ok(result)
    }

    fn get_venue(&mut self, venue_id: VenueId) -> Result<FullVenue, StoreError> {
        let data = self.lock()?;
        data.venues
            .iter()
            .find(|v| v.venue.id == venue_id)
            .cloned()
            .ok_or(StoreError::NotExisting)
    }

    fn get_full_venues(&mut self) -> Result<Vec<FullVenue>, StoreError> {
        let data = self.lock()?;
        let mut result = data.venues.clone();
        result.sort_by_key(|v| v.venue.id);
        Ok(result)
    }

    fn get_venue_shows(&mut self, venue_id: VenueId) -> Result<Vec<FullShow>, StoreError> {
        let data = self.lock()?;
        if !data.venues.iter().any(|v| v.venue.id == venue_id) {
            return Err(StoreError::NotExisting);
        }
        Ok(data.full_shows(|s| s.venue_id == venue_id))
    }

    fn search_venues(
        &mut self,
        search_term: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<EntitySummary>, StoreError> {
        let data = self.lock()?;
        Ok(StoreMockData::sorted_by_name(
            data.venue_summaries(
                data.venues
                    .iter()
                    .filter(|v| util::name_matches_search_term(&v.venue.name, search_term)),
                now,
            ),
        ))
    }

    fn create_venue(&mut self, venue: FullNewVenue) -> Result<VenueId, StoreError> {
        let mut data = self.lock()?;
        Ok(data.insert_venue(venue))
    }

    fn update_venue(&mut self, venue_id: VenueId, venue: FullNewVenue) -> Result<(), StoreError> {
        let mut data = self.lock()?;
        let existing = data
            .venues
            .iter_mut()
            .find(|v| v.venue.id == venue_id)
            .ok_or(StoreError::NotExisting)?;
        *existing = venue_from_new(venue_id, venue);
        Ok(())
    }

    fn delete_venue(&mut self, venue_id: VenueId) -> Result<(), StoreError> {
        let mut data = self.lock()?;
        let count_before = data.venues.len();
        data.venues.retain(|v| v.venue.id != venue_id);
        if data.venues.len() == count_before {
            return Err(StoreError::NotExisting);
        }
        data.shows.retain(|s| s.venue_id != venue_id);
        Ok(())
    }

    fn get_artist_list(&mut self, now: DateTime<Utc>) -> Result<Vec<EntitySummary>, StoreError> {
        let data = self.lock()?;
        Ok(StoreMockData::sorted_by_name(
            data.artist_summaries(data.artists.iter(), now),
        ))
    }

    fn get_recent_artists(
        &mut self,
        limit: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<EntitySummary>, StoreError> {
        let data = self.lock()?;
        let mut result = data.artist_summaries(data.artists.iter(), now);
        result.sort_by_key(|s| std::cmp::Reverse(s.id));
        result.truncate(limit.max(0) as usize);
        Ok(result)
    }

    fn get_artist(&mut self, artist_id: ArtistId) -> Result<FullArtist, StoreError> {
        let data = self.lock()?;
        data.artists
            .iter()
            .find(|a| a.artist.id == artist_id)
            .cloned()
            .ok_or(StoreError::NotExisting)
    }

    fn get_full_artists(&mut self) -> Result<Vec<FullArtist>, StoreError> {
        let data = self.lock()?;
        let mut result = data.artists.clone();
        result.sort_by_key(|a| a.artist.id);
        Ok(result)
    }

    fn get_artist_shows(&mut self, artist_id: ArtistId) -> Result<Vec<FullShow>, StoreError> {
        let data = self.lock()?;
        if !data.artists.iter().any(|a| a.artist.id == artist_id) {
            return Err(StoreError::NotExisting);
        }
        Ok(data.full_shows(|s| s.artist_id == artist_id))
    }

    fn search_artists(
        &mut self,
        search_term: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<EntitySummary>, StoreError> {
        let data = self.lock()?;
        Ok(StoreMockData::sorted_by_name(
            data.artist_summaries(
                data.artists
                    .iter()
                    .filter(|a| util::name_matches_search_term(&a.artist.name, search_term)),
                now,
            ),
        ))
    }

    fn create_artist(&mut self, artist: FullNewArtist) -> Result<ArtistId, StoreError> {
        let mut data = self.lock()?;
        Ok(data.insert_artist(artist))
    }

    fn update_artist(
        &mut self,
        artist_id: ArtistId,
        artist: FullNewArtist,
    ) -> Result<(), StoreError> {
        let mut data = self.lock()?;
        let existing = data
            .artists
            .iter_mut()
            .find(|a| a.artist.id == artist_id)
            .ok_or(StoreError::NotExisting)?;
        *existing = artist_from_new(artist_id, artist);
        Ok(())
    }

    fn delete_artist(&mut self, artist_id: ArtistId) -> Result<(), StoreError> {
        let mut data = self.lock()?;
        let count_before = data.artists.len();
        data.artists.retain(|a| a.artist.id != artist_id);
        if data.artists.len() == count_before {
            return Err(StoreError::NotExisting);
        }
        data.shows.retain(|s| s.artist_id != artist_id);
        Ok(())
    }

    fn get_shows(&mut self) -> Result<Vec<FullShow>, StoreError> {
        let data = self.lock()?;
        Ok(data.full_shows(|_| true))
    }

    fn create_show(&mut self, show: Show) -> Result<(), StoreError> {
        let mut data = self.lock()?;
        if !data.venues.iter().any(|v| v.venue.id == show.venue_id) {
            return Err(StoreError::InvalidInputData(
                "Show's venue must reference an existing venue.".to_owned(),
            ));
        }
        if !data.artists.iter().any(|a| a.artist.id == show.artist_id) {
            return Err(StoreError::InvalidInputData(
                "Show's artist must reference an existing artist.".to_owned(),
            ));
        }
        if data
            .shows
            .iter()
            .any(|s| s.venue_id == show.venue_id && s.artist_id == show.artist_id)
        {
            return Err(StoreError::ConflictEntityExists);
        }
        data.shows.push(show);
        Ok(())
    }

    fn import_directory(&mut self, contents: DirectoryContents) -> Result<(), StoreError> {
        let mut data = self.lock()?;
        let mut new_venue_ids = HashMap::new();
        for venue in contents.venues {
            let imported_id = venue.venue.id;
            new_venue_ids.insert(imported_id, data.insert_venue(venue.into()));
        }
        let mut new_artist_ids = HashMap::new();
        for artist in contents.artists {
            let imported_id = artist.artist.id;
            new_artist_ids.insert(imported_id, data.insert_artist(artist.into()));
        }
        for show in contents.shows {
            let (Some(venue_id), Some(artist_id)) = (
                new_venue_ids.get(&show.venue_id),
                new_artist_ids.get(&show.artist_id),
            ) else {
                return Err(StoreError::InvalidInputData(
                    "Show references unknown venue or artist".to_owned(),
                ));
            };
            data.shows.push(Show {
                venue_id: *venue_id,
                artist_id: *artist_id,
                start_time: show.start_time,
            });
        }
        Ok(())
    }
}
