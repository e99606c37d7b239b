use crate::data_store::models::{EntitySummary, VenueArea, VenueLocation};
use crate::data_store::VenueId;
use std::collections::HashMap;

/// Group a list of venues by their (city, state) area.
///
/// The venues are expected to be sorted by (state, city, ...) already, such that the venues of one
/// area are adjacent. The order of areas and the order of venues within each area is preserved.
/// `upcoming_shows` maps venue ids to their number of upcoming shows. Venues without an entry
/// have no upcoming shows.
pub fn group_venues_by_area(
    venues: Vec<VenueLocation>,
    upcoming_shows: &HashMap<VenueId, i64>,
) -> Vec<VenueArea> {
    let mut result: Vec<VenueArea> = Vec::new();
    for venue in venues {
        let summary = EntitySummary {
            id: venue.id,
            name: venue.name,
            num_upcoming_shows: upcoming_shows.get(&venue.id).copied().unwrap_or(0),
        };
        match result.last_mut() {
            Some(area) if area.city == venue.city && area.state == venue.state => {
                area.venues.push(summary);
            }
            _ => result.push(VenueArea {
                city: venue.city,
                state: venue.state,
                venues: vec![summary],
            }),
        }
    }
    result
}

/// Combine (id, name) rows of venues or artists with their number of upcoming shows.
///
/// `upcoming_shows` maps entity ids to their number of upcoming shows. Entities without an entry
/// have no upcoming shows.
pub fn summaries_with_upcoming_shows(
    rows: Vec<(i32, String)>,
    upcoming_shows: &HashMap<i32, i64>,
) -> Vec<EntitySummary> {
    rows.into_iter()
        .map(|(id, name)| EntitySummary {
            id,
            name,
            num_upcoming_shows: upcoming_shows.get(&id).copied().unwrap_or(0),
        })
        .collect()
}

/// Create an SQL `LIKE`/`ILIKE` pattern that matches all strings containing the `search_term` as
/// a substring.
///
/// Wildcard characters (`%`, `_`) and the escape character (`\`) in the search term are escaped,
/// such that they are matched literally.
pub fn substring_like_pattern(search_term: &str) -> String {
    let mut result = String::with_capacity(search_term.len() + 2);
    result.push('%');
    for c in search_term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            result.push('\\');
        }
        result.push(c);
    }
    result.push('%');
    result
}

/// Check if `name` contains `search_term` case-insensitively.
///
/// This is the in-memory equivalent to filtering with the [substring_like_pattern] via `ILIKE`.
#[cfg(test)]
pub fn name_matches_search_term(name: &str, search_term: &str) -> bool {
    name.to_lowercase().contains(&search_term.to_lowercase())
}
