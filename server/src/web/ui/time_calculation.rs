use crate::data_store::models::FullShow;
use chrono::{DateTime, Utc};

/// Shows of a venue or an artist, split into past and upcoming shows relative to a point in time
#[derive(Debug, Default)]
pub struct PartitionedShows {
    /// Shows that started at or before the reference time, most recent first
    pub past: Vec<FullShow>,
    /// Shows starting after the reference time, soonest first
    pub upcoming: Vec<FullShow>,
}

/// Split the `shows` into past and upcoming shows.
///
/// A show is upcoming, iff its start time is after `now`. Otherwise it is past, such that every
/// show ends up in exactly one of the two lists. `now` should be taken once per request, to get
/// consistent results on the page.
pub fn partition_shows(shows: Vec<FullShow>, now: DateTime<Utc>) -> PartitionedShows {
    let (mut upcoming, mut past): (Vec<FullShow>, Vec<FullShow>) = shows
        .into_iter()
        .partition(|s| s.show.start_time > now);
    upcoming.sort_by_key(|s| s.show.start_time);
    past.sort_by_key(|s| std::cmp::Reverse(s.show.start_time));
    PartitionedShows { past, upcoming }
}

/// Format a timestamp for display in the given time zone, e.g. "Tue, 05/21/2019, 9:30 PM"
pub fn format_show_time(timestamp: &DateTime<Utc>, timezone: chrono_tz::Tz) -> String {
    timestamp
        .with_timezone(&timezone)
        .format("%a, %m/%d/%Y, %-I:%M %p")
        .to_string()
}
