pub mod artists_list;
pub mod delete_artist;
pub mod delete_venue;
pub mod edit_artist;
pub mod edit_venue;
pub mod index;
pub mod new_show;
pub mod search;
pub mod show_artist;
pub mod show_venue;
pub mod shows_list;
pub mod venues_list;
