
use super::configure_app;
use crate::data_store::store_mock::StoreMock;
use crate::data_store::StoreError;
use crate::web::AppState;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::{LOCATION, SET_COOKIE};
use actix_web::{http, test, web, App};
use std::sync::Arc;

fn create_sample_state() -> (Arc<StoreMock>, AppState) {
    let store = Arc::new(StoreMock::default());
    sample_data::fill_sample_data(&store);
    let state = AppState::with_store(store.clone(), chrono_tz::UTC);
    (store, state)
}

fn body_as_string(body: &[u8]) -> String {
    String::from_utf8(body.to_vec()).unwrap()
}

fn location<B>(res: &ServiceResponse<B>) -> String {
    res.headers()
        .get(LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned()
}

#[actix_web::test]
async fn test_index_lists_recent_entities() {
    let (_store, state) = create_sample_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;
    let req = test::TestRequest::get().uri("/").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body = body_as_string(&test::read_body(res).await);
    assert!(body.contains("The Dueling Pianos Bar"));
    assert!(body.contains("The Wild Sax Band"));
}

#[actix_web::test]
async fn test_venues_list_grouped_by_area() {
    let (_store, state) = create_sample_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;
    let req = test::TestRequest::get().uri("/venues").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body = body_as_string(&test::read_body(res).await);
    let new_york = body.find("New York, NY").unwrap();
    let san_francisco = body.find("San Francisco, CA").unwrap();
    // Areas are ordered by state
    assert!(san_francisco < new_york);
    assert!(body.contains("The Musical Hop"));
}

#[actix_web::test]
async fn test_show_venue_partitions_shows() {
    let (_store, state) = create_sample_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;
    let req = test::TestRequest::get().uri("/venues/3").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body = body_as_string(&test::read_body(res).await);
    assert!(body.contains("Park Square Live Music &amp; Coffee"));
    assert!(body.contains("1 Upcoming Show"));
    assert!(body.contains("1 Past Show"));
    assert!(body.contains("The Wild Sax Band"));
    assert!(body.contains("Matt Quevedo"));
    assert!(!body.contains("Guns N Petals"));
}

#[actix_web::test]
async fn test_show_artist() {
    let (_store, state) = create_sample_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;
    let req = test::TestRequest::get().uri("/artists/3").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body = body_as_string(&test::read_body(res).await);
    assert!(body.contains("2 Upcoming Shows"));
    assert!(body.contains("0 Past Shows"));
    assert!(body.contains("The Musical Hop"));
}

#[actix_web::test]
async fn test_unknown_pages_and_entities() {
    let (_store, state) = create_sample_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;
    for uri in ["/venues/42", "/artists/42", "/venues/abc", "/nothing/here"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), http::StatusCode::NOT_FOUND, "{}", uri);
        let body = body_as_string(&test::read_body(res).await);
        assert!(body.contains("<html"), "{}", uri);
    }
}

#[actix_web::test]
async fn test_database_error_gives_error_page() {
    let (store, state) = create_sample_state();
    store.data.lock().unwrap().next_error =
        Some(StoreError::ConnectionError("connection refused".to_owned()));
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;
    let req = test::TestRequest::get().uri("/venues").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_as_string(&test::read_body(res).await);
    assert!(body.contains("The database is currently not reachable"));
}

#[actix_web::test]
async fn test_create_venue() {
    let (store, state) = create_sample_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;
    let req = test::TestRequest::post()
        .uri("/venues/create")
        .set_form([
            ("name", "The Blue Note"),
            ("city", "New York"),
            ("state", "ny"),
            ("address", "131 W 3rd St"),
            ("phone", "212-475-8592"),
            ("genres", "Jazz, Blues"),
            ("website_link", "https://www.bluenotejazz.com"),
            ("facebook_link", ""),
            ("image_link", ""),
            ("seeking_talent", "y"),
            ("seeking_description", ""),
        ])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::SEE_OTHER);
    assert!(location(&res).ends_with("/venues/4"));
    let cookie = res.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cookie.starts_with("flash="));

    let data = store.data.lock().unwrap();
    let venue = data.venues.iter().find(|v| v.venue.id == 4).unwrap();
    assert_eq!(venue.venue.name, "The Blue Note");
    assert_eq!(venue.venue.state, "NY");
    assert!(venue.venue.seeking_talent);
    assert_eq!(venue.venue.seeking_description, None);
    assert_eq!(venue.venue.facebook_link, None);
    assert_eq!(venue.genres, vec!["Jazz".to_owned(), "Blues".to_owned()]);
}

#[actix_web::test]
async fn test_create_venue_validation_error() {
    let (store, state) = create_sample_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;
    let req = test::TestRequest::post()
        .uri("/venues/create")
        .set_form([
            ("name", " "),
            ("city", "New York"),
            ("state", "XX"),
            ("address", "131 W 3rd St"),
            ("phone", "212-475-8592"),
            ("genres", ""),
            ("website_link", "www.example.com"),
            ("facebook_link", ""),
            ("image_link", ""),
            ("seeking_description", ""),
        ])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body = body_as_string(&test::read_body(res).await);
    assert!(body.contains("Must not be empty"));
    assert!(body.contains("Not a known US state"));
    assert!(body.contains("Not a valid URL"));
    assert!(body.contains("The submitted data is invalid"));
    // User input is kept in the form
    assert!(body.contains("131 W 3rd St"));
    assert_eq!(store.data.lock().unwrap().venues.len(), 3);
}

#[actix_web::test]
async fn test_create_venue_overlong_fields() {
    let (store, state) = create_sample_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;
    let name = "x".repeat(300);
    let phone = format!("+1{}", "0".repeat(31));
    let req = test::TestRequest::post()
        .uri("/venues/create")
        .set_form([
            ("name", name.as_str()),
            ("city", "New York"),
            ("state", "NY"),
            ("address", "131 W 3rd St"),
            ("phone", phone.as_str()),
            ("genres", "Jazz"),
            ("website_link", ""),
            ("facebook_link", ""),
            ("image_link", ""),
            ("seeking_description", ""),
        ])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body = body_as_string(&test::read_body(res).await);
    assert!(body.contains("Must not be longer than 256 characters"));
    assert!(body.contains("Not a valid phone number"));
    assert_eq!(store.data.lock().unwrap().venues.len(), 3);
}

#[actix_web::test]
async fn test_edit_artist_overlong_phone() {
    let (store, state) = create_sample_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;
    let phone = format!("326-123-{}", "5".repeat(25));
    let req = test::TestRequest::post()
        .uri("/artists/1/edit")
        .set_form([
            ("name", "Guns N Petals"),
            ("city", "San Francisco"),
            ("state", "CA"),
            ("address", "1015 Folsom Street"),
            ("phone", phone.as_str()),
            ("genres", "Rock n Roll"),
            ("website_link", ""),
            ("facebook_link", ""),
            ("image_link", ""),
            ("seeking_description", ""),
        ])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body = body_as_string(&test::read_body(res).await);
    assert!(body.contains("Not a valid phone number"));
    assert!(body.contains(&phone));
    let data = store.data.lock().unwrap();
    let artist = data.artists.iter().find(|a| a.artist.id == 1).unwrap();
    assert_eq!(artist.artist.phone, "326-123-5000");
}

#[actix_web::test]
async fn test_edit_venue_replaces_genres() {
    let (store, state) = create_sample_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;

    let req = test::TestRequest::get().uri("/venues/1/edit").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body = body_as_string(&test::read_body(res).await);
    assert!(body.contains("Jazz, Reggae, Swing, Classical, Folk"));

    let req = test::TestRequest::post()
        .uri("/venues/1/edit")
        .set_form([
            ("name", "The Musical Hop"),
            ("city", "San Francisco"),
            ("state", "CA"),
            ("address", "1015 Folsom Street"),
            ("phone", "123-123-1234"),
            ("genres", "Folk"),
            ("website_link", ""),
            ("facebook_link", ""),
            ("image_link", ""),
            ("seeking_description", ""),
        ])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::SEE_OTHER);
    assert!(location(&res).ends_with("/venues/1"));

    let data = store.data.lock().unwrap();
    let venue = data.venues.iter().find(|v| v.venue.id == 1).unwrap();
    assert_eq!(venue.genres, vec!["Folk".to_owned()]);
    assert_eq!(venue.venue.website, None);
    assert!(!venue.venue.seeking_talent);
}

#[actix_web::test]
async fn test_edit_unknown_artist() {
    let (_store, state) = create_sample_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;
    let req = test::TestRequest::get().uri("/artists/42/edit").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_delete_venue() {
    let (store, state) = create_sample_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;

    let req = test::TestRequest::get().uri("/venues/3/delete").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body = body_as_string(&test::read_body(res).await);
    assert!(body.contains("2 shows at this venue will be deleted as well."));

    let req = test::TestRequest::post().uri("/venues/3/delete").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::SEE_OTHER);
    assert!(location(&res).ends_with("/venues"));
    {
        let data = store.data.lock().unwrap();
        assert!(data.venues.iter().all(|v| v.venue.id != 3));
        assert!(data.shows.iter().all(|s| s.venue_id != 3));
        assert_eq!(data.shows.len(), 2);
    }

    let req = test::TestRequest::post().uri("/venues/3/delete").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_delete_artist_by_method() {
    let (store, state) = create_sample_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;
    let req = test::TestRequest::delete().uri("/artists/1").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::SEE_OTHER);
    assert!(location(&res).ends_with("/artists"));
    let data = store.data.lock().unwrap();
    assert!(data.artists.iter().all(|a| a.artist.id != 1));
    assert!(data.shows.iter().all(|s| s.artist_id != 1));
}

#[actix_web::test]
async fn test_search() {
    let (_store, state) = create_sample_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/venues/search")
        .set_form([("search_term", "MUSIC")])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body = body_as_string(&test::read_body(res).await);
    assert!(body.contains("Number of search results for \"MUSIC\": 2"));
    assert!(body.contains("The Musical Hop"));
    assert!(body.contains("Park Square Live Music &amp; Coffee"));
    assert!(!body.contains("The Dueling Pianos Bar"));

    let req = test::TestRequest::post()
        .uri("/artists/search")
        .set_form([("search_term", "band")])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body = body_as_string(&test::read_body(res).await);
    assert!(body.contains("Number of search results for \"band\": 1"));
    assert!(body.contains("The Wild Sax Band"));
    assert!(!body.contains("Guns N Petals"));
}

#[actix_web::test]
async fn test_shows_list() {
    let (_store, state) = create_sample_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;
    let req = test::TestRequest::get().uri("/shows").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body = body_as_string(&test::read_body(res).await);
    let first = body.find("Tue, 05/21/2019, 9:30 PM").unwrap();
    let last = body.find("Sun, 04/08/2035, 8:00 PM").unwrap();
    assert!(first < last);
}

#[actix_web::test]
async fn test_create_show() {
    let (store, state) = create_sample_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;
    let req = test::TestRequest::post()
        .uri("/shows/create")
        .set_form([
            ("artist_id", "1"),
            ("venue_id", "2"),
            ("start_time", "2035-05-01T19:30"),
        ])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::SEE_OTHER);
    assert!(location(&res).ends_with("/shows"));
    let data = store.data.lock().unwrap();
    assert_eq!(data.shows.len(), 5);
    let start_time: chrono::DateTime<chrono::Utc> = "2035-05-01T19:30:00Z".parse().unwrap();
    assert!(data
        .shows
        .iter()
        .any(|s| s.artist_id == 1 && s.venue_id == 2 && s.start_time == start_time));
}

#[actix_web::test]
async fn test_create_duplicate_show() {
    let (store, state) = create_sample_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;
    let req = test::TestRequest::post()
        .uri("/shows/create")
        .set_form([
            ("artist_id", "3"),
            ("venue_id", "3"),
            ("start_time", "2036-01-01T20:00"),
        ])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body = body_as_string(&test::read_body(res).await);
    assert!(body.contains("could not be saved, because it exists already"));
    assert_eq!(store.data.lock().unwrap().shows.len(), 4);
}

#[actix_web::test]
async fn test_create_show_unknown_artist() {
    let (store, state) = create_sample_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;
    let req = test::TestRequest::post()
        .uri("/shows/create")
        .set_form([
            ("artist_id", "42"),
            ("venue_id", "1"),
            ("start_time", "not a date"),
        ])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body = body_as_string(&test::read_body(res).await);
    assert!(body.contains("Unknown id"));
    assert!(body.contains("Not a valid date and time"));
    assert_eq!(store.data.lock().unwrap().shows.len(), 4);
}

#[actix_web::test]
async fn test_create_artist_transaction_conflict() {
    let (store, state) = create_sample_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;
    store.data.lock().unwrap().next_error = Some(StoreError::TransactionConflict);
    let req = test::TestRequest::post()
        .uri("/artists/create")
        .set_form([
            ("name", "The Fiery Fiddlers"),
            ("city", "Austin"),
            ("state", "TX"),
            ("address", "1 Congress Ave"),
            ("phone", "512-555-0100"),
            ("genres", "Country"),
            ("website_link", ""),
            ("facebook_link", ""),
            ("image_link", ""),
            ("seeking_description", ""),
        ])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body = body_as_string(&test::read_body(res).await);
    assert!(body.contains("concurrent database access"));
    assert!(body.contains("The Fiery Fiddlers"));
    assert_eq!(store.data.lock().unwrap().artists.len(), 3);
}

#[actix_web::test]
async fn test_static_resources() {
    let (_store, state) = create_sample_state();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;
    let req = test::TestRequest::get().uri("/static/style.css").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    assert_eq!(
        res.headers().get(http::header::CONTENT_TYPE).unwrap(),
        "text/css"
    );
}
