//! `SearchClient` over real HTTP against a mock OMDb server.

use std::io::Write;
use std::time::Duration;

use cinesearch::client::{ReqwestTransport, SearchClient};
use cinesearch::domain::{MediaType, Query, SearchError};
use mockito::Matcher;

fn client(server: &mockito::Server, timeout: Option<Duration>) -> SearchClient<ReqwestTransport> {
    SearchClient::new(ReqwestTransport::new(timeout).unwrap(), "test-key")
        .with_base_url(format!("{}/", server.url()))
}

fn query(raw: &str) -> Query {
    Query::parse(raw).unwrap()
}

#[tokio::test]
async fn search_sends_parameters_and_decodes_page() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("apikey".into(), "test-key".into()),
            Matcher::UrlEncoded("s".into(), "star wars".into()),
            Matcher::UrlEncoded("page".into(), "2".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"Search":[
                {"Title":"Star Wars","Year":"1977","imdbID":"tt0076759","Type":"movie","Poster":"N/A"},
                {"Title":"Star Wars: The Clone Wars","Year":"2008–2020","imdbID":"tt0458290","Type":"series","Poster":"https://img.example/cw.jpg"}
            ],"totalResults":"812","Response":"True"}"#,
        )
        .create_async()
        .await;

    let page = client(&server, None)
        .search_page(&query("  star wars "), 2)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(page.total_available, 812);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].id, "tt0076759");
    assert_eq!(page.items[0].poster_url, None);
    assert_eq!(page.items[1].media_type, MediaType::Series);
    assert_eq!(
        page.items[1].poster_url.as_deref(),
        Some("https://img.example/cw.jpg")
    );
}

#[tokio::test]
async fn falsy_first_page_is_no_results() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"Response":"False","Error":"Movie not found!"}"#)
        .create_async()
        .await;

    let err = client(&server, None)
        .search_page(&query("qqqzzz"), 1)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        SearchError::NoResults {
            message: "Movie not found!".into()
        }
    );
}

#[tokio::test]
async fn falsy_later_page_is_no_more_pages() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(Matcher::UrlEncoded("page".into(), "4".into()))
        .with_status(200)
        .with_body(r#"{"Response":"False","Error":"Movie not found!"}"#)
        .create_async()
        .await;

    let err = client(&server, None)
        .search_page(&query("batman"), 4)
        .await
        .unwrap_err();

    assert_eq!(err, SearchError::NoMorePages);
}

#[tokio::test]
async fn server_errors_are_transport_failures() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"Response":"False","Error":"Invalid API key!"}"#)
        .create_async()
        .await;

    let err = client(&server, None)
        .search_page(&query("alien"), 1)
        .await
        .unwrap_err();

    assert_eq!(err, SearchError::transport("HTTP 401: Invalid API key!"));
}

#[tokio::test]
async fn malformed_body_is_a_transport_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let err = client(&server, None)
        .search_page(&query("alien"), 1)
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::Transport { .. }));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_failure_without_the_key() {
    // Nothing listens on port 1.
    let err = SearchClient::new(
        ReqwestTransport::new(Some(Duration::from_secs(2))).unwrap(),
        "SECRETKEY123",
    )
    .with_base_url("http://127.0.0.1:1/")
    .search_page(&query("alien"), 1)
    .await
    .unwrap_err();

    let SearchError::Transport { detail } = err else {
        panic!("expected a transport failure, got {err:?}");
    };
    assert!(detail.starts_with("request failed"), "{detail}");
    assert!(!detail.contains("SECRETKEY123"), "{detail}");
    assert!(!detail.contains("apikey"), "{detail}");
}

#[tokio::test]
async fn detail_requests_full_plot_and_maps_fields() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("apikey".into(), "test-key".into()),
            Matcher::UrlEncoded("i".into(), "tt0133093".into()),
            Matcher::UrlEncoded("plot".into(), "full".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"{"Title":"The Matrix","Year":"1999","Rated":"R","Runtime":"136 min",
                "Genre":"Action, Sci-Fi","Director":"Lana Wachowski, Lilly Wachowski",
                "Writer":"N/A","Actors":"Keanu Reeves, Laurence Fishburne",
                "Plot":"A computer hacker learns the truth.","Language":"English",
                "Country":"United States","BoxOffice":"$172,076,928","Poster":"N/A",
                "Ratings":[{"Source":"Internet Movie Database","Value":"8.7/10"},
                           {"Source":"Rotten Tomatoes","Value":"83%"}],
                "imdbRating":"8.7","imdbID":"tt0133093","Response":"True"}"#,
        )
        .create_async()
        .await;

    let record = client(&server, None).fetch_detail("tt0133093").await.unwrap();

    mock.assert_async().await;
    assert_eq!(record.title, "The Matrix");
    assert_eq!(record.genres, ["Action", "Sci-Fi"]);
    assert_eq!(record.writer, None);
    assert_eq!(record.rating_from("Rotten Tomatoes"), Some("83%"));
    assert_eq!(record.imdb_rating.as_deref(), Some("8.7"));
}

#[tokio::test]
async fn unknown_title_is_detail_not_found() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"Response":"False","Error":"Incorrect IMDb ID."}"#)
        .create_async()
        .await;

    let err = client(&server, None).fetch_detail("tt0000000").await.unwrap_err();
    assert_eq!(
        err,
        SearchError::DetailNotFound {
            id: "tt0000000".into()
        }
    );
}

#[tokio::test]
async fn slow_responses_time_out() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_chunked_body(|w| {
            std::thread::sleep(Duration::from_millis(800));
            w.write_all(br#"{"Response":"False"}"#)
        })
        .create_async()
        .await;

    let err = client(&server, Some(Duration::from_millis(100)))
        .search_page(&query("alien"), 1)
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::Transport { .. }));
}
