//! OMDb wire format and response interpretation.
//!
//! The service answers every request with HTTP 200 and a JSON body whose
//! `Response` field is `"True"` or `"False"`. Interpretation is a pure function
//! of the requested page, the HTTP status and the body, so it is tested here
//! without any network.

use crate::domain::movie::available;
use crate::domain::{DetailRecord, MediaType, PageResult, Rating, ResultItem, SearchError};
use serde::Deserialize;

/// Message used when a falsy search response carries no `Error`.
const DEFAULT_NO_RESULTS: &str = "No movies found for your search.";

#[derive(Debug, Deserialize)]
struct SearchBody {
    #[serde(rename = "Response")]
    response: Option<String>,
    #[serde(rename = "Search", default)]
    search: Vec<SearchHit>,
    #[serde(rename = "totalResults")]
    total_results: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Type", default)]
    kind: String,
    #[serde(rename = "Poster")]
    poster: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DetailBody {
    response: Option<String>,
    error: Option<String>,
    title: Option<String>,
    year: Option<String>,
    rated: Option<String>,
    runtime: Option<String>,
    genre: Option<String>,
    director: Option<String>,
    writer: Option<String>,
    actors: Option<String>,
    plot: Option<String>,
    language: Option<String>,
    country: Option<String>,
    box_office: Option<String>,
    poster: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(default)]
    ratings: Vec<WireRating>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireRating {
    source: String,
    value: String,
}

fn is_truthy(flag: &str) -> bool {
    flag.trim().eq_ignore_ascii_case("true")
}

/// Rejects non-2xx statuses, keeping the service's `Error` text when it sent one.
fn check_status(status: u16, body: &str) -> Result<(), SearchError> {
    if (200..300).contains(&status) {
        return Ok(());
    }

    let service_error = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("Error").and_then(|e| e.as_str()).map(String::from));

    Err(SearchError::transport(match service_error {
        Some(message) => format!("HTTP {status}: {message}"),
        None => format!("HTTP {status}"),
    }))
}

/// Interprets a search response for `page`.
///
/// # Errors
///
/// - falsy `Response` on page 1: [`SearchError::NoResults`]
/// - falsy `Response` on a later page: [`SearchError::NoMorePages`]
/// - non-2xx status, undecodable body, missing `Response` or a non-numeric
///   `totalResults`: [`SearchError::Transport`]
pub fn interpret_search(page: u32, status: u16, body: &str) -> Result<PageResult, SearchError> {
    check_status(status, body)?;

    let parsed: SearchBody = serde_json::from_str(body)
        .map_err(|e| SearchError::transport(format!("malformed search response: {e}")))?;

    let flag = parsed
        .response
        .ok_or_else(|| SearchError::transport("search response has no Response field"))?;

    if !is_truthy(&flag) {
        return if page > 1 {
            Err(SearchError::NoMorePages)
        } else {
            Err(SearchError::NoResults {
                message: parsed
                    .error
                    .unwrap_or_else(|| DEFAULT_NO_RESULTS.to_string()),
            })
        };
    }

    let total_available = parsed
        .total_results
        .as_deref()
        .map(str::trim)
        .ok_or_else(|| SearchError::transport("search response has no totalResults"))?
        .parse::<u64>()
        .map_err(|e| SearchError::transport(format!("invalid totalResults: {e}")))?;

    let items = parsed
        .search
        .into_iter()
        .map(|hit| ResultItem {
            id: hit.imdb_id,
            title: hit.title,
            year: hit.year,
            poster_url: available(hit.poster.as_deref()),
            media_type: MediaType::from_service(&hit.kind),
        })
        .collect();

    Ok(PageResult {
        items,
        total_available,
    })
}

/// Interprets a detail response for `id`.
///
/// # Errors
///
/// Falsy `Response` maps to [`SearchError::DetailNotFound`]; transport-level
/// problems map to [`SearchError::Transport`].
pub fn interpret_detail(id: &str, status: u16, body: &str) -> Result<DetailRecord, SearchError> {
    check_status(status, body)?;

    let parsed: DetailBody = serde_json::from_str(body)
        .map_err(|e| SearchError::transport(format!("malformed detail response: {e}")))?;

    let flag = parsed
        .response
        .as_deref()
        .ok_or_else(|| SearchError::transport("detail response has no Response field"))?;

    if !is_truthy(flag) {
        tracing::debug!(id = %id, error = ?parsed.error, "detail lookup reported no title");
        return Err(SearchError::DetailNotFound { id: id.to_string() });
    }

    let genres = parsed
        .genre
        .as_deref()
        .and_then(|g| available(Some(g)))
        .map(|g| {
            g.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    Ok(DetailRecord {
        id: available(parsed.imdb_id.as_deref()).unwrap_or_else(|| id.to_string()),
        title: available(parsed.title.as_deref()).unwrap_or_else(|| id.to_string()),
        year: available(parsed.year.as_deref()),
        rated: available(parsed.rated.as_deref()),
        runtime: available(parsed.runtime.as_deref()),
        genres,
        director: available(parsed.director.as_deref()),
        writer: available(parsed.writer.as_deref()),
        actors: available(parsed.actors.as_deref()),
        plot: available(parsed.plot.as_deref()),
        language: available(parsed.language.as_deref()),
        country: available(parsed.country.as_deref()),
        box_office: available(parsed.box_office.as_deref()),
        poster_url: available(parsed.poster.as_deref()),
        imdb_rating: available(parsed.imdb_rating.as_deref()),
        ratings: parsed
            .ratings
            .into_iter()
            .map(|r| Rating {
                source: r.source,
                value: r.value,
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BATMAN_PAGE: &str = r#"{
        "Search": [
            {"Title": "Batman Begins", "Year": "2005", "imdbID": "tt0372784", "Type": "movie", "Poster": "https://img/bb.jpg"},
            {"Title": "Batman: The Animated Series", "Year": "1992–1995", "imdbID": "tt0103359", "Type": "series", "Poster": "N/A"}
        ],
        "totalResults": "25",
        "Response": "True"
    }"#;

    #[test]
    fn search_success_maps_items_and_total() {
        let page = interpret_search(1, 200, BATMAN_PAGE).unwrap();
        assert_eq!(page.total_available, 25);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].id, "tt0372784");
        assert_eq!(page.items[0].poster_url.as_deref(), Some("https://img/bb.jpg"));
        assert_eq!(page.items[1].poster_url, None);
        assert_eq!(page.items[1].media_type, MediaType::Series);
    }

    #[test]
    fn falsy_response_depends_on_page() {
        let body = r#"{"Response":"False","Error":"Movie not found!"}"#;
        assert_eq!(
            interpret_search(1, 200, body),
            Err(SearchError::NoResults {
                message: "Movie not found!".to_string()
            })
        );
        assert_eq!(interpret_search(3, 200, body), Err(SearchError::NoMorePages));
    }

    #[test]
    fn falsy_response_without_message_uses_default() {
        let err = interpret_search(1, 200, r#"{"Response":"False"}"#).unwrap_err();
        assert_eq!(
            err,
            SearchError::NoResults {
                message: DEFAULT_NO_RESULTS.to_string()
            }
        );
    }

    #[test]
    fn malformed_bodies_are_transport_errors() {
        for body in [
            "<html>gateway timeout</html>",
            r#"{"Search": []}"#,
            r#"{"Response":"True","Search":[],"totalResults":"lots"}"#,
            r#"{"Response":"True","Search":[]}"#,
        ] {
            assert!(
                matches!(interpret_search(1, 200, body), Err(SearchError::Transport { .. })),
                "body should be rejected: {body}"
            );
        }
    }

    #[test]
    fn non_success_status_keeps_service_message() {
        let err = interpret_search(1, 401, r#"{"Response":"False","Error":"Invalid API key!"}"#)
            .unwrap_err();
        assert_eq!(err, SearchError::transport("HTTP 401: Invalid API key!"));

        let err = interpret_detail("tt1", 503, "unavailable").unwrap_err();
        assert_eq!(err, SearchError::transport("HTTP 503"));
    }

    #[test]
    fn detail_maps_optional_fields_and_ratings() {
        let body = r#"{
            "Title": "The Matrix", "Year": "1999", "Rated": "R", "Runtime": "136 min",
            "Genre": "Action, Sci-Fi", "Director": "Lana Wachowski, Lilly Wachowski",
            "Writer": "N/A", "Actors": "Keanu Reeves", "Plot": "A hacker learns...",
            "Language": "English", "Country": "United States", "BoxOffice": "N/A",
            "Poster": "N/A", "imdbRating": "8.7", "imdbID": "tt0133093",
            "Ratings": [
                {"Source": "Internet Movie Database", "Value": "8.7/10"},
                {"Source": "Rotten Tomatoes", "Value": "83%"},
                {"Source": "Metacritic", "Value": "73/100"}
            ],
            "Response": "True"
        }"#;

        let record = interpret_detail("tt0133093", 200, body).unwrap();
        assert_eq!(record.title, "The Matrix");
        assert_eq!(record.genres, ["Action", "Sci-Fi"]);
        assert_eq!(record.writer, None);
        assert_eq!(record.box_office, None);
        assert_eq!(record.poster_url, None);
        assert_eq!(record.runtime.as_deref(), Some("136 min"));
        assert_eq!(record.ratings.len(), 3);
        assert_eq!(record.rating_from("Metacritic"), Some("73/100"));
    }

    #[test]
    fn detail_falsy_is_not_found() {
        let err = interpret_detail("tt000", 200, r#"{"Response":"False","Error":"Incorrect IMDb ID."}"#)
            .unwrap_err();
        assert_eq!(err, SearchError::DetailNotFound { id: "tt000".to_string() });
    }

    #[test]
    fn detail_without_id_falls_back_to_requested_id() {
        let record = interpret_detail("tt42", 200, r#"{"Response":"True","Title":"Untitled"}"#).unwrap();
        assert_eq!(record.id, "tt42");
        assert!(record.genres.is_empty());
        assert!(record.ratings.is_empty());
    }
}
