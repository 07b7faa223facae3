//! Ticketmaster Discovery API client.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::config::FinderConfig;
use crate::error::{FinderError, FinderResult};
use crate::event::Event;
use crate::search_state::{SearchState, SearchStateChannel};

const EVENTS_PATH: &str = "discovery/v2/events";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Deserialize)]
struct SearchResponse {
    page: Page,
    #[serde(rename = "_embedded")]
    embedded: Option<EmbeddedEvents>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Page {
    total_elements: u64,
}

#[derive(Debug, Deserialize)]
struct EmbeddedEvents {
    #[serde(default)]
    events: Vec<Event>,
}

/// Parse a search response body into its events.
///
/// A response reporting zero results carries no `_embedded` block at all.
pub fn parse_search_response(body: &str) -> FinderResult<Vec<Event>> {
    let response: SearchResponse = serde_json::from_str(body)?;

    if response.page.total_elements == 0 {
        return Ok(Vec::new());
    }

    response.embedded.map(|e| e.events).ok_or_else(|| {
        FinderError::Api(format!(
            "Response reports {} events but contains none",
            response.page.total_elements
        ))
    })
}

pub struct TicketmasterClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    locale: String,
    page_size: u32,
}

impl TicketmasterClient {
    pub fn new(base_url: &str, api_key: &str, locale: &str, page_size: u32) -> FinderResult<Self> {
        // Url::join drops the last path segment unless it ends with a slash.
        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|e| FinderError::Config(format!("Invalid API base URL '{base_url}': {e}")))?;

        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(TicketmasterClient {
            http,
            base_url,
            api_key: api_key.to_string(),
            locale: locale.to_string(),
            page_size,
        })
    }

    pub fn from_config(config: &FinderConfig) -> FinderResult<Self> {
        Self::new(
            &config.api_base_url,
            config.api_key()?,
            &config.locale,
            config.page_size,
        )
    }

    pub fn search_url(&self, city: &str) -> FinderResult<Url> {
        let mut url = self
            .base_url
            .join(EVENTS_PATH)
            .map_err(|e| FinderError::Config(e.to_string()))?;

        url.query_pairs_mut()
            .append_pair("apikey", &self.api_key)
            .append_pair("locale", &self.locale)
            .append_pair("size", &self.page_size.to_string())
            .append_pair("city", city);

        Ok(url)
    }

    /// Fetch events in `city`. An empty result is not an error.
    pub async fn search(&self, city: &str) -> FinderResult<Vec<Event>> {
        let url = self.search_url(city)?;
        tracing::info!(city, "searching events");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(FinderError::Api(format!("{status}: {}", error_message(&body))));
        }

        let events = parse_search_response(&body)?;
        tracing::info!(city, count = events.len(), "retrieved events");
        Ok(events)
    }
}

/// Ticketmaster errors look like `{"fault": {"faultstring": "..."}}` or
/// `{"errors": [{"detail": "..."}]}`; fall back to the raw body.
fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };

    value["fault"]["faultstring"]
        .as_str()
        .or_else(|| value["errors"][0]["detail"].as_str())
        .map(String::from)
        .unwrap_or_else(|| body.trim().to_string())
}

/// Search `city` and publish the outcome as the current search state.
pub async fn search_and_publish(
    client: &TicketmasterClient,
    channel: &SearchStateChannel,
    city: &str,
) -> FinderResult<SearchState> {
    let city = city.trim();
    if city.is_empty() {
        return Err(FinderError::InvalidSearch("City must not be empty".into()));
    }

    let events = client.search(city).await?;
    let state = SearchState::from_search(city, events);
    channel.publish(state.clone())?;
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> TicketmasterClient {
        TicketmasterClient::new(base, "secret", "*", 200).unwrap()
    }

    #[test]
    fn test_search_url_carries_query_parameters() {
        let url = client("https://app.ticketmaster.com")
            .search_url("New York")
            .unwrap();

        assert_eq!(url.path(), "/discovery/v2/events");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("apikey".into(), "secret".into()),
                ("locale".into(), "*".into()),
                ("size".into(), "200".into()),
                ("city".into(), "New York".into()),
            ]
        );
    }

    #[test]
    fn test_search_url_keeps_base_path() {
        let url = client("http://localhost:8080/proxy").search_url("Oslo").unwrap();
        assert_eq!(url.path(), "/proxy/discovery/v2/events");
    }

    #[test]
    fn test_parse_zero_results() {
        let body = r#"{"page": {"size": 200, "totalElements": 0, "totalPages": 0, "number": 0}}"#;
        assert!(parse_search_response(body).unwrap().is_empty());
    }

    #[test]
    fn test_parse_embedded_events() {
        let body = r#"{
            "_embedded": {"events": [
                {"id": "vvG1", "name": "Show", "_embedded": {"venues": [
                    {"address": {"line1": "1 Main St"},
                     "location": {"latitude": "40.7", "longitude": "-74.0"}}
                ]}}
            ]},
            "page": {"totalElements": 1}
        }"#;

        let events = parse_search_response(body).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "vvG1");
        assert_eq!(events[0].address().unwrap(), "1 Main St");
    }

    #[test]
    fn test_parse_inconsistent_response_is_an_error() {
        let body = r#"{"page": {"totalElements": 3}}"#;
        assert!(matches!(parse_search_response(body), Err(FinderError::Api(_))));
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(r#"{"fault": {"faultstring": "Invalid ApiKey"}}"#),
            "Invalid ApiKey"
        );
        assert_eq!(
            error_message(r#"{"errors": [{"detail": "Rate limit"}]}"#),
            "Rate limit"
        );
        assert_eq!(error_message("Bad Gateway\n"), "Bad Gateway");
    }
}
