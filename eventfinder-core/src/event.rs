//! Ticketmaster event types.
//!
//! These mirror the Discovery API v2 event schema closely enough to render
//! lists, details and map markers. Fields we don't model are kept in `extra`
//! so an event written back to the store is the same document we received.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::{FinderError, FinderResult};
use crate::geo::Coordinate;

const VENUE_PATH: &str = "_embedded.venues[0]";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dates: Option<EventDates>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<Image>,
    #[serde(
        rename = "priceRanges",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub price_ranges: Option<Vec<PriceRange>>,
    #[serde(rename = "_embedded", default, skip_serializing_if = "Option::is_none")]
    pub embedded: Option<EventEmbedded>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<EventStart>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventStart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub currency: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEmbedded {
    #[serde(default)]
    pub venues: Vec<Venue>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<Named>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<Named>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line1: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: Degrees,
    pub longitude: Degrees,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The API sends coordinates as strings; accept plain numbers too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Degrees {
    Number(f64),
    Text(String),
}

impl Degrees {
    pub fn parse(&self) -> Option<f64> {
        match self {
            Degrees::Number(n) => Some(*n),
            Degrees::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for Degrees {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Degrees::Number(n) => write!(f, "{n}"),
            Degrees::Text(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Named {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Event {
    fn missing(&self, field: &str) -> FinderError {
        FinderError::MissingField {
            event_id: self.id.clone(),
            field: field.to_string(),
        }
    }

    /// The primary venue (`_embedded.venues[0]`).
    pub fn venue(&self) -> FinderResult<&Venue> {
        self.embedded
            .as_ref()
            .and_then(|e| e.venues.first())
            .ok_or_else(|| self.missing(VENUE_PATH))
    }

    /// Street address of the primary venue, used as the map grouping key.
    pub fn address(&self) -> FinderResult<&str> {
        self.venue()?
            .address
            .as_ref()
            .and_then(|a| a.line1.as_deref())
            .ok_or_else(|| self.missing(&format!("{VENUE_PATH}.address.line1")))
    }

    /// Geographic position of the primary venue.
    ///
    /// Unparseable or out-of-range values are an error rather than a default
    /// position, so a bad record never lands on a wrong spot on the map.
    pub fn coordinate(&self) -> FinderResult<Coordinate> {
        let location = self
            .venue()?
            .location
            .as_ref()
            .ok_or_else(|| self.missing(&format!("{VENUE_PATH}.location")))?;

        let invalid = |reason: String| FinderError::InvalidCoordinate {
            event_id: self.id.clone(),
            reason,
        };

        let latitude = location
            .latitude
            .parse()
            .ok_or_else(|| invalid(format!("latitude '{}' is not a number", location.latitude)))?;
        let longitude = location.longitude.parse().ok_or_else(|| {
            invalid(format!("longitude '{}' is not a number", location.longitude))
        })?;

        Coordinate::new(latitude, longitude).map_err(invalid)
    }

    pub fn start(&self) -> Option<&EventStart> {
        self.dates.as_ref().and_then(|d| d.start.as_ref())
    }

    pub fn local_date(&self) -> Option<&str> {
        self.start().and_then(|s| s.local_date.as_deref())
    }

    pub fn local_time(&self) -> Option<&str> {
        self.start().and_then(|s| s.local_time.as_deref())
    }

    /// Exact start instant, required for scheduling a reminder.
    pub fn start_date_time(&self) -> FinderResult<DateTime<Utc>> {
        self.start()
            .and_then(|s| s.date_time)
            .ok_or_else(|| self.missing("dates.start.dateTime"))
    }

    pub fn image_url(&self) -> Option<&str> {
        self.images.first().map(|i| i.url.as_str())
    }

    pub fn venue_name(&self) -> Option<&str> {
        self.venue().ok().and_then(|v| v.name.as_deref())
    }

    pub fn city_name(&self) -> Option<&str> {
        self.venue()
            .ok()
            .and_then(|v| v.city.as_ref())
            .map(|c| c.name.as_str())
    }

    pub fn country_name(&self) -> Option<&str> {
        self.venue()
            .ok()
            .and_then(|v| v.country.as_ref())
            .map(|c| c.name.as_str())
    }

    /// First price range as "min - max CUR", or "N/A".
    pub fn price_label(&self) -> String {
        let Some(range) = self.price_ranges.as_ref().and_then(|r| r.first()) else {
            return "N/A".to_string();
        };

        let amount = |v: Option<f64>| v.map(|n| n.to_string()).unwrap_or_else(|| "?".into());
        let label = format!("{} - {}", amount(range.min), amount(range.max));

        match &range.currency {
            Some(currency) => format!("{label} {currency}"),
            None => label,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    /// Build an event the way the API returns it.
    pub(crate) fn make_event(id: &str, address: &str, lat: &str, lng: &str) -> Event {
        serde_json::from_value(json!({
            "id": id,
            "name": format!("Concert {id}"),
            "type": "event",
            "dates": {
                "start": {
                    "localDate": "2025-06-14",
                    "localTime": "19:30:00",
                    "dateTime": "2025-06-14T17:30:00Z"
                },
                "status": { "code": "onsale" }
            },
            "images": [{ "url": format!("https://img.example/{id}.jpg"), "width": 640 }],
            "_embedded": {
                "venues": [{
                    "name": "Olympiahalle",
                    "address": { "line1": address },
                    "location": { "latitude": lat, "longitude": lng },
                    "city": { "name": "München" },
                    "country": { "name": "Germany", "countryCode": "DE" }
                }]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_coordinate_parses_string_degrees() {
        let event = make_event("e1", "Spiridon-Louis-Ring 21", "48.17", "11.55");
        let c = event.coordinate().unwrap();
        assert_eq!(c.latitude, 48.17);
        assert_eq!(c.longitude, 11.55);
    }

    #[test]
    fn test_coordinate_accepts_numeric_degrees() {
        let event: Event = serde_json::from_value(json!({
            "id": "n1",
            "_embedded": { "venues": [{
                "address": { "line1": "Main St 1" },
                "location": { "latitude": 40.5, "longitude": -73.9 }
            }]}
        }))
        .unwrap();
        assert_eq!(event.coordinate().unwrap().longitude, -73.9);
    }

    #[test]
    fn test_coordinate_rejects_garbage() {
        let event = make_event("e2", "Somewhere 1", "north", "11.55");
        assert!(matches!(
            event.coordinate(),
            Err(FinderError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_missing_venue_is_reported_with_path() {
        let event: Event = serde_json::from_value(json!({ "id": "bare" })).unwrap();
        match event.address() {
            Err(FinderError::MissingField { event_id, field }) => {
                assert_eq!(event_id, "bare");
                assert_eq!(field, "_embedded.venues[0]");
            }
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_fields_survive_roundtrip() {
        let event = make_event("e3", "Main St 1", "1.0", "2.0");
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "event");
        assert_eq!(value["dates"]["status"]["code"], "onsale");
        assert_eq!(value["images"][0]["width"], 640);
        assert_eq!(value["_embedded"]["venues"][0]["country"]["countryCode"], "DE");

        let back: Event = serde_json::from_value(value).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_roundtrip_does_not_invent_a_name() {
        let original = json!({
            "id": "anon",
            "_embedded": { "venues": [{
                "location": { "latitude": "1.0", "longitude": "2.0", "accuracy": 3 },
                "city": { "name": "Oslo", "code": "OSL" }
            }]}
        });

        let event: Event = serde_json::from_value(original.clone()).unwrap();
        assert_eq!(serde_json::to_value(&event).unwrap(), original);
    }

    #[test]
    fn test_price_label() {
        let mut event = make_event("e4", "Main St 1", "1.0", "2.0");
        assert_eq!(event.price_label(), "N/A");

        event.price_ranges = Some(vec![PriceRange {
            min: Some(25.0),
            max: Some(89.5),
            currency: Some("EUR".into()),
            extra: Map::new(),
        }]);
        assert_eq!(event.price_label(), "25 - 89.5 EUR");
    }

    #[test]
    fn test_start_date_time_required_for_reminders() {
        let event: Event = serde_json::from_value(json!({ "id": "tba", "dates": { "start": {} } }))
            .unwrap();
        assert!(matches!(
            event.start_date_time(),
            Err(FinderError::MissingField { .. })
        ));
    }
}
