//! Terminal rendering for eventfinder types.
//!
//! Extension traits that add colored output to eventfinder-core types
//! using owo_colors.

use eventfinder_core::event::Event;
use eventfinder_core::map::{EmptyMap, MapView, Marker};
use eventfinder_core::search_state::SearchState;
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    /// One-line summary: name, date and id.
    fn render(&self) -> String {
        let date = self.local_date().unwrap_or("TBA");
        format!("{} {} {}", self.name.bold(), date.dimmed(), format!("({})", self.id).dimmed())
    }
}

/// A list row with a bookmark marker.
pub fn render_search_row(event: &Event, saved: bool) -> String {
    let mark = if saved {
        "★".yellow().to_string()
    } else {
        "☆".dimmed().to_string()
    };
    format!("{} {}", mark, event.render())
}

/// A saved-events row with a reminder marker.
pub fn render_saved_row(event: &Event, has_reminder: bool) -> String {
    let mark = if has_reminder {
        "⏰".to_string()
    } else {
        "  ".to_string()
    };
    format!("{} {}", mark, event.render())
}

fn no_results(city: &str) -> String {
    format!("No Events found in City {city}")
}

/// What to say instead of a result list, or `None` when there are results.
pub fn render_search_status(state: &SearchState) -> Option<String> {
    match state {
        SearchState::NeverSearched => {
            Some("No city searched. Search for one with: eventfinder search <city>".to_string())
        }
        SearchState::NoResults { city } => Some(no_results(city)),
        SearchState::Results { .. } => None,
    }
}

/// Full detail view, one field per line.
pub fn render_details(event: &Event) -> Vec<String> {
    let na = "N/A";
    let field = |label: &str, value: &str| format!("{} {}", format!("{label}:").dimmed(), value);

    let mut lines = vec![
        field("Name", &event.name.bold().to_string()),
        field("Date", event.local_date().unwrap_or(na)),
        field("Time", event.local_time().unwrap_or(na)),
        field("Venue", event.venue_name().unwrap_or(na)),
        field("City", event.city_name().unwrap_or(na)),
        field("Country", event.country_name().unwrap_or(na)),
        field("Address", event.address().unwrap_or(na)),
        field("Price Range", &event.price_label()),
    ];

    if let Some(url) = event.image_url() {
        lines.push(field("Image", url));
    }
    lines.push(field("Id", &event.id));

    lines
}

impl Render for Marker<'_> {
    fn render(&self) -> String {
        format!(
            "📍 {} {} {}",
            self.title().bold(),
            self.address,
            format!("[{}]", self.coordinate).dimmed()
        )
    }
}

impl Render for MapView<'_> {
    fn render(&self) -> String {
        match self {
            MapView::Empty(EmptyMap::NeverSearched) => {
                "No city searched. Please search for a city first."
                    .dimmed()
                    .to_string()
            }
            MapView::Empty(EmptyMap::NoResults { city }) => {
                no_results(city).dimmed().to_string()
            }
            MapView::Ready {
                city,
                markers,
                region,
            } => {
                let mut lines = vec![format!("🗺  {}", city.bold())];
                lines.push(
                    format!(
                        "   center {:.5}, {:.5}  span {:.5}° × {:.5}°",
                        region.latitude,
                        region.longitude,
                        region.latitude_delta,
                        region.longitude_delta
                    )
                    .dimmed()
                    .to_string(),
                );

                for marker in markers {
                    lines.push(format!("   {}", marker.render()));
                    for event in &marker.events {
                        lines.push(format!("      {}", event.render()));
                    }
                }

                lines.join("\n")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(value: serde_json::Value) -> Event {
        serde_json::from_value(value).unwrap()
    }

    fn line<'a>(lines: &'a [String], label: &str) -> &'a str {
        lines
            .iter()
            .find(|l| l.contains(&format!("{label}:")))
            .unwrap_or_else(|| panic!("no {label} line in {lines:?}"))
    }

    #[test]
    fn test_details_fall_back_to_na() {
        let lines = render_details(&event(json!({ "id": "bare", "name": "Quiz Night" })));

        for label in ["Date", "Time", "Venue", "City", "Country", "Address", "Price Range"] {
            assert!(line(&lines, label).ends_with("N/A"), "{label} should be N/A");
        }
        assert!(line(&lines, "Id").ends_with("bare"));
        assert!(!lines.iter().any(|l| l.contains("Image:")));
    }

    #[test]
    fn test_details_show_venue_and_price() {
        let lines = render_details(&event(json!({
            "id": "e1",
            "name": "Opera",
            "dates": { "start": { "localDate": "2025-06-14", "localTime": "19:30:00" } },
            "priceRanges": [{ "min": 25.0, "max": 89.5, "currency": "EUR" }],
            "images": [{ "url": "https://img.example/e1.jpg" }],
            "_embedded": { "venues": [{
                "name": "Staatsoper",
                "address": { "line1": "Max-Joseph-Platz 2" },
                "city": { "name": "München" },
                "country": { "name": "Germany" }
            }]}
        })));

        assert!(line(&lines, "Date").ends_with("2025-06-14"));
        assert!(line(&lines, "Venue").ends_with("Staatsoper"));
        assert!(line(&lines, "Address").ends_with("Max-Joseph-Platz 2"));
        assert!(line(&lines, "Price Range").ends_with("25 - 89.5 EUR"));
        assert!(line(&lines, "Image").ends_with("https://img.example/e1.jpg"));
    }

    #[test]
    fn test_search_status_wording() {
        assert_eq!(
            render_search_status(&SearchState::NoResults {
                city: "Reykjavik".into()
            })
            .as_deref(),
            Some("No Events found in City Reykjavik")
        );
        assert!(
            render_search_status(&SearchState::NeverSearched)
                .unwrap()
                .starts_with("No city searched")
        );

        let results = SearchState::from_search(
            "Oslo",
            vec![event(json!({ "id": "e1", "name": "Gig" }))],
        );
        assert_eq!(render_search_status(&results), None);
    }
}
