//! Map markers and camera region for the current search.

use crate::cluster;
use crate::error::FinderResult;
use crate::event::Event;
use crate::geo::{self, Coordinate, Region};
use crate::search_state::SearchState;

/// One map pin: every event at a single venue address.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker<'a> {
    pub address: &'a str,
    /// Position of the first event at this address.
    pub coordinate: Coordinate,
    pub events: Vec<&'a Event>,
}

impl Marker<'_> {
    /// "1 Event" / "3 Events"
    pub fn title(&self) -> String {
        let count = self.events.len();
        format!("{} Event{}", count, if count == 1 { "" } else { "s" })
    }
}

/// Why there is nothing to draw.
#[derive(Debug, Clone, PartialEq)]
pub enum EmptyMap<'a> {
    NeverSearched,
    NoResults { city: &'a str },
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapView<'a> {
    Empty(EmptyMap<'a>),
    Ready {
        city: &'a str,
        markers: Vec<Marker<'a>>,
        region: Region,
    },
}

impl<'a> MapView<'a> {
    /// Cluster the events of `state` by address and fit the camera to the
    /// resulting markers.
    pub fn from_state(state: &'a SearchState) -> FinderResult<Self> {
        match state {
            SearchState::NeverSearched => Ok(MapView::Empty(EmptyMap::NeverSearched)),
            SearchState::NoResults { city } => Ok(MapView::Empty(EmptyMap::NoResults {
                city: city.as_str(),
            })),
            SearchState::Results { city, events } => {
                let markers = markers(events)?;

                let points: Vec<Coordinate> = markers.iter().map(|m| m.coordinate).collect();
                let region = geo::fit(&points)?;

                Ok(MapView::Ready {
                    city: city.as_str(),
                    markers,
                    region,
                })
            }
        }
    }
}

/// One marker per distinct venue address, in first-seen order.
pub fn markers(events: &[Event]) -> FinderResult<Vec<Marker<'_>>> {
    cluster::group(events)?
        .iter()
        .map(|(address, group)| {
            // Every event must carry a valid location, not just the one
            // whose position the marker takes. Groups are never empty.
            let coordinates = group
                .iter()
                .map(|event| event.coordinate())
                .collect::<FinderResult<Vec<_>>>()?;

            Ok(Marker {
                address,
                coordinate: coordinates[0],
                events: group.to_vec(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FinderError;
    use crate::event::tests::make_event;

    #[test]
    fn test_never_searched_is_empty() {
        let state = SearchState::NeverSearched;
        assert_eq!(
            MapView::from_state(&state).unwrap(),
            MapView::Empty(EmptyMap::NeverSearched)
        );
    }

    #[test]
    fn test_no_results_keeps_city() {
        let state = SearchState::NoResults {
            city: "Reykjavik".into(),
        };
        assert_eq!(
            MapView::from_state(&state).unwrap(),
            MapView::Empty(EmptyMap::NoResults { city: "Reykjavik" })
        );
    }

    #[test]
    fn test_results_produce_markers_and_region() {
        let state = SearchState::from_search(
            "Munich",
            vec![
                make_event("a", "Arena 1", "48.0", "11.0"),
                make_event("b", "Hall 2", "48.2", "11.6"),
                make_event("c", "Arena 1", "48.0", "11.0"),
            ],
        );

        let MapView::Ready {
            city,
            markers,
            region,
        } = MapView::from_state(&state).unwrap()
        else {
            panic!("expected a ready map");
        };

        assert_eq!(city, "Munich");
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].address, "Arena 1");
        assert_eq!(markers[0].title(), "2 Events");
        assert_eq!(markers[1].title(), "1 Event");
        assert_eq!(markers[1].coordinate, Coordinate::new(48.2, 11.6).unwrap());

        assert!((region.latitude - 48.1).abs() < 1e-9);
        assert!((region.latitude_delta - 0.3).abs() < 1e-9);
        assert!((region.longitude_delta - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_bad_coordinate_fails_instead_of_defaulting() {
        let state = SearchState::from_search(
            "Munich",
            vec![make_event("bad", "Arena 1", "", "11.0")],
        );
        assert!(matches!(
            MapView::from_state(&state),
            Err(FinderError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_bad_coordinate_later_in_a_group_fails() {
        let state = SearchState::from_search(
            "Munich",
            vec![
                make_event("good", "Arena 1", "48.0", "11.0"),
                make_event("bad", "Arena 1", "north", "11.0"),
            ],
        );

        match MapView::from_state(&state) {
            Err(FinderError::InvalidCoordinate { event_id, .. }) => assert_eq!(event_id, "bad"),
            other => panic!("expected InvalidCoordinate, got {other:?}"),
        }
    }
}
