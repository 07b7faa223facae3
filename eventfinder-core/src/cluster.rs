//! Group events by venue address so co-located events share one map marker.

use indexmap::IndexMap;

use crate::error::FinderResult;
use crate::event::Event;

/// Events keyed by exact venue address, in first-seen address order.
///
/// Every input event lands in exactly one group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressGroups<'a> {
    groups: IndexMap<&'a str, Vec<&'a Event>>,
}

impl<'a> AddressGroups<'a> {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, address: &str) -> Option<&[&'a Event]> {
        self.groups.get(address).map(Vec::as_slice)
    }

    pub fn addresses(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.groups.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &[&'a Event])> + '_ {
        self.groups.iter().map(|(address, events)| (*address, events.as_slice()))
    }
}

/// Partition `events` by exact string equality of their venue address.
///
/// No normalization is applied: "Main St 1" and "Main St. 1" are different
/// groups. An event without a resolvable address fails the whole call.
pub fn group(events: &[Event]) -> FinderResult<AddressGroups<'_>> {
    let mut groups: IndexMap<&str, Vec<&Event>> = IndexMap::new();

    for event in events {
        let address = event.address()?;
        groups.entry(address).or_default().push(event);
    }

    Ok(AddressGroups { groups })
}
