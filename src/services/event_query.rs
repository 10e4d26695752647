//! Event discovery: free-text, category and location filtering.

use serde::Deserialize;
use uuid::Uuid;

use crate::models::event::{Event, EventDetail};
use crate::services::checkout::seats_left;
use crate::store::{require, Repository};
use crate::utils::error::AppError;

/// Sentinel meaning "do not filter on this field".
pub const ALL: &str = "All";

pub const CATEGORIES: [&str; 7] = [
    ALL,
    "Technology",
    "Music",
    "Business",
    "Food & Drink",
    "Arts",
    "Sports",
];

pub const LOCATIONS: [&str; 6] = [ALL, "Jakarta", "Surabaya", "Bandung", "Yogyakarta", "Bali"];

fn all() -> String {
    ALL.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventFilter {
    #[serde(default)]
    pub search: String,
    #[serde(default = "all")]
    pub category: String,
    #[serde(default = "all")]
    pub location: String,
}

impl Default for EventFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: all(),
            location: all(),
        }
    }
}

fn is_wildcard(value: &str) -> bool {
    value.is_empty() || value == ALL
}

impl EventFilter {
    pub fn new(
        search: impl Into<String>,
        category: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            search: search.into(),
            category: category.into(),
            location: location.into(),
        }
    }

    fn matches_search(&self, event: &Event, needle: &str) -> bool {
        needle.is_empty()
            || event.name.to_lowercase().contains(needle)
            || event.description.to_lowercase().contains(needle)
    }

    fn matches_category(&self, event: &Event) -> bool {
        is_wildcard(&self.category) || event.category == self.category
    }

    fn matches_location(&self, event: &Event) -> bool {
        is_wildcard(&self.location) || event.location.contains(self.location.as_str())
    }

    /// `needle` is the already lowercased search text.
    fn matches_with(&self, event: &Event, needle: &str) -> bool {
        self.matches_search(event, needle)
            && self.matches_category(event)
            && self.matches_location(event)
    }

    pub fn matches(&self, event: &Event) -> bool {
        self.matches_with(event, &self.search.to_lowercase())
    }
}

/// Returns the events passing `filter`, ordered by start date. The sort is
/// stable so events starting at the same instant keep their input order.
pub fn filter_events<'a, I>(events: I, filter: &EventFilter) -> Vec<Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    let needle = filter.search.to_lowercase();
    let mut matched: Vec<Event> = events
        .into_iter()
        .filter(|event| filter.matches_with(event, &needle))
        .cloned()
        .collect();

    matched.sort_by_key(|event| event.start_date);
    matched
}

pub fn search_events<R>(repo: &R, filter: &EventFilter) -> Result<Vec<Event>, AppError>
where
    R: Repository + ?Sized,
{
    let events = repo.list_events()?;
    let found = filter_events(&events, filter);
    tracing::debug!(
        search = %filter.search,
        category = %filter.category,
        location = %filter.location,
        total = events.len(),
        matched = found.len(),
        "Filtered events"
    );
    Ok(found)
}

pub fn event_detail<R>(repo: &R, id: Uuid) -> Result<EventDetail, AppError>
where
    R: Repository + ?Sized,
{
    let event = require(repo.get_event(id)?, "Event", id)?;
    let tickets = repo.tickets_for_event(id)?;
    let seats_left = seats_left(repo, &event)?;
    Ok(EventDetail {
        event,
        tickets,
        seats_left,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal::Decimal;

    fn event(name: &str, description: &str, category: &str, location: &str, day: u32) -> Event {
        let start = Utc.with_ymd_and_hms(2026, 11, day, 9, 0, 0).unwrap();
        Event {
            id: Uuid::new_v4(),
            organizer_id: Uuid::nil(),
            organizer_name: "Organizer".to_string(),
            name: name.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            location: location.to_string(),
            start_date: start,
            end_date: start + Duration::hours(3),
            price: Decimal::ZERO,
            is_free: true,
            available_seats: 100,
            image: None,
            created_at: start - Duration::days(30),
        }
    }

    fn sample() -> Vec<Event> {
        vec![
            event("Jazz Night", "Smooth jazz by the beach", "Music", "Bali", 20),
            event("Tech Meetup", "Monthly developer gathering", "Technology", "Jakarta", 10),
            event("Startup Pitch", "Founders pitch to investors", "Business", "South Jakarta", 15),
            event("Rust Workshop", "Hands-on systems TECH session", "Technology", "Bandung", 5),
        ]
    }

    fn names(events: &[Event]) -> Vec<&str> {
        events.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_category_filter_with_wildcard_location() {
        let events = vec![
            event("Tech Meetup", "", "Technology", "Jakarta", 1),
            event("Jazz Night", "", "Music", "Bali", 2),
        ];
        let found = filter_events(&events, &EventFilter::new("", "Technology", ALL));
        assert_eq!(names(&found), vec!["Tech Meetup"]);
    }

    #[test]
    fn test_default_filter_returns_everything_sorted_by_start() {
        let found = filter_events(&sample(), &EventFilter::default());
        assert_eq!(
            names(&found),
            vec!["Rust Workshop", "Tech Meetup", "Startup Pitch", "Jazz Night"]
        );
    }

    #[test]
    fn test_search_is_case_insensitive_over_name_and_description() {
        let found = filter_events(&sample(), &EventFilter::new("tech", ALL, ALL));
        assert_eq!(names(&found), vec!["Rust Workshop", "Tech Meetup"]);

        let found = filter_events(&sample(), &EventFilter::new("INVESTORS", ALL, ALL));
        assert_eq!(names(&found), vec!["Startup Pitch"]);
    }

    #[test]
    fn test_location_is_a_substring_match() {
        let found = filter_events(&sample(), &EventFilter::new("", ALL, "Jakarta"));
        assert_eq!(names(&found), vec!["Tech Meetup", "Startup Pitch"]);
    }

    #[test]
    fn test_category_must_match_exactly() {
        let found = filter_events(&sample(), &EventFilter::new("", "Tech", ALL));
        assert!(found.is_empty());
    }

    #[test]
    fn test_empty_category_and_location_act_as_wildcards() {
        let found = filter_events(&sample(), &EventFilter::new("", "", ""));
        assert_eq!(found.len(), 4);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let events = vec![
            event("Second", "", "Music", "Bali", 7),
            event("First", "", "Music", "Bali", 3),
            event("Third", "", "Music", "Bali", 7),
        ];
        let found = filter_events(&events, &EventFilter::default());
        assert_eq!(names(&found), vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_result_is_exactly_the_matching_set() {
        let events = sample();
        let filters = [
            EventFilter::new("", ALL, ALL),
            EventFilter::new("night", ALL, ALL),
            EventFilter::new("", "Technology", "Jakarta"),
            EventFilter::new("session", "Technology", "Bandung"),
            EventFilter::new("zzz", "Music", "Bali"),
            EventFilter::new("NiGhT", "Music", ALL),
        ];

        for filter in &filters {
            let found = filter_events(&events, filter);
            let expected = events.iter().filter(|e| filter.matches(e)).count();
            assert_eq!(found.len(), expected);
            assert!(found.iter().all(|e| filter.matches(e)));
            assert!(found
                .windows(2)
                .all(|pair| pair[0].start_date <= pair[1].start_date));
        }
    }
}
