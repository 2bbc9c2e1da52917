//! # Listing Filters
//!
//! Query-parameter predicates for catalog listings. Absent filters are
//! no-ops: an empty filter set returns the full collection. String
//! matching is case-insensitive substring matching.

use chrono::{DateTime, Utc};

use super::errors::{CatalogError, CatalogResult};
use super::models::{Airplane, AirplaneType, Airport, Crew, Flight, Route};

/// Maximum number of records a single listing may return
pub const MAX_LIMIT: usize = 1000;

/// Default listing size if not specified
pub const DEFAULT_LIMIT: usize = 100;

/// Pagination window for listings
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub limit: usize,
    pub offset: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl Page {
    /// Build a page from optional query parameters, enforcing the
    /// maximum limit.
    pub fn new(limit: Option<usize>, offset: Option<usize>) -> CatalogResult<Self> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        if limit > MAX_LIMIT {
            return Err(CatalogError::Validation(format!(
                "limit {} exceeds maximum {}",
                limit, MAX_LIMIT
            )));
        }

        Ok(Self {
            limit,
            offset: offset.unwrap_or(0),
        })
    }

    /// Apply the window to an already-filtered vector
    pub fn apply<T>(&self, records: Vec<T>) -> Vec<T> {
        records
            .into_iter()
            .skip(self.offset)
            .take(self.limit)
            .collect()
    }
}

/// Case-insensitive substring match
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Match an optional substring filter against a field
fn matches_opt(filter: &Option<String>, value: &str) -> bool {
    match filter {
        Some(needle) => contains_ci(value, needle),
        None => true,
    }
}

/// Airport listing filter
#[derive(Debug, Clone, Default)]
pub struct AirportFilter {
    /// Substring of the airport name
    pub name: Option<String>,
}

impl AirportFilter {
    pub fn matches(&self, airport: &Airport) -> bool {
        matches_opt(&self.name, &airport.name)
    }
}

/// Airplane type listing filter
#[derive(Debug, Clone, Default)]
pub struct AirplaneTypeFilter {
    pub name: Option<String>,
}

impl AirplaneTypeFilter {
    pub fn matches(&self, airplane_type: &AirplaneType) -> bool {
        matches_opt(&self.name, &airplane_type.name)
    }
}

/// Airplane listing filter
#[derive(Debug, Clone, Default)]
pub struct AirplaneFilter {
    pub name: Option<String>,
    /// Substring of the airplane type name
    pub airplane_type: Option<String>,
}

impl AirplaneFilter {
    pub fn matches(&self, airplane: &Airplane, type_name: &str) -> bool {
        matches_opt(&self.name, &airplane.name) && matches_opt(&self.airplane_type, type_name)
    }
}

/// Crew listing filter
#[derive(Debug, Clone, Default)]
pub struct CrewFilter {
    /// Substring of "first_name last_name"
    pub full_name: Option<String>,
}

impl CrewFilter {
    pub fn matches(&self, crew: &Crew) -> bool {
        matches_opt(&self.full_name, &crew.full_name())
    }
}

/// Route listing filter. Each side is applied independently; an absent
/// side is a no-op.
#[derive(Debug, Clone, Default)]
pub struct RouteFilter {
    /// Substring of the source airport name
    pub from: Option<String>,

    /// Substring of the destination airport name
    pub to: Option<String>,
}

impl RouteFilter {
    pub fn matches(&self, _route: &Route, source: &Airport, destination: &Airport) -> bool {
        matches_opt(&self.from, &source.name) && matches_opt(&self.to, &destination.name)
    }
}

/// Flight listing filter: endpoint cities, exact timestamps, and a
/// departure window.
#[derive(Debug, Clone, Default)]
pub struct FlightFilter {
    /// Substring of the source airport's closest big city
    pub from: Option<String>,

    /// Substring of the destination airport's closest big city
    pub to: Option<String>,

    /// Exact departure timestamp
    pub departure_time: Option<DateTime<Utc>>,

    /// Exact arrival timestamp
    pub arrival_time: Option<DateTime<Utc>>,

    /// Lower bound (inclusive) of the departure window
    pub departure_after: Option<DateTime<Utc>>,

    /// Upper bound (inclusive) of the departure window
    pub departure_before: Option<DateTime<Utc>>,
}

impl FlightFilter {
    pub fn matches(&self, flight: &Flight, source: &Airport, destination: &Airport) -> bool {
        if !matches_opt(&self.from, &source.closest_big_city) {
            return false;
        }
        if !matches_opt(&self.to, &destination.closest_big_city) {
            return false;
        }
        if let Some(departure) = self.departure_time {
            if flight.departure_time != departure {
                return false;
            }
        }
        if let Some(arrival) = self.arrival_time {
            if flight.arrival_time != arrival {
                return false;
            }
        }
        if let Some(after) = self.departure_after {
            if flight.departure_time < after {
                return false;
            }
        }
        if let Some(before) = self.departure_before {
            if flight.departure_time > before {
                return false;
            }
        }
        true
    }
}
