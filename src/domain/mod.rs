//! Domain data shapes shared across the use cases and adapters.

pub mod address;
pub mod eligibility;
pub mod output;

pub use address::{AddressRecord, AdiMatches, Coordinates, RankPair};
pub use eligibility::can_geocode;
pub use output::{expand_rows, OutputRow};

/// Outcome of one enrichment step for one address.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<T> {
    /// The step was not attempted.
    Skipped(SkipReason),
    /// The step was attempted and produced nothing.
    Failed(String),
    Resolved(T),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Empty street/city/state, PO box or military mail.
    Ineligible,
    MissingCoordinates,
    MissingFips,
}

impl<T> Resolution<T> {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    pub fn resolved(self) -> Option<T> {
        match self {
            Resolution::Resolved(value) => Some(value),
            _ => None,
        }
    }
}
