//! Shidduch Match - deal-breaker compatibility matching for a matchmaking practice
//!
//! Given one subject profile and a pool of candidates, the engine returns the
//! candidates that clear every hard constraint, in pool order. There is no
//! scoring: a candidate either qualifies or is excluded by the first failed
//! check.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use crate::core::{age, age_on, Matcher, MatchError, MatchResult, MatchingRules, Rejection, Verdict};
pub use crate::models::{Profile, Gender, RelocationStance, FindMatchesRequest, FindMatchesResponse};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let dob = chrono::NaiveDate::from_ymd_opt(1990, 5, 1).unwrap();
        let today = chrono::NaiveDate::from_ymd_opt(2020, 5, 1).unwrap();
        assert_eq!(age_on(dob, today), Ok(30));
        assert!(MatchingRules::default().is_wildcard("Any"));
    }
}
