use chrono::{NaiveDate, Utc};
use rayon::prelude::*;
use thiserror::Error;

use crate::core::age::AgeError;
use crate::core::filters::{Rejection, SubjectConstraints};
use crate::core::preferences::MatchingRules;
use crate::models::Profile;

/// Errors that stop a matching run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("invalid profile {id}: {reason}")]
    InvalidProfile { id: String, reason: String },
}

impl MatchError {
    pub fn invalid_profile(id: &str, reason: impl Into<String>) -> Self {
        MatchError::InvalidProfile {
            id: id.to_string(),
            reason: reason.into(),
        }
    }

    pub fn from_age(id: &str, err: AgeError) -> Self {
        Self::invalid_profile(id, err.to_string())
    }
}

/// Outcome of evaluating a single candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Match,
    Rejected(Rejection),
}

impl Verdict {
    pub fn is_match(&self) -> bool {
        matches!(self, Verdict::Match)
    }
}

/// Result of the matching process
///
/// Matches borrow from the pool and keep the pool's order.
#[derive(Debug)]
pub struct MatchResult<'a> {
    pub matches: Vec<&'a Profile>,
    pub total_candidates: usize,
}

/// Main matching orchestrator - runs the deal-breaker chain over a pool
///
/// # Chain (first failure excludes the candidate)
/// 1. Identity exclusion
/// 2. Opposite gender
/// 3. Relocation deadlock
/// 4. Age gap
/// 5. Ethnicity
/// 6. Hashkafa
/// 7. Learning status
/// 8. Head covering
/// 9. Expected head covering (female candidates only)
#[derive(Debug, Clone)]
pub struct Matcher {
    rules: MatchingRules,
}

impl Matcher {
    pub fn new(rules: MatchingRules) -> Self {
        Self { rules }
    }

    pub fn with_default_rules() -> Self {
        Self {
            rules: MatchingRules::default(),
        }
    }

    pub fn rules(&self) -> &MatchingRules {
        &self.rules
    }

    /// Find matches for a subject as of today (UTC)
    pub fn find_matches<'a>(
        &self,
        subject: &Profile,
        pool: &'a [Profile],
    ) -> Result<MatchResult<'a>, MatchError> {
        self.find_matches_on(subject, pool, Utc::now().date_naive())
    }

    /// Find matches for a subject with ages computed as of `today`
    ///
    /// # Arguments
    /// * `subject` - The profile matches are sought for
    /// * `pool` - All candidates supplied by the caller
    /// * `today` - Reference date for age calculation
    ///
    /// # Returns
    /// Qualifying candidates in pool order, or the first invalid profile met
    pub fn find_matches_on<'a>(
        &self,
        subject: &Profile,
        pool: &'a [Profile],
        today: NaiveDate,
    ) -> Result<MatchResult<'a>, MatchError> {
        let constraints = SubjectConstraints::compile(subject, &self.rules, today)?;

        let matches = pool
            .iter()
            .filter_map(|candidate| admit(&constraints, candidate))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            "Matched {} of {} candidates for subject {}",
            matches.len(),
            pool.len(),
            subject.id
        );

        Ok(MatchResult {
            matches,
            total_candidates: pool.len(),
        })
    }

    /// Parallel variant of [`Matcher::find_matches`]
    pub fn find_matches_parallel<'a>(
        &self,
        subject: &Profile,
        pool: &'a [Profile],
    ) -> Result<MatchResult<'a>, MatchError> {
        self.find_matches_parallel_on(subject, pool, Utc::now().date_naive())
    }

    /// Parallel variant of [`Matcher::find_matches_on`]
    ///
    /// Candidates are evaluated across the rayon pool; the result keeps pool
    /// order. If several profiles are invalid, which one is reported is
    /// unspecified.
    pub fn find_matches_parallel_on<'a>(
        &self,
        subject: &Profile,
        pool: &'a [Profile],
        today: NaiveDate,
    ) -> Result<MatchResult<'a>, MatchError> {
        let constraints = SubjectConstraints::compile(subject, &self.rules, today)?;

        let matches = pool
            .par_iter()
            .filter_map(|candidate| admit(&constraints, candidate))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            "Matched {} of {} candidates for subject {} (parallel)",
            matches.len(),
            pool.len(),
            subject.id
        );

        Ok(MatchResult {
            matches,
            total_candidates: pool.len(),
        })
    }

    /// Evaluate one candidate and report the first failed check
    pub fn evaluate(
        &self,
        subject: &Profile,
        candidate: &Profile,
        today: NaiveDate,
    ) -> Result<Verdict, MatchError> {
        let constraints = SubjectConstraints::compile(subject, &self.rules, today)?;

        Ok(match constraints.check(candidate)? {
            None => Verdict::Match,
            Some(rejection) => Verdict::Rejected(rejection),
        })
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

#[inline]
fn admit<'a>(
    constraints: &SubjectConstraints<'_>,
    candidate: &'a Profile,
) -> Option<Result<&'a Profile, MatchError>> {
    match constraints.check(candidate) {
        Ok(None) => Some(Ok(candidate)),
        Ok(Some(rejection)) => {
            tracing::trace!("Candidate {} rejected: {}", candidate.id, rejection);
            None
        }
        Err(e) => Some(Err(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, RelocationStance};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn create_candidate(id: &str, gender: Gender, age: i32, ethnicity: &str) -> Profile {
        Profile {
            id: id.to_string(),
            gender,
            date_of_birth: NaiveDate::from_ymd_opt(2024 - age, 3, 10),
            location: Some("Brooklyn, NY".to_string()),
            willing_to_relocate: RelocationStance::Maybe,
            ethnicity: vec![ethnicity.to_string()],
            ..Default::default()
        }
    }

    fn create_subject() -> Profile {
        Profile {
            id: "subject".to_string(),
            gender: Gender::Male,
            date_of_birth: NaiveDate::from_ymd_opt(1994, 3, 10),
            location: Some("Brooklyn, NY".to_string()),
            age_gap_preference: vec!["0-4 years".to_string()],
            preferred_ethnicities: vec!["Ashkenazi".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_find_matches_basic() {
        let matcher = Matcher::with_default_rules();
        let subject = create_subject();

        let pool = vec![
            create_candidate("1", Gender::Female, 28, "Ashkenazi"), // Match
            create_candidate("2", Gender::Female, 40, "Ashkenazi"), // Gap too big
            create_candidate("3", Gender::Male, 28, "Ashkenazi"),   // Wrong gender
            create_candidate("4", Gender::Female, 28, "Sephardi"),  // Wrong ethnicity
        ];

        let result = matcher.find_matches_on(&subject, &pool, today()).unwrap();

        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].id, "1");
        assert_eq!(result.total_candidates, 4);
    }

    #[test]
    fn test_matches_keep_pool_order() {
        let matcher = Matcher::with_default_rules();
        let subject = create_subject();

        let pool: Vec<Profile> = (0..10)
            .map(|i| create_candidate(&i.to_string(), Gender::Female, 27 + (i % 3), "Ashkenazi"))
            .collect();

        let result = matcher.find_matches_on(&subject, &pool, today()).unwrap();
        let ids: Vec<&str> = result.matches.iter().map(|p| p.id.as_str()).collect();

        assert_eq!(ids, vec!["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let matcher = Matcher::with_default_rules();
        let subject = create_subject();

        let pool: Vec<Profile> = (0..200)
            .map(|i| {
                let gender = if i % 2 == 0 { Gender::Female } else { Gender::Male };
                let ethnicity = if i % 5 == 0 { "Sephardi" } else { "Ashkenazi" };
                create_candidate(&i.to_string(), gender, 24 + (i % 12), ethnicity)
            })
            .collect();

        let sequential = matcher.find_matches_on(&subject, &pool, today()).unwrap();
        let parallel = matcher.find_matches_parallel_on(&subject, &pool, today()).unwrap();

        assert!(!sequential.matches.is_empty());
        assert_eq!(sequential.matches, parallel.matches);
    }

    #[test]
    fn test_empty_pool() {
        let matcher = Matcher::default();
        let result = matcher.find_matches_on(&create_subject(), &[], today()).unwrap();
        assert!(result.matches.is_empty());
        assert_eq!(result.total_candidates, 0);
    }

    #[test]
    fn test_subject_without_birth_date_fails_fast() {
        let matcher = Matcher::default();
        let mut subject = create_subject();
        subject.date_of_birth = None;

        let err = matcher.find_matches_on(&subject, &[], today()).unwrap_err();
        assert_eq!(
            err,
            MatchError::invalid_profile("subject", "date of birth is missing")
        );
    }

    #[test]
    fn test_evaluate_reports_rejection() {
        let matcher = Matcher::default();
        let subject = create_subject();

        let verdict = matcher
            .evaluate(&subject, &create_candidate("x", Gender::Female, 28, "Sephardi"), today())
            .unwrap();
        assert_eq!(verdict, Verdict::Rejected(Rejection::Ethnicity));

        let verdict = matcher
            .evaluate(&subject, &create_candidate("y", Gender::Female, 28, "Ashkenazi"), today())
            .unwrap();
        assert!(verdict.is_match());
    }
}
