use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::age::profile_age_on;
use crate::core::matcher::MatchError;
use crate::core::preferences::{AgeGap, Constraint, MatchingRules};
use crate::models::{Gender, Profile};

/// The deal-breaker that excluded a candidate, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    SameProfile,
    Gender,
    RelocationDeadlock,
    AgeGap,
    Ethnicity,
    Hashkafa,
    LearningStatus,
    HeadCovering,
    ExpectedHeadCovering,
}

impl Rejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rejection::SameProfile => "same_profile",
            Rejection::Gender => "gender",
            Rejection::RelocationDeadlock => "relocation_deadlock",
            Rejection::AgeGap => "age_gap",
            Rejection::Ethnicity => "ethnicity",
            Rejection::Hashkafa => "hashkafa",
            Rejection::LearningStatus => "learning_status",
            Rejection::HeadCovering => "head_covering",
            Rejection::ExpectedHeadCovering => "expected_head_covering",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check if two profiles pair by gender
#[inline]
pub fn is_opposite_gender(subject: &Gender, candidate: &Gender) -> bool {
    subject.opposite().as_ref() == Some(candidate)
}

/// Check if neither party will move and they live in different places
///
/// This is the only failing combination: a shared location, or any stance
/// other than "no" on either side, passes.
#[inline]
pub fn is_relocation_deadlock(subject: &Profile, candidate: &Profile) -> bool {
    subject.willing_to_relocate.refuses()
        && candidate.willing_to_relocate.refuses()
        && subject.normalized_location() != candidate.normalized_location()
}

/// Check if any of the candidate's values appears in the preference list
#[inline]
pub fn shares_any(preference: &Constraint<String>, values: &[String]) -> bool {
    preference.admits(|wanted| values.contains(wanted))
}

/// Check a head-covering value against a preference, honouring the universal value
#[inline]
pub fn accepts_head_covering(
    preference: &Constraint<String>,
    head_covering: Option<&str>,
    universal: &str,
) -> bool {
    if preference.is_bypassed() || head_covering == Some(universal) {
        return true;
    }
    preference.admits(|wanted| head_covering == Some(wanted.as_str()))
}

/// A subject's preferences compiled once and checked against each candidate
#[derive(Debug, Clone)]
pub struct SubjectConstraints<'s> {
    subject: &'s Profile,
    subject_age: u32,
    today: NaiveDate,
    universal_head_covering: String,
    age_gap: Constraint<AgeGap>,
    ethnicities: Constraint<String>,
    hashkafos: Constraint<String>,
    learning_status: Constraint<String>,
    head_covering: Constraint<String>,
    expected_head_covering: Constraint<String>,
}

impl<'s> SubjectConstraints<'s> {
    /// Validate the subject and compile its preference lists
    pub fn compile(
        subject: &'s Profile,
        rules: &MatchingRules,
        today: NaiveDate,
    ) -> Result<Self, MatchError> {
        if !subject.gender.is_recognized() {
            return Err(MatchError::invalid_profile(
                &subject.id,
                format!("unrecognized gender {}", subject.gender),
            ));
        }

        let subject_age = profile_age_on(subject.date_of_birth, today)
            .map_err(|e| MatchError::from_age(&subject.id, e))?;

        Ok(Self {
            subject,
            subject_age,
            today,
            universal_head_covering: rules.universal_head_covering().to_string(),
            age_gap: rules.compile_age_gaps(&subject.age_gap_preference),
            ethnicities: rules.compile_values(&subject.preferred_ethnicities),
            hashkafos: rules.compile_values(&subject.preferred_hashkafos),
            learning_status: rules.compile_values(&subject.preferred_learning_status),
            head_covering: rules.compile_values(&subject.preferred_head_covering),
            expected_head_covering: rules
                .compile_expected(subject.expected_head_covering.as_deref()),
        })
    }

    pub fn subject_age(&self) -> u32 {
        self.subject_age
    }

    /// Run the deal-breaker chain for one candidate
    ///
    /// Returns the first failed check, or `None` if the candidate qualifies.
    /// The candidate's age is only derived when the age-gap check is active.
    pub fn check(&self, candidate: &Profile) -> Result<Option<Rejection>, MatchError> {
        let subject = self.subject;

        if candidate.id == subject.id {
            return Ok(Some(Rejection::SameProfile));
        }

        if !is_opposite_gender(&subject.gender, &candidate.gender) {
            return Ok(Some(Rejection::Gender));
        }

        if is_relocation_deadlock(subject, candidate) {
            return Ok(Some(Rejection::RelocationDeadlock));
        }

        if !self.age_gap.is_bypassed() {
            let candidate_age = profile_age_on(candidate.date_of_birth, self.today)
                .map_err(|e| MatchError::from_age(&candidate.id, e))?;
            let diff = self.subject_age.abs_diff(candidate_age);

            if !self.age_gap.admits(|gap| gap.admits(diff)) {
                return Ok(Some(Rejection::AgeGap));
            }
        }

        if !shares_any(&self.ethnicities, &candidate.ethnicity) {
            return Ok(Some(Rejection::Ethnicity));
        }

        if !shares_any(&self.hashkafos, &candidate.religious_affiliation) {
            return Ok(Some(Rejection::Hashkafa));
        }

        if !shares_any(&self.learning_status, &candidate.learning_status) {
            return Ok(Some(Rejection::LearningStatus));
        }

        let head_covering = candidate.head_covering.as_deref();

        if !accepts_head_covering(&self.head_covering, head_covering, &self.universal_head_covering) {
            return Ok(Some(Rejection::HeadCovering));
        }

        // Only applies one way: to female candidates
        if candidate.gender == Gender::Female
            && !accepts_head_covering(
                &self.expected_head_covering,
                head_covering,
                &self.universal_head_covering,
            )
        {
            return Ok(Some(Rejection::ExpectedHeadCovering));
        }

        Ok(None)
    }
}
