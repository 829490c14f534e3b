use chrono::{Datelike, NaiveDate, Utc};
use thiserror::Error;

/// Errors raised when an age cannot be derived from a profile
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgeError {
    #[error("date of birth is missing")]
    MissingDateOfBirth,

    #[error("date of birth {dob} is after {today}")]
    BornInFuture { dob: NaiveDate, today: NaiveDate },
}

/// Calculate age in whole years as of `today`
///
/// Calendar subtraction: the year difference, less one when this year's
/// birthday (month, day) has not been reached yet. A 29 February birthday is
/// reached on 1 March in common years.
///
/// # Arguments
/// * `dob` - Date of birth
/// * `today` - Reference date
///
/// # Returns
/// Age in years, or `BornInFuture` if `dob` is after `today`
#[inline]
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> Result<u32, AgeError> {
    if dob > today {
        return Err(AgeError::BornInFuture { dob, today });
    }

    let mut years = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        years -= 1;
    }

    Ok(years as u32)
}

/// Calculate age in whole years as of the current UTC date
pub fn age(dob: NaiveDate) -> Result<u32, AgeError> {
    age_on(dob, Utc::now().date_naive())
}

/// Age for an optional date of birth as stored on a profile
#[inline]
pub fn profile_age_on(dob: Option<NaiveDate>, today: NaiveDate) -> Result<u32, AgeError> {
    let dob = dob.ok_or(AgeError::MissingDateOfBirth)?;
    age_on(dob, today)
}
