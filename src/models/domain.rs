use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use std::fmt;
use validator::Validate;

/// Gender as recorded on a profile.
///
/// Matching pairs `Male` with `Female` only. Any other recorded value is kept
/// verbatim in `Unrecognized` and never pairs with anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum Gender {
    Male,
    Female,
    Unrecognized(String),
}

impl Gender {
    /// The gender this one is paired with, if any
    pub fn opposite(&self) -> Option<Gender> {
        match self {
            Gender::Male => Some(Gender::Female),
            Gender::Female => Some(Gender::Male),
            Gender::Unrecognized(_) => None,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Gender::Unrecognized(_))
    }
}

impl Default for Gender {
    fn default() -> Self {
        Gender::Unrecognized(String::new())
    }
}

impl From<Option<String>> for Gender {
    fn from(value: Option<String>) -> Self {
        let raw = value.unwrap_or_default();
        match raw.trim().to_lowercase().as_str() {
            "male" => Gender::Male,
            "female" => Gender::Female,
            _ => Gender::Unrecognized(raw),
        }
    }
}

impl From<Gender> for Option<String> {
    fn from(value: Gender) -> Self {
        match value {
            Gender::Male => Some("Male".to_string()),
            Gender::Female => Some("Female".to_string()),
            Gender::Unrecognized(raw) if raw.is_empty() => None,
            Gender::Unrecognized(raw) => Some(raw),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
            Gender::Unrecognized(raw) => write!(f, "{:?}", raw),
        }
    }
}

/// Answer to "willing to relocate?", parsed case-insensitively
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum RelocationStance {
    Yes,
    No,
    Maybe,
    #[default]
    Unset,
    Unrecognized(String),
}

impl RelocationStance {
    pub fn refuses(&self) -> bool {
        matches!(self, RelocationStance::No)
    }
}

impl From<Option<String>> for RelocationStance {
    fn from(value: Option<String>) -> Self {
        let raw = value.unwrap_or_default();
        match raw.trim().to_lowercase().as_str() {
            "yes" => RelocationStance::Yes,
            "no" => RelocationStance::No,
            "maybe" => RelocationStance::Maybe,
            "" => RelocationStance::Unset,
            _ => RelocationStance::Unrecognized(raw),
        }
    }
}

impl From<RelocationStance> for Option<String> {
    fn from(value: RelocationStance) -> Self {
        match value {
            RelocationStance::Yes => Some("Yes".to_string()),
            RelocationStance::No => Some("No".to_string()),
            RelocationStance::Maybe => Some("Maybe".to_string()),
            RelocationStance::Unset => None,
            RelocationStance::Unrecognized(raw) => Some(raw),
        }
    }
}

/// A client profile, used both as the subject and as pool candidates
///
/// Attribute fields that the profile store sometimes writes as a single
/// string and sometimes as a list are normalized to a list on the way in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Profile {
    #[validate(length(min = 1))]
    pub id: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(rename = "dateOfBirth", default, deserialize_with = "date_or_datetime")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(rename = "willingToRelocate", default)]
    pub willing_to_relocate: RelocationStance,

    // What this profile is looking for
    #[serde(rename = "ageGapPreference", default, deserialize_with = "one_or_many")]
    pub age_gap_preference: Vec<String>,
    #[serde(rename = "preferredEthnicities", default, deserialize_with = "one_or_many")]
    pub preferred_ethnicities: Vec<String>,
    #[serde(rename = "preferredHashkafos", default, deserialize_with = "one_or_many")]
    pub preferred_hashkafos: Vec<String>,
    #[serde(rename = "preferredLearningStatus", default, deserialize_with = "one_or_many")]
    pub preferred_learning_status: Vec<String>,
    #[serde(rename = "preferredHeadCovering", default, deserialize_with = "one_or_many")]
    pub preferred_head_covering: Vec<String>,
    #[serde(rename = "expectedHeadCovering", default)]
    pub expected_head_covering: Option<String>,

    // What this profile is
    #[serde(default, deserialize_with = "one_or_many")]
    pub ethnicity: Vec<String>,
    #[serde(rename = "religiousAffiliation", default, deserialize_with = "one_or_many")]
    pub religious_affiliation: Vec<String>,
    #[serde(rename = "learningStatus", default, deserialize_with = "one_or_many")]
    pub learning_status: Vec<String>,
    #[serde(rename = "headCovering", default)]
    pub head_covering: Option<String>,
}

impl Profile {
    /// Location normalized for equality checks
    pub fn normalized_location(&self) -> String {
        self.location
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_lowercase()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

/// Accept `null`, `"value"` or `["a", "b"]` and always produce a list.
///
/// A blank scalar is treated as "no value" rather than a one-element list
/// holding the empty string.
pub fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(value)) if value.trim().is_empty() => Vec::new(),
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
    };
    Ok(values)
}

/// Accept `null`, `"1994-03-10"` or a timestamp such as
/// `"1994-03-10T00:00:00.000Z"`, keeping the calendar date as written.
pub fn date_or_datetime<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return Ok(None),
    };
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(stamp.date_naive()));
    }
    if let Ok(stamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Some(stamp.date()));
    }

    Err(D::Error::custom(format!("invalid date of birth: {:?}", raw)))
}
