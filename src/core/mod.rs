// Core algorithm exports
pub mod age;
pub mod filters;
pub mod matcher;
pub mod preferences;

pub use age::{age, age_on, AgeError};
pub use filters::{is_opposite_gender, is_relocation_deadlock, shares_any, accepts_head_covering, Rejection, SubjectConstraints};
pub use matcher::{Matcher, MatchError, MatchResult, Verdict};
pub use preferences::{AgeGap, Constraint, MatchingRules, PreferenceToken};
