// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Profile, Gender, RelocationStance, one_or_many};
pub use requests::{FindMatchesRequest, ExplainMatchRequest};
pub use responses::{FindMatchesResponse, ExplainMatchResponse, HealthResponse, ErrorResponse};
