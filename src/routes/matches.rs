use actix_web::{web, HttpResponse, Responder};
use chrono::{NaiveDate, Utc};
use validator::Validate;

use crate::config::MatchingSettings;
use crate::core::{Matcher, MatchError, Verdict};
use crate::models::{
    ErrorResponse, ExplainMatchRequest, ExplainMatchResponse, FindMatchesRequest,
    FindMatchesResponse, HealthResponse,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Matcher,
    pub matching: MatchingSettings,
    /// Fixed "today" for age calculations; the UTC date when unset
    pub reference_date: Option<NaiveDate>,
}

impl AppState {
    pub fn new(matching: MatchingSettings) -> Self {
        Self {
            matcher: Matcher::new(matching.rules()),
            matching,
            reference_date: None,
        }
    }

    /// Pin the date ages are computed against
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Requested page size, defaulted and capped
    fn page_size(&self, requested: Option<u16>) -> usize {
        requested
            .map(usize::from)
            .unwrap_or(self.matching.default_limit)
            .min(self.matching.max_limit)
    }
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_matches))
        .route("/matches/explain", web::post().to(explain_match));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

fn invalid_profile(err: MatchError) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Invalid profile".to_string(),
        message: err.to_string(),
        status_code: 400,
    })
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "subject": { "id": "string", "gender": "Male", ... },
///   "pool": [{ "id": "string", ... }],
///   "limit": 20,
///   "offset": 0
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {}", errors);
        return validation_failed(errors);
    }

    let subject = &req.subject;
    let limit = state.page_size(req.limit);
    let today = state.today();

    tracing::info!(
        "Finding matches for subject: {}, pool: {}, limit: {}, offset: {}",
        subject.id,
        req.pool.len(),
        limit,
        req.offset
    );

    let result = if req.pool.len() >= state.matching.parallel_threshold {
        state.matcher.find_matches_parallel_on(subject, &req.pool, today)
    } else {
        state.matcher.find_matches_on(subject, &req.pool, today)
    };

    let result = match result {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!("Rejecting find_matches for {}: {}", subject.id, e);
            return invalid_profile(e);
        }
    };

    let total_matches = result.matches.len();
    let matches: Vec<_> = result
        .matches
        .into_iter()
        .skip(req.offset)
        .take(limit)
        .cloned()
        .collect();

    let end = req.offset.saturating_add(matches.len());
    let response = FindMatchesResponse {
        next_offset: (end < total_matches).then_some(end),
        matches,
        total_candidates: result.total_candidates,
        total_matches,
    };

    tracing::info!(
        "Returning {} matches for subject {} ({} qualified of {} candidates)",
        response.matches.len(),
        subject.id,
        total_matches,
        result.total_candidates
    );

    HttpResponse::Ok().json(response)
}

/// Explain endpoint
///
/// POST /api/v1/matches/explain
///
/// Request body:
/// ```json
/// {
///   "subject": { "id": "string", ... },
///   "candidate": { "id": "string", ... }
/// }
/// ```
async fn explain_match(
    state: web::Data<AppState>,
    req: web::Json<ExplainMatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let today = state.today();
    match state.matcher.evaluate(&req.subject, &req.candidate, today) {
        Ok(verdict) => {
            let rejected_by = match verdict {
                Verdict::Match => None,
                Verdict::Rejected(rejection) => Some(rejection),
            };

            tracing::debug!(
                "Explained {} -> {}: {:?}",
                req.subject.id,
                req.candidate.id,
                rejected_by
            );

            HttpResponse::Ok().json(ExplainMatchResponse {
                candidate_id: req.candidate.id.clone(),
                matched: verdict.is_match(),
                rejected_by,
            })
        }
        Err(e) => {
            tracing::warn!("Rejecting explain for {}: {}", req.subject.id, e);
            invalid_profile(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_page_size_defaults_and_caps() {
        let state = AppState::new(MatchingSettings::default());
        assert_eq!(state.page_size(None), 20);
        assert_eq!(state.page_size(Some(5)), 5);
        assert_eq!(state.page_size(Some(5000)), 100);
    }

    #[test]
    fn test_reference_date_pins_today() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let state = AppState::new(MatchingSettings::default()).with_reference_date(date);
        assert_eq!(state.today(), date);

        let live = AppState::new(MatchingSettings::default());
        assert_eq!(live.reference_date, None);
    }
}
