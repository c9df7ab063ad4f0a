//! Thin client for the two score endpoints.
//!
//! `GET /api/highscores?limit=N` returns a ranked array of entries;
//! `POST /api/submit-score` records `{ name, score }` and may report the
//! submitter's rank and percentile. Failures come back as explicit `ApiError`
//! values so the UI layer decides what the player sees.

use gloo_net::http::Request;
use serde::{Deserialize, Serialize};

const HIGHSCORES_URL: &str = "/api/highscores";
const SUBMIT_SCORE_URL: &str = "/api/submit-score";

/// Default number of rows shown in the high-score table.
pub const TOP_LIMIT: u32 = 25;

/// One leaderboard row as the read endpoint reports it. `location` is
/// recorded server-side and tolerated here but not displayed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScoreRow {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// Optional stats in the submit response. The backend may answer `{}` (or
/// carry extra fields like `status`); both stats must be present for the
/// rank/percentile line to be shown.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct SubmitStats {
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub percentile: Option<f64>,
}

#[derive(Serialize)]
struct SubmitPayload<'a> {
    name: &'a str,
    score: u32,
}

#[derive(Debug)]
pub enum ApiError {
    Network(String),
    Http { status: u16, body: String },
    Parse(String),
}

impl ApiError {
    fn network<E: std::fmt::Display>(err: E) -> Self {
        Self::Network(err.to_string())
    }

    fn parse<E: std::fmt::Display>(err: E) -> Self {
        Self::Parse(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Http { status, body } => write!(f, "HTTP {status}: {body}"),
            ApiError::Parse(msg) => write!(f, "unexpected response: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Client-side name validation: trimmed and non-empty, or no request goes
/// out at all.
pub fn validate_name(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Fetch the top `limit` entries, highest score first.
pub async fn fetch_top(limit: u32) -> Result<Vec<ScoreRow>, ApiError> {
    let url = format!("{HIGHSCORES_URL}?limit={limit}");
    let response = Request::get(&url).send().await.map_err(ApiError::network)?;

    if !response.ok() {
        return Err(ApiError::Http {
            status: response.status(),
            body: response.text().await.unwrap_or_default(),
        });
    }

    let text = response.text().await.map_err(ApiError::network)?;
    parse_rows(&text)
}

/// Submit a finished score under `name`. The caller must pass a trimmed,
/// non-empty name; validation happens in the modal before any request.
pub async fn submit(name: &str, score: u32) -> Result<SubmitStats, ApiError> {
    let response = Request::post(SUBMIT_SCORE_URL)
        .json(&SubmitPayload { name, score })
        .map_err(ApiError::network)?
        .send()
        .await
        .map_err(ApiError::network)?;

    if !response.ok() {
        // Body kept for console diagnostics only.
        return Err(ApiError::Http {
            status: response.status(),
            body: response.text().await.unwrap_or_default(),
        });
    }

    let text = response.text().await.map_err(ApiError::network)?;
    Ok(parse_stats(&text))
}

/// A non-array body is a contract violation, surfaced as `Parse` so the UI
/// can log it and fall back to an empty table.
fn parse_rows(body: &str) -> Result<Vec<ScoreRow>, ApiError> {
    serde_json::from_str(body).map_err(ApiError::parse)
}

/// An empty or unparseable 2xx submit body degrades to the generic success
/// message rather than failing the submit.
fn parse_stats(body: &str) -> SubmitStats {
    if body.trim().is_empty() {
        return SubmitStats::default();
    }
    serde_json::from_str(body).unwrap_or_default()
}
