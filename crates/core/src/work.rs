//! Wire contract for the content-generation work queue.
//!
//! These types are shared by the API (which produces them from database
//! rows) and the worker (which consumes them over HTTP), so the two sides
//! cannot drift apart.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::language;
use crate::types::{DbId, Timestamp};

/// Default lease TTL for a claimed work unit, in seconds. A worker that
/// dies mid-generation simply lets its lease expire; the pair then becomes
/// claimable again.
pub const DEFAULT_LEASE_SECS: u64 = 900;

/// Why a work unit was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkPriority {
    /// Destination has no guides at all; English comes first.
    NoGuides,
    /// Destination has guides but is missing at least one language.
    MissingLanguages,
}

/// Destination fields a worker needs to build prompts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkDestination {
    pub id: DbId,
    pub name: String,
    pub city: String,
    pub region_or_state: String,
    pub country: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub slug: String,
}

/// An already-stored guide, handed out as translation context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExistingGuide {
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Content requirements for the requested language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkRequirements {
    pub min_words: u32,
    pub include_local_insights: bool,
    pub include_seasonal_info: bool,
    pub include_course_recommendations: bool,
}

impl WorkRequirements {
    pub fn for_language(code: &str) -> Self {
        Self {
            min_words: language::min_words(code),
            include_local_insights: true,
            include_seasonal_info: true,
            include_course_recommendations: true,
        }
    }
}

/// One (destination, language) unit handed to a worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkUnit {
    pub priority: WorkPriority,
    pub destination: WorkDestination,
    pub target_language: String,
    pub language_name: String,
    /// Keyed by language code; carries the English guide for translations.
    pub existing_guides: BTreeMap<String, ExistingGuide>,
    pub is_translation: bool,
    pub work_requirements: WorkRequirements,
}

/// Response body of `GET /api/fetch-work/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchWorkResponse {
    WorkAvailable(WorkUnit),
    NoWork { message: String },
}

/// Request body of `POST /api/submit-work/`.
///
/// Two formats share this shape: the atomic format sets `language_code`
/// and `content`; the legacy bulk format sets `guides` instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitWorkRequest {
    pub destination_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guides: Option<BTreeMap<String, GuideContent>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker_info: Option<Value>,
}

/// One guide inside a legacy bulk submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuideContent {
    #[serde(default)]
    pub content: String,
}

/// Whether an upsert created a new row or overwrote an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideAction {
    Created,
    Updated,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmittedDestination {
    pub id: DbId,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmittedGuide {
    pub language_code: String,
    pub language_name: String,
    pub action: GuideAction,
    pub content_length: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Response body for an atomic submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitWorkResponse {
    pub status: String,
    pub destination: SubmittedDestination,
    pub guide: SubmittedGuide,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker_info: Option<Value>,
}

/// Per-language outcome lists for a legacy bulk submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkSubmitResults {
    pub created_guides: Vec<String>,
    pub updated_guides: Vec<String>,
    pub errors: Vec<String>,
}

/// Response body for a legacy bulk submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkSubmitResponse {
    pub status: String,
    pub results: BulkSubmitResults,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker_info: Option<Value>,
}
