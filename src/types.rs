//! Data containers persisted by the engine or served from the static catalog.
//!
//! These shapes mirror the JSON blobs written to the on-device key-value store,
//! so every struct serializes with camelCase field names. Changing a field here
//! changes the persisted format.

use serde::{Deserialize, Serialize};

// ============================================================================
// Session
// ============================================================================

/// The signed-in user's profile. Mutated wholesale on save; no history kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub email: String,
}

// ============================================================================
// Assessments
// ============================================================================

/// A single self-assessment event. Immutable once created; the log is
/// append-only and never updated or deleted in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    /// Unique id derived from the creation time (millisecond timestamp).
    pub id: String,
    /// Skill key (e.g., "communication"), distinct from the display label.
    pub skill: String,
    /// Display label captured at submission time.
    pub skill_label: String,
    /// Self-assessed rating in [0, 10].
    pub rating: f64,
    /// ISO 8601 creation timestamp.
    pub date: String,
}

// ============================================================================
// Trails
// ============================================================================

/// Lesson content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonType {
    Video,
    Text,
    Quiz,
}

/// An atomic learning unit within a trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub lesson_type: LessonType,
    /// Display string, e.g. "15min".
    pub duration: String,
    /// Declared in the catalog format but never written by any code path;
    /// completion is tracked only via the trail-level progress percentage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// A structured learning path composed of ordered lessons, tagged with the
/// skill keys it develops. Statically defined, never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trail {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Display string, e.g. "2h".
    pub duration: String,
    pub level: String,
    pub category: String,
    pub skills: Vec<String>,
    pub lessons: Vec<Lesson>,
}

// ============================================================================
// Progress
// ============================================================================

/// Per-trail progress record, upserted by trail id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrailProgress {
    pub trail_id: String,
    pub completed: bool,
    /// Percentage in [0, 100]. A value of 100 implies `completed`, enforced
    /// by the writer rather than by storage.
    pub progress: f64,
    /// ISO 8601 timestamp of when the trail was first started.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    /// ISO 8601 timestamp of completion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

/// Aggregate user progress, recomputed from the persisted logs on every read.
/// Never stored itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub total_points: i64,
    pub badges: Vec<String>,
    pub completed_trails: u32,
    pub total_assessments: u32,
    /// Distinct skill keys assessed at least once, in first-seen order.
    pub skills_developed: Vec<String>,
}
