//! Trail recommendations.
//!
//! Ranks catalog trails against the assessment log. The ranking itself is a
//! pure function over in-memory lists so it can be tested without a store;
//! [`SkillEngine::recommended_trails`] wires it to the persisted log.

use std::cmp::Reverse;

use crate::catalog::{self, LEVEL_BEGINNER};
use crate::engine::SkillEngine;
use crate::types::{Assessment, Trail};

/// Ratings strictly below this mark a skill as weak.
pub const WEAK_SKILL_THRESHOLD: f64 = 7.0;

/// Trails suggested before the user has assessed anything.
const COLD_START_COUNT: usize = 2;
/// Trails suggested when no catalog trail covers a weak skill.
const FALLBACK_COUNT: usize = 3;

/// Skill keys from every assessment rated below the weak threshold.
///
/// Deliberately scans the full history rather than each skill's latest
/// rating, so a skill with an old low score stays "weak" even after a newer
/// high score. This mirrors long-standing app behavior and is kept until
/// product intent says otherwise; membership tests below are unaffected by
/// the duplicates this can produce.
pub fn weak_skills(assessments: &[Assessment]) -> Vec<String> {
    assessments
        .iter()
        .filter(|a| a.rating < WEAK_SKILL_THRESHOLD)
        .map(|a| a.skill.clone())
        .collect()
}

fn overlap_count(trail: &Trail, weak: &[String]) -> usize {
    trail.skills.iter().filter(|s| weak.contains(s)).count()
}

/// Rank catalog trails for the given assessment log.
///
/// - Empty log: the first [`COLD_START_COUNT`] introductory trails, in
///   catalog order.
/// - Otherwise: trails whose skill list intersects the weak-skill set,
///   ordered by descending overlap; ties keep catalog order (stable sort).
/// - No intersecting trail: the first [`FALLBACK_COUNT`] catalog trails.
pub fn rank_trails(assessments: &[Assessment]) -> Vec<Trail> {
    let trails = catalog::all_trails();

    if assessments.is_empty() {
        return trails
            .iter()
            .filter(|t| t.level == LEVEL_BEGINNER)
            .take(COLD_START_COUNT)
            .cloned()
            .collect();
    }

    let weak = weak_skills(assessments);

    let mut matched: Vec<Trail> = trails
        .iter()
        .filter(|t| t.skills.iter().any(|s| weak.contains(s)))
        .cloned()
        .collect();

    if matched.is_empty() {
        return trails.iter().take(FALLBACK_COUNT).cloned().collect();
    }

    matched.sort_by_key(|t| Reverse(overlap_count(t, &weak)));
    matched
}

impl SkillEngine {
    /// Recommended trails for the current assessment log.
    pub async fn recommended_trails(&self) -> Vec<Trail> {
        rank_trails(&self.assessments().await)
    }
}
