//! Points and badges.
//!
//! Engagement state is a persisted running points total plus a set of
//! unlocked badge ids. Badges are monotonic: once unlocked they are never
//! revoked, and every rule is re-evaluated from scratch on each check, so
//! running [`SkillEngine::check_badges`] twice in a row changes nothing.

use log::{info, warn};

use crate::engine::SkillEngine;
use crate::error::Result;
use crate::storage::StorageKey;
use crate::types::UserProgress;

/// Points awarded for submitting a self-assessment.
pub const POINTS_PER_ASSESSMENT: i64 = 10;
/// Points awarded for completing a trail.
pub const POINTS_PER_TRAIL: i64 = 50;

pub const BADGE_FIRST_STEPS: &str = "first_steps";
pub const BADGE_TRAIL_COMPLETE: &str = "trail_complete";
pub const BADGE_ASSESSOR: &str = "assessor";
pub const BADGE_EXPERT: &str = "expert";

/// Display metadata for a badge, for the UI layer.
#[derive(Debug, Clone, Copy)]
pub struct BadgeInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Every badge the app can unlock.
pub const BADGES: &[BadgeInfo] = &[
    BadgeInfo {
        id: BADGE_FIRST_STEPS,
        name: "First Steps",
        description: "Earned 50 points",
    },
    BadgeInfo {
        id: BADGE_TRAIL_COMPLETE,
        name: "Trail Complete",
        description: "Completed your first trail",
    },
    BadgeInfo {
        id: BADGE_ASSESSOR,
        name: "Assessor",
        description: "Submitted 3 self-assessments",
    },
    BadgeInfo {
        id: BADGE_EXPERT,
        name: "Expert",
        description: "Earned 200 points",
    },
];

/// Look up display metadata for a badge id.
pub fn badge_info(id: &str) -> Option<&'static BadgeInfo> {
    BADGES.iter().find(|b| b.id == id)
}

impl SkillEngine {
    /// Current points total. Absent or unparsable data reads as 0.
    pub async fn points(&self) -> i64 {
        match self.read_raw(StorageKey::Points).await {
            Some(data) => data.trim().parse().unwrap_or_else(|_| {
                warn!("skilluprs: [points] Unparsable points blob {:?}", data);
                0
            }),
            None => 0,
        }
    }

    /// Add to the running points total. The counter only ever grows in
    /// practice; award amounts are the policy constants above.
    pub async fn add_points(&self, points: i64) -> Result<()> {
        let _guard = self.write_guard().await;
        let total = self.points().await + points;
        self.write_raw(StorageKey::Points, &total.to_string()).await?;
        info!(
            "skilluprs: [add_points] +{} points (total {})",
            points, total
        );
        Ok(())
    }

    /// Unlocked badge ids, in unlock order. Fails open to an empty list.
    pub async fn badges(&self) -> Vec<String> {
        self.read_list(StorageKey::Badges).await
    }

    /// Unlock a badge if it is not already unlocked. Returns true if the
    /// badge was newly added.
    pub async fn add_badge(&self, badge_id: &str) -> Result<bool> {
        let _guard = self.write_guard().await;
        let mut badges = self.badges().await;
        if badges.iter().any(|b| b == badge_id) {
            return Ok(false);
        }
        badges.push(badge_id.to_string());
        self.write_json(StorageKey::Badges, &badges).await?;
        info!("skilluprs: [add_badge] Unlocked badge {}", badge_id);
        Ok(true)
    }

    /// Re-evaluate every badge rule against current state and unlock any
    /// badge whose condition holds. Idempotent; intended to run after every
    /// point-earning event. Returns the badges newly unlocked by this call.
    pub async fn check_badges(&self) -> Result<Vec<String>> {
        let points = self.points().await;
        let completed_trails = self
            .all_trail_progress()
            .await
            .iter()
            .filter(|p| p.completed)
            .count();
        let total_assessments = self.assessments().await.len();

        let mut unlocked = Vec::new();

        if points >= 50 && self.add_badge(BADGE_FIRST_STEPS).await? {
            unlocked.push(BADGE_FIRST_STEPS.to_string());
        }
        if completed_trails >= 1 && self.add_badge(BADGE_TRAIL_COMPLETE).await? {
            unlocked.push(BADGE_TRAIL_COMPLETE.to_string());
        }
        if total_assessments >= 3 && self.add_badge(BADGE_ASSESSOR).await? {
            unlocked.push(BADGE_ASSESSOR.to_string());
        }
        if points >= 200 && self.add_badge(BADGE_EXPERT).await? {
            unlocked.push(BADGE_EXPERT.to_string());
        }

        Ok(unlocked)
    }

    /// Aggregate progress summary, recomputed from the logs on every call.
    pub async fn user_progress(&self) -> UserProgress {
        let points = self.points().await;
        let badges = self.badges().await;
        let trail_progress = self.all_trail_progress().await;
        let assessments = self.assessments().await;

        let completed_trails = trail_progress.iter().filter(|p| p.completed).count() as u32;

        let mut skills_developed: Vec<String> = Vec::new();
        for a in &assessments {
            if !skills_developed.contains(&a.skill) {
                skills_developed.push(a.skill.clone());
            }
        }

        UserProgress {
            total_points: points,
            badges,
            completed_trails,
            total_assessments: assessments.len() as u32,
            skills_developed,
        }
    }
}
