//! Assessment log.
//!
//! An append-only list of self-assessment events stored as a single JSON
//! blob. Records are never updated or deleted; "current" rating for a skill
//! means the most recent entry by date.
//!
//! The log itself performs no validation. Callers are expected to run
//! [`validate_rating`] before saving; the high-level [`SkillEngine::submit_assessment`]
//! flow does exactly that.

use log::info;

use crate::catalog;
use crate::engine::{date_millis, now_iso, now_millis, SkillEngine};
use crate::error::{Result, SkillUpError};
use crate::gamification::POINTS_PER_ASSESSMENT;
use crate::storage::StorageKey;
use crate::types::Assessment;

/// Caller-side rating check: finite and within [0, 10].
pub fn validate_rating(rating: f64) -> Result<()> {
    if rating.is_finite() && (0.0..=10.0).contains(&rating) {
        Ok(())
    } else {
        Err(SkillUpError::InvalidRating { rating })
    }
}

impl SkillEngine {
    /// Append a new assessment to the log. The id and date are derived from
    /// the current time. No validation happens here; write failures propagate
    /// and the caller should surface them without retrying.
    pub async fn save_assessment(
        &self,
        skill: &str,
        skill_label: &str,
        rating: f64,
    ) -> Result<Assessment> {
        let _guard = self.write_guard().await;

        let mut assessments: Vec<Assessment> = self.read_list(StorageKey::Assessments).await;
        let assessment = Assessment {
            id: now_millis().to_string(),
            skill: skill.to_string(),
            skill_label: skill_label.to_string(),
            rating,
            date: now_iso(),
        };
        assessments.push(assessment.clone());
        self.write_json(StorageKey::Assessments, &assessments).await?;

        info!(
            "skilluprs: [save_assessment] Saved {} assessment ({} total)",
            skill,
            assessments.len()
        );
        Ok(assessment)
    }

    /// Full assessment log. Fails open to an empty list on missing or
    /// unreadable data.
    pub async fn assessments(&self) -> Vec<Assessment> {
        self.read_list(StorageKey::Assessments).await
    }

    /// Most recent assessment for a skill, by date.
    pub async fn latest_by_skill(&self, skill: &str) -> Option<Assessment> {
        let mut matching: Vec<Assessment> = self
            .assessments()
            .await
            .into_iter()
            .filter(|a| a.skill == skill)
            .collect();
        matching.sort_by_key(|a| std::cmp::Reverse(date_millis(&a.date)));
        matching.into_iter().next()
    }

    /// Full submission flow: validate the rating, resolve the display label,
    /// append to the log, award points and re-evaluate badges. The point
    /// award and badge check are best-effort follow-ups, not a transaction.
    pub async fn submit_assessment(&self, skill: &str, rating: f64) -> Result<Assessment> {
        validate_rating(rating)?;
        let label = catalog::skill_label(skill);
        let assessment = self.save_assessment(skill, label, rating).await?;
        self.add_points(POINTS_PER_ASSESSMENT).await?;
        self.check_badges().await?;
        Ok(assessment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assessment(skill: &str, rating: f64, date: &str) -> Assessment {
        Assessment {
            id: date_millis(date).to_string(),
            skill: skill.to_string(),
            skill_label: skill.to_string(),
            rating,
            date: date.to_string(),
        }
    }

    #[test]
    fn test_validate_rating_boundaries() {
        assert!(validate_rating(0.0).is_ok());
        assert!(validate_rating(10.0).is_ok());
        assert!(validate_rating(7.5).is_ok());

        assert!(validate_rating(-0.1).is_err());
        assert!(validate_rating(10.1).is_err());
        assert!(validate_rating(f64::NAN).is_err());
        assert!(validate_rating(f64::INFINITY).is_err());
    }

    #[tokio::test]
    async fn test_save_appends_to_log() {
        let engine = SkillEngine::in_memory().unwrap();

        engine.save_assessment("ai", "AI Basics", 4.0).await.unwrap();
        engine
            .save_assessment("communication", "Communication", 8.0)
            .await
            .unwrap();

        let log = engine.assessments().await;
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].skill, "ai");
        assert_eq!(log[1].skill, "communication");
    }

    #[tokio::test]
    async fn test_empty_log_reads_as_empty() {
        let engine = SkillEngine::in_memory().unwrap();
        assert!(engine.assessments().await.is_empty());
        assert!(engine.latest_by_skill("ai").await.is_none());
    }

    #[tokio::test]
    async fn test_corrupted_log_fails_open() {
        let engine = SkillEngine::in_memory().unwrap();
        engine
            .write_raw(StorageKey::Assessments, "{broken")
            .await
            .unwrap();
        assert!(engine.assessments().await.is_empty());
    }

    #[tokio::test]
    async fn test_latest_by_skill_picks_most_recent_date() {
        let engine = SkillEngine::in_memory().unwrap();
        let log = vec![
            assessment("ai", 3.0, "2024-01-01T10:00:00+00:00"),
            assessment("ai", 8.0, "2024-03-01T10:00:00+00:00"),
            assessment("ai", 5.0, "2024-02-01T10:00:00+00:00"),
            assessment("communication", 9.0, "2024-04-01T10:00:00+00:00"),
        ];
        engine
            .write_json(StorageKey::Assessments, &log)
            .await
            .unwrap();

        let latest = engine.latest_by_skill("ai").await.unwrap();
        assert_eq!(latest.rating, 8.0);
        assert_eq!(latest.date, "2024-03-01T10:00:00+00:00");
    }

    #[tokio::test]
    async fn test_submit_rejects_out_of_range_rating() {
        let engine = SkillEngine::in_memory().unwrap();
        let err = engine.submit_assessment("ai", 11.0).await.unwrap_err();
        assert!(matches!(err, SkillUpError::InvalidRating { .. }));
        // Nothing was persisted
        assert!(engine.assessments().await.is_empty());
        assert_eq!(engine.points().await, 0);
    }

    #[tokio::test]
    async fn test_submit_awards_points_and_resolves_label() {
        let engine = SkillEngine::in_memory().unwrap();
        let saved = engine.submit_assessment("critical", 6.0).await.unwrap();

        assert_eq!(saved.skill_label, "Critical Thinking");
        assert_eq!(engine.points().await, POINTS_PER_ASSESSMENT);
    }
}
