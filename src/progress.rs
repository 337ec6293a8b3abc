//! Trail progress tracking.
//!
//! One progress record per trail id, upserted into a single JSON list blob.
//! Lesson-level completion is not stored; finishing lesson N of M moves the
//! trail-level percentage to N/M, and reaching 100 triggers the completion
//! flow (progress write, point award, badge check). That flow is a
//! best-effort sequence: the store has no multi-key transactions, so a
//! failure mid-sequence can leave points awarded without the completion
//! record, or vice versa.

use log::info;

use crate::catalog;
use crate::engine::{now_iso, SkillEngine};
use crate::error::Result;
use crate::gamification::POINTS_PER_TRAIL;
use crate::storage::StorageKey;
use crate::types::TrailProgress;

impl SkillEngine {
    /// Upsert a progress record by trail id.
    pub async fn save_trail_progress(&self, progress: &TrailProgress) -> Result<()> {
        let _guard = self.write_guard().await;

        let mut all: Vec<TrailProgress> = self.read_list(StorageKey::TrailProgress).await;
        match all.iter_mut().find(|p| p.trail_id == progress.trail_id) {
            Some(slot) => *slot = progress.clone(),
            None => all.push(progress.clone()),
        }
        self.write_json(StorageKey::TrailProgress, &all).await
    }

    /// Progress record for a single trail, if one exists.
    pub async fn trail_progress(&self, trail_id: &str) -> Option<TrailProgress> {
        self.all_trail_progress()
            .await
            .into_iter()
            .find(|p| p.trail_id == trail_id)
    }

    /// All progress records. Fails open to an empty list.
    pub async fn all_trail_progress(&self) -> Vec<TrailProgress> {
        self.read_list(StorageKey::TrailProgress).await
    }

    /// Start a trail: writes a fresh zero-progress record stamped with the
    /// current time, replacing any earlier record for the trail.
    pub async fn start_trail(&self, trail_id: &str) -> Result<TrailProgress> {
        let record = TrailProgress {
            trail_id: trail_id.to_string(),
            completed: false,
            progress: 0.0,
            started_at: Some(now_iso()),
            completed_at: None,
        };
        self.save_trail_progress(&record).await?;
        info!("skilluprs: [start_trail] Started trail {}", trail_id);
        Ok(record)
    }

    /// Mark a catalog lesson as reached, advancing the trail percentage to
    /// (lesson position / lesson count). Preserves the original start time.
    /// Reaching 100 runs the full completion flow. Returns the new
    /// percentage, or `None` when the trail or lesson is unknown.
    pub async fn complete_lesson(&self, trail_id: &str, lesson_id: &str) -> Result<Option<f64>> {
        let Some(trail) = catalog::trail_by_id(trail_id) else {
            return Ok(None);
        };
        let Some(index) = trail.lessons.iter().position(|l| l.id == lesson_id) else {
            return Ok(None);
        };

        let new_progress =
            (((index + 1) as f64 / trail.lessons.len() as f64) * 100.0).min(100.0);
        let started_at = self
            .trail_progress(trail_id)
            .await
            .and_then(|p| p.started_at)
            .unwrap_or_else(now_iso);

        self.save_trail_progress(&TrailProgress {
            trail_id: trail_id.to_string(),
            completed: new_progress >= 100.0,
            progress: new_progress,
            started_at: Some(started_at),
            completed_at: None,
        })
        .await?;

        if new_progress >= 100.0 {
            self.complete_trail(trail_id).await?;
        }

        Ok(Some(new_progress))
    }

    /// Complete a trail: write the terminal progress record (preserving
    /// `started_at`, defaulting it to now for trails never started), award
    /// completion points and re-evaluate badges.
    pub async fn complete_trail(&self, trail_id: &str) -> Result<()> {
        let started_at = self
            .trail_progress(trail_id)
            .await
            .and_then(|p| p.started_at)
            .unwrap_or_else(now_iso);

        self.save_trail_progress(&TrailProgress {
            trail_id: trail_id.to_string(),
            completed: true,
            progress: 100.0,
            started_at: Some(started_at),
            completed_at: Some(now_iso()),
        })
        .await?;

        self.add_points(POINTS_PER_TRAIL).await?;
        self.check_badges().await?;

        info!("skilluprs: [complete_trail] Completed trail {}", trail_id);
        Ok(())
    }
}
