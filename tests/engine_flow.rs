//! End-to-end engine flows against an on-disk SQLite store.
//!
//! Exercises the full pipeline: session login -> assessments ->
//! recommendations -> trail progress -> gamification, including reopening
//! the database to verify persistence.
//!
//! Run with: `cargo test --test engine_flow`

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;

use skilluprs::error::Result;
use skilluprs::gamification::{
    BADGE_ASSESSOR, BADGE_FIRST_STEPS, BADGE_TRAIL_COMPLETE, POINTS_PER_TRAIL,
};
use skilluprs::{KeyValueStore, MemoryStore, SkillEngine, SkillUpError};

/// Helper: engine backed by a SQLite file in a temp dir.
fn setup_engine() -> (SkillEngine, TempDir) {
    let tmp_dir = TempDir::new().expect("failed to create temp dir");
    let db_path = tmp_dir.path().join("skillup.db");
    let engine = SkillEngine::open(db_path.to_str().unwrap()).expect("failed to open engine");
    (engine, tmp_dir)
}

#[tokio::test]
async fn test_fresh_user_gets_introductory_recommendations() {
    let (engine, _tmp) = setup_engine();

    let recommended = engine.recommended_trails().await;
    assert_eq!(recommended.len(), 2);
    assert!(recommended.iter().all(|t| t.level == "Beginner"));
}

#[tokio::test]
async fn test_assessment_drives_recommendations_and_badges() {
    let (engine, _tmp) = setup_engine();
    engine.login("Ana", "ana@example.com").await.unwrap();

    engine.submit_assessment("ai", 4.0).await.unwrap();
    let recommended = engine.recommended_trails().await;
    assert!(recommended[0].skills.contains(&"ai".to_string()));

    engine.submit_assessment("critical", 5.0).await.unwrap();
    engine.submit_assessment("teamwork", 9.0).await.unwrap();

    let progress = engine.user_progress().await;
    assert_eq!(progress.total_assessments, 3);
    assert_eq!(progress.total_points, 30);
    assert!(progress.badges.contains(&BADGE_ASSESSOR.to_string()));
}

#[tokio::test]
async fn test_trail_completion_awards_points_and_badge() {
    let (engine, _tmp) = setup_engine();

    engine.start_trail("2").await.unwrap();
    engine.complete_lesson("2", "2-1").await.unwrap();
    engine.complete_lesson("2", "2-2").await.unwrap();
    engine.complete_lesson("2", "2-3").await.unwrap();

    let stored = engine.trail_progress("2").await.unwrap();
    assert!(stored.completed);
    assert_eq!(stored.progress, 100.0);

    assert_eq!(engine.points().await, POINTS_PER_TRAIL);
    let badges = engine.badges().await;
    assert!(badges.contains(&BADGE_TRAIL_COMPLETE.to_string()));
    assert!(badges.contains(&BADGE_FIRST_STEPS.to_string()));
}

#[tokio::test]
async fn test_badges_never_shrink() {
    let (engine, _tmp) = setup_engine();

    engine.complete_trail("1").await.unwrap();
    let after_completion = engine.badges().await;
    assert!(!after_completion.is_empty());

    // Further activity only ever grows the badge set
    engine.submit_assessment("sustain", 2.0).await.unwrap();
    engine.submit_assessment("teamwork", 3.0).await.unwrap();
    engine.submit_assessment("ai", 10.0).await.unwrap();
    engine.check_badges().await.unwrap();
    engine.check_badges().await.unwrap();

    let later = engine.badges().await;
    for badge in &after_completion {
        assert!(later.contains(badge), "badge {} was revoked", badge);
    }
    // No duplicates either
    let mut deduped = later.clone();
    deduped.dedup();
    assert_eq!(deduped.len(), later.len());
}

#[tokio::test]
async fn test_state_survives_reopen() {
    let tmp_dir = TempDir::new().unwrap();
    let db_path = tmp_dir.path().join("skillup.db");
    let path = db_path.to_str().unwrap();

    {
        let engine = SkillEngine::open(path).unwrap();
        engine.login("Ana", "ana@example.com").await.unwrap();
        engine.submit_assessment("ai", 4.0).await.unwrap();
        engine.complete_trail("1").await.unwrap();
    }

    let engine = SkillEngine::open(path).unwrap();
    assert!(engine.token().await.is_some());
    assert_eq!(engine.assessments().await.len(), 1);
    assert_eq!(engine.points().await, 60);
    assert!(engine.trail_progress("1").await.unwrap().completed);
}

#[tokio::test]
async fn test_clear_all_data_erases_everything() {
    let (engine, _tmp) = setup_engine();
    engine.login("Ana", "ana@example.com").await.unwrap();
    engine.submit_assessment("ai", 4.0).await.unwrap();
    engine.complete_trail("1").await.unwrap();

    engine.clear_all_data().await.unwrap();

    assert!(engine.token().await.is_none());
    assert!(engine.profile().await.is_none());
    assert!(engine.assessments().await.is_empty());
    assert!(engine.all_trail_progress().await.is_empty());
    assert_eq!(engine.points().await, 0);
    assert!(engine.badges().await.is_empty());
}

// ============================================================================
// Write failure propagation
// ============================================================================

/// Store wrapper that can be switched into a failing mode for writes.
struct FlakyStore {
    inner: MemoryStore,
    fail_writes: AtomicBool,
}

impl FlakyStore {
    fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_writes: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(SkillUpError::Storage("disk full".to_string()));
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.inner.remove(key).await
    }

    async fn remove_many(&self, keys: &[&str]) -> Result<()> {
        self.inner.remove_many(keys).await
    }
}

#[tokio::test]
async fn test_write_failures_propagate_to_caller() {
    let store = Arc::new(FlakyStore::new());
    let engine = SkillEngine::new(store.clone());

    engine.save_assessment("ai", "AI Basics", 4.0).await.unwrap();

    store.fail_writes.store(true, Ordering::SeqCst);
    let err = engine
        .save_assessment("critical", "Critical Thinking", 5.0)
        .await
        .unwrap_err();
    assert!(matches!(err, SkillUpError::Storage(_)));

    // The failed write dropped nothing that was already persisted
    store.fail_writes.store(false, Ordering::SeqCst);
    assert_eq!(engine.assessments().await.len(), 1);
}
