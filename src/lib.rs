//! # skilluprs
//!
//! Local-first data and logic core for the SkillUp+ mobile app: users take
//! self-assessments of soft and hard skills, follow recommended learning
//! trails, and earn points and badges for engagement. There is no server
//! backend; all state is persisted on-device as namespaced key-value JSON
//! blobs.
//!
//! This crate provides:
//! - A key-value storage port with a SQLite implementation
//! - Session, assessment and trail-progress records
//! - The gamification rules (points, badges)
//! - Trail catalog and recommendation ranking
//!
//! The screen/navigation layer above consumes [`SkillEngine`], constructed
//! once per session:
//!
//! ```rust
//! use skilluprs::SkillEngine;
//!
//! # async fn demo() -> skilluprs::Result<()> {
//! let engine = SkillEngine::open("/data/skillup.db")?;
//! engine.login("Ana", "ana@example.com").await?;
//! engine.submit_assessment("ai", 4.0).await?;
//! let trails = engine.recommended_trails().await;
//! # Ok(()) }
//! ```

// Unified error handling
pub mod error;
pub use error::{Result, SkillUpError};

// Persisted data containers
pub mod types;
pub use types::{Assessment, Lesson, LessonType, Profile, Trail, TrailProgress, UserProgress};

// Key-value storage port and implementations
pub mod storage;
pub use storage::{KeyValueStore, MemoryStore, SqliteStore, StorageKey, STORAGE_NAMESPACE};

// Per-session engine over the store
pub mod engine;
pub use engine::SkillEngine;

// Assessment log
pub mod assessment;
pub use assessment::validate_rating;

// Trail progress tracking
pub mod progress;

// Points and badges
pub mod gamification;
pub use gamification::{
    badge_info, BadgeInfo, BADGES, POINTS_PER_ASSESSMENT, POINTS_PER_TRAIL,
};

// Static trail catalog
pub mod catalog;
pub use catalog::{all_trails, skill_label, trail_by_id, trails_by_category, SkillOption, SKILLS};

// Recommendation ranking
pub mod recommend;
pub use recommend::{rank_trails, weak_skills, WEAK_SKILL_THRESHOLD};

/// Initialize logging for Android
#[cfg(target_os = "android")]
pub fn init_logging() {
    use android_logger::Config;
    use log::LevelFilter;

    android_logger::init_once(
        Config::default()
            .with_max_level(LevelFilter::Debug)
            .with_tag("skilluprs"),
    );
}

#[cfg(not(target_os = "android"))]
pub fn init_logging() {
    // No-op on non-Android platforms
}
