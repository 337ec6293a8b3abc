//! Static trail catalog.
//!
//! Trails are declared in-process and never mutated at runtime; the declared
//! order is the stable order every query and the recommendation ranking fall
//! back to. There is no persistence behind this module.

use once_cell::sync::Lazy;

use crate::types::{Lesson, LessonType, Trail};

/// Introductory difficulty tier, used by the cold-start recommendation rule.
pub const LEVEL_BEGINNER: &str = "Beginner";
pub const LEVEL_INTERMEDIATE: &str = "Intermediate";

/// A skill key paired with its display label, as offered on the assessment
/// screen.
#[derive(Debug, Clone, Copy)]
pub struct SkillOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Skills the user can self-assess.
pub const SKILLS: &[SkillOption] = &[
    SkillOption { value: "communication", label: "Communication" },
    SkillOption { value: "critical", label: "Critical Thinking" },
    SkillOption { value: "ai", label: "AI Basics" },
    SkillOption { value: "sustain", label: "Sustainability" },
    SkillOption { value: "teamwork", label: "Teamwork" },
    SkillOption { value: "time-management", label: "Time Management" },
];

/// Display label for a skill key, falling back to the key itself.
pub fn skill_label(skill: &str) -> &str {
    SKILLS
        .iter()
        .find(|s| s.value == skill)
        .map(|s| s.label)
        .unwrap_or(skill)
}

fn lesson(id: &str, title: &str, lesson_type: LessonType, duration: &str) -> Lesson {
    Lesson {
        id: id.to_string(),
        title: title.to_string(),
        lesson_type,
        duration: duration.to_string(),
        completed: None,
    }
}

static ALL_TRAILS: Lazy<Vec<Trail>> = Lazy::new(|| {
    vec![
        Trail {
            id: "1".to_string(),
            title: "AI Basics".to_string(),
            description: "Learn the fundamentals of artificial intelligence and how to apply \
                          them in day-to-day professional work."
                .to_string(),
            duration: "2h".to_string(),
            level: LEVEL_BEGINNER.to_string(),
            category: "Technology".to_string(),
            skills: vec!["ai".to_string(), "critical".to_string()],
            lessons: vec![
                lesson("1-1", "What is AI?", LessonType::Video, "15min"),
                lesson("1-2", "Practical Applications", LessonType::Text, "20min"),
                lesson("1-3", "AI Tools", LessonType::Video, "25min"),
                lesson("1-4", "Final Quiz", LessonType::Quiz, "10min"),
            ],
        },
        Trail {
            id: "2".to_string(),
            title: "Essential Soft Skills".to_string(),
            description: "Develop the interpersonal skills the job market considers fundamental."
                .to_string(),
            duration: "1h".to_string(),
            level: LEVEL_BEGINNER.to_string(),
            category: "Personal Development".to_string(),
            skills: vec![
                "communication".to_string(),
                "teamwork".to_string(),
                "time-management".to_string(),
            ],
            lessons: vec![
                lesson("2-1", "Effective Communication", LessonType::Video, "20min"),
                lesson("2-2", "Teamwork", LessonType::Text, "15min"),
                lesson("2-3", "Time Management", LessonType::Video, "25min"),
            ],
        },
        Trail {
            id: "3".to_string(),
            title: "Sustainability at Work".to_string(),
            description: "Learn sustainable practices to apply in the professional environment."
                .to_string(),
            duration: "1.5h".to_string(),
            level: LEVEL_BEGINNER.to_string(),
            category: "Sustainability".to_string(),
            skills: vec!["sustain".to_string(), "critical".to_string()],
            lessons: vec![
                lesson("3-1", "Sustainability Concepts", LessonType::Text, "20min"),
                lesson("3-2", "Sustainable Practices", LessonType::Video, "30min"),
                lesson("3-3", "Applying It at Work", LessonType::Text, "20min"),
            ],
        },
        Trail {
            id: "4".to_string(),
            title: "Advanced Critical Thinking".to_string(),
            description: "Develop evidence-based analysis and decision-making skills."
                .to_string(),
            duration: "2.5h".to_string(),
            level: LEVEL_INTERMEDIATE.to_string(),
            category: "Personal Development".to_string(),
            skills: vec!["critical".to_string(), "communication".to_string()],
            lessons: vec![
                lesson("4-1", "Foundations of Critical Thinking", LessonType::Video, "30min"),
                lesson("4-2", "Analyzing Arguments", LessonType::Text, "40min"),
                lesson("4-3", "Decision Making", LessonType::Video, "35min"),
                lesson("4-4", "Practice Quiz", LessonType::Quiz, "15min"),
            ],
        },
    ]
});

/// Full catalog in stable declared order.
pub fn all_trails() -> &'static [Trail] {
    &ALL_TRAILS
}

/// Look up a trail by id.
pub fn trail_by_id(id: &str) -> Option<&'static Trail> {
    ALL_TRAILS.iter().find(|t| t.id == id)
}

/// Trails in a given category, preserving catalog order.
pub fn trails_by_category(category: &str) -> Vec<&'static Trail> {
    ALL_TRAILS.iter().filter(|t| t.category == category).collect()
}
