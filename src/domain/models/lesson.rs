use serde_derive::Deserialize;
use serde_derive::Serialize;

/// The teacher-supplied parameters for one generation request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonPlanInput {
    pub subject: String,
    pub grade_level: String,
    pub topic: String,
    pub duration_minutes: u32,
    pub learning_objective: Option<String>,
}

/// The fixed six-section structure every generated plan carries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonContent {
    pub objectives: Vec<String>,
    pub warm_up: String,
    pub core_content: Vec<String>,
    pub student_activities: Vec<String>,
    pub assessment_questions: Vec<String>,
    pub homework_tasks: Vec<String>,
}

/// One generated lesson-plan artifact. Owned by the caller; the plan
/// library only appends serialized copies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonPlan {
    pub id: String,
    pub user_id: String,
    pub input: LessonPlanInput,
    pub content: LessonContent,
    pub created_at: String,
    pub is_premium: bool,
}
