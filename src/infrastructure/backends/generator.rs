#[cfg(test)]
#[path = "generator_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Local;
use chrono::SecondsFormat;
use chrono::Utc;
use tokio::time;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::LessonContent;
use crate::domain::models::LessonPlan;
use crate::domain::models::LessonPlanInput;
use crate::domain::models::PlanGenerator;

/// Fixed-template stand-in for a generative backend. Expands the topic into
/// the six content sections after a simulated delay. Entitlement-blind:
/// every plan comes back with the premium flag off, whoever asks.
pub struct MockPlanGenerator {
    delay: Duration,
}

impl Default for MockPlanGenerator {
    fn default() -> MockPlanGenerator {
        let delay_ms = Config::get(ConfigKey::GenerateDelayMs)
            .parse::<u64>()
            .unwrap_or(2000);

        return MockPlanGenerator {
            delay: Duration::from_millis(delay_ms),
        };
    }
}

fn expand_topic(topic: &str) -> LessonContent {
    return LessonContent {
        objectives: vec![
            format!("Students will understand the key concepts of {topic}"),
            format!("Students will be able to apply {topic} in practical scenarios"),
            "Students will demonstrate knowledge through interactive activities".to_string(),
        ],
        warm_up: format!(
            "Begin with a 5-minute discussion about students' prior knowledge of {topic}. Ask open-ended questions to gauge understanding and create engagement."
        ),
        core_content: vec![
            format!("Introduction to {topic} - Definition and key terminology"),
            format!("Core principles and concepts related to {topic}"),
            "Real-world applications and examples".to_string(),
            "Interactive demonstration or explanation".to_string(),
            "Q&A session to clarify understanding".to_string(),
        ],
        student_activities: vec![
            format!("Group discussion: Students share their thoughts on {topic}"),
            "Hands-on activity: Practice exercise related to the lesson".to_string(),
            "Pair work: Students explain concepts to each other".to_string(),
            "Individual reflection: Write key takeaways in their notebooks".to_string(),
        ],
        assessment_questions: vec![
            format!("What are the main concepts we learned about {topic}?"),
            format!("How would you explain {topic} to someone who has never heard of it?"),
            format!("Give an example of how {topic} is used in everyday life"),
            format!("What questions do you still have about {topic}?"),
        ],
        homework_tasks: vec![
            format!("Read textbook pages related to {topic}"),
            format!("Complete practice worksheet on {topic}"),
            format!("Find one real-world example of {topic} and write a short paragraph"),
            "Prepare for next class by reviewing today's notes".to_string(),
        ],
    };
}

#[async_trait]
impl PlanGenerator for MockPlanGenerator {
    async fn generate(&self, input: LessonPlanInput, owner_id: &str) -> Result<LessonPlan> {
        time::sleep(self.delay).await;

        let plan = LessonPlan {
            id: Utc::now().timestamp_millis().to_string(),
            user_id: owner_id.to_string(),
            content: expand_topic(&input.topic),
            input,
            created_at: Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
            is_premium: false,
        };

        tracing::debug!(topic = plan.input.topic, "Generated lesson plan");
        return Ok(plan);
    }
}
