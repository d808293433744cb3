use std::time::Duration;

use anyhow::Result;

use super::MockMailer;
use crate::domain::models::LessonContent;
use crate::domain::models::LessonPlan;
use crate::domain::models::LessonPlanInput;
use crate::domain::models::Mailer;

#[tokio::test]
async fn it_always_reports_success() -> Result<()> {
    let mailer = MockMailer {
        delay: Duration::ZERO,
    };
    let plan = LessonPlan {
        id: "1700000000000".to_string(),
        user_id: "1700000000001".to_string(),
        input: LessonPlanInput::default(),
        content: LessonContent::default(),
        created_at: "2026-08-28T09:00:00+01:00".to_string(),
        is_premium: false,
    };

    let res = mailer.send_plan("amara@school.example", &plan).await;

    assert!(res.is_ok());
    return Ok(());
}
