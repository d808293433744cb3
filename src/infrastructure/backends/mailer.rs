#[cfg(test)]
#[path = "mailer_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tokio::time;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::LessonPlan;
use crate::domain::models::Mailer;

/// Stand-in for transactional mail. Reports success after a simulated
/// delay and delivers nothing.
pub struct MockMailer {
    delay: Duration,
}

impl Default for MockMailer {
    fn default() -> MockMailer {
        let delay_ms = Config::get(ConfigKey::EmailDelayMs)
            .parse::<u64>()
            .unwrap_or(1500);

        return MockMailer {
            delay: Duration::from_millis(delay_ms),
        };
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send_plan(&self, address: &str, plan: &LessonPlan) -> Result<()> {
        time::sleep(self.delay).await;

        tracing::debug!(address, plan_id = plan.id, "Pretended to send lesson plan");
        return Ok(());
    }
}
