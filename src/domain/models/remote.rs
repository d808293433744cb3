use anyhow::Result;
use async_trait::async_trait;

use super::LessonPlan;
use super::LessonPlanInput;
use super::PaymentOutcome;
use super::PaymentRequest;

/// Stand-in for a generative backend. Implementations simulate latency and
/// expand the input into a full plan; they never consult the session store,
/// so sequencing against authentication is the caller's job.
#[async_trait]
pub trait PlanGenerator {
    async fn generate(&self, input: LessonPlanInput, owner_id: &str) -> Result<LessonPlan>;
}

/// Stand-in for a payment gateway. A decline is an ordinary outcome, not an
/// error; callers retry with a freshly minted request if they want to.
#[async_trait]
pub trait PaymentProcessor {
    async fn attempt(&self, request: &PaymentRequest) -> Result<PaymentOutcome>;
}

/// Stand-in for transactional mail delivery.
#[async_trait]
pub trait Mailer {
    async fn send_plan(&self, address: &str, plan: &LessonPlan) -> Result<()>;
}
