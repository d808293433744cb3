#[cfg(test)]
#[path = "payments_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use tokio::time;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::reference_suffix;
use crate::domain::models::PaymentOutcome;
use crate::domain::models::PaymentProcessor;
use crate::domain::models::PaymentRequest;

const DECLINE_REASON: &str = "Payment failed. Please try again.";

/// Coin-flip stand-in for a payment gateway. Approves at the configured
/// rate after a simulated delay. The request's reference string is never
/// inspected, so two attempts with the same reference are independent.
pub struct MockPaymentGateway {
    delay: Duration,
    success_rate: f64,
}

impl Default for MockPaymentGateway {
    fn default() -> MockPaymentGateway {
        let delay_ms = Config::get(ConfigKey::PaymentDelayMs)
            .parse::<u64>()
            .unwrap_or(3000);
        let success_rate = Config::get(ConfigKey::PaymentSuccessRate)
            .parse::<f64>()
            .unwrap_or(0.9);

        return MockPaymentGateway {
            delay: Duration::from_millis(delay_ms),
            success_rate,
        };
    }
}

impl MockPaymentGateway {
    fn decide(&self, rng: &mut impl Rng) -> PaymentOutcome {
        if rng.gen::<f64>() >= self.success_rate {
            return PaymentOutcome::Declined {
                reason: DECLINE_REASON.to_string(),
            };
        }

        let suffix = reference_suffix(rng);
        return PaymentOutcome::Approved {
            transaction_id: format!("TXN_{}_{suffix}", Utc::now().timestamp_millis()),
        };
    }
}

#[async_trait]
impl PaymentProcessor for MockPaymentGateway {
    async fn attempt(&self, request: &PaymentRequest) -> Result<PaymentOutcome> {
        time::sleep(self.delay).await;

        let outcome = self.decide(&mut rand::thread_rng());
        tracing::debug!(
            api_ref = request.api_ref,
            amount = request.amount,
            approved = outcome.is_approved(),
            "Payment attempt settled"
        );

        return Ok(outcome);
    }
}
