#[cfg(test)]
#[path = "payment_test.rs"]
mod tests;

use chrono::Utc;
use rand::Rng;
use serde_derive::Deserialize;
use serde_derive::Serialize;

const REFERENCE_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const REFERENCE_SUFFIX_LEN: usize = 9;

/// Nine base36 characters, the uniqueness hint both payment references and
/// transaction ids carry after their timestamp segment.
pub fn reference_suffix(rng: &mut impl Rng) -> String {
    return (0..REFERENCE_SUFFIX_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..REFERENCE_CHARSET.len());
            return REFERENCE_CHARSET[idx] as char;
        })
        .collect();
}

/// An ephemeral request to the mock payment gateway. Amounts are whole
/// Naira. Never persisted; discarded after one attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub amount: u64,
    pub currency: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub api_ref: String,
}

impl PaymentRequest {
    /// The reference is caller-generated and never deduplicated by the
    /// gateway; retries are expected to mint a fresh one.
    pub fn new(amount: u64, email: &str, phone_number: Option<&str>) -> PaymentRequest {
        let suffix = reference_suffix(&mut rand::thread_rng());

        return PaymentRequest {
            amount,
            currency: "NGN".to_string(),
            email: email.to_string(),
            phone_number: phone_number.map(|phone| return phone.to_string()),
            api_ref: format!("LC_{}_{suffix}", Utc::now().timestamp_millis()),
        };
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaymentOutcome {
    Approved { transaction_id: String },
    Declined { reason: String },
}

impl PaymentOutcome {
    pub fn is_approved(&self) -> bool {
        return matches!(self, PaymentOutcome::Approved { .. });
    }
}
