use std::time::Duration;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::MockPaymentGateway;
use crate::domain::models::PaymentOutcome;
use crate::domain::models::PaymentProcessor;
use crate::domain::models::PaymentRequest;

fn instant_gateway(success_rate: f64) -> MockPaymentGateway {
    return MockPaymentGateway {
        delay: Duration::ZERO,
        success_rate,
    };
}

#[test]
fn it_approves_near_the_configured_rate() {
    let gateway = instant_gateway(0.9);
    let mut rng = StdRng::seed_from_u64(42);

    let approvals = (0..1000)
        .filter(|_| return gateway.decide(&mut rng).is_approved())
        .count();

    // Roughly 4 sigma around 900 for 1000 Bernoulli trials.
    assert!((860..=940).contains(&approvals), "approvals: {approvals}");
}

#[test]
fn it_always_approves_at_rate_one() {
    let gateway = instant_gateway(1.0);
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..100 {
        assert!(gateway.decide(&mut rng).is_approved());
    }
}

#[test]
fn it_always_declines_at_rate_zero() {
    let gateway = instant_gateway(0.0);
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..100 {
        let outcome = gateway.decide(&mut rng);
        match outcome {
            PaymentOutcome::Declined { reason } => {
                assert_eq!(reason, "Payment failed. Please try again.");
            }
            PaymentOutcome::Approved { .. } => panic!("approved at rate zero"),
        }
    }
}

#[test]
fn it_formats_transaction_ids() {
    let gateway = instant_gateway(1.0);
    let mut rng = StdRng::seed_from_u64(7);

    match gateway.decide(&mut rng) {
        PaymentOutcome::Approved { transaction_id } => {
            let parts = transaction_id.split('_').collect::<Vec<&str>>();
            assert_eq!(parts.len(), 3);
            assert_eq!(parts[0], "TXN");
            assert!(parts[1].parse::<i64>().is_ok());
            assert_eq!(parts[2].len(), 9);
        }
        PaymentOutcome::Declined { .. } => panic!("declined at rate one"),
    }
}

#[tokio::test]
async fn it_settles_attempts_independently_per_reference() -> Result<()> {
    let gateway = instant_gateway(1.0);
    let request = PaymentRequest::new(500, "amara@school.example", None);

    // Same reference both times; the gateway never deduplicates.
    let first = gateway.attempt(&request).await?;
    let second = gateway.attempt(&request).await?;

    assert!(first.is_approved());
    assert!(second.is_approved());
    match (first, second) {
        (
            PaymentOutcome::Approved { transaction_id: a },
            PaymentOutcome::Approved { transaction_id: b },
        ) => assert_ne!(a, b),
        _ => unreachable!(),
    }

    return Ok(());
}
