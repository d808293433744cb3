use rand::rngs::StdRng;
use rand::SeedableRng;

use super::reference_suffix;
use super::PaymentOutcome;
use super::PaymentRequest;

#[test]
fn it_builds_references_in_the_expected_format() {
    let request = PaymentRequest::new(500, "amara@school.example", Some("+2348000000000"));

    let parts = request.api_ref.split('_').collect::<Vec<&str>>();
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], "LC");
    assert!(parts[1].parse::<i64>().is_ok());
    assert_eq!(parts[2].len(), 9);
    assert!(parts[2]
        .chars()
        .all(|c| return c.is_ascii_lowercase() || c.is_ascii_digit()));

    assert_eq!(request.currency, "NGN");
    assert_eq!(request.amount, 500);
}

#[test]
fn it_draws_suffixes_from_the_base36_charset() {
    let mut rng = StdRng::seed_from_u64(7);
    let suffix = reference_suffix(&mut rng);

    assert_eq!(suffix.len(), 9);
    assert!(suffix
        .chars()
        .all(|c| return c.is_ascii_lowercase() || c.is_ascii_digit()));
}

#[test]
fn it_reports_approved_outcomes() {
    let approved = PaymentOutcome::Approved {
        transaction_id: "TXN_1_abc".to_string(),
    };
    let declined = PaymentOutcome::Declined {
        reason: "Payment failed. Please try again.".to_string(),
    };

    assert!(approved.is_approved());
    assert!(!declined.is_approved());
}
