use super::Account;
use super::AuthOutcome;
use super::Role;

#[test]
fn it_derives_the_name_from_the_email_local_part() {
    let account = Account::new("amara@school.example", None);

    assert_eq!(account.name, "amara");
    assert_eq!(account.email, "amara@school.example");
    assert_eq!(account.role, Role::Teacher);
    assert!(!account.is_premium);
}

#[test]
fn it_keeps_a_supplied_name_verbatim() {
    let account = Account::new("amara@school.example", Some("Mrs. Amara Obi"));

    assert_eq!(account.name, "Mrs. Amara Obi");
}

#[test]
fn it_falls_back_to_the_full_email_without_an_at_sign() {
    let account = Account::new("not-an-email", None);

    assert_eq!(account.name, "not-an-email");
}

#[test]
fn it_serializes_the_role_lowercase() {
    let account = Account::new("amara@school.example", None);
    let payload = serde_json::to_string(&account).unwrap();

    assert!(payload.contains("\"role\":\"teacher\""));
}

#[test]
fn it_reports_granted_outcomes() {
    assert!(AuthOutcome::Granted.is_granted());
    assert!(!AuthOutcome::denied("Invalid credentials").is_granted());
}
