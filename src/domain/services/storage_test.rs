use std::env;
use std::fs;
use std::path;

use anyhow::Result;
use uuid::Uuid;

use super::AccountStore;
use super::PlanStore;
use crate::domain::models::Account;
use crate::domain::models::LessonContent;
use crate::domain::models::LessonPlan;
use crate::domain::models::LessonPlanInput;

fn temp_data_dir() -> path::PathBuf {
    return env::temp_dir().join(format!("lessoncraft-test-{}", Uuid::new_v4()));
}

fn fixture_plan(topic: &str) -> LessonPlan {
    return LessonPlan {
        id: "1700000000000".to_string(),
        user_id: "1700000000001".to_string(),
        input: LessonPlanInput {
            subject: "Math".to_string(),
            grade_level: "Primary 3".to_string(),
            topic: topic.to_string(),
            duration_minutes: 40,
            learning_objective: None,
        },
        content: LessonContent::default(),
        created_at: "2026-08-28T09:00:00+01:00".to_string(),
        is_premium: false,
    };
}

#[test]
fn it_round_trips_an_account() -> Result<()> {
    let store = AccountStore::new(temp_data_dir());
    let account = Account::new("amara@school.example", Some("Amara"));

    store.save(&account)?;
    let loaded = store.load()?;

    assert_eq!(loaded, Some(account));

    fs::remove_dir_all(&store.data_dir)?;
    return Ok(());
}

#[test]
fn it_loads_nothing_when_no_entry_exists() -> Result<()> {
    let store = AccountStore::new(temp_data_dir());

    assert_eq!(store.load()?, None);
    return Ok(());
}

#[test]
fn it_discards_a_malformed_account_entry() -> Result<()> {
    let data_dir = temp_data_dir();
    fs::create_dir_all(&data_dir)?;
    fs::write(data_dir.join("account.json"), "{\"id\": \"trunc")?;

    let store = AccountStore::new(data_dir.clone());
    let loaded = store.load()?;

    assert_eq!(loaded, None);
    assert!(!data_dir.join("account.json").exists());

    fs::remove_dir_all(&data_dir)?;
    return Ok(());
}

#[test]
fn it_deletes_idempotently() -> Result<()> {
    let store = AccountStore::new(temp_data_dir());
    let account = Account::new("amara@school.example", None);

    store.save(&account)?;
    store.delete()?;
    store.delete()?;

    assert_eq!(store.load()?, None);

    fs::remove_dir_all(&store.data_dir)?;
    return Ok(());
}

#[test]
fn it_appends_plans_in_order() -> Result<()> {
    let store = PlanStore::new(temp_data_dir());

    store.append(&fixture_plan("Fractions"))?;
    store.append(&fixture_plan("Decimals"))?;

    let plans = store.list()?;
    assert_eq!(plans.len(), 2);
    assert_eq!(plans[0].input.topic, "Fractions");
    assert_eq!(plans[1].input.topic, "Decimals");

    fs::remove_dir_all(&store.data_dir)?;
    return Ok(());
}

#[test]
fn it_lists_nothing_from_an_empty_store() -> Result<()> {
    let store = PlanStore::new(temp_data_dir());

    assert!(store.list()?.is_empty());
    return Ok(());
}
