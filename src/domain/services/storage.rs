#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;

use std::fs;
use std::path;

use anyhow::Result;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Account;
use crate::domain::models::LessonPlan;

const ACCOUNT_FILE: &str = "account.json";
const PLANS_FILE: &str = "plans.json";

fn ensure_dir(dir: &path::Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }

    return Ok(());
}

/// The durable home of the account entry. Reads and writes are synchronous
/// so a mutation is on disk before subscribers hear about it.
pub struct AccountStore {
    pub data_dir: path::PathBuf,
}

impl Default for AccountStore {
    fn default() -> AccountStore {
        return AccountStore::new(path::PathBuf::from(Config::get(ConfigKey::DataDir)));
    }
}

impl AccountStore {
    pub fn new(data_dir: path::PathBuf) -> AccountStore {
        return AccountStore { data_dir };
    }

    fn file_path(&self) -> path::PathBuf {
        return self.data_dir.join(ACCOUNT_FILE);
    }

    /// A missing entry is a signed-out state. A malformed entry is deleted
    /// and reported as missing rather than surfaced as an error.
    pub fn load(&self) -> Result<Option<Account>> {
        let file_path = self.file_path();
        if !file_path.exists() {
            return Ok(None);
        }

        let payload = fs::read_to_string(&file_path)?;
        match serde_json::from_str::<Account>(&payload) {
            Ok(account) => return Ok(Some(account)),
            Err(err) => {
                tracing::warn!(error = %err, "Discarding malformed account entry");
                fs::remove_file(&file_path)?;
                return Ok(None);
            }
        }
    }

    pub fn save(&self, account: &Account) -> Result<()> {
        ensure_dir(&self.data_dir)?;
        let payload = serde_json::to_string(account)?;
        fs::write(self.file_path(), payload)?;

        return Ok(());
    }

    pub fn delete(&self) -> Result<()> {
        let file_path = self.file_path();
        if !file_path.exists() {
            return Ok(());
        }

        fs::remove_file(file_path)?;
        return Ok(());
    }
}

/// Append-only list of generated plans. Grows unbounded, no eviction,
/// matching the storage layout this tool simulates.
pub struct PlanStore {
    pub data_dir: path::PathBuf,
}

impl Default for PlanStore {
    fn default() -> PlanStore {
        return PlanStore::new(path::PathBuf::from(Config::get(ConfigKey::DataDir)));
    }
}

impl PlanStore {
    pub fn new(data_dir: path::PathBuf) -> PlanStore {
        return PlanStore { data_dir };
    }

    fn file_path(&self) -> path::PathBuf {
        return self.data_dir.join(PLANS_FILE);
    }

    pub fn list(&self) -> Result<Vec<LessonPlan>> {
        let file_path = self.file_path();
        if !file_path.exists() {
            return Ok(vec![]);
        }

        let payload = fs::read_to_string(file_path)?;
        let plans: Vec<LessonPlan> = serde_json::from_str(&payload)?;

        return Ok(plans);
    }

    pub fn append(&self, plan: &LessonPlan) -> Result<()> {
        ensure_dir(&self.data_dir)?;

        let mut plans = self.list()?;
        plans.push(plan.clone());

        let payload = serde_json::to_string(&plans)?;
        fs::write(self.file_path(), payload)?;

        return Ok(());
    }
}
