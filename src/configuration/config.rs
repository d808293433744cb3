#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::IntoEnumIterator;
use tokio::fs;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Eq, PartialEq, EnumIter, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    AuthDelayMs,
    ConfigFile,
    DataDir,
    EmailDelayMs,
    GenerateDelayMs,
    PaymentDelayMs,
    PaymentSuccessRate,
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        let data_dir = dirs::data_dir().unwrap().join("lessoncraft");
        let config_path = dirs::config_dir().unwrap().join("lessoncraft/config.toml");

        let res = match key {
            ConfigKey::AuthDelayMs => "1000",
            ConfigKey::EmailDelayMs => "1500",
            ConfigKey::GenerateDelayMs => "2000",
            ConfigKey::PaymentDelayMs => "3000",
            ConfigKey::PaymentSuccessRate => "0.9",
            ConfigKey::DataDir => data_dir.to_str().unwrap(),

            // Special
            ConfigKey::ConfigFile => config_path.to_str().unwrap(),
        };

        return res.to_string();
    }

    pub async fn load(clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Some(arg_config_file) =
                matches.get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            let doc_res = toml_str.parse::<toml_edit::Document>();
            if doc_res.is_err() {
                bail!(format!(
                    "config.toml could not be parsed: {}",
                    doc_res.unwrap_err()
                ));
            }

            let doc = doc_res.unwrap();
            for key in ConfigKey::iter() {
                if let Some(val) = doc.get(&key.to_string()) {
                    if let Some(val_int) = val.as_integer() {
                        Config::set(key, &val_int.to_string());
                    } else if let Some(val_float) = val.as_float() {
                        Config::set(key, &val_float.to_string());
                    } else if let Some(val_str) = val.as_str() {
                        if val_str.is_empty() {
                            continue;
                        }
                        Config::set(key, val_str);
                    }
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        tracing::debug!(
            data_dir = Config::get(ConfigKey::DataDir),
            auth_delay_ms = Config::get(ConfigKey::AuthDelayMs),
            generate_delay_ms = Config::get(ConfigKey::GenerateDelayMs),
            payment_delay_ms = Config::get(ConfigKey::PaymentDelayMs),
            email_delay_ms = Config::get(ConfigKey::EmailDelayMs),
            payment_success_rate = Config::get(ConfigKey::PaymentSuccessRate),
            "config"
        );

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long().unwrap() == key.to_string())
                    .unwrap();

                let description = arg
                    .get_help()
                    .unwrap()
                    .to_string()
                    .split("[default:")
                    .next()
                    .unwrap()
                    .trim()
                    .to_string();

                let mut val = Config::default(key);
                if val.parse::<f64>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return format!("{toml_str}\n");
    }
}
