use std::env::var;
use thiserror::Error;
use votetally::{ElectionConfig, DEFAULT_WEIGHTED_WEIGHT, FIRST_VOTE_ID};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("votetallyd: {0} must be a positive integer, got '{1}'")]
    NotPositive(&'static str, String),
}

pub struct Config {
    pub election: ElectionConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let first_vote_id = match lookup("VOTETALLY_FIRST_VOTE_ID") {
            Some(val) => positive("VOTETALLY_FIRST_VOTE_ID", &val)?,
            None => FIRST_VOTE_ID,
        };

        let weighted_vote_weight = match lookup("VOTETALLY_WEIGHTED_VOTE_WEIGHT") {
            Some(val) => positive("VOTETALLY_WEIGHTED_VOTE_WEIGHT", &val)?,
            None => DEFAULT_WEIGHTED_WEIGHT,
        };

        Ok(Config {
            election: ElectionConfig {
                first_vote_id,
                weighted_vote_weight,
            },
        })
    }
}

fn positive<T>(name: &'static str, val: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + Default + PartialOrd,
{
    match val.trim().parse::<T>() {
        Ok(n) if n > T::default() => Ok(n),
        _ => Err(ConfigError::NotPositive(name, val.to_owned())),
    }
}
