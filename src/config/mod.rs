//! The submit configuration and how it is loaded.
//!
//! A [`SubmitConfig`] is built once per run from the plugin inputs, then
//! decorated with environment-derived defaults ([`SubmitConfig::decorate`]) and
//! has its placeholders resolved ([`SubmitConfig::process_templates`]) before
//! the command line is assembled.

pub mod decorator;
pub mod processor;


use crate::error::{Error, FieldError, Result};
use std::collections::{BTreeMap, HashMap};

/// Configuration required to set up the spark submit command.
///
/// Maps are ordered so the rendered command is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitConfig {
    /// Arguments passed to spark-submit as `--<option> <value>`
    pub submit_options: BTreeMap<String, String>,

    /// Spark configuration passed as `--conf <key>=<value>`
    pub spark_config: BTreeMap<String, String>,

    /// Application arguments, in order
    pub app_args: Vec<String>,

    /// Snapshot of the plugin environment; read-only for the pipeline
    pub env: HashMap<String, String>,
}

impl SubmitConfig {
    /// Build a configuration from the raw plugin inputs.
    ///
    /// `options` and `configs` hold JSON objects of string values, `app_args`
    /// is a comma separated list. Empty inputs mean "not provided".
    pub fn from_raw(
        options: &str,
        configs: &str,
        app_args: &str,
        env: HashMap<String, String>,
    ) -> Result<Self> {
        Ok(Self {
            submit_options: parse_json_map("submit_options", options)?,
            spark_config: parse_json_map("spark_config", configs)?,
            app_args: split_app_args(app_args),
            env,
        })
    }

    /// Check field-level constraints, collecting every failure.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        for (field, map) in [
            ("submit_options", &self.submit_options),
            ("spark_config", &self.spark_config),
        ] {
            if map.keys().any(|key| key.trim().is_empty()) {
                errors.push(FieldError::new(field, "keys must not be empty"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(errors))
        }
    }
}

/// Decode a JSON object of string values. An empty input yields an empty map.
pub fn parse_json_map(field: &str, raw: &str) -> Result<BTreeMap<String, String>> {
    if raw.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    let values: BTreeMap<String, String> =
        serde_json::from_str(raw).map_err(|source| Error::InvalidInput {
            field: field.to_string(),
            source,
        })?;

    tracing::debug!("{} values: {:?}", field, values);
    Ok(values)
}

fn split_app_args(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',').map(str::to_string).collect()
}

/// All process environment variables with UTF-8 names and values.
pub fn env_snapshot() -> HashMap<String, String> {
    let env: HashMap<String, String> = std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect();

    tracing::trace!("plugin env map: {:?}", env);
    env
}
