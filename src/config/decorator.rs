//! Environment-driven defaults for the submit configuration.

use super::SubmitConfig;
use crate::error::{Error, Result};
use std::collections::HashMap;

pub const LOCAL_DEPLOY_VAR: &str = "PLUGIN_SPARK_KUBERNETES_LOCAL_DEPLOY";

pub const KUBERNETES_HOST_VAR: &str = "KUBERNETES_PORT_443_TCP_ADDR";
pub const KUBERNETES_PORT_VAR: &str = "KUBERNETES_SERVICE_PORT_HTTPS";

pub const MASTER_OPTION: &str = "master";

/// Spark config keys injected for in-cluster submission, paired with the
/// environment variable each value is copied from.
pub const SUBMISSION_CERT_CONFIGS: [(&str, &str); 3] = [
    (
        "spark.kubernetes.authenticate.submission.caCertFile",
        "PLUGIN_SPARK_KUBERNETES_AUTHENTICATE_SUBMISSION_CACERTFILE",
    ),
    (
        "spark.kubernetes.authenticate.submission.clientCertFile",
        "PLUGIN_SPARK_KUBERNETES_AUTHENTICATE_SUBMISSION_CLIENTCERTFILE",
    ),
    (
        "spark.kubernetes.authenticate.submission.clientKeyFile",
        "PLUGIN_SPARK_KUBERNETES_AUTHENTICATE_SUBMISSION_CLIENTKEYFILE",
    ),
];

impl SubmitConfig {
    /// Add defaults and calculated values based on the environment snapshot.
    ///
    /// Local deploys get a `master` option pointing at the kubernetes API
    /// server; in-cluster deploys get the submission certificate configs.
    /// Previously injected entries are never removed, so decorate once.
    pub fn decorate(&mut self) -> Result<()> {
        tracing::debug!("decorating spark submit configuration ...");

        if local_deploy(&self.env)? {
            let master = master_url(&self.env);
            tracing::debug!("added --{} option: [ {} ]", MASTER_OPTION, master);
            self.submit_options.insert(MASTER_OPTION.to_string(), master);
        } else {
            for (config_key, env_var) in SUBMISSION_CERT_CONFIGS {
                let value = self.env.get(env_var).cloned().unwrap_or_default();
                self.spark_config.insert(config_key.to_string(), value);
            }
            tracing::debug!("added in cluster spark configs");
        }

        tracing::debug!("decorating spark submit configuration ... done.");
        Ok(())
    }
}

fn local_deploy(env: &HashMap<String, String>) -> Result<bool> {
    match env.get(LOCAL_DEPLOY_VAR) {
        None => {
            tracing::debug!(
                "the env var [ {} ] is not set, defaulting it to true",
                LOCAL_DEPLOY_VAR
            );
            Ok(true)
        }
        Some(value) => parse_bool(value).ok_or_else(|| {
            tracing::error!("invalid value provided for the local deploy config: {}", value);
            Error::ConfigDecoration {
                variable: LOCAL_DEPLOY_VAR.to_string(),
                value: value.clone(),
            }
        }),
    }
}

/// Missing host or port leave an empty slot in the URL rather than failing.
fn master_url(env: &HashMap<String, String>) -> String {
    let host = env.get(KUBERNETES_HOST_VAR).map(String::as_str).unwrap_or("");
    let port = env.get(KUBERNETES_PORT_VAR).map(String::as_str).unwrap_or("");
    format!("k8s://https://{host}:{port}")
}

/// Boolean spellings accepted for flag variables.
fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
