//! End-to-end plugin run: validate, decorate, resolve, assemble, execute.

use crate::config::SubmitConfig;
use crate::error::{Error, Result};
use crate::subprocess::{ExitStatus, SubprocessManager};
use crate::template::CommandAssembler;

pub const APP_NAME: &str = "Spark Submit Plugin";

/// What a run ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The command was assembled but not executed
    DryRun { command: String },
    /// spark-submit ran and exited successfully
    Submitted { command: String },
}

impl Outcome {
    pub fn command(&self) -> &str {
        match self {
            Outcome::DryRun { command } | Outcome::Submitted { command } => command,
        }
    }
}

pub struct Plugin {
    config: SubmitConfig,
    assembler: CommandAssembler,
    subprocess: SubprocessManager,
    dry_run: bool,
}

impl Plugin {
    pub fn new(
        config: SubmitConfig,
        assembler: CommandAssembler,
        subprocess: SubprocessManager,
    ) -> Self {
        Self {
            config,
            assembler,
            subprocess,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn config(&self) -> &SubmitConfig {
        &self.config
    }

    /// Executes the plugin logic.
    pub async fn exec(&mut self) -> Result<Outcome> {
        tracing::info!("executing [ {} ]", APP_NAME);

        if let Err(err) = self.config.validate() {
            if let Error::Validation(errors) = &err {
                for field_error in errors {
                    tracing::error!("field validation error {}", field_error);
                }
            }
            return Err(err);
        }

        self.config.decorate().inspect_err(|e| {
            tracing::error!("error while decorating plugin configuration: {}", e)
        })?;

        self.config.process_templates().inspect_err(|e| {
            tracing::error!("error while replacing configuration placeholders: {}", e)
        })?;

        let command = self.assembler.assemble(&self.config).inspect_err(|e| {
            tracing::error!("error while assembling spark submit command: {}", e)
        })?;

        tracing::debug!("Spark Command: {}", command);

        if self.dry_run {
            tracing::info!("dry run, not executing the spark submit command");
            return Ok(Outcome::DryRun { command });
        }

        let output = self.subprocess.run_shell(&command).await?;
        tracing::info!("Exit code: {:?}", output.status.code());
        tracing::debug!("Stdout: {}", output.stdout);
        tracing::debug!("Stderr: {}", output.stderr);

        match output.status {
            ExitStatus::Success => Ok(Outcome::Submitted { command }),
            ExitStatus::Error(code) => {
                tracing::error!("spark submit returned with the code: [ {} ]", code);
                Err(Error::SubmitFailed { code })
            }
            ExitStatus::Signal(signal) => {
                tracing::error!("spark submit terminated by signal: [ {} ]", signal);
                Err(Error::SubmitFailed { code: 128 + signal })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::decorator::{LOCAL_DEPLOY_VAR, MASTER_OPTION};
    use crate::subprocess::MockProcessRunner;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn plugin(config: SubmitConfig) -> (Plugin, MockProcessRunner) {
        let (subprocess, mock) = SubprocessManager::mock();
        let plugin = Plugin::new(config, CommandAssembler::new().unwrap(), subprocess);
        (plugin, mock)
    }

    fn sample_config() -> SubmitConfig {
        SubmitConfig::from_raw(
            r#"{"name": "{{ .JOB_NAME }}", "class": "org.example.Main"}"#,
            r#"{"spark.kubernetes.namespace": "{{ .NAMESPACE }}"}"#,
            "local:///opt/app.jar,{{ .RUN_DATE }}",
            env(&[
                ("JOB_NAME", "etl"),
                ("NAMESPACE", "jobs"),
                ("RUN_DATE", "2024-01-01"),
                ("KUBERNETES_PORT_443_TCP_ADDR", "10.0.0.1"),
                ("KUBERNETES_SERVICE_PORT_HTTPS", "443"),
            ]),
        )
        .unwrap()
    }

    const SAMPLE_COMMAND: &str = "/opt/spark/bin/spark-submit --verbose --deploy-mode cluster --class org.example.Main --master k8s://https://10.0.0.1:443 --name etl --conf spark.kubernetes.namespace=jobs local:///opt/app.jar 2024-01-01";

    #[tokio::test]
    async fn test_exec_runs_assembled_command() {
        let (mut plugin, mock) = plugin(sample_config());
        mock.expect_command("/bin/bash")
            .returns_stdout("submitted")
            .finish();

        let outcome = plugin.exec().await.unwrap();

        assert_eq!(
            outcome,
            Outcome::Submitted {
                command: SAMPLE_COMMAND.to_string()
            }
        );
        let calls = mock.get_call_history();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].args, vec!["-c", SAMPLE_COMMAND]);
    }

    #[tokio::test]
    async fn test_exec_dry_run_does_not_execute() {
        let (plugin, mock) = plugin(sample_config());
        let mut plugin = plugin.dry_run(true);

        let outcome = plugin.exec().await.unwrap();

        assert_eq!(outcome.command(), SAMPLE_COMMAND);
        assert!(matches!(outcome, Outcome::DryRun { .. }));
        assert!(mock.get_call_history().is_empty());
    }

    #[tokio::test]
    async fn test_exec_reports_non_zero_exit() {
        let (mut plugin, mock) = plugin(sample_config());
        mock.expect_command("/bin/bash")
            .returns_exit_code(3)
            .returns_stderr("Exception in thread main")
            .finish();

        let err = plugin.exec().await.unwrap_err();

        assert!(matches!(err, Error::SubmitFailed { code: 3 }));
    }

    #[tokio::test]
    async fn test_exec_stops_on_validation_error() {
        let config = SubmitConfig {
            submit_options: [("".to_string(), "x".to_string())].into(),
            ..Default::default()
        };
        let (mut plugin, mock) = plugin(config);

        let err = plugin.exec().await.unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert!(mock.get_call_history().is_empty());
        assert!(!plugin.config().submit_options.contains_key(MASTER_OPTION));
    }

    #[tokio::test]
    async fn test_exec_stops_on_decoration_error() {
        let config = SubmitConfig {
            env: env(&[(LOCAL_DEPLOY_VAR, "maybe")]),
            ..Default::default()
        };
        let (mut plugin, mock) = plugin(config);

        let err = plugin.exec().await.unwrap_err();

        assert!(matches!(err, Error::ConfigDecoration { .. }));
        assert!(mock.get_call_history().is_empty());
    }

    #[tokio::test]
    async fn test_exec_stops_on_undefined_placeholder() {
        let config = SubmitConfig {
            app_args: vec!["{{ .NOT_SET }}".to_string()],
            ..Default::default()
        };
        let (mut plugin, mock) = plugin(config);

        let err = plugin.exec().await.unwrap_err();

        assert!(matches!(err, Error::TemplateResolution { .. }));
        assert!(mock.get_call_history().is_empty());
    }

    #[tokio::test]
    async fn test_exec_in_cluster_deploy() {
        let config = SubmitConfig {
            env: env(&[
                (LOCAL_DEPLOY_VAR, "false"),
                (
                    "PLUGIN_SPARK_KUBERNETES_AUTHENTICATE_SUBMISSION_CACERTFILE",
                    "/var/run/ca.crt",
                ),
            ]),
            ..Default::default()
        };
        let (plugin, _mock) = plugin(config);
        let mut plugin = plugin.dry_run(true);

        let outcome = plugin.exec().await.unwrap();

        assert_eq!(
            outcome.command(),
            "/opt/spark/bin/spark-submit --verbose --deploy-mode cluster \
             --conf spark.kubernetes.authenticate.submission.caCertFile=/var/run/ca.crt \
             --conf spark.kubernetes.authenticate.submission.clientCertFile= \
             --conf spark.kubernetes.authenticate.submission.clientKeyFile="
        );
    }
}
