use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lambda_runtime::{service_fn, LambdaEvent};
use log::{error, info};

use crate::config::{Settings, SettingsArgs};
use crate::event::PipelineEvent;
use crate::handler::{Handler, Outcome};
use crate::providers::{CodePipelineClient, DeliveryService, SecretStore, SsmSecretStore};

type AwsHandler = Handler<CodePipelineClient, SsmSecretStore>;

#[derive(Parser)]
#[command(name = "codepipeline-status-reporter")]
#[command(
    author,
    version,
    about = "Reports CodePipeline stage transitions as GitHub commit statuses",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    settings: SettingsArgs,

    #[arg(short, long, global = true, default_value_t = false)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve CodePipeline events from the Lambda runtime API (default)
    Lambda,

    /// Process one saved EventBridge event locally and print the outcome
    Replay {
        /// Path to the event JSON, or "-" for stdin
        #[arg(short, long)]
        event: PathBuf,
    },
}

impl Cli {
    async fn build_handler(&self) -> Result<AwsHandler> {
        let settings =
            Settings::from_args(self.settings.clone()).context("Failed to load configuration")?;

        let aws = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

        Ok(Handler::new(
            settings,
            CodePipelineClient::new(&aws),
            SsmSecretStore::new(&aws),
        )?)
    }

    async fn execute_lambda(&self) -> Result<()> {
        let handler = self.build_handler().await?;
        let handler = &handler;

        info!(
            "Starting Lambda event loop ({:?} authentication)",
            handler.settings().auth_mode
        );

        lambda_runtime::run(service_fn(move |event| handle_invocation(handler, event)))
            .await
            .map_err(|e| anyhow::anyhow!("Lambda runtime failed: {e}"))
    }

    async fn execute_replay(&self, event_path: &Path) -> Result<()> {
        let event = read_event(event_path)?;
        let handler = self.build_handler().await?;

        let outcome = handler.handle(&event).await?;

        let json_output = if self.pretty {
            serde_json::to_string_pretty(&outcome)?
        } else {
            serde_json::to_string(&outcome)?
        };
        println!("{}", json_output);

        Ok(())
    }

    pub async fn execute(&self) -> Result<()> {
        match &self.command {
            None | Some(Commands::Lambda) => self.execute_lambda().await,
            Some(Commands::Replay { event }) => self.execute_replay(event).await,
        }
    }
}

/// Runs one Lambda invocation.
///
/// A handler error fails the invocation so the runtime records it; a skipped
/// event completes normally.
async fn handle_invocation<D: DeliveryService, S: SecretStore>(
    handler: &Handler<D, S>,
    event: LambdaEvent<PipelineEvent>,
) -> Result<Outcome, lambda_runtime::Error> {
    let request_id = &event.context.request_id;
    let outcome = handler.handle(&event.payload).await.inspect_err(|e| {
        error!("Invocation {request_id} failed with {} error: {e}", e.kind())
    })?;
    Ok(outcome)
}

fn read_event(path: &Path) -> Result<PipelineEvent> {
    let contents = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read event from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read event file: {}", path.display()))?
    };

    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse CodePipeline event: {}", path.display()))
}
