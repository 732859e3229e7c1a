use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use issuance_cli::{CliConfig, StdoutInvitationPresenter, parse_attribute};
use issuance_core::IssuanceCore;
use issuance_core::config::core_config::{self, AppConfig};
use issuance_core::model::credential::CredentialAttribute;
use issuance_core::service::issuance::dto::IssueCredentialRequestDTO;
use shared_types::CredentialDefinitionId;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, value_name = "FILE")]
    config: Option<Vec<PathBuf>>,

    /// Overrides the configured credential definition
    #[arg(long, value_name = "ID")]
    credential_definition_id: Option<String>,

    /// Credential attribute, repeatable. Replaces the configured attribute list.
    #[arg(short, long = "attribute", value_name = "NAME=VALUE", value_parser = parse_attribute)]
    attributes: Vec<CredentialAttribute>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config_files = cli.config.unwrap_or_default();
    config_files.insert(0, "config/config.yml".into());

    let mut app_config: AppConfig<CliConfig> =
        core_config::AppConfig::from_files(&config_files).expect("Failed creating config");

    initialize_tracing(&app_config.app);

    if let Some(credential_definition_id) = cli.credential_definition_id {
        app_config.core.issuance.credential_definition_id =
            CredentialDefinitionId::from(credential_definition_id);
    }
    if !cli.attributes.is_empty() {
        app_config.core.issuance.attributes = cli.attributes;
    }

    let core = match IssuanceCore::new(&app_config.core, Arc::new(StdoutInvitationPresenter)) {
        Ok(core) => core,
        Err(error) => {
            tracing::error!("Invalid configuration: {error}");
            return ExitCode::FAILURE;
        }
    };
    let request = IssueCredentialRequestDTO::from(app_config.core.issuance);

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to build runtime")
        .block_on(async {
            let cancellation_token = CancellationToken::new();
            tokio::spawn(cancel_on_ctrl_c(cancellation_token.clone()));

            match core
                .issuance_service
                .issue_credential(request, &cancellation_token)
                .await
            {
                Ok(issued) => {
                    tracing::info!(
                        connection_id = %issued.invitation.connection_id,
                        connection_polls = issued.connection_polls,
                        credential_polls = issued.credential_polls,
                        "Credential `{}` issued",
                        issued.credential_id
                    );
                    println!("{}", issued.credential_id);
                    ExitCode::SUCCESS
                }
                Err(error) => {
                    let code = error.error_code();
                    tracing::error!(?code, "{}: {error}", code.msg());
                    ExitCode::FAILURE
                }
            }
        })
}

async fn cancel_on_ctrl_c(cancellation_token: CancellationToken) {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::warn!("Interrupted, cancelling issuance");
        cancellation_token.cancel();
    }
}

fn initialize_tracing(config: &CliConfig) {
    // Create a filter based on the log level
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| {
            tracing_subscriber::EnvFilter::try_new(
                config.trace_level.as_deref().unwrap_or("debug"),
            )
        })
        .expect("Failed to create env filter");

    let tracing_layer = tracing_subscriber::registry().with(filter);

    // stdout carries the invitation URL and credential id only
    if config.trace_json.unwrap_or_default() {
        tracing_layer
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_layer
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    };
}
