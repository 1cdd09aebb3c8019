//! # GitHub build webhook
//!
//! Lambda entry point for the GitHub webhook receiver. Wires the runtime
//! configuration, the AWS clients and the webhook handler together, then
//! hands control to the Lambda runtime.

use envconfig::Envconfig;
use lambda_runtime::{run, service_fn, tracing, Error, LambdaEvent};
use std::sync::Arc;

mod config;
mod services;
mod webhook;

use webhook::schemas::IncomingEvent;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let app_config = config::AppConfig::init_from_env()?;
    let projects = config::ProjectMap::from_config(&app_config)?;

    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .load()
        .await;

    let secret_provider: services::ImplSecretProvider =
        Box::new(services::secrets::SecretsManagerProvider {
            client: aws_sdk_secretsmanager::Client::new(&aws_config),
        });
    let build_trigger: services::ImplBuildTrigger =
        Box::new(services::codebuild::CodeBuildTrigger {
            client: aws_sdk_codebuild::Client::new(&aws_config),
        });

    let handler = Arc::new(webhook::handler::WebhookHandler::new(
        app_config.github_secret_id.clone(),
        projects,
        secret_provider,
        build_trigger,
    ));

    run(service_fn(move |event: LambdaEvent<IncomingEvent>| {
        let handler = Arc::clone(&handler);
        async move { handler.handle(event.payload).await.map_err(Error::from) }
    }))
    .await
}
