//! # Webhook handler
//!
//! The linear flow of one delivery: verify the signature, decode the
//! payload, classify the event and route buildable branches to the build
//! trigger. Each invocation is independent and stateless; the only outputs
//! are the response and, for buildable branches, one start-build call.

use anyhow::Context;
use base64::{prelude::BASE64_STANDARD, Engine};
use lambda_runtime::tracing;
use percent_encoding::percent_decode_str;

use super::{
    schemas::{EventPayload, GithubEvent, IncomingEvent, WebhookResponse},
    security,
};
use crate::{
    config::ProjectMap,
    services::{EnvOverride, ImplBuildTrigger, ImplSecretProvider, StartBuildRequest},
};

/// Separator between a branch name and its trailing issue number.
const ISSUE_MARKER: char = '#';

/// Processes one webhook delivery end to end.
///
/// Collaborators are injected so tests can substitute fakes; the handler
/// itself holds no mutable state.
pub struct WebhookHandler {
    secret_id: String,
    projects: ProjectMap,
    secrets: ImplSecretProvider,
    trigger: ImplBuildTrigger,
}

impl WebhookHandler {
    pub fn new(
        secret_id: String,
        projects: ProjectMap,
        secrets: ImplSecretProvider,
        trigger: ImplBuildTrigger,
    ) -> Self {
        Self {
            secret_id,
            projects,
            secrets,
            trigger,
        }
    }

    /// Produces the response for one incoming event.
    ///
    /// Protocol outcomes (mismatched signature, unknown event, branch with
    /// nothing to build, rejected trigger) are responses, not errors; only
    /// infrastructure failures such as an unavailable secret store abort
    /// the invocation with `Err`.
    #[tracing::instrument(skip_all)]
    pub async fn handle(&self, event: IncomingEvent) -> anyhow::Result<WebhookResponse> {
        let Some(signature) = event.header("x-hub-signature") else {
            return Ok(WebhookResponse::new(400, "missing x-hub-signature header"));
        };
        let Some(github_event) = event.header("x-github-event") else {
            return Ok(WebhookResponse::new(400, "missing x-github-event header"));
        };

        tracing::info!(github_event, "received webhook delivery");

        let body = match BASE64_STANDARD.decode(event.body.as_bytes()) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(error = %err, "request body is not valid base64");
                return Ok(WebhookResponse::new(
                    400,
                    format!("invalid base64 body: {err}"),
                ));
            }
        };

        let secret = self
            .secrets
            .fetch_secret(&self.secret_id)
            .await
            .context("failed to fetch webhook secret")?;

        if !security::verify_signature(signature, &body, &secret) {
            return Ok(WebhookResponse::new(403, "x-hub-signature mismatch"));
        }

        let payload = match decode_payload(&body) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(error = %err, "failed to decode webhook payload");
                return Ok(WebhookResponse::new(400, format!("invalid payload: {err:#}")));
            }
        };

        match GithubEvent::from_header(github_event) {
            Some(GithubEvent::Ping) => Ok(WebhookResponse::new(200, "OK")),
            Some(event @ (GithubEvent::Push | GithubEvent::Delete)) => {
                self.route_branch(event, &payload).await
            }
            None => Ok(WebhookResponse::new(
                500,
                format!("Unknown github_event: {github_event}"),
            )),
        }
    }

    /// Routes a push/delete payload by branch name. Branches without an
    /// issue-number suffix are acknowledged and ignored.
    async fn route_branch(
        &self,
        event: GithubEvent,
        payload: &EventPayload,
    ) -> anyhow::Result<WebhookResponse> {
        let Some(git_ref) = payload.git_ref.as_deref() else {
            return Ok(WebhookResponse::new(400, "payload has no ref field"));
        };

        let branch = git_ref.strip_prefix("refs/heads/").unwrap_or(git_ref);

        let Some((_, issue_number)) = branch.rsplit_once(ISSUE_MARKER) else {
            return Ok(WebhookResponse::new(
                200,
                format!("Not buildable branch: {branch}"),
            ));
        };

        // ProjectMap is total for push/delete; ping never reaches routing.
        let project = self
            .projects
            .project_for(event)
            .context("no project configured for event")?;

        let request = StartBuildRequest {
            project_name: project.to_owned(),
            source_version: branch.to_owned(),
            environment: vec![EnvOverride {
                name: "ISSUE_NUMBER".to_owned(),
                value: issue_number.to_owned(),
            }],
        };

        tracing::info!(project, branch, issue_number, "starting build");

        match self.trigger.start_build(&request).await {
            Ok(()) => Ok(WebhookResponse::new(
                200,
                format!("Starting build for branch: {branch}"),
            )),
            Err(err) => Ok(WebhookResponse::new(
                500,
                format!("Build failed for branch {branch}. Err: {err:#}"),
            )),
        }
    }
}

/// Decodes the verified body into the payload structure.
///
/// GitHub deliveries configured as form-encoded arrive percent-encoded with
/// a `payload=` prefix; JSON-mode deliveries arrive as plain JSON. Both are
/// accepted.
fn decode_payload(body: &[u8]) -> anyhow::Result<EventPayload> {
    let body = std::str::from_utf8(body).context("body is not valid UTF-8")?;

    let unquoted = percent_decode_str(body)
        .decode_utf8()
        .context("percent-decoded body is not valid UTF-8")?;

    let json = unquoted.strip_prefix("payload=").unwrap_or(&unquoted);

    serde_json::from_str(json).context("body is not valid JSON")
}
