pub mod codebuild;
pub mod secrets;

use async_trait::async_trait;

/// One environment variable passed through to the started build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvOverride {
    pub name: String,
    pub value: String,
}

/// Everything the build service needs to start one build. Artifacts are
/// always disabled for webhook-triggered builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartBuildRequest {
    pub project_name: String,
    pub source_version: String,
    pub environment: Vec<EnvOverride>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SecretProvider: Send + Sync {
    /// Fetches the shared webhook secret by name.
    async fn fetch_secret(&self, secret_id: &str) -> anyhow::Result<String>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BuildTrigger: Send + Sync {
    /// Starts an asynchronous build; returns once the build is queued.
    async fn start_build(&self, request: &StartBuildRequest) -> anyhow::Result<()>;
}

pub type ImplSecretProvider = Box<dyn SecretProvider>;
pub type ImplBuildTrigger = Box<dyn BuildTrigger>;
