use async_trait::async_trait;
use aws_sdk_codebuild::types::{
    ArtifactsType, EnvironmentVariable, EnvironmentVariableType, ProjectArtifacts,
};

use super::StartBuildRequest;

/// CodeBuild-backed build trigger.
pub struct CodeBuildTrigger {
    pub client: aws_sdk_codebuild::Client,
}

#[async_trait]
impl crate::services::BuildTrigger for CodeBuildTrigger {
    async fn start_build(&self, request: &StartBuildRequest) -> anyhow::Result<()> {
        let mut call = self
            .client
            .start_build()
            .project_name(&request.project_name)
            .source_version(&request.source_version)
            .artifacts_override(
                ProjectArtifacts::builder()
                    .r#type(ArtifactsType::NoArtifacts)
                    .build()?,
            );

        for var in &request.environment {
            call = call.environment_variables_override(
                EnvironmentVariable::builder()
                    .name(&var.name)
                    .value(&var.value)
                    .r#type(EnvironmentVariableType::Plaintext)
                    .build()?,
            );
        }

        call.send().await?;

        Ok(())
    }
}
