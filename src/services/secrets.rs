use anyhow::Context;
use async_trait::async_trait;

/// Secrets Manager-backed provider for the shared webhook secret.
pub struct SecretsManagerProvider {
    pub client: aws_sdk_secretsmanager::Client,
}

#[async_trait]
impl crate::services::SecretProvider for SecretsManagerProvider {
    async fn fetch_secret(&self, secret_id: &str) -> anyhow::Result<String> {
        let output = self
            .client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .with_context(|| format!("failed to fetch secret {secret_id}"))?;

        output
            .secret_string()
            .map(str::to_owned)
            .with_context(|| format!("secret {secret_id} has no string value"))
    }
}
