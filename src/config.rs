//! Runtime configuration for the webhook Lambda.
//!
//! All configuration comes from environment variables, loaded once at
//! startup and passed into the handler explicitly. The event-type to
//! CodeBuild-project mapping is validated here so a misconfigured
//! deployment fails at boot instead of on the first delivery.

use anyhow::bail;
use envconfig::Envconfig;

use crate::webhook::schemas::GithubEvent;

#[derive(Envconfig, Clone)]
pub struct AppConfig {
    /// CodeBuild project started for `push` events
    pub build_project: String,

    /// CodeBuild project started for `delete` events
    pub delete_project: String,

    /// Secrets Manager name holding the shared GitHub webhook secret
    #[envconfig(default = "/GithubSecret")]
    pub github_secret_id: String,
}

/// Explicit mapping from buildable event types to CodeBuild projects.
#[derive(Debug, Clone)]
pub struct ProjectMap {
    push: String,
    delete: String,
}

impl ProjectMap {
    pub fn from_config(app_config: &AppConfig) -> anyhow::Result<Self> {
        Self::new(
            app_config.build_project.clone(),
            app_config.delete_project.clone(),
        )
    }

    pub fn new(push: String, delete: String) -> anyhow::Result<Self> {
        if push.trim().is_empty() {
            bail!("BUILD_PROJECT must not be empty");
        }
        if delete.trim().is_empty() {
            bail!("DELETE_PROJECT must not be empty");
        }

        Ok(Self { push, delete })
    }

    /// Project to start for the given event. `ping` never reaches branch
    /// routing, so it has no project.
    pub fn project_for(&self, event: GithubEvent) -> Option<&str> {
        match event {
            GithubEvent::Push => Some(&self.push),
            GithubEvent::Delete => Some(&self.delete),
            GithubEvent::Ping => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_map_routes_push_and_delete_to_distinct_projects() {
        let projects = ProjectMap::new("push-project".into(), "delete-project".into()).unwrap();

        assert_eq!(projects.project_for(GithubEvent::Push), Some("push-project"));
        assert_eq!(
            projects.project_for(GithubEvent::Delete),
            Some("delete-project")
        );
        assert_eq!(projects.project_for(GithubEvent::Ping), None);
    }

    #[test]
    fn test_project_map_rejects_empty_project_names() {
        assert!(ProjectMap::new("".into(), "delete-project".into()).is_err());
        assert!(ProjectMap::new("push-project".into(), "  ".into()).is_err());
    }
}
