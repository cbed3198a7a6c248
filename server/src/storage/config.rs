use std::path::PathBuf;

pub const DEFAULT_GITHUB_API: &str = "https://api.github.com";

#[derive(Debug, Clone)]
pub enum StorageConfig {
    Local { data_dir: PathBuf },
    GitHub(GitHubConfig),
}

/// Settings for the GitHub-contents-API backend.
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub token: String,
    /// Directory inside the repository that holds the content files.
    pub content_dir: String,
    /// API base URL; overridden in tests to point at a mock server.
    pub api_base: String,
}

impl StorageConfig {
    pub fn local(data_dir: impl Into<PathBuf>) -> Self {
        Self::Local {
            data_dir: data_dir.into(),
        }
    }

    pub fn github(config: GitHubConfig) -> Self {
        Self::GitHub(config)
    }

    pub fn from_env() -> anyhow::Result<Self> {
        let backend = std::env::var("CONTENT_BACKEND").unwrap_or_else(|_| "local".to_string());

        match backend.as_str() {
            "local" => {
                let data_dir =
                    std::env::var("CONTENT_DATA_DIR").unwrap_or_else(|_| "./data".to_string());
                Ok(Self::local(data_dir))
            }
            "github" => {
                let owner = std::env::var("GITHUB_OWNER")
                    .map_err(|_| anyhow::anyhow!("GITHUB_OWNER is required for GitHub backend"))?;
                let repo = std::env::var("GITHUB_REPO")
                    .map_err(|_| anyhow::anyhow!("GITHUB_REPO is required for GitHub backend"))?;
                // The original deployment used either name for the token
                let token = std::env::var("GITHUB_TOKEN")
                    .or_else(|_| std::env::var("GITHUB_ACCESS_TOKEN"))
                    .map_err(|_| {
                        anyhow::anyhow!(
                            "GITHUB_TOKEN or GITHUB_ACCESS_TOKEN is required for GitHub backend"
                        )
                    })?;
                let branch =
                    std::env::var("GITHUB_BRANCH").unwrap_or_else(|_| "main".to_string());
                let content_dir =
                    std::env::var("GITHUB_CONTENT_DIR").unwrap_or_else(|_| "data".to_string());
                let api_base = std::env::var("GITHUB_API_URL")
                    .unwrap_or_else(|_| DEFAULT_GITHUB_API.to_string());

                Ok(Self::github(GitHubConfig {
                    owner,
                    repo,
                    branch,
                    token,
                    content_dir,
                    api_base,
                }))
            }
            _ => anyhow::bail!(
                "Unknown content backend: {}. Must be 'local' or 'github'",
                backend
            ),
        }
    }
}
