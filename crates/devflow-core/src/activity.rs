//! GitHub activity summary -- read-only external collaborator.
//!
//! Fetches the profile and repository list for a username and reduces
//! them to the aggregate counts the dashboard widget shows. The client
//! never mutates the store, and every failure mode (network, HTTP
//! status, malformed body, missing username) collapses into the single
//! `Unavailable` state; the caller retries no sooner than the poll
//! interval.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ActivityError;

const USER_AGENT: &str = "devflow";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// How often the dashboard refreshes the widget.
pub const POLL_INTERVAL: Duration = Duration::from_secs(300);

/// Public GitHub REST API.
pub const API_BASE_URL: &str = "https://api.github.com";

/// Aggregate activity counts for the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityStats {
    pub public_repos: u64,
    pub followers: u64,
    pub following: u64,
    pub total_stars: u64,
    pub total_forks: u64,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    public_repos: u64,
    followers: u64,
    following: u64,
}

#[derive(Debug, Deserialize)]
struct RepoResponse {
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    forks_count: u64,
}

/// Read-only GitHub client.
pub struct ActivityClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for ActivityClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityClient {
    pub fn new() -> Self {
        Self::with_base_url(API_BASE_URL)
    }

    /// Point the client at a different API root (tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch and aggregate activity for `username`.
    ///
    /// # Errors
    /// Returns [`ActivityError::Unavailable`] for every failure mode.
    pub async fn fetch_stats(&self, username: &str) -> Result<ActivityStats, ActivityError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ActivityError::Unavailable(
                "no username configured".to_string(),
            ));
        }

        let user: UserResponse = self
            .get_json(&format!("{}/users/{username}", self.base_url))
            .await?;
        let repos: Vec<RepoResponse> = self
            .get_json(&format!(
                "{}/users/{username}/repos?per_page=100",
                self.base_url
            ))
            .await?;

        let total_stars = repos.iter().map(|r| r.stargazers_count).sum();
        let total_forks = repos.iter().map(|r| r.forks_count).sum();

        Ok(ActivityStats {
            public_repos: user.public_repos,
            followers: user.followers,
            following: user.following,
            total_stars,
            total_forks,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, ActivityError> {
        let request = self
            .http
            .get(url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/vnd.github.v3+json")
            .send();
        let response = tokio::time::timeout(REQUEST_TIMEOUT, request)
            .await
            .map_err(|_| ActivityError::Unavailable("request timed out".to_string()))?
            .map_err(|err| ActivityError::Unavailable(err.to_string()))?;

        if !response.status().is_success() {
            return Err(ActivityError::Unavailable(format!(
                "HTTP {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|err| ActivityError::Unavailable(err.to_string()))
    }
}
