//! Remote roster - the roster operations over the HTTP API
//!
//! Success is decided by the HTTP status; the body carries the message.
//! Transport failures are logged and reported with a generic message.

use std::time::Duration;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::Deserialize;
use crate::outcome::Outcome;
use crate::query::RosterStats;
use crate::student::{StudentPatch, StudentRecord};
use crate::{Error, Result};
use super::Roster;

#[derive(Debug, Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: Option<String>,
}

pub struct RemoteRoster {
    client: Client,
    base_url: Url,
}

impl RemoteRoster {
    /// Client for the API rooted at `base_url`, e.g. `http://127.0.0.1:5000`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| Error::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn outcome(response: Response) -> Result<Outcome> {
        let status = response.status();
        let text = response.text().await?;
        let message = serde_json::from_str::<MessageBody>(&text)
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| {
                let text = text.trim();
                if text.is_empty() { status.to_string() } else { text.to_string() }
            });

        Ok(Outcome {
            success: status.is_success(),
            message,
        })
    }

    async fn fetch_students(&self) -> Result<Vec<StudentRecord>> {
        let url = self.url(&["api", "students"])?;
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    async fn fetch_student(&self, roll: &str) -> Result<Option<StudentRecord>> {
        let url = self.url(&["api", "students", roll])?;
        let response = self.client.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = response.error_for_status()?;
        Ok(Some(response.json().await?))
    }

    async fn fetch_stats(&self) -> Result<RosterStats> {
        let url = self.url(&["api", "stats"])?;
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    async fn post_student(&self, student: &StudentRecord) -> Result<Outcome> {
        let url = self.url(&["api", "students"])?;
        let response = self.client.post(url).json(student).send().await?;
        Self::outcome(response).await
    }

    async fn put_student(&self, roll: &str, patch: &StudentPatch) -> Result<Outcome> {
        let url = self.url(&["api", "students", roll])?;
        let response = self.client.put(url).json(patch).send().await?;
        Self::outcome(response).await
    }

    async fn delete_student(&self, roll: &str) -> Result<Outcome> {
        let url = self.url(&["api", "students", roll])?;
        let response = self.client.delete(url).send().await?;
        Self::outcome(response).await
    }
}

#[async_trait]
impl Roster for RemoteRoster {
    async fn load(&self) -> Vec<StudentRecord> {
        self.fetch_students().await.unwrap_or_else(|e| {
            tracing::error!("Error loading students: {}", e);
            Vec::new()
        })
    }

    async fn add(&self, student: StudentRecord) -> Outcome {
        self.post_student(&student).await.unwrap_or_else(|e| {
            tracing::error!("Error adding student: {}", e);
            Outcome::fail("Error adding student!")
        })
    }

    async fn find(&self, roll: &str) -> Option<StudentRecord> {
        self.fetch_student(roll).await.unwrap_or_else(|e| {
            tracing::error!("Error searching student: {}", e);
            None
        })
    }

    async fn update(&self, roll: &str, patch: StudentPatch) -> Outcome {
        self.put_student(roll, &patch).await.unwrap_or_else(|e| {
            tracing::error!("Error updating student: {}", e);
            Outcome::fail("Error updating student!")
        })
    }

    async fn remove(&self, roll: &str) -> Outcome {
        self.delete_student(roll).await.unwrap_or_else(|e| {
            tracing::error!("Error deleting student: {}", e);
            Outcome::fail("Error deleting student!")
        })
    }

    async fn stats(&self) -> RosterStats {
        self.fetch_stats().await.unwrap_or_else(|e| {
            tracing::error!("Error loading stats: {}", e);
            RosterStats::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_http_urls() {
        let timeout = Duration::from_secs(1);
        assert!(matches!(RemoteRoster::new("not a url", timeout), Err(Error::InvalidUrl(_))));
        assert!(matches!(RemoteRoster::new("mailto:x@y.z", timeout), Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_roll_is_one_path_segment() {
        let roster = RemoteRoster::new("http://127.0.0.1:5000/", Duration::from_secs(1)).unwrap();
        let url = roster.url(&["api", "students", "CS/12 A"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/api/students/CS%2F12%20A");
    }

    #[tokio::test]
    async fn test_unreachable_server_reports_generic_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let roster = RemoteRoster::new(&format!("http://{}", addr), Duration::from_secs(2)).unwrap();
        let student = StudentRecord::new("A1", "Meera", "20", "CS", "80");

        assert_eq!(roster.add(student).await, Outcome::fail("Error adding student!"));
        assert_eq!(
            roster.update("A1", StudentPatch::marks("1")).await,
            Outcome::fail("Error updating student!")
        );
        assert_eq!(roster.remove("A1").await, Outcome::fail("Error deleting student!"));
        assert!(roster.load().await.is_empty());
        assert!(roster.find("A1").await.is_none());
        assert_eq!(roster.stats().await, RosterStats::default());
    }
}
