use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use netguessr_types::{
    CreatePartyRequest, CreatedParty, GuessResult, GuessSubmission, ImageErrorReport,
    JoinPartyQuery, PartyInfo, Subject,
};

use crate::api::{ApiError, GameApi};

/// [`GameApi`] over HTTP.
///
/// The server keys the current subject, the score and party membership on
/// its session cookie, so the underlying client keeps cookies for its whole
/// lifetime.
#[derive(Clone)]
pub struct HttpGameApi {
    base_url: Url,
    client: Client,
}

impl HttpGameApi {
    pub fn new(base_url: Url) -> Result<Self, ApiError> {
        let client = Client::builder().cookie_store(true).build()?;
        Ok(Self { base_url, client })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", path, e)))
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        response.json::<T>().await.map_err(|e| {
            tracing::warn!("Failed to decode response body: {:?}", e);
            ApiError::Decode(e.to_string())
        })
    }

    /// Only a plain 200 counts as acceptance on the party endpoints.
    fn require_ok(response: &reqwest::Response) -> Result<(), ApiError> {
        if response.status() == StatusCode::OK {
            Ok(())
        } else {
            Err(ApiError::Status(response.status().as_u16()))
        }
    }
}

#[async_trait]
impl GameApi for HttpGameApi {
    async fn random_subject(&self) -> Result<Subject, ApiError> {
        let url = self.endpoint("/celeb/random")?;
        tracing::debug!("Fetching random subject from {}", url);

        let response = self
            .client
            .get(url)
            .query(&[("format", "json")])
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!("Random subject request returned status: {}", response.status());
            return Err(ApiError::Status(response.status().as_u16()));
        }

        Self::decode(response).await
    }

    async fn lookup_subject(&self, name: &str) -> Result<Option<Subject>, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .clear()
            .extend(["celeb", name]);
        tracing::debug!("Looking up subject at {}", url);

        let response = self.client.get(url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Self::decode(response).await.map(Some),
            status => Err(ApiError::Status(status.as_u16())),
        }
    }

    async fn submit_guess(&self, submission: &GuessSubmission) -> Result<GuessResult, ApiError> {
        let url = self.endpoint("/game/submit")?;
        tracing::debug!("Submitting guess {:?}", submission.guess);

        let response = self.client.post(url).json(submission).send().await?;

        if !response.status().is_success() {
            tracing::debug!("Guess submission returned status: {}", response.status());
        }

        Self::decode(response).await
    }

    async fn restart(&self) -> Result<(), ApiError> {
        let url = self.endpoint("/game/restart")?;
        self.client.get(url).send().await?;
        Ok(())
    }

    async fn report_image_error(&self, report: &ImageErrorReport) -> Result<(), ApiError> {
        let url = self.endpoint("/manage/imageError")?;
        self.client.post(url).json(report).send().await?;
        Ok(())
    }

    async fn image_available(&self, image_url: &str) -> Result<bool, ApiError> {
        if image_url.is_empty() {
            return Ok(false);
        }

        // Relative paths are served by the game server itself
        let url = self.endpoint(image_url)?;
        let response = self.client.get(url).send().await?;
        Ok(response.status().is_success())
    }

    async fn join_party(&self, query: &JoinPartyQuery) -> Result<(), ApiError> {
        let url = self.endpoint("/game/party/join")?;
        tracing::debug!(
            "Joining party {} as {} (passcode supplied: {})",
            query.code,
            query.username,
            query.passcode.is_some()
        );

        let response = self.client.get(url).query(query).send().await?;
        Self::require_ok(&response)
    }

    async fn leave_party(&self) -> Result<(), ApiError> {
        let url = self.endpoint("/game/party/leave")?;
        let response = self.client.get(url).send().await?;
        Self::require_ok(&response)
    }

    async fn create_party(&self, request: &CreatePartyRequest) -> Result<CreatedParty, ApiError> {
        let url = self.endpoint("/game/party/create")?;
        tracing::debug!(
            "Creating party for {} (private: {})",
            request.username,
            request.passcode.is_some()
        );

        let response = self.client.post(url).json(request).send().await?;
        Self::require_ok(&response)?;
        Self::decode(response).await
    }

    async fn party_info(&self) -> Result<Option<PartyInfo>, ApiError> {
        let url = self.endpoint("/game/party/info")?;
        let response = self.client.get(url).send().await?;

        if response.status() != StatusCode::OK {
            tracing::debug!("Party info returned status: {}", response.status());
            return Ok(None);
        }

        Self::decode(response).await.map(Some)
    }
}
