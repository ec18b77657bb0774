//! HTTP implementation of [`FacilityApi`] on top of `reqwest`.

use async_trait::async_trait;
use ecomap_config::ApiConfig;
use ecomap_contracts::prelude::{ApiError, ApiResult, FacilityApi};
use ecomap_model::{
    Category, FacilityId, FacilityPage, FacilityQuery, StatusComment,
    StatusId, StatusSubmitted, StatusUpdated,
};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Facility backend reached over HTTP.
#[derive(Clone)]
pub struct HttpFacilityApi {
    client: Client,
    base_url: String,
}

impl std::fmt::Debug for HttpFacilityApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFacilityApi")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Error payload shapes the backend uses.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl HttpFacilityApi {
    /// `timeout` applies to the whole request; `None` leaves it unbounded.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!(%base_url, ?timeout, "created facility API client");

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::new(config.base(), config.request_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: impl AsRef<str>) -> String {
        format!("{}/{}", self.base_url, path.as_ref().trim_start_matches('/'))
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> ApiResult<T> {
        let response = request
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        if !status.is_success() {
            let error = error_from_response(status, &body);
            warn!(status = status.as_u16(), error = %error, "request failed");
            return Err(error);
        }

        decode(&body)
    }
}

/// Decode a success body; anything that does not match is malformed.
pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    serde_json::from_str(body).map_err(|err| {
        debug!(error = %err, "response body did not decode");
        ApiError::Malformed(err.to_string())
    })
}

/// Prefer the server's own message, fall back to the canonical reason.
pub(crate) fn error_from_response(status: StatusCode, body: &str) -> ApiError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .message
        .or(parsed.error)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });
    ApiError::from_status(status.as_u16(), message)
}

#[async_trait]
impl FacilityApi for HttpFacilityApi {
    async fn fetch_facilities(
        &self,
        query: &FacilityQuery,
    ) -> ApiResult<FacilityPage> {
        let url = self.build_url("api/facilities/paginate");
        debug!(%url, page = query.page, "fetching facilities");
        self.execute(self.client.get(url).query(&query.to_query_pairs()))
            .await
    }

    async fn fetch_categories(&self) -> ApiResult<Vec<Category>> {
        let url = self.build_url("api/categories");
        self.execute(self.client.get(url)).await
    }

    async fn fetch_statuses(
        &self,
        facility_id: FacilityId,
    ) -> ApiResult<Vec<StatusComment>> {
        let url = self.build_url(format!("api/status/get/{facility_id}"));
        self.execute(self.client.get(url)).await
    }

    async fn submit_status(
        &self,
        facility_id: FacilityId,
        text: &str,
    ) -> ApiResult<StatusSubmitted> {
        let url = self.build_url("api/status/add");
        let form = [("facilityId", facility_id.to_string()), ("comment", text.to_string())];
        let submitted: StatusSubmitted =
            self.execute(self.client.post(url).form(&form)).await?;
        if !submitted.success {
            return Err(ApiError::Rejected(
                submitted.message.unwrap_or_default(),
            ));
        }
        Ok(submitted)
    }

    async fn update_status(
        &self,
        status_id: StatusId,
        text: &str,
    ) -> ApiResult<StatusUpdated> {
        let url = self.build_url("api/status/update");
        let form = [("statusId", status_id.to_string()), ("comment", text.to_string())];
        let updated: StatusUpdated =
            self.execute(self.client.post(url).form(&form)).await?;
        if !updated.success {
            return Err(ApiError::Rejected(updated.message.unwrap_or_default()));
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_joined_without_double_slashes() {
        let api = HttpFacilityApi::new("http://localhost:8000/", None).unwrap();
        assert_eq!(
            api.build_url("/api/categories"),
            "http://localhost:8000/api/categories"
        );
    }

    #[test]
    fn server_message_wins_over_reason() {
        let err = error_from_response(
            StatusCode::UNAUTHORIZED,
            r#"{"success":false,"message":"You must be logged in to add a status"}"#,
        );
        assert_eq!(
            err,
            ApiError::Unauthorized("You must be logged in to add a status".into())
        );
    }

    #[test]
    fn error_key_is_accepted() {
        let err = error_from_response(
            StatusCode::NOT_FOUND,
            r#"{"error":"Facility not found"}"#,
        );
        assert_eq!(err, ApiError::NotFound("Facility not found".into()));
    }

    #[test]
    fn non_json_error_falls_back_to_reason() {
        let err = error_from_response(StatusCode::BAD_GATEWAY, "<html>");
        assert_eq!(
            err,
            ApiError::Status {
                status: 502,
                message: "Bad Gateway".into()
            }
        );
    }

    #[test]
    fn page_without_facilities_is_malformed() {
        let result: ApiResult<FacilityPage> = decode(r#"{"total":3}"#);
        assert!(result.unwrap_err().is_malformed());
    }

    #[test]
    fn page_with_string_numbers_decodes() {
        let page: FacilityPage = decode(
            r#"{"facilities":[],"total":"0","pages":0,"page":1,"limit":5}"#,
        )
        .unwrap();
        assert_eq!(page.total, 0);
        assert!(page.facilities.is_empty());
    }
}
