use crate::error::ApiError;
use async_trait::async_trait;
use ecomap_model::{
    Category, FacilityId, FacilityPage, FacilityQuery, StatusComment,
    StatusId, StatusSubmitted, StatusUpdated,
};
use std::fmt::Debug;

pub type ApiResult<T> = Result<T, ApiError>;

/// Remote operations the engine consumes from the facility backend.
///
/// Implementations must be idempotent for reads. Writes surface
/// authorization failures as [`ApiError::Unauthorized`] or
/// [`ApiError::Forbidden`] and a `success: false` payload as
/// [`ApiError::Rejected`].
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait FacilityApi: Send + Sync + Debug {
    /// `GET /api/facilities/paginate`
    async fn fetch_facilities(
        &self,
        query: &FacilityQuery,
    ) -> ApiResult<FacilityPage>;

    /// `GET /api/categories`
    async fn fetch_categories(&self) -> ApiResult<Vec<Category>>;

    /// `GET /api/status/get/{id}`
    async fn fetch_statuses(
        &self,
        facility_id: FacilityId,
    ) -> ApiResult<Vec<StatusComment>>;

    /// `POST /api/status/add`
    async fn submit_status(
        &self,
        facility_id: FacilityId,
        text: &str,
    ) -> ApiResult<StatusSubmitted>;

    /// `POST /api/status/update`
    async fn update_status(
        &self,
        status_id: StatusId,
        text: &str,
    ) -> ApiResult<StatusUpdated>;
}
