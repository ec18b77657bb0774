use async_trait::async_trait;
use ecomap_contracts::prelude::{
    ApiError, ApiResult, FacilityApi, LocationSensor, SensorError,
    SensorOptions,
};
use ecomap_model::{
    Category, FacilityId, FacilityPage, FacilityQuery, Point, StatusComment,
    StatusId, StatusSubmitted, StatusUpdated,
};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// One call observed by [`ScriptedApi`].
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    FetchFacilities(FacilityQuery),
    FetchCategories,
    FetchStatuses(FacilityId),
    SubmitStatus { facility_id: FacilityId, text: String },
    UpdateStatus { status_id: StatusId, text: String },
}

#[derive(Debug)]
struct ApiState {
    pages: VecDeque<(ApiResult<FacilityPage>, Duration)>,
    categories: ApiResult<Vec<Category>>,
    statuses: HashMap<FacilityId, Vec<StatusComment>>,
    status_failure: Option<ApiError>,
    submits: VecDeque<ApiResult<StatusSubmitted>>,
    updates: VecDeque<ApiResult<StatusUpdated>>,
    calls: Vec<(Instant, ApiCall)>,
}

impl Default for ApiState {
    fn default() -> Self {
        Self {
            pages: VecDeque::new(),
            categories: Ok(Vec::new()),
            statuses: HashMap::new(),
            status_failure: None,
            submits: VecDeque::new(),
            updates: VecDeque::new(),
            calls: Vec::new(),
        }
    }
}

/// [`FacilityApi`] that replays queued responses in order.
///
/// Paginate responses are consumed one per call; an empty queue yields a
/// transport error. Comment writes succeed unless a result was queued.
#[derive(Debug, Clone, Default)]
pub struct ScriptedApi {
    state: Arc<Mutex<ApiState>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_page(&self, result: ApiResult<FacilityPage>) -> &Self {
        self.push_page_delayed(result, Duration::ZERO)
    }

    /// Respond to a paginate call only after `delay`.
    pub fn push_page_delayed(
        &self,
        result: ApiResult<FacilityPage>,
        delay: Duration,
    ) -> &Self {
        self.state.lock().pages.push_back((result, delay));
        self
    }

    pub fn set_categories(&self, result: ApiResult<Vec<Category>>) -> &Self {
        self.state.lock().categories = result;
        self
    }

    pub fn set_statuses(
        &self,
        facility_id: FacilityId,
        comments: Vec<StatusComment>,
    ) -> &Self {
        self.state.lock().statuses.insert(facility_id, comments);
        self
    }

    pub fn fail_statuses(&self, error: ApiError) -> &Self {
        self.state.lock().status_failure = Some(error);
        self
    }

    pub fn push_submit(&self, result: ApiResult<StatusSubmitted>) -> &Self {
        self.state.lock().submits.push_back(result);
        self
    }

    pub fn push_update(&self, result: ApiResult<StatusUpdated>) -> &Self {
        self.state.lock().updates.push_back(result);
        self
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.state
            .lock()
            .calls
            .iter()
            .map(|(_, call)| call.clone())
            .collect()
    }

    /// Paginate queries with the instant each was received.
    pub fn page_queries(&self) -> Vec<(Instant, FacilityQuery)> {
        self.state
            .lock()
            .calls
            .iter()
            .filter_map(|(at, call)| match call {
                ApiCall::FetchFacilities(query) => Some((*at, query.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn page_calls(&self) -> usize {
        self.page_queries().len()
    }

    fn record(&self, call: ApiCall) {
        self.state.lock().calls.push((Instant::now(), call));
    }
}

#[async_trait]
impl FacilityApi for ScriptedApi {
    async fn fetch_facilities(
        &self,
        query: &FacilityQuery,
    ) -> ApiResult<FacilityPage> {
        self.record(ApiCall::FetchFacilities(query.clone()));
        let next = self.state.lock().pages.pop_front();
        let Some((result, delay)) = next else {
            return Err(ApiError::Transport("no scripted page".into()));
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }

    async fn fetch_categories(&self) -> ApiResult<Vec<Category>> {
        self.record(ApiCall::FetchCategories);
        self.state.lock().categories.clone()
    }

    async fn fetch_statuses(
        &self,
        facility_id: FacilityId,
    ) -> ApiResult<Vec<StatusComment>> {
        self.record(ApiCall::FetchStatuses(facility_id));
        let state = self.state.lock();
        if let Some(error) = &state.status_failure {
            return Err(error.clone());
        }
        Ok(state.statuses.get(&facility_id).cloned().unwrap_or_default())
    }

    async fn submit_status(
        &self,
        facility_id: FacilityId,
        text: &str,
    ) -> ApiResult<StatusSubmitted> {
        self.record(ApiCall::SubmitStatus {
            facility_id,
            text: text.to_string(),
        });
        self.state.lock().submits.pop_front().unwrap_or_else(|| {
            Ok(StatusSubmitted {
                success: true,
                message: Some("Status added successfully".into()),
                status: None,
            })
        })
    }

    async fn update_status(
        &self,
        status_id: StatusId,
        text: &str,
    ) -> ApiResult<StatusUpdated> {
        self.record(ApiCall::UpdateStatus {
            status_id,
            text: text.to_string(),
        });
        self.state.lock().updates.pop_front().unwrap_or_else(|| {
            Ok(StatusUpdated {
                success: true,
                message: Some("Status updated successfully".into()),
            })
        })
    }
}

#[derive(Debug, Clone)]
enum SensorStep {
    Fix(Point, Duration),
    Fail(SensorError),
}

#[derive(Debug, Default)]
struct SensorState {
    steps: VecDeque<SensorStep>,
    calls: usize,
}

/// [`LocationSensor`] that replays queued readings.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSensor {
    state: Arc<Mutex<SensorState>>,
}

impl ScriptedSensor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&self, point: Point) {
        self.push_delayed(point, Duration::ZERO);
    }

    pub fn push_delayed(&self, point: Point, delay: Duration) {
        self.state
            .lock()
            .steps
            .push_back(SensorStep::Fix(point, delay));
    }

    pub fn push_err(&self, error: SensorError) {
        self.state.lock().steps.push_back(SensorStep::Fail(error));
    }

    pub fn calls(&self) -> usize {
        self.state.lock().calls
    }
}

#[async_trait]
impl LocationSensor for ScriptedSensor {
    async fn current_position(
        &self,
        _options: SensorOptions,
    ) -> Result<Point, SensorError> {
        let step = {
            let mut state = self.state.lock();
            state.calls += 1;
            state.steps.pop_front()
        };
        match step {
            Some(SensorStep::Fix(point, delay)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                Ok(point)
            }
            Some(SensorStep::Fail(error)) => Err(error),
            None => Err(SensorError::Unavailable("no scripted reading".into())),
        }
    }
}
