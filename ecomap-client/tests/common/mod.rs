#![allow(dead_code)]

use ecomap_client::domains::location::LocationResolver;
use ecomap_client::infra::testing::{
    RecordingList, RecordingMap, RecordingShell, ScriptedApi, ScriptedSensor,
};
use ecomap_client::{
    EngineSettings, Runtime, RuntimeHandle, ViewCoordinator,
};
use ecomap_model::Viewer;
use std::sync::Arc;

/// A runtime wired to recording surfaces and scripted collaborators.
pub struct Harness {
    pub runtime: Runtime,
    pub handle: RuntimeHandle,
    pub api: ScriptedApi,
    pub sensor: ScriptedSensor,
    pub map: RecordingMap,
    pub list: RecordingList,
    pub shell: RecordingShell,
}

pub fn settings() -> EngineSettings {
    EngineSettings {
        site_url: "https://eco.example".to_string(),
        ..EngineSettings::default()
    }
}

pub fn harness() -> Harness {
    harness_with(settings())
}

pub fn harness_for(viewer: Viewer) -> Harness {
    harness_with(EngineSettings {
        viewer,
        ..settings()
    })
}

pub fn harness_with(settings: EngineSettings) -> Harness {
    let api = ScriptedApi::new();
    let sensor = ScriptedSensor::new();
    let map = RecordingMap::new();
    let list = RecordingList::new();
    let shell = RecordingShell::new();

    let coordinator = ViewCoordinator::new(
        settings,
        Box::new(map.clone()),
        Box::new(list.clone()),
        Box::new(shell.clone()),
    );
    let resolver = LocationResolver::new(Some(Arc::new(sensor.clone())));
    let runtime = Runtime::new(coordinator, Arc::new(api.clone()), Arc::new(resolver));
    let handle = runtime.handle();

    Harness {
        runtime,
        handle,
        api,
        sensor,
        map,
        list,
        shell,
    }
}

impl Harness {
    /// Run startup and wait for the first page.
    pub async fn boot(&mut self) {
        self.runtime.start();
        assert!(self.runtime.run_until_settled().await);
    }

    pub async fn send(&mut self, message: ecomap_client::Message) {
        self.handle.send(message);
        assert!(self.runtime.run_until_settled().await);
    }
}
