//! Test world: owns the scripted transport, the runtime built around it and
//! the recorders observing it.

use std::sync::Arc;
use std::time::Duration;

use qmiloc_config::Config;

use crate::report::PositionReport;
use crate::runtime::{LoopEvent, Runtime};

use super::reporter::RecordingHealthReporter;
use super::sink::RecordingSink;
use super::transport::RecordingTransport;

/// Runtime type exercised by the suites.
pub type TestRuntime = Runtime<RecordingTransport, RecordingSink>;

/// Scenario world shared across steps.
pub struct TestWorld {
    pub reporter: Arc<RecordingHealthReporter>,
    config: Config,
    transport: Option<RecordingTransport>,
    runtime: Option<TestRuntime>,
}

impl TestWorld {
    #[must_use]
    pub fn new() -> Self {
        Self {
            reporter: Arc::new(RecordingHealthReporter::default()),
            config: Config::default(),
            transport: Some(RecordingTransport::new()),
            runtime: None,
        }
    }

    pub const fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn set_min_report_interval(&mut self, interval: Duration) {
        self.config.min_report_interval_ms =
            u32::try_from(interval.as_millis()).expect("interval fits in u32");
    }

    /// Transport before start-up, or the one owned by the runtime after.
    pub fn transport_mut(&mut self) -> &mut RecordingTransport {
        match (self.transport.as_mut(), self.runtime.as_mut()) {
            (Some(transport), _) => transport,
            (None, Some(runtime)) => runtime.transport_mut(),
            (None, None) => panic!("transport missing"),
        }
    }

    pub fn transport(&self) -> &RecordingTransport {
        self.runtime().transport()
    }

    /// Builds the runtime, submits the first stage and drains the loop.
    pub fn start(&mut self) {
        let transport = self.transport.take().expect("runtime already started");
        let mut runtime = Runtime::new(
            &self.config,
            transport,
            RecordingSink::default(),
            self.reporter.clone(),
        );
        runtime.start();
        runtime.run_until_idle();
        self.runtime = Some(runtime);
    }

    pub fn runtime(&self) -> &TestRuntime {
        self.runtime.as_ref().expect("runtime not started")
    }

    pub fn runtime_mut(&mut self) -> &mut TestRuntime {
        self.runtime.as_mut().expect("runtime not started")
    }

    /// Delivers `report` from the modem side and drains the loop.
    pub fn deliver(&mut self, report: PositionReport) -> bool {
        let runtime = self.runtime_mut();
        let delivered = runtime.transport().deliver(report);
        runtime.run_until_idle();
        delivered
    }

    /// Posts a shutdown request and drains the loop.
    pub fn shutdown(&mut self) {
        let runtime = self.runtime_mut();
        assert!(runtime.events().post(LoopEvent::Shutdown));
        runtime.run_until_idle();
    }

    /// Completes the parked transport request and drains the loop.
    pub fn complete_held(&mut self) {
        let runtime = self.runtime_mut();
        runtime.transport_mut().complete_held();
        runtime.run_until_idle();
    }

    /// Fails the parked transport request and drains the loop.
    pub fn fail_held(&mut self, message: &str) {
        let runtime = self.runtime_mut();
        runtime.transport_mut().fail_held(message);
        runtime.run_until_idle();
    }
}

/// Builds a fresh world.
#[must_use]
pub fn world() -> std::cell::RefCell<TestWorld> {
    std::cell::RefCell::new(TestWorld::new())
}
