//! Supervises daemon launch sequencing and runtime orchestration.

use std::sync::Arc;

use tracing::info;

use crate::bootstrap::{ConfigLoader, SystemConfigLoader, bootstrap_with};
use crate::health::{HealthReporter, StructuredHealthReporter};
use crate::provider::{LocationSink, StructuredLocationSink};
use crate::runtime::Runtime;
use crate::transport::{LocationTransport, UnsupportedTransport};

use super::PROCESS_TARGET;
use super::errors::LaunchError;
use super::shutdown::{ShutdownSignal, SystemShutdownSignal, spawn_forwarder};

/// Collaborators required to launch the daemon runtime.
pub(crate) struct LaunchPlan<L, T, S, G> {
    pub(crate) loader: L,
    pub(crate) reporter: Arc<dyn HealthReporter>,
    pub(crate) transport: T,
    pub(crate) sink: S,
    pub(crate) shutdown: G,
}

/// Runs the daemon using the production collaborators.
///
/// This build carries no QRTR bus backend, so the session fails at the bus
/// connection stage and the provider settles on the error status until a
/// termination signal arrives.
pub fn run_daemon() -> Result<(), LaunchError> {
    let shutdown = SystemShutdownSignal::install()?;
    let plan = LaunchPlan {
        loader: SystemConfigLoader,
        reporter: Arc::new(StructuredHealthReporter::new()),
        transport: UnsupportedTransport::new(),
        sink: StructuredLocationSink::new(),
        shutdown,
    };
    run_daemon_with(plan)
}

/// Runs the daemon with injected collaborators.
pub(crate) fn run_daemon_with<L, T, S, G>(
    plan: LaunchPlan<L, T, S, G>,
) -> Result<(), LaunchError>
where
    L: ConfigLoader,
    T: LocationTransport,
    S: LocationSink,
    G: ShutdownSignal,
{
    let LaunchPlan {
        loader,
        reporter,
        transport,
        sink,
        shutdown,
    } = plan;

    let daemon = bootstrap_with(&loader, &*reporter)?;
    let config = daemon.into_config();
    info!(
        target: PROCESS_TARGET,
        session_id = config.session_id,
        "starting location provider"
    );

    let mut runtime = Runtime::new(&config, transport, sink, reporter);
    spawn_forwarder(shutdown, runtime.events())?;
    runtime.start();
    runtime.run()?;

    info!(target: PROCESS_TARGET, "shutdown sequence completed");
    Ok(())
}
