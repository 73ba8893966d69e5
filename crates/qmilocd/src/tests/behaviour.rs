//! Behavioural tests for the session bootstrap and report ingestion.

use std::cell::RefCell;

use qmiloc_types::{PositionField, Status, VelocityField};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use crate::report::PositionReport;
use crate::session::{SessionStage, SessionState};
use crate::transport::{Node, ServiceId};

use super::support::{self, Operation, Outcome, TestWorld, TransportCall};

type StepResult = Result<(), String>;

#[fixture]
fn world() -> RefCell<TestWorld> {
    support::world()
}

#[given("a modem exposing the location service")]
fn given_modem(world: &RefCell<TestWorld>) {
    let submitted = world.borrow_mut().transport_mut().calls().len();
    assert_eq!(submitted, 0, "transport used before the scenario started");
}

#[given("a bus without the location service")]
fn given_bus_without_service(world: &RefCell<TestWorld>) {
    world
        .borrow_mut()
        .transport_mut()
        .set_nodes(vec![Node::new(4).with_service(ServiceId::new(0x02), 8)]);
}

#[given("the {operation} request times out")]
fn given_timeout(world: &RefCell<TestWorld>, operation: String) -> StepResult {
    let parsed = parse_operation(&operation)?;
    world
        .borrow_mut()
        .transport_mut()
        .script(parsed, Outcome::Timeout);
    Ok(())
}

#[given("a running positioning session")]
fn given_running_session(world: &RefCell<TestWorld>) {
    world.borrow_mut().start();
    assert_eq!(
        world.borrow().runtime().session_state(),
        SessionState::Available
    );
}

#[when("the provider starts")]
fn when_provider_starts(world: &RefCell<TestWorld>) {
    world.borrow_mut().start();
}

#[when("shutdown is requested")]
fn when_shutdown(world: &RefCell<TestWorld>) {
    world.borrow_mut().shutdown();
}

#[when("shutdown is requested twice")]
fn when_shutdown_twice(world: &RefCell<TestWorld>) {
    let mut borrow = world.borrow_mut();
    borrow.shutdown();
    borrow.shutdown();
}

#[when("a report with latitude {latitude} and longitude {longitude} arrives")]
fn when_coordinates_arrive(
    world: &RefCell<TestWorld>,
    latitude: String,
    longitude: String,
) -> StepResult {
    let report =
        PositionReport::new().with_coordinates(parse_f64(&latitude)?, parse_f64(&longitude)?);
    world.borrow_mut().deliver(report);
    Ok(())
}

#[when("a report with heading {heading} arrives")]
fn when_heading_arrives(world: &RefCell<TestWorld>, heading: String) -> StepResult {
    let value = parse_heading(&heading)?;
    world
        .borrow_mut()
        .deliver(PositionReport::new().with_heading(value));
    Ok(())
}

#[when("a report with heading {heading} is sent after shutdown")]
fn when_heading_sent_after_shutdown(world: &RefCell<TestWorld>, heading: String) -> StepResult {
    let value = parse_heading(&heading)?;
    let delivered = world
        .borrow_mut()
        .deliver(PositionReport::new().with_heading(value));
    if delivered {
        Err(String::from("report was accepted after shutdown"))
    } else {
        Ok(())
    }
}

#[then("the provider status is {status}")]
fn then_status(world: &RefCell<TestWorld>, status: String) {
    let current = world.borrow().runtime().provider().get_status();
    assert_eq!(current.to_string(), status);
    if current == Status::Available {
        assert!(world.borrow().runtime().session().reports_attached());
    }
}

#[then("the stages ran in order up to {stage}")]
fn then_stages_in_order(world: &RefCell<TestWorld>, stage: String) -> StepResult {
    let last = parse_stage(&stage)?;
    let expected: Vec<SessionStage> = SessionStage::ALL
        .into_iter()
        .filter(|candidate| *candidate <= last)
        .collect();
    let recorded = world.borrow().reporter.stages();
    if recorded == expected {
        Ok(())
    } else {
        Err(format!("expected stages {expected:?}, got {recorded:?}"))
    }
}

#[then("the session failed at {stage}")]
fn then_failed_at(world: &RefCell<TestWorld>, stage: String) -> StepResult {
    let expected = parse_stage(&stage)?;
    let state = world.borrow().runtime().session_state();
    if state == SessionState::Failed(expected) {
        Ok(())
    } else {
        Err(format!("expected failure at {expected}, state is {state:?}"))
    }
}

#[then("no device was opened")]
fn then_no_device(world: &RefCell<TestWorld>) {
    let calls = world.borrow().transport().calls();
    assert!(
        !calls
            .iter()
            .any(|call| matches!(call, TransportCall::OpenDevice { .. })),
        "unexpected device open: {calls:?}"
    );
}

#[then("the client was released once")]
fn then_released_once(world: &RefCell<TestWorld>) {
    assert_eq!(world.borrow().transport().release_calls(), 1);
}

#[then("the event loop has stopped")]
fn then_loop_stopped(world: &RefCell<TestWorld>) {
    assert!(world.borrow().runtime().is_finished());
}

#[then("the position fields are {fields}")]
fn then_position_fields(world: &RefCell<TestWorld>, fields: String) -> StepResult {
    let position = world.borrow().runtime().provider().get_position();
    let expected = fields
        .split(',')
        .map(|name| match name.trim() {
            "latitude" => Ok(PositionField::Latitude),
            "longitude" => Ok(PositionField::Longitude),
            "altitude" => Ok(PositionField::Altitude),
            other => Err(format!("unknown position field '{other}'")),
        })
        .collect::<Result<Vec<_>, _>>()?;
    let actual: Vec<PositionField> = position.fields.iter().copied().collect();
    if actual == expected {
        Ok(())
    } else {
        Err(format!("expected {expected:?}, got {actual:?}"))
    }
}

#[then("the velocity fields are {fields}")]
fn then_velocity_fields(world: &RefCell<TestWorld>, fields: String) -> StepResult {
    let velocity = world.borrow().runtime().provider().get_velocity();
    let expected = fields
        .split(',')
        .map(|name| match name.trim() {
            "speed" => Ok(VelocityField::Speed),
            "direction" => Ok(VelocityField::Direction),
            "climb" => Ok(VelocityField::Climb),
            other => Err(format!("unknown velocity field '{other}'")),
        })
        .collect::<Result<Vec<_>, _>>()?;
    let actual: Vec<VelocityField> = velocity.fields.iter().copied().collect();
    if actual == expected {
        Ok(())
    } else {
        Err(format!("expected {expected:?}, got {actual:?}"))
    }
}

#[then("the position carries no fields")]
fn then_position_empty(world: &RefCell<TestWorld>) {
    assert!(world.borrow().runtime().provider().get_position().fields.is_empty());
}

#[then("the velocity carries no fields")]
fn then_velocity_empty(world: &RefCell<TestWorld>) {
    assert!(world.borrow().runtime().provider().get_velocity().fields.is_empty());
}

#[then("the direction is {heading}")]
fn then_direction(world: &RefCell<TestWorld>, heading: String) -> StepResult {
    let expected = f64::from(parse_heading(&heading)?);
    let direction = world.borrow().runtime().provider().get_velocity().direction;
    if direction.to_bits() == expected.to_bits() {
        Ok(())
    } else {
        Err(format!("expected direction {expected}, got {direction}"))
    }
}

#[then("{count} velocity change was announced")]
fn then_velocity_changes(world: &RefCell<TestWorld>, count: String) -> StepResult {
    let expected = count
        .parse::<usize>()
        .map_err(|error| format!("invalid count '{count}': {error}"))?;
    let announced = world.borrow().runtime().provider().sink().velocities().len();
    if announced == expected {
        Ok(())
    } else {
        Err(format!("expected {expected} velocity changes, got {announced}"))
    }
}

#[then("{count} position change was announced")]
fn then_position_changes(world: &RefCell<TestWorld>, count: String) -> StepResult {
    let expected = count
        .parse::<usize>()
        .map_err(|error| format!("invalid count '{count}': {error}"))?;
    let announced = world.borrow().runtime().provider().sink().positions().len();
    if announced == expected {
        Ok(())
    } else {
        Err(format!("expected {expected} position changes, got {announced}"))
    }
}

#[scenario(
    path = "tests/features/session_bootstrap.feature",
    name = "Every stage succeeds"
)]
fn bootstrap_succeeds(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/session_bootstrap.feature",
    name = "No node exposes the location service"
)]
fn bootstrap_without_service(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/session_bootstrap.feature",
    name = "Client allocation times out"
)]
fn bootstrap_allocation_timeout(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/session_bootstrap.feature",
    name = "Shutdown releases the positioning client"
)]
fn bootstrap_shutdown_release(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/report_ingestion.feature",
    name = "Coordinates update the position"
)]
fn ingestion_coordinates(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/report_ingestion.feature",
    name = "Heading alone updates the velocity"
)]
fn ingestion_heading(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/report_ingestion.feature",
    name = "Reports stop after shutdown"
)]
fn ingestion_after_shutdown(world: RefCell<TestWorld>) {
    drop(world);
}

fn parse_stage(label: &str) -> Result<SessionStage, String> {
    SessionStage::ALL
        .into_iter()
        .find(|stage| stage.to_string() == label)
        .ok_or_else(|| format!("unknown session stage '{label}'"))
}

fn parse_operation(name: &str) -> Result<Operation, String> {
    match name {
        "connect_bus" => Ok(Operation::ConnectBus),
        "open_device" => Ok(Operation::OpenDevice),
        "allocate_client" => Ok(Operation::AllocateClient),
        "register_events" => Ok(Operation::RegisterEvents),
        "start_session" => Ok(Operation::StartSession),
        "release_client" => Ok(Operation::ReleaseClient),
        other => Err(format!("unknown transport operation '{other}'")),
    }
}

fn parse_f64(value: &str) -> Result<f64, String> {
    value
        .parse::<f64>()
        .map_err(|error| format!("invalid number '{value}': {error}"))
}

fn parse_heading(heading: &str) -> Result<f32, String> {
    heading
        .parse::<f32>()
        .map_err(|error| format!("invalid heading '{heading}': {error}"))
}
