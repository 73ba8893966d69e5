//! Test suites for the location provider daemon.

mod behaviour;
mod support;
