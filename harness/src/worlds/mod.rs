//! World implementations for the harness runner.

pub mod csp;
pub mod route;
pub mod sat;
