//! Observability subsystem.
//!
//! Every deployment step, wiring call and verification emits a structured
//! `tracing` event (contract, address, tx hash). Binaries install the
//! subscriber via [`logging::init_logging`].

pub mod logging;

pub use logging::init_logging;
