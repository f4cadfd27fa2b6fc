// Library target exists for integration tests and criterion benchmarks.
// The binary entry point is main.rs; this file re-declares the module tree so
// that harnesses can import types via `kotoba::engine::*` / `kotoba::store::*`.
// Most code is only exercised through the binary, so suppress dead_code warnings.
#![allow(dead_code)]

// Public: used by benches and integration tests
pub mod engine;
pub mod session;
pub mod store;
pub mod vocab;

// Private: required transitively (won't compile without them)
mod app;
mod config;
mod event;
mod ui;
