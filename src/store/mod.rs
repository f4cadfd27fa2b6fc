#[cfg(feature = "network")]
pub mod http;
pub mod local;
pub mod memory;
pub mod remote;
pub mod schema;
