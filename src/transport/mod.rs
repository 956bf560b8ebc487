//! Transport layer: HTTP plumbing and per-vendor wire-format details.

pub(crate) mod aqilas;
pub(crate) mod http;
mod money;
pub(crate) mod twilio;
