//
// src/proxy/mod.rs
//
mod endpoint;
mod engine;
mod error;
mod proxy;
mod response;

pub use endpoint::SimulationEndpoint;
pub use engine::{EngineClient, EngineReply};
pub use error::{ErrorEnvelope, ProxyError, UNKNOWN_ERROR};
pub use proxy::SimulationProxy;
pub use response::{json_response, APPLICATION_JSON};
