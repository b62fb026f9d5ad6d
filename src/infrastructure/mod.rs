//! Adapters behind the domain ports: in-memory history, the simulated
//! payment gateway and the Gemini-backed assistant.

pub mod gemini;
pub mod in_memory;
pub mod simulated_gateway;
