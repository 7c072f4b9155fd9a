// Orchestration of one screening run and its HTTP surface.

pub mod handlers;
pub mod pipeline;
