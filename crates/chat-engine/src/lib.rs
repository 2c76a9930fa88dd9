//! Reply decision and per-turn orchestration.

mod decide;
mod engine;

pub use chat_types::ChatError;
pub use decide::{decide_reply, ReplyDecision};
pub use engine::ChatEngine;
