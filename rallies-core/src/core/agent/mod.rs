//! Planning, retrieval and answering agent

pub mod action;
pub mod conversation;
pub mod plan;
pub mod runner;

pub use action::{ActionClient, ActionError, ERROR_MARKER, UsageCounters};
pub use conversation::{ConversationEntry, EntryKind, Role, prune_data_entries};
pub use plan::{Plan, PlanStep};
pub use runner::{Agent, CompactOutcome};
