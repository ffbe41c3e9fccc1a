pub mod system;

pub use system::{answer_prompt, compact_prompt};
