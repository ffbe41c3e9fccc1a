pub mod gemini;
pub mod openai;

mod sse;

pub use gemini::GeminiProvider;
pub use openai::OpenAIProvider;
