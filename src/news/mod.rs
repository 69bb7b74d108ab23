pub mod gemini;
pub mod traits;

pub use gemini::{GeminiNews, GeminiSettings};
pub use traits::NewsSource;
