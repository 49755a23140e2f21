pub mod config;
pub mod error;
pub mod core {
    pub mod schema;
    pub mod validator;
    pub mod compiler;
    pub mod store;
}
pub mod ai {
    pub mod client;
    pub mod gemini;
    pub mod openai;
    pub mod prompts;
    pub mod schema_utils;
}
pub mod export;
pub mod playground;

pub use crate::core::compiler::compile;
pub use crate::core::schema::PromptSchema;
pub use crate::core::store::FormStore;
pub use crate::core::validator::{validate, Validation};
pub use crate::error::PegError;
