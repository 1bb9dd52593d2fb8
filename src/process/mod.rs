//! Process execution abstraction used by the command-output extractor

mod mock;
mod system;
mod tokenize;
mod r#trait;

pub use mock::MockProcessRunner;
pub use r#trait::{ProcessInvocation, ProcessOutput, ProcessRunner};
pub use system::SystemProcessRunner;
pub use tokenize::{tokenize, TokenizeError};
