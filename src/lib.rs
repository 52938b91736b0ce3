// Library surface for the binary, headless tests, and reuse.
// Terminal rendering and key handling stay in main.rs.
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod generator;
pub mod question;
pub mod runtime;
pub mod session;

pub use error::QuizError;
pub use generator::{FixedOperands, OperandSource, RandomOperands};
pub use question::Question;
pub use session::{Phase, Quiz, QuizSession, SessionConfig, SubmitResult};
