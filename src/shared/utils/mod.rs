pub mod logger;
pub mod random;

pub use logger::{init_logger, LogContext, TimedOperation};
pub use random::{RandomSource, ScriptedRandom, StdRandom};
