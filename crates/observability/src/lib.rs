//! Process-wide tracing setup shared by binaries.

pub mod tracing;

pub use self::tracing::{LogFormat, ParseLogFormatError, init_with};
