use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FormatResult};
use std::panic::Location as PanicLocation;

/// Source position where an error value was created.
///
/// Every error enum in the workspace carries one of these so a message such as
/// `Server Error: ... [client.rs:212:18]` points straight at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ErrorLocation {
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
}

impl ErrorLocation {
    pub const fn from(location: &'static PanicLocation<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }

    /// Location of the caller, propagated through `#[track_caller]` frames.
    #[track_caller]
    pub fn caller() -> Self {
        Self::from(PanicLocation::caller())
    }
}

impl Display for ErrorLocation {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        write!(formatter, "[{}:{}:{}]", self.file, self.line, self.column)
    }
}
