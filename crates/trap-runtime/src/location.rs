//! Source locations for failure attribution

use std::fmt;
use std::panic::Location;

/// A `file:line` position captured at an assertion or registration site.
///
/// Every public assertion and `register_case` is `#[track_caller]`, so the
/// captured location points at the caller's code rather than at runtime
/// internals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    file: &'static str,
    line: u32,
}

impl SourceLocation {
    /// Capture the caller's location.
    #[track_caller]
    pub fn caller() -> Self {
        Location::caller().into()
    }

    /// Source file path as given to the compiler
    pub fn file(&self) -> &'static str {
        self.file
    }

    /// 1-based line number
    pub fn line(&self) -> u32 {
        self.line
    }
}

impl From<&'static Location<'static>> for SourceLocation {
    fn from(loc: &'static Location<'static>) -> Self {
        Self {
            file: loc.file(),
            line: loc.line(),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_points_at_call_site() {
        let here = line!() + 1;
        let loc = SourceLocation::caller();
        assert_eq!(loc.line(), here);
        assert_eq!(loc.file(), file!());
    }

    #[test]
    fn test_display_is_file_colon_line() {
        let loc = SourceLocation::caller();
        assert_eq!(loc.to_string(), format!("{}:{}", loc.file(), loc.line()));
    }

    #[test]
    fn test_track_caller_propagates_through_helpers() {
        #[track_caller]
        fn helper() -> SourceLocation {
            SourceLocation::caller()
        }

        let here = line!() + 1;
        let loc = helper();
        assert_eq!(loc.line(), here);
    }
}
