//! Result model: one failure record and a case's accumulated outcome

use crate::location::SourceLocation;

/// One failed assertion: the formatted message and the site that raised it.
///
/// Immutable once created.
#[derive(Debug, Clone)]
pub struct Failure {
    message: String,
    location: SourceLocation,
}

impl Failure {
    pub(crate) fn new(message: String, location: SourceLocation) -> Self {
        Self { message, location }
    }

    /// The formatted failure message, including the operation name and severity prefix
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Where the failing assertion was called
    pub fn location(&self) -> SourceLocation {
        self.location
    }
}

/// The accumulated outcome of one case. An empty failure list means the case
/// passed.
///
/// Owned by its `Case`; only grows while that case is executing.
#[derive(Debug, Default)]
pub struct CaseResult {
    failures: Vec<Failure>,
}

impl CaseResult {
    /// True when no assertion in the case failed
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// Failures in the order they were recorded
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    pub(crate) fn record(&mut self, failure: Failure) {
        self.failures.push(failure);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result_passes() {
        let result = CaseResult::default();
        assert!(result.passed());
        assert!(result.failures().is_empty());
    }

    #[test]
    fn test_recorded_failures_keep_order() {
        let mut result = CaseResult::default();
        result.record(Failure::new("first".to_string(), SourceLocation::caller()));
        result.record(Failure::new("second".to_string(), SourceLocation::caller()));

        assert!(!result.passed());
        let messages: Vec<_> = result.failures().iter().map(Failure::message).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }
}
