//! Error conversion helpers for reading plans

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// fs.read_to_string(&plan)
    ///     .with_path_context("read plan", &plan)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;

    /// Add context for input that has no path (stdin).
    fn with_input_context(self, action: &str) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ApplicationError::PlanNotFound(path.to_path_buf()),
            _ => ApplicationError::OperationFailed {
                context: format!("{}: {}", action, path.display()),
                source: Box::new(e),
            },
        })
    }

    fn with_input_context(self, action: &str) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: action.to_string(),
            source: Box::new(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_not_found_when_adding_context_then_plan_not_found() {
        let res: io::Result<()> = Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = res.with_path_context("read plan", Path::new("PLAN.md")).unwrap_err();
        assert!(matches!(err, ApplicationError::PlanNotFound(p) if p == Path::new("PLAN.md")));
    }

    #[test]
    fn given_other_io_error_when_adding_context_then_operation_failed_with_path() {
        let res: io::Result<()> = Err(io::Error::new(io::ErrorKind::InvalidData, "not utf-8"));
        let err = res.with_path_context("read plan", Path::new("PLAN.md")).unwrap_err();
        assert_eq!(err.to_string(), "operation failed: read plan: PLAN.md");
    }
}
