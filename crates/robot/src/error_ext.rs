// Dweve Robot - Robot Framework Test Data Engine
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error context helpers.
//!
//! Extension traits for `Result<T, RobotError>` and `Result<T, io::Error>`
//! that annotate errors as they propagate.
//!
//! # Examples
//!
//! ```rust
//! use robot::{parse, RobotResultExt};
//!
//! fn load_suite(path: &str) -> Result<robot::RobotFileOutput, robot::RobotError> {
//!     let content = std::fs::read_to_string(path)
//!         .with_context(|| format!("while reading {}", path))?;
//!
//!     parse(&content).context(format!("while parsing suite {}", path))
//! }
//! ```
//!
//! Context accumulates through layers, newest first:
//!
//! ```rust
//! use robot::{RobotError, RobotResultExt};
//!
//! let result: Result<(), RobotError> = Err(RobotError::security("line too long", 3));
//! let err = result.context("in resource.robot").context("while importing").unwrap_err();
//! assert_eq!(err.context.as_deref(), Some("while importing; in resource.robot"));
//! ```

use crate::RobotError;
use std::fmt;

/// Extension trait for adding context to results.
pub trait RobotResultExt<T> {
    /// The error type of the extended `Result`.
    type ErrorType;

    /// Add context to an error.
    ///
    /// Evaluated immediately; prefer [`with_context`](Self::with_context)
    /// when the message is costly to build.
    fn context<C>(self, context: C) -> Result<T, RobotError>
    where
        C: fmt::Display;

    /// Add context computed only on the error path.
    fn with_context<C, F>(self, f: F) -> Result<T, RobotError>
    where
        C: fmt::Display,
        F: FnOnce() -> C;

    /// Convert the error with a closure.
    ///
    /// ```rust
    /// use robot::{RobotError, RobotResultExt};
    ///
    /// fn read(path: &str) -> Result<Vec<u8>, RobotError> {
    ///     std::fs::read(path).map_err_to_robot(|e| RobotError::io(format!("cannot read {}: {}", path, e)))
    /// }
    /// ```
    fn map_err_to_robot<F>(self, f: F) -> Result<T, RobotError>
    where
        F: FnOnce(Self::ErrorType) -> RobotError,
        Self: Sized;
}

impl<T> RobotResultExt<T> for Result<T, RobotError> {
    type ErrorType = RobotError;

    fn context<C>(self, context: C) -> Result<T, RobotError>
    where
        C: fmt::Display,
    {
        self.map_err(|e| add_context_to_error(e, context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, RobotError>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| add_context_to_error(e, f().to_string()))
    }

    fn map_err_to_robot<F>(self, _f: F) -> Result<T, RobotError>
    where
        F: FnOnce(Self::ErrorType) -> RobotError,
    {
        // already a RobotError
        self
    }
}

impl<T> RobotResultExt<T> for Result<T, std::io::Error> {
    type ErrorType = std::io::Error;

    fn context<C>(self, context: C) -> Result<T, RobotError>
    where
        C: fmt::Display,
    {
        self.map_err(|e| add_context_to_error(RobotError::io(e.to_string()), context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, RobotError>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| add_context_to_error(RobotError::io(e.to_string()), f().to_string()))
    }

    fn map_err_to_robot<F>(self, f: F) -> Result<T, RobotError>
    where
        F: FnOnce(Self::ErrorType) -> RobotError,
    {
        self.map_err(f)
    }
}

/// Prepend `new_context` to the error's context chain, `"new; old"`.
/// Empty context is ignored.
fn add_context_to_error(mut error: RobotError, new_context: String) -> RobotError {
    if new_context.is_empty() {
        return error;
    }

    error.context = Some(match error.context {
        Some(existing) => format!("{}; {}", new_context, existing),
        None => new_context,
    });

    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_with_options, ParseOptions, RobotErrorKind};

    // ==================== context() tests ====================

    #[test]
    fn test_context_on_error() {
        let result: Result<(), RobotError> = Err(RobotError::syntax("invalid UTF-8", 5));
        let err = result.context("in suite.robot").unwrap_err();

        assert_eq!(err.context, Some("in suite.robot".to_string()));
        assert_eq!(err.line, 5);
        assert_eq!(err.kind, RobotErrorKind::Syntax);
    }

    #[test]
    fn test_context_on_ok() {
        let result: Result<i32, RobotError> = Ok(42);
        assert_eq!(result.context("unused").unwrap(), 42);
    }

    #[test]
    fn test_context_chaining_order() {
        let result: Result<(), RobotError> = Err(RobotError::security("too many cells", 10));
        let err = result.context("inner").context("outer").unwrap_err();
        assert_eq!(err.context.as_deref(), Some("outer; inner"));
    }

    #[test]
    fn test_context_preserves_fields() {
        let result: Result<(), RobotError> = Err(RobotError::syntax("bad byte", 15).with_column(20));
        let err = result.context("additional").unwrap_err();

        assert_eq!(err.line, 15);
        assert_eq!(err.column, Some(20));
        assert_eq!(err.message, "bad byte");
    }

    #[test]
    fn test_empty_context_ignored() {
        let result: Result<(), RobotError> = Err(RobotError::syntax("error", 1));
        let err = result.context("").context("").context("real").unwrap_err();
        assert_eq!(err.context, Some("real".to_string()));
    }

    // ==================== with_context() tests ====================

    #[test]
    fn test_with_context_lazy() {
        let mut evaluated = false;
        let result: Result<i32, RobotError> = Ok(1);
        let _ = result.with_context(|| {
            evaluated = true;
            "never"
        });
        assert!(!evaluated);
    }

    #[test]
    fn test_with_context_on_error() {
        let result: Result<(), RobotError> = Err(RobotError::version("cannot parse 'x'"));
        let err = result.with_context(|| format!("option {}", "--rf-version")).unwrap_err();
        assert_eq!(err.context.as_deref(), Some("option --rf-version"));
    }

    // ==================== io::Error tests ====================

    #[test]
    fn test_io_context() {
        let err = std::fs::read("/this/path/does/not/exist")
            .context("failed to load suite")
            .unwrap_err();
        assert_eq!(err.kind, RobotErrorKind::IO);
        assert_eq!(err.context.as_deref(), Some("failed to load suite"));
    }

    #[test]
    fn test_map_err_to_robot() {
        let io: Result<String, std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"));
        let err = io
            .map_err_to_robot(|e| RobotError::io(format!("cannot read: {}", e)))
            .unwrap_err();
        assert_eq!(err.kind, RobotErrorKind::IO);
        assert!(err.message.contains("file not found"));
    }

    // ==================== Integration tests ====================

    #[test]
    fn test_parse_error_with_context() {
        let options = ParseOptions::builder().max_file_size(4).build();
        let err = parse_with_options(b"*** Settings ***\n", &options)
            .context("while parsing big.robot")
            .unwrap_err();
        assert_eq!(err.kind, RobotErrorKind::Security);
        assert!(err.context.unwrap().contains("big.robot"));
    }
}
