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

//! Integration tests for error context propagation.

use robot::{parse_file, parse_with_options, GrammarVersion, ParseOptions, RobotError, RobotErrorKind, RobotResultExt};

#[test]
fn test_context_adds_context_to_error() {
    let options = ParseOptions::builder().max_line_length(8).build();
    let err = parse_with_options(b"*** Test Cases ***\n", &options)
        .context("while parsing suite.robot")
        .unwrap_err();

    assert_eq!(err.kind, RobotErrorKind::Security);
    assert_eq!(err.line, 1);
    assert_eq!(err.context.as_deref(), Some("while parsing suite.robot"));
}

#[test]
fn test_invalid_utf8_reports_line() {
    let err = parse_with_options(b"*** Test Cases ***\nT\xff\n", &ParseOptions::default())
        .with_context(|| "in broken.robot")
        .unwrap_err();

    assert_eq!(err.kind, RobotErrorKind::Syntax);
    assert_eq!(err.line, 2);
}

#[test]
fn test_multi_level_context_chaining() {
    fn level1() -> Result<(), RobotError> {
        Err(RobotError::security("too many cells", 4))
    }

    fn level2() -> Result<(), RobotError> {
        level1().context("in resource common.resource")
    }

    fn level3() -> Result<(), RobotError> {
        level2().context("while importing resources")
    }

    let err = level3().unwrap_err();
    assert_eq!(
        err.context.as_deref(),
        Some("while importing resources; in resource common.resource")
    );
    assert_eq!(err.line, 4);
}

#[test]
fn test_parse_file_context_names_path() {
    let err = parse_file("/no/such/dir/suite.robot", GrammarVersion::V3_0).unwrap_err();
    assert_eq!(err.kind, RobotErrorKind::IO);
    assert!(err.context.unwrap().contains("/no/such/dir/suite.robot"));
}

#[test]
fn test_display_includes_kind_and_line() {
    let err = RobotError::syntax("invalid UTF-8", 7);
    let text = err.to_string();
    assert!(text.contains("SyntaxError"));
    assert!(text.contains("line 7"));
}
