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

//! Security limits for Robot test data parsing.

/// Configurable limits for parser security.
///
/// These limits bound the resources consumed while parsing untrusted
/// test data files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum file size in bytes (default: 64MB).
    pub max_file_size: usize,
    /// Maximum line length in bytes (default: 1MB).
    pub max_line_length: usize,
    /// Maximum number of cells on a single line (default: 10k).
    pub max_cells_per_line: usize,
    /// Maximum bracket nesting depth of a variable expression (default: 256).
    ///
    /// Openers beyond this depth are kept as plain text, which bounds the
    /// container arena for pathological values such as thousands of
    /// unbalanced `${`.
    pub max_expression_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_file_size: 64 * 1024 * 1024, // 64MB
            max_line_length: 1024 * 1024,    // 1MB
            max_cells_per_line: 10_000,
            max_expression_depth: 256,
        }
    }
}

impl Limits {
    /// Create limits with no restrictions (for testing).
    pub fn unlimited() -> Self {
        Self {
            max_file_size: usize::MAX,
            max_line_length: usize::MAX,
            max_cells_per_line: usize::MAX,
            max_expression_depth: usize::MAX,
        }
    }
}
