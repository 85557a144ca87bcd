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

//! Grammar (language) version of the test data being parsed.

use crate::error::{RobotError, RobotResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

static VERSION_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\.(\d+)(?:\.(\d+))?").expect("valid version regex"));

/// Declared language generation of a test data file.
///
/// Ordering is by `(major, minor)`, so `GrammarVersion::new(2, 9) <
/// GrammarVersion::V3_0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrammarVersion {
    major: u32,
    minor: u32,
}

impl GrammarVersion {
    /// The generation that retired the pre-3.0 aliases and metadata syntax.
    pub const V3_0: GrammarVersion = GrammarVersion::new(3, 0);
    /// First generation with `*** Tasks ***` tables.
    pub const V3_1: GrammarVersion = GrammarVersion::new(3, 1);

    #[inline]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    #[inline]
    pub const fn major(&self) -> u32 {
        self.major
    }

    #[inline]
    pub const fn minor(&self) -> u32 {
        self.minor
    }

    /// Parse a version out of free text.
    ///
    /// Accepts `"3.0"`, `"2.9.1"` (the patch level is ignored) and banners such
    /// as `"Robot Framework 2.9.1 (Python 2.7.9 on win32)"`.
    pub fn parse(text: &str) -> RobotResult<Self> {
        let caps = VERSION_NUMBER
            .captures(text)
            .ok_or_else(|| RobotError::version(format!("cannot parse version from '{}'", text)))?;
        let major = caps[1]
            .parse()
            .map_err(|_| RobotError::version(format!("major version out of range in '{}'", text)))?;
        let minor = caps[2]
            .parse()
            .map_err(|_| RobotError::version(format!("minor version out of range in '{}'", text)))?;
        Ok(Self::new(major, minor))
    }

    /// True when this version lies in `[since, until)`; missing bounds are open.
    pub fn is_within(&self, since: Option<GrammarVersion>, until: Option<GrammarVersion>) -> bool {
        since.map_or(true, |s| *self >= s) && until.map_or(true, |u| *self < u)
    }
}

impl Default for GrammarVersion {
    fn default() -> Self {
        Self::V3_0
    }
}

impl fmt::Display for GrammarVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for GrammarVersion {
    type Err = RobotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
