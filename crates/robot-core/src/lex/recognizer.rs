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

//! Ordered, version-aware classification of raw cells.
//!
//! Each [`Recognizer`] owns a compiled pattern anchored at the start of the
//! cell. A match classifies a prefix of the cell; [`Recognition::exact`]
//! tells whether that prefix spans the whole (right-trimmed) cell. The table
//! is built once per process and read concurrently afterwards.

use super::token::{LocalSettingKind, SettingKind, TableType};
use crate::version::GrammarVersion;
use once_cell::sync::Lazy;
use regex::Regex;

/// What a recognizer classifies a cell as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recognized {
    TableHeader(TableType),
    Comment,
    Continuation,
    SettingDeclaration(SettingKind),
    /// `Meta: Key` with the key inside the declaration cell.
    OldMetadata,
    LocalSetting(LocalSettingKind),
}

/// Where a recognizer may fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognizerScope {
    Anywhere,
    Table(TableType),
    /// Test case and keyword tables.
    Executables,
}

impl RecognizerScope {
    fn admits(&self, table: Option<TableType>) -> bool {
        match self {
            Self::Anywhere => true,
            Self::Table(expected) => table == Some(*expected),
            Self::Executables => matches!(table, Some(TableType::TestCases | TableType::Keywords)),
        }
    }
}

/// A compiled pattern together with what it produces.
#[derive(Debug)]
pub struct Recognizer {
    produced: Recognized,
    pattern: Regex,
    scope: RecognizerScope,
    since: Option<GrammarVersion>,
    until: Option<GrammarVersion>,
}

impl Recognizer {
    fn new(produced: Recognized, pattern: &str, scope: RecognizerScope) -> Self {
        Self {
            produced,
            pattern: Regex::new(pattern).expect("valid recognizer pattern"),
            scope,
            since: None,
            until: None,
        }
    }

    fn since(mut self, version: GrammarVersion) -> Self {
        self.since = Some(version);
        self
    }

    fn until(mut self, version: GrammarVersion) -> Self {
        self.until = Some(version);
        self
    }

    pub fn produced(&self) -> Recognized {
        self.produced
    }

    pub fn is_applicable_for(&self, version: GrammarVersion) -> bool {
        version.is_within(self.since, self.until)
    }

    /// Length in bytes of the recognized prefix of `text`.
    pub fn match_prefix(&self, text: &str) -> Option<usize> {
        self.pattern.find(text).map(|m| m.end())
    }
}

/// Result of classifying a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recognition {
    pub produced: Recognized,
    /// Byte length of the recognized prefix.
    pub matched_len: usize,
    /// The prefix covers the whole cell, trailing whitespace aside.
    pub exact: bool,
}

fn header(table: TableType, names: &str) -> Recognizer {
    Recognizer::new(
        Recognized::TableHeader(table),
        &format!(r"(?i)^\s*\*+\s*(?:{})\s*\**\s*", names),
        RecognizerScope::Anywhere,
    )
}

fn setting(kind: SettingKind, name: &str) -> Recognizer {
    Recognizer::new(
        Recognized::SettingDeclaration(kind),
        &format!(r"(?i)^\s*{}(?:\s*:)?", name),
        RecognizerScope::Table(TableType::Settings),
    )
}

fn local(kind: LocalSettingKind, name: &str) -> Recognizer {
    Recognizer::new(
        Recognized::LocalSetting(kind),
        &format!(r"(?i)^\s*\[\s*{}\s*\]", name),
        RecognizerScope::Executables,
    )
}

static RECOGNIZERS: Lazy<Vec<Recognizer>> = Lazy::new(|| {
    use LocalSettingKind as L;
    use SettingKind as S;
    let v3 = GrammarVersion::V3_0;
    vec![
        header(TableType::Settings, r"settings?|metadata"),
        header(TableType::Variables, r"variables?"),
        header(TableType::TestCases, r"test\s*cases?"),
        // tasks are test cases under an automation header
        header(TableType::TestCases, r"tasks?").since(GrammarVersion::V3_1),
        header(TableType::Keywords, r"(?:user\s*)?keywords?"),
        Recognizer::new(Recognized::Comment, r"^\s*#", RecognizerScope::Anywhere),
        Recognizer::new(Recognized::Continuation, r"^\s*\.\.\.+", RecognizerScope::Anywhere),
        Recognizer::new(Recognized::Continuation, r"^\s*\\\s*$", RecognizerScope::Anywhere)
            .until(v3),
        setting(S::Library, "library"),
        setting(S::Resource, "resource"),
        setting(S::Variables, "variables"),
        setting(S::Documentation, "documentation"),
        setting(S::Metadata, "metadata"),
        setting(S::SuiteSetup, r"suite\s*setup"),
        setting(S::SuiteSetup, r"suite\s*precondition").until(v3),
        setting(S::SuiteTeardown, r"suite\s*teardown"),
        setting(S::SuiteTeardown, r"suite\s*postcondition").until(v3),
        setting(S::ForceTags, r"force\s*tags"),
        setting(S::DefaultTags, r"default\s*tags"),
        setting(S::TestSetup, r"test\s*setup"),
        setting(S::TestSetup, r"test\s*precondition").until(v3),
        setting(S::TestTeardown, r"test\s*teardown"),
        setting(S::TestTeardown, r"test\s*postcondition").until(v3),
        setting(S::TestTemplate, r"test\s*template"),
        setting(S::TestTimeout, r"test\s*timeout"),
        Recognizer::new(
            Recognized::OldMetadata,
            r"(?i)^\s*meta\s*:\s*\S.*",
            RecognizerScope::Table(TableType::Settings),
        )
        .until(v3),
        local(L::Documentation, "documentation"),
        local(L::Tags, "tags"),
        local(L::Setup, "setup"),
        local(L::Setup, "precondition").until(v3),
        local(L::Teardown, "teardown"),
        local(L::Teardown, "postcondition").until(v3),
        local(L::Template, "template"),
        local(L::Timeout, "timeout"),
        local(L::Arguments, "arguments"),
        local(L::Return, "return"),
        Recognizer::new(
            Recognized::LocalSetting(L::Unknown),
            r"^\s*\[.*\]",
            RecognizerScope::Executables,
        ),
    ]
});

/// All recognizers in priority order.
pub fn recognizers() -> &'static [Recognizer] {
    &RECOGNIZERS
}

/// Classify `text` with the first applicable recognizer that matches.
///
/// `table` is the table the parser is currently in, if any.
pub fn recognize(
    text: &str,
    table: Option<TableType>,
    version: GrammarVersion,
) -> Option<Recognition> {
    let trimmed_len = text.trim_end().len();
    RECOGNIZERS
        .iter()
        .filter(|r| r.scope.admits(table) && r.is_applicable_for(version))
        .find_map(|r| {
            r.match_prefix(text).map(|matched_len| Recognition {
                produced: r.produced,
                matched_len,
                exact: matched_len >= trimmed_len,
            })
        })
}
