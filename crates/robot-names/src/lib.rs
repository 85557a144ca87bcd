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

//! Keyword name matching for Robot Framework test data.
//!
//! Deciding whether a call like `Given MyLib.login Bob To Prod` refers to the
//! definition `Login ${user} to ${system}` takes several independent checks:
//!
//! - [`unify`]: case, space and underscore insensitive comparison
//! - [`qualified`]: optional `Source.` qualifiers on calls
//! - [`gherkin`]: leading `Given`/`When`/`And`/`But`/`Then` words
//! - [`embedded`]: `${arg}` placeholders compiled to patterns
//! - [`camel_case`]: `OpBr`-style abbreviations for completion
//!
//! [`KeywordIndex`] combines them into call resolution.
//!
//! # Example
//!
//! ```
//! use robot_names::KeywordIndex;
//!
//! let mut index = KeywordIndex::new();
//! index.add("Login ${user} to ${system}", "auth.robot");
//! index.add("Open Browser", "SeleniumLibrary");
//!
//! assert_eq!(index.resolve_unique("Given open_browser").unwrap().source, "SeleniumLibrary");
//! assert!(index.resolve_unique("When login bob to prod").is_some());
//! ```

pub mod camel_case;
pub mod embedded;
pub mod gherkin;
mod index;
pub mod qualified;
pub mod unify;

pub use embedded::{
    compile_embedded_pattern, find_embedded_argument_ranges, has_embedded_arguments,
    matches_ignore_case, starts_with_ignore_case,
};
pub use gherkin::{first_gherkin_match, text_after_gherkin_prefix_if_exists};
pub use index::{KeywordDefinition, KeywordIndex};
pub use qualified::QualifiedKeywordName;
pub use unify::{names_equal, unify_definition};
