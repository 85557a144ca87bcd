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

//! Mapper trait and the registry that routes cells to mappers.
//!
//! For every cell exactly one mapper must apply: primary mappers are asked
//! first, fallback mappers only when no primary applies. Anything else is a
//! defect in the mapper set, reported loudly in debug builds and degraded to
//! an `UNKNOWN` token plus an ERROR message otherwise.

use super::context::{CellInfo, ParsingContext};
use super::state::ParsingState;
use super::{executables, fallback, headers, settings, variables};
use crate::lex::{ExecutableKind, RobotToken, TokenType};
use crate::version::GrammarVersion;
use once_cell::sync::Lazy;
use tracing::{trace, warn};

/// Turns one cell into a typed token and updates the model.
pub trait ParsingMapper: Send + Sync {
    /// Mapper identifier
    fn id(&self) -> &'static str;

    /// Whether the mapper exists in the given grammar generation.
    fn is_applicable_for(&self, _version: GrammarVersion) -> bool {
        true
    }

    /// Whether the mapper handles this cell in this state.
    fn can_map(&self, cell: &CellInfo, state: Option<ParsingState>, ctx: &ParsingContext) -> bool;

    /// Type the token, record it in the model and update the state stack.
    fn map(&self, token: RobotToken, cell: &CellInfo, ctx: &mut ParsingContext) -> RobotToken;
}

/// An ordered set of mappers.
pub struct MapperRegistry {
    mappers: Vec<Box<dyn ParsingMapper>>,
    fallbacks: Vec<Box<dyn ParsingMapper>>,
}

impl Default for MapperRegistry {
    fn default() -> Self {
        Self::with_default_mappers()
    }
}

impl std::fmt::Debug for MapperRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapperRegistry")
            .field("mappers", &self.mappers.iter().map(|m| m.id()).collect::<Vec<_>>())
            .field("fallbacks", &self.fallbacks.iter().map(|m| m.id()).collect::<Vec<_>>())
            .finish()
    }
}

static DEFAULT_REGISTRY: Lazy<MapperRegistry> = Lazy::new(MapperRegistry::with_default_mappers);

impl MapperRegistry {
    /// A registry with no mappers.
    pub fn empty() -> Self {
        Self {
            mappers: Vec::new(),
            fallbacks: Vec::new(),
        }
    }

    /// The full mapper set for all tables.
    pub fn with_default_mappers() -> Self {
        let mut registry = Self::empty();
        registry.add(Box::new(headers::TableHeaderColumnMapper));
        registry.add(Box::new(settings::SettingDeclarationMapper));
        registry.add(Box::new(settings::OldMetadataDeclarationMapper));
        registry.add(Box::new(settings::SettingValueMapper));
        registry.add(Box::new(variables::VariableDeclarationMapper));
        registry.add(Box::new(variables::VariableValueMapper));
        for kind in [ExecutableKind::TestCase, ExecutableKind::Keyword] {
            registry.add(Box::new(executables::ExecutableNameMapper(kind)));
            registry.add(Box::new(executables::LocalSettingMapper(kind)));
            registry.add(Box::new(executables::LocalSettingValueMapper(kind)));
            registry.add(Box::new(executables::ActionMapper(kind)));
            registry.add(Box::new(executables::ActionArgumentMapper(kind)));
        }
        registry.add_fallback(Box::new(fallback::SettingUnknownMapper));
        registry.add_fallback(Box::new(fallback::ExecutableOutsideMapper));
        registry.add_fallback(Box::new(fallback::TrashMapper));
        registry
    }

    /// The shared default registry.
    pub fn shared() -> &'static MapperRegistry {
        &DEFAULT_REGISTRY
    }

    pub fn add(&mut self, mapper: Box<dyn ParsingMapper>) {
        self.mappers.push(mapper);
    }

    pub fn add_fallback(&mut self, mapper: Box<dyn ParsingMapper>) {
        self.fallbacks.push(mapper);
    }

    fn applicable<'a>(
        mappers: &'a [Box<dyn ParsingMapper>],
        cell: &CellInfo,
        state: Option<ParsingState>,
        ctx: &ParsingContext,
    ) -> Vec<&'a dyn ParsingMapper> {
        mappers
            .iter()
            .filter(|m| m.is_applicable_for(ctx.version) && m.can_map(cell, state, ctx))
            .map(|m| m.as_ref())
            .collect()
    }

    /// Ids of the primary mappers that accept the cell.
    pub fn primary_ids(&self, cell: &CellInfo, state: Option<ParsingState>, ctx: &ParsingContext) -> Vec<&'static str> {
        Self::applicable(&self.mappers, cell, state, ctx)
            .iter()
            .map(|m| m.id())
            .collect()
    }

    /// Ids of the fallback mappers that accept the cell.
    pub fn fallback_ids(&self, cell: &CellInfo, state: Option<ParsingState>, ctx: &ParsingContext) -> Vec<&'static str> {
        Self::applicable(&self.fallbacks, cell, state, ctx)
            .iter()
            .map(|m| m.id())
            .collect()
    }

    /// Route the cell to its mapper.
    pub fn map(&self, token: RobotToken, cell: &CellInfo, ctx: &mut ParsingContext) -> RobotToken {
        let state = ctx.top();
        let mut candidates = Self::applicable(&self.mappers, cell, state, ctx);
        if candidates.is_empty() {
            candidates = Self::applicable(&self.fallbacks, cell, state, ctx);
        }

        if let [mapper] = candidates.as_slice() {
            trace!(mapper = mapper.id(), ?state, text = token.text(), "mapping cell");
            return mapper.map(token, cell, ctx);
        }

        let ids: Vec<&str> = candidates.iter().map(|m| m.id()).collect();
        warn!(?state, ?ids, text = token.text(), "mapper registry invariant violated");
        debug_assert!(
            candidates.len() == 1,
            "expected exactly one mapper for '{}' in {:?}, found {:?}",
            token.text(),
            state,
            ids
        );
        let message = if ids.is_empty() {
            format!("No mapper found for '{}' in state {:?}.", token.text(), state)
        } else {
            format!(
                "Ambiguous mappers {:?} for '{}' in state {:?}.",
                ids,
                token.text(),
                state
            )
        };
        ctx.error(message, token.position());
        let mut token = token;
        token.set_primary_type(TokenType::Unknown);
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lex::{FilePosition, Recognition, Recognized, TableType};

    struct Always(&'static str);

    impl ParsingMapper for Always {
        fn id(&self) -> &'static str {
            self.0
        }
        fn can_map(&self, _: &CellInfo, _: Option<ParsingState>, _: &ParsingContext) -> bool {
            true
        }
        fn map(&self, mut token: RobotToken, _: &CellInfo, _: &mut ParsingContext) -> RobotToken {
            token.set_primary_type(TokenType::VariableValue);
            token
        }
    }

    struct OnlyBefore3;

    impl ParsingMapper for OnlyBefore3 {
        fn id(&self) -> &'static str {
            "only-before-3"
        }
        fn is_applicable_for(&self, version: GrammarVersion) -> bool {
            version < GrammarVersion::V3_0
        }
        fn can_map(&self, _: &CellInfo, _: Option<ParsingState>, _: &ParsingContext) -> bool {
            true
        }
        fn map(&self, token: RobotToken, _: &CellInfo, _: &mut ParsingContext) -> RobotToken {
            token
        }
    }

    fn cell() -> CellInfo {
        CellInfo {
            column: 0,
            first_in_line: true,
            recognition: None,
        }
    }

    fn token() -> RobotToken {
        RobotToken::new("x", FilePosition::start(), TokenType::Unknown)
    }

    #[test]
    fn test_single_mapper_is_used() {
        let mut registry = MapperRegistry::empty();
        registry.add(Box::new(Always("a")));
        let mut ctx = ParsingContext::new(GrammarVersion::V3_0, None);
        let mapped = registry.map(token(), &cell(), &mut ctx);
        assert_eq!(mapped.primary_type(), TokenType::VariableValue);
        assert!(ctx.messages.is_empty());
    }

    #[test]
    fn test_fallback_only_when_no_primary() {
        let mut registry = MapperRegistry::empty();
        registry.add(Box::new(OnlyBefore3));
        registry.add_fallback(Box::new(Always("fallback")));
        let ctx_new = ParsingContext::new(GrammarVersion::V3_0, None);
        assert!(registry.primary_ids(&cell(), None, &ctx_new).is_empty());
        assert_eq!(registry.fallback_ids(&cell(), None, &ctx_new), vec!["fallback"]);

        let ctx_old = ParsingContext::new(GrammarVersion::new(2, 9), None);
        assert_eq!(registry.primary_ids(&cell(), None, &ctx_old), vec!["only-before-3"]);
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn test_ambiguity_degrades_to_unknown() {
        let mut registry = MapperRegistry::empty();
        registry.add(Box::new(Always("a")));
        registry.add(Box::new(Always("b")));
        let mut ctx = ParsingContext::new(GrammarVersion::V3_0, None);
        let mapped = registry.map(token(), &cell(), &mut ctx);
        assert_eq!(mapped.primary_type(), TokenType::Unknown);
        assert!(ctx.messages[0].message().contains("Ambiguous"));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "expected exactly one mapper")]
    fn test_ambiguity_panics_in_debug() {
        let mut registry = MapperRegistry::empty();
        registry.add(Box::new(Always("a")));
        registry.add(Box::new(Always("b")));
        let mut ctx = ParsingContext::new(GrammarVersion::V3_0, None);
        registry.map(token(), &cell(), &mut ctx);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "expected exactly one mapper")]
    fn test_missing_mapper_panics_in_debug() {
        let registry = MapperRegistry::empty();
        let mut ctx = ParsingContext::new(GrammarVersion::V3_0, None);
        registry.map(token(), &cell(), &mut ctx);
    }

    // ==================== Determinism tests ====================

    fn recognitions() -> Vec<Option<Recognition>> {
        use crate::lex::{LocalSettingKind, SettingKind};
        let mut all = vec![None];
        let produced = [
            Recognized::TableHeader(TableType::Settings),
            Recognized::Comment,
            Recognized::Continuation,
            Recognized::SettingDeclaration(SettingKind::Library),
            Recognized::SettingDeclaration(SettingKind::TestTemplate),
            Recognized::OldMetadata,
            Recognized::LocalSetting(LocalSettingKind::Setup),
            Recognized::LocalSetting(LocalSettingKind::Arguments),
            Recognized::LocalSetting(LocalSettingKind::Unknown),
        ];
        for p in produced {
            for exact in [true, false] {
                all.push(Some(Recognition {
                    produced: p,
                    matched_len: 1,
                    exact,
                }));
            }
        }
        all
    }

    #[test]
    fn test_exactly_one_mapper_for_every_state() {
        let registry = MapperRegistry::shared();
        for version in [GrammarVersion::new(2, 9), GrammarVersion::V3_0, GrammarVersion::new(3, 1)] {
            for state in ParsingState::all() {
                if state == ParsingState::Comment {
                    continue;
                }
                for recognition in recognitions() {
                    for column in [0, 1, 3] {
                        for with_action in [false, true] {
                            let ctx = executables::tests::context_with_row(version, with_action);
                            let cell = CellInfo {
                                column,
                                first_in_line: column == 0,
                                recognition,
                            };
                            let primary = registry.primary_ids(&cell, Some(state), &ctx);
                            let fallback = registry.fallback_ids(&cell, Some(state), &ctx);
                            assert!(
                                primary.len() <= 1 && fallback.len() <= 1,
                                "ambiguous in {:?} v{} col {} {:?}: {:?} / {:?}",
                                state,
                                version,
                                column,
                                recognition,
                                primary,
                                fallback
                            );
                            assert!(
                                primary.len() + fallback.len() >= 1,
                                "no mapper in {:?} v{} col {} {:?}",
                                state,
                                version,
                                column,
                                recognition
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_empty_stack_has_a_mapper() {
        let registry = MapperRegistry::shared();
        let ctx = ParsingContext::new(GrammarVersion::V3_0, None);
        assert_eq!(registry.fallback_ids(&cell(), None, &ctx), vec!["trash"]);
        assert!(registry.primary_ids(&cell(), None, &ctx).is_empty());
    }
}
