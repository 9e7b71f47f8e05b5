//! Module: compiler
//! Responsibility: sequence decode → resolve/tokenize → reorder → apply.
//! Does not own: directive semantics (directive) or name lookup (registry).
//!
//! The phases are separate types so they can only run in order:
//! `Compiler::decode` yields a `DecodedRequest`, `resolve` yields a `Plan`,
//! and `Plan::apply` consumes the plan into a `CompiledQuery`.


use crate::{
    COLUMNS_DIRECTIVE, FORCE_DIRECTIVE, LIMIT_DIRECTIVE,
    decode::{self, RawParams, ReservedKeys},
    directive::Directive,
    error::CompileError,
    query::{QueryBuilder, Queryable},
    registry::{self, DirectiveRegistry},
};
use std::fmt;

///
/// Compiler
///
/// Per-request entry point. Holds a read-only registry reference and the
/// reserved transport keys fixed before decoding begins.
///

#[derive(Clone, Debug)]
pub struct Compiler<'r> {
    registry: &'r DirectiveRegistry,
    reserved: ReservedKeys,
}

impl<'r> Compiler<'r> {
    #[must_use]
    pub fn new(registry: &'r DirectiveRegistry) -> Self {
        Self {
            registry,
            reserved: ReservedKeys::default(),
        }
    }

    #[must_use]
    pub fn with_reserved(mut self, reserved: ReservedKeys) -> Self {
        self.reserved = reserved;
        self
    }

    #[must_use]
    pub const fn reserved(&self) -> &ReservedKeys {
        &self.reserved
    }

    /// Phase 1: drop reserved keys and fix the resolution order.
    #[must_use]
    pub fn decode(&self, params: &RawParams) -> DecodedRequest<'r> {
        DecodedRequest {
            registry: self.registry,
            params: decode::decode(params, &self.reserved),
        }
    }

    /// Run every phase against `entity`.
    pub fn compile<E: Queryable>(
        &self,
        params: &RawParams,
        entity: &E,
    ) -> Result<CompiledQuery<E::Query>, CompileError> {
        let result = self
            .decode(params)
            .resolve()
            .and_then(|plan| plan.apply(entity));

        if let Err(err) = &result {
            tracing::debug!(
                directive = err.directive().unwrap_or_default(),
                error = %err,
                "compilation rejected"
            );
        }

        result
    }
}

impl Default for Compiler<'static> {
    fn default() -> Self {
        Self::new(registry::global())
    }
}

///
/// compile
///
/// Compile `params` against `entity` with the process-wide registry and
/// the default reserved keys.
///
pub fn compile<E: Queryable>(
    params: &RawParams,
    entity: &E,
) -> Result<CompiledQuery<E::Query>, CompileError> {
    Compiler::default().compile(params, entity)
}

///
/// DecodedRequest
///
/// Directive arguments awaiting resolution, in first-seen order.
///

#[derive(Clone, Debug)]
pub struct DecodedRequest<'r> {
    registry: &'r DirectiveRegistry,
    params: RawParams,
}

impl DecodedRequest<'_> {
    #[must_use]
    pub const fn params(&self) -> &RawParams {
        &self.params
    }

    /// Phase 2: resolve a fresh handler per argument and tokenize it.
    ///
    /// Multi-valued parameters yield one handler per value, appended in
    /// arrival order. `force` handlers are then moved to the end.
    pub fn resolve(self) -> Result<Plan, CompileError> {
        let mut entries = Vec::new();

        for (name, value) in self.params {
            for raw in value.values() {
                let mut handler = self.registry.resolve(&name)?;
                handler
                    .tokenize(raw)
                    .map_err(|source| CompileError::malformed(&name, raw, source))?;

                tracing::debug!(directive = %name, raw = %raw, "resolved directive");

                entries.push(PlannedDirective {
                    name: name.clone(),
                    raw: raw.clone(),
                    handler,
                });
            }
        }

        Ok(Plan {
            entries: force_last(entries, |entry| entry.name == FORCE_DIRECTIVE),
        })
    }
}

///
/// force_last
///
/// Stable partition that moves every element matching `is_force` to the
/// end. Both halves keep their relative order.
///
/// This is the only positional rule in the pipeline: `force` must run
/// after everything else so its scope cannot be overridden.
///
pub fn force_last<T>(entries: Vec<T>, is_force: impl Fn(&T) -> bool) -> Vec<T> {
    let (mut ordered, forced): (Vec<T>, Vec<T>) =
        entries.into_iter().partition(|entry| !is_force(entry));

    if !forced.is_empty() {
        tracing::debug!(forced = forced.len(), "moved force directives to the end");
    }

    ordered.extend(forced);
    ordered
}

///
/// PlannedDirective
///
/// One resolved, tokenized handler and the argument it came from.
///

pub struct PlannedDirective {
    name: String,
    raw: String,
    handler: Box<dyn Directive>,
}

impl PlannedDirective {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn tokens(&self) -> &[String] {
        self.handler.tokens()
    }

    fn summary(&self) -> DirectiveSummary {
        DirectiveSummary {
            name: self.name.clone(),
            raw: self.raw.clone(),
            tokens: self.handler.tokens().to_vec(),
        }
    }
}

impl fmt::Debug for PlannedDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlannedDirective")
            .field("name", &self.name)
            .field("raw", &self.raw)
            .field("handler", &self.handler)
            .finish()
    }
}

///
/// Plan
///
/// Handlers in final execution order. Single use: `apply` consumes it.
///

#[derive(Debug)]
pub struct Plan {
    entries: Vec<PlannedDirective>,
}

impl Plan {
    #[must_use]
    pub fn entries(&self) -> &[PlannedDirective] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Directive names in execution order, one per handler.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(PlannedDirective::name)
    }

    #[must_use]
    pub fn has_directive(&self, name: &str) -> bool {
        self.names().any(|n| n == name)
    }

    /// First token of the first `name` handler as an integer; 0 when absent.
    #[must_use]
    pub fn first_argument_of(&self, name: &str) -> u64 {
        first_integer(
            self.entries
                .iter()
                .map(|entry| (entry.name(), entry.tokens())),
            name,
        )
    }

    /// Phase 3: fold every handler, in order, over a fresh query.
    ///
    /// The entity's default projection is selected first unless a
    /// `columns` directive is planned. The first failure aborts.
    pub fn apply<E: Queryable>(self, entity: &E) -> Result<CompiledQuery<E::Query>, CompileError> {
        let mut query = entity.query();

        if !self.has_directive(COLUMNS_DIRECTIVE) {
            query
                .select(entity.default_projection())
                .map_err(|source| CompileError::DefaultProjection {
                    table: entity.table().to_string(),
                    source,
                })?;
        }

        for entry in &self.entries {
            tracing::trace!(directive = %entry.name, tokens = ?entry.tokens(), "applying directive");

            entry
                .handler
                .apply(&mut query)
                .map_err(|source| CompileError::unsupported(&entry.name, source))?;
        }

        let directives = self.entries.iter().map(PlannedDirective::summary).collect();

        Ok(CompiledQuery { query, directives })
    }
}

///
/// DirectiveSummary
///
/// Read-only record of one applied handler.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DirectiveSummary {
    pub name: String,
    pub raw: String,
    pub tokens: Vec<String>,
}

///
/// CompiledQuery
///
/// The built query plus what was applied to it.
///

#[derive(Clone, Debug)]
pub struct CompiledQuery<Q> {
    query: Q,
    directives: Vec<DirectiveSummary>,
}

impl<Q> CompiledQuery<Q> {
    #[must_use]
    pub const fn query(&self) -> &Q {
        &self.query
    }

    #[must_use]
    pub fn into_query(self) -> Q {
        self.query
    }

    /// Applied directives in execution order.
    #[must_use]
    pub fn directives(&self) -> &[DirectiveSummary] {
        &self.directives
    }

    #[must_use]
    pub fn has_directive(&self, name: &str) -> bool {
        self.directives.iter().any(|d| d.name == name)
    }

    /// First token of the first `name` directive as an integer; 0 when absent.
    #[must_use]
    pub fn first_argument_of(&self, name: &str) -> u64 {
        first_integer(
            self.directives
                .iter()
                .map(|d| (d.name.as_str(), d.tokens.as_slice())),
            name,
        )
    }

    /// Requested row cap; 0 means no `limit` directive.
    #[must_use]
    pub fn limit(&self) -> u64 {
        self.first_argument_of(LIMIT_DIRECTIVE)
    }
}

fn first_integer<'a>(
    mut entries: impl Iterator<Item = (&'a str, &'a [String])>,
    name: &str,
) -> u64 {
    entries
        .find(|(n, _)| *n == name)
        .and_then(|(_, tokens)| tokens.first())
        .and_then(|token| token.parse().ok())
        .unwrap_or(0)
}
