//! Module: registry
//! Responsibility: directive name → handler factory resolution.
//! Boundary: populated at startup, read-only while requests compile.


use crate::{
    directive::{
        Directive,
        filter::{Filter, FilterKind},
        force::Force,
        names,
        order::OrderBy,
        projection::{Columns, With},
        scope::{OnlyTrashed, WithTrashed},
        window::{Limit, Offset},
    },
    error::{CompileError, ErrorClass},
    query::Conjunction,
};
use std::{collections::HashMap, fmt, sync::OnceLock};
use thiserror::Error as ThisError;

///
/// DirectiveFactory
///
/// Produces a fresh handler; called once per directive occurrence.
///

pub type DirectiveFactory = fn() -> Box<dyn Directive>;

///
/// RegistryError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum RegistryError {
    #[error("directive '{0}' already registered")]
    AlreadyRegistered(String),

    #[error("directive '{0}' is not registered")]
    NotRegistered(String),

    #[error("process-wide directive registry already installed")]
    AlreadyInstalled,
}

impl RegistryError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::AlreadyRegistered(_) | Self::NotRegistered(_) | Self::AlreadyInstalled => {
                ErrorClass::Internal
            }
        }
    }
}

///
/// DirectiveRegistry
///
/// Explicit name → factory table. Extending the directive language means
/// registering another binding; the compiler never changes.
///

#[derive(Clone, Default)]
pub struct DirectiveRegistry {
    factories: HashMap<String, DirectiveFactory>,
}

impl DirectiveRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in directive.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (name, factory) in builtins() {
            registry.factories.insert(name.to_string(), factory);
        }

        registry
    }

    /// Bind `name` to `factory`.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: DirectiveFactory,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        if self.factories.contains_key(&name) {
            return Err(RegistryError::AlreadyRegistered(name));
        }

        self.factories.insert(name, factory);

        Ok(())
    }

    /// Remove the binding for `name`.
    pub fn unregister(&mut self, name: &str) -> Result<(), RegistryError> {
        self.factories
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| RegistryError::NotRegistered(name.to_string()))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Build a brand-new handler for `name`.
    pub fn resolve(&self, name: &str) -> Result<Box<dyn Directive>, CompileError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| CompileError::unknown_directive(name))?;

        Ok(factory())
    }
}

impl fmt::Debug for DirectiveRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectiveRegistry")
            .field("names", &self.names())
            .finish()
    }
}

// ----------------------------------------------------------------------
// Process-wide registry
// ----------------------------------------------------------------------

static GLOBAL: OnceLock<DirectiveRegistry> = OnceLock::new();

/// Install the process-wide registry.
///
/// Must run before the first call to `global`; the table is immutable
/// afterwards.
pub fn install(registry: DirectiveRegistry) -> Result<(), RegistryError> {
    GLOBAL
        .set(registry)
        .map_err(|_| RegistryError::AlreadyInstalled)
}

/// Process-wide registry; falls back to the built-ins if none was installed.
pub fn global() -> &'static DirectiveRegistry {
    GLOBAL.get_or_init(DirectiveRegistry::with_builtins)
}

// ----------------------------------------------------------------------
// Built-in bindings
// ----------------------------------------------------------------------

fn builtins() -> [(&'static str, DirectiveFactory); 20] {
    [
        (names::WITH_TRASHED, || Box::new(WithTrashed::default())),
        (names::ONLY_TRASHED, || Box::new(OnlyTrashed::default())),
        (names::FORCE, || Box::new(Force::default())),
        (names::WHERE, || {
            Box::new(Filter::new(Conjunction::And, FilterKind::Compare))
        }),
        (names::OR_WHERE, || {
            Box::new(Filter::new(Conjunction::Or, FilterKind::Compare))
        }),
        (names::WHERE_IN, || {
            Box::new(Filter::new(
                Conjunction::And,
                FilterKind::In { negated: false },
            ))
        }),
        (names::WHERE_NOT_IN, || {
            Box::new(Filter::new(
                Conjunction::And,
                FilterKind::In { negated: true },
            ))
        }),
        (names::OR_WHERE_IN, || {
            Box::new(Filter::new(
                Conjunction::Or,
                FilterKind::In { negated: false },
            ))
        }),
        (names::OR_WHERE_NOT_IN, || {
            Box::new(Filter::new(
                Conjunction::Or,
                FilterKind::In { negated: true },
            ))
        }),
        (names::WHERE_BETWEEN, || {
            Box::new(Filter::new(
                Conjunction::And,
                FilterKind::Between { negated: false },
            ))
        }),
        (names::WHERE_NOT_BETWEEN, || {
            Box::new(Filter::new(
                Conjunction::And,
                FilterKind::Between { negated: true },
            ))
        }),
        (names::OR_WHERE_BETWEEN, || {
            Box::new(Filter::new(
                Conjunction::Or,
                FilterKind::Between { negated: false },
            ))
        }),
        (names::OR_WHERE_NOT_BETWEEN, || {
            Box::new(Filter::new(
                Conjunction::Or,
                FilterKind::Between { negated: true },
            ))
        }),
        (names::WHERE_NULL, || {
            Box::new(Filter::new(
                Conjunction::And,
                FilterKind::Null { negated: false },
            ))
        }),
        (names::WHERE_NOT_NULL, || {
            Box::new(Filter::new(
                Conjunction::And,
                FilterKind::Null { negated: true },
            ))
        }),
        (names::ORDER_BY, || Box::new(OrderBy::default())),
        (names::COLUMNS, || Box::new(Columns::default())),
        (names::WITH, || Box::new(With::default())),
        (names::LIMIT, || Box::new(Limit::default())),
        (names::OFFSET, || Box::new(Offset::default())),
    ]
}
