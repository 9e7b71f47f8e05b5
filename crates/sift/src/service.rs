//! Module: service
//! Responsibility: a configured compiler plus pagination request helpers.

use crate::{
    config::{ConfigError, PaginationConfig, SiftConfig},
    error::Error,
};
use sift_core::{
    compiler::{CompiledQuery, Compiler},
    decode::{RawParams, ReservedKeys, parse_query_string},
    query::Queryable,
    registry::DirectiveRegistry,
};

/// Value of the paginate flag that turns pagination off.
pub const PAGINATE_OFF: &str = "no";

///
/// Sift
///
/// Owns the directive table and reserved keys for one host. Immutable after
/// construction, so one instance can serve concurrent requests.
///

#[derive(Clone, Debug)]
pub struct Sift {
    registry: DirectiveRegistry,
    reserved: ReservedKeys,
    default_per_page: u64,
}

impl Sift {
    /// Built-in directives minus those the config disables.
    pub fn from_config(config: &SiftConfig) -> Result<Self, ConfigError> {
        Self::from_parts(config, DirectiveRegistry::with_builtins())
    }

    /// Host-supplied directive table, restricted by the config.
    pub fn from_parts(
        config: &SiftConfig,
        mut registry: DirectiveRegistry,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        config.restrict(&mut registry)?;

        tracing::debug!(
            directives = registry.len(),
            disabled = ?config.directives.disabled,
            "configured directive registry"
        );

        Ok(Self::assemble(config, registry))
    }

    fn assemble(config: &SiftConfig, registry: DirectiveRegistry) -> Self {
        Self {
            registry,
            reserved: config.reserved.keys(),
            default_per_page: config.pagination.default_per_page,
        }
    }

    #[must_use]
    pub const fn registry(&self) -> &DirectiveRegistry {
        &self.registry
    }

    #[must_use]
    pub const fn reserved(&self) -> &ReservedKeys {
        &self.reserved
    }

    #[must_use]
    pub fn compiler(&self) -> Compiler<'_> {
        Compiler::new(&self.registry).with_reserved(self.reserved.clone())
    }

    /// Compile request parameters against `entity`.
    pub fn compile<E: Queryable>(
        &self,
        params: &RawParams,
        entity: &E,
    ) -> Result<CompiledQuery<E::Query>, Error> {
        self.compiler().compile(params, entity).map_err(Error::from)
    }

    /// Decode a raw query string, then compile it.
    pub fn compile_query_string<E: Queryable>(
        &self,
        query: &str,
        entity: &E,
    ) -> Result<CompiledQuery<E::Query>, Error> {
        self.compile(&parse_query_string(query), entity)
    }

    /// Page number and size requested by `params`.
    ///
    /// `total` is the row count used as the page size when the paginate flag
    /// is `no`. Unusable numbers fall back to the defaults.
    #[must_use]
    pub fn page_request(&self, params: &RawParams, total: u64) -> PageRequest {
        let per_page = match params.first(self.reserved.per_page()) {
            Some(raw) => positive(raw).unwrap_or_else(|| {
                tracing::debug!(raw = %raw, "ignoring unusable page size");
                self.default_per_page
            }),
            None if params.first(self.reserved.paginate()) == Some(PAGINATE_OFF) => total.max(1),
            None => self.default_per_page,
        };

        let page = params
            .first(self.reserved.page())
            .and_then(positive)
            .unwrap_or(1);

        PageRequest { page, per_page }
    }
}

impl Default for Sift {
    fn default() -> Self {
        Self::assemble(&SiftConfig::default(), DirectiveRegistry::with_builtins())
    }
}

fn positive(raw: &str) -> Option<u64> {
    raw.trim().parse().ok().filter(|n| *n > 0)
}

///
/// PageRequest
///
/// One-based page number and page size.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl PageRequest {
    /// Rows to skip before this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: PaginationConfig::DEFAULT_PER_PAGE,
        }
    }
}

///
/// TESTS
///
