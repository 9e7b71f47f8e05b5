use crate::query::{Queryable, intent::Query};

///
/// EntityModel
///
/// Minimal runtime description of one queryable entity.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EntityModel {
    /// Stable external name used in diagnostics.
    pub name: &'static str,
    /// Backing table; also the default projection target.
    pub table: &'static str,
    /// Deletion timestamp column, when the entity soft-deletes.
    pub soft_delete: Option<&'static str>,
    /// Relations that may be eagerly included.
    pub relations: &'static [&'static str],
}

impl EntityModel {
    #[must_use]
    pub const fn new(name: &'static str, table: &'static str) -> Self {
        Self {
            name,
            table,
            soft_delete: None,
            relations: &[],
        }
    }

    #[must_use]
    pub const fn with_soft_delete(mut self, column: &'static str) -> Self {
        self.soft_delete = Some(column);
        self
    }

    #[must_use]
    pub const fn with_relations(mut self, relations: &'static [&'static str]) -> Self {
        self.relations = relations;
        self
    }

    #[must_use]
    pub const fn supports_soft_delete(&self) -> bool {
        self.soft_delete.is_some()
    }

    #[must_use]
    pub fn has_relation(&self, relation: &str) -> bool {
        self.relations.contains(&relation)
    }
}

impl Queryable for EntityModel {
    type Query = Query;

    fn table(&self) -> &str {
        self.table
    }

    fn query(&self) -> Self::Query {
        Query::new(*self)
    }
}
