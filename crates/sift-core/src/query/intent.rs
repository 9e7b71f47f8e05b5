use crate::query::{
    Conjunction, OrderDirection, Predicate, Projection, QueryBuilder, QueryError, SoftDeleteScope,
    model::EntityModel,
};

///
/// Query
///
/// Reference query intent over one `EntityModel`.
/// Records what directives asked for; execution lives in `eval`.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    model: EntityModel,
    projection: Option<Projection>,
    predicate: Option<Predicate>,
    order: Vec<(String, OrderDirection)>,
    relations: Vec<String>,
    limit: Option<u32>,
    offset: u32,
    scope: SoftDeleteScope,
}

impl Query {
    #[must_use]
    pub const fn new(model: EntityModel) -> Self {
        Self {
            model,
            projection: None,
            predicate: None,
            order: Vec::new(),
            relations: Vec::new(),
            limit: None,
            offset: 0,
            scope: SoftDeleteScope::WithoutTrashed,
        }
    }

    #[must_use]
    pub const fn model(&self) -> &EntityModel {
        &self.model
    }

    /// Selected projection; `None` means nothing was selected yet.
    #[must_use]
    pub const fn projection(&self) -> Option<&Projection> {
        self.projection.as_ref()
    }

    #[must_use]
    pub const fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }

    #[must_use]
    pub fn order(&self) -> &[(String, OrderDirection)] {
        &self.order
    }

    #[must_use]
    pub fn relations(&self) -> &[String] {
        &self.relations
    }

    #[must_use]
    pub const fn limit_value(&self) -> Option<u32> {
        self.limit
    }

    #[must_use]
    pub const fn offset_value(&self) -> u32 {
        self.offset
    }

    #[must_use]
    pub const fn scope(&self) -> SoftDeleteScope {
        self.scope
    }

    /// True if nothing beyond the default projection has been requested.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.predicate.is_none()
            && self.order.is_empty()
            && self.relations.is_empty()
            && self.limit.is_none()
            && self.offset == 0
            && self.scope == SoftDeleteScope::WithoutTrashed
    }
}

impl QueryBuilder for Query {
    fn filter(
        &mut self,
        conjunction: Conjunction,
        predicate: Predicate,
    ) -> Result<(), QueryError> {
        self.predicate = Some(Predicate::join(
            self.predicate.take(),
            conjunction,
            predicate,
        ));

        Ok(())
    }

    fn order_by(&mut self, field: &str, direction: OrderDirection) -> Result<(), QueryError> {
        self.order.push((field.to_string(), direction));

        Ok(())
    }

    // Column lists accumulate; anything else replaces the projection.
    fn select(&mut self, projection: Projection) -> Result<(), QueryError> {
        self.projection = match (self.projection.take(), projection) {
            (Some(Projection::Columns(mut existing)), Projection::Columns(columns)) => {
                for column in columns {
                    if !existing.contains(&column) {
                        existing.push(column);
                    }
                }
                Some(Projection::Columns(existing))
            }
            (_, projection) => Some(projection),
        };

        Ok(())
    }

    fn limit(&mut self, limit: u32) -> Result<(), QueryError> {
        self.limit = Some(limit);

        Ok(())
    }

    fn offset(&mut self, offset: u32) -> Result<(), QueryError> {
        self.offset = offset;

        Ok(())
    }

    fn with_relation(&mut self, relation: &str) -> Result<(), QueryError> {
        if !self.model.has_relation(relation) {
            return Err(QueryError::UnknownRelation {
                entity: self.model.name.to_string(),
                relation: relation.to_string(),
            });
        }

        if !self.relations.iter().any(|r| r == relation) {
            self.relations.push(relation.to_string());
        }

        Ok(())
    }

    fn soft_delete_scope(&mut self, scope: SoftDeleteScope) -> Result<(), QueryError> {
        if !self.model.supports_soft_delete() {
            return Err(QueryError::SoftDeleteUnsupported {
                entity: self.model.name.to_string(),
            });
        }

        self.scope = scope;

        Ok(())
    }
}
