use crate::{
    decode::RawParams,
    query::{
        Conjunction, OrderDirection, Predicate, Projection, QueryBuilder, QueryError, Queryable,
        SoftDeleteScope, eval::Record, model::EntityModel, value::Value,
    },
};

///
/// Entity models
///

pub(crate) const USERS: EntityModel = EntityModel::new("User", "users")
    .with_soft_delete("deleted_at")
    .with_relations(&["posts"]);

pub(crate) const POSTS: EntityModel = EntityModel::new("Post", "posts");

///
/// Rows
///

pub(crate) fn record(fields: &[(&str, Value)]) -> Record {
    fields
        .iter()
        .map(|(name, value)| ((*name).to_string(), value.clone()))
        .collect()
}

/// Five users; ids 2 and 4 are soft-deleted.
pub(crate) fn user_rows() -> Vec<Record> {
    let user = |id: i64, name: &str, age: i64, deleted: bool| {
        record(&[
            ("id", Value::Int(id)),
            ("name", Value::from(name)),
            ("email", Value::Text(format!("{name}@example.com"))),
            ("age", Value::Int(age)),
            (
                "deleted_at",
                if deleted {
                    Value::from("2024-01-01 00:00:00")
                } else {
                    Value::Null
                },
            ),
        ])
    };

    vec![
        user(1, "ada", 36, false),
        user(2, "bob", 17, true),
        user(3, "cyd", 52, false),
        user(4, "dee", 13, true),
        user(5, "eve", 29, false),
    ]
}

pub(crate) fn params(pairs: &[(&str, &str)]) -> RawParams {
    RawParams::from_pairs(pairs.iter().copied())
}

///
/// RecordingQuery
///
/// Query builder that logs every call in order; used to observe
/// execution order without interpreting the fragments.
///

#[derive(Debug, Default)]
pub(crate) struct RecordingQuery {
    pub(crate) soft_delete: bool,
    pub(crate) columns_only: bool,
    pub(crate) calls: Vec<String>,
}

impl QueryBuilder for RecordingQuery {
    fn filter(
        &mut self,
        conjunction: Conjunction,
        predicate: Predicate,
    ) -> Result<(), QueryError> {
        let field = match &predicate {
            Predicate::Compare { field, .. }
            | Predicate::In { field, .. }
            | Predicate::Between { field, .. }
            | Predicate::IsNull { field, .. } => field.clone(),
            Predicate::And(_) | Predicate::Or(_) => "*".to_string(),
        };
        self.calls.push(format!("filter:{conjunction:?}:{field}"));

        Ok(())
    }

    fn order_by(&mut self, field: &str, direction: OrderDirection) -> Result<(), QueryError> {
        self.calls.push(format!("order_by:{field}:{direction:?}"));

        Ok(())
    }

    fn select(&mut self, projection: Projection) -> Result<(), QueryError> {
        let label = match projection {
            Projection::AllOf(_) if self.columns_only => {
                return Err(QueryError::Unsupported {
                    operation: "whole-table projection",
                });
            }
            Projection::AllOf(table) => format!("{table}.*"),
            Projection::Columns(columns) => columns.join(","),
        };
        self.calls.push(format!("select:{label}"));

        Ok(())
    }

    fn limit(&mut self, limit: u32) -> Result<(), QueryError> {
        self.calls.push(format!("limit:{limit}"));

        Ok(())
    }

    fn offset(&mut self, offset: u32) -> Result<(), QueryError> {
        self.calls.push(format!("offset:{offset}"));

        Ok(())
    }

    fn soft_delete_scope(&mut self, scope: SoftDeleteScope) -> Result<(), QueryError> {
        if !self.soft_delete {
            return Err(QueryError::SoftDeleteUnsupported {
                entity: "Recording".to_string(),
            });
        }
        self.calls.push(format!("scope:{}", scope.as_str()));

        Ok(())
    }
}

///
/// RecordingEntity
///

#[derive(Default)]
pub(crate) struct RecordingEntity {
    pub(crate) soft_delete: bool,
    /// Refuse `AllOf` projections, as a store without `SELECT *` would.
    pub(crate) columns_only: bool,
}

impl Queryable for RecordingEntity {
    type Query = RecordingQuery;

    fn table(&self) -> &str {
        "recording"
    }

    fn query(&self) -> Self::Query {
        RecordingQuery {
            soft_delete: self.soft_delete,
            columns_only: self.columns_only,
            calls: Vec::new(),
        }
    }
}
