use crate::query::{
    CompareOp, OrderDirection, Predicate, Projection, SoftDeleteScope, intent::Query,
    value::Value,
};
use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashMap},
};

///
/// Record
///
/// Owned in-memory row keyed by column name.
///

pub type Record = BTreeMap<String, Value>;

///
/// Row
///
/// Abstraction over a row-like value that can expose fields by name.
/// This decouples predicate evaluation from concrete storage types.
///

pub trait Row {
    fn field(&self, name: &str) -> Option<&Value>;
}

impl Row for BTreeMap<String, Value> {
    fn field(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl Row for HashMap<String, Value> {
    fn field(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

///
/// Evaluate a predicate against a single row.
///
/// Missing fields and incomparable values evaluate to `false`,
/// except under `IsNull` where a missing field counts as null.
///
#[must_use]
pub fn eval<R: Row + ?Sized>(row: &R, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::And(children) => children.iter().all(|child| eval(row, child)),
        Predicate::Or(children) => children.iter().any(|child| eval(row, child)),

        Predicate::Compare { field, op, value } => row
            .field(field)
            .is_some_and(|actual| eval_compare(actual, *op, value)),

        Predicate::In {
            field,
            values,
            negated,
        } => row.field(field).is_some_and(|actual| {
            if actual.is_null() {
                return false;
            }
            values.iter().any(|v| actual.matches(v)) != *negated
        }),

        Predicate::Between {
            field,
            low,
            high,
            negated,
        } => row.field(field).is_some_and(|actual| {
            let (Some(lo), Some(hi)) = (actual.compare(low), actual.compare(high)) else {
                return false;
            };
            (lo.is_ge() && hi.is_le()) != *negated
        }),

        Predicate::IsNull { field, negated } => {
            row.field(field).is_none_or(Value::is_null) != *negated
        }
    }
}

fn eval_compare(actual: &Value, op: CompareOp, expected: &Value) -> bool {
    match op {
        CompareOp::Eq => actual.matches(expected),
        CompareOp::Ne => actual.compare(expected).is_some_and(Ordering::is_ne),
        CompareOp::Lt => actual.compare(expected).is_some_and(Ordering::is_lt),
        CompareOp::Lte => actual.compare(expected).is_some_and(Ordering::is_le),
        CompareOp::Gt => actual.compare(expected).is_some_and(Ordering::is_gt),
        CompareOp::Gte => actual.compare(expected).is_some_and(Ordering::is_ge),
        CompareOp::Like => expected.as_text().and_then(|p| actual.like(p)) == Some(true),
        CompareOp::NotLike => expected.as_text().and_then(|p| actual.like(p)) == Some(false),
    }
}

// Nulls sort first, matching the common SQL default for ascending order.
fn cmp_nullable(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());

    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.compare(b).unwrap_or(Ordering::Equal),
    }
}

///
/// In-memory execution
///

impl Query {
    /// True if `row` is visible under the soft-delete scope and predicate.
    #[must_use]
    pub fn matches<R: Row + ?Sized>(&self, row: &R) -> bool {
        self.in_scope(row) && self.predicate().is_none_or(|p| eval(row, p))
    }

    /// Number of rows the query selects, ignoring the window.
    #[must_use]
    pub fn count<R: Row>(&self, rows: &[R]) -> usize {
        rows.iter().filter(|row| self.matches(*row)).count()
    }

    /// Run the query over `rows`.
    ///
    /// Applies scope and predicate, then ordering, offset, limit and
    /// finally the projection.
    #[must_use]
    pub fn execute(&self, rows: &[Record]) -> Vec<Record> {
        let mut selected: Vec<&Record> = rows.iter().filter(|row| self.matches(*row)).collect();

        if !self.order().is_empty() {
            selected.sort_by(|a, b| {
                self.order()
                    .iter()
                    .map(|(field, direction)| {
                        let ordering = cmp_nullable(a.field(field), b.field(field));
                        match direction {
                            OrderDirection::Asc => ordering,
                            OrderDirection::Desc => ordering.reverse(),
                        }
                    })
                    .find(|ordering| ordering.is_ne())
                    .unwrap_or(Ordering::Equal)
            });
        }

        let offset = usize::try_from(self.offset_value()).unwrap_or(usize::MAX);
        let limit = self
            .limit_value()
            .map_or(usize::MAX, |limit| usize::try_from(limit).unwrap_or(usize::MAX));

        selected
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|row| self.project(row))
            .collect()
    }

    fn in_scope<R: Row + ?Sized>(&self, row: &R) -> bool {
        let Some(column) = self.model().soft_delete else {
            return true;
        };
        let trashed = row.field(column).is_some_and(|v| !v.is_null());

        match self.scope() {
            SoftDeleteScope::WithoutTrashed => !trashed,
            SoftDeleteScope::WithTrashed => true,
            SoftDeleteScope::OnlyTrashed => trashed,
        }
    }

    fn project(&self, row: &Record) -> Record {
        match self.projection() {
            Some(Projection::Columns(columns)) => columns
                .iter()
                .filter_map(|column| {
                    // qualified names ("users.name") read the bare column
                    let key = column.rsplit_once('.').map_or(column.as_str(), |(_, c)| c);
                    row.get(key).map(|value| (key.to_string(), value.clone()))
                })
                .collect(),
            Some(Projection::AllOf(_)) | None => row.clone(),
        }
    }
}
