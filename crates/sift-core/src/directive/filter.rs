//! Filter directives: comparison, membership, range and nullness.
//!
//! Every variant lowers its argument into a `Predicate` at tokenize time;
//! `apply` only joins that predicate onto the query.

use crate::{
    directive::{Directive, field_name, non_empty_list},
    error::ArgumentError,
    query::{CompareOp, Conjunction, Predicate, QueryBuilder, QueryError, value::Value},
};

///
/// FilterKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FilterKind {
    /// `field:op:value`
    Compare,
    /// `field:(v1,v2,...)`
    In { negated: bool },
    /// `field:low:high`
    Between { negated: bool },
    /// `field`
    Null { negated: bool },
}

///
/// Filter
///

#[derive(Debug)]
pub struct Filter {
    conjunction: Conjunction,
    kind: FilterKind,
    predicate: Option<Predicate>,
    tokens: Vec<String>,
}

impl Filter {
    #[must_use]
    pub const fn new(conjunction: Conjunction, kind: FilterKind) -> Self {
        Self {
            conjunction,
            kind,
            predicate: None,
            tokens: Vec::new(),
        }
    }

    #[must_use]
    pub const fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }

    fn tokenize_compare(&mut self, raw: &str) -> Result<Predicate, ArgumentError> {
        let mut parts = raw.splitn(3, ':');
        let (Some(field), Some(op), Some(value)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(ArgumentError::Shape {
                expected: "field:operator:value",
            });
        };

        let field = field_name(field)?;
        let op_token = op.trim();
        let op = CompareOp::from_token(op_token)
            .ok_or_else(|| ArgumentError::UnknownOperator(op_token.to_string()))?;
        let value = value.trim();

        self.tokens = vec![field.clone(), op.token().to_string(), value.to_string()];

        let predicate = match (op, Value::infer(value)) {
            // patterns are always text, even when they look numeric
            (CompareOp::Like | CompareOp::NotLike, _) => {
                Predicate::compare(field, op, Value::Text(value.to_string()))
            }
            (CompareOp::Eq, Value::Null) => Predicate::is_null(field),
            (CompareOp::Ne, Value::Null) => Predicate::is_not_null(field),
            (op, value) => Predicate::compare(field, op, value),
        };

        Ok(predicate)
    }

    fn tokenize_in(&mut self, raw: &str, negated: bool) -> Result<Predicate, ArgumentError> {
        const EXPECTED: &str = "field:(value,value,...)";

        let (field, list) = raw
            .split_once(':')
            .ok_or(ArgumentError::Shape { expected: EXPECTED })?;
        let field = field_name(field)?;

        let list = list.trim();
        let list = match (list.strip_prefix('('), list.ends_with(')')) {
            (Some(inner), true) => inner.strip_suffix(')').unwrap_or(inner),
            (None, false) => list,
            // one parenthesis without its partner
            _ => return Err(ArgumentError::Shape { expected: EXPECTED }),
        };
        let items = non_empty_list(list, EXPECTED)?;

        let values = items.iter().map(|item| Value::infer(item)).collect();

        self.tokens = std::iter::once(field.clone()).chain(items).collect();

        Ok(Predicate::In {
            field,
            values,
            negated,
        })
    }

    fn tokenize_between(&mut self, raw: &str, negated: bool) -> Result<Predicate, ArgumentError> {
        let mut parts = raw.splitn(3, ':');
        let (Some(field), Some(low), Some(high)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(ArgumentError::Shape {
                expected: "field:low:high",
            });
        };

        let field = field_name(field)?;
        let (low, high) = (low.trim(), high.trim());
        let low_value = numeric_bound(low)?;
        let high_value = numeric_bound(high)?;

        self.tokens = vec![field.clone(), low.to_string(), high.to_string()];

        Ok(Predicate::Between {
            field,
            low: low_value,
            high: high_value,
            negated,
        })
    }

    fn tokenize_null(&mut self, raw: &str, negated: bool) -> Result<Predicate, ArgumentError> {
        let field = field_name(raw)?;

        self.tokens = vec![field.clone()];

        Ok(Predicate::IsNull { field, negated })
    }
}

impl Directive for Filter {
    fn tokenize(&mut self, raw: &str) -> Result<(), ArgumentError> {
        let predicate = match self.kind {
            FilterKind::Compare => self.tokenize_compare(raw)?,
            FilterKind::In { negated } => self.tokenize_in(raw, negated)?,
            FilterKind::Between { negated } => self.tokenize_between(raw, negated)?,
            FilterKind::Null { negated } => self.tokenize_null(raw, negated)?,
        };

        self.predicate = Some(predicate);

        Ok(())
    }

    fn apply(&self, query: &mut dyn QueryBuilder) -> Result<(), QueryError> {
        match &self.predicate {
            Some(predicate) => query.filter(self.conjunction, predicate.clone()),
            None => Ok(()),
        }
    }

    fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

fn numeric_bound(text: &str) -> Result<Value, ArgumentError> {
    let value = Value::infer(text);
    if !value.is_numeric() {
        return Err(ArgumentError::NonNumericBound(text.to_string()));
    }

    Ok(value)
}
