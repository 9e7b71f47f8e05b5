use crate::{
    directive::Directive,
    error::ArgumentError,
    query::{QueryBuilder, QueryError, SoftDeleteScope},
};

///
/// WithTrashed
///
/// No-argument toggle that widens the query to include soft-deleted rows.
///

#[derive(Debug, Default)]
pub struct WithTrashed {
    tokens: Vec<String>,
}

impl Directive for WithTrashed {
    fn tokenize(&mut self, _raw: &str) -> Result<(), ArgumentError> {
        self.tokens.clear();

        Ok(())
    }

    fn apply(&self, query: &mut dyn QueryBuilder) -> Result<(), QueryError> {
        query.soft_delete_scope(SoftDeleteScope::WithTrashed)
    }

    fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

///
/// OnlyTrashed
///
/// No-argument toggle that restricts the query to soft-deleted rows.
///

#[derive(Debug, Default)]
pub struct OnlyTrashed {
    tokens: Vec<String>,
}

impl Directive for OnlyTrashed {
    fn tokenize(&mut self, _raw: &str) -> Result<(), ArgumentError> {
        self.tokens.clear();

        Ok(())
    }

    fn apply(&self, query: &mut dyn QueryBuilder) -> Result<(), QueryError> {
        query.soft_delete_scope(SoftDeleteScope::OnlyTrashed)
    }

    fn tokens(&self) -> &[String] {
        &self.tokens
    }
}
