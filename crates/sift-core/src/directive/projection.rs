use crate::{
    directive::{Directive, non_empty_list},
    error::ArgumentError,
    query::{Projection, QueryBuilder, QueryError},
};

///
/// Columns
///
/// Replaces the entity's default projection with an explicit column list.
///

#[derive(Debug, Default)]
pub struct Columns {
    tokens: Vec<String>,
}

impl Directive for Columns {
    fn tokenize(&mut self, raw: &str) -> Result<(), ArgumentError> {
        self.tokens = non_empty_list(raw, "column[,column...]")?;

        Ok(())
    }

    fn apply(&self, query: &mut dyn QueryBuilder) -> Result<(), QueryError> {
        if self.tokens.is_empty() {
            return Ok(());
        }

        query.select(Projection::Columns(self.tokens.clone()))
    }

    fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

///
/// With
///
/// Eagerly includes one or more named relations.
///

#[derive(Debug, Default)]
pub struct With {
    tokens: Vec<String>,
}

impl Directive for With {
    fn tokenize(&mut self, raw: &str) -> Result<(), ArgumentError> {
        self.tokens = non_empty_list(raw, "relation[,relation...]")?;

        Ok(())
    }

    fn apply(&self, query: &mut dyn QueryBuilder) -> Result<(), QueryError> {
        for relation in &self.tokens {
            query.with_relation(relation)?;
        }

        Ok(())
    }

    fn tokens(&self) -> &[String] {
        &self.tokens
    }
}
