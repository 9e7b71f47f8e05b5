use crate::{
    directive::Directive,
    error::ArgumentError,
    query::{QueryBuilder, QueryError, SoftDeleteScope},
};

///
/// Force
///
/// Pins the soft-delete scope regardless of any other directive.
/// The compiler always schedules it after every other handler, so the
/// scope named here is the one the query ends up with.
///

#[derive(Debug, Default)]
pub struct Force {
    scope: Option<SoftDeleteScope>,
    tokens: Vec<String>,
}

impl Force {
    #[must_use]
    pub const fn scope(&self) -> Option<SoftDeleteScope> {
        self.scope
    }
}

impl Directive for Force {
    fn tokenize(&mut self, raw: &str) -> Result<(), ArgumentError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(ArgumentError::Shape {
                expected: "one of with_trashed, only_trashed, without_trashed",
            });
        }

        let scope =
            SoftDeleteScope::parse(text).ok_or_else(|| ArgumentError::UnknownScope(text.into()))?;

        self.scope = Some(scope);
        self.tokens = vec![scope.as_str().to_string()];

        Ok(())
    }

    fn apply(&self, query: &mut dyn QueryBuilder) -> Result<(), QueryError> {
        match self.scope {
            Some(scope) => query.soft_delete_scope(scope),
            None => Ok(()),
        }
    }

    fn tokens(&self) -> &[String] {
        &self.tokens
    }
}
