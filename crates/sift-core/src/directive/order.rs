use crate::{
    directive::{Directive, field_name, non_empty_list},
    error::ArgumentError,
    query::{OrderDirection, QueryBuilder, QueryError},
};

///
/// OrderBy
///
/// `field[,field...]`; a leading `-` sorts that field descending.
///

#[derive(Debug, Default)]
pub struct OrderBy {
    keys: Vec<(String, OrderDirection)>,
    tokens: Vec<String>,
}

impl OrderBy {
    #[must_use]
    pub fn keys(&self) -> &[(String, OrderDirection)] {
        &self.keys
    }
}

impl Directive for OrderBy {
    fn tokenize(&mut self, raw: &str) -> Result<(), ArgumentError> {
        let items = non_empty_list(raw, "field[,field...]")?;

        let mut keys = Vec::with_capacity(items.len());
        for item in &items {
            let key = match item.strip_prefix('-') {
                Some(field) => (field_name(field)?, OrderDirection::Desc),
                None => (
                    field_name(item.strip_prefix('+').unwrap_or(item))?,
                    OrderDirection::Asc,
                ),
            };
            keys.push(key);
        }

        self.keys = keys;
        self.tokens = items;

        Ok(())
    }

    fn apply(&self, query: &mut dyn QueryBuilder) -> Result<(), QueryError> {
        for (field, direction) in &self.keys {
            query.order_by(field, *direction)?;
        }

        Ok(())
    }

    fn tokens(&self) -> &[String] {
        &self.tokens
    }
}
