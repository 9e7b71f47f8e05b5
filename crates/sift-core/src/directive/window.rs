use crate::{
    directive::Directive,
    error::ArgumentError,
    query::{QueryBuilder, QueryError},
};
use std::num::IntErrorKind;

///
/// Limit
///
/// Caps the number of rows. The first token is read back by callers
/// through `first_argument_of("limit")`.
///

#[derive(Debug, Default)]
pub struct Limit {
    value: Option<u32>,
    tokens: Vec<String>,
}

impl Limit {
    #[must_use]
    pub const fn value(&self) -> Option<u32> {
        self.value
    }
}

impl Directive for Limit {
    fn tokenize(&mut self, raw: &str) -> Result<(), ArgumentError> {
        let (value, token) = parse_count(raw)?;
        self.value = Some(value);
        self.tokens = vec![token];

        Ok(())
    }

    fn apply(&self, query: &mut dyn QueryBuilder) -> Result<(), QueryError> {
        match self.value {
            Some(limit) => query.limit(limit),
            None => Ok(()),
        }
    }

    fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

///
/// Offset
///

#[derive(Debug, Default)]
pub struct Offset {
    value: Option<u32>,
    tokens: Vec<String>,
}

impl Directive for Offset {
    fn tokenize(&mut self, raw: &str) -> Result<(), ArgumentError> {
        let (value, token) = parse_count(raw)?;
        self.value = Some(value);
        self.tokens = vec![token];

        Ok(())
    }

    fn apply(&self, query: &mut dyn QueryBuilder) -> Result<(), QueryError> {
        match self.value {
            Some(offset) => query.offset(offset),
            None => Ok(()),
        }
    }

    fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

fn parse_count(raw: &str) -> Result<(u32, String), ArgumentError> {
    let text = raw.trim();
    let value = text.parse::<u32>().map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow => ArgumentError::OutOfRange {
            raw: text.to_string(),
            max: u32::MAX,
        },
        _ => ArgumentError::NotAnInteger(text.to_string()),
    })?;

    Ok((value, value.to_string()))
}
