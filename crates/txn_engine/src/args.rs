//! Positional argument validation
//!
//! The layered, fail-fast checks shared by every handler: exact arity,
//! required non-empty strings, and typed parses (floats, integers, decimal
//! percentages, strict RFC3339 timestamps, comma-delimited lists).
//! Positions are 1-based, matching the positional schemas of the invocation
//! contract, and every failure names the offending argument.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use core_kernel::EngineError;

/// A validated view over an invocation's argument list.
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    values: &'a [String],
}

impl<'a> Args<'a> {
    /// Accepts the argument list only at exactly `expected` entries.
    pub fn exactly(values: &'a [String], expected: usize) -> Result<Self, EngineError> {
        if values.len() != expected {
            return Err(EngineError::ArgumentCount {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self { values })
    }

    fn raw(&self, position: usize) -> &'a str {
        &self.values[position - 1]
    }

    /// The argument at `position`, which must be non-empty.
    pub fn required(&self, position: usize, name: &str) -> Result<&'a str, EngineError> {
        let value = self.raw(position);
        if value.is_empty() {
            return Err(EngineError::format(
                position,
                name,
                "must be a non-empty string",
            ));
        }
        Ok(value)
    }

    /// The argument at `position`, or `None` when it was passed empty.
    pub fn optional(&self, position: usize) -> Option<&'a str> {
        let value = self.raw(position);
        (!value.is_empty()).then_some(value)
    }

    /// Parses a required floating point argument.
    pub fn float(&self, position: usize, name: &str) -> Result<f64, EngineError> {
        self.required(position, name)?.parse().map_err(|_| {
            EngineError::format(position, name, "must be a floating point string")
        })
    }

    /// Parses a required integer argument.
    pub fn integer(&self, position: usize, name: &str) -> Result<i64, EngineError> {
        self.required(position, name)?
            .parse()
            .map_err(|_| EngineError::format(position, name, "must be a valid integer"))
    }

    /// Parses a required decimal argument (exact arithmetic, no binary
    /// floats for money).
    pub fn decimal(&self, position: usize, name: &str) -> Result<Decimal, EngineError> {
        self.required(position, name)?
            .parse()
            .map_err(|_| EngineError::format(position, name, "must be a decimal number string"))
    }

    /// Parses a required RFC3339 date-time argument.
    pub fn timestamp(&self, position: usize, name: &str) -> Result<DateTime<Utc>, EngineError> {
        let raw = self.required(position, name)?;
        parse_rfc3339(raw).ok_or_else(|| {
            EngineError::format(position, name, "must be an RFC3339 date-time string")
        })
    }

    /// Parses an RFC3339 date-time argument that may be passed empty.
    pub fn optional_timestamp(
        &self,
        position: usize,
        name: &str,
    ) -> Result<Option<DateTime<Utc>>, EngineError> {
        match self.optional(position) {
            None => Ok(None),
            Some(raw) => parse_rfc3339(raw).map(Some).ok_or_else(|| {
                EngineError::format(position, name, "must be an RFC3339 date-time string")
            }),
        }
    }

    /// Splits a required comma-delimited argument into its entries.
    pub fn csv(&self, position: usize, name: &str) -> Result<Vec<String>, EngineError> {
        Ok(self
            .required(position, name)?
            .split(',')
            .map(|entry| entry.to_string())
            .collect())
    }
}

fn parse_rfc3339(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}
