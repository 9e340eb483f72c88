// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types: filter parameter declarations, dynamically typed values,
// and the resolved parameter set handed to a filter.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{PictoolError, Result};

/// The type a filter parameter accepts on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Signed integer (range checks are the filter's job).
    Int,
    /// Floating point number.
    Float,
    /// Boolean switch; `--name` alone means `true`.
    Bool,
    /// One of a fixed set of keywords.
    Choice(&'static [&'static str]),
}

impl ParamKind {
    /// Placeholder shown in `--help` output.
    pub fn value_name(self) -> &'static str {
        match self {
            Self::Int => "INT",
            Self::Float => "NUM",
            Self::Bool => "BOOL",
            Self::Choice(_) => "MODE",
        }
    }
}

/// A dynamically typed parameter value.
///
/// Untagged so config files can write plain JSON scalars
/// (`{"radius": 3, "factor": 1.5, "sepia": true, "mode": "noise"}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Whether this value can be used for a parameter of kind `kind`.
    ///
    /// Integers are accepted where floats are expected, mirroring how a user
    /// writes `--factor=2`.
    pub fn fits(&self, kind: ParamKind) -> bool {
        match (self, kind) {
            (Self::Int(_), ParamKind::Int) => true,
            (Self::Int(_) | Self::Float(_), ParamKind::Float) => true,
            (Self::Bool(_), ParamKind::Bool) => true,
            (Self::Text(text), ParamKind::Choice(options)) => options.contains(&text.as_str()),
            _ => false,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

/// Declaration of one named filter parameter.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    /// Option name without the leading `--`.
    pub name: &'static str,
    pub kind: ParamKind,
    /// Used when neither the command line nor the config file gives a value.
    pub default: DefaultValue,
    pub help: &'static str,
}

/// A `const`-friendly default, converted to a [`Value`] on resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(&'static str),
}

impl From<DefaultValue> for Value {
    fn from(default: DefaultValue) -> Self {
        match default {
            DefaultValue::Bool(v) => Value::Bool(v),
            DefaultValue::Int(v) => Value::Int(v),
            DefaultValue::Float(v) => Value::Float(v),
            DefaultValue::Text(v) => Value::Text(v.to_owned()),
        }
    }
}

/// How a filter changes the dimensions of the image it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Geometry {
    /// Output has the same width and height as the input.
    Preserve,
    /// Output width is the input height and vice versa.
    Swap,
}

impl Geometry {
    /// Dimensions the output must have for an input of `(width, height)`.
    pub fn output_dimensions(self, (width, height): (u32, u32)) -> (u32, u32) {
        match self {
            Self::Preserve => (width, height),
            Self::Swap => (height, width),
        }
    }
}

/// The fully resolved parameter set for one filter invocation.
#[derive(Debug, Clone, Default)]
pub struct Params {
    filter: String,
    values: BTreeMap<String, Value>,
}

impl Params {
    pub fn new(filter: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
            values: BTreeMap::new(),
        }
    }

    /// Builder-style insert, mostly for tests and programmatic callers.
    pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn require(&self, name: &str) -> Result<&Value> {
        self.values
            .get(name)
            .ok_or_else(|| PictoolError::MissingParameter {
                filter: self.filter.clone(),
                param: name.to_owned(),
            })
    }

    fn mismatch(&self, name: &str, expected: &str, got: &Value) -> PictoolError {
        PictoolError::invalid(&self.filter, name, format!("expected {expected}, got '{got}'"))
    }

    pub fn int(&self, name: &str) -> Result<i64> {
        match self.require(name)? {
            Value::Int(v) => Ok(*v),
            other => Err(self.mismatch(name, "an integer", other)),
        }
    }

    pub fn float(&self, name: &str) -> Result<f64> {
        match self.require(name)? {
            Value::Float(v) => Ok(*v),
            Value::Int(v) => Ok(*v as f64),
            other => Err(self.mismatch(name, "a number", other)),
        }
    }

    pub fn flag(&self, name: &str) -> Result<bool> {
        match self.require(name)? {
            Value::Bool(v) => Ok(*v),
            other => Err(self.mismatch(name, "true or false", other)),
        }
    }

    pub fn text(&self, name: &str) -> Result<&str> {
        match self.require(name)? {
            Value::Text(v) => Ok(v),
            other => Err(self.mismatch(name, "a keyword", other)),
        }
    }

    /// An integer that must be at least `min`, narrowed to `u32`.
    pub fn int_at_least(&self, name: &str, min: i64) -> Result<u32> {
        let value = self.int(name)?;
        if value < min {
            return Err(PictoolError::invalid(
                &self.filter,
                name,
                format!("must be at least {min}, got {value}"),
            ));
        }
        u32::try_from(value).map_err(|_| {
            PictoolError::invalid(&self.filter, name, format!("{value} is too large"))
        })
    }
}
