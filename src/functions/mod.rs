// Copyright 2025 Lisq Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Host function system
//!
//! The adapter surface a host database calls through: every exposed
//! operation is a [`SexpFunction`] registered by name in the
//! [`FunctionRegistry`](registry::FunctionRegistry). Arguments and results
//! travel as [`Datum`]s; marshalling failures are invalid-argument errors,
//! and "absent" results (`car` of NIL, `nth` out of range, `find` without
//! a match) come back as [`Datum::Null`].

pub mod indexing;
pub mod inspect;
pub mod io;
pub mod lists;
pub mod query;
pub mod registry;

use crate::binary::Sexp;
use crate::core::{Error, Result};

pub use registry::{global_registry, FunctionRegistry};

/// A value crossing the host boundary
#[derive(Debug, Clone)]
pub enum Datum {
    /// SQL NULL / absent result
    Null,
    Boolean(bool),
    Integer(i64),
    Text(String),
    /// Raw binary (send/recv payloads)
    Bytes(Vec<u8>),
    Sexp(Sexp),
    /// Index key arrays
    IntArray(Vec<i32>),
}

impl Datum {
    /// Kind of this datum, for signatures and error messages
    pub fn datum_type(&self) -> DatumType {
        match self {
            Datum::Null => DatumType::Any,
            Datum::Boolean(_) => DatumType::Boolean,
            Datum::Integer(_) => DatumType::Integer,
            Datum::Text(_) => DatumType::Text,
            Datum::Bytes(_) => DatumType::Bytes,
            Datum::Sexp(_) => DatumType::Sexp,
            Datum::IntArray(_) => DatumType::IntArray,
        }
    }

    pub fn as_sexp(&self) -> Result<&Sexp> {
        match self {
            Datum::Sexp(sexp) => Ok(sexp),
            other => Err(marshal_error("s-expression", other)),
        }
    }

    pub fn as_text(&self) -> Result<&str> {
        match self {
            Datum::Text(text) => Ok(text),
            other => Err(marshal_error("text", other)),
        }
    }

    pub fn as_integer(&self) -> Result<i64> {
        match self {
            Datum::Integer(value) => Ok(*value),
            other => Err(marshal_error("integer", other)),
        }
    }

    pub fn as_bytes(&self) -> Result<&[u8]> {
        match self {
            Datum::Bytes(bytes) => Ok(bytes),
            other => Err(marshal_error("bytes", other)),
        }
    }

    /// Wrap an optional value, mapping absence to NULL
    pub fn from_option(value: Option<Sexp>) -> Datum {
        match value {
            Some(sexp) => Datum::Sexp(sexp),
            None => Datum::Null,
        }
    }
}

fn marshal_error(expected: &str, got: &Datum) -> Error {
    Error::invalid_argument(format!("expected {expected}, got {}", got.datum_type()))
}

/// Argument/result kinds for function signatures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatumType {
    Any,
    Boolean,
    Integer,
    Text,
    Bytes,
    Sexp,
    IntArray,
}

impl std::fmt::Display for DatumType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DatumType::Any => "any",
            DatumType::Boolean => "boolean",
            DatumType::Integer => "integer",
            DatumType::Text => "text",
            DatumType::Bytes => "bytes",
            DatumType::Sexp => "sexp",
            DatumType::IntArray => "integer array",
        };
        f.write_str(name)
    }
}

/// Function signature information
#[derive(Debug, Clone)]
pub struct FunctionSignature {
    /// Return type
    pub return_type: DatumType,
    /// Argument types, one per positional argument
    pub argument_types: Vec<DatumType>,
}

impl FunctionSignature {
    pub fn new(return_type: DatumType, argument_types: Vec<DatumType>) -> FunctionSignature {
        FunctionSignature {
            return_type,
            argument_types,
        }
    }

    /// Validate argument count
    pub fn validate_arg_count(&self, count: usize) -> Result<()> {
        if count != self.argument_types.len() {
            return Err(Error::invalid_argument(format!(
                "expected {} arguments, got {count}",
                self.argument_types.len()
            )));
        }
        Ok(())
    }
}

/// One host-callable operation
pub trait SexpFunction: Send + Sync {
    /// Registered name
    fn name(&self) -> &'static str;

    /// Signature for validation and catalog listings
    fn signature(&self) -> FunctionSignature;

    /// Evaluate with marshalled arguments
    fn eval(&self, ctx: &crate::ops::OpContext, args: &[Datum]) -> Result<Datum>;
}
