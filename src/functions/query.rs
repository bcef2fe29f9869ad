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

//! Comparison, hashing, containment, and pattern functions

use crate::functions::{Datum, DatumType, FunctionSignature, SexpFunction};
use crate::ops::{self, OpContext};
use crate::core::Result;

/// `sexp_eq(a, b) -> boolean` - semantic equality
pub struct EqFunction;

impl SexpFunction for EqFunction {
    fn name(&self) -> &'static str {
        "sexp_eq"
    }

    fn signature(&self) -> FunctionSignature {
        FunctionSignature::new(DatumType::Boolean, vec![DatumType::Sexp, DatumType::Sexp])
    }

    fn eval(&self, _ctx: &OpContext, args: &[Datum]) -> Result<Datum> {
        Ok(Datum::Boolean(args[0].as_sexp()?.equal(args[1].as_sexp()?)?))
    }
}

/// `sexp_ne(a, b) -> boolean`
pub struct NeFunction;

impl SexpFunction for NeFunction {
    fn name(&self) -> &'static str {
        "sexp_ne"
    }

    fn signature(&self) -> FunctionSignature {
        FunctionSignature::new(DatumType::Boolean, vec![DatumType::Sexp, DatumType::Sexp])
    }

    fn eval(&self, _ctx: &OpContext, args: &[Datum]) -> Result<Datum> {
        Ok(Datum::Boolean(!args[0].as_sexp()?.equal(args[1].as_sexp()?)?))
    }
}

/// `sexp_hash(sexp) -> integer` - 32-bit semantic hash
pub struct HashFunction;

impl SexpFunction for HashFunction {
    fn name(&self) -> &'static str {
        "sexp_hash"
    }

    fn signature(&self) -> FunctionSignature {
        FunctionSignature::new(DatumType::Integer, vec![DatumType::Sexp])
    }

    fn eval(&self, _ctx: &OpContext, args: &[Datum]) -> Result<Datum> {
        Ok(Datum::Integer(args[0].as_sexp()?.semantic_hash()? as i64))
    }
}

/// `sexp_hash_extended(sexp, seed) -> integer` - seeded 64-bit hash
pub struct HashExtendedFunction;

impl SexpFunction for HashExtendedFunction {
    fn name(&self) -> &'static str {
        "sexp_hash_extended"
    }

    fn signature(&self) -> FunctionSignature {
        FunctionSignature::new(DatumType::Integer, vec![DatumType::Sexp, DatumType::Integer])
    }

    fn eval(&self, _ctx: &OpContext, args: &[Datum]) -> Result<Datum> {
        let seed = args[1].as_integer()?;
        Ok(Datum::Integer(args[0].as_sexp()?.hash_extended(seed)?))
    }
}

/// `sexp_contains(container, needle) -> boolean` - structural containment
pub struct ContainsFunction;

impl SexpFunction for ContainsFunction {
    fn name(&self) -> &'static str {
        "sexp_contains"
    }

    fn signature(&self) -> FunctionSignature {
        FunctionSignature::new(DatumType::Boolean, vec![DatumType::Sexp, DatumType::Sexp])
    }

    fn eval(&self, ctx: &OpContext, args: &[Datum]) -> Result<Datum> {
        Ok(Datum::Boolean(ops::contains::contains(
            ctx,
            args[0].as_sexp()?,
            args[1].as_sexp()?,
        )?))
    }
}

/// `sexp_contains_key(container, needle) -> boolean` - key-based containment
pub struct ContainsKeyFunction;

impl SexpFunction for ContainsKeyFunction {
    fn name(&self) -> &'static str {
        "sexp_contains_key"
    }

    fn signature(&self) -> FunctionSignature {
        FunctionSignature::new(DatumType::Boolean, vec![DatumType::Sexp, DatumType::Sexp])
    }

    fn eval(&self, ctx: &OpContext, args: &[Datum]) -> Result<Datum> {
        Ok(Datum::Boolean(ops::contains_key::contains_key(
            ctx,
            args[0].as_sexp()?,
            args[1].as_sexp()?,
        )?))
    }
}

/// `sexp_match(expr, pattern) -> boolean` - pattern match at the root
pub struct MatchFunction;

impl SexpFunction for MatchFunction {
    fn name(&self) -> &'static str {
        "sexp_match"
    }

    fn signature(&self) -> FunctionSignature {
        FunctionSignature::new(DatumType::Boolean, vec![DatumType::Sexp, DatumType::Sexp])
    }

    fn eval(&self, _ctx: &OpContext, args: &[Datum]) -> Result<Datum> {
        Ok(Datum::Boolean(
            args[0].as_sexp()?.matches(args[1].as_sexp()?)?,
        ))
    }
}

/// `sexp_find(expr, pattern) -> sexp` - first matching subtree; NULL if none
pub struct FindFunction;

impl SexpFunction for FindFunction {
    fn name(&self) -> &'static str {
        "sexp_find"
    }

    fn signature(&self) -> FunctionSignature {
        FunctionSignature::new(DatumType::Sexp, vec![DatumType::Sexp, DatumType::Sexp])
    }

    fn eval(&self, _ctx: &OpContext, args: &[Datum]) -> Result<Datum> {
        Ok(Datum::from_option(
            args[0].as_sexp()?.find_first(args[1].as_sexp()?)?,
        ))
    }
}
