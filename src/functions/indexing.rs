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

//! Inverted-index hook functions
//!
//! The key extractors are exposed as callable functions so the host can
//! wire them into its index machinery (and so they can be inspected from
//! SQL). The consistent/triconsistent predicates stay as typed Rust API in
//! [`crate::index`]: their inputs are the host's per-key bitmaps, which
//! never surface as SQL values.

use crate::functions::{Datum, DatumType, FunctionSignature, SexpFunction};
use crate::index::{self, Strategy};
use crate::ops::OpContext;
use crate::core::Result;

/// `sexp_extract_keys(sexp) -> integer[]` - posting keys for a stored value
pub struct ExtractKeysFunction;

impl SexpFunction for ExtractKeysFunction {
    fn name(&self) -> &'static str {
        "sexp_extract_keys"
    }

    fn signature(&self) -> FunctionSignature {
        FunctionSignature::new(DatumType::IntArray, vec![DatumType::Sexp])
    }

    fn eval(&self, ctx: &OpContext, args: &[Datum]) -> Result<Datum> {
        Ok(Datum::IntArray(index::extract_value_keys(
            ctx,
            args[0].as_sexp()?,
        )?))
    }
}

/// `sexp_extract_query_keys(sexp, strategy) -> integer[]` - probe keys
///
/// An empty array means the strategy cannot be pre-filtered (full scan).
pub struct ExtractQueryKeysFunction;

impl SexpFunction for ExtractQueryKeysFunction {
    fn name(&self) -> &'static str {
        "sexp_extract_query_keys"
    }

    fn signature(&self) -> FunctionSignature {
        FunctionSignature::new(DatumType::IntArray, vec![DatumType::Sexp, DatumType::Integer])
    }

    fn eval(&self, ctx: &OpContext, args: &[Datum]) -> Result<Datum> {
        let strategy = Strategy::from_code(args[1].as_integer()? as i32)?;
        let query_keys = index::extract_query_keys(ctx, args[0].as_sexp()?, strategy)?;
        Ok(Datum::IntArray(query_keys.keys))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::Sexp;

    fn datum(text: &str) -> Datum {
        Datum::Sexp(Sexp::parse(text).unwrap())
    }

    #[test]
    fn test_extract_keys() {
        let ctx = OpContext::default();
        let keys = ExtractKeysFunction
            .eval(&ctx, &[datum("(user (age 30))")])
            .unwrap();
        match keys {
            Datum::IntArray(keys) => assert!(!keys.is_empty()),
            other => panic!("expected IntArray, got {other:?}"),
        }
    }

    #[test]
    fn test_extract_query_keys_strategies() {
        let ctx = OpContext::default();
        let structural = ExtractQueryKeysFunction
            .eval(&ctx, &[datum("(age 30)"), Datum::Integer(7)])
            .unwrap();
        let contained_by = ExtractQueryKeysFunction
            .eval(&ctx, &[datum("(age 30)"), Datum::Integer(8)])
            .unwrap();
        match (structural, contained_by) {
            (Datum::IntArray(s), Datum::IntArray(c)) => {
                assert!(!s.is_empty());
                assert!(c.is_empty());
            }
            other => panic!("expected IntArrays, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_strategy_is_an_error() {
        let ctx = OpContext::default();
        assert!(ExtractQueryKeysFunction
            .eval(&ctx, &[datum("(a)"), Datum::Integer(42)])
            .is_err());
    }
}
