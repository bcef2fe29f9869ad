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

//! List access functions

use crate::functions::{Datum, DatumType, FunctionSignature, SexpFunction};
use crate::ops::OpContext;
use crate::core::Result;

/// `sexp_car(sexp) -> sexp` - first element; NULL for NIL
pub struct CarFunction;

impl SexpFunction for CarFunction {
    fn name(&self) -> &'static str {
        "sexp_car"
    }

    fn signature(&self) -> FunctionSignature {
        FunctionSignature::new(DatumType::Sexp, vec![DatumType::Sexp])
    }

    fn eval(&self, _ctx: &OpContext, args: &[Datum]) -> Result<Datum> {
        Ok(Datum::from_option(args[0].as_sexp()?.car()?))
    }
}

/// `sexp_cdr(sexp) -> sexp` - rest of the list; NULL for NIL
pub struct CdrFunction;

impl SexpFunction for CdrFunction {
    fn name(&self) -> &'static str {
        "sexp_cdr"
    }

    fn signature(&self) -> FunctionSignature {
        FunctionSignature::new(DatumType::Sexp, vec![DatumType::Sexp])
    }

    fn eval(&self, _ctx: &OpContext, args: &[Datum]) -> Result<Datum> {
        Ok(Datum::from_option(args[0].as_sexp()?.cdr()?))
    }
}

/// `sexp_head(sexp) -> sexp` - alias for car
pub struct HeadFunction;

impl SexpFunction for HeadFunction {
    fn name(&self) -> &'static str {
        "sexp_head"
    }

    fn signature(&self) -> FunctionSignature {
        FunctionSignature::new(DatumType::Sexp, vec![DatumType::Sexp])
    }

    fn eval(&self, _ctx: &OpContext, args: &[Datum]) -> Result<Datum> {
        Ok(Datum::from_option(args[0].as_sexp()?.head()?))
    }
}

/// `sexp_nth(sexp, n) -> sexp` - element n; NULL when out of range
pub struct NthFunction;

impl SexpFunction for NthFunction {
    fn name(&self) -> &'static str {
        "sexp_nth"
    }

    fn signature(&self) -> FunctionSignature {
        FunctionSignature::new(DatumType::Sexp, vec![DatumType::Sexp, DatumType::Integer])
    }

    fn eval(&self, _ctx: &OpContext, args: &[Datum]) -> Result<Datum> {
        let n = args[1].as_integer()?;
        let n = i32::try_from(n)
            .map_err(|_| crate::core::Error::invalid_argument("index out of i32 range"))?;
        Ok(Datum::from_option(args[0].as_sexp()?.nth(n)?))
    }
}
