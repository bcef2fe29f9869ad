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

//! Type inspection functions

use crate::functions::{Datum, DatumType, FunctionSignature, SexpFunction};
use crate::ops::OpContext;
use crate::core::Result;

/// `sexp_typeof(sexp) -> text`
pub struct TypeOfFunction;

impl SexpFunction for TypeOfFunction {
    fn name(&self) -> &'static str {
        "sexp_typeof"
    }

    fn signature(&self) -> FunctionSignature {
        FunctionSignature::new(DatumType::Text, vec![DatumType::Sexp])
    }

    fn eval(&self, _ctx: &OpContext, args: &[Datum]) -> Result<Datum> {
        Ok(Datum::Text(args[0].as_sexp()?.type_of().to_string()))
    }
}

/// `sexp_length(sexp) -> integer`
pub struct LengthFunction;

impl SexpFunction for LengthFunction {
    fn name(&self) -> &'static str {
        "sexp_length"
    }

    fn signature(&self) -> FunctionSignature {
        FunctionSignature::new(DatumType::Integer, vec![DatumType::Sexp])
    }

    fn eval(&self, _ctx: &OpContext, args: &[Datum]) -> Result<Datum> {
        Ok(Datum::Integer(args[0].as_sexp()?.length()? as i64))
    }
}

macro_rules! predicate_function {
    ($struct_name:ident, $fn_name:literal, $method:ident) => {
        #[doc = concat!("`", $fn_name, "(sexp) -> boolean`")]
        pub struct $struct_name;

        impl SexpFunction for $struct_name {
            fn name(&self) -> &'static str {
                $fn_name
            }

            fn signature(&self) -> FunctionSignature {
                FunctionSignature::new(DatumType::Boolean, vec![DatumType::Sexp])
            }

            fn eval(&self, _ctx: &OpContext, args: &[Datum]) -> Result<Datum> {
                Ok(Datum::Boolean(args[0].as_sexp()?.$method()))
            }
        }
    };
}

predicate_function!(IsNilFunction, "sexp_is_nil", is_nil);
predicate_function!(IsListFunction, "sexp_is_list", is_list);
predicate_function!(IsAtomFunction, "sexp_is_atom", is_atom);
predicate_function!(IsSymbolFunction, "sexp_is_symbol", is_symbol);
predicate_function!(IsStringFunction, "sexp_is_string", is_string);
predicate_function!(IsNumberFunction, "sexp_is_number", is_number);
