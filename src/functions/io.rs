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

//! Input/output functions: text in/out and binary send/recv

use crate::binary::Sexp;
use crate::functions::{Datum, DatumType, FunctionSignature, SexpFunction};
use crate::ops::OpContext;
use crate::core::Result;

/// `sexp_in(text) -> sexp` - parse the text representation
pub struct InFunction;

impl SexpFunction for InFunction {
    fn name(&self) -> &'static str {
        "sexp_in"
    }

    fn signature(&self) -> FunctionSignature {
        FunctionSignature::new(DatumType::Sexp, vec![DatumType::Text])
    }

    fn eval(&self, _ctx: &OpContext, args: &[Datum]) -> Result<Datum> {
        Ok(Datum::Sexp(Sexp::parse(args[0].as_text()?)?))
    }
}

/// `sexp_out(sexp) -> text` - canonical text representation
pub struct OutFunction;

impl SexpFunction for OutFunction {
    fn name(&self) -> &'static str {
        "sexp_out"
    }

    fn signature(&self) -> FunctionSignature {
        FunctionSignature::new(DatumType::Text, vec![DatumType::Sexp])
    }

    fn eval(&self, _ctx: &OpContext, args: &[Datum]) -> Result<Datum> {
        Ok(Datum::Text(args[0].as_sexp()?.to_text()?))
    }
}

/// `sexp_send(sexp) -> bytes` - binary wire form
pub struct SendFunction;

impl SexpFunction for SendFunction {
    fn name(&self) -> &'static str {
        "sexp_send"
    }

    fn signature(&self) -> FunctionSignature {
        FunctionSignature::new(DatumType::Bytes, vec![DatumType::Sexp])
    }

    fn eval(&self, _ctx: &OpContext, args: &[Datum]) -> Result<Datum> {
        Ok(Datum::Bytes(args[0].as_sexp()?.as_bytes().to_vec()))
    }
}

/// `sexp_recv(bytes) -> sexp` - validate and adopt wire bytes
pub struct RecvFunction;

impl SexpFunction for RecvFunction {
    fn name(&self) -> &'static str {
        "sexp_recv"
    }

    fn signature(&self) -> FunctionSignature {
        FunctionSignature::new(DatumType::Sexp, vec![DatumType::Bytes])
    }

    fn eval(&self, _ctx: &OpContext, args: &[Datum]) -> Result<Datum> {
        Ok(Datum::Sexp(Sexp::from_bytes(args[0].as_bytes()?)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_out_roundtrip() {
        let ctx = OpContext::default();
        let parsed = InFunction
            .eval(&ctx, &[Datum::Text("( a  b )".into())])
            .unwrap();
        let printed = OutFunction.eval(&ctx, &[parsed]).unwrap();
        assert_eq!(printed.as_text().unwrap(), "(a b)");
    }

    #[test]
    fn test_send_recv_roundtrip() {
        let ctx = OpContext::default();
        let sexp = Sexp::parse("(x 1 2.5 \"s\")").unwrap();
        let sent = SendFunction
            .eval(&ctx, &[Datum::Sexp(sexp.clone())])
            .unwrap();
        let received = RecvFunction.eval(&ctx, &[sent]).unwrap();
        assert_eq!(received.as_sexp().unwrap().as_bytes(), sexp.as_bytes());
    }

    #[test]
    fn test_in_propagates_parse_errors() {
        let ctx = OpContext::default();
        let err = InFunction
            .eval(&ctx, &[Datum::Text("(unclosed".into())])
            .unwrap_err();
        assert!(err.is_parse_error());
    }
}
