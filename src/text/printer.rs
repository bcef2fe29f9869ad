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

//! S-expression printer: binary to canonical text
//!
//! Canonical form: one space between siblings, no leading or trailing
//! whitespace, `()` for NIL, strings quoted with `\n` `\t` `\r` `\\` `\"`
//! escaped. Floats print in shortest round-trip form that still reparses
//! as a float (a decimal point or exponent is always present).

use crate::binary::cursor::Cursor;
use crate::binary::{Sexp, SexpReader};
use crate::core::types::{
    DATA_MASK, SMALLINT_BIAS, TAG_FLOAT, TAG_INTEGER, TAG_LONG_STRING, TAG_MASK, TAG_NIL,
    TAG_SHORT_STRING, TAG_SMALLINT, TAG_SYMBOL,
};
use crate::core::Result;

/// Render a value in canonical text form
pub fn print(sexp: &Sexp) -> Result<String> {
    let reader = SexpReader::new(sexp.as_bytes())?;
    let mut out = Vec::new();
    let mut cursor = reader.cursor();
    write_element(&mut cursor, &mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

fn write_element(cursor: &mut Cursor<'_>, out: &mut Vec<u8>) -> Result<()> {
    let byte = cursor.read_tag_byte()?;
    match byte & TAG_MASK {
        TAG_NIL => out.extend_from_slice(b"()"),

        TAG_SMALLINT => {
            let value = (byte & DATA_MASK) as i64 - SMALLINT_BIAS;
            out.extend_from_slice(value.to_string().as_bytes());
        }

        TAG_INTEGER => {
            let value = cursor.read_signed_varint()?;
            out.extend_from_slice(value.to_string().as_bytes());
        }

        TAG_FLOAT => {
            let value = cursor.read_f64()?;
            write_float(value, out);
        }

        TAG_SYMBOL => {
            let index = cursor.read_varint()?;
            let entry = cursor.syms.get(index)?;
            out.extend_from_slice(entry.text);
        }

        TAG_SHORT_STRING => {
            let len = (byte & DATA_MASK) as usize;
            let content = cursor.take(len)?;
            write_quoted(content, out);
        }

        TAG_LONG_STRING => {
            let len = cursor.read_varint()? as usize;
            let content = cursor.take(len)?;
            write_quoted(content, out);
        }

        _ => {
            // TAG_LIST
            let header = cursor.read_list_header(byte)?;
            out.push(b'(');
            for i in 0..header.count {
                if i > 0 {
                    out.push(b' ');
                }
                write_element(cursor, out)?;
            }
            out.push(b')');
        }
    }
    Ok(())
}

/// Print a float so it reparses as a float: `{:?}` keeps a decimal point
/// or exponent in every finite value and round-trips exactly.
fn write_float(value: f64, out: &mut Vec<u8>) {
    if value.is_nan() {
        out.extend_from_slice(b"nan");
    } else if value.is_infinite() {
        out.extend_from_slice(if value > 0.0 { b"inf" } else { b"-inf" });
    } else {
        out.extend_from_slice(format!("{value:?}").as_bytes());
    }
}

fn write_quoted(content: &[u8], out: &mut Vec<u8>) {
    out.push(b'"');
    for &c in content {
        match c {
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\t' => out.extend_from_slice(b"\\t"),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\\' => out.extend_from_slice(b"\\\\"),
            b'"' => out.extend_from_slice(b"\\\""),
            other => out.push(other),
        }
    }
    out.push(b'"');
}
