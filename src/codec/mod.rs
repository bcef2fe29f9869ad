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

//! Encoding primitives shared by the binary layer
//!
//! - [`varint`] - length-prefix and signed-integer codecs
//! - [`hash`] - stable byte/integer/float hashing and mixers
//! - [`bloom`] - 64-bit Bloom signatures for containment rejection

pub mod bloom;
pub mod hash;
pub mod varint;

pub use bloom::BloomSig;
