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

//! Function Registry
//!
//! Lookup table from host-visible names to [`SexpFunction`] instances.
//! Hosts resolve a function once and call it per row, or go through
//! [`FunctionRegistry::call`] which also validates argument counts.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

use crate::functions::indexing::{ExtractKeysFunction, ExtractQueryKeysFunction};
use crate::functions::inspect::{
    IsAtomFunction, IsListFunction, IsNilFunction, IsNumberFunction, IsStringFunction,
    IsSymbolFunction, LengthFunction, TypeOfFunction,
};
use crate::functions::io::{InFunction, OutFunction, RecvFunction, SendFunction};
use crate::functions::lists::{CarFunction, CdrFunction, HeadFunction, NthFunction};
use crate::functions::query::{
    ContainsFunction, ContainsKeyFunction, EqFunction, FindFunction, HashExtendedFunction,
    HashFunction, MatchFunction, NeFunction,
};
use crate::functions::{Datum, SexpFunction};
use crate::ops::OpContext;
use crate::core::{Error, Result};

/// Global function registry instance
static GLOBAL_REGISTRY: OnceLock<FunctionRegistry> = OnceLock::new();

/// Get the global function registry
#[inline]
pub fn global_registry() -> &'static FunctionRegistry {
    GLOBAL_REGISTRY.get_or_init(FunctionRegistry::new)
}

/// Registry of host-callable functions
pub struct FunctionRegistry {
    functions: RwLock<HashMap<&'static str, Arc<dyn SexpFunction>>>,
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionRegistry {
    /// Create a registry with every built-in function registered
    pub fn new() -> FunctionRegistry {
        let registry = FunctionRegistry {
            functions: RwLock::new(HashMap::new()),
        };

        // Input/output
        registry.register(Arc::new(InFunction));
        registry.register(Arc::new(OutFunction));
        registry.register(Arc::new(SendFunction));
        registry.register(Arc::new(RecvFunction));

        // Comparison and hashing
        registry.register(Arc::new(EqFunction));
        registry.register(Arc::new(NeFunction));
        registry.register(Arc::new(HashFunction));
        registry.register(Arc::new(HashExtendedFunction));

        // List access
        registry.register(Arc::new(CarFunction));
        registry.register(Arc::new(CdrFunction));
        registry.register(Arc::new(HeadFunction));
        registry.register(Arc::new(NthFunction));

        // Type inspection
        registry.register(Arc::new(TypeOfFunction));
        registry.register(Arc::new(LengthFunction));
        registry.register(Arc::new(IsNilFunction));
        registry.register(Arc::new(IsListFunction));
        registry.register(Arc::new(IsAtomFunction));
        registry.register(Arc::new(IsSymbolFunction));
        registry.register(Arc::new(IsStringFunction));
        registry.register(Arc::new(IsNumberFunction));

        // Containment and patterns
        registry.register(Arc::new(ContainsFunction));
        registry.register(Arc::new(ContainsKeyFunction));
        registry.register(Arc::new(MatchFunction));
        registry.register(Arc::new(FindFunction));

        // Index hooks
        registry.register(Arc::new(ExtractKeysFunction));
        registry.register(Arc::new(ExtractQueryKeysFunction));

        registry
    }

    /// Register a function under its own name
    pub fn register(&self, function: Arc<dyn SexpFunction>) {
        if let Ok(mut functions) = self.functions.write() {
            functions.insert(function.name(), function);
        }
    }

    /// Look up a function by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn SexpFunction>> {
        self.functions.read().ok()?.get(name).cloned()
    }

    /// Registered names, sorted (for catalogs and diagnostics)
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self
            .functions
            .read()
            .map(|functions| functions.keys().copied().collect())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }

    /// Resolve, validate arity, and evaluate in one step
    pub fn call(&self, ctx: &OpContext, name: &str, args: &[Datum]) -> Result<Datum> {
        let function = self
            .get(name)
            .ok_or_else(|| Error::invalid_argument(format!("unknown function '{name}'")))?;
        function.signature().validate_arg_count(args.len())?;
        function.eval(ctx, args)
    }
}
