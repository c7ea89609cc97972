//! Resolver state threaded through a generation run.
//!
//! Holds the resolved-typedef table, the symbol table and the run counters.
//! Both tables only grow: an entry, once registered, is never replaced.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::mapper::TypeMapper;
use super::native::NativeType;

/// A generated binding for one function.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Symbol {
    /// Parameter types in declaration order
    pub parameters: Vec<NativeType>,

    /// Return type
    pub result: NativeType,

    /// `<name> @ <location>`
    pub doc: String,
}

/// Function name to binding, iterated in name order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SymbolTable(BTreeMap<String, Symbol>);

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Symbol)> {
        self.0.iter().map(|(name, symbol)| (name.as_str(), symbol))
    }
}

/// Seen/generated counts for one definition kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub total: usize,
    pub generated: usize,
}

impl Tally {
    pub fn skipped(&self) -> usize {
        self.total - self.generated
    }
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub functions: Tally,
    pub typedefs: Tally,

    /// Top-level tags other than typedef/struct/function, with occurrence counts
    pub unknown_tags: BTreeMap<String, usize>,
}

impl RunStats {
    /// Count one record with an unrecognised top-level tag.
    pub fn record_unknown_tag(&mut self, tag: &str) {
        *self.unknown_tags.entry(tag.to_string()).or_default() += 1;
    }
}

/// Accumulating state for one pass over a definition list.
#[derive(Debug, Default)]
pub struct ResolverContext {
    typedefs: HashMap<String, NativeType>,
    symbols: SymbolTable,
    stats: RunStats,
}

impl ResolverContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context continuing the given counters.
    pub fn with_stats(stats: RunStats) -> Self {
        ResolverContext {
            stats,
            ..Self::default()
        }
    }

    /// A type mapper reading this context's typedef table.
    pub fn mapper(&self) -> TypeMapper<'_> {
        TypeMapper::new(&self.typedefs)
    }

    /// Look up a resolved typedef.
    pub fn typedef(&self, name: &str) -> Option<&NativeType> {
        self.typedefs.get(name)
    }

    /// Number of resolved typedefs.
    pub fn typedef_count(&self) -> usize {
        self.typedefs.len()
    }

    /// Register a resolved typedef and return the table's entry for `name`.
    ///
    /// The first registration wins; later ones leave the entry untouched.
    pub fn register_typedef(&mut self, name: &str, native: NativeType) -> &NativeType {
        self.typedefs.entry(name.to_string()).or_insert(native)
    }

    /// Register a function symbol. Returns `false` if the name is taken.
    pub fn register_symbol(&mut self, name: &str, symbol: Symbol) -> bool {
        if self.symbols.contains(name) {
            return false;
        }
        self.symbols.0.insert(name.to_string(), symbol);
        true
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut RunStats {
        &mut self.stats
    }

    /// Finish the run, handing back the symbol table and counters.
    pub fn into_parts(self) -> (SymbolTable, RunStats) {
        (self.symbols, self.stats)
    }
}
