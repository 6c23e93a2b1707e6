//! Symbol catalog storage and lookup.
//!
//! The catalog holds a binary's exported symbols in table order and answers
//! entity queries by scanning them. Order matters: when two entries match
//! the same query, the earlier one wins.

use crate::matcher::EntityMatcher;
use crate::namer::TypeNamer;
use crate::query::EntityQuery;
use crate::types::{CppType, Signature, TypeDesc};
use crate::Result;
use dllsym_core::{Bitness, SymbolEntry};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, debug_span};

/// An ordered, read-only collection of `(raw, decorated)` symbol pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolCatalog {
    /// Pointer width of the binary the symbols were read from.
    #[serde(default)]
    bitness: Bitness,

    /// Entries in symbol-table order.
    entries: Vec<SymbolEntry>,
}

impl SymbolCatalog {
    /// Build a catalog for a binary of the given width.
    pub fn new<I, E>(bitness: Bitness, entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<SymbolEntry>,
    {
        let catalog = Self {
            bitness,
            entries: entries.into_iter().map(Into::into).collect(),
        };
        debug!(
            entries = catalog.entries.len(),
            bitness = ?catalog.bitness,
            "built symbol catalog"
        );
        catalog
    }

    /// Build a catalog for a binary of this build's own width.
    pub fn from_entries<I, E>(entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<SymbolEntry>,
    {
        Self::new(Bitness::native(), entries)
    }

    /// Pointer width of the binary.
    pub fn bitness(&self) -> Bitness {
        self.bitness
    }

    /// The namer matching this catalog's width.
    pub fn namer(&self) -> TypeNamer {
        TypeNamer::new(self.bitness)
    }

    /// Get all entries in table order.
    pub fn entries(&self) -> &[SymbolEntry] {
        &self.entries
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the first entry matching `query`.
    pub fn find_entry(&self, query: &EntityQuery) -> Option<&SymbolEntry> {
        let _span = debug_span!("find_symbol", kind = query.kind(), query = %query).entered();
        let matcher = EntityMatcher::new(query, self.namer());
        let found = self.entries.iter().find(|e| matcher.matches(e.decorated()));
        match found {
            Some(entry) => debug!(raw = entry.raw(), "matched symbol"),
            None => debug!(scanned = self.entries.len(), "no matching symbol"),
        }
        found
    }

    /// Raw name of the first entry matching `query`.
    pub fn find(&self, query: &EntityQuery) -> Option<&str> {
        self.find_entry(query).map(SymbolEntry::raw)
    }

    /// Demangled text of every entry that mentions `ty`, in table order.
    pub fn related(&self, ty: &TypeDesc) -> Vec<&str> {
        let query = EntityQuery::related(ty.clone());
        let matcher = EntityMatcher::new(&query, self.namer());
        let related: Vec<&str> = self
            .entries
            .iter()
            .map(SymbolEntry::decorated)
            .filter(|d| matcher.matches(d))
            .collect();
        debug!(ty = %ty, count = related.len(), "collected related symbols");
        related
    }

    /// Raw name of the variable `name` of type `T`.
    pub fn get_variable<T: CppType>(&self, name: &str) -> Option<&str> {
        self.find(&EntityQuery::variable_of::<T>(name))
    }

    /// Raw name of the free (or static member) function `name` with signature `F`.
    pub fn get_function<F: Signature>(&self, name: &str) -> Option<&str> {
        self.find(&EntityQuery::function_of::<F>(name))
    }

    /// Raw name of the member function `C::name` with signature `F`.
    ///
    /// Use `Const<C>` / `Volatile<C>` to select a cv-qualified overload.
    pub fn get_member_function<C: CppType, F: Signature>(&self, name: &str) -> Option<&str> {
        self.find(&EntityQuery::member_function_of::<C, F>(name))
    }

    /// Raw name of the constructor of `C` taking the arguments of `F`.
    pub fn get_constructor<C: CppType, F: Signature>(&self) -> Option<&str> {
        self.find(&EntityQuery::constructor_of::<C, F>())
    }

    /// Raw name of the destructor of `C`.
    pub fn get_destructor<C: CppType>(&self) -> Option<&str> {
        self.find(&EntityQuery::destructor(C::type_desc()))
    }

    /// Raw name of the vtable of `C`.
    pub fn get_vtable<C: CppType>(&self) -> Option<&str> {
        self.find(&EntityQuery::vtable(C::type_desc()))
    }

    /// Demangled text of every entry that mentions `T`.
    pub fn get_related<T: CppType>(&self) -> Vec<&str> {
        self.related(&T::type_desc())
    }

    /// Save the catalog to a JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a catalog from a JSON file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        debug!(path = %path.display(), entries = catalog.len(), "loaded symbol catalog");
        Ok(catalog)
    }

    /// Parse a catalog from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<E: Into<SymbolEntry>> FromIterator<E> for SymbolCatalog {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}
