//! Symbol table entries.

/// A symbol from a binary's export table, paired with its demangled text.
///
/// Entries are immutable once created: the matching engine relies on the
/// text it scanned staying the text it reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolEntry {
    /// Linker-visible (mangled) name, e.g. `??1foo@@QEAA@XZ`.
    raw: String,
    /// Human-readable rendering, e.g. `public: __cdecl foo::~foo(void) __ptr64`.
    decorated: String,
}

impl SymbolEntry {
    /// Create an entry from a raw name and its demangled text.
    pub fn new(raw: impl Into<String>, decorated: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            decorated: decorated.into(),
        }
    }

    /// Returns the raw symbol name.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns the demangled text.
    pub fn decorated(&self) -> &str {
        &self.decorated
    }
}

impl<R: Into<String>, D: Into<String>> From<(R, D)> for SymbolEntry {
    fn from((raw, decorated): (R, D)) -> Self {
        Self::new(raw, decorated)
    }
}
