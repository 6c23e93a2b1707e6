//! Pointer width of the build a symbol table was produced for.

/// Binary bitness (32-bit or 64-bit).
///
/// MSVC decorated names carry the pointer width in two places: the
/// `__ptr32`/`__ptr64` modifiers after pointers, references and member
/// functions, and the calling convention of member functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Bitness {
    Bits32,
    Bits64,
}

impl Bitness {
    /// Returns the bitness of the build this crate was compiled for.
    pub const fn native() -> Self {
        if cfg!(target_pointer_width = "64") {
            Self::Bits64
        } else {
            Self::Bits32
        }
    }

    /// The pointer modifier token this width renders after pointers and references.
    pub fn pointer_suffix(&self) -> &'static str {
        match self {
            Self::Bits32 => "__ptr32",
            Self::Bits64 => "__ptr64",
        }
    }

    /// The calling convention MSVC prints for non-static member functions.
    ///
    /// x64 has a single convention, so member functions show up as `__cdecl`.
    pub fn member_calling_convention(&self) -> &'static str {
        match self {
            Self::Bits32 => "__thiscall",
            Self::Bits64 => "__cdecl",
        }
    }
}

impl Default for Bitness {
    fn default() -> Self {
        Self::native()
    }
}
