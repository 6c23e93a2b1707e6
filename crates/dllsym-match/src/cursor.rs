//! Prefix consumers over demangled symbol text.
//!
//! Every primitive either advances the cursor past the text it recognized
//! and returns `true`, or leaves the cursor where it was and returns `false`.
//! Nothing here allocates.

use dllsym_core::Bitness;

/// Access specifiers MSVC prints in front of class members.
pub const VISIBILITIES: [&str; 3] = ["public:", "protected:", "private:"];

/// Pointer modifiers, accepted regardless of the build's own width.
pub const POINTER_SUFFIXES: [&str; 2] = ["__ptr32", "__ptr64"];

/// Elaborated type specifiers that may precede a class name.
pub const CLASS_TAGS: [&str; 2] = ["class ", "struct "];

/// A shrinking view over a decorated string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// The text not consumed yet.
    pub fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns true once the whole input has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.pos == self.input.len()
    }

    /// Run `step`, restoring the cursor if it fails.
    pub fn attempt(&mut self, step: impl FnOnce(&mut Self) -> bool) -> bool {
        let saved = *self;
        if step(self) {
            true
        } else {
            *self = saved;
            false
        }
    }

    /// Consume `lit` if the remaining text starts with it.
    pub fn eat(&mut self, lit: &str) -> bool {
        if self.rest().starts_with(lit) {
            self.pos += lit.len();
            true
        } else {
            false
        }
    }

    /// Consume the first of `lits` the remaining text starts with.
    pub fn eat_any(&mut self, lits: &[&str]) -> bool {
        lits.iter().any(|lit| self.eat(lit))
    }

    /// Consume one of `public:`, `protected:` or `private:`.
    pub fn eat_visibility(&mut self) -> bool {
        self.eat_any(&VISIBILITIES)
    }

    /// Consume ` virtual`.
    pub fn eat_virtual(&mut self) -> bool {
        self.eat(" virtual")
    }

    /// Consume ` static `.
    pub fn eat_static(&mut self) -> bool {
        self.eat(" static ")
    }

    /// Consume an optional `class ` or `struct ` tag.
    pub fn eat_class_tag(&mut self) -> bool {
        self.eat_any(&CLASS_TAGS)
    }

    /// Consume the calling convention of a free (or static member) function.
    pub fn eat_free_calling_convention(&mut self) -> bool {
        self.eat(" __cdecl ")
    }

    /// Consume the calling convention of a non-static member function.
    ///
    /// Both `__thiscall` (x86) and `__cdecl` (x64) are accepted so a table
    /// produced for the other width still matches; `bitness` only picks
    /// which spelling is tried first.
    pub fn eat_member_calling_convention(&mut self, bitness: Bitness) -> bool {
        match bitness {
            Bitness::Bits32 => self.eat_any(&[" __thiscall ", " __cdecl "]),
            Bitness::Bits64 => self.eat_any(&[" __cdecl ", " __thiscall "]),
        }
    }

    /// Consume a run of pointer modifiers and returns how many were eaten.
    ///
    /// MSVC may print the modifier several times after qualifiers, each
    /// preceded by any number of spaces. Spaces not followed by a modifier
    /// are left in place.
    pub fn eat_pointer_suffixes(&mut self) -> usize {
        let mut count = 0;
        while self.attempt(|c| {
            c.skip_spaces();
            c.eat_any(&POINTER_SUFFIXES)
        }) {
            count += 1;
        }
        count
    }

    fn skip_spaces(&mut self) {
        let trimmed = self.rest().trim_start_matches(' ');
        self.pos = self.input.len() - trimmed.len();
    }
}
