//! Canonical decorated spelling of types.

use crate::types::{trim_class_tag, TypeDesc};
use dllsym_core::Bitness;

/// Renders types the way MSVC prints them inside demangled signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TypeNamer {
    bitness: Bitness,
}

impl TypeNamer {
    /// Create a namer for a build of the given width.
    pub fn new(bitness: Bitness) -> Self {
        Self { bitness }
    }

    /// A namer for the width this crate was compiled for.
    pub fn native() -> Self {
        Self::new(Bitness::native())
    }

    /// The build width this namer renders for.
    pub fn bitness(&self) -> Bitness {
        self.bitness
    }

    /// The base spelling with any `class `/`struct ` tag removed.
    pub fn base_name<'t>(&self, ty: &'t TypeDesc) -> &'t str {
        trim_class_tag(&ty.base)
    }

    /// Full decorated spelling, e.g. `foo const * __ptr64 & __ptr64`.
    pub fn render(&self, ty: &TypeDesc) -> String {
        if ty.is_void() {
            return "void".to_string();
        }

        let suffix = self.bitness.pointer_suffix();
        let mut out = self.base_name(ty).to_string();
        push_cv(&mut out, ty.cv.is_const, ty.cv.is_volatile);
        for level in &ty.pointers {
            out.push_str(" * ");
            out.push_str(suffix);
            push_cv(&mut out, level.is_const, level.is_volatile);
        }
        if let Some(tok) = ty.reference.token() {
            out.push(' ');
            out.push_str(tok);
            out.push(' ');
            out.push_str(suffix);
        }
        out
    }

    /// Name of a class as it appears in front of `::member`, i.e. without
    /// qualifiers or declarators.
    pub fn class_name<'t>(&self, class: &'t TypeDesc) -> &'t str {
        self.base_name(class)
    }

    /// `Class::Unscoped`, the qualified name of the class's constructors.
    pub fn constructor_name(&self, class: &TypeDesc) -> String {
        let name = self.class_name(class);
        format!("{}::{}", name, unscoped_name(name))
    }

    /// `Class::~Unscoped(void)`, the full name of the class's destructor.
    pub fn destructor_name(&self, class: &TypeDesc) -> String {
        let name = self.class_name(class);
        format!("{}::~{}(void)", name, unscoped_name(name))
    }

    /// Demangled text of the class's virtual function table.
    pub fn vtable_name(&self, class: &TypeDesc) -> String {
        format!("const {}::`vftable'", self.class_name(class))
    }
}

/// The part of a qualified name after its last `::`.
fn unscoped_name(class_name: &str) -> &str {
    class_name.rsplit("::").next().unwrap_or(class_name)
}

fn push_cv(out: &mut String, is_const: bool, is_volatile: bool) {
    if is_const {
        out.push_str(" const");
    }
    if is_volatile {
        out.push_str(" volatile");
    }
}
