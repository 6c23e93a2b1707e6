//! Static C++ type descriptions.
//!
//! A [`TypeDesc`] is what the caller knows about a type at compile time: its
//! spelling, cv-qualifiers, pointer levels and reference kind. The
//! [`CppType`] and [`Signature`] traits derive descriptions from Rust types
//! so lookups can be written against the FFI types a caller already has.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// const/volatile qualification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cv {
    #[serde(default)]
    pub is_const: bool,
    #[serde(default)]
    pub is_volatile: bool,
}

impl Cv {
    /// No qualifiers.
    pub const NONE: Cv = Cv {
        is_const: false,
        is_volatile: false,
    };

    /// `const` only.
    pub const CONST: Cv = Cv {
        is_const: true,
        is_volatile: false,
    };

    /// Returns true if neither qualifier is set.
    pub fn is_empty(&self) -> bool {
        !self.is_const && !self.is_volatile
    }

    fn write_suffix(&self, out: &mut String) {
        if self.is_const {
            out.push_str(" const");
        }
        if self.is_volatile {
            out.push_str(" volatile");
        }
    }
}

/// Reference kind of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefKind {
    #[default]
    None,
    /// `T &`
    LValue,
    /// `T &&`
    RValue,
}

impl RefKind {
    /// The declarator token, if any.
    pub fn token(&self) -> Option<&'static str> {
        match self {
            RefKind::None => None,
            RefKind::LValue => Some("&"),
            RefKind::RValue => Some("&&"),
        }
    }
}

/// Description of a C++ type as it appears in a signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeDesc {
    /// Base spelling, e.g. `int`, `unsigned __int64`, `class some_space::some_class`.
    pub base: String,
    /// Qualifiers of the base type.
    #[serde(default)]
    pub cv: Cv,
    /// Pointer levels, innermost first; each entry qualifies the pointer itself.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pointers: Vec<Cv>,
    /// Reference applied on top of everything else.
    #[serde(default)]
    pub reference: RefKind,
}

impl TypeDesc {
    /// An unqualified type with the given spelling.
    pub fn named(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            cv: Cv::NONE,
            pointers: Vec::new(),
            reference: RefKind::None,
        }
    }

    /// `void`.
    pub fn void() -> Self {
        Self::named("void")
    }

    /// Returns true for plain `void` (not a pointer to it).
    pub fn is_void(&self) -> bool {
        self.base == "void" && self.pointers.is_empty() && self.reference == RefKind::None
    }

    /// Returns true if the outermost declarator is a pointer.
    pub fn is_pointer(&self) -> bool {
        !self.pointers.is_empty() && self.reference == RefKind::None
    }

    /// Qualifiers of the outermost non-reference layer.
    pub fn top_cv(&self) -> Cv {
        self.pointers.last().copied().unwrap_or(self.cv)
    }

    pub(crate) fn top_cv_mut(&mut self) -> &mut Cv {
        match self.pointers.last_mut() {
            Some(cv) => cv,
            None => &mut self.cv,
        }
    }

    /// Add `const` to the outermost non-reference layer.
    pub fn with_const(mut self) -> Self {
        self.top_cv_mut().is_const = true;
        self
    }

    /// Add `volatile` to the outermost non-reference layer.
    pub fn with_volatile(mut self) -> Self {
        self.top_cv_mut().is_volatile = true;
        self
    }

    /// Wrap in one more pointer level.
    pub fn pointer(mut self) -> Self {
        self.pointers.push(Cv::NONE);
        self
    }

    /// Make this an lvalue reference.
    pub fn lvalue_ref(mut self) -> Self {
        self.reference = RefKind::LValue;
        self
    }

    /// Make this an rvalue reference.
    pub fn rvalue_ref(mut self) -> Self {
        self.reference = RefKind::RValue;
        self
    }

    /// The same type with cv-qualifiers, pointers and reference removed.
    pub fn unqualified(&self) -> Self {
        Self::named(self.base.clone())
    }
}

impl fmt::Display for TypeDesc {
    /// C++ spelling without pointer-width modifiers, e.g. `foo const * &`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::from(trim_class_tag(&self.base));
        if self.is_void() {
            return f.write_str(&out);
        }
        self.cv.write_suffix(&mut out);
        for level in &self.pointers {
            out.push_str(" *");
            level.write_suffix(&mut out);
        }
        if let Some(tok) = self.reference.token() {
            out.push(' ');
            out.push_str(tok);
        }
        f.write_str(&out)
    }
}

/// Strip a leading `class ` or `struct ` tag.
///
/// The two are interchangeable in declarations, so the canonical spelling
/// carries neither.
pub fn trim_class_tag(name: &str) -> &str {
    name.strip_prefix("class ")
        .or_else(|| name.strip_prefix("struct "))
        .unwrap_or(name)
}

/// A Rust type with a known C++ counterpart.
pub trait CppType {
    /// Describe the C++ type.
    fn type_desc() -> TypeDesc;
}

macro_rules! impl_cpp_type {
    ($($ty:ty => $name:expr),* $(,)?) => {
        $(
            impl CppType for $ty {
                fn type_desc() -> TypeDesc {
                    TypeDesc::named($name)
                }
            }
        )*
    };
}

impl_cpp_type! {
    () => "void",
    bool => "bool",
    i8 => "signed char",
    u8 => "unsigned char",
    i16 => "short",
    u16 => "unsigned short",
    i32 => "int",
    u32 => "unsigned int",
    i64 => "__int64",
    u64 => "unsigned __int64",
    f32 => "float",
    f64 => "double",
}

impl<T: CppType> CppType for *const T {
    fn type_desc() -> TypeDesc {
        T::type_desc().with_const().pointer()
    }
}

impl<T: CppType> CppType for *mut T {
    fn type_desc() -> TypeDesc {
        T::type_desc().pointer()
    }
}

impl<'a, T: CppType> CppType for &'a T {
    fn type_desc() -> TypeDesc {
        T::type_desc().with_const().lvalue_ref()
    }
}

impl<'a, T: CppType> CppType for &'a mut T {
    fn type_desc() -> TypeDesc {
        T::type_desc().lvalue_ref()
    }
}

/// `T const`. Used as the class parameter of a member-function lookup it
/// selects the const-qualified overload.
pub struct Const<T>(PhantomData<T>);

/// `T volatile`.
pub struct Volatile<T>(PhantomData<T>);

/// `T &&`.
pub struct RValue<T>(PhantomData<T>);

impl<T: CppType> CppType for Const<T> {
    fn type_desc() -> TypeDesc {
        T::type_desc().with_const()
    }
}

impl<T: CppType> CppType for Volatile<T> {
    fn type_desc() -> TypeDesc {
        T::type_desc().with_volatile()
    }
}

impl<T: CppType> CppType for RValue<T> {
    fn type_desc() -> TypeDesc {
        T::type_desc().rvalue_ref()
    }
}

/// A function pointer type describing a C++ signature.
///
/// Implemented for `fn(A0, ..) -> R` up to eight arguments. Reference
/// arguments need a named lifetime (`fn(&'static T)`): an elided one makes
/// the pointer type higher-ranked, which these impls do not cover.
pub trait Signature {
    /// The return type.
    fn return_type() -> TypeDesc;
    /// Argument types in declaration order.
    fn arg_types() -> Vec<TypeDesc>;
}

macro_rules! impl_signature {
    ($($arg:ident),*) => {
        impl<R: CppType $(, $arg: CppType)*> Signature for fn($($arg),*) -> R {
            fn return_type() -> TypeDesc {
                R::type_desc()
            }

            fn arg_types() -> Vec<TypeDesc> {
                vec![$($arg::type_desc()),*]
            }
        }
    };
}

impl_signature!();
impl_signature!(A0);
impl_signature!(A0, A1);
impl_signature!(A0, A1, A2);
impl_signature!(A0, A1, A2, A3);
impl_signature!(A0, A1, A2, A3, A4);
impl_signature!(A0, A1, A2, A3, A4, A5);
impl_signature!(A0, A1, A2, A3, A4, A5, A6);
impl_signature!(A0, A1, A2, A3, A4, A5, A6, A7);
