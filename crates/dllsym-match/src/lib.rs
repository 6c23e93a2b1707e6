//! # dllsym-match
//!
//! Locates the raw symbol of a C++ entity exported from an MSVC-built
//! library, given the demangled text of every export.
//!
//! The caller describes the entity it expects (a typed variable, a free or
//! member function, a constructor, the destructor, the vtable) and the
//! engine checks each demangled string against the grammar MSVC prints for
//! that kind of entity:
//! - visibility, `virtual` and `static` tags
//! - calling conventions (`__cdecl`, and `__thiscall` on x86)
//! - cv and reference qualification
//! - `__ptr32`/`__ptr64` modifiers
//! - comma-separated argument lists of any arity
//!
//! # Example
//!
//! ```
//! use dllsym_match::{Bitness, CppType, SymbolCatalog, TypeDesc};
//!
//! struct Foo;
//!
//! impl CppType for Foo {
//!     fn type_desc() -> TypeDesc {
//!         TypeDesc::named("class foo")
//!     }
//! }
//!
//! let catalog = SymbolCatalog::new(
//!     Bitness::Bits64,
//!     [
//!         ("??0foo@@QEAA@H@Z", "public: __cdecl foo::foo(int) __ptr64"),
//!         ("??1foo@@QEAA@XZ", "public: __cdecl foo::~foo(void) __ptr64"),
//!     ],
//! );
//!
//! assert_eq!(catalog.get_constructor::<Foo, fn(i32)>(), Some("??0foo@@QEAA@H@Z"));
//! assert_eq!(catalog.get_destructor::<Foo>(), Some("??1foo@@QEAA@XZ"));
//! ```

pub mod catalog;
pub mod consume;
pub mod cursor;
pub mod matcher;
pub mod namer;
pub mod parser;
pub mod query;
pub mod types;

pub use catalog::SymbolCatalog;
pub use consume::{arg_list_len, consume_args, consume_type};
pub use cursor::Cursor;
pub use dllsym_core::{Bitness, SymbolEntry};
pub use matcher::{
    is_constructor_with_name, is_destructor_with_name, is_function_with_name,
    is_member_function_with_name, is_variable_with_name, EntityMatcher,
};
pub use namer::TypeNamer;
pub use parser::{parse_type, ParseError, ParseResult};
pub use query::EntityQuery;
pub use types::{Const, CppType, Cv, RValue, RefKind, Signature, TypeDesc, Volatile};

/// Error type for catalog persistence.
///
/// Matching itself never fails; a query that matches nothing is `None`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
