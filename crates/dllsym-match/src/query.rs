//! Entity queries.
//!
//! A query is the caller's static description of the C++ entity whose
//! exported symbol is wanted.

use crate::types::{CppType, Signature, TypeDesc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A C++ entity to look up in a symbol catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityQuery {
    /// A global or static member variable.
    Variable {
        /// Qualified name, e.g. `some_space::some_class::value`.
        name: String,
        ty: TypeDesc,
    },
    /// A free function or static member function.
    Function {
        /// Qualified name, e.g. `ns::foo` or `some_class::create`.
        name: String,
        ret: TypeDesc,
        #[serde(default)]
        args: Vec<TypeDesc>,
    },
    /// A non-static member function.
    ///
    /// The method's own cv-qualification is taken from `class`: a
    /// `const`-qualified class selects the `const` overload.
    MemberFunction {
        class: TypeDesc,
        /// Unqualified method name.
        name: String,
        ret: TypeDesc,
        #[serde(default)]
        args: Vec<TypeDesc>,
    },
    /// A constructor.
    Constructor {
        class: TypeDesc,
        #[serde(default)]
        args: Vec<TypeDesc>,
    },
    /// The destructor.
    Destructor { class: TypeDesc },
    /// The virtual function table.
    VTable { class: TypeDesc },
    /// Every symbol mentioning a type.
    Related { ty: TypeDesc },
}

impl EntityQuery {
    /// A variable of type `ty`.
    pub fn variable(name: impl Into<String>, ty: TypeDesc) -> Self {
        EntityQuery::Variable {
            name: name.into(),
            ty,
        }
    }

    /// A free function.
    pub fn function(name: impl Into<String>, ret: TypeDesc, args: Vec<TypeDesc>) -> Self {
        EntityQuery::Function {
            name: name.into(),
            ret,
            args,
        }
    }

    /// A member function of `class`.
    pub fn member_function(
        class: TypeDesc,
        name: impl Into<String>,
        ret: TypeDesc,
        args: Vec<TypeDesc>,
    ) -> Self {
        EntityQuery::MemberFunction {
            class,
            name: name.into(),
            ret,
            args,
        }
    }

    /// A constructor of `class`.
    pub fn constructor(class: TypeDesc, args: Vec<TypeDesc>) -> Self {
        EntityQuery::Constructor { class, args }
    }

    /// The destructor of `class`.
    pub fn destructor(class: TypeDesc) -> Self {
        EntityQuery::Destructor { class }
    }

    /// The vtable of `class`.
    pub fn vtable(class: TypeDesc) -> Self {
        EntityQuery::VTable { class }
    }

    /// Symbols related to `ty`.
    pub fn related(ty: TypeDesc) -> Self {
        EntityQuery::Related { ty }
    }

    /// A variable whose type is a Rust type with a C++ counterpart.
    pub fn variable_of<T: CppType>(name: impl Into<String>) -> Self {
        Self::variable(name, T::type_desc())
    }

    /// A free function with the signature of `F`.
    pub fn function_of<F: Signature>(name: impl Into<String>) -> Self {
        Self::function(name, F::return_type(), F::arg_types())
    }

    /// A member function of `C` with the signature of `F`.
    pub fn member_function_of<C: CppType, F: Signature>(name: impl Into<String>) -> Self {
        Self::member_function(C::type_desc(), name, F::return_type(), F::arg_types())
    }

    /// A constructor of `C` taking the arguments of `F`.
    pub fn constructor_of<C: CppType, F: Signature>() -> Self {
        Self::constructor(C::type_desc(), F::arg_types())
    }

    /// The name of this kind of query.
    pub fn kind(&self) -> &'static str {
        match self {
            EntityQuery::Variable { .. } => "variable",
            EntityQuery::Function { .. } => "function",
            EntityQuery::MemberFunction { .. } => "member_function",
            EntityQuery::Constructor { .. } => "constructor",
            EntityQuery::Destructor { .. } => "destructor",
            EntityQuery::VTable { .. } => "vtable",
            EntityQuery::Related { .. } => "related",
        }
    }
}

fn join_args(args: &[TypeDesc]) -> String {
    if args.is_empty() {
        return "void".to_string();
    }
    args.iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

impl fmt::Display for EntityQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityQuery::Variable { name, ty } => write!(f, "{} {}", ty, name),
            EntityQuery::Function { name, ret, args } => {
                write!(f, "{} {}({})", ret, name, join_args(args))
            }
            EntityQuery::MemberFunction {
                class,
                name,
                ret,
                args,
            } => {
                write!(
                    f,
                    "{} {}::{}({})",
                    ret,
                    class.unqualified(),
                    name,
                    join_args(args)
                )?;
                if class.cv.is_const {
                    write!(f, " const")?;
                }
                if class.cv.is_volatile {
                    write!(f, " volatile")?;
                }
                Ok(())
            }
            EntityQuery::Constructor { class, args } => {
                write!(f, "{}::ctor({})", class.unqualified(), join_args(args))
            }
            EntityQuery::Destructor { class } => write!(f, "{}::dtor", class.unqualified()),
            EntityQuery::VTable { class } => write!(f, "{}::`vftable'", class.unqualified()),
            EntityQuery::Related { ty } => write!(f, "related to {}", ty),
        }
    }
}
