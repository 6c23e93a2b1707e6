//! Entity matchers.
//!
//! Each predicate walks the grammar MSVC uses to print one kind of entity
//! and succeeds only if the whole demangled text is consumed. Optional
//! parts never fail a predicate; the first missing required part does.

use crate::consume::{consume_args, consume_type};
use crate::cursor::Cursor;
use crate::namer::TypeNamer;
use crate::query::EntityQuery;
use crate::types::{Cv, TypeDesc};

/// Optional `public: static ` prefix of class-scope variables and static
/// member functions.
fn eat_static_member_prefix(c: &mut Cursor<'_>) {
    if c.eat_visibility() && !c.eat_static() {
        c.eat(" ");
    }
}

/// `[visibility][ static ]<type> <name>`
///
/// Matches both `public: static int some_class::value` and `int value`.
pub fn is_variable_with_name(namer: &TypeNamer, name: &str, ty: &TypeDesc, text: &str) -> bool {
    let mut c = Cursor::new(text);
    eat_static_member_prefix(&mut c);
    consume_type(&mut c, namer, ty) && c.eat(" ") && c.eat(name) && c.is_at_end()
}

/// `[visibility][ static ]<ret> __cdecl <name>(<args>)[ __ptrNN]`
///
/// An undecorated export whose text is exactly `name` (an `extern "C"`
/// function) also matches.
pub fn is_function_with_name(
    namer: &TypeNamer,
    name: &str,
    ret: &TypeDesc,
    args: &[TypeDesc],
    text: &str,
) -> bool {
    if text == name {
        return true;
    }

    let mut c = Cursor::new(text);
    eat_static_member_prefix(&mut c);
    consume_type(&mut c, namer, ret)
        && c.eat_free_calling_convention()
        && c.eat(name)
        && eat_parenthesized_args(&mut c, namer, args)
        && eat_trailing_suffixes(&mut c)
}

/// `<visibility>[ virtual] <ret> <cc> <class>::<name>(<args>)[const][ volatile][ __ptrNN]`
///
/// `method_cv` selects the cv-qualified overload; it is required when set.
/// The qualifier follows the closing parenthesis directly, as in
/// `get(void)const volatile __ptr64`.
pub fn is_member_function_with_name(
    namer: &TypeNamer,
    class: &TypeDesc,
    name: &str,
    ret: &TypeDesc,
    args: &[TypeDesc],
    method_cv: Cv,
    text: &str,
) -> bool {
    let mut c = Cursor::new(text);
    if !c.eat_visibility() {
        return false;
    }
    c.eat_virtual();

    c.eat(" ")
        && consume_type(&mut c, namer, ret)
        && c.eat_member_calling_convention(namer.bitness())
        && consume_type(&mut c, namer, &class.unqualified())
        && c.eat("::")
        && c.eat(name)
        && eat_parenthesized_args(&mut c, namer, args)
        && eat_method_cv(&mut c, method_cv)
        && eat_trailing_suffixes(&mut c)
}

/// `<visibility> <cc> <ctor_name>(<args>)[ __ptrNN]`
///
/// `ctor_name` is the qualified constructor name, `Class::Unscoped`.
pub fn is_constructor_with_name(
    namer: &TypeNamer,
    ctor_name: &str,
    args: &[TypeDesc],
    text: &str,
) -> bool {
    let mut c = Cursor::new(text);
    c.eat_visibility()
        && c.eat_member_calling_convention(namer.bitness())
        && c.eat(ctor_name)
        && eat_parenthesized_args(&mut c, namer, args)
        && eat_trailing_suffixes(&mut c)
}

/// `<visibility>[ virtual] <cc> <dtor_name>[ __ptrNN]`
///
/// `dtor_name` is the full destructor name, `Class::~Unscoped(void)`.
pub fn is_destructor_with_name(namer: &TypeNamer, dtor_name: &str, text: &str) -> bool {
    let mut c = Cursor::new(text);
    if !c.eat_visibility() {
        return false;
    }
    c.eat_virtual();

    c.eat_member_calling_convention(namer.bitness())
        && c.eat(dtor_name)
        && eat_trailing_suffixes(&mut c)
}

fn eat_parenthesized_args(c: &mut Cursor<'_>, namer: &TypeNamer, args: &[TypeDesc]) -> bool {
    c.eat("(") && consume_args(c, namer, args) && c.eat(")")
}

fn eat_method_cv(c: &mut Cursor<'_>, cv: Cv) -> bool {
    match (cv.is_const, cv.is_volatile) {
        (false, false) => true,
        (true, false) => c.eat("const"),
        (false, true) => c.eat("volatile"),
        (true, true) => c.eat("const volatile"),
    }
}

fn eat_trailing_suffixes(c: &mut Cursor<'_>) -> bool {
    c.eat_pointer_suffixes();
    c.is_at_end()
}

/// A query prepared for repeated matching.
///
/// Names derived from the query (constructor, destructor and vtable names,
/// the rendered related type) are computed once up front.
#[derive(Debug, Clone)]
pub struct EntityMatcher<'q> {
    query: &'q EntityQuery,
    namer: TypeNamer,
    derived: Option<String>,
}

impl<'q> EntityMatcher<'q> {
    /// Prepare `query` for a table rendered by `namer`.
    pub fn new(query: &'q EntityQuery, namer: TypeNamer) -> Self {
        let derived = match query {
            EntityQuery::Constructor { class, .. } => Some(namer.constructor_name(class)),
            EntityQuery::Destructor { class } => Some(namer.destructor_name(class)),
            EntityQuery::VTable { class } => Some(namer.vtable_name(class)),
            EntityQuery::Related { ty } => Some(namer.render(ty)),
            _ => None,
        };
        Self {
            query,
            namer,
            derived,
        }
    }

    /// The query being matched.
    pub fn query(&self) -> &'q EntityQuery {
        self.query
    }

    /// Returns true if `decorated` is the demangled text of the queried entity.
    pub fn matches(&self, decorated: &str) -> bool {
        let namer = &self.namer;
        let derived = self.derived.as_deref().unwrap_or_default();
        match self.query {
            EntityQuery::Variable { name, ty } => is_variable_with_name(namer, name, ty, decorated),
            EntityQuery::Function { name, ret, args } => {
                is_function_with_name(namer, name, ret, args, decorated)
            }
            EntityQuery::MemberFunction {
                class,
                name,
                ret,
                args,
            } => is_member_function_with_name(namer, class, name, ret, args, class.cv, decorated),
            EntityQuery::Constructor { args, .. } => {
                is_constructor_with_name(namer, derived, args, decorated)
            }
            EntityQuery::Destructor { .. } => is_destructor_with_name(namer, derived, decorated),
            EntityQuery::VTable { .. } => decorated == derived,
            EntityQuery::Related { .. } => decorated.contains(derived),
        }
    }
}
