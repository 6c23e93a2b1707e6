//! Type and argument-list consumers.
//!
//! These recognize one rendered type, or a comma-separated list of them,
//! at the front of a [`Cursor`]. On failure the cursor is left where it
//! was.

use crate::cursor::Cursor;
use crate::namer::TypeNamer;
use crate::types::{Cv, RefKind, TypeDesc};

/// Qualifiers and declarators that must not follow a type which does not carry them.
const STRAY_QUALIFIERS: [&str; 4] = [" const", " volatile", " &", " *"];

/// Consume one occurrence of `ty`.
///
/// The `class `/`struct ` tag is optional on input. Qualifiers are
/// required exactly when `ty` carries them; pointer-width modifiers are
/// accepted (but not required) after every pointer and after the whole type.
pub fn consume_type(cursor: &mut Cursor<'_>, namer: &TypeNamer, ty: &TypeDesc) -> bool {
    if ty.is_void() {
        return cursor.eat("void");
    }

    cursor.attempt(|c| {
        c.eat_class_tag();
        if !c.eat(namer.base_name(ty)) || !eat_cv(c, ty.cv) {
            return false;
        }

        for level in &ty.pointers {
            if !c.eat(" *") {
                return false;
            }
            c.eat_pointer_suffixes();
            if !eat_cv(c, *level) {
                return false;
            }
        }

        let reference_ok = match ty.reference {
            RefKind::None => true,
            RefKind::RValue => c.eat(" &&"),
            RefKind::LValue => !c.rest().starts_with(" &&") && c.eat(" &"),
        };
        if !reference_ok {
            return false;
        }

        c.eat_pointer_suffixes();
        !has_stray_qualifier(c.rest())
    })
}

fn eat_cv(cursor: &mut Cursor<'_>, cv: Cv) -> bool {
    (!cv.is_const || cursor.eat(" const")) && (!cv.is_volatile || cursor.eat(" volatile"))
}

fn has_stray_qualifier(rest: &str) -> bool {
    STRAY_QUALIFIERS.iter().any(|q| match rest.strip_prefix(q) {
        Some(after) if q.ends_with(|ch: char| ch.is_ascii_alphabetic()) => !after
            .starts_with(|ch: char| ch.is_ascii_alphanumeric() || ch == '_'),
        Some(_) => true,
        None => false,
    })
}

/// Consume an argument list without its parentheses.
///
/// An empty `args` is spelled `void`. Otherwise every type must appear in
/// order, separated by `,`, with nothing left over between them.
pub fn consume_args(cursor: &mut Cursor<'_>, namer: &TypeNamer, args: &[TypeDesc]) -> bool {
    cursor.attempt(|c| match args {
        [] => c.eat("void"),
        [only] => consume_type(c, namer, only),
        [first, rest @ ..] => {
            consume_type(c, namer, first) && c.eat(",") && consume_args(c, namer, rest)
        }
    })
}

/// Length of the argument list for `args` at the start of `text`, if it is there.
pub fn arg_list_len(namer: &TypeNamer, text: &str, args: &[TypeDesc]) -> Option<usize> {
    let mut cursor = Cursor::new(text);
    consume_args(&mut cursor, namer, args).then(|| cursor.position())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dllsym_core::Bitness;

    fn namer() -> TypeNamer {
        TypeNamer::new(Bitness::Bits64)
    }

    fn ty(s: &str) -> TypeDesc {
        s.parse().unwrap()
    }

    fn consumed(text: &str, t: &TypeDesc) -> Option<usize> {
        let mut c = Cursor::new(text);
        consume_type(&mut c, &namer(), t).then(|| c.position())
    }

    #[test]
    fn test_consume_plain_type() {
        assert_eq!(consumed("int x", &ty("int")), Some(3));
        assert_eq!(consumed("long x", &ty("int")), None);
        assert_eq!(consumed("void", &TypeDesc::void()), Some(4));
    }

    #[test]
    fn test_class_tag_optional() {
        let foo = ty("class foo");
        assert_eq!(consumed("foo", &foo), Some(3));
        assert_eq!(consumed("class foo", &foo), Some(9));
        assert_eq!(consumed("struct foo", &foo), Some(10));
        assert_eq!(consumed("struct foo", &ty("foo")), Some(10));
    }

    #[test]
    fn test_required_qualifiers() {
        let cd = ty("double const");
        assert_eq!(consumed("double const x", &cd), Some(12));
        assert_eq!(consumed("double x", &cd), None);
    }

    #[test]
    fn test_stray_qualifier_is_mismatch() {
        assert_eq!(consumed("double const x", &ty("double")), None);
        assert_eq!(consumed("int & __ptr64", &ty("int")), None);
        assert_eq!(consumed("int * __ptr64", &ty("int")), None);
        // An identifier that merely starts like a qualifier is not one.
        assert_eq!(consumed("int const_value", &ty("int")), Some(3));
    }

    #[test]
    fn test_references() {
        let lref = ty("foo &");
        let rref = ty("foo &&");
        assert_eq!(consumed("class foo & __ptr64", &lref), Some(19));
        assert_eq!(consumed("foo && __ptr64", &lref), None);
        assert_eq!(consumed("foo && __ptr64", &rref), Some(14));
        assert_eq!(consumed("foo & __ptr64", &rref), None);
    }

    #[test]
    fn test_pointers_accept_either_width() {
        let p = ty("char const *");
        assert_eq!(consumed("char const * __ptr64", &p), Some(20));
        assert_eq!(consumed("char const * __ptr32", &p), Some(20));
        assert_eq!(consumed("char const *", &p), Some(12));
        assert_eq!(consumed("char * __ptr64", &p), None);

        let pp = ty("int * const *");
        assert_eq!(
            consumed("int * __ptr64 const * __ptr64", &pp),
            Some("int * __ptr64 const * __ptr64".len())
        );
    }

    #[test]
    fn test_failure_leaves_cursor() {
        let mut c = Cursor::new("double const x");
        assert!(!consume_type(&mut c, &namer(), &ty("double volatile")));
        assert_eq!(c.position(), 0);
    }

    #[test]
    fn test_arg_list_lengths() {
        let n = namer();
        assert_eq!(arg_list_len(&n, "int", &[ty("int")]), Some(3));
        assert_eq!(arg_list_len(&n, "void", &[]), Some(4));
        assert_eq!(arg_list_len(&n, "int,int", &[ty("int"), ty("int")]), Some(7));
        assert_eq!(
            arg_list_len(&n, "int,short,long", &[ty("int"), ty("short"), ty("long")]),
            Some(14)
        );
    }

    #[test]
    fn test_arg_list_arity_and_order() {
        let n = namer();
        let two = [ty("int"), ty("short")];
        assert_eq!(arg_list_len(&n, "int", &two), None);
        assert_eq!(arg_list_len(&n, "short,int", &two), None);
        assert_eq!(arg_list_len(&n, "int", &[]), None);

        let mut c = Cursor::new("int,long");
        assert!(!consume_args(&mut c, &n, &two));
        assert_eq!(c.position(), 0);
    }
}
