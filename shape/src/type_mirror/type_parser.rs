//! Parser for Java-style type expressions with support for nested generics
//!
//! This module uses nom to parse type expressions like:
//! - `int`, `byte[]`
//! - `java.util.List<java.lang.String>`
//! - `java.util.Map<java.lang.String, java.util.List<com.example.Item>>`
//! - `java.util.List<? extends com.example.Animal>`
//! - `T extends java.lang.Comparable<T>` (type parameter declarations)

use error_stack::Report;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_while};
use nom::character::complete::{char, multispace0, multispace1, satisfy};
use nom::combinator::{all_consuming, opt, recognize};
use nom::error::ErrorKind;
use nom::multi::{many0, separated_list1};
use nom::sequence::{delimited, preceded};
use nom::{IResult, Parser};

use super::{DeclaredType, OtherKind, PrimitiveKind, TypeMirror, TypeParameter};
use crate::constants::MAX_TYPE_NESTING;
use crate::error::{Error, Result};

/// Unrecoverable failure for input nested past `MAX_TYPE_NESTING`
fn too_deep(input: &str) -> nom::Err<nom::error::Error<&str>> {
    nom::Err::Failure(nom::error::Error::new(input, ErrorKind::TooLarge))
}

/// Parse an identifier (alphanumeric, `_` and `$`, not starting with a digit)
fn identifier(input: &str) -> IResult<&str, &str> {
    recognize((
        satisfy(|c| c.is_alphabetic() || c == '_' || c == '$'),
        take_while(|c: char| c.is_alphanumeric() || c == '_' || c == '$'),
    ))
    .parse(input)
}

/// Parse a dotted qualified name
fn qualified_name(input: &str) -> IResult<&str, &str> {
    recognize(separated_list1(char('.'), identifier)).parse(input)
}

/// Parse a `<...>` type argument list whose arguments sit at `depth + 1`
fn type_arguments(input: &str, depth: usize) -> IResult<&str, Vec<TypeMirror>> {
    delimited(
        preceded(multispace0, char('<')),
        separated_list1(
            delimited(multispace0, char(','), multispace0),
            preceded(multispace0, |input| type_mirror(input, depth + 1)),
        ),
        preceded(multispace0, char('>')),
    )
    .parse(input)
}

/// Parse a primitive keyword, `void`, or a declared type with optional arguments
fn named_type(input: &str, depth: usize) -> IResult<&str, TypeMirror> {
    let (input, name) = qualified_name(input)?;
    let (input, arguments) = opt(|input| type_arguments(input, depth)).parse(input)?;

    let type_mirror = match arguments {
        Some(arguments) => TypeMirror::Declared(DeclaredType::new(name, arguments)),
        None => name.parse::<PrimitiveKind>().map_or_else(
            |_| {
                if name == OtherKind::Void.as_ref() {
                    TypeMirror::Other(OtherKind::Void)
                } else {
                    TypeMirror::declared(name)
                }
            },
            TypeMirror::Primitive,
        ),
    };
    Ok((input, type_mirror))
}

/// Parse one `[]` array dimension
fn array_dimension(input: &str) -> IResult<&str, &str> {
    preceded(multispace0, tag("[]")).parse(input)
}

/// Parse a named type followed by any number of `[]` dimensions
///
/// Each dimension counts as one level of nesting.
fn array_or_named(input: &str, depth: usize) -> IResult<&str, TypeMirror> {
    let (input, base) = named_type(input, depth)?;
    let (input, dimensions) = many0(array_dimension).parse(input)?;
    if depth + dimensions.len() > MAX_TYPE_NESTING {
        return Err(too_deep(input));
    }
    let type_mirror = dimensions
        .into_iter()
        .fold(base, |component, _| TypeMirror::array_of(component));
    Ok((input, type_mirror))
}

/// Parse `?`, `? extends T` or `? super T`
///
/// Lower bounds leave the upper bound unknown.
fn wildcard(input: &str, depth: usize) -> IResult<&str, TypeMirror> {
    let (input, _) = char('?').parse(input)?;
    let (input, bound) = opt((
        preceded(multispace1, alt((tag("extends"), tag("super")))),
        preceded(multispace1, |input| type_mirror(input, depth + 1)),
    ))
    .parse(input)?;

    let extends_bound = match bound {
        Some(("extends", bound)) => Some(bound),
        _ => None,
    };
    Ok((input, TypeMirror::wildcard(extends_bound)))
}

/// Parse any type expression nested `depth` levels deep
fn type_mirror(input: &str, depth: usize) -> IResult<&str, TypeMirror> {
    if depth > MAX_TYPE_NESTING {
        return Err(too_deep(input));
    }
    alt((
        |input| wildcard(input, depth),
        |input| array_or_named(input, depth),
    ))
    .parse(input)
}

/// Parse `T` or `T extends Bound`
fn type_parameter(input: &str) -> IResult<&str, TypeParameter> {
    let (input, name) = identifier(input)?;
    let (input, bound) = opt(preceded(
        (multispace1, tag("extends"), multispace1),
        |input| type_mirror(input, 0),
    ))
    .parse(input)?;
    Ok((
        input,
        TypeParameter {
            name: name.to_string(),
            bound,
        },
    ))
}

/// Turn a nom failure into a `TypeParse` report
fn parse_error(
    input: &str,
    what: &str,
    error: &nom::Err<nom::error::Error<&str>>,
) -> Report<Error> {
    let message = match error {
        nom::Err::Failure(failure) if failure.code == ErrorKind::TooLarge => {
            format!("{what} nests deeper than {MAX_TYPE_NESTING} levels")
        }
        _ => format!("'{input}' is not a {what}: {error}"),
    };
    Report::new(Error::TypeParse(message))
}

/// Parse a complete type expression
///
/// # Errors
///
/// Returns [`Error::TypeParse`] when `input` is not a complete type expression or nests type
/// arguments, wildcard bounds and array dimensions more than `MAX_TYPE_NESTING` levels deep.
pub fn parse_type(input: &str) -> Result<TypeMirror> {
    all_consuming(delimited(multispace0, |rest| type_mirror(rest, 0), multispace0))
        .parse(input)
        .map(|(_, type_mirror)| type_mirror)
        .map_err(|error| parse_error(input, "type expression", &error))
}

/// Parse a complete type parameter declaration
///
/// # Errors
///
/// Returns [`Error::TypeParse`] when `input` is not a type parameter declaration.
pub fn parse_type_parameter(input: &str) -> Result<TypeParameter> {
    all_consuming(delimited(multispace0, type_parameter, multispace0))
        .parse(input)
        .map(|(_, parameter)| parameter)
        .map_err(|error| parse_error(input, "type parameter", &error))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests")]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_keywords() {
        assert_eq!(
            parse_type("int").unwrap(),
            TypeMirror::Primitive(PrimitiveKind::Int)
        );
        assert_eq!(
            parse_type(" boolean ").unwrap(),
            TypeMirror::Primitive(PrimitiveKind::Boolean)
        );
        assert_eq!(parse_type("void").unwrap(), TypeMirror::Other(OtherKind::Void));
    }

    #[test]
    fn test_byte_array() {
        assert_eq!(
            parse_type("byte[]").unwrap(),
            TypeMirror::array_of(TypeMirror::Primitive(PrimitiveKind::Byte))
        );
    }

    #[test]
    fn test_multi_dimensional_array() {
        let parsed = parse_type("java.lang.String[] []").unwrap();
        assert_eq!(
            parsed,
            TypeMirror::array_of(TypeMirror::array_of(TypeMirror::declared(
                "java.lang.String"
            )))
        );
    }

    #[test]
    fn test_nested_generics() {
        let parsed =
            parse_type("java.util.Map<java.lang.String,java.util.List<com.example.Item>>").unwrap();
        assert_eq!(
            parsed,
            TypeMirror::generic(
                "java.util.Map",
                vec![
                    TypeMirror::declared("java.lang.String"),
                    TypeMirror::generic(
                        "java.util.List",
                        vec![TypeMirror::declared("com.example.Item")]
                    ),
                ],
            )
        );
        assert_eq!(
            parsed.to_string(),
            "java.util.Map<java.lang.String, java.util.List<com.example.Item>>"
        );
    }

    #[test]
    fn test_wildcards() {
        assert_eq!(
            parse_type("java.util.List<?>").unwrap(),
            TypeMirror::generic("java.util.List", vec![TypeMirror::wildcard(None)])
        );
        assert_eq!(
            parse_type("java.util.List<? extends com.example.Animal>").unwrap(),
            TypeMirror::generic(
                "java.util.List",
                vec![TypeMirror::wildcard(Some(TypeMirror::declared(
                    "com.example.Animal"
                )))]
            )
        );
        // lower bounds carry no upper bound
        assert_eq!(
            parse_type("java.util.List<? super java.lang.Integer>").unwrap(),
            TypeMirror::generic("java.util.List", vec![TypeMirror::wildcard(None)])
        );
    }

    #[test]
    fn test_nested_class_names() {
        assert_eq!(
            parse_type("com.example.Outer$Inner").unwrap(),
            TypeMirror::declared("com.example.Outer$Inner")
        );
    }

    #[test]
    fn test_rejects_trailing_input() {
        let error = parse_type("java.util.List<java.lang.String>>").unwrap_err();
        assert!(matches!(error.current_context(), Error::TypeParse(_)));
    }

    #[test]
    fn test_rejects_empty_argument_list() {
        assert!(parse_type("java.util.List<>").is_err());
        assert!(parse_type("").is_err());
    }

    #[test]
    fn test_rejects_leading_digit() {
        assert!(parse_type("1abc.Foo").is_err());
        assert!(parse_type("com.example.2d.Point").is_err());
        assert!(parse_type_parameter("1T").is_err());
        assert_eq!(
            parse_type("com.example.v2.Point").unwrap(),
            TypeMirror::declared("com.example.v2.Point")
        );
        assert_eq!(
            parse_type("_Internal").unwrap(),
            TypeMirror::declared("_Internal")
        );
    }

    #[test]
    fn test_nesting_limit_reached_parses() {
        let nested = format!(
            "{}a{}",
            "a<".repeat(MAX_TYPE_NESTING),
            ">".repeat(MAX_TYPE_NESTING)
        );
        assert!(parse_type(&nested).is_ok());
        assert!(parse_type(&format!("int{}", "[]".repeat(MAX_TYPE_NESTING))).is_ok());
    }

    #[test]
    fn test_deep_generics_are_reported() {
        let deep = format!("{}a{}", "a<".repeat(200_000), ">".repeat(200_000));
        let error = parse_type(&deep).unwrap_err();
        assert!(matches!(
            error.current_context(),
            Error::TypeParse(message) if message.contains("nests deeper than")
        ));

        let just_past = format!(
            "{}a{}",
            "a<".repeat(MAX_TYPE_NESTING + 1),
            ">".repeat(MAX_TYPE_NESTING + 1)
        );
        assert!(parse_type(&just_past).is_err());
    }

    #[test]
    fn test_deep_arrays_and_wildcards_are_reported() {
        let dimensions = format!("int{}", "[]".repeat(MAX_TYPE_NESTING + 1));
        assert!(matches!(
            parse_type(&dimensions).unwrap_err().current_context(),
            Error::TypeParse(_)
        ));

        let many_dimensions = format!("int{}", "[]".repeat(200_000));
        assert!(parse_type(&many_dimensions).is_err());

        let wildcards = format!("java.util.List<{}a>", "? extends ".repeat(10_000));
        assert!(matches!(
            parse_type(&wildcards).unwrap_err().current_context(),
            Error::TypeParse(message) if message.contains("nests deeper than")
        ));
    }

    #[test]
    fn test_type_parameters() {
        let plain = parse_type_parameter("E").unwrap();
        assert_eq!(plain.name, "E");
        assert_eq!(plain.bound, None);

        let bounded = parse_type_parameter("T extends java.lang.Comparable<T>").unwrap();
        assert_eq!(bounded.name, "T");
        assert_eq!(
            bounded.bound,
            Some(TypeMirror::generic(
                "java.lang.Comparable",
                vec![TypeMirror::declared("T")]
            ))
        );
    }
}
