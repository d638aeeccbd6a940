//! Tag parser
//!
//! Grammar:
//!
//! ```text
//! tag       := baseType (';' rule)*
//! baseType  := "string" | "int" | "int64" | "slice" | "bool"
//! rule      := key | key '=' value
//! ```
//!
//! Splitting on `;` is parenthesis-aware so that `foreach=(string;min=2)`
//! stays one segment.

use super::error::{TagError, truncate};
use super::{Kind, Rule, args};

/// Parses a validation tag into its rule list.
///
/// An empty tag yields an empty list. Malformed input always yields an
/// error, never a partial list.
///
/// # Examples
///
/// ```rust,ignore
/// let rules = verity::parse_tag("slice;min=1;foreach=(string;min=2)")?;
/// assert_eq!(rules.len(), 3);
/// ```
pub fn parse_tag(tag: &str) -> Result<Vec<Rule>, TagError> {
    if tag.is_empty() {
        return Ok(Vec::new());
    }

    let parts = split_segments(tag)?;
    let Some((&base, rest)) = parts.split_first() else {
        return Ok(Vec::new());
    };

    let (base_rule, parse_part): (Rule, fn(&str) -> Result<Rule, TagError>) = match base {
        "string" => (Rule::new(Kind::STRING), parse_string_rule),
        "int" => (Rule::new(Kind::INT), parse_int_rule),
        "int64" => (Rule::new(Kind::INT64), parse_int_rule),
        "slice" => (Rule::new(Kind::SLICE), parse_slice_rule),
        "bool" => (Rule::new(Kind::BOOL), parse_bool_rule),
        other => {
            return Err(TagError::UnknownType {
                ty: truncate(other),
            });
        }
    };

    let mut rules = Vec::with_capacity(parts.len());
    rules.push(base_rule);
    for part in rest.iter().filter(|p| !p.is_empty()) {
        rules.push(parse_part(part)?);
    }
    Ok(rules)
}

/// Splits on `;` outside parentheses.
///
/// A `)` with no opener, or an unclosed `(`, is an error. The value of a
/// top-level `regex=` segment is opaque: its parentheses belong to the
/// pattern, which is checked when the rule is compiled.
fn split_segments(tag: &str) -> Result<Vec<&str>, TagError> {
    let unbalanced = || TagError::UnbalancedParens { tag: truncate(tag) };

    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut opaque = tag.starts_with(REGEX_PREFIX);

    for (i, b) in tag.bytes().enumerate() {
        match b {
            b';' if depth == 0 => {
                parts.push(&tag[start..i]);
                start = i + 1;
                opaque = tag[start..].starts_with(REGEX_PREFIX);
            }
            _ if opaque => {}
            b'(' => depth += 1,
            b')' => depth = depth.checked_sub(1).ok_or_else(unbalanced)?,
            _ => {}
        }
    }

    if depth != 0 {
        return Err(unbalanced());
    }
    if start < tag.len() {
        parts.push(&tag[start..]);
    }
    Ok(parts)
}

const REGEX_PREFIX: &str = "regex=";

fn parse_number(base: &'static str, part: &str, raw: &str) -> Result<i64, TagError> {
    raw.parse::<i64>().map_err(|source| TagError::InvalidNumber {
        base,
        segment: truncate(part),
        source,
    })
}

fn parse_string_rule(part: &str) -> Result<Rule, TagError> {
    let number = |raw: &str| parse_number("string", part, raw);

    let rule = match part.split_once('=') {
        Some(("len" | "length", raw)) => Rule::length(number(raw)?),
        Some(("min", raw)) => Rule::min_length(number(raw)?),
        Some(("max", raw)) => Rule::max_length(number(raw)?),
        Some(("minRunes", raw)) => Rule::min_runes(number(raw)?),
        Some(("maxRunes", raw)) => Rule::max_runes(number(raw)?),
        Some(("regex", pattern)) => Rule::regex(pattern),
        Some(("oneof", raw)) => Rule::one_of(split_one_of(raw)),
        // anything else names a plugin rule
        _ => Rule::new(Kind::new(part.to_owned())),
    };
    Ok(rule)
}

fn split_one_of(raw: &str) -> Vec<&str> {
    if raw.contains(',') {
        raw.split(',').collect()
    } else {
        raw.split_whitespace().collect()
    }
}

fn parse_int_rule(part: &str) -> Result<Rule, TagError> {
    let number = |raw: &str| parse_number("int", part, raw);

    match part.split_once('=') {
        Some(("min", raw)) => Ok(Rule::min_int(number(raw)?)),
        Some(("max", raw)) => Ok(Rule::max_int(number(raw)?)),
        _ => Err(TagError::UnknownRule {
            base: "int",
            segment: truncate(part),
        }),
    }
}

fn parse_slice_rule(part: &str) -> Result<Rule, TagError> {
    let number = |raw: &str| parse_number("slice", part, raw);

    match part.split_once('=') {
        Some(("len" | "length", raw)) => Ok(Rule::slice_length(number(raw)?)),
        Some(("min", raw)) => Ok(Rule::min_slice_length(number(raw)?)),
        Some(("max", raw)) => Ok(Rule::max_slice_length(number(raw)?)),
        Some(("foreach", inner)) => parse_foreach(inner),
        _ => Err(TagError::UnknownRule {
            base: "slice",
            segment: truncate(part),
        }),
    }
}

fn parse_foreach(inner: &str) -> Result<Rule, TagError> {
    let Some(body) = inner
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
    else {
        return Err(TagError::ForeachNotWrapped {
            inner: truncate(inner),
        });
    };

    let rules = parse_tag(body).map_err(|source| TagError::InvalidForeach {
        source: Box::new(source),
    })?;
    if rules.is_empty() {
        return Err(TagError::EmptyForeach);
    }
    Ok(Rule::for_each(rules))
}

fn parse_bool_rule(part: &str) -> Result<Rule, TagError> {
    Err(TagError::UnknownRule {
        base: "bool",
        segment: truncate(part),
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Arg;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn empty_tag_is_empty_list() {
        assert_eq!(parse_tag("").unwrap(), Vec::<Rule>::new());
    }

    #[test]
    fn string_rules() {
        let rules = parse_tag("string;min=3;max=10;len=4;minRunes=1;maxRunes=9").unwrap();
        assert_eq!(rules, vec![
            Rule::new(Kind::STRING),
            Rule::min_length(3),
            Rule::max_length(10),
            Rule::length(4),
            Rule::min_runes(1),
            Rule::max_runes(9),
        ]);
    }

    #[test]
    fn empty_segments_are_skipped() {
        let rules = parse_tag("string;;min=3;").unwrap();
        assert_eq!(rules, vec![Rule::new(Kind::STRING), Rule::min_length(3)]);
    }

    #[rstest]
    #[case("oneof=red,green,blue", &["red", "green", "blue"])]
    #[case("oneof=red green  blue", &["red", "green", "blue"])]
    #[case("oneof=a b,c", &["a b", "c"])]
    fn one_of_delimiters(#[case] segment: &str, #[case] expected: &[&str]) {
        let rules = parse_tag(&format!("string;{segment}")).unwrap();
        let values: Vec<&str> = rules[1]
            .str_set_arg(args::VALUES)
            .unwrap()
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(values, expected);
    }

    #[test]
    fn top_level_regex_parens_are_left_to_the_compiler() {
        let rules = parse_tag("string;regex=(;min=1").unwrap();
        assert_eq!(rules[1], Rule::regex("("));
        assert_eq!(rules[2], Rule::min_length(1));

        let rules = parse_tag("string;regex=(a|b)+").unwrap();
        assert_eq!(rules[1], Rule::regex("(a|b)+"));
    }

    #[test]
    fn regex_keeps_everything_after_first_equals() {
        let rules = parse_tag("string;regex=a=b").unwrap();
        assert_eq!(rules[1], Rule::regex("a=b"));
    }

    #[test]
    fn unknown_string_tokens_are_plugin_kinds() {
        let rules = parse_tag("string;email;x=y").unwrap();
        assert_eq!(rules[1].kind.as_str(), "email");
        assert_eq!(rules[2].kind.as_str(), "x=y");
        assert!(rules[1].args.is_empty());
    }

    #[test]
    fn int_bases() {
        assert_eq!(parse_tag("int;min=-5;max=18").unwrap(), vec![
            Rule::new(Kind::INT),
            Rule::min_int(-5),
            Rule::max_int(18),
        ]);
        assert_eq!(parse_tag("int64").unwrap(), vec![Rule::new(Kind::INT64)]);
    }

    #[test]
    fn foreach_nests_rules_and_elem() {
        let rules = parse_tag("slice;min=1;foreach=(string;min=2)").unwrap();
        assert_eq!(rules.len(), 3);
        let each = &rules[2];
        assert_eq!(each.kind, Kind::FOR_EACH);
        assert_eq!(
            each.arg(args::RULES),
            Some(&Arg::Rules(vec![Rule::new(Kind::STRING), Rule::min_length(2)]))
        );
        assert_eq!(each.elem.as_deref(), Some(&Rule::new(Kind::STRING)));
    }

    #[test]
    fn nested_foreach() {
        let rules = parse_tag("slice;foreach=(slice;max=2;foreach=(int;min=0))").unwrap();
        let inner = rules[1].rules_arg(args::RULES).unwrap();
        assert_eq!(inner.len(), 3);
        assert_eq!(inner[2].kind, Kind::FOR_EACH);
    }

    #[rstest]
    #[case("float", TagError::UnknownType { ty: "float".into() })]
    #[case("int;foo", TagError::UnknownRule { base: "int", segment: "foo".into() })]
    #[case("slice;bar=1", TagError::UnknownRule { base: "slice", segment: "bar=1".into() })]
    #[case("bool;required", TagError::UnknownRule { base: "bool", segment: "required".into() })]
    #[case("slice;foreach=string", TagError::ForeachNotWrapped { inner: "string".into() })]
    #[case("slice;foreach=()", TagError::EmptyForeach)]
    #[case("slice;foreach=(string", TagError::UnbalancedParens { tag: "slice;foreach=(string".into() })]
    #[case("string;min=3)", TagError::UnbalancedParens { tag: "string;min=3)".into() })]
    #[case("slice;foreach=(string;regex=()", TagError::UnbalancedParens { tag: "slice;foreach=(string;regex=()".into() })]
    fn rejects(#[case] tag: &str, #[case] expected: TagError) {
        assert_eq!(parse_tag(tag).unwrap_err(), expected);
    }

    #[test]
    fn invalid_numbers_name_the_segment() {
        let err = parse_tag("string;min=abc").unwrap_err();
        assert!(matches!(
            &err,
            TagError::InvalidNumber { base: "string", segment, .. } if segment == "min=abc"
        ));
        assert!(err.to_string().starts_with("invalid string rule min=abc"));
    }

    #[test]
    fn foreach_errors_wrap_the_inner_error() {
        let err = parse_tag("slice;foreach=(float)").unwrap_err();
        assert_eq!(err, TagError::InvalidForeach {
            source: Box::new(TagError::UnknownType { ty: "float".into() }),
        });
    }

    #[test]
    fn long_segments_are_truncated() {
        let tag = format!("int;{}", "z".repeat(80));
        let TagError::UnknownRule { segment, .. } = parse_tag(&tag).unwrap_err() else {
            panic!("expected UnknownRule");
        };
        assert_eq!(segment.len(), 53);
        assert!(segment.ends_with("..."));
    }
}
