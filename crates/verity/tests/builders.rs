//! Fluent builders behave exactly like the equivalent tags.

use pretty_assertions::assert_eq;
use rstest::rstest;
use verity::{Engine, ToValue, Validator, Value, codes, parse_tag};

fn outcome(v: &Validator, value: &Value) -> Option<(String, String)> {
    v.validate_value(value).err().map(|errors| {
        let e = errors.first().unwrap();
        (e.path.clone(), e.code.to_string())
    })
}

#[rstest]
#[case("ab")]
#[case("abc")]
#[case("abcdefghijk")]
#[case("héllo")]
#[case("")]
fn string_builder_matches_tag(#[case] input: &str) {
    let engine = Engine::new();
    let built = engine.string().min_length(3).max_length(10).build();
    let tagged = engine.from_tag("string;min=3;max=10").unwrap();
    let value = input.to_value();
    assert_eq!(outcome(&built, &value), outcome(&tagged, &value));
}

#[rstest]
#[case(vec![])]
#[case(vec!["a", "bb"])]
#[case(vec!["aa", "bb"])]
#[case(vec!["aa", "b", "c"])]
fn slice_builder_matches_tag(#[case] input: Vec<&str>) {
    let engine = Engine::new();
    let built = engine
        .slice()
        .min_length(1)
        .for_each_string(engine.string().min_length(2))
        .build();
    let tagged = engine.from_tag("slice;min=1;foreach=(string;min=2)").unwrap();
    let value = input.to_value();
    assert_eq!(outcome(&built, &value), outcome(&tagged, &value));
}

#[test]
fn builder_rules_equal_parsed_rules() {
    let engine = Engine::new();
    let rules = engine
        .string()
        .length(4)
        .min_runes(2)
        .max_runes(4)
        .one_of(["ab", "abcd"])
        .regex("[a-d]+")
        .into_rules();
    assert_eq!(
        rules,
        parse_tag("string;len=4;minRunes=2;maxRunes=4;oneof=ab,abcd;regex=[a-d]+").unwrap()
    );
}

#[test]
fn rune_rules_count_chars_not_bytes() {
    let engine = Engine::new();
    let v = engine.string().max_runes(3).build();
    assert!(v.validate("héé").is_ok());
    assert!(engine.string().max_length(3).build().validate("héé").is_err());
}

#[test]
fn one_of_reports_the_allowed_set() {
    let engine = Engine::new();
    let v = engine.string().one_of(["red", "green"]).build();
    assert!(v.validate("green").is_ok());
    let errors = v.validate("blue").unwrap_err();
    let e = errors.first().unwrap();
    assert_eq!(e.code, codes::STRING_ONE_OF);
    assert_eq!(e.message, "must be one of: green, red");
}

#[test]
fn reordered_sets_share_a_validator_and_its_message() {
    let engine = Engine::new();
    let first = engine.string().one_of(["red", "green"]).build();
    let second = engine.string().one_of(["green", "red"]).build();
    assert!(Validator::ptr_eq(&first, &second));
    let e = second.validate("blue").unwrap_err();
    assert_eq!(e.first().unwrap().message, "must be one of: green, red");
}

#[test]
fn int_builders() {
    let engine = Engine::new();
    let any_width = engine.int().min(0).max(255).build();
    assert!(any_width.validate(&200_u8).is_ok());
    assert!(any_width.validate(&-1_i32).is_err());
    assert!(any_width.validate("12").is_err());

    let exact = engine.int64().min(0).build();
    assert!(exact.validate(&5_i64).is_ok());
    let errors = exact.validate(&5_i32).unwrap_err();
    assert_eq!(errors.first().unwrap().code, codes::INT64_TYPE);
}

#[test]
fn bool_builder() {
    let engine = Engine::new();
    let v = engine.bool().build();
    assert!(v.validate(&false).is_ok());
    assert_eq!(
        v.validate(&1).unwrap_err().first().unwrap().code,
        codes::BOOL_TYPE
    );
}

#[test]
fn prebuilt_element_validators() {
    let engine = Engine::new();
    let element = engine.int().min(1).build();
    let v = engine.slice().max_length(3).for_each(element).build();

    assert!(v.validate(&[1, 2, 3]).is_ok());
    let errors = v.validate(&[1, 0, 3]).unwrap_err();
    assert_eq!(errors.first().unwrap().path, "[1]");
    assert_eq!(
        v.validate(&[1, 2, 3, 4]).unwrap_err().first().unwrap().code,
        codes::SLICE_MAX
    );
}

#[test]
fn custom_type_chains_with_builtin_rules() {
    verity::plugins::register_builtin_plugins();
    let engine = Engine::new();
    let v = engine
        .custom_type("email")
        .rule(verity::Rule::max_length(16))
        .build();

    assert!(v.validate("ada@example.com").is_ok());
    let code = |input: &str| v.validate(input).unwrap_err().first().unwrap().code.to_string();
    assert_eq!(code("not-an-email"), verity::plugins::email::CODE_INVALID);
    assert_eq!(code("ada.lovelace@example.com"), codes::STRING_MAX);
}

#[test]
fn unregistered_custom_types_fail_on_use() {
    let v = Engine::new().custom_type("no-such-type").build();
    let errors = v.validate("x").unwrap_err();
    assert_eq!(errors.first().unwrap().code, codes::UNKNOWN);
}
