//! Localized failure messages.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use verity::{Engine, EngineError, Param, SimpleTranslator, Translator, Validate, codes};

fn french() -> SimpleTranslator {
    SimpleTranslator::new([
        (codes::STRING_MIN, "la longueur minimale est %d"),
        (codes::INT_MIN, "la valeur minimale est %d"),
        ("string.email.invalid", "adresse e-mail invalide"),
    ])
}

fn message(engine: &Engine, tag: &str, value: &str) -> String {
    let errors = engine.from_tag(tag).unwrap().validate(value).unwrap_err();
    errors.first().unwrap().message.clone()
}

#[test]
fn translated_codes_use_the_translator() {
    let engine = Engine::new().with_translator(french());
    assert_eq!(message(&engine, "string;min=3", "ab"), "la longueur minimale est 3");
}

#[test]
fn missing_keys_fall_back_to_english() {
    let engine = Engine::new().with_translator(french());
    assert_eq!(message(&engine, "string;max=2", "abc"), "maximum length is 2");
    assert_eq!(message(&engine, "string;oneof=a b", "c"), "must be one of: a, b");
}

#[test]
fn empty_translations_fall_back_too() {
    let silent = |_: &str, _: &[Param]| String::new();
    let engine = Engine::new().with_translator(silent);
    assert_eq!(message(&engine, "string;min=3", "ab"), "minimum length is 3");
}

#[test]
fn params_reach_closure_translators() {
    let shouting = |key: &str, params: &[Param]| {
        let rendered: Vec<String> = params.iter().map(ToString::to_string).collect();
        format!("{}({})", key.to_uppercase(), rendered.join(","))
    };
    let engine = Engine::new().with_translator(shouting);
    assert_eq!(message(&engine, "string;min=3", "ab"), "STRING.MIN(3)");
}

#[test]
fn translators_are_shared_across_forks() {
    let shared: Arc<dyn Translator> = Arc::new(french());
    let engine = Engine::new().with_shared_translator(Arc::clone(&shared));
    let forked = engine.path_separator("/");
    assert!(Arc::ptr_eq(forked.translator().unwrap(), &shared));
    assert!(Engine::new().translator().is_none());
}

#[derive(Validate)]
pub struct Signup {
    #[validate(tag = "int;min=18", rename = "Age")]
    pub age: u16,
}

#[test]
fn struct_walks_are_translated() {
    let engine = Engine::new().with_translator(french());
    let Err(EngineError::Invalid(errors)) = engine.validate_struct(&Signup { age: 12 }) else {
        panic!("expected failures");
    };
    let e = errors.first().unwrap();
    assert_eq!(e.path, "Age");
    assert_eq!(e.message, "la valeur minimale est 18");
}

#[test]
fn plugin_messages_are_translated() {
    verity::plugins::register_builtin_plugins();
    let engine = Engine::new().with_translator(french());
    assert_eq!(message(&engine, "string;email", "nope"), "adresse e-mail invalide");
    assert_eq!(
        message(&Engine::new(), "string;email", "nope"),
        "invalid email format"
    );
}

#[test]
fn english_table_is_complete_for_builtin_codes() {
    let english = SimpleTranslator::english();
    for (code, _) in verity::foundation::DEFAULT_MESSAGES {
        assert!(english.get(code).is_some(), "{code} missing");
    }
    assert_eq!(english.get("string.ulid.invalid"), Some("invalid ULID format"));
}
