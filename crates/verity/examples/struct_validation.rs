//! Validating a derived struct and printing the failures.
//!
//! Run with `RUST_LOG=verity=debug` to see cache and walk events.

use verity::plugins::register_builtin_plugins;
use verity::prelude::*;

#[derive(Validate)]
pub struct Address {
    #[validate(tag = "string;min=2;max=64", rename = "City")]
    pub city: String,
}

#[derive(Validate)]
pub struct Customer {
    #[validate(tag = "string;minRunes=2;maxRunes=40", rename = "Name")]
    pub name: String,
    #[validate(tag = "string;email", rename = "Email")]
    pub email: String,
    #[validate(tag = "int;min=18;max=130", rename = "Age")]
    pub age: u8,
    #[validate(tag = "slice;max=3;foreach=(string;oneof=admin editor viewer)", rename = "Roles")]
    pub roles: Vec<String>,
    #[validate(rename = "Addresses")]
    pub addresses: Vec<Address>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    register_builtin_plugins();
    let engine = Engine::new();

    let customer = Customer {
        name: "J".into(),
        email: "j@localhost".into(),
        age: 16,
        roles: vec!["admin".into(), "owner".into()],
        addresses: vec![
            Address {
                city: "Oslo".into(),
            },
            Address { city: "X".into() },
        ],
    };

    match engine.validate_struct(&customer) {
        Ok(()) => println!("customer is valid"),
        Err(EngineError::Invalid(errors)) => {
            for (path, failures) in errors.as_map() {
                for failure in failures {
                    println!("{path}: {} ({})", failure.message, failure.code);
                }
            }
            println!("\nas JSON: {}", serde_json::to_string_pretty(&errors).unwrap_or_default());
        }
        Err(other) => eprintln!("validation could not run: {other}"),
    }

    let stats = engine.cache_stats();
    println!(
        "\ncache: {} entries, {} hits, {} misses",
        stats.entries, stats.hits, stats.misses
    );
}
