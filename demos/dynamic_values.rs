//! Shared references, accessors and custom conversion hooks.
//!
//! Run with: cargo run --example dynamic_values

use serde::Serialize;
use serde_stringify::{
    stringify, to_value, AccessError, Custom, Date, Key, Object, StringifyOptions, ToJson, Value,
};
use std::error::Error;

#[derive(Debug, Serialize)]
struct User {
    id: u32,
    name: String,
    roles: Vec<String>,
}

/// Money stored in minor units, written as a decimal string.
struct Money {
    cents: i64,
    currency: &'static str,
}

impl ToJson for Money {
    fn to_json(&self, _key: &Key) -> Value {
        Value::from(format!("{}.{:02} {}", self.cents / 100, self.cents % 100, self.currency))
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let options = StringifyOptions::pretty();

    // Convert an existing struct into a shared value graph
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        roles: vec!["admin".to_string(), "developer".to_string()],
    };
    let user_value = to_value(&user)?;

    // The same handle may appear more than once; only cycles are rejected
    let audit = Object::new();
    audit.insert("created_by", user_value.clone());
    audit.insert("updated_by", user_value);
    audit.insert("created_at", Date::from_millis(1_700_000_000_000.0));
    audit.insert("balance", Custom::new(Money { cents: 1250, currency: "EUR" }));

    // Accessors run while serializing; a failing one is silently skipped
    audit.define_getter("revision", || Ok(Value::from(7)));
    audit.define_getter("secret", || Err(AccessError::new("permission denied")));

    let text = stringify(&Value::Object(audit), &options)?.unwrap_or_default();
    println!("Audit record:\n{}\n", text);

    // Runtime type checking
    let root = Value::Date(Date::now());
    println!("Type checks:");
    println!("  is_date:   {}", root.is_date());
    println!("  is_object: {}", root.is_object());
    println!("  now:       {}", stringify(&root, &options)?.unwrap_or_default());

    Ok(())
}
