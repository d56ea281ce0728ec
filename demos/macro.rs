//! Using the value! macro for dynamic value construction.
//!
//! Run with: cargo run --example macro

use serde_stringify::{stringify, value, StringifyOptions, Value};
use std::error::Error;

fn show(value: &Value) -> Result<String, Box<dyn Error>> {
    let text = stringify(value, &StringifyOptions::pretty())?;
    Ok(text.unwrap_or_else(|| "<omitted>".to_string()))
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("Primitives:");
    println!("  undefined: {}", show(&value!(undefined))?);
    println!("  null:      {}", show(&value!(null))?);
    println!("  bool:      {}", show(&value!(true))?);
    println!("  number:    {}", show(&value!(1e21))?);
    println!("  text:      {}\n", show(&value!("Hello,\tJSON!"))?);

    let numbers = value!([1, 2, 3, f64::INFINITY]);
    let mixed = value!([1, "two", true, null, undefined]);

    println!("Arrays:");
    println!("  Numbers: {}", show(&numbers)?);
    println!("  Mixed:   {}\n", show(&mixed)?);

    let config = value!({
        "app": {
            "name": "MyApp",
            "version": "1.0.0"
        },
        "database": {
            "host": "localhost",
            "port": 5432,
            "password": undefined
        },
        "features": ["auth", "logging", "metrics"],
        "debug": true
    });

    println!("Nested structures:");
    println!("{}\n", show(&config)?);

    let items: Vec<Value> = (1..=3)
        .map(|id| value!({ "id": id, "status": (if id % 2 == 0 { "pending" } else { "active" }) }))
        .collect();
    let summary = value!({
        "total": 3,
        "items": items
    });

    println!("Dynamic construction:");
    println!("{}\n", show(&summary)?);

    if let Some(obj) = config.as_object() {
        if let Ok(Value::Object(app)) = obj.get("app") {
            if let Ok(Value::String(name)) = app.get("name") {
                println!("Accessing values:");
                println!("  App name: {}", name);
            }
        }
    }

    Ok(())
}
