//! Customizing output with StringifyOptions.
//!
//! Run with: cargo run --example custom_options

use serde::Serialize;
use serde_stringify::{stringify_with, to_string, to_string_with_options, value, Function, Key, StringifyOptions, Value};
use std::error::Error;

#[derive(Debug, Serialize)]
struct Config {
    name: String,
    version: String,
    debug: bool,
    api_key: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config {
        name: "MyApp".to_string(),
        version: "1.0.0".to_string(),
        debug: true,
        api_key: "s3cr3t".to_string(),
    };

    println!("Default (compact):");
    println!("{}\n", to_string(&config)?);

    println!("Four-space indentation:");
    let options = StringifyOptions::new().with_indent(4);
    println!("{}\n", to_string_with_options(&config, &options)?);

    println!("Tab indentation:");
    let options = StringifyOptions::new().with_indent("\t");
    println!("{}\n", to_string_with_options(&config, &options)?);

    println!("Allow-list (name, version):");
    let options = StringifyOptions::new().with_allow_list(["name", "version"]);
    println!("{}\n", to_string_with_options(&config, &options)?);

    println!("Transform (redact secrets):");
    let options = StringifyOptions::pretty().with_transform(|_holder, key, value| match key {
        Key::Name(name) if name.ends_with("_key") => Value::from("[redacted]"),
        _ => value,
    });
    println!("{}\n", to_string_with_options(&config, &options)?);

    // The untyped form takes the replacer and indentation as plain values
    println!("Untyped arguments:");
    let drop_booleans = Value::Function(Function::new(|args: &[Value]| {
        if args[1].is_bool() {
            Value::Undefined
        } else {
            args[1].clone()
        }
    }));
    let data = value!({ "name": "MyApp", "debug": true, "levels": [1, false, 3] });
    let text = stringify_with(&data, &drop_booleans, &Value::from(2))?;
    println!("{}", text.unwrap_or_default());

    Ok(())
}
