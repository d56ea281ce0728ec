//! Basic JSON stringification of Serde types.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use serde_stringify::{to_string, to_string_pretty};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct User {
    id: u32,
    name: String,
    email: String,
    score: f64,
}

fn main() -> Result<(), Box<dyn Error>> {
    let users = vec![
        User {
            id: 42,
            name: "Alice Johnson".to_string(),
            email: "alice@example.com".to_string(),
            score: 0.1 + 0.2,
        },
        User {
            id: 43,
            name: "Bob \"the builder\" Smith".to_string(),
            email: "bob@example.com".to_string(),
            score: f64::NAN,
        },
    ];

    // Compact output
    let json = to_string(&users)?;
    println!("Compact:\n{}\n", json);

    // Two-space indentation
    println!("Pretty:\n{}\n", to_string_pretty(&users)?);

    // NaN has no JSON form and is written as null
    assert!(json.contains(r#""score":null"#));
    println!("✓ Non-finite numbers became null");

    Ok(())
}
