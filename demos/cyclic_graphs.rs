//! Detecting cycles in shared value graphs.
//!
//! Run with: cargo run --example cyclic_graphs

use serde_stringify::{stringify, Array, Error, Object, StringifyOptions, Value};

fn main() {
    let options = StringifyOptions::new();

    // A tree where two branches share one leaf is fine
    let leaf = Object::new();
    leaf.insert("name", "leaf");
    let tree = Array::new();
    tree.push(leaf.clone());
    tree.push(leaf.clone());
    match stringify(&Value::Array(tree), &options) {
        Ok(text) => println!("Shared leaf:  {}", text.unwrap_or_default()),
        Err(e) => println!("Unexpected:   {}", e),
    }

    // A node that points back at its parent is a cycle
    let parent = Object::new();
    let child = Object::new();
    child.insert("parent", parent.clone());
    parent.insert("child", child.clone());
    match stringify(&Value::Object(parent), &options) {
        Ok(text) => println!("Unexpected:   {:?}", text),
        Err(Error::CyclicStructure { key }) => println!("Cycle found at key {:?}", key),
        Err(e) => println!("Other error:  {}", e),
    }

    // Cutting the back-reference makes the graph serializable
    child.remove("parent");
    if let Ok(Some(text)) = stringify(&Value::Object(child), &options) {
        println!("After cut:    {}", text);
    }
}
