/// Builds a [`Value`](crate::Value) from literal syntax.
///
/// Arrays and objects are freshly allocated on every expansion. Any other
/// expression is converted with `Value::from`.
///
/// ```rust
/// use serde_stringify::{stringify, value, StringifyOptions};
///
/// let data = value!({ "id": 7, "tags": ["a", "b"], "parent": null, "gone": undefined });
/// let text = stringify(&data, &StringifyOptions::new()).unwrap();
/// assert_eq!(text.as_deref(), Some(r#"{"id":7,"tags":["a","b"],"parent":null}"#));
/// ```
#[macro_export]
macro_rules! value {
    // Array elements are collected one comma-separated token run at a time.
    (@array [$($done:expr),*] [$($current:tt)+] , $($rest:tt)*) => {
        $crate::value!(@array [$($done,)* $crate::value!($($current)+)] [] $($rest)*)
    };

    (@array [$($done:expr),*] [$($current:tt)+]) => {
        vec![$($done,)* $crate::value!($($current)+)]
    };

    (@array [$($done:expr),*] []) => {
        vec![$($done),*]
    };

    (@array [$($done:expr),*] [$($current:tt)*] $next:tt $($rest:tt)*) => {
        $crate::value!(@array [$($done),*] [$($current)* $next] $($rest)*)
    };

    (@object $object:ident) => {};

    (@object $object:ident $key:literal : $($rest:tt)*) => {
        $crate::value!(@member $object $key [] $($rest)*);
    };

    (@member $object:ident $key:literal [$($current:tt)+] , $($rest:tt)*) => {
        $object.insert($key, $crate::value!($($current)+));
        $crate::value!(@object $object $($rest)*);
    };

    (@member $object:ident $key:literal [$($current:tt)+]) => {
        $object.insert($key, $crate::value!($($current)+));
    };

    (@member $object:ident $key:literal [$($current:tt)*] $next:tt $($rest:tt)*) => {
        $crate::value!(@member $object $key [$($current)* $next] $($rest)*);
    };

    (undefined) => {
        $crate::Value::Undefined
    };

    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([ $($tt:tt)* ]) => {
        $crate::Value::Array($crate::Array::from($crate::value!(@array [] [] $($tt)*)))
    };

    ({ $($tt:tt)* }) => {{
        let object = $crate::Object::new();
        $crate::value!(@object object $($tt)*);
        $crate::Value::Object(object)
    }};

    ($other:expr) => {
        $crate::Value::from($other)
    };
}
