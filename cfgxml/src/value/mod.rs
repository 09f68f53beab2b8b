//! Configuration values

mod env;

pub use env::Environment;

use crate::util::with_stack;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Ordered mapping from key to value, as written in a dictionary literal
pub type Mapping = IndexMap<String, Value>;

/// A fully evaluated configuration value
///
/// `Clone` and `Drop` are written by hand so that copying or freeing a
/// deeply nested mapping never exhausts the native stack.
#[derive(Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Mapping(Mapping),
}

impl Value {
    /// Type tag used in the XML output
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Mapping(_) => "dict",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Mapping(_) => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(map) => Some(map),
            Value::Number(_) => None,
        }
    }

    /// Follow a path of keys through nested mappings
    pub fn lookup<'a>(&self, path: impl IntoIterator<Item = &'a str>) -> Option<&Value> {
        path.into_iter()
            .try_fold(self, |value, key| value.as_mapping()?.get(key))
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        match self {
            Value::Number(n) => Value::Number(*n),
            Value::Mapping(map) => Value::Mapping(
                map.iter()
                    .map(|(key, field)| (key.clone(), with_stack(|| field.clone())))
                    .collect(),
            ),
        }
    }
}

impl Drop for Value {
    fn drop(&mut self) {
        let Value::Mapping(map) = self else { return };
        if map.values().all(|field| matches!(field, Value::Number(_))) {
            return;
        }
        // Detach nested mappings onto a work list; each field is then
        // dropped with an empty mapping.
        let mut pending = vec![std::mem::take(map)];
        while let Some(mut map) = pending.pop() {
            for (_, mut field) in map.drain(..) {
                if let Value::Mapping(inner) = &mut field {
                    pending.push(std::mem::take(inner));
                }
            }
        }
    }
}

/// Decimal text of a number, always with a fractional part or exponent
pub fn format_number(n: f64) -> String {
    format!("{n:?}")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Mapping(map) => {
                write!(f, "([")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "])")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Value {
        let mut inner = Mapping::new();
        inner.insert("z".to_string(), Value::Number(2.0));
        let mut outer = Mapping::new();
        outer.insert("x".to_string(), Value::Number(1.0));
        outer.insert("y".to_string(), Value::Mapping(inner));
        Value::Mapping(outer)
    }

    #[test]
    fn test_type_name() {
        assert_eq!(Value::Number(1.0).type_name(), "number");
        assert_eq!(sample().type_name(), "dict");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(5.0), "5.0");
        assert_eq!(format_number(-7.0), "-7.0");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(1e20), "1e20");
    }

    #[test]
    fn test_value_display_uses_source_syntax() {
        assert_eq!(sample().to_string(), "([x: 1.0, y: ([z: 2.0])])");
        assert_eq!(Value::Mapping(Mapping::new()).to_string(), "([])");
    }

    #[test]
    fn test_lookup_nested() {
        let value = sample();
        assert_eq!(value.lookup(["y", "z"]), Some(&Value::Number(2.0)));
        assert_eq!(value.lookup(["x", "z"]), None);
        assert_eq!(value.lookup(["missing"]), None);
        assert_eq!(value.lookup([] as [&str; 0]), Some(&value));
    }

    /// A mapping nested `depth` levels deep under the key `k`
    fn nested(depth: usize) -> Value {
        (0..depth).fold(Value::Number(1.0), |value, _| {
            let mut map = Mapping::new();
            map.insert("k".to_string(), value);
            Value::Mapping(map)
        })
    }

    #[test]
    fn test_clone_is_deep() {
        let original = sample();
        let copy = original.clone();
        drop(original);
        assert_eq!(copy.lookup(["y", "z"]), Some(&Value::Number(2.0)));
    }

    #[test]
    fn test_clone_and_drop_very_deep_mapping() {
        let depth = 50_000;
        let value = nested(depth);
        let copy = value.clone();
        drop(value);
        assert_eq!(copy.lookup(vec!["k"; depth]), Some(&Value::Number(1.0)));
    }

    #[test]
    fn test_serialize_untagged() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, r#"{"x":1.0,"y":{"z":2.0}}"#);
    }
}
