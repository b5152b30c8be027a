/*
 * context.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Variable lookup for template rendering.
//!
//! The expander only needs to ask "what is bound to this name?", which is
//! the [`Lookup`] trait. [`Context`] is the owned map most callers use, but
//! plain `HashMap`s and `BTreeMap`s of [`Value`]s work as well.

use crate::error::{TemplateError, TemplateResult};
use crate::value::Value;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Read-only access to template variables.
///
/// `None` means the name is unbound, which is different from being bound to
/// [`Value::Null`].
pub trait Lookup {
    fn lookup(&self, name: &str) -> Option<&Value>;
}

impl<L: Lookup + ?Sized> Lookup for &L {
    fn lookup(&self, name: &str) -> Option<&Value> {
        (**self).lookup(name)
    }
}

impl<S: BuildHasher> Lookup for HashMap<String, Value, S> {
    fn lookup(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl Lookup for BTreeMap<String, Value> {
    fn lookup(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

/// A set of variable bindings.
#[derive(Debug, Clone, Default)]
pub struct Context {
    variables: HashMap<String, Value>,
}

impl Context {
    /// Create a new empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a variable, replacing any previous binding.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Builder-style [`Context::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.variables.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.variables.remove(key)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Iterate over the bindings in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// A copy of this context with `overrides` applied on top.
    ///
    /// Bindings in `overrides` win on key collision.
    pub fn merged(&self, overrides: Context) -> Context {
        let mut merged = self.clone();
        merged.extend(overrides);
        merged
    }
}

impl Lookup for Context {
    fn lookup(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Context {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = Context::new();
        context.extend(iter);
        context
    }
}

impl IntoIterator for Context {
    type Item = (String, Value);
    type IntoIter = std::collections::hash_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.variables.into_iter()
    }
}

/// Build a context from a JSON object, one binding per member.
impl TryFrom<serde_json::Value> for Context {
    type Error = TemplateError;

    fn try_from(value: serde_json::Value) -> TemplateResult<Self> {
        match value {
            serde_json::Value::Object(members) => Ok(members.into_iter().collect()),
            other => Err(TemplateError::InvalidContext {
                found: json_kind(&other).to_string(),
            }),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_vs_null() {
        let ctx = Context::new().with("present", Value::Null);
        assert!(ctx.lookup("present").is_some_and(Value::is_null));
        assert!(ctx.lookup("absent").is_none());
    }

    #[test]
    fn test_merged_overrides_win() {
        let base = Context::new().with("x", "base_x").with("y", "base_y");
        let overrides = Context::new().with("x", "override_x");

        let merged = base.merged(overrides);
        assert!(matches!(merged.get("x"), Some(Value::Scalar(s)) if s == "override_x"));
        assert!(matches!(merged.get("y"), Some(Value::Scalar(s)) if s == "base_y"));

        // Base unchanged
        assert!(matches!(base.get("x"), Some(Value::Scalar(s)) if s == "base_x"));
    }

    #[test]
    fn test_from_iterator() {
        let ctx: Context = [("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(ctx.len(), 2);
        assert!(ctx.contains_key("a"));
        assert!(!ctx.is_empty());
    }

    #[test]
    fn test_remove_and_iter() {
        let mut ctx = Context::new().with("a", "1").with("b", Value::Null);
        assert!(matches!(ctx.remove("a"), Some(Value::Scalar(s)) if s == "1"));
        assert!(ctx.remove("a").is_none());

        let keys: Vec<&str> = ctx.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b"]);
        assert!(ctx.iter().all(|(_, v)| v.is_null()));
    }

    #[test]
    fn test_from_json_object() {
        let json = serde_json::json!({"name": "World", "items": ["a", "b"], "none": null});
        let ctx = Context::try_from(json).unwrap();
        assert_eq!(ctx.len(), 3);
        assert!(matches!(ctx.get("items"), Some(Value::Sequence(_))));
        assert!(ctx.get("none").is_some_and(Value::is_null));
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        let err = Context::try_from(serde_json::json!(["a"])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid context: expected a mapping, found an array"
        );
    }

    #[test]
    fn test_map_lookups() {
        let mut map = HashMap::new();
        map.insert("k".to_string(), Value::from("v"));
        assert!(map.lookup("k").is_some());

        let mut tree = BTreeMap::new();
        tree.insert("k".to_string(), Value::Null);
        assert!(tree.lookup("k").is_some_and(Value::is_null));
        assert!((&tree).lookup("missing").is_none());
    }
}
