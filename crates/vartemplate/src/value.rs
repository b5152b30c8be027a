/*
 * value.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Values that template references resolve to.
//!
//! A [`Value`] is one of a small set of shapes, fixed when the value is put
//! into a lookup:
//!
//! - [`Value::Null`]: present but empty; renders as nothing.
//! - [`Value::Scalar`]: text, already converted for display.
//! - [`Value::Sequence`]: several pieces, each written in turn.
//! - [`Value::Thunk`]: computed on demand, once per reference occurrence.
//!
//! The `From` conversions at the bottom of this module are where host values
//! are mapped onto these shapes.

use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A value bound to a template variable.
#[derive(Clone)]
pub enum Value {
    /// Present but null. Renders as the empty string.
    Null,

    /// Display text.
    Scalar(String),

    /// Zero or more display pieces.
    Sequence(Sequence),

    /// Zero-argument callable producing the value to render.
    Thunk(Thunk),
}

/// A sequence of display pieces.
#[derive(Clone)]
pub enum Sequence {
    /// A list, yielding all of its items every time it is referenced.
    Items(Vec<String>),

    /// A one-shot producer. Each reference drains what is left of it, so a
    /// second reference to an exhausted stream expands to nothing.
    Stream(Rc<RefCell<dyn Iterator<Item = String>>>),
}

/// A zero-argument callable producing a [`Value`].
///
/// Invoked once per reference occurrence, never memoized.
#[derive(Clone)]
pub struct Thunk(Rc<dyn Fn() -> Value>);

impl Thunk {
    /// Wrap a callable.
    pub fn new<F, V>(f: F) -> Self
    where
        F: Fn() -> V + 'static,
        V: Into<Value>,
    {
        Thunk(Rc::new(move || f().into()))
    }

    /// Invoke the callable.
    pub fn call(&self) -> Value {
        (self.0)()
    }
}

impl Value {
    /// A scalar from anything displayable.
    pub fn scalar(value: impl fmt::Display) -> Self {
        Value::Scalar(value.to_string())
    }

    /// A reusable list of display pieces.
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        Value::Sequence(Sequence::Items(
            items.into_iter().map(|item| item.to_string()).collect(),
        ))
    }

    /// A one-shot stream of display pieces, pulled lazily while rendering.
    pub fn stream<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: fmt::Display,
        I::IntoIter: 'static,
    {
        let iter = items.into_iter().map(|item| item.to_string());
        Value::Sequence(Sequence::Stream(Rc::new(RefCell::new(iter))))
    }

    /// A value computed by `f` each time it is referenced.
    pub fn thunk<F, V>(f: F) -> Self
    where
        F: Fn() -> V + 'static,
        V: Into<Value>,
    {
        Value::Thunk(Thunk::new(f))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Resolve this value into the pieces written for one reference.
    ///
    /// Thunks are invoked here, and again on every call.
    pub fn pieces(&self) -> Pieces<'_> {
        match self {
            Value::Null => Pieces::One(Some(Cow::Borrowed(""))),
            Value::Scalar(text) => Pieces::One(Some(Cow::Borrowed(text))),
            Value::Sequence(Sequence::Items(items)) => Pieces::Items(items.iter()),
            Value::Sequence(Sequence::Stream(stream)) => Pieces::Stream(Rc::clone(stream)),
            Value::Thunk(thunk) => thunk.call().into_pieces(),
        }
    }

    /// Owned counterpart of [`Value::pieces`], used for thunk results.
    fn into_pieces(self) -> Pieces<'static> {
        match self {
            Value::Null => Pieces::One(Some(Cow::Borrowed(""))),
            Value::Scalar(text) => Pieces::One(Some(Cow::Owned(text))),
            Value::Sequence(Sequence::Items(items)) => Pieces::Owned(items.into_iter()),
            Value::Sequence(Sequence::Stream(stream)) => Pieces::Stream(stream),
            Value::Thunk(thunk) => thunk.call().into_pieces(),
        }
    }
}

/// Display pieces produced by resolving a [`Value`].
pub enum Pieces<'v> {
    One(Option<Cow<'v, str>>),
    Items(std::slice::Iter<'v, String>),
    Owned(std::vec::IntoIter<String>),
    Stream(Rc<RefCell<dyn Iterator<Item = String>>>),
}

impl<'v> Iterator for Pieces<'v> {
    type Item = Cow<'v, str>;

    fn next(&mut self) -> Option<Cow<'v, str>> {
        match self {
            Pieces::One(piece) => piece.take(),
            Pieces::Items(items) => items.next().map(|s| Cow::Borrowed(s.as_str())),
            Pieces::Owned(items) => items.next().map(Cow::Owned),
            Pieces::Stream(stream) => stream.borrow_mut().next().map(Cow::Owned),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Scalar(text) => f.debug_tuple("Scalar").field(text).finish(),
            Value::Sequence(seq) => f.debug_tuple("Sequence").field(seq).finish(),
            Value::Thunk(thunk) => fmt::Debug::fmt(thunk, f),
        }
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sequence::Items(items) => f.debug_tuple("Items").field(items).finish(),
            Sequence::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

impl fmt::Debug for Thunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Thunk(..)")
    }
}

// Conversions

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Scalar(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Scalar(value.to_string())
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Scalar(value.clone())
    }
}

macro_rules! scalar_from_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::scalar(value)
                }
            }
        )*
    };
}

scalar_from_display!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

impl<T: fmt::Display> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::list(items)
    }
}

impl<T: fmt::Display> From<&[T]> for Value {
    fn from(items: &[T]) -> Self {
        Value::list(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<Sequence> for Value {
    fn from(seq: Sequence) -> Self {
        Value::Sequence(seq)
    }
}

impl From<Thunk> for Value {
    fn from(thunk: Thunk) -> Self {
        Value::Thunk(thunk)
    }
}

/// JSON values map onto the closest shape: arrays become lists, objects are
/// rendered as their JSON text.
impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Array(items) => Value::Sequence(Sequence::Items(
                items.iter().map(json_display).collect(),
            )),
            other => Value::Scalar(json_display(&other)),
        }
    }
}

fn json_display(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
