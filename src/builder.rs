// this_file: src/builder.rs

//! Materializes a stream of [`BasicEvent`]s back into a [`Value`] tree.

use crate::event::{BasicEvent, EventKind, EventValue};
use crate::value::{Number, Value};
use rustc_hash::FxHashMap;

/// A container being filled on the builder's stack.
enum Frame {
    Array(Vec<Value>),
    Object(FxHashMap<String, Value>),
}

/// Builds a [`Value`] tree from a sequence of [`BasicEvent`]s fed one at a
/// time via [`ObjectBuilder::event`].
///
/// Mirrors the reference `ObjectBuilder`: a single `pending_key` field
/// (not one per stack frame) tracks the key awaiting its value, which is
/// sound because JSON's grammar guarantees only the innermost open object
/// can have a key set but no value yet at any point in the event stream.
///
/// Containers are attached to their parent when they close (`EndMap`,
/// `EndArray`), not when they open — the stack holds the container
/// currently being filled, and popping one finishes it.
pub struct ObjectBuilder {
    stack: Vec<Frame>,
    pending_key: Option<String>,
    root: Option<Value>,
}

impl ObjectBuilder {
    /// Creates a new, empty builder.
    pub fn new() -> Self {
        ObjectBuilder {
            stack: Vec::new(),
            pending_key: None,
            root: None,
        }
    }

    /// Feeds one event into the builder.
    ///
    /// Call [`ObjectBuilder::value`] once all events for a single document
    /// (or subtree, for [`crate::selector::items`]) have been fed.
    pub fn event(&mut self, event: &BasicEvent) {
        match event.kind {
            EventKind::MapKey => {
                if let EventValue::Text(ref key) = event.value {
                    self.pending_key = Some(key.clone());
                }
            }
            EventKind::StartMap => {
                self.stack.push(Frame::Object(FxHashMap::default()));
            }
            EventKind::StartArray => {
                self.stack.push(Frame::Array(Vec::new()));
            }
            EventKind::EndMap => {
                if let Some(Frame::Object(map)) = self.stack.pop() {
                    self.attach(Value::Object(map));
                }
            }
            EventKind::EndArray => {
                if let Some(Frame::Array(arr)) = self.stack.pop() {
                    self.attach(Value::Array(arr));
                }
            }
            EventKind::Null => self.attach(Value::Null),
            EventKind::Boolean => {
                if let EventValue::Bool(b) = event.value {
                    self.attach(Value::Bool(b));
                }
            }
            EventKind::Number => {
                if let EventValue::Number(ref n) = event.value {
                    self.attach(Value::Number(clone_number(n)));
                }
            }
            EventKind::String => {
                if let EventValue::Text(ref s) = event.value {
                    self.attach(Value::String(s.clone()));
                }
            }
        }
    }

    /// Attaches a completed scalar or container value to whatever is
    /// currently open: the pending key of the innermost object, the tail
    /// of the innermost array, or the document root if nothing is open.
    fn attach(&mut self, value: Value) {
        match self.stack.last_mut() {
            Some(Frame::Array(arr)) => arr.push(value),
            Some(Frame::Object(map)) => {
                // Last value wins on duplicate keys, same as the reference
                // builder's plain dict assignment.
                if let Some(key) = self.pending_key.take() {
                    map.insert(key, value);
                }
            }
            None => self.root = Some(value),
        }
    }

    /// Borrows the completed value without consuming the builder.
    ///
    /// `None` until the outermost container (or the sole top-level scalar)
    /// has closed.
    pub fn value(&self) -> Option<&Value> {
        self.root.as_ref()
    }

    /// Consumes the builder, returning the completed value.
    ///
    /// Returns `None` if no complete top-level value was ever fed (an
    /// empty event stream, or one that never reached a closing event for
    /// its outermost container).
    pub fn into_value(self) -> Option<Value> {
        self.root
    }
}

impl Default for ObjectBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn clone_number(n: &Number) -> Number {
    match n {
        Number::Integer(i) => Number::Integer(*i),
        Number::Decimal(d) => Number::Decimal(d.clone()),
    }
}
