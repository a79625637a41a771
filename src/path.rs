// this_file: src/path.rs

//! Path tracking: annotates each [`BasicEvent`] with the dotted path to
//! its containing context, turning it into a [`PrefixedEvent`].

use crate::error::Error;
use crate::event::{BasicEvent, EventKind, EventValue, PrefixedEvent};

/// One level of the path stack.
enum Segment {
    /// Inside an object, awaiting the key for the member currently open.
    PendingKey,
    /// Inside an object, at a member with this key.
    Key(String),
    /// Inside an array; every element's segment is the literal `item`.
    Item,
}

impl Segment {
    fn as_str(&self) -> &str {
        match self {
            Segment::PendingKey => "",
            Segment::Key(k) => k,
            Segment::Item => "item",
        }
    }
}

/// Wraps a [`BasicEvent`] source and annotates each event with the dotted
/// path to its containing context.
pub struct PathTracker<I> {
    inner: I,
    stack: Vec<Segment>,
    done: bool,
}

impl<I> PathTracker<I>
where
    I: Iterator<Item = Result<BasicEvent, Error>>,
{
    /// Wraps `inner`, a basic-event source, with path tracking.
    pub fn new(inner: I) -> Self {
        PathTracker {
            inner,
            stack: Vec::new(),
            done: false,
        }
    }

    /// Dot-joins every segment on the stack, in order.
    ///
    /// Mirrors the reference `'.'.join(path)`: an empty `Key("")` segment
    /// (a legitimate object key) still contributes an empty slot between
    /// dots, it is not skipped. `PendingKey` never reaches this join — the
    /// grammar guarantees a value event is only ever produced once the
    /// innermost open map's key has been set (or the stack doesn't end in
    /// `PendingKey` at all), except in the `map_key` branch itself, which
    /// excludes it explicitly via [`PathTracker::prefix_excluding_last`].
    fn current_prefix(&self) -> String {
        self.stack
            .iter()
            .map(Segment::as_str)
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Dot-joins every segment except the last, mirroring the reference's
    /// `'.'.join(path[:-1])` used only for the `map_key` event.
    fn prefix_excluding_last(&self) -> String {
        let len = self.stack.len().saturating_sub(1);
        self.stack[..len]
            .iter()
            .map(Segment::as_str)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl<I> Iterator for PathTracker<I>
where
    I: Iterator<Item = Result<BasicEvent, Error>>,
{
    type Item = Result<PrefixedEvent, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let event = match self.inner.next() {
            None => return None,
            Some(Err(err)) => {
                self.done = true;
                return Some(Err(err));
            }
            Some(Ok(event)) => event,
        };

        // `start_map`/`start_array` report the path to the container
        // itself, computed before it is pushed; `end_map`/`end_array`
        // report the same path, computed after it is popped. `map_key`
        // reports the path excluding the key slot it is about to fill,
        // i.e. the containing object's own path, not the previous
        // sibling key. Scalars report the path unchanged.
        let prefix = match event.kind {
            EventKind::MapKey => {
                let prefix = self.prefix_excluding_last();
                if let EventValue::Text(ref key) = event.value {
                    if let Some(top) = self.stack.last_mut() {
                        *top = Segment::Key(key.clone());
                    }
                }
                prefix
            }
            EventKind::StartMap => {
                let prefix = self.current_prefix();
                self.stack.push(Segment::PendingKey);
                prefix
            }
            EventKind::StartArray => {
                let prefix = self.current_prefix();
                self.stack.push(Segment::Item);
                prefix
            }
            EventKind::EndMap | EventKind::EndArray => {
                self.stack.pop();
                self.current_prefix()
            }
            _ => self.current_prefix(),
        };

        Some(Ok(PrefixedEvent::new(prefix, event.kind, event.value)))
    }
}

/// Parses `reader`-equivalent basic events into path-prefixed events using
/// default options. Most callers will use [`crate::parse`] instead, which
/// also performs the basic parse.
pub fn path_track<I>(basic_events: I) -> PathTracker<I>
where
    I: Iterator<Item = Result<BasicEvent, Error>>,
{
    PathTracker::new(basic_events)
}
