// this_file: src/selector.rs

//! Selective materialization: runs a prefix-matching driver over a
//! path-prefixed event stream and yields a [`Value`] for every subtree
//! whose prefix matches a requested pattern.

use crate::builder::ObjectBuilder;
use crate::error::Error;
use crate::event::{EventKind, PrefixedEvent};
use crate::value::Value;

/// A single `.`-separated segment of an `items()` pattern.
///
/// `"item"` matches any array index (mirroring the path tracker's literal
/// `item` segment); `"*"` matches anything (one object key or `item`, at
/// that one level); any other text matches that exact object key.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PatternSegment {
    Item,
    Wildcard,
    Key(String),
}

fn compile_pattern(pattern: &str) -> Vec<PatternSegment> {
    if pattern.is_empty() {
        return Vec::new();
    }
    pattern
        .split('.')
        .map(|segment| match segment {
            "item" => PatternSegment::Item,
            "*" => PatternSegment::Wildcard,
            other => PatternSegment::Key(other.to_string()),
        })
        .collect()
}

fn prefix_matches(pattern: &[PatternSegment], prefix: &str) -> bool {
    if pattern.is_empty() {
        return prefix.is_empty();
    }
    let actual: Vec<&str> = prefix.split('.').collect();
    if actual.len() != pattern.len() {
        return false;
    }
    pattern.iter().zip(actual.iter()).all(|(want, got)| match want {
        PatternSegment::Wildcard => true,
        PatternSegment::Item => *got == "item",
        PatternSegment::Key(k) => k == got,
    })
}

/// Drives a [`PrefixedEvent`] source, extracting a [`Value`] for every
/// event whose `prefix` matches `pattern`.
///
/// `pattern` is dot-separated, e.g. `"docs.item"` selects each element of
/// the array at the top-level `docs` key, and `""` selects the top-level
/// value itself (equivalent to collecting the whole document).
pub struct ItemSelector<I> {
    inner: I,
    pattern: Vec<PatternSegment>,
}

impl<I> ItemSelector<I>
where
    I: Iterator<Item = Result<PrefixedEvent, Error>>,
{
    /// Creates a selector over `inner` matching `pattern`.
    pub fn new(inner: I, pattern: &str) -> Self {
        ItemSelector {
            inner,
            pattern: compile_pattern(pattern),
        }
    }
}

impl<I> Iterator for ItemSelector<I>
where
    I: Iterator<Item = Result<PrefixedEvent, Error>>,
{
    type Item = Result<Value, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let event = match self.inner.next() {
                None => return None,
                Some(Err(err)) => return Some(Err(err)),
                Some(Ok(event)) => event,
            };

            if event.kind == EventKind::MapKey {
                continue;
            }

            if !prefix_matches(&self.pattern, &event.prefix) {
                continue;
            }

            if !event.kind.is_start() {
                let mut builder = ObjectBuilder::new();
                builder.event(&event.clone().into());
                return Some(Ok(builder.into_value().expect("single scalar event produces a value")));
            }

            // A container just opened at a matching prefix: delegate every
            // event belonging to its subtree to a fresh builder until the
            // matching End* event re-closes it.
            let mut builder = ObjectBuilder::new();
            builder.event(&event.clone().into());
            let mut depth = 1usize;

            while depth > 0 {
                let next_event = match self.inner.next() {
                    None => return Some(Err(incomplete_subtree())),
                    Some(Err(err)) => return Some(Err(err)),
                    Some(Ok(next_event)) => next_event,
                };
                if next_event.kind.is_start() {
                    depth += 1;
                } else if next_event.kind.is_end() {
                    depth -= 1;
                }
                builder.event(&next_event.clone().into());
            }

            return Some(Ok(builder
                .into_value()
                .expect("closed subtree always produces a value")));
        }
    }
}

fn incomplete_subtree() -> Error {
    Error::Incomplete(crate::error::IncompleteReason::UnclosedContainer)
}

impl From<PrefixedEvent> for crate::event::BasicEvent {
    fn from(e: PrefixedEvent) -> Self {
        crate::event::BasicEvent::new(e.kind, e.value)
    }
}

/// Runs `items` selection over `prefixed_events` for `pattern`.
pub fn items<I>(prefixed_events: I, pattern: &str) -> ItemSelector<I>
where
    I: Iterator<Item = Result<PrefixedEvent, Error>>,
{
    ItemSelector::new(prefixed_events, pattern)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::basic_parse;
    use crate::path::path_track;
    use crate::value::Number;
    use std::io::Cursor;

    fn select(input: &str, pattern: &str) -> Vec<Value> {
        let basic = basic_parse(Cursor::new(input.as_bytes().to_vec()));
        let prefixed = path_track(basic);
        items(prefixed, pattern).collect::<Result<Vec<_>, _>>().unwrap()
    }

    #[test]
    fn top_level_pattern_collects_whole_document() {
        let values = select("[1,2,3]", "");
        assert_eq!(values.len(), 1);
        assert_eq!(
            values[0],
            Value::Array(vec![
                Value::Number(Number::Integer(1)),
                Value::Number(Number::Integer(2)),
                Value::Number(Number::Integer(3)),
            ])
        );
    }

    #[test]
    fn array_items_are_selected_individually() {
        let values = select(r#"{"docs":[{"n":1},{"n":2}]}"#, "docs.item");
        assert_eq!(values.len(), 2);
        assert_eq!(
            values[0].as_object().unwrap().get("n"),
            Some(&Value::Number(Number::Integer(1)))
        );
        assert_eq!(
            values[1].as_object().unwrap().get("n"),
            Some(&Value::Number(Number::Integer(2)))
        );
    }

    #[test]
    fn nested_scalar_field_selection() {
        let values = select(r#"{"docs":[{"n":1},{"n":2}]}"#, "docs.item.n");
        assert_eq!(
            values,
            vec![
                Value::Number(Number::Integer(1)),
                Value::Number(Number::Integer(2)),
            ]
        );
    }

    #[test]
    fn wildcard_matches_any_key_at_that_level() {
        let values = select(r#"{"a":1,"b":2}"#, "*");
        assert_eq!(
            values,
            vec![
                Value::Number(Number::Integer(1)),
                Value::Number(Number::Integer(2)),
            ]
        );
    }

    #[test]
    fn no_matches_yields_empty() {
        assert!(select(r#"{"a":1}"#, "missing").is_empty());
    }
}
