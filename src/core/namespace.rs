// Composite stream identity: (stream_set, stream_name).
//
// Purpose
// - Identify one append-only log and its cached views across the whole system.
//
// Responsibilities
// - Keep the two components as distinct fields.
// - Encode the pair into the partition key used by the store.
//
// Boundaries
// - No input or output. The encoding is the only place that knows the
//   partition key format.
//
// Encoding
// - Components are joined with '|'; a '\' or '|' inside a component is
//   escaped with '\'. Names free of both characters keep the historical
//   "set|name" form unchanged, and distinct pairs can never encode to the
//   same partition string.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace {
    stream_set: String,
    stream_name: String,
}

impl Namespace {
    pub fn new(stream_set: impl Into<String>, stream_name: impl Into<String>) -> Self {
        Self {
            stream_set: stream_set.into(),
            stream_name: stream_name.into(),
        }
    }

    pub fn stream_set(&self) -> &str {
        &self.stream_set
    }

    pub fn stream_name(&self) -> &str {
        &self.stream_name
    }

    /// Partition key under which this namespace's records are stored.
    pub fn partition_key(&self) -> String {
        let mut key = String::with_capacity(self.stream_set.len() + self.stream_name.len() + 1);
        escape_into(&mut key, &self.stream_set);
        key.push('|');
        escape_into(&mut key, &self.stream_name);
        key
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.partition_key())
    }
}

fn escape_into(out: &mut String, component: &str) {
    for c in component.chars() {
        if c == '\\' || c == '|' {
            out.push('\\');
        }
        out.push(c);
    }
}
