use indexmap::IndexMap;
use serde::Serialize;

/// Key under which [`Unrecognized`] is serialized next to the option values.
pub const UNRECOGNIZED: &str = "unrecognized";

/// A parsed option value. The variant is fixed by the option's kind.
///
/// Serializes untagged, so a [`Config`] renders as a flat JSON record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// `arg` and `flag`.
    Text(Option<String>),
    /// `bit`.
    Switch(bool),
    /// `level`.
    Count(u32),
    /// `args`, `list` and `rest`.
    List(Vec<String>),
    /// `raw`; `None` until a `--` is seen (or a default is declared).
    Raw(Option<Vec<String>>),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => text.as_deref(),
            _ => None,
        }
    }

    pub fn as_switch(&self) -> Option<bool> {
        match self {
            Self::Switch(on) => Some(*on),
            _ => None,
        }
    }

    pub fn as_count(&self) -> Option<u32> {
        match self {
            Self::Count(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_raw(&self) -> Option<&[String]> {
        match self {
            Self::Raw(tail) => tail.as_deref(),
            _ => None,
        }
    }

    pub(crate) fn set_text(&mut self, value: &str) {
        if let Self::Text(text) = self {
            *text = Some(value.to_owned());
        }
    }

    pub(crate) fn set_switch(&mut self) {
        if let Self::Switch(on) = self {
            *on = true;
        }
    }

    pub(crate) fn increment(&mut self) {
        if let Self::Count(n) = self {
            *n = n.saturating_add(1);
        }
    }

    pub(crate) fn push(&mut self, item: &str) {
        if let Self::List(items) = self {
            items.push(item.to_owned());
        }
    }

    /// Drop whatever the list held (its default) and start over with `first`.
    pub(crate) fn restart(&mut self, first: &str) {
        if let Self::List(items) = self {
            items.clear();
            items.push(first.to_owned());
        }
    }

    pub(crate) fn set_raw(&mut self, tail: Vec<String>) {
        if let Self::Raw(raw) = self {
            *raw = Some(tail);
        }
    }
}

/// Tokens no option or slot accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Unrecognized {
    /// Unknown alias characters and unknown long names (camel-cased).
    pub named: Vec<String>,
    /// Positional tokens with nowhere to go.
    pub positional: Vec<String>,
}

impl Unrecognized {
    pub fn is_empty(&self) -> bool {
        self.named.is_empty() && self.positional.is_empty()
    }
}

/// Result of [`Parser::parse`](crate::Parser::parse).
///
/// Holds a value for every option in the definition, in declaration order,
/// plus the [`Unrecognized`] side channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    #[serde(flatten)]
    values: IndexMap<String, Value>,
    unrecognized: Unrecognized,
}

impl Config {
    pub(crate) fn seeded(values: IndexMap<String, Value>) -> Self {
        Self {
            values,
            unrecognized: Unrecognized::default(),
        }
    }

    pub(crate) fn slot_mut(&mut self, slot: usize) -> Option<&mut Value> {
        self.values.get_index_mut(slot).map(|(_, value)| value)
    }

    pub(crate) fn unrecognized_mut(&mut self) -> &mut Unrecognized {
        &mut self.unrecognized
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Value of an `arg` or `flag` option, if set or defaulted.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_text)
    }

    pub fn switch(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_switch)
    }

    pub fn count(&self, name: &str) -> Option<u32> {
        self.get(name).and_then(Value::as_count)
    }

    /// Items of an `args`, `list` or `rest` option.
    pub fn list(&self, name: &str) -> Option<&[String]> {
        self.get(name).and_then(Value::as_list)
    }

    /// Tokens captured after `--`, if the separator was seen or defaulted.
    pub fn raw(&self, name: &str) -> Option<&[String]> {
        self.get(name).and_then(Value::as_raw)
    }

    pub fn unrecognized(&self) -> &Unrecognized {
        &self.unrecognized
    }

    pub fn has_unrecognized(&self) -> bool {
        !self.unrecognized.is_empty()
    }

    /// Option values in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
