use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::option::OptionDef;

/// Option name to [`OptionDef`], in declaration order.
///
/// Serializes as a plain JSON object:
///
/// ```json
/// { "input": { "type": "arg", "index": 0 }, "verbose": { "type": "level", "alias": "v" } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Definition {
    options: IndexMap<String, OptionDef>,
}

impl Definition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option. A repeated name replaces the earlier declaration but
    /// keeps its position.
    pub fn option(mut self, name: impl Into<String>, option: OptionDef) -> Self {
        self.insert(name, option);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, option: OptionDef) -> Option<OptionDef> {
        self.options.insert(name.into(), option)
    }

    pub fn get(&self, name: &str) -> Option<&OptionDef> {
        self.options.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionDef)> {
        self.options
            .iter()
            .map(|(name, option)| (name.as_str(), option))
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub(crate) fn name_at(&self, slot: usize) -> &str {
        self.options
            .get_index(slot)
            .map(|(name, _)| name.as_str())
            .unwrap_or_default()
    }
}

impl<N: Into<String>> FromIterator<(N, OptionDef)> for Definition {
    fn from_iter<I: IntoIterator<Item = (N, OptionDef)>>(iter: I) -> Self {
        Self {
            options: iter
                .into_iter()
                .map(|(name, option)| (name.into(), option))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Definition {
    type Item = (&'a String, &'a OptionDef);
    type IntoIter = indexmap::map::Iter<'a, String, OptionDef>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.iter()
    }
}
