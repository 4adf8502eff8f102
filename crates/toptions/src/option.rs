use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::Value;

/// A single entry of a [`Definition`](crate::Definition).
///
/// The serialized form is internally tagged by `type`, e.g.
/// `{"type": "flag", "alias": "o", "default": "out.txt"}`. Omitted defaults
/// fall back to the natural default of the variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum OptionDef {
    /// Positional string filled by the `index`-th positional slot.
    Arg {
        index: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default: Option<String>,
    },
    /// Catch-all for positional tokens beyond the declared slots.
    Args {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        default: Vec<String>,
    },
    /// Presence switch.
    Bit {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alias: Option<char>,
        #[serde(default)]
        default: bool,
    },
    /// Named string value (`--name value`).
    Flag {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alias: Option<char>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default: Option<String>,
    },
    /// Repeatable named value, accumulated in encounter order.
    List {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alias: Option<char>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        default: Vec<String>,
    },
    /// Repeatable counter (`-vvv`).
    Level {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alias: Option<char>,
        #[serde(default)]
        default: u32,
    },
    /// Everything after a literal `--`, verbatim.
    Raw {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default: Option<Vec<String>>,
    },
    /// Every token from the `index`-th positional token onward.
    Rest {
        index: usize,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        default: Vec<String>,
    },
}

/// The variant of an [`OptionDef`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionKind {
    Arg,
    Args,
    Bit,
    Flag,
    List,
    Level,
    Raw,
    Rest,
}

impl OptionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Arg => "arg",
            Self::Args => "args",
            Self::Bit => "bit",
            Self::Flag => "flag",
            Self::List => "list",
            Self::Level => "level",
            Self::Raw => "raw",
            Self::Rest => "rest",
        }
    }

    /// Whether options of this kind are addressed by name (`--name`, `-x`).
    pub fn is_named(self) -> bool {
        matches!(self, Self::Bit | Self::Flag | Self::List | Self::Level)
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl OptionDef {
    pub fn kind(&self) -> OptionKind {
        match self {
            Self::Arg { .. } => OptionKind::Arg,
            Self::Args { .. } => OptionKind::Args,
            Self::Bit { .. } => OptionKind::Bit,
            Self::Flag { .. } => OptionKind::Flag,
            Self::List { .. } => OptionKind::List,
            Self::Level { .. } => OptionKind::Level,
            Self::Raw { .. } => OptionKind::Raw,
            Self::Rest { .. } => OptionKind::Rest,
        }
    }

    /// Single-character alias, for the named kinds that declare one.
    pub fn alias(&self) -> Option<char> {
        match self {
            Self::Bit { alias, .. }
            | Self::Flag { alias, .. }
            | Self::List { alias, .. }
            | Self::Level { alias, .. } => *alias,
            Self::Arg { .. } | Self::Args { .. } | Self::Raw { .. } | Self::Rest { .. } => None,
        }
    }

    /// Declared index for `Arg` (slot position) and `Rest` (trigger ordinal).
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Arg { index, .. } | Self::Rest { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// The value a parse starts from before any token is seen.
    pub fn default_value(&self) -> Value {
        match self {
            Self::Arg { default, .. } | Self::Flag { default, .. } => Value::Text(default.clone()),
            Self::Args { default } | Self::List { default, .. } | Self::Rest { default, .. } => {
                Value::List(default.clone())
            }
            Self::Bit { default, .. } => Value::Switch(*default),
            Self::Level { default, .. } => Value::Count(*default),
            Self::Raw { default } => Value::Raw(default.clone()),
        }
    }
}

/// Constructors for every [`OptionDef`] variant.
///
/// ```
/// use toptions::{Definition, opt};
///
/// let definition = Definition::new()
///     .option("input", opt::arg(0))
///     .option("output", opt::flag_or('o', "out.txt"))
///     .option("verbose", opt::level('v'))
///     .option("dry", opt::bit(None));
/// assert_eq!(definition.len(), 4);
/// ```
pub mod opt {
    use super::OptionDef;

    fn owned<I, S>(items: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        items.into_iter().map(Into::into).collect()
    }

    /// Positional string argument.
    pub fn arg(index: usize) -> OptionDef {
        OptionDef::Arg {
            index,
            default: None,
        }
    }

    pub fn arg_or(index: usize, default: impl Into<String>) -> OptionDef {
        OptionDef::Arg {
            index,
            default: Some(default.into()),
        }
    }

    /// All positional arguments not taken by a slot.
    pub fn args() -> OptionDef {
        OptionDef::Args {
            default: Vec::new(),
        }
    }

    pub fn args_or<I, S>(default: I) -> OptionDef
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        OptionDef::Args {
            default: owned(default),
        }
    }

    /// Named boolean option, no parameters.
    pub fn bit(alias: impl Into<Option<char>>) -> OptionDef {
        OptionDef::Bit {
            alias: alias.into(),
            default: false,
        }
    }

    /// Named string option.
    pub fn flag(alias: impl Into<Option<char>>) -> OptionDef {
        OptionDef::Flag {
            alias: alias.into(),
            default: None,
        }
    }

    pub fn flag_or(alias: impl Into<Option<char>>, default: impl Into<String>) -> OptionDef {
        OptionDef::Flag {
            alias: alias.into(),
            default: Some(default.into()),
        }
    }

    /// Named list option.
    pub fn list(alias: impl Into<Option<char>>) -> OptionDef {
        OptionDef::List {
            alias: alias.into(),
            default: Vec::new(),
        }
    }

    pub fn list_or<I, S>(alias: impl Into<Option<char>>, default: I) -> OptionDef
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        OptionDef::List {
            alias: alias.into(),
            default: owned(default),
        }
    }

    /// Repeatable named counter.
    pub fn level(alias: impl Into<Option<char>>) -> OptionDef {
        OptionDef::Level {
            alias: alias.into(),
            default: 0,
        }
    }

    /// Everything after the `--`.
    pub fn raw() -> OptionDef {
        OptionDef::Raw { default: None }
    }

    pub fn raw_or<I, S>(default: I) -> OptionDef
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        OptionDef::Raw {
            default: Some(owned(default)),
        }
    }

    /// Every token from the `index`-th positional token onward.
    pub fn rest(index: usize) -> OptionDef {
        OptionDef::Rest {
            index,
            default: Vec::new(),
        }
    }

    pub fn rest_or<I, S>(index: usize, default: I) -> OptionDef
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        OptionDef::Rest {
            index,
            default: owned(default),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_variant_shape() {
        assert_eq!(opt::arg(0).default_value(), Value::Text(None));
        assert_eq!(
            opt::arg_or(0, "foo").default_value(),
            Value::Text(Some("foo".to_string()))
        );
        assert_eq!(opt::bit('b').default_value(), Value::Switch(false));
        assert_eq!(opt::level(None).default_value(), Value::Count(0));
        assert_eq!(
            opt::list_or('l', ["a", "b"]).default_value(),
            Value::List(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(opt::raw().default_value(), Value::Raw(None));
        assert_eq!(opt::rest(2).default_value(), Value::List(Vec::new()));
    }

    #[test]
    fn alias_only_on_named_kinds() {
        assert_eq!(opt::flag('f').alias(), Some('f'));
        assert_eq!(opt::flag(None).alias(), None);
        assert_eq!(opt::arg(3).alias(), None);
        assert!(opt::level('v').kind().is_named());
        assert!(!opt::rest(0).kind().is_named());
        assert_eq!(opt::rest(4).index(), Some(4));
    }

    #[test]
    fn deserializes_tagged_json() {
        let def: OptionDef = serde_json::from_str(r#"{"type":"flag","alias":"o"}"#).unwrap();
        assert_eq!(def, opt::flag('o'));

        let def: OptionDef =
            serde_json::from_str(r#"{"type":"rest","index":1,"default":["x"]}"#).unwrap();
        assert_eq!(def, opt::rest_or(1, ["x"]));

        let err = serde_json::from_str::<OptionDef>(r#"{"type":"bogus"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn kind_display_matches_serde_tag() {
        let json = serde_json::to_value(opt::level('v')).unwrap();
        assert_eq!(json["type"], OptionKind::Level.to_string());
    }
}
