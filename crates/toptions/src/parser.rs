use std::collections::{BTreeMap, HashMap, VecDeque};

use indexmap::IndexMap;

use crate::config::{Config, UNRECOGNIZED, Value};
use crate::definition::Definition;
use crate::error::DefinitionError;
use crate::option::{OptionDef, OptionKind};

/// What a named option does when it is hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Bit,
    Flag,
    List,
    Level,
}

#[derive(Debug, Clone, Copy)]
struct Target {
    slot: usize,
    action: Action,
}

#[derive(Debug, Clone, Copy)]
struct RestCapture {
    /// Ordinal of the positional token that opens the capture.
    index: usize,
    slot: usize,
}

/// Shape of a single token, before any lookup.
#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    /// `--`
    Separator,
    /// `--name`, remainder still dashed.
    Long(&'a str),
    /// `-x`
    Alias(char),
    /// `-xyz`, without the leading hyphen.
    Bundle(&'a str),
    Positional,
}

fn classify(token: &str) -> Token<'_> {
    if token == "--" {
        return Token::Separator;
    }
    if let Some(long) = token.strip_prefix("--") {
        return Token::Long(long);
    }
    if let Some(letters) = token.strip_prefix('-') {
        let mut chars = letters.chars();
        match (chars.next(), chars.next()) {
            // A lone `-` is an ordinary positional (stdin by convention).
            (None, _) => {}
            (Some(alias), None) => return Token::Alias(alias),
            (Some(_), Some(_)) => return Token::Bundle(letters),
        }
    }
    Token::Positional
}

/// `no-color` -> `noColor`. Only a hyphen followed by an ASCII lowercase
/// letter is folded; anything else is kept as written.
pub(crate) fn dashed_to_camel(dashed: &str) -> String {
    let mut out = String::with_capacity(dashed.len());
    let mut chars = dashed.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '-' {
            if let Some(next) = chars.peek().copied().filter(char::is_ascii_lowercase) {
                out.push(next.to_ascii_uppercase());
                chars.next();
                continue;
            }
        }
        out.push(c);
    }
    out
}

/// `noColor` -> `no-color`, the dashed spelling [`dashed_to_camel`] folds
/// back into `name`. Capitals next to other capitals (`URL`, `parseURL`)
/// are kept as written.
pub(crate) fn camel_to_dashed(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        let after_lower = i > 0
            && (chars[i - 1].is_ascii_lowercase() || chars[i - 1].is_ascii_digit());
        let before_upper = chars.get(i + 1).is_some_and(char::is_ascii_uppercase);
        if c.is_ascii_uppercase() && after_lower && !before_upper {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    if dashed_to_camel(&out) == name {
        out
    } else {
        name.to_string()
    }
}

/// A compiled [`Definition`].
///
/// Compilation happens once in [`Parser::new`]; [`Parser::parse`] can then be
/// called any number of times, from any number of threads. Each call starts
/// from a fresh copy of the defaults.
#[derive(Debug, Clone)]
pub struct Parser {
    definition: Definition,
    aliases: HashMap<char, Target>,
    named: HashMap<String, Target>,
    /// `arg` options ordered by declared index.
    slots: Vec<usize>,
    raw: Option<usize>,
    args: Option<usize>,
    rest: Option<RestCapture>,
    defaults: IndexMap<String, Value>,
}

impl Parser {
    /// Compile `definition`, rejecting ambiguous schemas.
    pub fn new(definition: Definition) -> Result<Self, DefinitionError> {
        let mut aliases: HashMap<char, Target> = HashMap::new();
        let mut named: HashMap<String, Target> = HashMap::new();
        let mut positions: BTreeMap<usize, usize> = BTreeMap::new();
        let mut raw: Option<usize> = None;
        let mut args: Option<usize> = None;
        let mut rest: Option<RestCapture> = None;
        let mut defaults: IndexMap<String, Value> = IndexMap::with_capacity(definition.len());

        for (slot, (name, option)) in definition.iter().enumerate() {
            if name.is_empty() {
                return Err(DefinitionError::EmptyName);
            }
            if name == UNRECOGNIZED {
                return Err(DefinitionError::ReservedName(name.to_string()));
            }
            defaults.insert(name.to_string(), option.default_value());

            let action = match option {
                OptionDef::Arg { index, .. } => {
                    if let Some(&first) = positions.get(index) {
                        return Err(DefinitionError::DuplicateIndex {
                            index: *index,
                            first: definition.name_at(first).to_string(),
                            second: name.to_string(),
                        });
                    }
                    positions.insert(*index, slot);
                    continue;
                }
                OptionDef::Args { .. } => {
                    claim(&mut args, slot, OptionKind::Args, &definition)?;
                    continue;
                }
                OptionDef::Raw { .. } => {
                    claim(&mut raw, slot, OptionKind::Raw, &definition)?;
                    continue;
                }
                OptionDef::Rest { index, .. } => {
                    let mut claimed = rest.map(|r| r.slot);
                    claim(&mut claimed, slot, OptionKind::Rest, &definition)?;
                    rest = Some(RestCapture {
                        index: *index,
                        slot,
                    });
                    continue;
                }
                OptionDef::Bit { .. } => Action::Bit,
                OptionDef::Flag { .. } => Action::Flag,
                OptionDef::List { .. } => Action::List,
                OptionDef::Level { .. } => Action::Level,
            };

            if dashed_to_camel(name) != name {
                return Err(DefinitionError::UnreachableName(name.to_string()));
            }

            let target = Target { slot, action };
            named.insert(name.to_string(), target);

            if let Some(alias) = option.alias() {
                if alias == '-' || alias.is_whitespace() || alias.is_control() {
                    return Err(DefinitionError::InvalidAlias {
                        name: name.to_string(),
                        alias,
                    });
                }
                if let Some(first) = aliases.insert(alias, target) {
                    return Err(DefinitionError::DuplicateAlias {
                        alias,
                        first: definition.name_at(first.slot).to_string(),
                        second: name.to_string(),
                    });
                }
            }
        }

        let slots: Vec<usize> = positions.into_values().collect();
        tracing::debug!(
            options = definition.len(),
            positional = slots.len(),
            aliases = aliases.len(),
            raw = raw.is_some(),
            args = args.is_some(),
            rest = rest.is_some(),
            "compiled option definition"
        );

        Ok(Self {
            definition,
            aliases,
            named,
            slots,
            raw,
            args,
            rest,
            defaults,
        })
    }

    /// The definition this parser was compiled from, e.g. for help rendering.
    pub fn definition(&self) -> &Definition {
        &self.definition
    }

    /// Option names bound to positional slots, in fill order.
    pub fn positional_names(&self) -> impl Iterator<Item = &str> {
        self.slots
            .iter()
            .map(|&slot| self.definition.name_at(slot))
    }

    /// Option name bound to `alias`, if any.
    pub fn alias_target(&self, alias: char) -> Option<&str> {
        self.aliases
            .get(&alias)
            .map(|target| self.definition.name_at(target.slot))
    }

    /// The `--long` spelling that reaches the named option `name`, or `None`
    /// when `name` is not a bit, flag, list or level option.
    pub fn long_form(&self, name: &str) -> Option<String> {
        self.named
            .contains_key(name)
            .then(|| format!("--{}", camel_to_dashed(name)))
    }

    /// Classify `tokens` into a [`Config`].
    ///
    /// Never fails: tokens that match no option or slot end up in
    /// [`Config::unrecognized`]. Only bit, flag, list and level options have a
    /// long form, so `--input` naming an `arg`, `args`, `raw` or `rest` option
    /// is recorded there too.
    pub fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> Config {
        let mut config = Config::seeded(self.defaults.clone());
        let mut slots: VecDeque<usize> = self.slots.iter().copied().collect();
        let mut consuming_rest = false;
        let mut positional_seen = 0usize;

        let mut i = 0usize;
        while i < tokens.len() {
            let token = tokens[i].as_ref();
            let lookahead = tokens.get(i + 1).map(|next| next.as_ref());

            if consuming_rest {
                if let Some(rest) = self.rest {
                    push(&mut config, rest.slot, token);
                }
                if token == "--" && self.capture_raw(&mut config, &tokens[i + 1..]) {
                    break;
                }
                i += 1;
                continue;
            }

            match classify(token) {
                Token::Separator => {
                    if self.capture_raw(&mut config, &tokens[i + 1..]) {
                        break;
                    }
                }
                Token::Long(dashed) => {
                    let name = dashed_to_camel(dashed);
                    match self.named.get(&name) {
                        Some(&target) => {
                            if apply(&mut config, target, lookahead) {
                                i += 1;
                            }
                        }
                        None => unrecognized_named(&mut config, name),
                    }
                }
                Token::Alias(alias) => match self.aliases.get(&alias) {
                    Some(&target) => {
                        if apply(&mut config, target, lookahead) {
                            i += 1;
                        }
                    }
                    None => unrecognized_named(&mut config, alias.to_string()),
                },
                Token::Bundle(letters) => {
                    for alias in letters.chars() {
                        let Some(&target) = self.aliases.get(&alias) else {
                            unrecognized_named(&mut config, alias.to_string());
                            continue;
                        };
                        // Value-taking options cannot reach a value from inside a bundle.
                        if matches!(target.action, Action::Bit | Action::Level) {
                            apply(&mut config, target, None);
                        }
                    }
                }
                Token::Positional => {
                    let ordinal = positional_seen;
                    positional_seen += 1;

                    match self.rest {
                        Some(rest) if rest.index == ordinal => {
                            consuming_rest = true;
                            if let Some(value) = config.slot_mut(rest.slot) {
                                value.restart(token);
                            }
                        }
                        _ => {
                            if let Some(slot) = slots.pop_front() {
                                if let Some(value) = config.slot_mut(slot) {
                                    value.set_text(token);
                                }
                            } else if let Some(args) = self.args {
                                push(&mut config, args, token);
                            } else {
                                tracing::trace!(token, "unrecognized positional");
                                config
                                    .unrecognized_mut()
                                    .positional
                                    .push(token.to_string());
                            }
                        }
                    }
                }
            }

            i += 1;
        }

        config
    }

    /// Store `tail` in the raw option. Returns whether the scan should stop.
    fn capture_raw<S: AsRef<str>>(&self, config: &mut Config, tail: &[S]) -> bool {
        let Some(raw) = self.raw else {
            return false;
        };
        if let Some(value) = config.slot_mut(raw) {
            value.set_raw(tail.iter().map(|t| t.as_ref().to_string()).collect());
        }
        true
    }
}

fn claim(
    current: &mut Option<usize>,
    slot: usize,
    kind: OptionKind,
    definition: &Definition,
) -> Result<(), DefinitionError> {
    if let Some(first) = *current {
        return Err(DefinitionError::DuplicateCapture {
            kind,
            first: definition.name_at(first).to_string(),
            second: definition.name_at(slot).to_string(),
        });
    }
    *current = Some(slot);
    Ok(())
}

/// Apply a named option hit. `next` is the following token, offered to
/// value-taking options. Returns whether `next` was consumed.
fn apply(config: &mut Config, target: Target, next: Option<&str>) -> bool {
    let Some(value) = config.slot_mut(target.slot) else {
        return false;
    };
    let argument = next.filter(|next| !next.starts_with('-'));
    match (target.action, argument) {
        (Action::Bit, _) => value.set_switch(),
        (Action::Level, _) => value.increment(),
        (Action::Flag, Some(argument)) => {
            value.set_text(argument);
            return true;
        }
        (Action::List, Some(argument)) => {
            value.push(argument);
            return true;
        }
        (Action::Flag | Action::List, None) => {}
    }
    false
}

fn push(config: &mut Config, slot: usize, token: &str) {
    if let Some(value) = config.slot_mut(slot) {
        value.push(token);
    }
}

fn unrecognized_named(config: &mut Config, name: String) {
    tracing::trace!(name = %name, "unrecognized option");
    config.unrecognized_mut().named.push(name);
}
