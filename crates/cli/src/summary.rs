use serde::Serialize;
use toptions::{OptionKind, Parser};

#[derive(Debug, Serialize)]
pub struct OptionSummary {
    pub name: String,
    pub kind: OptionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct DefinitionSummary {
    pub source: String,
    pub options: Vec<OptionSummary>,
    /// Slot fill order.
    pub positional: Vec<String>,
}

pub fn summarize(source: &str, parser: &Parser) -> DefinitionSummary {
    let mut options = Vec::with_capacity(parser.definition().len());
    for (name, option) in parser.definition() {
        options.push(OptionSummary {
            name: name.to_string(),
            kind: option.kind(),
            long: parser.long_form(name),
            alias: option.alias(),
            index: option.index(),
        });
    }

    DefinitionSummary {
        source: source.to_string(),
        options,
        positional: parser.positional_names().map(str::to_string).collect(),
    }
}

impl DefinitionSummary {
    /// Human-readable rows: `left  kind`.
    pub fn rows(&self) -> Vec<(String, String)> {
        self.options
            .iter()
            .map(|o| {
                let left = match (o.alias, o.long.as_deref()) {
                    (Some(alias), Some(long)) => format!("-{alias}, {long}"),
                    (None, Some(long)) => long.to_string(),
                    _ => match o.index {
                        Some(index) => format!("{} @{index}", o.name),
                        None => o.name.clone(),
                    },
                };
                (left, o.kind.to_string())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toptions::{Definition, opt};

    #[test]
    fn advertised_long_spellings_reach_their_options() {
        let parser = Parser::new(
            Definition::new()
                .option("URL", opt::flag(None))
                .option("noColor", opt::bit(None))
                .option("parseURL", opt::list(None))
                .option("logLevel2x", opt::level(None))
                .option("input", opt::arg(0)),
        )
        .unwrap();
        let summary = summarize("inline", &parser);

        let longs: Vec<Option<&str>> = summary.options.iter().map(|o| o.long.as_deref()).collect();
        assert_eq!(
            longs,
            [
                Some("--URL"),
                Some("--no-color"),
                Some("--parseURL"),
                Some("--log-level2x"),
                None
            ]
        );

        for option in &summary.options {
            let Some(long) = option.long.as_deref() else {
                continue;
            };
            let config = parser.parse(&[long, "value"]);
            let default = parser.definition().get(&option.name).unwrap().default_value();
            assert!(
                config.unrecognized().named.is_empty(),
                "{long} did not resolve: {:?}",
                config.unrecognized()
            );
            assert_ne!(config.get(&option.name), Some(&default), "{long} missed {}", option.name);
        }
    }

    #[test]
    fn summary_lists_options_and_slots() {
        let parser = Parser::new(
            Definition::new()
                .option("dst", opt::arg(1))
                .option("src", opt::arg(0))
                .option("noColor", opt::bit('C'))
                .option("tail", opt::raw()),
        )
        .unwrap();
        let summary = summarize("inline", &parser);

        assert_eq!(summary.positional, ["src", "dst"]);
        assert_eq!(summary.options.len(), 4);
        assert_eq!(summary.options[2].long.as_deref(), Some("--no-color"));
        assert_eq!(summary.options[3].long, None);

        let rows = summary.rows();
        assert_eq!(rows[0], ("dst @1".to_string(), "arg".to_string()));
        assert_eq!(rows[2], ("-C, --no-color".to_string(), "bit".to_string()));
        assert_eq!(rows[3], ("tail".to_string(), "raw".to_string()));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["options"][2]["kind"], "bit");
        assert_eq!(json["options"][2]["alias"], "C");
    }
}
