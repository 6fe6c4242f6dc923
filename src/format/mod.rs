//! Renders a [StructuredTree](crate::node::structured::StructuredTree) as text in some output
//! syntax, such as LaTeX.
//!
//! What gets written for each construct comes entirely from a [FormatTemplates] store, loaded from
//! TOML. A store has a `[format]` header and one table per construct name:
//!
//! ```toml
//! [format]
//! name = "LaTeX"
//! auto_brackets = true
//!
//! [Divide]
//! output1 = "\\frac{"
//! output2 = "}{"
//! output3 = "}"
//! brackets = false
//! ```
//!
//! Apart from construct names, a store may contain the special entries `Initial` (wraps the whole
//! output), `AutoBracket` (the brackets inserted automatically), `Text`, `Number`, `Variable`,
//! `Infinity`, and entries named by a single character to render particular variables (`["π"]`).

mod serializer;
pub use serializer::*;

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;

const LATEX: &str = include_str!("../../formats/latex.toml");
const PLAIN: &str = include_str!("../../formats/plain.toml");
const MAXIMA: &str = include_str!("../../formats/maxima.toml");

/// The formats bundled with this crate.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum BuiltinFormat {
    Latex,
    Plain,
    Maxima,
}

impl BuiltinFormat {
    pub const ALL: [BuiltinFormat; 3] = [BuiltinFormat::Latex, BuiltinFormat::Plain, BuiltinFormat::Maxima];

    fn source(&self) -> &'static str {
        match self {
            BuiltinFormat::Latex => LATEX,
            BuiltinFormat::Plain => PLAIN,
            BuiltinFormat::Maxima => MAXIMA,
        }
    }
}

impl FromStr for BuiltinFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "latex" => Ok(BuiltinFormat::Latex),
            "plain" => Ok(BuiltinFormat::Plain),
            "maxima" => Ok(BuiltinFormat::Maxima),
            _ => Err(ConfigError::Invalid { name: s.into(), reason: "no such bundled format".into() }),
        }
    }
}

/// The template entry for one construct.
///
/// Text fragments (`initial`, `output`, `output1`, `output2`, ..., `final`, and the `matrix_*`,
/// `row_*` and `element_*` fragments of matrices) are kept by name; which ones are used depends on
/// the kind of node being rendered.
#[derive(Deserialize, PartialEq, Eq, Debug, Clone, Default)]
pub struct Template {
    /// Whether this construct takes brackets: automatic ones for operators, argument brackets for
    /// functions. Defaults to yes.
    #[serde(default)]
    pub brackets: Option<bool>,

    /// Emit the right operand of a binary operator before the left.
    #[serde(default)]
    pub reverse: bool,

    /// The order in which to visit the children of a multi-slot construct.
    #[serde(default)]
    pub order: Option<Vec<usize>>,

    #[serde(flatten)]
    fragments: HashMap<String, String>,
}

impl Template {
    pub fn fragment(&self, name: &str) -> Option<&str> {
        self.fragments.get(name).map(String::as_str)
    }

    pub fn set_fragment(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.fragments.insert(name.into(), text.into());
    }

    pub fn takes_brackets(&self) -> bool {
        self.brackets.unwrap_or(true)
    }
}

#[derive(Deserialize, Debug, Clone)]
struct FormatHeader {
    name: String,
    #[serde(default)]
    auto_brackets: bool,
}

#[derive(Deserialize, Debug, Clone)]
struct FormatDocument {
    format: FormatHeader,
    #[serde(flatten)]
    entries: HashMap<String, Template>,
}

/// A complete output format: its header settings, and a [Template] per construct name.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct FormatTemplates {
    name: String,
    auto_brackets: bool,
    entries: HashMap<String, Template>,
}

impl FormatTemplates {
    /// Creates an empty store.
    pub fn new(name: impl Into<String>, auto_brackets: bool) -> Self {
        FormatTemplates { name: name.into(), auto_brackets, entries: HashMap::new() }
    }

    /// Loads one of the formats bundled with this crate.
    pub fn builtin(format: BuiltinFormat) -> FormatTemplates {
        Self::from_toml_str(format.source())
            .unwrap_or_else(|e| panic!("bundled format {:?} is invalid: {}", format, e))
    }

    pub fn from_toml_str(source: &str) -> Result<FormatTemplates, ConfigError> {
        let document: FormatDocument = toml::from_str(source)?;

        for (name, entry) in &document.entries {
            if let Some(order) = &entry.order {
                let mut sorted = order.clone();
                sorted.sort_unstable();
                if sorted.iter().enumerate().any(|(i, &o)| i != o) {
                    return Err(ConfigError::Invalid {
                        name: name.clone(),
                        reason: "`order` must list every child exactly once".into(),
                    });
                }
            }
        }

        log::debug!("loaded format '{}' with {} entries", document.format.name, document.entries.len());
        Ok(FormatTemplates {
            name: document.format.name,
            auto_brackets: document.format.auto_brackets,
            entries: document.entries,
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<FormatTemplates, ConfigError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn auto_brackets(&self) -> bool {
        self.auto_brackets
    }

    pub fn set_auto_brackets(&mut self, auto_brackets: bool) {
        self.auto_brackets = auto_brackets;
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.entries.get(name)
    }

    /// Returns the entry for `name`, creating an empty one if needed.
    pub fn entry(&mut self, name: impl Into<String>) -> &mut Template {
        self.entries.entry(name.into()).or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_formats_load() {
        for format in BuiltinFormat::ALL {
            let templates = FormatTemplates::builtin(format);
            assert!(templates.auto_brackets());
            assert!(templates.get("AutoBracket").is_some());
            assert!(templates.get("Add").is_some());
        }

        assert_eq!(FormatTemplates::builtin(BuiltinFormat::Latex).name(), "LaTeX");
    }

    #[test]
    fn test_template_fields() {
        let templates = FormatTemplates::from_toml_str(r#"
            [format]
            name = "Test"

            [Divide]
            output1 = "("
            output2 = ")/("
            output3 = ")"
            brackets = false
            reverse = true

            ["π"]
            output = "pi"
        "#).unwrap();

        assert!(!templates.auto_brackets());

        let divide = templates.get("Divide").unwrap();
        assert_eq!(divide.fragment("output2"), Some(")/("));
        assert_eq!(divide.fragment("output4"), None);
        assert!(!divide.takes_brackets());
        assert!(divide.reverse);

        assert_eq!(templates.get("π").unwrap().fragment("output"), Some("pi"));
    }

    #[test]
    fn test_rejects_bad_order() {
        let result = FormatTemplates::from_toml_str(r#"
            [format]
            name = "Test"

            [Sum]
            order = [0, 2]
        "#);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_format_names() {
        assert_eq!("LaTeX".parse::<BuiltinFormat>().unwrap(), BuiltinFormat::Latex);
        assert_eq!("maxima".parse::<BuiltinFormat>().unwrap(), BuiltinFormat::Maxima);
        assert!("troff".parse::<BuiltinFormat>().is_err());
    }
}
