use crate::error::TemplateError;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder token replaced by the column's rendered identifier.
pub const WRAPPER_PLACEHOLDER: char = '?';

///
/// WrapperMode
///
/// Clause a wrapper function applies to.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum WrapperMode {
    Select,
    Insert,
    Update,
}

///
/// WrapperTemplate
///
/// A function template such as `SQRT(?)`, stored split around its single
/// placeholder so the one-placeholder invariant holds by construction.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct WrapperTemplate {
    prefix: String,
    suffix: String,
}

impl WrapperTemplate {
    /// Parse a template containing exactly one `?`.
    pub fn parse(template: &str) -> Result<Self, TemplateError> {
        let count = template.matches(WRAPPER_PLACEHOLDER).count();

        match count {
            0 => Err(TemplateError::MissingPlaceholder {
                template: template.to_string(),
            }),
            1 => {
                let (prefix, rest) = template
                    .split_once(WRAPPER_PLACEHOLDER)
                    .unwrap_or((template, ""));

                Ok(Self {
                    prefix: prefix.to_string(),
                    suffix: rest.to_string(),
                })
            }
            count => Err(TemplateError::MultiplePlaceholders {
                template: template.to_string(),
                count,
            }),
        }
    }

    /// Substitute the placeholder with `replacement`.
    #[must_use]
    pub fn apply(&self, replacement: &str) -> String {
        let mut out =
            String::with_capacity(self.prefix.len() + replacement.len() + self.suffix.len());
        out.push_str(&self.prefix);
        out.push_str(replacement);
        out.push_str(&self.suffix);

        out
    }
}

impl fmt::Display for WrapperTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{WRAPPER_PLACEHOLDER}{}", self.prefix, self.suffix)
    }
}

///
/// WrapperFunctions
///
/// Per-clause wrapper templates of one column.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct WrapperFunctions {
    select: Option<WrapperTemplate>,
    insert: Option<WrapperTemplate>,
    update: Option<WrapperTemplate>,
}

impl WrapperFunctions {
    #[must_use]
    pub const fn get(&self, mode: WrapperMode) -> Option<&WrapperTemplate> {
        match mode {
            WrapperMode::Select => self.select.as_ref(),
            WrapperMode::Insert => self.insert.as_ref(),
            WrapperMode::Update => self.update.as_ref(),
        }
    }

    pub fn set(&mut self, mode: WrapperMode, template: WrapperTemplate) {
        let slot = match mode {
            WrapperMode::Select => &mut self.select,
            WrapperMode::Insert => &mut self.insert,
            WrapperMode::Update => &mut self.update,
        };
        *slot = Some(template);
    }

    /// Apply the template for `mode`; without one, `replacement` passes
    /// through unchanged.
    #[must_use]
    pub fn apply(&self, mode: WrapperMode, replacement: &str) -> String {
        match self.get(mode) {
            Some(template) => template.apply(replacement),
            None => replacement.to_string(),
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn template_substitutes_single_placeholder() {
        let template = WrapperTemplate::parse("FN(?)").expect("valid template");

        assert_eq!(template.apply("C"), "FN(C)");
        assert_eq!(template.to_string(), "FN(?)");
    }

    #[test]
    fn template_without_placeholder_is_rejected() {
        let err = WrapperTemplate::parse("NOW()").expect_err("no placeholder");

        assert!(matches!(err, TemplateError::MissingPlaceholder { .. }));
    }

    #[test]
    fn template_with_two_placeholders_is_rejected() {
        let err = WrapperTemplate::parse("COALESCE(?, ?)").expect_err("two placeholders");

        assert_eq!(
            err,
            TemplateError::MultiplePlaceholders {
                template: "COALESCE(?, ?)".to_string(),
                count: 2,
            }
        );
    }

    #[test]
    fn modes_are_independent() {
        let mut wrappers = WrapperFunctions::default();
        wrappers.set(
            WrapperMode::Select,
            WrapperTemplate::parse("DECODE_B64(?)").expect("valid"),
        );
        wrappers.set(
            WrapperMode::Insert,
            WrapperTemplate::parse("ENCODE_B64(?)").expect("valid"),
        );

        assert_eq!(wrappers.apply(WrapperMode::Select, "t.c"), "DECODE_B64(t.c)");
        assert_eq!(wrappers.apply(WrapperMode::Insert, "?"), "ENCODE_B64(?)");
        assert_eq!(wrappers.apply(WrapperMode::Update, "t.c"), "t.c");
    }

    proptest! {
        #[test]
        fn parsed_template_round_trips(prefix in "[A-Z_(]{0,8}", suffix in "[)0-9, ]{0,8}", col in "[a-z_.]{1,12}") {
            let raw = format!("{prefix}?{suffix}");
            let template = WrapperTemplate::parse(&raw).expect("one placeholder");

            prop_assert_eq!(template.to_string(), raw);
            prop_assert_eq!(template.apply(&col), format!("{prefix}{col}{suffix}"));
        }
    }
}
