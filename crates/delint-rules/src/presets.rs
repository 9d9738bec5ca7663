//! Rule presets for common configurations.

use crate::{loop_body_block, IfBodyBlock, LoopBodyBlock, StrictEquality};
use delint_core::{Config, RuleBox};
use tracing::warn;

/// Preset configurations for delint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Every structural rule.
    Recommended,
    /// Only `strict-equality`, for gradual adoption.
    Minimal,
}

impl Preset {
    /// Returns the rules for this preset with default settings.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Recommended => recommended_rules(),
            Self::Minimal => minimal_rules(),
        }
    }

    /// Looks up a preset by its configuration name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "recommended" => Some(Self::Recommended),
            "minimal" => Some(Self::Minimal),
            _ => None,
        }
    }
}

/// Returns the recommended set of rules, in evaluation order.
///
/// Includes:
/// - `loop-body-block` (DL001) - Requires braced loop bodies
/// - `if-body-block` (DL002) - Requires braced if/else branches
/// - `strict-equality` (DL003) - Forbids `==` and `!=`
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    vec![
        Box::new(LoopBodyBlock::new()),
        Box::new(IfBodyBlock::new()),
        Box::new(StrictEquality::new()),
    ]
}

/// Returns the minimal set of rules.
///
/// For gradual adoption, only includes:
/// - `strict-equality` (DL003)
#[must_use]
pub fn minimal_rules() -> Vec<RuleBox> {
    vec![Box::new(StrictEquality::new())]
}

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    recommended_rules()
}

/// Builds the rule set described by `config`.
///
/// Uses the configured preset (recommended when unset or unknown) and
/// applies rule options. Enabling and severity overrides are left to the
/// [`Linter`](delint_core::Linter) built with the same config.
#[must_use]
pub fn rules_from_config(config: &Config) -> Vec<RuleBox> {
    let preset = match config.preset.as_deref() {
        None => Preset::Recommended,
        Some(name) => Preset::from_name(name).unwrap_or_else(|| {
            warn!("Unknown preset '{name}', falling back to recommended");
            Preset::Recommended
        }),
    };

    let check_for_of = config
        .rule(loop_body_block::NAME)
        .is_some_and(|c| c.get_bool("check_for_of", false));

    preset
        .rules()
        .into_iter()
        .map(|rule| -> RuleBox {
            if rule.name() == loop_body_block::NAME {
                Box::new(LoopBodyBlock::new().check_for_of(check_for_of))
            } else {
                rule
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(rules: &[RuleBox]) -> Vec<&'static str> {
        rules.iter().map(|r| r.name()).collect()
    }

    #[test]
    fn test_preset_rules() {
        assert_eq!(
            names(&Preset::Recommended.rules()),
            vec!["loop-body-block", "if-body-block", "strict-equality"]
        );
        assert_eq!(names(&Preset::Minimal.rules()), vec!["strict-equality"]);
    }

    #[test]
    fn test_preset_from_name() {
        assert_eq!(Preset::from_name("minimal"), Some(Preset::Minimal));
        assert_eq!(Preset::from_name("strict"), None);
    }

    #[test]
    fn test_rules_from_config_uses_preset() {
        let config = Config::parse("preset = \"minimal\"").unwrap();
        assert_eq!(names(&rules_from_config(&config)), vec!["strict-equality"]);

        let config = Config::parse("preset = \"nonsense\"").unwrap();
        assert_eq!(rules_from_config(&config).len(), 3);
    }
}
