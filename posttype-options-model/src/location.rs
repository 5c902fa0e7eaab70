use serde::{Deserialize, Serialize};
use std::fmt;

/// A single location condition, e.g. `post_type_options == all`.
///
/// The rule is declarative: which `param` kinds exist and how they are
/// evaluated is decided by whoever holds the rule dispatch table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationRule {
    pub param: String,
    pub operator: RuleOperator,
    pub value: String,
}

impl LocationRule {
    pub fn new(param: &str, operator: RuleOperator, value: &str) -> Self {
        Self {
            param: param.into(),
            operator,
            value: value.into(),
        }
    }

    /// Shorthand for `param == value`.
    pub fn equals(param: &str, value: &str) -> Self {
        Self::new(param, RuleOperator::Equal, value)
    }

    /// Shorthand for `param != value`.
    pub fn not_equals(param: &str, value: &str) -> Self {
        Self::new(param, RuleOperator::NotEqual, value)
    }
}

impl fmt::Display for LocationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.param, self.operator, self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleOperator {
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
}

impl RuleOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
        }
    }
}

impl fmt::Display for RuleOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
