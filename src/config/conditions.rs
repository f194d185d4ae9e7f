// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Declarative conditions for rule-set files.
//!
//! A [`ConditionSpec`] is both the parsed YAML shape and, once checked by
//! [`ConditionSpec::compile`], an [`EventCondition`] in its own right.
//!
//! ```yaml
//! condition: always
//! condition: { kind_is: skill.on_hit }
//! condition:
//!   all:
//!     - compare: { field: damage, op: gte, attribute: damage_threshold, default: 0 }
//!     - not: { compare: { field: is_critical, op: eq, value: true } }
//! ```
//!
//! Enum variants use the single-key map form above rather than YAML tags, so
//! fields holding a condition deserialize through
//! `serde_yaml::with::singleton_map_recursive`.
//!
//! # Comparison semantics
//!
//! * the left side is a top-level payload field; a missing field is `false`
//! * the right side is a literal `value`, or a context `attribute` falling back
//!   to `default`; a missing attribute with no default is `false`
//! * `eq`/`ne` compare numbers numerically and everything else structurally
//! * ordering operators need numbers on both sides and fail with
//!   [`RuleError::TypeMismatch`] otherwise

use std::cmp::Ordering;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::errors::{ConfigError, RuleError};
use crate::events::{json_type_name, Event, EventContext};
use crate::traits::EventCondition;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ConditionSpec {
    #[default]
    Always,
    Never,
    Compare(CompareSpec),
    KindIs(String),
    All(Vec<ConditionSpec>),
    Any(Vec<ConditionSpec>),
    Not(Box<ConditionSpec>),
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CompareSpec {
    pub field: String,
    pub op: CompareOp,
    #[serde(default)]
    pub attribute: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub default: Option<Value>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl CompareOp {
    fn is_ordering(self) -> bool {
        !matches!(self, CompareOp::Eq | CompareOp::Ne)
    }

    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Eq => ordering == Ordering::Equal,
            CompareOp::Ne => ordering != Ordering::Equal,
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::Gte => ordering != Ordering::Less,
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::Lte => ordering != Ordering::Greater,
        }
    }
}

impl ConditionSpec {
    /// Check the condition is well formed and turn it into a shareable one.
    ///
    /// `owner` names the leaf or branch the condition belongs to and only
    /// appears in error messages.
    pub fn compile(&self, owner: &str) -> Result<Arc<dyn EventCondition>, ConfigError> {
        self.check(owner)?;
        Ok(Arc::new(self.clone()))
    }

    fn check(&self, owner: &str) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidCondition {
            owner: owner.to_string(),
            reason,
        };
        match self {
            ConditionSpec::Always | ConditionSpec::Never => Ok(()),
            ConditionSpec::KindIs(kind) if kind.trim().is_empty() => {
                Err(invalid("kind_is needs a non-empty kind".to_string()))
            }
            ConditionSpec::KindIs(_) => Ok(()),
            ConditionSpec::Compare(compare) => {
                if compare.field.trim().is_empty() {
                    return Err(invalid("compare needs a field".to_string()));
                }
                match (&compare.attribute, &compare.value) {
                    (Some(_), Some(_)) => Err(invalid(format!(
                        "compare on '{}' sets both attribute and value",
                        compare.field
                    ))),
                    (None, None) => Err(invalid(format!(
                        "compare on '{}' needs an attribute or a value",
                        compare.field
                    ))),
                    _ => Ok(()),
                }
            }
            ConditionSpec::All(specs) | ConditionSpec::Any(specs) => {
                specs.iter().try_for_each(|spec| spec.check(owner))
            }
            ConditionSpec::Not(spec) => spec.check(owner),
        }
    }
}

impl EventCondition for ConditionSpec {
    fn evaluate(&self, event: &Event, context: &EventContext) -> Result<bool, RuleError> {
        match self {
            ConditionSpec::Always => Ok(true),
            ConditionSpec::Never => Ok(false),
            ConditionSpec::KindIs(kind) => Ok(event.kind().as_str() == kind),
            ConditionSpec::Compare(compare) => compare.evaluate(event, context),
            ConditionSpec::All(specs) => {
                for spec in specs {
                    if !spec.evaluate(event, context)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            ConditionSpec::Any(specs) => {
                for spec in specs {
                    if spec.evaluate(event, context)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            ConditionSpec::Not(spec) => Ok(!spec.evaluate(event, context)?),
        }
    }
}

impl CompareSpec {
    fn evaluate(&self, event: &Event, context: &EventContext) -> Result<bool, RuleError> {
        let Some(left) = event.field(&self.field) else {
            return Ok(false);
        };
        let right = match (&self.value, &self.attribute) {
            (Some(value), _) => Some(value),
            (None, Some(attribute)) => context.attribute(attribute).or(self.default.as_ref()),
            (None, None) => None,
        };
        let Some(right) = right else {
            return Ok(false);
        };

        if let (Some(l), Some(r)) = (left.as_f64(), right.as_f64()) {
            return Ok(l.partial_cmp(&r).is_some_and(|ordering| self.op.accepts(ordering)));
        }

        if self.op.is_ordering() {
            let offender = if left.is_number() { right } else { left };
            return Err(RuleError::TypeMismatch {
                field: self.field.clone(),
                expected: "number",
                found: json_type_name(offender),
            });
        }

        let equal = left == right;
        Ok(if self.op == CompareOp::Eq { equal } else { !equal })
    }
}
