//! The check query language.
//!
//! A security check's `check_query` is a boolean expression over the
//! attribute names of a resource's resolved posture, combined with
//! `and`, `or`, `not` and parentheses. Queries are parsed once when the
//! rule set is loaded and evaluated by walking the tree against each
//! resolved attribute map; query text is never executed.

mod lexer;
mod parser;

use crate::threat_model::domain::AttributeMap;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Maximum accepted length for a check query (security limit)
const MAX_QUERY_LENGTH: usize = 4096;

/// Parsed boolean expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Attribute(String),
    Literal(bool),
    Not(Box<Expression>),
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),
}

impl Expression {
    fn collect_attributes<'a>(&'a self, into: &mut BTreeSet<&'a str>) {
        match self {
            Expression::Attribute(name) => {
                into.insert(name.as_str());
            }
            Expression::Literal(_) => {}
            Expression::Not(inner) => inner.collect_attributes(into),
            Expression::And(left, right) | Expression::Or(left, right) => {
                left.collect_attributes(into);
                right.collect_attributes(into);
            }
        }
    }

    /// Short-circuit evaluation. Callers have already checked that every
    /// referenced attribute is present and boolean, so lookups that miss
    /// here only happen under [`MissingAttributePolicy::TreatAsFalse`].
    fn eval(&self, attributes: &AttributeMap) -> bool {
        match self {
            Expression::Attribute(name) => attributes
                .get(name)
                .and_then(|value| value.as_bool())
                .unwrap_or(false),
            Expression::Literal(value) => *value,
            Expression::Not(inner) => !inner.eval(attributes),
            Expression::And(left, right) => left.eval(attributes) && right.eval(attributes),
            Expression::Or(left, right) => left.eval(attributes) || right.eval(attributes),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Attribute(name) => write!(f, "{}", name),
            Expression::Literal(value) => write!(f, "{}", value),
            Expression::Not(inner) => write!(f, "(not {})", inner),
            Expression::And(left, right) => write!(f, "({} and {})", left, right),
            Expression::Or(left, right) => write!(f, "({} or {})", left, right),
        }
    }
}

/// A check query that failed to parse
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (at position {position})")]
pub struct PredicateSyntaxError {
    pub position: usize,
    pub message: String,
}

impl PredicateSyntaxError {
    pub fn new(position: usize, message: String) -> Self {
        Self { position, message }
    }
}

/// Why a parsed query could not be evaluated against a resource
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationFailure {
    #[error("attribute '{attribute}' is not defined for this resource")]
    MissingAttribute { attribute: String },

    #[error("attribute '{attribute}' has non-boolean value {value}")]
    NotBoolean { attribute: String, value: String },
}

/// What to do when a query names an attribute the resource does not have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingAttributePolicy {
    /// Abort the evaluation with an error (default)
    #[default]
    Fail,
    /// Treat the missing attribute as `false`
    TreatAsFalse,
}

/// A parsed check query together with its canonical source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    source: String,
    expression: Expression,
}

impl Predicate {
    /// Parses query text. Whitespace runs are collapsed in the stored source,
    /// which is the text reported alongside findings.
    pub fn parse(source: &str) -> Result<Self, PredicateSyntaxError> {
        if source.len() > MAX_QUERY_LENGTH {
            return Err(PredicateSyntaxError::new(
                MAX_QUERY_LENGTH,
                format!(
                    "check query is too long ({} bytes). Maximum allowed: {} bytes",
                    source.len(),
                    MAX_QUERY_LENGTH
                ),
            ));
        }

        let canonical = source.split_whitespace().collect::<Vec<_>>().join(" ");
        let tokens = lexer::tokenize(&canonical)?;
        let expression = parser::Parser::new(&tokens, canonical.chars().count()).parse()?;

        Ok(Self {
            source: canonical,
            expression,
        })
    }

    /// Joins query fragments with single spaces before parsing
    pub fn from_parts<S: AsRef<str>>(parts: &[S]) -> Result<Self, PredicateSyntaxError> {
        let joined = parts.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ");
        Self::parse(&joined)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    /// Every attribute name the query references
    pub fn attributes(&self) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        self.expression.collect_attributes(&mut names);
        names
    }

    /// Evaluates the query against a resolved posture.
    ///
    /// Every referenced attribute is checked before evaluation starts, so a
    /// missing or non-boolean attribute fails the evaluation even when
    /// short-circuiting would never have reached it.
    pub fn evaluate(
        &self,
        attributes: &AttributeMap,
        policy: MissingAttributePolicy,
    ) -> Result<bool, EvaluationFailure> {
        for name in self.attributes() {
            match attributes.get(name) {
                Some(value) if value.as_bool().is_none() => {
                    return Err(EvaluationFailure::NotBoolean {
                        attribute: name.to_string(),
                        value: value.to_string(),
                    });
                }
                Some(_) => {}
                None if policy == MissingAttributePolicy::Fail => {
                    return Err(EvaluationFailure::MissingAttribute {
                        attribute: name.to_string(),
                    });
                }
                None => {}
            }
        }

        Ok(self.expression.eval(attributes))
    }
}

impl FromStr for Predicate {
    type Err = PredicateSyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}
