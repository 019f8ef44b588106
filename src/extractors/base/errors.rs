// Failure kinds of the checked constructors
//
// Bulk entry points never surface these; they skip non-matching forms.

use crate::ast::{render, Node};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("not a signature: {0}")]
    NotASignature(String),
    #[error("not a call expression: {0}")]
    NotACallExpression(String),
    #[error("not a behaviour declaration: {0}")]
    NotABehaviorDeclaration(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotASignature,
    NotACallExpression,
    NotABehaviorDeclaration,
}

impl ExtractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExtractError::NotASignature(_) => ErrorKind::NotASignature,
            ExtractError::NotACallExpression(_) => ErrorKind::NotACallExpression,
            ExtractError::NotABehaviorDeclaration(_) => ErrorKind::NotABehaviorDeclaration,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ExtractError::NotASignature(message)
            | ExtractError::NotACallExpression(message)
            | ExtractError::NotABehaviorDeclaration(message) => message,
        }
    }

    pub(crate) fn not_a_signature(node: &Node) -> Self {
        ExtractError::NotASignature(format!(
            "expected `name(params) :: return` with an optional `when` clause, got `{}`",
            render(node)
        ))
    }

    pub(crate) fn not_a_call(node: &Node, reason: &str) -> Self {
        ExtractError::NotACallExpression(format!("{}: `{}`", reason, render(node)))
    }

    pub(crate) fn not_a_behaviour(node: &Node) -> Self {
        ExtractError::NotABehaviorDeclaration(format!(
            "expected `@behaviour Module`, got `{}`",
            render(node)
        ))
    }
}
