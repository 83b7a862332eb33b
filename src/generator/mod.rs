/*
    This module generates figures by expanding a symbol top-down
*/

use log::{debug, trace};
use rand::Rng;
use thiserror::Error;

use crate::grammar::*;
use crate::shape::{DegenerateGeometry, ShapeNode};

#[derive(Debug, Error, PartialEq)]
pub enum GenerateError {
    // A symbol that is not in the grammar's table was requested
    #[error("No definition for symbol `{0}`")]
    UndefinedSymbol(String),
    // A nonterminal without a producing rule
    #[error("No rule produces `{0}`")]
    UndefinedNonterminal(String),
    #[error(transparent)]
    Degenerate(#[from] DegenerateGeometry),
}

pub type GenResult = Result<ShapeNode, GenerateError>;

// Generates the grammar's canonical figure
pub fn generate<R: Rng + ?Sized>(grammar: &Grammar, rng: &mut R) -> GenResult {
    generate_with_override(grammar, grammar.start_symbol(), rng)
}

// Generates a figure for the given symbol instead of the start symbol
pub fn generate_with_override<R: Rng + ?Sized>(grammar: &Grammar, start: &str, rng: &mut R) -> GenResult {
    let figure = generate_symbol(grammar, start, rng)?;
    debug!("Generated `{}` from {} strokes", figure.symbol, figure.lines.len());
    return Ok(figure);
}

fn generate_symbol<R: Rng + ?Sized>(grammar: &Grammar, symbol: &str, rng: &mut R) -> GenResult {
    match grammar.symbol(symbol) {
        Some(Symbol::Terminal(line)) => Ok(ShapeNode::from_line(symbol, *line)),
        Some(Symbol::Nonterminal) => generate_nonterminal(grammar, symbol, rng),
        None => Err(GenerateError::UndefinedSymbol(symbol.to_string())),
    }
}

fn generate_nonterminal<R: Rng + ?Sized>(grammar: &Grammar, nonterminal: &str, rng: &mut R) -> GenResult {
    let rule = grammar
        .rule_for(nonterminal)
        .ok_or_else(|| GenerateError::UndefinedNonterminal(nonterminal.to_string()))?;

    let first = generate_symbol(grammar, &rule.first, rng)?;
    let second = generate_symbol(grammar, &rule.second, rng)?;
    trace!("Placing `{}` {} `{}`", rule.first, rule.relation, rule.second);

    return Ok(rule.generate_combine(first, second, rng)?);
}
