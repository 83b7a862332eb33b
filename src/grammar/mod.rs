/*
    This module is for storing shape grammars and classifying strokes into
    their terminal symbols
*/

mod rule;
mod verifier;

use std::collections::HashMap;

use thiserror::Error;

use crate::geometry::*;
use crate::shape::ShapeNode;

pub use rule::{Relation, Rule, TOLERANCE};
pub use verifier::verify_rules;

// A grammar symbol. Terminals carry the unit stroke fresh instances are made from
#[derive(Debug, PartialEq, Clone)]
pub enum Symbol {
    Terminal(Line),
    Nonterminal,
}

// Symbols keyed by their name
pub type SymbolTable = HashMap<String, Symbol>;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum GrammarError {
    #[error("Rule for `{rule}` uses undefined symbol `{symbol}`")]
    UndefinedSymbol { rule: String, symbol: String },
    #[error("Terminal `{0}` cannot be produced by a rule")]
    TerminalProduction(String),
    #[error("`{0}` is produced by more than one rule")]
    DuplicateProduction(String),
    #[error("No rule produces `{0}`")]
    MissingProduction(String),
    #[error("Rule for `{rule}` uses `{symbol}` before it is produced")]
    OutOfOrder { rule: String, symbol: String },
    #[error("Start symbol `{0}` is not defined")]
    UndefinedStart(String),
    #[error("Start symbol `{0}` must be produced by the last rule")]
    StartNotLast(String),
}

// Pixel thresholds used to snap nearly straight strokes
const STRAIGHT_DELTA: f64 = 1.0;
const STRAIGHT_RATIO: f64 = 0.2;

// Picks the terminal for a stroke: a1 horizontal, a2 vertical, a3 rising
// diagonal, a4 falling diagonal. Checks run in this order, so ties go to the
// earlier one
pub fn terminal_symbol(line: &Line) -> &'static str {
    let (dx, dy) = line.delta();

    if dy.abs() < STRAIGHT_DELTA {
        return "a1";
    }
    if dx.abs() < STRAIGHT_DELTA {
        return "a2";
    }
    // Both deltas are at least one unit here, so the ratios are defined
    if (dx / dy).abs() < STRAIGHT_RATIO {
        return "a2";
    }
    if (dy / dx).abs() < STRAIGHT_RATIO {
        return "a1";
    }

    if line.high_point().x < line.low_point().x {
        "a4"
    } else {
        "a3"
    }
}

// Wraps a captured stroke in a terminal node
pub fn classify(line: Line) -> ShapeNode {
    ShapeNode::from_line(terminal_symbol(&line), line)
}

pub fn classify_all(lines: impl IntoIterator<Item = Line>) -> Vec<ShapeNode> {
    lines.into_iter().map(classify).collect()
}

// An ordered list of binary rules over a fixed symbol table. Rules are kept
// in declaration order; recognition depends on it
#[derive(Debug, PartialEq, Clone)]
pub struct Grammar {
    start_symbol: String,
    symbols: SymbolTable,
    rules: Vec<Rule>,
}

impl Grammar {
    pub fn new(symbols: SymbolTable, rules: Vec<Rule>, start_symbol: &str) -> Result<Self, Vec<GrammarError>> {
        verify_rules(&rules, &symbols, start_symbol)?;

        return Ok(Grammar {
            start_symbol: start_symbol.to_string(),
            symbols,
            rules,
        });
    }

    // The cat figure: two ears over a face, where the face is a pair of eyes
    // and a mouth inside a square
    pub fn cat() -> Self {
        let mut symbols = SymbolTable::new();
        symbols.insert("a1".to_string(), Symbol::Terminal(Line::from_coords(0.0, 0.0, 10.0, 0.0)));
        symbols.insert("a2".to_string(), Symbol::Terminal(Line::from_coords(0.0, 0.0, 0.0, 10.0)));
        symbols.insert("a3".to_string(), Symbol::Terminal(Line::from_coords(0.0, 0.0, 10.0, 10.0)));
        symbols.insert("a4".to_string(), Symbol::Terminal(Line::from_coords(10.0, 0.0, 0.0, 10.0)));

        let rules = vec![
            Rule::new("ear", "a3", "a4", Relation::Adjacency),
            Rule::new("ears", "ear", "ear", Relation::Adjacency),
            Rule::new("parallel", "a4", "a3", Relation::Adjacency),
            Rule::new("square", "ear", "parallel", Relation::Stacking),
            Rule::new("eye", "ear", "a1", Relation::Stacking),
            Rule::new("eyes", "eye", "eye", Relation::Adjacency),
            Rule::new("eyesAndMouth", "eyes", "a1", Relation::Stacking),
            Rule::new("face", "eyesAndMouth", "square", Relation::Containment),
            Rule::new("cat", "ears", "face", Relation::Stacking),
        ];
        for rule in &rules {
            symbols.insert(rule.start.clone(), Symbol::Nonterminal);
        }

        Grammar {
            start_symbol: "cat".to_string(),
            symbols,
            rules,
        }
    }

    pub fn start_symbol(&self) -> &str {
        &self.start_symbol
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    // The single rule that produces `symbol`
    pub fn rule_for(&self, symbol: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.start == symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_axis_strokes() {
        assert_eq!(terminal_symbol(&Line::from_coords(0.0, 0.0, 10.0, 0.0)), "a1");
        assert_eq!(terminal_symbol(&Line::from_coords(0.0, 0.0, 0.0, 10.0)), "a2");
        assert_eq!(terminal_symbol(&Line::from_coords(5.0, 5.0, 5.0, 5.0)), "a1");
    }

    #[test]
    fn classify_diagonals() {
        assert_eq!(terminal_symbol(&Line::from_coords(0.0, 0.0, 10.0, 10.0)), "a3");
        assert_eq!(terminal_symbol(&Line::from_coords(10.0, 10.0, 0.0, 0.0)), "a3");
        assert_eq!(terminal_symbol(&Line::from_coords(0.0, 10.0, 10.0, 0.0)), "a4");
        assert_eq!(terminal_symbol(&Line::from_coords(10.0, 0.0, 0.0, 10.0)), "a4");
    }

    #[test]
    fn classify_nearly_straight() {
        // Slopes under 0.2 snap to the nearest axis
        assert_eq!(terminal_symbol(&Line::from_coords(0.0, 0.0, 100.0, 15.0)), "a1");
        assert_eq!(terminal_symbol(&Line::from_coords(0.0, 0.0, 15.0, 100.0)), "a2");
        assert_eq!(terminal_symbol(&Line::from_coords(0.0, 0.0, 100.0, 25.0)), "a3");
        assert_eq!(terminal_symbol(&Line::from_coords(0.0, 0.0, 0.5, 0.5)), "a1");
    }

    #[test]
    fn classify_is_pure() {
        let line = Line::from_coords(3.0, 17.0, 21.0, 2.0);

        assert_eq!(terminal_symbol(&line), terminal_symbol(&line));
        assert_eq!(classify(line), classify(line));
    }

    #[test]
    fn classify_builds_terminal_node() {
        let node = classify(Line::from_coords(0.0, 10.0, 10.0, 0.0));

        assert_eq!(node.symbol, "a4");
        assert_eq!(node.start, Point::new(0.0, 10.0));
        assert_eq!(node.end, Point::new(10.0, 0.0));
        assert_eq!(node.lines.len(), 1);
    }

    #[test]
    fn cat_grammar_shape() {
        let grammar = Grammar::cat();

        assert_eq!(grammar.start_symbol(), "cat");
        assert_eq!(grammar.rules().len(), 9);
        assert_eq!(grammar.symbols().len(), 13);
        assert_eq!(grammar.rules().last().map(|rule| rule.start.as_str()), Some("cat"));
        assert_eq!(grammar.rule_for("face").map(|rule| rule.relation), Some(Relation::Containment));
        assert!(grammar.rule_for("a1").is_none());
        assert!(matches!(grammar.symbol("a3"), Some(Symbol::Terminal(_))));
    }

    #[test]
    fn new_rejects_broken_rules() {
        let mut symbols = SymbolTable::new();
        symbols.insert("a1".to_string(), Symbol::Terminal(Line::from_coords(0.0, 0.0, 10.0, 0.0)));
        symbols.insert("dash".to_string(), Symbol::Nonterminal);

        let rules = vec![Rule::new("dash", "a1", "a1", Relation::Adjacency)];
        assert!(Grammar::new(symbols.clone(), rules.clone(), "dash").is_ok());
        assert_eq!(
            Grammar::new(symbols, Vec::new(), "dash"),
            Err(vec![
                GrammarError::MissingProduction("dash".to_string()),
                GrammarError::StartNotLast("dash".to_string())
            ])
        );
    }
}
