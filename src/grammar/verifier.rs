use std::collections::HashSet;

use super::{GrammarError, Rule, Symbol, SymbolTable};

fn get_rule_undefined_symbols(rule: &Rule, symbols: &SymbolTable) -> Vec<GrammarError> {
    [&rule.start, &rule.first, &rule.second]
        .into_iter()
        .filter(|symbol| !symbols.contains_key(*symbol))
        .map(|symbol| GrammarError::UndefinedSymbol {
            rule: rule.start.clone(),
            symbol: symbol.clone(),
        })
        .collect()
}

fn get_undefined_symbols(rules: &[Rule], symbols: &SymbolTable) -> Vec<GrammarError> {
    rules.iter()
        .flat_map(|rule| get_rule_undefined_symbols(rule, symbols))
        .collect()
}

// Every nonterminal needs exactly one rule, terminals need none
fn get_production_errors(rules: &[Rule], symbols: &SymbolTable) -> Vec<GrammarError> {
    let mut errors = Vec::new();
    let mut produced = HashSet::new();

    for rule in rules {
        match symbols.get(&rule.start) {
            Some(Symbol::Terminal(_)) => errors.push(GrammarError::TerminalProduction(rule.start.clone())),
            Some(Symbol::Nonterminal) if !produced.insert(&rule.start) => {
                errors.push(GrammarError::DuplicateProduction(rule.start.clone()))
            }
            _ => {}
        }
    }

    let mut missing: Vec<_> = symbols.iter()
        .filter(|(name, symbol)| **symbol == Symbol::Nonterminal && !produced.contains(name))
        .map(|(name, _)| GrammarError::MissingProduction(name.clone()))
        .collect();
    // Hash order is not stable
    missing.sort_by_key(|error| error.to_string());
    errors.extend(missing);

    return errors;
}

// Each argument must be a terminal or come out of an earlier rule. That keeps
// the rule list a topological order from the terminals up, so bottom-up
// recognition can walk it front to back
fn get_ordering_errors(rules: &[Rule], symbols: &SymbolTable) -> Vec<GrammarError> {
    let mut available: HashSet<&String> = symbols.iter()
        .filter(|(_, symbol)| matches!(symbol, Symbol::Terminal(_)))
        .map(|(name, _)| name)
        .collect();
    let mut errors = Vec::new();

    for rule in rules {
        for argument in [&rule.first, &rule.second] {
            if symbols.contains_key(argument) && !available.contains(argument) {
                errors.push(GrammarError::OutOfOrder {
                    rule: rule.start.clone(),
                    symbol: argument.clone(),
                });
            }
        }
        available.insert(&rule.start);
    }

    return errors;
}

fn get_start_errors(rules: &[Rule], symbols: &SymbolTable, start_symbol: &str) -> Vec<GrammarError> {
    if !symbols.contains_key(start_symbol) {
        return vec![GrammarError::UndefinedStart(start_symbol.to_string())];
    }

    match rules.last() {
        Some(rule) if rule.start == start_symbol => Vec::new(),
        _ => vec![GrammarError::StartNotLast(start_symbol.to_string())],
    }
}

pub fn verify_rules(rules: &[Rule], symbols: &SymbolTable, start_symbol: &str) -> Result<(), Vec<GrammarError>> {
    let mut errors = Vec::new();

    errors.extend(get_undefined_symbols(rules, symbols));
    errors.extend(get_production_errors(rules, symbols));
    errors.extend(get_ordering_errors(rules, symbols));
    errors.extend(get_start_errors(rules, symbols, start_symbol));

    if errors.len() > 0 {
        Err(errors)
    } else {
        Ok(())
    }
}
