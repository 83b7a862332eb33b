/*
    This module decides whether a set of strokes can be reduced bottom-up to
    the grammar's start symbol
*/

use std::fmt::Display;
use std::thread;

use itertools::Itertools;
use log::{debug, info};

use crate::grammar::*;
use crate::shape::ShapeNode;

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct RecognitionResult {
    pub accepted: bool,
    // The first symbol no pair of nodes could be reduced to
    pub failing_symbol: Option<String>,
}

impl RecognitionResult {
    pub fn accepted() -> Self {
        RecognitionResult {
            accepted: true,
            failing_symbol: None,
        }
    }

    pub fn rejected(symbol: &str) -> Self {
        RecognitionResult {
            accepted: false,
            failing_symbol: Some(symbol.to_string()),
        }
    }
}

impl Display for RecognitionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.failing_symbol {
            _ if self.accepted => write!(f, "The figure matches the grammar"),
            Some(symbol) => write!(f, "The figure does not match the grammar: no `{}` found", symbol),
            None => write!(f, "The figure does not match the grammar"),
        }
    }
}

// Everything a recognition run produced
#[derive(Debug)]
pub struct Recognition {
    pub result: RecognitionResult,
    // The working collection at the point the run stopped
    pub nodes: Vec<ShapeNode>,
    // Size of the collection after each completed stage
    pub stage_sizes: Vec<usize>,
}

pub struct Recognizer<'g> {
    grammar: &'g Grammar,
    workers: usize,
}

fn default_workers() -> usize {
    thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

// Tests one slice of first arguments against every second argument
fn match_chunk(rule: &Rule, firsts: &[&ShapeNode], seconds: &[&ShapeNode]) -> Vec<ShapeNode> {
    firsts.iter()
        .cartesian_product(seconds.iter())
        .filter(|(first, second)| rule.matches(first, second))
        .map(|(first, second)| rule.combine(first, second))
        .collect()
}

impl<'g> Recognizer<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Recognizer {
            grammar,
            workers: default_workers(),
        }
    }

    // Number of threads a stage's scan is split across. At least one
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn recognize(&self, nodes: Vec<ShapeNode>) -> RecognitionResult {
        self.run(nodes).result
    }

    // Walks the rules in declaration order. Each stage only reads the
    // collection as it was when the stage began, and its new nodes are
    // appended once every worker has finished
    pub fn run(&self, mut nodes: Vec<ShapeNode>) -> Recognition {
        let mut stage_sizes = Vec::with_capacity(self.grammar.rules().len());

        for rule in self.grammar.rules() {
            let found = self.scan_stage(rule, &nodes);
            debug!("Rule `{}` added {} nodes to {}", rule, found.len(), nodes.len());

            if found.is_empty() {
                info!("Recognition stopped: no `{}` found", rule.start);
                return Recognition {
                    result: RecognitionResult::rejected(&rule.start),
                    nodes,
                    stage_sizes,
                };
            }

            nodes.extend(found);
            stage_sizes.push(nodes.len());
        }

        info!("Recognised `{}` from {} nodes", self.grammar.start_symbol(), nodes.len());
        return Recognition {
            result: RecognitionResult::accepted(),
            nodes,
            stage_sizes,
        };
    }

    // Fans the first-argument candidates out over the workers and gathers
    // every combined node they produce
    fn scan_stage(&self, rule: &Rule, nodes: &[ShapeNode]) -> Vec<ShapeNode> {
        let firsts = nodes.iter().filter(|node| node.symbol == rule.first).collect_vec();
        let seconds = nodes.iter().filter(|node| node.symbol == rule.second).collect_vec();
        if firsts.is_empty() || seconds.is_empty() {
            return Vec::new();
        }

        if self.workers == 1 || firsts.len() == 1 {
            return match_chunk(rule, &firsts, &seconds);
        }

        let chunk_size = firsts.len().div_ceil(self.workers);
        let seconds = &seconds;
        thread::scope(|scope| {
            let handles = firsts.chunks(chunk_size)
                .map(|chunk| scope.spawn(move || match_chunk(rule, chunk, seconds)))
                .collect_vec();

            handles.into_iter()
                .flat_map(|handle| handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
                .collect()
        })
    }
}

// Recognises with the default number of workers
pub fn recognize(grammar: &Grammar, nodes: Vec<ShapeNode>) -> RecognitionResult {
    Recognizer::new(grammar).recognize(nodes)
}
