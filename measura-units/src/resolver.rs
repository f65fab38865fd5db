//! Conversion resolver - finds a rule between two units of one kind
//!
//! Order of attempts:
//! 1. identical units -> factor 1
//! 2. stored edge `from -> to`
//! 3. reciprocal of a stored factor edge `to -> from`
//! 4. breadth-first search over factor edges (both directions), composing
//!    factors along the path
//!
//! Formula and special edges are only ever used as a single direct hop.

use crate::table::ConversionTable;
use measura_core::{ConversionRule, Kind, Unit};
use std::collections::{HashMap, VecDeque};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    table: &'a ConversionTable,
}

impl<'a> Resolver<'a> {
    pub fn new(table: &'a ConversionTable) -> Self {
        Resolver { table }
    }

    /// Rule converting `from` into `to`, both canonical units of `kind`
    pub fn resolve(&self, kind: &Kind, from: &Unit, to: &Unit) -> Option<ConversionRule> {
        if from == to {
            return Some(ConversionRule::IDENTITY);
        }
        if let Some(rule) = self.table.direct_rule(kind, from, to) {
            trace!(%kind, %from, %to, "direct edge");
            return Some(rule);
        }
        if let Some(rule) = self.table.inverse_rule(kind, from, to) {
            trace!(%kind, %from, %to, "inverted edge");
            return Some(rule);
        }

        let (factor, path) = self.factor_path(kind, from, to)?;
        debug!(
            %kind,
            path = %path.iter().map(Unit::as_str).collect::<Vec<_>>().join(" -> "),
            factor,
            "composed conversion"
        );
        Some(ConversionRule::Factor(factor))
    }

    /// Shortest chain of factor edges, as (composed factor, visited units)
    pub fn factor_path(&self, kind: &Kind, from: &Unit, to: &Unit) -> Option<(f64, Vec<Unit>)> {
        let graph = self.table.graph(kind)?;

        // unit -> (factor from `from`, predecessor)
        let mut reached: HashMap<&Unit, (f64, Option<&Unit>)> = HashMap::new();
        let mut queue = VecDeque::new();
        reached.insert(from, (1.0, None));
        queue.push_back(from);

        while let Some(current) = queue.pop_front() {
            let (so_far, _) = reached[current];
            if current == to {
                return Some((so_far, walk_back(&reached, to)));
            }
            for (next, factor) in graph.neighbours(current) {
                if !reached.contains_key(next) {
                    reached.insert(next, (so_far * factor, Some(current)));
                    queue.push_back(next);
                }
            }
        }

        None
    }
}

fn walk_back(reached: &HashMap<&Unit, (f64, Option<&Unit>)>, to: &Unit) -> Vec<Unit> {
    let mut path = vec![to.clone()];
    let mut current = to;
    while let Some((_, Some(previous))) = reached.get(current) {
        path.push((*previous).clone());
        current = *previous;
    }
    path.reverse();
    path
}
