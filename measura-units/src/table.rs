//! Conversion table - per-kind directed edges between canonical units

use crate::config::{RuleConfig, UnitsConfig};
use crate::formulas;
use crate::registry::UnitRegistry;
use measura_core::{ConfigError, ConversionEdge, ConversionRule, Kind, ProcedureId, Unit};
use measura_plugin::ProcedureRegistry;
use std::collections::HashMap;

const EDGE_SEPARATOR: &str = "_to_";

/// Edges of one kind plus the factor adjacency used for path search
#[derive(Debug, Clone, Default)]
pub(crate) struct KindGraph {
    edges: Vec<ConversionEdge>,
    index: HashMap<(Unit, Unit), usize>,
    /// Factor edges in both directions, in declaration order
    adjacency: HashMap<Unit, Vec<(Unit, f64)>>,
}

impl KindGraph {
    fn add(&mut self, edge: ConversionEdge) {
        if let ConversionRule::Factor(f) = edge.rule {
            self.adjacency
                .entry(edge.from.clone())
                .or_default()
                .push((edge.to.clone(), f));
            self.adjacency
                .entry(edge.to.clone())
                .or_default()
                .push((edge.from.clone(), 1.0 / f));
        }
        self.index
            .insert((edge.from.clone(), edge.to.clone()), self.edges.len());
        self.edges.push(edge);
    }

    pub(crate) fn neighbours(&self, unit: &Unit) -> &[(Unit, f64)] {
        self.adjacency.get(unit).map(|n| n.as_slice()).unwrap_or(&[])
    }
}

/// Sparse conversion graph for every kind
#[derive(Debug, Clone, Default)]
pub struct ConversionTable {
    graphs: HashMap<Kind, KindGraph>,
}

impl ConversionTable {
    /// Build and validate every kind's edges against the registry.
    ///
    /// Special edges must name a procedure in `procedures`.
    pub fn build(
        config: &UnitsConfig,
        registry: &UnitRegistry,
        procedures: &ProcedureRegistry,
    ) -> Result<Self, ConfigError> {
        let mut table = ConversionTable::default();

        for kind_config in &config.kinds {
            let kind = Kind::new(kind_config.name.as_str());
            if !registry.contains_kind(&kind) {
                return Err(ConfigError::UnknownKind(kind_config.name.clone()));
            }
            let graph = table.graphs.entry(kind.clone()).or_default();

            for edge_config in &kind_config.conversions {
                let key = edge_config.edge.trim();
                let (from, to) = split_edge_key(key, &kind, registry)?;
                if graph.index.contains_key(&(from.clone(), to.clone())) {
                    tracing::warn!(kind = %kind, key, "edge declared twice, keeping first");
                    continue;
                }

                let rule = match &edge_config.rule {
                    RuleConfig::Factor(f) => {
                        if !f.is_finite() || *f == 0.0 {
                            return Err(ConfigError::InvalidFactor {
                                kind: kind.to_string(),
                                key: key.to_string(),
                                factor: *f,
                            });
                        }
                        ConversionRule::Factor(*f)
                    }
                    RuleConfig::Formula(name) => {
                        let formula = formulas::lookup(name).ok_or_else(|| ConfigError::UnknownFormula {
                            kind: kind.to_string(),
                            key: key.to_string(),
                            name: name.clone(),
                        })?;
                        ConversionRule::Formula(formula)
                    }
                    RuleConfig::Special(name) => {
                        if !procedures.contains(name) {
                            return Err(ConfigError::UnknownProcedure {
                                kind: kind.to_string(),
                                key: key.to_string(),
                                name: name.clone(),
                            });
                        }
                        ConversionRule::Special(ProcedureId::new(name.as_str()))
                    }
                };

                graph.add(ConversionEdge::new(from, to, rule));
            }
        }

        Ok(table)
    }

    /// Stored edges of a kind, in declaration order
    pub fn edges_for(&self, kind: &Kind) -> &[ConversionEdge] {
        self.graphs
            .get(kind)
            .map(|g| g.edges.as_slice())
            .unwrap_or(&[])
    }

    /// Rule of the stored edge `from -> to`
    pub fn direct_rule(&self, kind: &Kind, from: &Unit, to: &Unit) -> Option<ConversionRule> {
        let graph = self.graphs.get(kind)?;
        let i = graph.index.get(&(from.clone(), to.clone()))?;
        Some(graph.edges[*i].rule.clone())
    }

    /// Reciprocal of a stored factor edge `to -> from`
    pub fn inverse_rule(&self, kind: &Kind, from: &Unit, to: &Unit) -> Option<ConversionRule> {
        self.direct_rule(kind, to, from)?.invert()
    }

    pub(crate) fn graph(&self, kind: &Kind) -> Option<&KindGraph> {
        self.graphs.get(kind)
    }
}

/// Split `<from>_to_<to>` into two units of `kind`.
///
/// Every separator position is tried, so unit names may contain
/// underscores (`m_per_s_to_km_per_h`). Either side may be an alias.
fn split_edge_key(key: &str, kind: &Kind, registry: &UnitRegistry) -> Result<(Unit, Unit), ConfigError> {
    let mut found_separator = false;

    for (i, _) in key.match_indices(EDGE_SEPARATOR) {
        found_separator = true;
        let from = registry.canonical_unit_for(&key[..i], kind);
        let to = registry.canonical_unit_for(&key[i + EDGE_SEPARATOR.len()..], kind);
        if let (Some(from), Some(to)) = (from, to) {
            return Ok((from, to));
        }
    }

    if found_separator {
        Err(ConfigError::ForeignUnit {
            kind: kind.to_string(),
            key: key.to_string(),
        })
    } else {
        Err(ConfigError::MalformedEdge {
            kind: kind.to_string(),
            key: key.to_string(),
        })
    }
}
