//! Procedure Registry

use crate::{ProcedureMeta, SpecialProcedure};
use measura_core::ProcedureId;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Central registry of special conversion procedures
#[derive(Clone, Default)]
pub struct ProcedureRegistry {
    procedures: HashMap<String, Arc<dyn SpecialProcedure>>,
}

impl ProcedureRegistry {
    pub fn new() -> Self {
        Self {
            procedures: HashMap::new(),
        }
    }

    pub fn with_procedure<P: SpecialProcedure + 'static>(mut self, p: P) -> Self {
        let name = p.meta().name.to_string();
        self.procedures.insert(name, Arc::new(p));
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn SpecialProcedure> {
        self.procedures.get(name).map(|p| p.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.procedures.contains_key(name)
    }

    /// Run a procedure by id; `None` if it is unknown or rejects the input
    pub fn call(&self, id: &ProcedureId, magnitude: f64) -> Option<f64> {
        self.get(id.as_str())?.call(magnitude)
    }

    /// Metadata of every registered procedure, sorted by name
    pub fn list(&self, category: Option<&str>) -> Vec<ProcedureMeta> {
        let mut metas: Vec<ProcedureMeta> = self
            .procedures
            .values()
            .map(|p| p.meta())
            .filter(|m| category.map_or(true, |c| m.category == c))
            .collect();
        metas.sort_by(|a, b| a.name.cmp(b.name));
        metas
    }

    pub fn len(&self) -> usize {
        self.procedures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
    }
}

impl fmt::Debug for ProcedureRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.procedures.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        f.debug_struct("ProcedureRegistry").field("procedures", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Halve;

    static HALVE_EXAMPLES: [&str; 1] = ["halve: 4 -> 2"];

    impl SpecialProcedure for Halve {
        fn meta(&self) -> ProcedureMeta {
            ProcedureMeta {
                name: "halve",
                description: "Divide by two",
                from: "a",
                to: "b",
                examples: &HALVE_EXAMPLES,
                category: "test",
            }
        }

        fn call(&self, magnitude: f64) -> Option<f64> {
            (magnitude >= 0.0).then(|| magnitude / 2.0)
        }
    }

    #[test]
    fn test_register_and_call() {
        let registry = ProcedureRegistry::new().with_procedure(Halve);
        assert!(registry.contains("halve"));
        assert_eq!(registry.call(&ProcedureId::new("halve"), 4.0), Some(2.0));
        assert_eq!(registry.call(&ProcedureId::new("halve"), -4.0), None);
        assert_eq!(registry.call(&ProcedureId::new("missing"), 4.0), None);
    }

    #[test]
    fn test_list_by_category() {
        let registry = ProcedureRegistry::new().with_procedure(Halve);
        assert_eq!(registry.list(None).len(), 1);
        assert_eq!(registry.list(Some("test"))[0].name, "halve");
        assert!(registry.list(Some("kitchen")).is_empty());
    }

    #[test]
    fn test_debug_lists_names() {
        let registry = ProcedureRegistry::new().with_procedure(Halve);
        assert!(format!("{:?}", registry).contains("halve"));
    }
}
