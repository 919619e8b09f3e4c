// qualis-core/src/application/checkers.rs

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::domain::error::DomainError;
use crate::domain::quality::{Category, WeightTable};
use crate::infrastructure::adapters::baseline_checkers;
use crate::ports::checker::FactorChecker;

/// One checker per (category, factor). Registering a factor twice replaces
/// the earlier checker.
#[derive(Clone, Default)]
pub struct CheckerRegistry {
    checkers: HashMap<Category, BTreeMap<String, Arc<dyn FactorChecker>>>,
}

impl CheckerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed-score checkers for all three categories.
    pub fn baseline() -> Result<Self, DomainError> {
        Self::from_checkers(baseline_checkers()?)
    }

    pub fn from_checkers<I>(checkers: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = (Category, Arc<dyn FactorChecker>)>,
    {
        let mut registry = Self::new();
        for (category, checker) in checkers {
            registry.register(category, checker)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, category: Category, checker: Arc<dyn FactorChecker>) -> Result<(), DomainError> {
        let factor = checker.factor().to_string();
        if !WeightTable::for_category(category).contains(&factor) {
            return Err(DomainError::UnknownFactor {
                category,
                session_id: None,
                factor,
            });
        }
        self.checkers.entry(category).or_default().insert(factor, checker);
        Ok(())
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(mut self, category: Category, checker: Arc<dyn FactorChecker>) -> Result<Self, DomainError> {
        self.register(category, checker)?;
        Ok(self)
    }

    pub fn checkers_for(&self, category: Category) -> Vec<Arc<dyn FactorChecker>> {
        self.checkers
            .get(&category)
            .map(|by_factor| by_factor.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Whether every factor of the category table has a checker.
    pub fn covers(&self, category: Category) -> bool {
        let registered = self.checkers.get(&category);
        WeightTable::for_category(category)
            .factors()
            .all(|f| registered.is_some_and(|m| m.contains_key(f)))
    }

    pub fn len(&self) -> usize {
        self.checkers.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for CheckerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let factors: BTreeMap<&Category, Vec<&String>> = self
            .checkers
            .iter()
            .map(|(category, by_factor)| (category, by_factor.keys().collect()))
            .collect();
        f.debug_struct("CheckerRegistry").field("factors", &factors).finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::StaticChecker;

    #[test]
    fn test_baseline_covers_all_categories() {
        let registry = CheckerRegistry::baseline().unwrap();
        assert_eq!(registry.len(), 18);
        assert!(Category::ALL.iter().all(|c| registry.covers(*c)));
    }

    #[test]
    fn test_rejects_factor_outside_table() {
        let checker = Arc::new(StaticChecker::new("crossValidation", 0.9).unwrap());
        let err = CheckerRegistry::new()
            .with(Category::DataQuality, checker)
            .unwrap_err();
        assert!(matches!(err, DomainError::UnknownFactor { .. }));
    }

    #[test]
    fn test_reregistering_replaces() {
        let registry = CheckerRegistry::new()
            .with(Category::DataQuality, Arc::new(StaticChecker::new("ranges", 0.1).unwrap()))
            .unwrap()
            .with(Category::DataQuality, Arc::new(StaticChecker::new("ranges", 0.2).unwrap()))
            .unwrap();
        assert_eq!(registry.len(), 1);
        assert!(!registry.covers(Category::DataQuality));
        assert_eq!(registry.checkers_for(Category::ReportQuality).len(), 0);
    }
}
