// qualis-core/src/domain/quality/weights.rs

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::quality::Category;

/// Tolerance allowed when checking that a table's weights sum to 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum WeightError {
    #[error("No score supplied for factor '{0}'")]
    MissingFactor(String),
    #[error("Factor '{0}' has no weight in this table")]
    UnknownFactor(String),
    #[error("Score {score} for factor '{factor}' is outside [0, 1]")]
    InvalidScore { factor: String, score: f64 },
    #[error("Weight {weight} for factor '{factor}' must be finite and non-negative")]
    InvalidWeight { factor: String, weight: f64 },
    #[error("Factor '{0}' is listed twice")]
    DuplicateFactor(String),
    #[error("Weights sum to {0}, expected 1.0")]
    BadSum(f64),
}

impl WeightError {
    /// Attach the validation call's identity so the caller gets a structured error.
    pub fn in_session(self, category: Category, session_id: &str) -> DomainError {
        match self {
            WeightError::MissingFactor(factor) => DomainError::MissingFactor {
                category,
                session_id: session_id.to_string(),
                factor,
            },
            WeightError::UnknownFactor(factor) => DomainError::UnknownFactor {
                category,
                session_id: Some(session_id.to_string()),
                factor,
            },
            WeightError::InvalidScore { score, .. } => DomainError::ScoreOutOfRange { score },
            other => DomainError::InvalidWeightTable(other.to_string()),
        }
    }
}

/// Factor name -> weight. Weights sum to 1.0 and the table is kept sorted by
/// factor name, which fixes the summation order of `aggregate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WeightTable {
    weights: BTreeMap<String, f64>,
}

static DATA_QUALITY: LazyLock<WeightTable> = LazyLock::new(|| {
    WeightTable::from_static(&[
        ("completeness", 0.20),
        ("accuracy", 0.25),
        ("consistency", 0.20),
        ("validity", 0.15),
        ("dataTypes", 0.10),
        ("ranges", 0.10),
    ])
});

static ANALYSIS_QUALITY: LazyLock<WeightTable> = LazyLock::new(|| {
    WeightTable::from_static(&[
        ("reliability", 0.25),
        ("consistency", 0.20),
        ("accuracy", 0.25),
        ("crossValidation", 0.15),
        ("statistical", 0.10),
        ("businessLogic", 0.05),
    ])
});

static REPORT_QUALITY: LazyLock<WeightTable> = LazyLock::new(|| {
    WeightTable::from_static(&[
        ("completeness", 0.20),
        ("consistency", 0.20),
        ("format", 0.15),
        ("content", 0.25),
        ("integrity", 0.15),
        ("crossReference", 0.05),
    ])
});

impl WeightTable {
    /// Builds a validated table: finite non-negative weights, no duplicate
    /// factors, sum equal to 1.0 within `WEIGHT_SUM_TOLERANCE`.
    pub fn new<I, S>(entries: I) -> Result<Self, WeightError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut weights = BTreeMap::new();
        for (factor, weight) in entries {
            let factor = factor.into();
            if !weight.is_finite() || weight < 0.0 {
                return Err(WeightError::InvalidWeight { factor, weight });
            }
            if weights.insert(factor.clone(), weight).is_some() {
                return Err(WeightError::DuplicateFactor(factor));
            }
        }

        let table = Self { weights };
        let sum = table.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(WeightError::BadSum(sum));
        }
        Ok(table)
    }

    // Built-in tables only; their sums are covered by tests.
    fn from_static(entries: &[(&str, f64)]) -> Self {
        Self {
            weights: entries
                .iter()
                .map(|(factor, weight)| (factor.to_string(), *weight))
                .collect(),
        }
    }

    /// The fixed table for a category.
    pub fn for_category(category: Category) -> &'static WeightTable {
        match category {
            Category::DataQuality => &DATA_QUALITY,
            Category::AnalysisQuality => &ANALYSIS_QUALITY,
            Category::ReportQuality => &REPORT_QUALITY,
        }
    }

    pub fn weight(&self, factor: &str) -> Option<f64> {
        self.weights.get(factor).copied()
    }

    pub fn contains(&self, factor: &str) -> bool {
        self.weights.contains_key(factor)
    }

    pub fn factors(&self) -> impl Iterator<Item = &str> {
        self.weights.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(f, w)| (f.as_str(), *w))
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn sum(&self) -> f64 {
        self.weights.values().sum()
    }

    /// Σ score(f) * weight(f) over every factor of the table.
    ///
    /// A factor of the table without a score is a `MissingFactor` error; it is
    /// never treated as 0. A score for a factor the table does not know is an
    /// `UnknownFactor` error. The input's iteration order has no effect on the
    /// result: the sum always walks the table in factor-name order.
    pub fn aggregate<'a, I>(&self, scores: I) -> Result<f64, WeightError>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut supplied: BTreeMap<&str, f64> = BTreeMap::new();
        for (factor, score) in scores {
            if !self.contains(factor) {
                return Err(WeightError::UnknownFactor(factor.to_string()));
            }
            if !(0.0..=1.0).contains(&score) {
                return Err(WeightError::InvalidScore {
                    factor: factor.to_string(),
                    score,
                });
            }
            supplied.insert(factor, score);
        }

        let mut total = 0.0;
        for (factor, weight) in &self.weights {
            let score = supplied
                .get(factor.as_str())
                .ok_or_else(|| WeightError::MissingFactor(factor.clone()))?;
            total += score * weight;
        }
        Ok(total)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn uniform(category: Category, score: f64) -> Vec<(&'static str, f64)> {
        WeightTable::for_category(category)
            .factors()
            .map(|f| (f, score))
            .collect()
    }

    #[test]
    fn test_builtin_tables_sum_to_one() {
        for category in Category::ALL {
            let sum = WeightTable::for_category(category).sum();
            assert!(
                (sum - 1.0).abs() <= WEIGHT_SUM_TOLERANCE,
                "{} sums to {}",
                category,
                sum
            );
        }
    }

    #[test]
    fn test_builtin_tables_have_exact_weights() {
        let data = WeightTable::for_category(Category::DataQuality);
        assert_eq!(data.len(), 6);
        assert_eq!(data.weight("accuracy"), Some(0.25));
        assert_eq!(data.weight("dataTypes"), Some(0.10));

        let analysis = WeightTable::for_category(Category::AnalysisQuality);
        assert_eq!(analysis.weight("crossValidation"), Some(0.15));
        assert_eq!(analysis.weight("businessLogic"), Some(0.05));

        let report = WeightTable::for_category(Category::ReportQuality);
        assert_eq!(report.weight("content"), Some(0.25));
        assert_eq!(report.weight("crossReference"), Some(0.05));
        assert_eq!(report.weight("accuracy"), None);
    }

    #[test]
    fn test_perfect_scores_aggregate_to_one() {
        let table = WeightTable::for_category(Category::DataQuality);
        let score = table.aggregate(uniform(Category::DataQuality, 1.0)).unwrap();
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_half_scores_aggregate_to_exactly_half() {
        for category in Category::ALL {
            let table = WeightTable::for_category(category);
            let score = table.aggregate(uniform(category, 0.5)).unwrap();
            assert_eq!(score, 0.5, "{}", category);
        }
    }

    #[test]
    fn test_missing_ranges_is_reported_by_name() {
        let table = WeightTable::for_category(Category::DataQuality);
        let scores = [
            ("completeness", 1.0),
            ("accuracy", 1.0),
            ("consistency", 1.0),
            ("validity", 1.0),
            ("dataTypes", 1.0),
        ];
        assert_eq!(
            table.aggregate(scores),
            Err(WeightError::MissingFactor("ranges".into()))
        );
    }

    #[test]
    fn test_unknown_factor_fails_fast() {
        let table = WeightTable::for_category(Category::ReportQuality);
        let mut scores = uniform(Category::ReportQuality, 0.9);
        scores.push(("latency", 0.9));
        assert_eq!(
            table.aggregate(scores),
            Err(WeightError::UnknownFactor("latency".into()))
        );
    }

    #[test]
    fn test_out_of_range_score_is_rejected() {
        let table = WeightTable::for_category(Category::DataQuality);
        let mut scores = uniform(Category::DataQuality, 0.9);
        scores[0].1 = 1.5;
        assert!(matches!(
            table.aggregate(scores),
            Err(WeightError::InvalidScore { .. })
        ));
    }

    #[test]
    fn test_custom_table_validation() {
        assert!(WeightTable::new([("accuracy", 0.4), ("completeness", 0.6)]).is_ok());
        assert!(matches!(
            WeightTable::new([("accuracy", 0.4), ("completeness", 0.5)]),
            Err(WeightError::BadSum(_))
        ));
        assert_eq!(
            WeightTable::new([("accuracy", 0.5), ("accuracy", 0.5)]),
            Err(WeightError::DuplicateFactor("accuracy".into()))
        );
        assert!(matches!(
            WeightTable::new([("accuracy", f64::NAN)]),
            Err(WeightError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn test_error_context_mapping() {
        let err = WeightError::MissingFactor("ranges".into())
            .in_session(Category::DataQuality, "validation_1_x");
        assert_eq!(
            err,
            DomainError::MissingFactor {
                category: Category::DataQuality,
                session_id: "validation_1_x".into(),
                factor: "ranges".into(),
            }
        );

        let err = WeightError::UnknownFactor("latency".into())
            .in_session(Category::DataQuality, "validation_1_x");
        assert_eq!(err.session_id(), Some("validation_1_x"));
        assert_eq!(err.factor(), Some("latency"));
    }

    fn category_strategy() -> impl Strategy<Value = Category> {
        prop_oneof![
            Just(Category::DataQuality),
            Just(Category::AnalysisQuality),
            Just(Category::ReportQuality),
        ]
    }

    proptest! {
        #[test]
        fn aggregate_stays_in_unit_interval(
            category in category_strategy(),
            raw in proptest::collection::vec(0.0f64..=1.0, 6),
        ) {
            let table = WeightTable::for_category(category);
            let scores: Vec<(&str, f64)> = table.factors().zip(raw).collect();
            let score = table.aggregate(scores).unwrap();
            prop_assert!((0.0..=1.0).contains(&score), "score {} out of bounds", score);
        }

        #[test]
        fn aggregate_ignores_input_order(
            category in category_strategy(),
            raw in proptest::collection::vec(0.0f64..=1.0, 6),
            rotation in 0usize..6,
        ) {
            let table = WeightTable::for_category(category);
            let forward: Vec<(&str, f64)> = table.factors().zip(raw).collect();
            let mut shuffled = forward.clone();
            shuffled.rotate_left(rotation);
            shuffled.reverse();
            let as_map: HashMap<&str, f64> = forward.iter().copied().collect();

            let expected = table.aggregate(forward).unwrap();
            prop_assert_eq!(table.aggregate(shuffled).unwrap(), expected);
            prop_assert_eq!(table.aggregate(as_map).unwrap(), expected);
        }
    }
}
