//! Budget repository interface.

use super::types::BudgetRecord;

/// Repository trait for reading monthly budgets.
///
/// Implemented by whatever owns the budget data. Records may come back in any
/// order; an empty list means no budgets are known.
pub trait BudgetRepository: Send + Sync {
    /// Returns every known monthly budget.
    fn get_all(&self) -> Vec<BudgetRecord>;
}

/// A repository backed by an in-memory snapshot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBudgetRepository {
    budgets: Vec<BudgetRecord>,
}

impl InMemoryBudgetRepository {
    /// Creates a repository holding the given budgets.
    #[must_use]
    pub const fn new(budgets: Vec<BudgetRecord>) -> Self {
        Self { budgets }
    }

    /// Number of stored budgets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.budgets.len()
    }

    /// Returns true if no budgets are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty()
    }
}

impl BudgetRepository for InMemoryBudgetRepository {
    fn get_all(&self) -> Vec<BudgetRecord> {
        self.budgets.clone()
    }
}

impl<T: Into<BudgetRecord>> FromIterator<T> for InMemoryBudgetRepository {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prorata_shared::BudgetEntry;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_repository() {
        let repo = InMemoryBudgetRepository::default();
        assert!(repo.is_empty());
        assert!(repo.get_all().is_empty());
    }

    #[test]
    fn test_returns_snapshot_in_insertion_order() {
        let repo = InMemoryBudgetRepository::new(vec![
            BudgetRecord::new("202312", dec!(3100)),
            BudgetRecord::new("202311", dec!(3000)),
        ]);

        let all = repo.get_all();
        assert_eq!(repo.len(), 2);
        assert_eq!(all[0].period, "202312");
        assert_eq!(all[1].period, "202311");
    }

    #[test]
    fn test_collect_from_config_entries() {
        let entries = vec![
            BudgetEntry {
                period: "202308".into(),
                amount: dec!(31),
            },
            BudgetEntry {
                period: "202309".into(),
                amount: dec!(300),
            },
        ];

        let repo: InMemoryBudgetRepository = entries.into_iter().collect();
        assert_eq!(
            repo.get_all(),
            vec![
                BudgetRecord::new("202308", dec!(31)),
                BudgetRecord::new("202309", dec!(300)),
            ]
        );
    }
}
