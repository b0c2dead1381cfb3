//! Shared-expense ledger and settlement engine.
//!
//! The [`Engine`] keeps, for every group, the sequence of [`Expense`]s
//! recorded by its members and answers balance and settlement queries by
//! recomputing them from that sequence. Storage is pluggable through
//! [`ExpenseStore`]; the default [`MemoryStore`] lives and dies with the
//! process.
//!
//! ```rust
//! # async fn demo() -> Result<(), engine::EngineError> {
//! use engine::{Engine, GroupId};
//!
//! let engine = Engine::builder().build();
//! let group = GroupId(-1001);
//!
//! engine.record(group, 150.0, "alice", "groceries").await?;
//! engine.record(group, 50.0, "bob", "ice").await?;
//!
//! let debts = engine.debts(group).await?;
//! assert_eq!(debts[0].debtor, "bob");
//! assert_eq!(debts[0].amount, 50.0);
//! # Ok(())
//! # }
//! ```
use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

pub use error::EngineError;
pub use expense::{Expense, MAX_AMOUNT};
pub use settlement::Debt;
pub use store::{ExpenseStore, MemoryStore};

mod error;
mod expense;
pub mod settlement;
mod store;

type ResultEngine<T> = Result<T, EngineError>;

/// Identifier of an independent ledger, e.g. a chat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub i64);

impl From<i64> for GroupId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Entry point of the ledger.
///
/// Mutations take the store's write lock and queries read a consistent
/// snapshot under the read lock, so concurrent callers never observe a half
/// applied change.
#[derive(Debug)]
pub struct Engine<S = MemoryStore> {
    store: RwLock<S>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

impl<S: ExpenseStore> Engine<S> {
    /// Drop every expense of `group`.
    pub async fn reset(&self, group: GroupId) -> ResultEngine<()> {
        self.store.write().await.clear(group)?;
        tracing::info!(%group, "group reset");
        Ok(())
    }

    /// Record an expense paid by `payer` for the whole group.
    ///
    /// The input is validated before touching the store: on error the
    /// ledger is unchanged.
    pub async fn record(
        &self,
        group: GroupId,
        amount: f64,
        payer: &str,
        description: &str,
    ) -> ResultEngine<Expense> {
        let expense = Expense::new(amount, payer, description)?;
        self.store.write().await.append(group, expense.clone())?;
        tracing::info!(
            %group,
            id = %expense.id,
            payer = %expense.payer,
            amount = expense.amount,
            "expense recorded"
        );
        Ok(expense)
    }

    /// Expenses of `group`, ordered by payer and then by insertion.
    pub async fn expenses(&self, group: GroupId) -> ResultEngine<Vec<Expense>> {
        let mut expenses = self.snapshot(group).await?;
        settlement::sort_for_display(&mut expenses);
        Ok(expenses)
    }

    /// How much each payer spent, without splitting anything.
    pub async fn raw_totals(&self, group: GroupId) -> ResultEngine<BTreeMap<String, f64>> {
        let expenses = self.snapshot(group).await?;
        Ok(settlement::raw_totals(&expenses))
    }

    /// Sum of every expense recorded in `group`.
    pub async fn total(&self, group: GroupId) -> ResultEngine<f64> {
        let expenses = self.snapshot(group).await?;
        Ok(settlement::total(&expenses))
    }

    /// Net balance of every participant, see [`settlement::equal_split_balances`].
    pub async fn balances(&self, group: GroupId) -> ResultEngine<BTreeMap<String, f64>> {
        let expenses = self.snapshot(group).await?;
        Ok(settlement::equal_split_balances(&expenses))
    }

    /// Payments that settle the group, see [`settlement::settle`].
    pub async fn debts(&self, group: GroupId) -> ResultEngine<Vec<Debt>> {
        let expenses = self.snapshot(group).await?;
        let balances = settlement::equal_split_balances(&expenses);
        let debts = settlement::settle(&balances);
        tracing::debug!(%group, participants = balances.len(), debts = debts.len(), "settled");
        Ok(debts)
    }

    async fn snapshot(&self, group: GroupId) -> ResultEngine<Vec<Expense>> {
        let expenses = self.store.read().await.expenses(group)?;
        tracing::debug!(%group, expenses = expenses.len(), "read group");
        Ok(expenses)
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder<S = MemoryStore> {
    store: S,
}

impl<S: ExpenseStore> EngineBuilder<S> {
    /// Use `store` as storage backend instead of the in-memory one.
    pub fn store<T: ExpenseStore>(self, store: T) -> EngineBuilder<T> {
        EngineBuilder { store }
    }

    /// Construct `Engine`
    pub fn build(self) -> Engine<S> {
        Engine {
            store: RwLock::new(self.store),
        }
    }
}
