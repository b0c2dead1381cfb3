use std::sync::Arc;

use engine::{Engine, EngineError, Expense, ExpenseStore, GroupId, MAX_AMOUNT, MemoryStore};

const GROUP: GroupId = GroupId(-100_200);

/// Expenses the first versions of the bot used to pre-populate every chat.
const DEMO_EXPENSES: [(&str, f64, &str); 5] = [
    ("Fox_SL", 50.0, "Mate"),
    ("Fox_SL", 50.0, "Gato"),
    ("Ismael", 50.0, "Hielo"),
    ("mliezun", 150.0, "tuki"),
    ("mliezun", 50.0, "tuki"),
];

async fn engine_with_demo_data(group: GroupId) -> Engine {
    let engine = Engine::builder().build();
    for (payer, amount, description) in DEMO_EXPENSES {
        engine.record(group, amount, payer, description).await.unwrap();
    }
    engine
}

#[tokio::test]
async fn unknown_group_behaves_as_empty() {
    let engine = Engine::builder().build();

    assert!(engine.expenses(GROUP).await.unwrap().is_empty());
    assert!(engine.raw_totals(GROUP).await.unwrap().is_empty());
    assert!(engine.balances(GROUP).await.unwrap().is_empty());
    assert!(engine.debts(GROUP).await.unwrap().is_empty());
    assert_eq!(engine.total(GROUP).await.unwrap(), 0.0);
}

#[tokio::test]
async fn two_equal_expenses_need_no_settlement() {
    let engine = Engine::builder().build();
    engine.record(GROUP, 100.0, "Alice", "Lunch").await.unwrap();
    engine.record(GROUP, 100.0, "Bob", "Dinner").await.unwrap();

    assert_eq!(engine.total(GROUP).await.unwrap(), 200.0);

    let balances = engine.balances(GROUP).await.unwrap();
    assert_eq!(balances["Alice"], 0.0);
    assert_eq!(balances["Bob"], 0.0);
    assert!(engine.debts(GROUP).await.unwrap().is_empty());

    let totals = engine.raw_totals(GROUP).await.unwrap();
    assert_eq!(totals["Alice"], 100.0);
    assert_eq!(totals["Bob"], 100.0);
}

#[tokio::test]
async fn uneven_expenses_settle_with_one_payment() {
    let engine = Engine::builder().build();
    engine.record(GROUP, 150.0, "Alice", "Lunch").await.unwrap();
    engine.record(GROUP, 50.0, "Bob", "Dinner").await.unwrap();

    let balances = engine.balances(GROUP).await.unwrap();
    assert_eq!(balances["Alice"], 50.0);
    assert_eq!(balances["Bob"], -50.0);

    let debts = engine.debts(GROUP).await.unwrap();
    assert_eq!(debts.len(), 1);
    assert_eq!(debts[0].debtor, "Bob");
    assert_eq!(debts[0].creditor, "Alice");
    assert_eq!(debts[0].amount, 50.0);
}

#[tokio::test]
async fn one_big_payer_among_three() {
    let engine = Engine::builder().build();
    engine.record(GROUP, 90.0, "A", "boat").await.unwrap();
    engine.record(GROUP, 3.0, "B", "gum").await.unwrap();
    engine.record(GROUP, 3.0, "C", "gum").await.unwrap();

    let balances = engine.balances(GROUP).await.unwrap();
    assert_eq!(balances["A"], 58.0);
    assert_eq!(balances["B"], -29.0);
    assert_eq!(balances["C"], -29.0);

    let debts = engine.debts(GROUP).await.unwrap();
    assert_eq!(debts.len(), 2);
    assert!(debts.iter().all(|d| d.creditor == "A" && d.amount == 29.0));
    assert_eq!(debts[0].debtor, "B");
    assert_eq!(debts[1].debtor, "C");
}

#[tokio::test]
async fn participant_set_spans_the_whole_history() {
    let engine = Engine::builder().build();
    engine.record(GROUP, 60.0, "alice", "rent").await.unwrap();

    // Alone, alice owes nothing for her own expense.
    assert_eq!(engine.balances(GROUP).await.unwrap()["alice"], 0.0);

    // bob's first expense makes him share the earlier one as well.
    engine.record(GROUP, 0.5, "bob", "candy").await.unwrap();
    let balances = engine.balances(GROUP).await.unwrap();
    assert_eq!(balances["alice"], 29.75);
    assert_eq!(balances["bob"], -29.75);
}

#[tokio::test]
async fn demo_data_totals() {
    let engine = engine_with_demo_data(GROUP).await;

    assert_eq!(engine.total(GROUP).await.unwrap(), 350.0);
    let totals = engine.raw_totals(GROUP).await.unwrap();
    assert_eq!(totals["Fox_SL"], 100.0);
    assert_eq!(totals["Ismael"], 50.0);
    assert_eq!(totals["mliezun"], 200.0);

    let debts = engine.debts(GROUP).await.unwrap();
    let settled: f64 = debts.iter().map(|d| d.amount).sum();
    assert!((settled - 250.0 / 3.0).abs() < 1e-9);
    assert!(debts.iter().all(|d| d.creditor == "mliezun"));
}

#[tokio::test]
async fn table_is_sorted_by_payer_then_insertion() {
    let engine = Engine::builder().build();
    engine.record(GROUP, 1.0, "mliezun", "first").await.unwrap();
    engine.record(GROUP, 2.0, "Ismael", "second").await.unwrap();
    engine.record(GROUP, 3.0, "mliezun", "third").await.unwrap();
    engine.record(GROUP, 4.0, "fox", "fourth").await.unwrap();

    let table = engine.expenses(GROUP).await.unwrap();
    let rows: Vec<(&str, &str)> = table
        .iter()
        .map(|e| (e.payer.as_str(), e.description.as_str()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Ismael", "second"),
            ("fox", "fourth"),
            ("mliezun", "first"),
            ("mliezun", "third"),
        ]
    );
}

#[tokio::test]
async fn reset_empties_the_group() {
    let engine = engine_with_demo_data(GROUP).await;

    engine.reset(GROUP).await.unwrap();

    assert!(engine.expenses(GROUP).await.unwrap().is_empty());
    assert_eq!(engine.total(GROUP).await.unwrap(), 0.0);

    // Resetting twice is harmless.
    engine.reset(GROUP).await.unwrap();
    assert!(engine.expenses(GROUP).await.unwrap().is_empty());
}

#[tokio::test]
async fn groups_are_independent() {
    let other = GroupId(7);
    let engine = engine_with_demo_data(GROUP).await;
    engine.record(other, 10.0, "zoe", "coffee").await.unwrap();

    engine.reset(GROUP).await.unwrap();

    let table = engine.expenses(other).await.unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table[0].payer, "zoe");
}

#[tokio::test]
async fn invalid_input_leaves_ledger_unchanged() {
    let engine = engine_with_demo_data(GROUP).await;
    let before = engine.expenses(GROUP).await.unwrap().len();

    let err = engine.record(GROUP, 0.0, "Alice", "Lunch").await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));
    assert!(err.is_validation());

    let err = engine.record(GROUP, -5.0, "Alice", "Lunch").await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let err = engine.record(GROUP, 5.0, "Alice", "").await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidDescription(_)));

    let err = engine.record(GROUP, 5.0, " ", "Lunch").await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidPayer(_)));

    assert_eq!(engine.expenses(GROUP).await.unwrap().len(), before);
}

#[tokio::test]
async fn huge_amounts_cannot_overflow_the_ledger() {
    let engine = Engine::builder().build();
    engine.record(GROUP, 1.0, "B", "gum").await.unwrap();

    for _ in 0..3 {
        let err = engine.record(GROUP, 1.7e308, "A", "yacht").await.unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));
    }
    for _ in 0..3 {
        engine.record(GROUP, MAX_AMOUNT, "A", "house").await.unwrap();
    }

    let total = engine.total(GROUP).await.unwrap();
    assert_eq!(total, 3.0 * MAX_AMOUNT + 1.0);
    assert!(engine.balances(GROUP).await.unwrap().values().all(|b| b.is_finite()));

    let debts = engine.debts(GROUP).await.unwrap();
    assert_eq!(debts.len(), 1);
    assert_eq!(debts[0].debtor, "B");
    assert_eq!(debts[0].creditor, "A");
    assert!(debts[0].amount.is_finite());
}

#[tokio::test]
async fn record_returns_the_stored_expense() {
    let engine = Engine::builder().build();
    let recorded = engine.record(GROUP, 12.5, "alice", "pizza").await.unwrap();

    let table = engine.expenses(GROUP).await.unwrap();
    assert_eq!(table, vec![recorded]);
}

#[tokio::test]
async fn concurrent_records_are_not_lost() {
    let engine = Arc::new(Engine::builder().build());
    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..50 {
        let engine = Arc::clone(&engine);
        tasks.spawn(async move {
            let payer = format!("p{}", i % 5);
            engine.record(GROUP, 1.0, &payer, "round").await.unwrap();
        });
    }
    while let Some(joined) = tasks.join_next().await {
        joined.unwrap();
    }

    assert_eq!(engine.expenses(GROUP).await.unwrap().len(), 50);
    assert_eq!(engine.total(GROUP).await.unwrap(), 50.0);
}

/// Store that refuses every write, to check failures surface as internal.
#[derive(Default)]
struct ReadOnlyStore(MemoryStore);

impl ExpenseStore for ReadOnlyStore {
    fn expenses(&self, group: GroupId) -> Result<Vec<Expense>, EngineError> {
        self.0.expenses(group)
    }

    fn append(&mut self, _group: GroupId, _expense: Expense) -> Result<(), EngineError> {
        Err(EngineError::Storage("read only".to_string()))
    }

    fn clear(&mut self, _group: GroupId) -> Result<(), EngineError> {
        Err(EngineError::Storage("read only".to_string()))
    }
}

#[tokio::test]
async fn storage_failures_are_not_validation_errors() {
    let engine = Engine::builder().store(ReadOnlyStore::default()).build();

    let err = engine.record(GROUP, 1.0, "alice", "pizza").await.unwrap_err();
    assert_eq!(err, EngineError::Storage("read only".to_string()));
    assert!(!err.is_validation());

    assert!(engine.reset(GROUP).await.is_err());
    assert!(engine.expenses(GROUP).await.unwrap().is_empty());
}
