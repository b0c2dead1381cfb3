//! Balance aggregation and debt settlement.
//!
//! Everything here is a pure function of a group's expenses: nothing is
//! cached and nothing is stored. The [`Engine`](crate::Engine) reads a
//! snapshot of the group and feeds it through these functions on every query.
//!
//! ## Split rule
//!
//! Every expense is split evenly among **all participants ever seen in the
//! group**, i.e. the distinct payers across the whole history, not only
//! those around when the expense was made. Someone joining late therefore
//! takes a share of older expenses too. The participant set is computed
//! once per query and reused for every expense.
//!
//! ## Settlement
//!
//! [`settle`] matches the largest debtor with the largest creditor until
//! every balance is zero. Balances are compared against an exact `0.0`:
//! for finite balances each step sets at least one side to exactly zero
//! (`x + (-x) == 0.0`), so at most `N - 1` debts are emitted for `N`
//! non-zero balances. A transfer that is not a finite positive number stops
//! the loop, which bounds it for any input, NaN and infinities included.
//! Floating-point residue left by long histories can still show up as tiny
//! extra debts.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Expense;

/// One settlement instruction: `debtor` pays `amount` to `creditor`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub debtor: String,
    pub creditor: String,
    pub amount: f64,
}

/// Distinct payers of `expenses`, in order of first appearance.
pub fn participants(expenses: &[Expense]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for expense in expenses {
        if !seen.contains(&expense.payer.as_str()) {
            seen.push(expense.payer.as_str());
        }
    }
    seen
}

/// Net position of every participant after the equal split.
///
/// Positive means the group owes the participant, negative means the
/// participant owes the group. Every payer is present, zero balances
/// included. The values sum to zero up to floating-point error.
pub fn equal_split_balances(expenses: &[Expense]) -> BTreeMap<String, f64> {
    let mut balances: BTreeMap<String, f64> = participants(expenses)
        .into_iter()
        .map(|participant| (participant.to_string(), 0.0))
        .collect();
    let count = balances.len() as f64;

    for expense in expenses {
        let share = expense.amount / count;
        for (participant, balance) in balances.iter_mut() {
            let contribution = if *participant == expense.payer {
                expense.amount - share
            } else {
                -share
            };
            *balance += contribution;
        }
    }

    balances
}

/// Amount each payer spent personally, ignoring the split.
pub fn raw_totals(expenses: &[Expense]) -> BTreeMap<String, f64> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for expense in expenses {
        *totals.entry(expense.payer.clone()).or_insert(0.0) += expense.amount;
    }
    totals
}

/// Sum of every expense of the group.
pub fn total(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|expense| expense.amount).sum()
}

/// Order expenses for tabular display: by payer (byte order, so
/// case-sensitive), insertion order among equal payers.
pub fn sort_for_display(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| a.payer.cmp(&b.payer));
}

/// Turn net balances into a list of payments that zeroes all of them.
///
/// Zero balances are skipped. Ties in the balance ordering keep ascending
/// participant order, so the output is deterministic.
pub fn settle(balances: &BTreeMap<String, f64>) -> Vec<Debt> {
    let mut sorted: Vec<(&str, f64)> = balances
        .iter()
        .filter(|(_, balance)| **balance != 0.0)
        .map(|(participant, balance)| (participant.as_str(), *balance))
        .collect();
    sorted.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut debts = Vec::new();
    if sorted.len() < 2 {
        return debts;
    }

    let mut low = 0;
    let mut high = sorted.len() - 1;
    while low < high {
        let transfer = (-sorted[low].1).min(sorted[high].1);
        if !(transfer > 0.0 && transfer.is_finite()) {
            // Same-sign residue, or balances that are no longer numbers.
            tracing::debug!(
                debtor = sorted[low].0,
                creditor = sorted[high].0,
                "stopping settlement on non-positive transfer {transfer}"
            );
            break;
        }

        debts.push(Debt {
            debtor: sorted[low].0.to_string(),
            creditor: sorted[high].0.to_string(),
            amount: transfer,
        });

        sorted[low].1 += transfer;
        sorted[high].1 -= transfer;

        if sorted[low].1 == 0.0 {
            low += 1;
        }
        if sorted[high].1 == 0.0 {
            high -= 1;
        }
    }

    debts
}
