use std::{collections::BTreeMap, fmt::Write};

use engine::{Debt, Expense};

pub(crate) const USAGE_HINT: &str = "Try writing the positive amount of the expense followed by its description. For example /expense 1200 Ice";
pub(crate) const UNKNOWN_COMMAND: &str = "I don't know that command";
pub(crate) const UNKNOWN_USER: &str = "I can't tell who you are, so I can't record this expense.";
pub(crate) const GENERIC_FAILURE: &str = "Something went wrong, try again later.";
pub(crate) const CLEANED: &str = "Cleaned";

const NOTHING_RECORDED: &str = "No expenses recorded yet.";
const ALL_SETTLED: &str = "Nobody owes anything.";

/// Two decimals, the way every amount is shown in the chat.
pub(crate) fn format_amount(amount: f64) -> String {
    format!("{:.2}", display_value(amount))
}

pub(crate) fn render_recorded(expense: &Expense) -> String {
    format!(
        "{}'s new {} expense added",
        expense.payer, expense.description
    )
}

pub(crate) fn render_total(total: f64) -> String {
    format!("Total: ${}", format_amount(total))
}

pub(crate) fn render_raw_totals(totals: &BTreeMap<String, f64>) -> String {
    if totals.is_empty() {
        return NOTHING_RECORDED.to_string();
    }

    let mut out = String::new();
    for (payer, amount) in totals {
        let _ = writeln!(out, "{payer} expense {}", format_amount(*amount));
    }
    out
}

pub(crate) fn render_balances(balances: &BTreeMap<String, f64>) -> String {
    if balances.is_empty() {
        return NOTHING_RECORDED.to_string();
    }

    let mut out = String::new();
    for (participant, balance) in balances {
        let _ = writeln!(out, "{participant} {:+.2}", display_value(*balance));
    }
    out
}

pub(crate) fn render_debts(debts: &[Debt]) -> String {
    let mut out = String::new();
    // Sub-cent debts are rounding residue, not money anyone can send.
    for debt in debts.iter().filter(|d| d.amount >= 0.005) {
        let _ = writeln!(
            out,
            "{} owes {} ${}",
            debt.debtor,
            debt.creditor,
            format_amount(debt.amount)
        );
    }

    if out.is_empty() {
        return ALL_SETTLED.to_string();
    }
    out
}

pub(crate) fn render_table(expenses: &[Expense]) -> String {
    if expenses.is_empty() {
        return NOTHING_RECORDED.to_string();
    }

    let mut out = String::from("User\t\tAmount\tDetail\n");
    for expense in expenses {
        let _ = writeln!(
            out,
            "{}\t\t{}\t{}",
            expense.payer,
            format_amount(expense.amount),
            expense.description
        );
    }
    out
}

/// Folds values that would print as `-0.00` into a plain zero.
fn display_value(value: f64) -> f64 {
    if value.abs() < 0.005 { 0.0 } else { value }
}
