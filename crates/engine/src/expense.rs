use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Largest amount a single expense may carry. Keeps every balance and total
/// far away from `f64` overflow.
pub const MAX_AMOUNT: f64 = 1e12;

/// A single payment made by one participant on behalf of the whole group.
///
/// Expenses are immutable: once recorded they are only dropped all together
/// when the group is reset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub payer: String,
    pub amount: f64,
    pub description: String,
}

impl Expense {
    /// Validate the input and build a new expense with a fresh id.
    ///
    /// Payer and description are trimmed. The amount must be strictly
    /// positive and at most [`MAX_AMOUNT`].
    pub fn new(amount: f64, payer: &str, description: &str) -> ResultEngine<Self> {
        if !(amount > 0.0 && amount <= MAX_AMOUNT) {
            return Err(EngineError::InvalidAmount(format!(
                "amount must be in (0, {MAX_AMOUNT}], got {amount}"
            )));
        }
        let description = normalize_required_text(description).ok_or_else(|| {
            EngineError::InvalidDescription("description must not be empty".to_string())
        })?;
        let payer = normalize_required_text(payer)
            .ok_or_else(|| EngineError::InvalidPayer("payer must not be empty".to_string()))?;

        Ok(Self {
            id: Uuid::new_v4(),
            payer,
            amount,
            description,
        })
    }
}

fn normalize_required_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
