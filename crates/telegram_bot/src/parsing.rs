use engine::MAX_AMOUNT;

/// Arguments of `/expense` once validated.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ExpenseArgs {
    pub amount: f64,
    pub description: String,
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub(crate) enum ParseError {
    #[error("amount and description are required")]
    MissingArguments,
    #[error("invalid amount")]
    InvalidAmount,
}

/// Parses `/expense` arguments: `<amount> <description>`.
///
/// Rules:
/// - the amount is a plain decimal, `.` or `,` as separator, optional `+`
/// - no exponent, `nan`, `inf`, hex or negative amounts
/// - the amount must be > 0 and at most [`MAX_AMOUNT`]
/// - everything after the amount is the description
pub(crate) fn parse_expense(input: &str) -> Result<ExpenseArgs, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::MissingArguments);
    }

    let (amount_str, description) = trimmed
        .split_once(char::is_whitespace)
        .ok_or(ParseError::MissingArguments)?;

    Ok(ExpenseArgs {
        amount: parse_amount(amount_str)?,
        description: description.trim().to_string(),
    })
}

fn parse_amount(input: &str) -> Result<f64, ParseError> {
    let unsigned = input.strip_prefix('+').unwrap_or(input);
    let normalized = unsigned.replace(',', ".");

    let digits = normalized.chars().filter(char::is_ascii_digit).count();
    let dots = normalized.chars().filter(|c| *c == '.').count();
    if digits == 0 || dots > 1 || digits + dots != normalized.len() {
        return Err(ParseError::InvalidAmount);
    }

    let amount: f64 = normalized.parse().map_err(|_| ParseError::InvalidAmount)?;
    if !(amount > 0.0 && amount <= MAX_AMOUNT) {
        return Err(ParseError::InvalidAmount);
    }
    Ok(amount)
}
