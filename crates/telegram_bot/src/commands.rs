//! Command structs

use teloxide::utils::command::BotCommands;

/// Commands understood in every chat. Each chat is its own group.
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "I understand these commands:")]
pub enum Command {
    #[command(description = "show this message.")]
    Help,
    #[command(description = "record something you paid, e.g. /expense 1200 Ice")]
    Expense(String),
    #[command(description = "how much each member spent.")]
    Balance,
    #[command(description = "how much the group spent.")]
    Total,
    #[command(description = "who owes whom to settle up.")]
    Summary,
    #[command(description = "net position of each member after an even split.")]
    Splits,
    #[command(description = "every expense, grouped by member.")]
    Table,
    #[command(description = "forget every expense of this chat.")]
    Clean,
}
