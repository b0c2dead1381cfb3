//! Handlers for the chat commands. Every chat is an independent group.

use engine::{Engine, EngineError, GroupId};
use teloxide::{
    RequestError,
    dispatching::{HandlerExt, UpdateHandler},
    prelude::*,
    types::{Me, User},
    utils::command::BotCommands,
};

use crate::{ConfigParameters, commands::Command, parsing::parse_expense, ui};

/// Build the schema for `Command` commands, answering any other command
/// with a short refusal.
pub(crate) fn schema() -> UpdateHandler<RequestError> {
    Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(handle_command),
        )
        .branch(
            dptree::filter(|msg: Message, me: Me| looks_like_command(&msg, &me))
                .endpoint(handle_unknown),
        )
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    cfg: ConfigParameters,
) -> ResponseResult<()> {
    let group = GroupId(msg.chat.id.0);
    let payer = msg.from.as_ref().map(payer_name);
    tracing::debug!(%group, ?cmd, "command received");

    let text = reply(&cfg.engine, group, cmd, payer.as_deref()).await;
    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}

async fn handle_unknown(bot: Bot, msg: Message) -> ResponseResult<()> {
    bot.send_message(msg.chat.id, ui::UNKNOWN_COMMAND).await?;
    Ok(())
}

/// Run `cmd` against the ledger of `group` and render the answer.
///
/// `payer` is the display name of the sender, needed only to record
/// expenses.
pub(crate) async fn reply(
    engine: &Engine,
    group: GroupId,
    cmd: Command,
    payer: Option<&str>,
) -> String {
    let rendered = match cmd {
        Command::Help => Ok(Command::descriptions().to_string()),
        Command::Expense(args) => {
            let Some(payer) = payer else {
                return ui::UNKNOWN_USER.to_string();
            };
            let parsed = match parse_expense(&args) {
                Ok(parsed) => parsed,
                Err(err) => {
                    tracing::debug!(%group, "rejected expense arguments {args:?}: {err}");
                    return ui::USAGE_HINT.to_string();
                }
            };
            engine
                .record(group, parsed.amount, payer, &parsed.description)
                .await
                .map(|expense| ui::render_recorded(&expense))
        }
        Command::Balance => engine
            .raw_totals(group)
            .await
            .map(|totals| ui::render_raw_totals(&totals)),
        Command::Total => engine.total(group).await.map(ui::render_total),
        Command::Summary => engine
            .debts(group)
            .await
            .map(|debts| ui::render_debts(&debts)),
        Command::Splits => engine
            .balances(group)
            .await
            .map(|balances| ui::render_balances(&balances)),
        Command::Table => engine
            .expenses(group)
            .await
            .map(|expenses| ui::render_table(&expenses)),
        Command::Clean => engine
            .reset(group)
            .await
            .map(|()| ui::CLEANED.to_string()),
    };

    rendered.unwrap_or_else(|err| user_message_for_engine_error(group, err))
}

fn user_message_for_engine_error(group: GroupId, err: EngineError) -> String {
    match err {
        EngineError::InvalidAmount(_) | EngineError::InvalidDescription(_) => {
            tracing::debug!(%group, "expense rejected: {err}");
            ui::USAGE_HINT.to_string()
        }
        EngineError::InvalidPayer(_) => ui::UNKNOWN_USER.to_string(),
        EngineError::Storage(_) => {
            tracing::error!(%group, "ledger failure: {err}");
            ui::GENERIC_FAILURE.to_string()
        }
    }
}

/// Telegram username, or the first name for users without one.
fn payer_name(user: &User) -> String {
    user.username
        .clone()
        .unwrap_or_else(|| user.first_name.clone())
}

/// `true` for `/anything` and `/anything@us`, not for commands addressed to
/// other bots in the same chat.
fn looks_like_command(msg: &Message, me: &Me) -> bool {
    let Some(command) = msg
        .text()
        .and_then(|text| text.split_whitespace().next())
        .and_then(|word| word.strip_prefix('/'))
    else {
        return false;
    };
    match command.split_once('@') {
        Some((_, bot_name)) => bot_name.eq_ignore_ascii_case(me.username()),
        None => true,
    }
}
