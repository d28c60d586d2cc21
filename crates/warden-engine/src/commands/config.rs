//! Guild configuration commands: command prefix and deletion policy.

use std::sync::Arc;

use tracing::info;

use crate::context::CommandContext;
use crate::error::CommandResult;
use crate::parse::Invocation;

/// Argument values interpreted as "no" by `setcommanddelete`.
const FALSEY: [&str; 4] = ["false", "f", "n", "no"];

/// `setcommandprefix <char>` - overrides the guild's command prefix.
///
/// Setting the global default removes the override. Invoked with no
/// arguments the command does nothing; an over-long argument gets a short
/// notice instead of a silent ignore.
pub(super) async fn set_command_prefix(
    invocation: Invocation,
    ctx: Arc<CommandContext>,
) -> CommandResult {
    let Some(arg) = invocation.args.first() else {
        return Ok(());
    };

    let mut chars = arg.trim().chars();
    let (Some(prefix), None) = (chars.next(), chars.next()) else {
        ctx.reply("A command prefix must be a single character.").await;
        return Ok(());
    };

    ctx.store
        .set_prefix(&ctx.guild_id, prefix, ctx.default_prefix)
        .await;
    info!(guild_id = %ctx.guild_id, prefix = %prefix, "Command prefix updated");
    ctx.store.save().await?;
    Ok(())
}

/// `setcommanddelete <word>` - sets whether invoking messages are deleted.
///
/// Any of `false`, `f`, `n`, `no` (case-insensitive) turns deletion off;
/// anything else turns it on.
pub(super) async fn set_command_delete(
    invocation: Invocation,
    ctx: Arc<CommandContext>,
) -> CommandResult {
    let Some(arg) = invocation.args.first() else {
        return Ok(());
    };

    let value = !FALSEY.contains(&arg.trim().to_lowercase().as_str());
    ctx.store.set_delete_invoking(&ctx.guild_id, value).await;
    info!(guild_id = %ctx.guild_id, delete = value, "Message-deletion policy updated");
    ctx.store.save().await?;
    Ok(())
}
