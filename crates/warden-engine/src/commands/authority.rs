//! Authorisation management commands.
//!
//! Users are addressed by mentioning them; roles by name (matched exactly,
//! including case - the platform treats role names as case sensitive).

use std::sync::Arc;

use tracing::info;

use crate::context::CommandContext;
use crate::error::CommandResult;
use crate::parse::Invocation;

/// `authoriseusers @user...` - grants every mentioned user elevated
/// privilege. Replies listing users who were already authorised.
pub(super) async fn authorise_users(
    _invocation: Invocation,
    ctx: Arc<CommandContext>,
) -> CommandResult {
    if ctx.message.mentioned_user_ids.is_empty() {
        return Ok(());
    }

    let mut already_authorised = Vec::new();
    let mut changed = false;
    for user_id in ctx.message.mentioned_user_ids.clone() {
        if ctx.store.grant_user(&ctx.guild_id, user_id.clone()).await {
            info!(guild_id = %ctx.guild_id, user_id = %user_id, "User authorised");
            changed = true;
        } else {
            already_authorised.push(ctx.display_name(&user_id).await);
        }
    }

    if !already_authorised.is_empty() {
        ctx.reply(&format!(
            "The following users are already authorised: {}",
            already_authorised.join(", ")
        ))
        .await;
    }
    if changed {
        ctx.store.save().await?;
    }
    Ok(())
}

/// `deauthoriseusers @user...` - revokes every mentioned user's privilege.
/// Replies listing users who were not authorised to begin with.
pub(super) async fn deauthorise_users(
    _invocation: Invocation,
    ctx: Arc<CommandContext>,
) -> CommandResult {
    if ctx.message.mentioned_user_ids.is_empty() {
        return Ok(());
    }

    let mut not_authorised = Vec::new();
    let mut changed = false;
    for user_id in ctx.message.mentioned_user_ids.clone() {
        if ctx.store.revoke_user(&ctx.guild_id, &user_id).await {
            info!(guild_id = %ctx.guild_id, user_id = %user_id, "User deauthorised");
            changed = true;
        } else {
            not_authorised.push(ctx.display_name(&user_id).await);
        }
    }

    if !not_authorised.is_empty() {
        ctx.reply(&format!(
            "The following members didn't have permissions already: {}",
            not_authorised.join(", ")
        ))
        .await;
    }
    if changed {
        ctx.store.save().await?;
    }
    Ok(())
}

/// `authoriserole <role name>` - grants a role elevated privilege.
pub(super) async fn authorise_role(
    invocation: Invocation,
    ctx: Arc<CommandContext>,
) -> CommandResult {
    if invocation.args.is_empty() {
        return Ok(());
    }
    let role_name = invocation.args.join(" ");

    let Some(role_id) = ctx
        .directory
        .role_id_by_name(&ctx.guild_id, &role_name)
        .await
    else {
        ctx.reply(&unknown_role_notice(&role_name)).await;
        return Ok(());
    };

    if !ctx.store.grant_role(&ctx.guild_id, role_id).await {
        ctx.reply(&format!("{role_name} already has privileges on this server."))
            .await;
        return Ok(());
    }
    info!(guild_id = %ctx.guild_id, role = %role_name, "Role authorised");
    ctx.store.save().await?;
    Ok(())
}

/// `deauthoriserole <role name>` - revokes a role's elevated privilege.
pub(super) async fn deauthorise_role(
    invocation: Invocation,
    ctx: Arc<CommandContext>,
) -> CommandResult {
    if invocation.args.is_empty() {
        return Ok(());
    }
    let role_name = invocation.args.join(" ");

    let Some(role_id) = ctx
        .directory
        .role_id_by_name(&ctx.guild_id, &role_name)
        .await
    else {
        ctx.reply(&unknown_role_notice(&role_name)).await;
        return Ok(());
    };

    if !ctx.store.revoke_role(&ctx.guild_id, &role_id).await {
        ctx.reply(&format!("Role {role_name} is not authed on this server"))
            .await;
        return Ok(());
    }
    info!(guild_id = %ctx.guild_id, role = %role_name, "Role deauthorised");
    ctx.store.save().await?;
    Ok(())
}

/// `showauthorised` - reports the guild's authorised users and roles back
/// to the invoking channel.
pub(super) async fn show_authorised(
    _invocation: Invocation,
    ctx: Arc<CommandContext>,
) -> CommandResult {
    let users = ctx.store.authorised_users(&ctx.guild_id).await;
    let roles = ctx.store.authorised_roles(&ctx.guild_id).await;

    if users.is_empty() && roles.is_empty() {
        ctx.reply("No users or roles are currently authorised on this server.")
            .await;
        return Ok(());
    }

    let mut lines = Vec::new();
    if !users.is_empty() {
        let mut names = Vec::with_capacity(users.len());
        for user_id in &users {
            names.push(ctx.display_name(user_id).await);
        }
        lines.push(format!("Authorised users: {}", names.join(", ")));
    }
    if !roles.is_empty() {
        let names: Vec<String> = roles.iter().map(ToString::to_string).collect();
        lines.push(format!("Authorised roles: {}", names.join(", ")));
    }
    ctx.reply(&lines.join("\n")).await;
    Ok(())
}

fn unknown_role_notice(role_name: &str) -> String {
    format!(
        "I'm sorry, I could not find a role named {role_name}. \
         Role names are case sensitive, please make sure the case is correct."
    )
}
