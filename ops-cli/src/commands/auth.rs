use anyhow::bail;
use colored::*;

use crate::cli::AuthCommand;
use crate::context::AppContext;
use crate::output::{field, or_dash};

pub async fn run(cmd: AuthCommand, ctx: &AppContext) -> anyhow::Result<()> {
    match cmd {
        AuthCommand::SignIn { user_id } => {
            let user_id = match user_id {
                Some(id) => id,
                None if ctx.is_offline() => ctx.config.identity.offline_user.id.clone(),
                None => bail!("a user id is required when signing in online"),
            };

            let session = ctx.sessions.sign_in(&user_id).await?;
            auth_identity::bootstrap_profile(ctx.remote.as_ref(), &session.user).await;
            println!(
                "{} {}",
                "Signed in as".bright_green(),
                session.user.display_name().bold()
            );
        }
        AuthCommand::SignOut => {
            if ctx.sessions.sign_out().await? {
                println!("{}", "Signed out".bright_green());
            } else {
                println!("{}", "Not signed in".dimmed());
            }
        }
        AuthCommand::Whoami => match ctx.sessions.current().await? {
            Some(session) => {
                field("Name", session.user.display_name());
                field("User id", &session.user.id);
                field("Email", or_dash(session.user.email.as_deref()));
                field("Signed in", session.signed_in_at.format("%Y-%m-%d %H:%M UTC"));
            }
            None => println!("{}", "Not signed in".dimmed()),
        },
    }
    Ok(())
}
