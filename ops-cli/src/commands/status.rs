use anyhow::bail;
use colored::*;

use crate::context::AppContext;
use crate::output::field;

pub async fn run(ctx: &AppContext) -> anyhow::Result<()> {
    if ctx.is_offline() {
        field("Mode", "offline");
    } else {
        field("Mode", "online");
        field("Store", &ctx.config.store.url);
    }

    let reachable = ctx.remote.is_healthy().await;
    field(
        "Backend",
        if reachable { "reachable".bright_green() } else { "unreachable".bright_red() },
    );

    match ctx.sessions.current().await? {
        Some(session) => field("Signed in as", session.user.display_name()),
        None => field("Signed in as", "-".dimmed()),
    }

    if !reachable {
        bail!("backend is not answering");
    }
    Ok(())
}
