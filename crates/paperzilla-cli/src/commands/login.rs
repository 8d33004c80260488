use anyhow::Result;

use crate::prompt::TerminalPrompter;

use super::Context;

/// Log in with a fresh one-time code, replacing any saved session
pub async fn run(ctx: &Context) -> Result<()> {
    ctx.session.login(&mut TerminalPrompter).await?;
    Ok(())
}
