//! Whoami command - Show the stored profile and the server-side role

use std::path::Path;

use serde_json::json;

use crate::cli::output::print_json;
use crate::cli::AppContext;
use crate::errors::Result;

pub async fn run(config_dir: Option<&Path>, json: bool) -> Result<()> {
    let mut ctx = AppContext::load(config_dir)?;
    let user = ctx.session.require_user()?.clone();
    let server_role = ctx.client.verify_role(&mut ctx.session).await?;
    if server_role != user.role() {
        tracing::warn!(stored = %user.role(), server = %server_role, "stored role differs from server");
    }

    if json {
        return print_json(&json!({ "user": user, "serverRole": server_role }));
    }
    println!("{} ({})", user.name(), user.identifier());
    println!("role: {}", server_role);
    Ok(())
}
