//! Logout command - Clear the stored session

use std::path::Path;

use crate::cli::AppContext;
use crate::errors::Result;

pub async fn run(config_dir: Option<&Path>) -> Result<()> {
    let mut ctx = AppContext::load(config_dir)?;
    ctx.session.teardown()?;
    println!("Logged out");
    Ok(())
}
