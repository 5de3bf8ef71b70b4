//! Login command - Authenticate and store the session

use std::io::{BufRead, Write};
use std::path::Path;

use crate::cli::AppContext;
use crate::errors::{FieldErrors, Result};

fn prompt_password() -> Result<String> {
    eprint!("Password: ");
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Log in with NIM/NIP and password
pub async fn run(config_dir: Option<&Path>, username: &str, password: Option<String>) -> Result<()> {
    let mut ctx = AppContext::load(config_dir)?;
    let password = match password {
        Some(password) => password,
        None => prompt_password()?,
    };

    let mut errors = FieldErrors::new();
    if username.trim().is_empty() {
        errors.push("username", "is required");
    }
    if password.is_empty() {
        errors.push("password", "is required");
    }
    errors.into_result()?;

    let user = ctx
        .client
        .login(&mut ctx.session, username.trim(), &password)
        .await?;
    println!("Logged in as {} ({}, {})", user.name(), user.identifier(), user.role());
    Ok(())
}
