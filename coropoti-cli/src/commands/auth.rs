//! Session lifecycle: login, logout, register, whoami.

use anyhow::Result;
use dialoguer::{Input, Password};
use owo_colors::OwoColorize;

use coropoti_core::protocol::{LoginRequest, RegisterRequest};
use coropoti_core::session::Session;

use crate::context;

pub async fn login(email: Option<String>) -> Result<()> {
    let client = context::anonymous()?;

    let email = match email {
        Some(e) => e,
        None => Input::<String>::new()
            .with_prompt("  Email")
            .interact_text()?,
    };
    let password = Password::new().with_prompt("  Password").interact()?;

    let resp = client
        .login(&LoginRequest {
            email,
            password,
            remember: true,
        })
        .await?;

    Session {
        token: resp.token,
        user: Some(resp.user.clone()),
    }
    .save()?;

    println!(
        "{}",
        format!("  Logged in as {} <{}>", resp.user.name, resp.user.email).green()
    );
    Ok(())
}

pub fn logout() -> Result<()> {
    Session::clear()?;
    println!("  Logged out.");
    Ok(())
}

pub async fn register() -> Result<()> {
    let client = context::anonymous()?;

    let name: String = Input::new().with_prompt("  Office name").interact_text()?;
    let email: String = Input::new().with_prompt("  Email").interact_text()?;
    let password = Password::new()
        .with_prompt("  Password")
        .with_confirmation("  Confirm password", "Passwords do not match")
        .interact()?;

    let resp = client
        .register(&RegisterRequest {
            name,
            email,
            password,
        })
        .await?;

    Session {
        token: resp.token,
        user: Some(resp.user.clone()),
    }
    .save()?;

    println!(
        "{}",
        format!("  Registered and logged in as {}", resp.user.email).green()
    );
    Ok(())
}

pub async fn whoami() -> Result<()> {
    let ctx = context::authed().await?;
    let caps = ctx.capabilities.for_email(&ctx.user.email);

    println!("  {} <{}>", ctx.user.name.bold(), ctx.user.email);
    println!(
        "  Role: {}",
        if ctx.user.is_admin() { "admin" } else { "user" }
    );
    if !caps.can_edit {
        println!("  {}", "This account is view/create only.".yellow());
    }
    Ok(())
}
