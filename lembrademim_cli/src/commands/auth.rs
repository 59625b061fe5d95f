use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use lembrademim_lib::messages;
use lembrademim_lib::types::{LoginRequest, SignupRequest};
use lembrademim_lib::validation;
use lembrademim_lib::{Client, Session};

use crate::output::{print_user, OutputFormat};

#[derive(Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,
}

#[derive(Args)]
pub struct SignupArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    /// At least 6 characters
    #[arg(long)]
    pub password: String,
}

#[derive(Args)]
pub struct ResetArgs {
    #[command(subcommand)]
    pub command: ResetCommand,
}

#[derive(Subcommand)]
pub enum ResetCommand {
    /// Email a reset code
    Request {
        #[arg(long)]
        email: String,
    },
    /// Check a reset code without using it
    Verify {
        #[arg(long)]
        email: String,
        #[arg(long)]
        code: String,
    },
    /// Set a new password with a reset code
    Confirm {
        #[arg(long)]
        email: String,
        #[arg(long)]
        code: String,
        #[arg(long)]
        new_password: String,
    },
}

pub async fn login(args: &LoginArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let credentials = LoginRequest {
        email: validation::validate_email(&args.email)?,
        password: args.password.clone(),
    };
    let session = Session::new(client.clone());
    match session.login(&credentials).await {
        Ok(auth) => {
            eprintln!("Logged in as {}", auth.user.name);
            print_user(&auth.user, format)
        }
        Err(e) => bail!(messages::login_error(&e)),
    }
}

pub async fn signup(args: &SignupArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    validation::validate_password(&args.password)?;
    let data = SignupRequest {
        name: validation::validate_name(&args.name)?,
        email: validation::validate_email(&args.email)?,
        password: args.password.clone(),
    };
    let session = Session::new(client.clone());
    match session.signup(&data).await {
        Ok(auth) => {
            eprintln!("Account created for {}", auth.user.email);
            print_user(&auth.user, format)
        }
        Err(e) => bail!(messages::signup_error(&e)),
    }
}

pub fn logout(client: &Client) -> Result<()> {
    Session::new(client.clone()).logout()?;
    eprintln!("Logged out");
    Ok(())
}

pub async fn whoami(client: &Client, format: &OutputFormat) -> Result<()> {
    let session = Session::new(client.clone());
    match session.check_authentication().await {
        Some(user) => print_user(&user, format),
        None => bail!("Not logged in. Run `lembrademim login` first."),
    }
}

pub async fn reset(args: &ResetArgs, client: &Client) -> Result<()> {
    let session = Session::new(client.clone());
    match &args.command {
        ResetCommand::Request { email } => {
            let email = validation::validate_email(email)?;
            if let Err(e) = session.request_password_reset(&email).await {
                bail!(messages::reset_request_error(&e));
            }
            eprintln!("A reset code was sent to {}", email);
        }
        ResetCommand::Verify { email, code } => {
            let email = validation::validate_email(email)?;
            let code = validation::validate_reset_code(code)?;
            if !session.validate_reset_code(&email, &code).await {
                bail!("Invalid or expired code");
            }
            eprintln!("Code accepted");
        }
        ResetCommand::Confirm {
            email,
            code,
            new_password,
        } => {
            let email = validation::validate_email(email)?;
            let code = validation::validate_reset_code(code)?;
            validation::validate_password(new_password)?;
            if let Err(e) = session
                .confirm_password_reset(&email, &code, new_password)
                .await
            {
                bail!(messages::reset_confirm_error(&e));
            }
            eprintln!("Password updated. You can now log in with the new password.");
        }
    }
    Ok(())
}
