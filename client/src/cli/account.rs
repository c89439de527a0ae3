//! `gbaka account ...`: sign-in, sign-up and profile management.

use clap::Subcommand;
use lib_utils::validate_min_length;

use super::output::{print_json, print_user};
use super::Context;
use crate::core::error::{AppError, Result};
use crate::services::auth::AuthErrorCode;
use crate::utils::validation::{
    validate_login, validate_reset, validate_signup, SignupForm, MIN_PASSWORD_LEN,
};

#[derive(Subcommand, Debug)]
pub enum AccountCommand {
    /// Sign in with email and password
    Login {
        email: String,
        #[arg(long, env = "GBAKA_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account
    Signup {
        /// Display name
        #[arg(long)]
        name: String,
        email: String,
        #[arg(long, env = "GBAKA_PASSWORD", hide_env_values = true)]
        password: String,
        /// Password confirmation
        #[arg(long)]
        confirm: String,
        /// Accept the terms of use
        #[arg(long)]
        accept_terms: bool,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Send a password reset email
    ResetPassword { email: String },

    /// Show the signed-in user
    Whoami {
        /// Ask the identity provider instead of the local session
        #[arg(long)]
        remote: bool,
    },

    /// Change display name or photo
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        photo_url: Option<String>,
    },

    /// Change the account email
    Email {
        new_email: String,
        /// Current password
        #[arg(long, env = "GBAKA_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Change the password
    Password {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
    },

    /// Delete the account for good
    Delete {
        #[arg(long, env = "GBAKA_PASSWORD", hide_env_values = true)]
        password: String,
        /// Required confirmation
        #[arg(long)]
        yes: bool,
    },

    /// Force a token refresh
    Refresh,
}

pub async fn run(ctx: &Context, command: AccountCommand) -> Result<()> {
    match command {
        AccountCommand::Login { email, password } => {
            validate_login(&email, &password).into_result()?;
            let user = ctx.auth.sign_in(email.trim(), &password).await?;
            show_user(ctx, &user)
        }

        AccountCommand::Signup {
            name,
            email,
            password,
            confirm,
            accept_terms,
        } => {
            let form = SignupForm {
                display_name: name,
                email,
                password,
                confirm_password: confirm,
                accept_terms,
            };
            validate_signup(&form).into_result()?;
            let user = ctx
                .auth
                .sign_up(form.email.trim(), &form.password, form.display_name.trim())
                .await?;
            show_user(ctx, &user)
        }

        AccountCommand::Logout => {
            ctx.auth.sign_out()?;
            println!("Signed out");
            Ok(())
        }

        AccountCommand::ResetPassword { email } => {
            validate_reset(&email).into_result()?;
            ctx.auth.reset_password(email.trim()).await?;
            println!("A reset link has been sent to {}", email.trim());
            Ok(())
        }

        AccountCommand::Whoami { remote } => {
            if remote {
                let profile = ctx.auth.fetch_profile().await?;
                return print_json(&profile);
            }
            match ctx.auth.current_user() {
                Some(user) => show_user(ctx, &user),
                None => Err(AppError::auth(AuthErrorCode::NoCurrentUser)),
            }
        }

        AccountCommand::Profile { name, photo_url } => {
            if name.is_none() && photo_url.is_none() {
                return Err(AppError::Validation("Nothing to update".to_string()));
            }
            let user = ctx.auth.update_profile(name, photo_url).await?;
            show_user(ctx, &user)
        }

        AccountCommand::Email { new_email, password } => {
            validate_reset(&new_email).into_result()?;
            let user = ctx.auth.update_email(new_email.trim(), &password).await?;
            show_user(ctx, &user)
        }

        AccountCommand::Password { current, new } => {
            validate_min_length(&new, MIN_PASSWORD_LEN, "New password").map_err(AppError::Validation)?;
            ctx.auth.update_password(&current, &new).await?;
            println!("Password updated");
            Ok(())
        }

        AccountCommand::Delete { password, yes } => {
            if !yes {
                return Err(AppError::Validation(
                    "Deleting an account cannot be undone; pass --yes to confirm".to_string(),
                ));
            }
            ctx.auth.delete_account(&password).await?;
            println!("Account deleted");
            Ok(())
        }

        AccountCommand::Refresh => {
            if !ctx.auth.is_authenticated() {
                return Err(AppError::auth(AuthErrorCode::NoCurrentUser));
            }
            match ctx.auth.refresh_token().await {
                Some(_) => {
                    println!("Session refreshed");
                    Ok(())
                }
                None => Err(AppError::auth(AuthErrorCode::RequiresRecentLogin)),
            }
        }
    }
}

fn show_user(ctx: &Context, user: &crate::services::AuthUser) -> Result<()> {
    if ctx.json {
        print_json(user)
    } else {
        print_user(user);
        Ok(())
    }
}
