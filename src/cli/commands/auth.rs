use chrono::{Duration, Utc};
use clap::Subcommand;
use serde_json::{json, Value};

use crate::cli::client::ApiClient;
use crate::cli::config::save_session_config;
use crate::cli::utils::{output_success, session_with_url};
use crate::cli::OutputFormat;
use crate::services::{LoginRequest, LoginResponse, SignupRequest};

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Register a new account")]
    Signup {
        #[arg(help = "Username")]
        username: String,
        #[arg(help = "Display name")]
        display_name: String,
        #[arg(long, env = "REPORT_PASSWORD", help = "Password")]
        password: String,
    },

    #[command(about = "Login and store the issued token")]
    Login {
        #[arg(help = "Username")]
        username: String,
        #[arg(long, env = "REPORT_PASSWORD", help = "Password")]
        password: String,
    },

    #[command(about = "Forget the stored token")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,
}

pub async fn handle(cmd: AuthCommands, url: Option<String>, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut session = session_with_url(url)?;
    let client = ApiClient::new(session.server_url(), None);

    match cmd {
        AuthCommands::Signup {
            username,
            display_name,
            password,
        } => {
            let request = SignupRequest {
                username,
                password,
                display_name,
            };
            let created: Value = client.post("/auth/signup", &request).await?;
            output_success(
                &output_format,
                &format!("Registered user {}", request.username),
                Some(created),
            )
        }
        AuthCommands::Login { username, password } => {
            let request = LoginRequest { username, password };
            let response: LoginResponse = client.post("/auth/login", &request).await?;

            let expires_at = Utc::now() + Duration::seconds(response.expires_in as i64);
            session.username = Some(request.username.clone());
            session.token = Some(response.token);
            session.expires_at = Some(expires_at);
            save_session_config(&session)?;

            output_success(
                &output_format,
                &format!("Logged in as {}", request.username),
                Some(json!({ "server": session.server_url(), "expires_at": expires_at })),
            )
        }
        AuthCommands::Logout => {
            session.clear_token();
            save_session_config(&session)?;
            output_success(&output_format, "Logged out", None)
        }
        AuthCommands::Status => {
            let status = json!({
                "server": session.server_url(),
                "username": session.username,
                "authenticated": session.token.is_some() && !session.is_expired(),
                "expires_at": session.expires_at,
            });

            match (&output_format, &session.username) {
                (OutputFormat::Json, _) => println!("{}", serde_json::to_string_pretty(&status)?),
                (OutputFormat::Text, Some(username)) if !session.is_expired() => {
                    println!("Logged in as {} on {}", username, session.server_url())
                }
                (OutputFormat::Text, Some(username)) => {
                    println!("Session for {} on {} has expired", username, session.server_url())
                }
                (OutputFormat::Text, None) => println!("Not logged in ({})", session.server_url()),
            }
            Ok(())
        }
    }
}
