use serde_json::{json, Map, Value};

use crate::cli::client::ApiClient;
use crate::cli::config::{load_session_config, SessionConfig};
use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = Map::new();
            response.insert("success".into(), json!(true));
            response.insert("message".into(), json!(message));

            match data {
                Some(Value::Object(fields)) => response.extend(fields),
                Some(other) => {
                    response.insert("data".into(), other);
                }
                None => {}
            }

            println!("{}", serde_json::to_string_pretty(&Value::Object(response))?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(output_format: &OutputFormat, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let response = json!({
                "success": false,
                "error": message
            });

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Load the saved session, applying a `--url` override
pub fn session_with_url(url: Option<String>) -> anyhow::Result<SessionConfig> {
    let mut session = load_session_config()?;
    if let Some(url) = url {
        session.server_url = Some(url);
    }
    Ok(session)
}

/// Client carrying the saved token; fails early when there is no usable session
pub fn authenticated_client(session: &SessionConfig) -> anyhow::Result<ApiClient> {
    let Some(token) = session.token.clone() else {
        anyhow::bail!("Not logged in. Run 'report auth login <username>' first");
    };
    if session.is_expired() {
        anyhow::bail!("Session expired. Run 'report auth login' again");
    }
    Ok(ApiClient::new(session.server_url(), Some(token)))
}
