use clap::Subcommand;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::cli::utils::{authenticated_client, output_success, session_with_url};
use crate::cli::OutputFormat;
use crate::database::models::ReportDraft;

#[derive(Subcommand)]
pub enum ReportCommands {
    #[command(about = "Fetch a report by id")]
    Get {
        #[arg(help = "Report id")]
        id: Uuid,
    },

    #[command(about = "Create a report owned by the logged-in user")]
    Create {
        #[arg(long, help = "Report title")]
        title: String,
        #[arg(long, help = "Report description")]
        description: String,
    },

    #[command(about = "Replace a report's title and description")]
    Update {
        #[arg(help = "Report id")]
        id: Uuid,
        #[arg(long, help = "New title")]
        title: String,
        #[arg(long, help = "New description")]
        description: String,
    },

    #[command(about = "Delete a report")]
    Delete {
        #[arg(help = "Report id")]
        id: Uuid,
    },
}

pub async fn handle(cmd: ReportCommands, url: Option<String>, output_format: OutputFormat) -> anyhow::Result<()> {
    let session = session_with_url(url)?;
    let client = authenticated_client(&session)?;

    match cmd {
        ReportCommands::Get { id } => {
            let report: Value = client.get(&format!("/reports/{}", id)).await?;
            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Text => {
                    println!("Report {}", id);
                    println!("Title: {}", report["title"].as_str().unwrap_or_default());
                    println!("Description: {}", report["description"].as_str().unwrap_or_default());
                }
            }
            Ok(())
        }
        ReportCommands::Create { title, description } => {
            let id: Uuid = client
                .post("/reports", &ReportDraft::new(title, description))
                .await?;
            output_success(&output_format, &format!("Created report {}", id), Some(json!({ "id": id })))
        }
        ReportCommands::Update { id, title, description } => {
            let id: Uuid = client
                .post(&format!("/reports/{}", id), &ReportDraft::new(title, description))
                .await?;
            output_success(&output_format, &format!("Updated report {}", id), Some(json!({ "id": id })))
        }
        ReportCommands::Delete { id } => {
            let deleted: bool = client.delete(&format!("/reports/{}", id)).await?;
            output_success(
                &output_format,
                &format!("Deleted report {}", id),
                Some(json!({ "id": id, "deleted": deleted })),
            )
        }
    }
}
