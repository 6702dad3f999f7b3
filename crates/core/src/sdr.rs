//! SDR Agent Service
//!
//! Tool callbacks for the sales-development persona, served over the Model
//! Context Protocol (MCP). The hosting voice runtime lets its LLM call these
//! tools while it talks to a prospective customer: the tools answer FAQ
//! lookups, capture lead details as they come up, and save the lead when the
//! call wraps up.

use crate::Command;
use crate::knowledge::{FaqIndex, NO_FAQ_MATCH};
use crate::lead::{LeadProfile, LeadRecord, LeadUpdate};
use crate::store::LeadStore;
use chrono::Utc;
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tracing::{error, info, warn};

/// Reply to every successful lead capture.
pub const LEAD_UPDATED: &str = "Lead profile updated. Continue the conversation.";

/// How many FAQ entries a lookup returns at most.
const FAQ_LOOKUP_LIMIT: usize = 2;

/// Arguments for looking up an answer in the FAQ.
#[derive(Deserialize, JsonSchema, Debug)]
pub struct FaqLookupArgs {
    /// The customer's question, in their own words.
    #[schemars(description = "The customer's question, in their own words")]
    pub question: String,
}

/// The MCP service implementation for the SDR persona.
pub struct SdrService {
    /// The lead being captured during this call.
    pub lead: Arc<Mutex<LeadProfile>>,
    store: Arc<dyn LeadStore>,
    faq: Arc<FaqIndex>,
    instructions: Arc<String>,
    /// Optional channel for broadcasting lead updates to subscribers.
    pub state_tx: Option<mpsc::Sender<LeadProfile>>,
    /// Optional channel for telling the runtime the call is over.
    pub command_tx: Option<mpsc::Sender<Command>>,
    tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for SdrService {
    /// Advertises tool support and hands the persona instructions to the host.
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(self.instructions.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[tool_router]
impl SdrService {
    /// Creates a service for one call, starting from an empty lead.
    pub fn new(store: Arc<dyn LeadStore>, faq: Arc<FaqIndex>, instructions: String) -> Self {
        Self {
            lead: Arc::new(Mutex::new(LeadProfile::default())),
            store,
            faq,
            instructions: Arc::new(instructions),
            state_tx: None,
            command_tx: None,
            tool_router: Self::tool_router(),
        }
    }

    pub fn with_state_updates(mut self, tx: mpsc::Sender<LeadProfile>) -> Self {
        self.state_tx = Some(tx);
        self
    }

    pub fn with_commands(mut self, tx: mpsc::Sender<Command>) -> Self {
        self.command_tx = Some(tx);
        self
    }

    /// Captures whatever lead details the customer just mentioned.
    ///
    /// Only non-empty fields overwrite the stored value; there is no way to
    /// clear a field once it has been captured.
    #[tool(
        description = "Capture lead details the customer provided during the conversation. Only call this when the user explicitly gives new information; pass only the fields they mentioned."
    )]
    pub async fn update_lead_profile(&self, args: Parameters<LeadUpdate>) -> Result<String, String> {
        info!(args = ?args.0, "Executing tool 'update_lead_profile'");
        let mut lead = self.lead.lock().await;
        lead.apply(args.0);
        info!(profile = ?*lead, qualified = lead.is_qualified(), "Lead profile updated");

        if let Some(tx) = &self.state_tx {
            if tx.send(lead.clone()).await.is_err() {
                warn!("Failed to broadcast lead update: receiver dropped.");
            }
        }

        Ok(LEAD_UPDATED.to_string())
    }

    /// Saves the lead and signals that the call can end.
    #[tool(
        description = "Save the lead to the database and signal the end of the call. Call this when the user says goodbye or that's all."
    )]
    pub async fn submit_lead_and_end(&self) -> Result<String, String> {
        info!("Executing tool 'submit_lead_and_end'");
        let lead = self.lead.lock().await.clone();
        let closing = lead.closing_line();

        let total = self
            .store
            .append(LeadRecord::new(lead, Utc::now()))
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to save lead");
                format!("Failed to save lead: {e}")
            })?;
        info!(total, "Lead submitted");

        if let Some(tx) = &self.command_tx {
            if tx
                .send(Command::SessionComplete(closing.clone()))
                .await
                .is_err()
            {
                warn!("Failed to signal session completion: receiver dropped.");
            }
        }

        Ok(closing)
    }

    /// Reports what has been captured so far and what is still missing.
    #[tool(
        description = "Get the lead captured so far, whether it is qualified, and which required fields (name, email, use_case) are still missing."
    )]
    pub async fn get_lead_status(&self) -> Result<String, String> {
        info!("Executing tool 'get_lead_status'");
        let lead = self.lead.lock().await;
        let status = serde_json::json!({
            "profile": &*lead,
            "qualified": lead.is_qualified(),
            "missing": lead.missing_required(),
        });
        serde_json::to_string(&status).map_err(|e| format!("Failed to serialize lead: {}", e))
    }

    /// Finds the FAQ entries closest to a customer question.
    #[tool(
        description = "Look up the closest answers in the FAQ for a customer's question."
    )]
    pub async fn lookup_faq(&self, args: Parameters<FaqLookupArgs>) -> Result<String, String> {
        info!(question = %args.0.question, "Executing tool 'lookup_faq'");
        let hits = self.faq.search(&args.0.question, FAQ_LOOKUP_LIMIT);
        if hits.is_empty() {
            return Ok(NO_FAQ_MATCH.to_string());
        }
        Ok(hits
            .iter()
            .map(|entry| format!("Q: {}\nA: {}", entry.question, entry.answer))
            .collect::<Vec<_>>()
            .join("\n\n"))
    }
}
