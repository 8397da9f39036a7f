//! Mail send tool definition.
//!
//! Sends a plain-text email through the configured SMTP relay, with optional
//! CC recipients and file attachments. Attachment paths go through the same
//! path validation as the filesystem tools.

use futures::FutureExt;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::core::config::Config;
use crate::core::security::validate_path;
use crate::domains::tools::common::{error_result, json_success};

/// Parameters for the mail send tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MailSendParams {
    /// Recipient address.
    #[schemars(description = "Recipient email address")]
    pub to: String,

    /// Subject line.
    pub subject: String,

    /// Plain-text body.
    pub body: String,

    /// CC recipient addresses.
    #[serde(default)]
    pub cc: Option<Vec<String>>,

    /// Paths of files to attach (must be within the allowed roots).
    #[serde(default)]
    pub attachment_paths: Option<Vec<String>>,
}

/// Mail send tool.
pub struct MailSendTool;

impl MailSendTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "mail_send";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Send an email through the configured SMTP account, with optional CC and attachments.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(to = %params.to))]
    pub fn execute(params: &MailSendParams, config: &Config) -> CallToolResult {
        info!("Mail send requested to {}", params.to);

        if !config.smtp.is_configured() {
            return error_result(
                "SMTP relay is not configured (set SMTP_HOST, SMTP_USERNAME, SMTP_PASSWORD)",
            );
        }

        let from: Mailbox = match config.smtp.username.parse() {
            Ok(mb) => mb,
            Err(e) => {
                return error_result(&format!(
                    "Invalid from address '{}': {}",
                    config.smtp.username, e
                ));
            }
        };

        let to: Mailbox = match params.to.parse() {
            Ok(mb) => mb,
            Err(e) => return error_result(&format!("Invalid to address '{}': {}", params.to, e)),
        };

        let mut builder = Message::builder()
            .from(from)
            .to(to)
            .subject(params.subject.clone());

        let cc_list = params.cc.clone().unwrap_or_default();
        for address in &cc_list {
            match address.parse::<Mailbox>() {
                Ok(mb) => builder = builder.cc(mb),
                Err(e) => {
                    return error_result(&format!("Invalid cc address '{}': {}", address, e));
                }
            }
        }

        let attachment_paths = params.attachment_paths.clone().unwrap_or_default();

        let email = if attachment_paths.is_empty() {
            builder.body(params.body.clone())
        } else {
            let mut multipart = MultiPart::mixed().singlepart(SinglePart::plain(params.body.clone()));

            for raw_path in &attachment_paths {
                let path = match validate_path(raw_path, config) {
                    Ok(p) => p,
                    Err(e) => {
                        warn!("Attachment path validation failed: {}", e);
                        return error_result(&format!(
                            "Attachment path validation failed: {}",
                            e
                        ));
                    }
                };

                let bytes = match fs::read(&path) {
                    Ok(b) => b,
                    Err(e) => {
                        return error_result(&format!(
                            "Failed to read attachment '{}': {}",
                            raw_path, e
                        ));
                    }
                };

                let filename = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| "attachment".to_string());

                multipart = multipart
                    .singlepart(Attachment::new(filename).body(bytes, content_type_for(&path)));
            }

            builder.multipart(multipart)
        };

        let email = match email {
            Ok(m) => m,
            Err(e) => return error_result(&format!("Failed to build email: {}", e)),
        };

        let creds = Credentials::new(config.smtp.username.clone(), config.smtp.password.clone());

        // Port 465 = implicit TLS, everything else = STARTTLS.
        let relay = if config.smtp.port == 465 {
            SmtpTransport::relay(&config.smtp.host)
        } else {
            SmtpTransport::starttls_relay(&config.smtp.host)
        };

        let mailer = match relay {
            Ok(builder) => builder
                .port(config.smtp.port)
                .credentials(creds)
                .build(),
            Err(e) => return error_result(&format!("Failed to set up SMTP relay: {}", e)),
        };

        if let Err(e) = mailer.send(&email) {
            return error_result(&format!("Failed to send email: {}", e));
        }

        info!("Email sent to {}", params.to);

        json_success(serde_json::json!({
            "message": "Email sent successfully",
            "to": params.to,
            "subject": params.subject,
            "cc_count": cc_list.len(),
            "attachment_count": attachment_paths.len()
        }))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::common::{http_response, parse_params};

        let params: MailSendParams = parse_params(arguments)?;

        // SMTP delivery blocks; keep it off the async runtime.
        let handle = std::thread::spawn(move || Self::execute(&params, &config));
        let result = handle
            .join()
            .map_err(|_| "Tool thread panicked".to_string())?;

        Ok(http_response(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<MailSendParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let config = config.clone();
            async move {
                let params: MailSendParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

                let handle = std::thread::spawn(move || Self::execute(&params, &config));
                let result = handle
                    .join()
                    .map_err(|_| McpError::internal_error("Tool thread panicked", None))?;

                Ok(result)
            }
            .boxed()
        })
    }
}

/// Pick a content type for an attachment from its extension.
fn content_type_for(path: &Path) -> ContentType {
    let mime = match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("txt") => "text/plain",
        Some("csv") => "text/csv",
        Some("html") => "text/html",
        Some("json") => "application/json",
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("zip") => "application/zip",
        _ => "application/octet-stream",
    };

    ContentType::parse(mime).unwrap_or(ContentType::TEXT_PLAIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;
    use tempfile::TempDir;

    fn text_of(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        }
    }

    fn configured(config: &mut Config) {
        config.smtp.host = "smtp.example.com".to_string();
        config.smtp.username = "bot@example.com".to_string();
        config.smtp.password = "app-password".to_string();
    }

    fn params(to: &str) -> MailSendParams {
        MailSendParams {
            to: to.to_string(),
            subject: "subject".to_string(),
            body: "body".to_string(),
            cc: None,
            attachment_paths: None,
        }
    }

    #[test]
    fn test_unconfigured_smtp_is_reported() {
        let result = MailSendTool::execute(&params("user@example.com"), &Config::default());
        assert!(result.is_error.unwrap_or(false));
        assert!(text_of(&result).contains("SMTP"));
    }

    #[test]
    fn test_invalid_recipient_rejected_before_sending() {
        let mut config = Config::default();
        configured(&mut config);

        let result = MailSendTool::execute(&params("not-an-address"), &config);
        assert!(result.is_error.unwrap_or(false));
        assert!(text_of(&result).contains("Invalid to address"));
    }

    #[test]
    fn test_invalid_cc_rejected() {
        let mut config = Config::default();
        configured(&mut config);

        let mut p = params("user@example.com");
        p.cc = Some(vec!["also-bad".to_string()]);
        let result = MailSendTool::execute(&p, &config);
        assert!(result.is_error.unwrap_or(false));
        assert!(text_of(&result).contains("Invalid cc address"));
    }

    #[test]
    fn test_attachment_outside_roots_rejected() {
        let root = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        let secret = outside.path().join("secret.txt");
        fs::write(&secret, "x").unwrap();

        let mut config = Config::default();
        configured(&mut config);
        config.security.allowed_roots = vec![root.path().to_path_buf()];

        let mut p = params("user@example.com");
        p.attachment_paths = Some(vec![secret.to_string_lossy().to_string()]);
        let result = MailSendTool::execute(&p, &config);
        assert!(result.is_error.unwrap_or(false));
        assert!(text_of(&result).contains("Attachment path validation failed"));
    }

    #[test]
    fn test_content_type_detection() {
        let ct = content_type_for(Path::new("report.pdf"));
        assert_eq!(ct, ContentType::parse("application/pdf").unwrap());

        let ct = content_type_for(Path::new("photo.JPG"));
        assert_eq!(ct, ContentType::parse("image/jpeg").unwrap());

        let ct = content_type_for(Path::new("blob"));
        assert_eq!(ct, ContentType::parse("application/octet-stream").unwrap());
    }
}
