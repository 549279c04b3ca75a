//! Notification sink delivering structured log entries to a Discord webhook.
//!
//! Delivery is fire-and-forget: every entry is posted from a spawned task and
//! can never block or fail the caller's response. When no webhook URL is
//! configured the sink is disabled and every call is a no-op.

use chrono::{SecondsFormat, Utc};
use serde_json::{Value, json};

/// Severity of a sink entry, mapped to the embed's accent color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    fn color(self) -> u32 {
        match self {
            Level::Info => 0x3498db,
            Level::Success => 0x2ecc71,
            Level::Warning => 0xf1c40f,
            Level::Error => 0xe74c3c,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Success => "SUCCESS",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
        }
    }
}

/// Fire-and-forget notification sink.
///
/// Cheap to clone; clones share the underlying HTTP client.
#[derive(Clone)]
pub struct Notifier {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

impl Notifier {
    /// Creates a sink posting to the given webhook URL, or a disabled sink
    /// when `webhook_url` is `None`.
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url: webhook_url.filter(|url| !url.is_empty()),
        }
    }

    /// A sink that drops every entry. Used in tests and when alerting is off.
    pub fn disabled() -> Self {
        Self::new(None)
    }

    /// Whether entries are actually delivered anywhere.
    pub fn enabled(&self) -> bool {
        self.webhook_url.is_some()
    }

    pub fn log_info(&self, title: &str, context: Value) {
        self.dispatch(Level::Info, title, context);
    }

    pub fn log_success(&self, title: &str, context: Value) {
        self.dispatch(Level::Success, title, context);
    }

    pub fn log_warning(&self, title: &str, context: Value) {
        self.dispatch(Level::Warning, title, context);
    }

    pub fn log_error(&self, title: &str, context: Value) {
        self.dispatch(Level::Error, title, context);
    }

    fn dispatch(&self, level: Level, title: &str, context: Value) {
        let Some(url) = self.webhook_url.clone() else {
            return;
        };
        let payload = build_payload(level, title, &context);
        let client = self.client.clone();
        let title = title.to_string();

        tokio::spawn(async move {
            match client.post(&url).json(&payload).send().await {
                Ok(response) if !response.status().is_success() => {
                    tracing::warn!(
                        status = %response.status(),
                        %title,
                        "notification sink rejected entry"
                    );
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, %title, "notification sink delivery failed");
                }
            }
        });
    }
}

/// Builds the Discord webhook body: a single embed whose fields mirror the
/// context object's top-level entries.
fn build_payload(level: Level, title: &str, context: &Value) -> Value {
    let fields: Vec<Value> = match context {
        Value::Object(map) => map
            .iter()
            .map(|(name, value)| {
                let rendered = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                json!({ "name": name, "value": rendered, "inline": true })
            })
            .collect(),
        Value::Null => Vec::new(),
        other => vec![json!({ "name": "context", "value": other.to_string(), "inline": false })],
    };

    json!({
        "embeds": [{
            "title": format!("[{}] {}", level.label(), title),
            "color": level.color(),
            "fields": fields,
            "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_sink_reports_disabled() {
        assert!(!Notifier::disabled().enabled());
        assert!(!Notifier::new(Some(String::new())).enabled());
        assert!(Notifier::new(Some("https://discord.test/hook".into())).enabled());
    }

    #[test]
    fn payload_renders_context_fields() {
        let payload = build_payload(
            Level::Success,
            "Course created",
            &json!({ "courseId": "COURSE_1", "price": 10 }),
        );
        let embed = &payload["embeds"][0];
        assert_eq!(embed["title"], "[SUCCESS] Course created");
        assert_eq!(embed["color"], 0x2ecc71);
        assert_eq!(embed["fields"][0]["name"], "courseId");
        assert_eq!(embed["fields"][0]["value"], "COURSE_1");
        assert_eq!(embed["fields"][1]["value"], "10");
    }
}
