use serde::Deserialize;

/// Inbound webhook form (Twilio field names).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InboundMessage {
    #[serde(rename = "Body", default)]
    pub body: String,
    #[serde(rename = "From", default)]
    pub from: String,
}

impl InboundMessage {
    /// Sender id; messages without one share a single anonymous conversation.
    pub fn sender(&self) -> &str {
        let from = self.from.trim();
        if from.is_empty() { "unknown" } else { from }
    }
}

/// Wrap reply text in a TwiML `<Response><Message>` document.
pub fn twiml(reply: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response><Message>{}</Message></Response>",
        escape_xml(reply)
    )
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
