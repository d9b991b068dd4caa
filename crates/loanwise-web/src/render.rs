//! HTML pages. Templates are compiled into the binary; dynamic text is
//! escaped before substitution.

const INDEX: &str = include_str!("../templates/index.html");
const PREDICTION: &str = include_str!("../templates/prediction.html");
const CHATBOT: &str = include_str!("../templates/chatbot.html");

const PREDICTION_SLOT: &str = "{{ prediction_text }}";

pub fn index() -> &'static str {
    INDEX
}

pub fn chatbot() -> &'static str {
    CHATBOT
}

/// Result page showing `text` as the outcome line.
pub fn prediction(text: &str) -> String {
    PREDICTION.replace(PREDICTION_SLOT, &escape_html(text))
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
