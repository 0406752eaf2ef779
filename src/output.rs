use owo_colors::OwoColorize;

pub struct CommandSummary {
    pub prefix: String,
    pub message: String,
}

impl CommandSummary {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            prefix: "✓".green().to_string(),
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            prefix: "✗".red().to_string(),
            message: message.into(),
        }
    }
}
