use std::error::Error;
use std::io::IsTerminal;

use owo_colors::OwoColorize;

use super::ErpError;

/// Formats ErpError for CLI output
pub struct ErrorFormatter {
    verbose: bool,
    use_color: bool,
}

impl ErrorFormatter {
    /// Creates a new ErrorFormatter with default TTY detection
    pub fn new(verbose: bool) -> Self {
        Self::with_color_detection(verbose, Self::default_should_use_color)
    }

    /// Creates a new ErrorFormatter with injectable TTY detection for testing
    pub fn with_color_detection(verbose: bool, detect_color: fn() -> bool) -> Self {
        let use_color = detect_color();
        Self { verbose, use_color }
    }

    fn default_should_use_color() -> bool {
        std::io::stderr().is_terminal() && std::env::var("NO_COLOR").is_err()
    }

    /// Formats the error for display
    pub fn format(&self, error: &ErpError) -> String {
        let plain = if self.verbose {
            self.format_verbose_plain(error)
        } else {
            self.format_simple_plain(error)
        };

        if self.use_color {
            self.apply_color(&plain)
        } else {
            plain
        }
    }

    fn headline(error: &ErpError) -> String {
        format!("error[{}]: {}", error.code().as_str(), error)
    }

    fn format_simple_plain(&self, error: &ErpError) -> String {
        let mut output = Self::headline(error);

        if let Some(category) = error.category() {
            output.push_str(&format!("\n  --> category: {}", category.label()));
        }

        output
    }

    fn format_verbose_plain(&self, error: &ErpError) -> String {
        let mut output = self.format_simple_plain(error);
        let code = error.code();

        output.push_str("\n  |");
        output.push_str(&format!("\n  | Cause: {}", code.cause()));

        output.push_str("\n  |");
        output.push_str("\n  | Remediation:");
        for line in code.remediation().lines() {
            output.push_str(&format!("\n  |   {}", line));
        }

        let source_chain = Self::format_source_chain(error);
        if !source_chain.is_empty() {
            output.push_str("\n  |");
            output.push_str(&format!("\n  | Source chain:\n{}", source_chain));
        }

        output.push_str("\n  |");
        output.push_str("\n  = note: use `erpkit --help` for more information");

        output
    }

    fn format_source_chain(error: &ErpError) -> String {
        let mut chain = Vec::new();
        let mut current: Option<&(dyn Error + 'static)> = error.source();

        while let Some(err) = current {
            chain.push(format!("  |   - {}", err));
            current = err.source();
        }

        chain.join("\n")
    }

    fn apply_color(&self, text: &str) -> String {
        let mut result = String::new();

        for line in text.lines() {
            if !result.is_empty() {
                result.push('\n');
            }

            if line.starts_with("error[") {
                let bracket_end = line.find(']').unwrap_or(0) + 1;
                let error_prefix = &line[..bracket_end];
                let rest = &line[bracket_end..];
                result.push_str(&format!("{}{}", error_prefix.red().bold(), rest.bold()));
            } else if line.starts_with("  -->") {
                result.push_str(&line.blue().to_string());
            } else if line.starts_with("  | Cause:") {
                result.push_str(&line.yellow().to_string());
            } else if line.starts_with("  | Remediation:") {
                result.push_str(&line.green().to_string());
            } else if line.starts_with("  = note:") || line.starts_with("  |   -") {
                result.push_str(&line.dimmed().to_string());
            } else {
                result.push_str(line);
            }
        }

        result
    }
}
