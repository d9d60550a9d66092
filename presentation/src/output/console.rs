//! Console output formatter for run outcomes

use crate::output::formatter::ResultDisplay;
use colored::Colorize;
use huddle_domain::{CollectionOutcome, OutputFormat};
use serde::Serialize;

/// Formats run outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format in the requested style
    pub fn render<R>(format: OutputFormat, title: &str, outcome: &CollectionOutcome<R>) -> String
    where
        R: ResultDisplay + Serialize,
    {
        match format {
            OutputFormat::Full => Self::format(title, outcome),
            OutputFormat::Results => Self::format_results_only(outcome),
            OutputFormat::Json => Self::format_json(outcome),
        }
    }

    /// Format the complete outcome
    pub fn format<R: ResultDisplay>(title: &str, outcome: &CollectionOutcome<R>) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(title));
        output.push('\n');

        let status = if outcome.timed_out {
            "stopped at the time limit".yellow().bold()
        } else {
            "everyone completed".green().bold()
        };
        output.push_str(&format!("{} {}\n", "Status:".cyan().bold(), status));
        output.push_str(&format!(
            "{} {}\n",
            "Results:".cyan().bold(),
            outcome.len()
        ));

        let tally = Self::tally(outcome);
        if !tally.is_empty() {
            output.push_str(&Self::section_header("By participant"));
            for (participant, count) in &tally {
                output.push_str(&format!("  {:<20} {}\n", participant, count));
            }
        }

        output.push_str(&Self::section_header("Results (in arrival order)"));
        if outcome.is_empty() {
            output.push_str(&format!("  {}\n", "(no results)".dimmed()));
        }
        for (i, result) in outcome.results.iter().enumerate() {
            output.push_str(&format!(
                "{:>4}. {} {}\n",
                i + 1,
                format!("[{}]", result.participant()).yellow(),
                result.describe()
            ));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json<R: Serialize>(outcome: &CollectionOutcome<R>) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    /// One line per result
    pub fn format_results_only<R: ResultDisplay>(outcome: &CollectionOutcome<R>) -> String {
        let mut output = String::new();
        for result in &outcome.results {
            output.push_str(&format!(
                "{}: {}\n",
                result.participant().bold(),
                result.describe()
            ));
        }
        if outcome.timed_out {
            output.push_str(&format!("{}\n", "(time limit reached)".dimmed()));
        }
        output
    }

    /// Result counts per participant, in order of first result
    fn tally<R: ResultDisplay>(outcome: &CollectionOutcome<R>) -> Vec<(String, usize)> {
        let mut tally: Vec<(String, usize)> = Vec::new();
        for result in &outcome.results {
            match tally.iter_mut().find(|(p, _)| p == result.participant()) {
                Some((_, count)) => *count += 1,
                None => tally.push((result.participant().to_string(), 1)),
            }
        }
        tally
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use huddle_domain::Response;

    fn outcome(timed_out: bool) -> CollectionOutcome<Response> {
        let results = vec![
            Response::new("hi", "p1", 1),
            Response::new("idea", "p2", 2),
            Response::new("hi again", "p1", 3),
        ];
        if timed_out {
            CollectionOutcome::timed_out(results)
        } else {
            CollectionOutcome::completed(results)
        }
    }

    #[test]
    fn test_results_only_lists_every_result() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format_results_only(&outcome(false));
        assert_eq!(text, "p1: hi\np2: idea\np1: hi again\n");
    }

    #[test]
    fn test_results_only_marks_timeout() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format_results_only(&outcome(true));
        assert!(text.ends_with("(time limit reached)\n"));
    }

    #[test]
    fn test_full_format_has_tally_in_first_seen_order() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format("Responses", &outcome(true));

        assert!(text.contains("stopped at the time limit"));
        assert!(text.contains("Results: 3"));
        let p1 = text.find("p1                   2").unwrap();
        let p2 = text.find("p2                   1").unwrap();
        assert!(p1 < p2);
        assert!(text.contains("   3. [p1] hi again"));
    }

    #[test]
    fn test_json_uses_camel_case() {
        let json: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&outcome(false))).unwrap();
        assert_eq!(json["timedOut"], false);
        assert_eq!(json["results"][1]["text"], "idea");
    }

    #[test]
    fn test_render_dispatches_on_format() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::render(OutputFormat::Results, "x", &outcome(false));
        assert!(text.starts_with("p1: hi"));
    }
}
