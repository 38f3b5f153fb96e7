use std::path::Path;

use crate::BulkResult;

const RULE_WIDTH: usize = 40;

/// Printable summary of a finished bulk run.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryView {
    pub succeeded: usize,
    pub failed: usize,
    pub total: usize,
    pub success_rate: f64,
    pub failures: Vec<(String, String)>,
    pub output_dir: String,
}

impl SummaryView {
    pub fn from_result(result: &BulkResult, output_dir: &Path) -> Self {
        Self {
            succeeded: result.successful.len(),
            failed: result.failed.len(),
            total: result.total,
            success_rate: result.success_rate(),
            failures: result
                .failed
                .iter()
                .map(|f| (f.url.clone(), f.error.clone()))
                .collect(),
            output_dir: output_dir.display().to_string(),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            "BULK CONVERSION SUMMARY".to_string(),
            "=".repeat(RULE_WIDTH),
            format!("Successful: {}", self.succeeded),
            format!("Failed: {}", self.failed),
            format!("Success Rate: {:.1}%", self.success_rate),
        ];
        if !self.failures.is_empty() {
            lines.push(String::new());
            lines.push("Failed URLs:".to_string());
            for (index, (url, error)) in self.failures.iter().enumerate() {
                lines.push(format!("   {}. {}", index + 1, url));
                lines.push(format!("      Error: {}", error));
            }
        }
        if self.succeeded > 0 {
            lines.push(String::new());
            lines.push(format!(
                "{} files saved to: {}",
                self.succeeded, self.output_dir
            ));
        }
        lines
    }
}
