use chrono::Local;
use colored::Colorize;

use crate::runner::catalog::Section;
use crate::runner::types::{ProbeResult, ProbeSummary};
use crate::utils::DetailsFormatter;

const WIDE_RULE: usize = 80;
const NARROW_RULE: usize = 40;

pub struct ProbeReporter {
    verbose: bool,
    formatter: DetailsFormatter,
}

impl ProbeReporter {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            formatter: DetailsFormatter::default(),
        }
    }

    /// 打印运行开始的横幅
    pub fn print_header(&self, base_url: &str) {
        println!("{}", "=".repeat(WIDE_RULE));
        println!("{}", "PORTFOLIO BACKEND API COMPREHENSIVE TESTING".bold());
        println!("{}", "=".repeat(WIDE_RULE));
        println!("Testing API at: {}", base_url);
        println!("Timestamp: {}", Local::now().to_rfc3339());
        println!("{}", "=".repeat(WIDE_RULE));
    }

    pub fn print_section(&self, section: Section) {
        println!("\n{}", section.title().bold());
        println!("{}", "-".repeat(NARROW_RULE));
    }

    /// 打印单个探针结果
    pub fn print_result(&self, result: &ProbeResult) {
        let status = if result.success {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        println!("{}: {} - {}", status, result.test, result.message);

        // 失败时总是显示细节，verbose 模式下通过也显示
        if let Some(details) = &result.details
            && (self.verbose || !result.success)
        {
            let formatted = self.formatter.format(details);
            let mut lines = formatted.lines();
            if let Some(first) = lines.next() {
                println!("   {}: {}", "Details".yellow(), first);
            }
            for line in lines {
                println!("   {}", line);
            }
        }

        if self.verbose {
            println!(
                "   {}",
                format!("({}ms)", result.duration.as_millis()).dimmed()
            );
        }
    }

    /// 打印测试摘要
    pub fn print_summary(&self, summary: &ProbeSummary) {
        println!("\n{}", "=".repeat(WIDE_RULE));
        println!("{}", "TEST SUMMARY".bold());
        println!("{}", "=".repeat(WIDE_RULE));

        println!("Total Tests: {}", summary.total);
        println!("Passed: {}", summary.passed.to_string().green());
        if summary.failed == 0 {
            println!("Failed: {}", summary.failed);
        } else {
            println!("Failed: {}", summary.failed.to_string().red());
        }
        println!("Success Rate: {:.1}%", summary.success_rate);

        if !summary.failures.is_empty() {
            println!(
                "\n{}",
                format!("❌ FAILED TESTS ({}):", summary.failed).red().bold()
            );
            for (name, message) in &summary.failures {
                println!("  - {}: {}", name, message);
            }
        }

        println!("\n{}", "=".repeat(WIDE_RULE));
    }
}

impl Default for ProbeReporter {
    fn default() -> Self {
        Self::new(false)
    }
}
