use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use uuid::Uuid;

use crate::Result;
use crate::runner::{ProbeResult, ProbeSummary};

/// 写到磁盘的一次完整运行记录
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// 唯一 ID (UUID)
    pub run_id: String,
    pub base_url: String,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
    pub summary: ProbeSummary,
    pub results: Vec<ProbeResult>,
}

impl RunReport {
    pub fn new(
        base_url: &url::Url,
        started_at: DateTime<Local>,
        summary: ProbeSummary,
        results: Vec<ProbeResult>,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            base_url: base_url.to_string(),
            started_at,
            finished_at: Local::now(),
            summary,
            results,
        }
    }

    /// 以美化后的 JSON 写入文件，必要时创建父目录
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ProbeFailure;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_write_report() {
        let results = vec![
            ProbeResult::passed("Health Check", "API is running", Duration::from_millis(5)),
            ProbeResult::failed(
                "Root Endpoint",
                ProbeFailure::new("HTTP 500"),
                Duration::from_millis(7),
            ),
        ];
        let summary = ProbeSummary::from_results(&results);
        let base = url::Url::parse("http://localhost:8001/api").unwrap();
        let report = RunReport::new(&base, Local::now(), summary, results);

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("report.json");
        report.write_to(&path).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["base_url"], "http://localhost:8001/api");
        assert_eq!(written["summary"]["failed"], 1);
        assert_eq!(written["results"].as_array().unwrap().len(), 2);
        assert_eq!(written["results"][1]["message"], "HTTP 500");
        assert_eq!(written["run_id"].as_str().unwrap().len(), 36);
    }
}
