use async_trait::async_trait;

use crate::{Report, ReportSink, SinkError};

/// A sink that prints the report body to stdout. Used for dry runs.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl StdoutSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ReportSink for StdoutSink {
    async fn deliver(&self, report: &Report) -> Result<(), SinkError> {
        println!("{}", report.body);
        Ok(())
    }
}
