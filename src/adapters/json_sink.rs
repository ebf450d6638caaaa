//! JSON-lines report sink.
//!
//! Each [`Report`] becomes one `serde_json` object on its own line, tagged
//! by `"event"`, so a host script can capture thrust readings without
//! scraping text:
//!
//! ```text
//! {"event":"units","units":12.25,"samples":20}
//! {"event":"error","error":{"kind":"parse","detail":"empty"}}
//! ```

use std::io::Write;

use log::warn;

use crate::app::events::Report;
use crate::app::ports::ReportSink;

pub struct JsonReportSink<W> {
    out: W,
}

impl<W: Write> JsonReportSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, report: &Report) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.out, report)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

impl<W: Write> ReportSink for JsonReportSink<W> {
    fn emit(&mut self, report: &Report) {
        if let Err(e) = self.write_line(report) {
            warn!("JSON report write failed: {}", e);
        }
    }
}
