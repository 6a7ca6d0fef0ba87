use std::io::{self, Write};

use crate::{check::CredentialSummary, result::CheckResult, service::Service};

const PASS: &str = "✅";
const FAIL: &str = "❌";

/// Operator-facing console output
///
/// Progress lines are written as checks run; [`Report::summary`] prints one
/// line per result at the end.
pub struct Report<W> {
    out: W,
}

impl<W: Write> Report<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn heading(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }

    pub fn banner(&mut self, service: Service) -> io::Result<()> {
        writeln!(self.out, "\n{}", service.banner())
    }

    pub fn validated(&mut self, summary: &CredentialSummary) -> io::Result<()> {
        writeln!(self.out, "{PASS} Credentials found:")?;
        for (label, value) in summary {
            writeln!(self.out, "   {label}: {value}")?;
        }
        Ok(())
    }

    pub fn outcome(&mut self, result: &CheckResult) -> io::Result<()> {
        if result.success {
            writeln!(self.out, "{PASS} {}", result.message)?;
            for (label, value) in &result.details {
                writeln!(self.out, "   {label}: {value}")?;
            }
            return Ok(());
        }

        writeln!(self.out, "{FAIL} {}", result.message)?;
        if let Some(detail) = &result.detail {
            writeln!(self.out, "   Error: {detail}")?;
        }

        if !result.hints.is_empty() {
            writeln!(self.out, "\nTroubleshooting tips:")?;
            for (i, hint) in result.hints.iter().enumerate() {
                writeln!(self.out, "{}. {hint}", i + 1)?;
            }
        }

        Ok(())
    }

    pub fn summary(&mut self, results: &[CheckResult]) -> io::Result<()> {
        writeln!(self.out, "\n=== Test Summary ===")?;
        for result in results {
            let state = if result.success {
                format!("{PASS} Success")
            } else {
                format!("{FAIL} Failed")
            };
            writeln!(self.out, "{}: {state}", result.service.label())?;
        }
        self.out.flush()
    }
}
