use crate::diagnostics::Diagnostic;
use colored::*;
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

/// Everything a writer needs to render one run
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    pub files_analyzed: usize,
    pub methods_analyzed: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub fn violation_count(&self) -> usize {
        self.diagnostics.len()
    }
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        writeln!(self.writer, "# IOSP Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "{} violation(s) in {} method(s) across {} file(s).",
            report.violation_count(),
            report.methods_analyzed,
            report.files_analyzed
        )?;

        if report.diagnostics.is_empty() {
            self.writer.flush()?;
            return Ok(());
        }

        writeln!(self.writer)?;
        writeln!(self.writer, "| Location | Method | Metric |")?;
        writeln!(self.writer, "|----------|--------|--------|")?;
        for d in &report.diagnostics {
            writeln!(
                self.writer,
                "| {} | `{}` | {} |",
                d.location, d.method_name, d.metric
            )?;
        }

        for d in &report.diagnostics {
            writeln!(self.writer)?;
            writeln!(self.writer, "## `{}`", d.method_name)?;
            writeln!(self.writer)?;
            writeln!(self.writer, "{}", d.summary())?;
            writeln!(self.writer)?;
            for line in d.integration_text.lines().chain(d.operation_text.lines()) {
                writeln!(self.writer, "{line}")?;
            }
        }
        self.writer.flush()?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        for d in &report.diagnostics {
            writeln!(
                self.writer,
                "{}: {}: {}",
                d.location.to_string().bold(),
                format!("{}[{}]", d.severity, d.rule_id).yellow().bold(),
                d.summary()
            )?;
            for line in d.integration_text.lines() {
                writeln!(self.writer, "    {}", line.cyan())?;
            }
            for line in d.operation_text.lines() {
                writeln!(self.writer, "    {}", line.magenta())?;
            }
        }

        let summary = format!(
            "{} IOSP violation(s) in {} method(s) across {} file(s)",
            report.violation_count(),
            report.methods_analyzed,
            report.files_analyzed
        );
        if report.diagnostics.is_empty() {
            writeln!(self.writer, "{}", summary.green())?;
        } else {
            writeln!(self.writer, "{}", summary.yellow())?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

pub fn create_writer<'w>(
    format: OutputFormat,
    writer: Box<dyn Write + 'w>,
) -> Box<dyn OutputWriter + 'w> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}
