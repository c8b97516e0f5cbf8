use crate::error::Result;
use crate::model::AggregateRecord;
use crate::util::DATE_FORMAT;
use clap::ValueEnum;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub const CSV_HEADER: [&str; 7] = [
    "Repository",
    "Contributor",
    "Additions",
    "Deletions",
    "Commits",
    "StartDate",
    "EndDate",
];

/// Receives finalized records in arrival order.
pub trait Sink {
    fn accept(&mut self, record: AggregateRecord) -> Result<()>;

    /// Flush whatever was accepted so far.
    fn finish(&mut self) -> Result<()>;
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn accept(&mut self, record: AggregateRecord) -> Result<()> {
        (**self).accept(record)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    #[value(alias = "json")]
    Ndjson,
}

pub struct CsvSink<W: Write> {
    writer: W,
}

impl<W: Write> CsvSink<W> {
    /// Writes the header row immediately.
    pub fn new(mut writer: W) -> Result<Self> {
        write_row(&mut writer, &CSV_HEADER)?;
        Ok(Self { writer })
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Sink for CsvSink<W> {
    fn accept(&mut self, record: AggregateRecord) -> Result<()> {
        let additions = record.additions.to_string();
        let deletions = record.deletions.to_string();
        let commits = record.commits.to_string();
        let start = record.start_date.format(DATE_FORMAT).to_string();
        let end = record.end_date.format(DATE_FORMAT).to_string();
        write_row(
            &mut self.writer,
            &[
                record.repository.as_str(),
                record.contributor.as_str(),
                additions.as_str(),
                deletions.as_str(),
                commits.as_str(),
                start.as_str(),
                end.as_str(),
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

fn write_row<W: Write>(writer: &mut W, fields: &[&str]) -> io::Result<()> {
    let line = fields
        .iter()
        .map(|f| escape_field(f))
        .collect::<Vec<_>>()
        .join(",");
    writeln!(writer, "{line}")
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// One JSON object per line, flushed per record so partial runs stay readable.
pub struct NdjsonSink<W: Write> {
    writer: W,
}

impl<W: Write> NdjsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Sink for NdjsonSink<W> {
    fn accept(&mut self, record: AggregateRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, &record)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Open the sink for `format`. `None` or `-` writes to stdout.
pub fn open_sink(format: OutputFormat, path: Option<&Path>) -> Result<Box<dyn Sink>> {
    let writer: Box<dyn Write> = match path {
        Some(p) if p != Path::new("-") => Box::new(BufWriter::new(File::create(p)?)),
        _ => Box::new(io::stdout().lock()),
    };
    let sink: Box<dyn Sink> = match format {
        OutputFormat::Csv => Box::new(CsvSink::new(writer)?),
        OutputFormat::Ndjson => Box::new(NdjsonSink::new(writer)),
    };
    Ok(sink)
}
