use std::{fmt, io::Write};

use anyhow::Context;
use clap::ValueEnum;
use reviews::{Config, Review};
use serde::Serialize;

use super::terminal::{Terminal, Tone};

/// Output options shared by every command that prints reviews.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RenderArgs {
    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,

    /// Columns to display (comma-separated).
    #[arg(long, value_delimiter = ',', value_name = "COL")]
    columns: Vec<Column>,

    /// Suppress headers and format rows for scripting.
    #[arg(long)]
    quiet: bool,
}

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

/// Available columns.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, ValueEnum)]
pub enum Column {
    Id,
    Product,
    Author,
    Rating,
    Date,
    Comment,
    Tags,
}

#[derive(Debug, Clone, Serialize)]
struct SerializableRow<'a> {
    id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    product: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<&'a [String]>,
}

/// Writes a sequence of reviews in the requested format.
#[derive(Debug, Clone)]
pub struct Renderer {
    output: OutputFormat,
    columns: Vec<Column>,
    quiet: bool,
    color: bool,
}

impl Renderer {
    pub fn new(args: &RenderArgs, config: &Config, terminal: Terminal) -> Self {
        let columns = if args.columns.is_empty() {
            configured_columns(config)
        } else {
            args.columns.clone()
        };

        let columns = if columns.is_empty() {
            default_columns(args.output, args.quiet, terminal.is_narrow())
        } else {
            columns
        };

        Self {
            output: args.output,
            columns,
            quiet: args.quiet,
            color: args.output == OutputFormat::Table && !args.quiet && terminal.color(),
        }
    }

    pub const fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn render<W: Write>(&self, reviews: &[&Review], out: &mut W) -> anyhow::Result<()> {
        match self.output {
            OutputFormat::Table => self.render_table(reviews, out),
            OutputFormat::Json => self.render_json(reviews, out),
            OutputFormat::Csv => self.render_csv(reviews, out),
        }
        .context("failed to write output")
    }

    fn render_table<W: Write>(&self, reviews: &[&Review], out: &mut W) -> anyhow::Result<()> {
        let data: Vec<Vec<String>> = reviews
            .iter()
            .map(|review| {
                self.columns
                    .iter()
                    .map(|column| column.value(review))
                    .collect()
            })
            .collect();

        if self.quiet {
            for row in data {
                writeln!(out, "{}", row.join("\t"))?;
            }
            return Ok(());
        }

        let heading = format!("Reviews ({})", reviews.len());
        writeln!(out, "{}", self.tint(&heading, Tone::Neutral))?;

        if reviews.is_empty() {
            let empty = "No reviews match your search criteria.";
            writeln!(out, "{}", self.tint(empty, Tone::Muted))?;
            return Ok(());
        }

        // Determine column widths for alignment.
        let widths = self
            .columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                data.iter()
                    .map(|row| row[idx].chars().count())
                    .max()
                    .unwrap_or(0)
                    .max(column.header().len())
            })
            .collect::<Vec<_>>();

        for (column, width) in self.columns.iter().zip(&widths) {
            write!(out, "{:<width$}  ", column.header())?;
        }
        writeln!(out)?;

        for width in &widths {
            write!(out, "{:-<width$}  ", "")?;
        }
        writeln!(out)?;

        for (row, review) in data.iter().zip(reviews) {
            for ((value, column), width) in row.iter().zip(&self.columns).zip(&widths) {
                let padded = format!("{value:<width$}");
                write!(out, "{}  ", self.paint(*column, review, &padded))?;
            }
            writeln!(out)?;
        }

        Ok(())
    }

    fn paint(&self, column: Column, review: &Review, padded: &str) -> String {
        match column {
            Column::Rating => self.tint(padded, Tone::for_rating(review.rating())),
            Column::Tags => self.tint(padded, Tone::Muted),
            _ => padded.to_string(),
        }
    }

    /// Applies `tone` when color output is enabled.
    pub fn tint(&self, text: &str, tone: Tone) -> String {
        if self.color {
            tone.paint(text)
        } else {
            text.to_string()
        }
    }

    /// A single review as a short human-readable block.
    pub fn describe(&self, review: &Review) -> String {
        let mut text = format!(
            "#{} {} ({} ★)\nBy {} on {}\n{}",
            review.id(),
            review.product(),
            review.rating(),
            review.author(),
            review.date(),
            review.comment(),
        );
        if !review.tags().is_empty() {
            text.push('\n');
            text.push_str(&self.tint(&Column::Tags.value(review), Tone::Muted));
        }
        text
    }

    fn render_json<W: Write>(&self, reviews: &[&Review], out: &mut W) -> anyhow::Result<()> {
        let rows: Vec<_> = reviews
            .iter()
            .map(|review| build_serializable_row(review, &self.columns))
            .collect();

        serde_json::to_writer_pretty(&mut *out, &rows).context("failed to render json output")?;
        writeln!(out)?;
        Ok(())
    }

    fn render_csv<W: Write>(&self, reviews: &[&Review], out: &mut W) -> anyhow::Result<()> {
        if !self.quiet {
            let header_line = self
                .columns
                .iter()
                .map(|column| csv_escape(column.header()))
                .collect::<Vec<_>>()
                .join(",");
            writeln!(out, "{header_line}")?;
        }

        for review in reviews {
            let values = self
                .columns
                .iter()
                .map(|column| csv_escape(&column.raw_value(review)))
                .collect::<Vec<_>>();
            writeln!(out, "{}", values.join(","))?;
        }

        Ok(())
    }
}

fn configured_columns(config: &Config) -> Vec<Column> {
    config
        .columns()
        .iter()
        .filter_map(|name| match Column::from_str(name, true) {
            Ok(column) => Some(column),
            Err(e) => {
                tracing::warn!("ignoring configured column: {e}");
                None
            }
        })
        .collect()
}

fn default_columns(output: OutputFormat, quiet: bool, narrow: bool) -> Vec<Column> {
    match output {
        OutputFormat::Table if quiet => vec![Column::Id],
        OutputFormat::Table if narrow => vec![Column::Id, Column::Product, Column::Rating],
        OutputFormat::Table => vec![
            Column::Id,
            Column::Product,
            Column::Author,
            Column::Rating,
            Column::Date,
            Column::Tags,
        ],
        OutputFormat::Json | OutputFormat::Csv => vec![
            Column::Id,
            Column::Product,
            Column::Author,
            Column::Rating,
            Column::Date,
            Column::Comment,
            Column::Tags,
        ],
    }
}

fn build_serializable_row<'a>(review: &'a Review, columns: &[Column]) -> SerializableRow<'a> {
    let mut row = SerializableRow {
        id: review.id(),
        product: None,
        author: None,
        rating: None,
        date: None,
        comment: None,
        tags: None,
    };

    for column in columns {
        match column {
            Column::Id => {}
            Column::Product => row.product = Some(review.product()),
            Column::Author => row.author = Some(review.author()),
            Column::Rating => row.rating = Some(review.rating()),
            Column::Date => row.date = Some(review.date().to_string()),
            Column::Comment => row.comment = Some(review.comment()),
            Column::Tags => row.tags = Some(review.tags()),
        }
    }

    row
}

fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

impl Column {
    const fn header(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Product => "Product",
            Self::Author => "Author",
            Self::Rating => "Rating",
            Self::Date => "Date",
            Self::Comment => "Comment",
            Self::Tags => "Tags",
        }
    }

    /// The cell text shown in tables.
    fn value(self, review: &Review) -> String {
        match self {
            Self::Rating => format!("{} ★", review.rating()),
            Self::Tags => review
                .tags()
                .iter()
                .map(|tag| format!("#{tag}"))
                .collect::<Vec<_>>()
                .join(" "),
            _ => self.raw_value(review),
        }
    }

    /// The plain cell text used for CSV.
    fn raw_value(self, review: &Review) -> String {
        match self {
            Self::Id => review.id().to_string(),
            Self::Product => review.product().to_string(),
            Self::Author => review.author().to_string(),
            Self::Rating => review.rating().to_string(),
            Self::Date => review.date().to_string(),
            Self::Comment => review.comment().to_string(),
            Self::Tags => review.tags().join(", "),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Csv => "csv",
        })
    }
}
