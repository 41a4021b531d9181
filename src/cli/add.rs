use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use dialoguer::{Input, Select};
use reviews::{Browser, Config, DraftField, DraftReview, Intent};
use tracing::instrument;

use super::{
    render::{RenderArgs, Renderer},
    terminal::{Terminal, Tone},
};

const RATING_LABELS: [&str; 5] = [
    "1 - Poor",
    "2 - Fair",
    "3 - Good",
    "4 - Very Good",
    "5 - Excellent",
];

#[derive(Debug, Parser)]
#[command(about = "Add a review and show the resulting list")]
pub struct Add {
    /// Your name
    #[arg(long)]
    author: Option<String>,

    /// Name of the product under review
    #[arg(long)]
    product: Option<String>,

    /// Star rating, greater than 0 and at most 5
    #[arg(long)]
    rating: Option<String>,

    /// The review text
    #[arg(long)]
    comment: Option<String>,

    /// Comma separated tags, e.g. "electronics, budget"
    #[arg(long)]
    tags: Option<String>,

    /// Review date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<String>,

    /// Never prompt for missing fields
    #[arg(long)]
    no_input: bool,

    #[command(flatten)]
    render: RenderArgs,
}

impl Add {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let terminal = Terminal::detect();
        let renderer = Renderer::new(&self.render, config, terminal);
        let prompt = terminal.is_interactive() && !self.no_input;

        let mut browser = super::browser(config);
        for intent in self.intents() {
            browser.dispatch(intent)?;
        }

        if prompt {
            prompt_missing(&mut browser)?;
        }

        let review = browser.submit_draft().context("review not added")?;

        let mut out = io::stdout().lock();
        if !renderer.is_quiet() {
            let added = format!("Added review #{}", review.id());
            writeln!(out, "{}", renderer.tint(&added, Tone::Good))?;
            writeln!(out, "{}\n", renderer.describe(&review))?;
        }
        renderer.render(&browser.display(), &mut out)
    }

    /// Draft updates for every field given on the command line.
    fn intents(&self) -> Vec<Intent> {
        [
            (DraftField::Author, &self.author),
            (DraftField::Product, &self.product),
            (DraftField::Rating, &self.rating),
            (DraftField::Comment, &self.comment),
            (DraftField::Tags, &self.tags),
            (DraftField::Date, &self.date),
        ]
        .into_iter()
        .filter_map(|(field, value)| {
            value
                .clone()
                .map(|value| Intent::UpdateDraftField(field, value))
        })
        .collect()
    }
}

/// Asks for every required field the draft is still missing.
fn prompt_missing(browser: &mut Browser) -> anyhow::Result<()> {
    for field in missing_fields(browser.draft()) {
        let value = match field {
            DraftField::Rating => {
                let choice = Select::new()
                    .with_prompt(prompt_label(field))
                    .items(&RATING_LABELS)
                    .default(RATING_LABELS.len() - 1)
                    .interact()
                    .context("failed to read rating")?;
                (choice + 1).to_string()
            }
            DraftField::Tags => Input::<String>::new()
                .with_prompt(prompt_label(field))
                .allow_empty(true)
                .interact_text()
                .context("failed to read tags")?,
            _ => Input::<String>::new()
                .with_prompt(prompt_label(field))
                .interact_text()
                .with_context(|| format!("failed to read {field}"))?,
        };
        browser.update_draft_field(field, value);
    }
    Ok(())
}

/// Fields that still need an answer before the draft can be submitted.
///
/// Tags are optional but still offered when nothing was entered.
fn missing_fields(draft: &DraftReview) -> Vec<DraftField> {
    [
        DraftField::Author,
        DraftField::Product,
        DraftField::Rating,
        DraftField::Comment,
        DraftField::Tags,
    ]
    .into_iter()
    .filter(|&field| draft.get(field).trim().is_empty())
    .collect()
}

const fn prompt_label(field: DraftField) -> &'static str {
    match field {
        DraftField::Author => "Your name",
        DraftField::Product => "Product name",
        DraftField::Rating => "Rating",
        DraftField::Comment => "Review comment",
        DraftField::Tags => "Tags (comma separated)",
        DraftField::Date => "Date (YYYY-MM-DD)",
    }
}
