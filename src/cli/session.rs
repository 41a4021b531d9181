use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use reviews::{Browser, Config, DraftField, Intent, Outcome, browser::ParseIntentError};
use tracing::instrument;

use super::{
    render::{RenderArgs, Renderer},
    terminal::{Terminal, Tone},
};

const HELP: &str = "\
Filters                          Add a review
  search <text>                    draft <field> <value>
  min-rating <0-5>                 submit
  tag <text>                       reset draft
  sort <newest|oldest|highest|lowest>
  reset filters                  Other
                                   show, draft, help, quit

Draft fields: author, product, rating, comment, tags, date";

#[derive(Debug, Parser)]
#[command(about = "Browse and add reviews interactively")]
pub struct Session {
    #[command(flatten)]
    render: RenderArgs,
}

impl Session {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let terminal = Terminal::detect();
        let renderer = Renderer::new(&self.render, config, terminal);
        let mut browser = super::browser(config);

        drive(
            &mut browser,
            &renderer,
            io::stdin().lock(),
            &mut io::stdout().lock(),
            terminal.is_interactive(),
        )
    }
}

/// Reads one command per line from `input` until it ends or `quit` is read.
///
/// The display is rendered once up front and again after every filter
/// change or submission.
fn drive<R: BufRead, W: Write>(
    browser: &mut Browser,
    renderer: &Renderer,
    input: R,
    out: &mut W,
    prompt: bool,
) -> anyhow::Result<()> {
    renderer.render(&browser.display(), out)?;
    show_prompt(renderer, out, prompt)?;

    for line in input.lines() {
        let line = line.context("failed to read input")?;

        match line.trim() {
            "quit" | "exit" => break,
            "help" => writeln!(out, "{HELP}")?,
            "show" => renderer.render(&browser.display(), out)?,
            "draft" => write_draft(browser, renderer, out)?,
            _ => match line.parse::<Intent>() {
                Ok(intent) => apply(browser, renderer, intent, out)?,
                Err(ParseIntentError::Empty) => {}
                Err(e) => {
                    tracing::debug!("rejected input {line:?}: {e}");
                    let message = format!("error: {e} (type 'help' for commands)");
                    writeln!(out, "{}", renderer.tint(&message, Tone::Poor))?;
                }
            },
        }

        show_prompt(renderer, out, prompt)?;
    }

    Ok(())
}

fn apply<W: Write>(
    browser: &mut Browser,
    renderer: &Renderer,
    intent: Intent,
    out: &mut W,
) -> anyhow::Result<()> {
    let edits_draft = matches!(intent, Intent::UpdateDraftField(..) | Intent::ResetDraft);

    match browser.dispatch(intent) {
        Ok(Outcome::Submitted(review)) => {
            if !renderer.is_quiet() {
                let added = format!("Added review #{}", review.id());
                writeln!(out, "{}", renderer.tint(&added, Tone::Good))?;
            }
        }
        Ok(Outcome::Updated) if edits_draft => return Ok(()),
        Ok(Outcome::Updated) => {}
        Err(e) => {
            let message = format!("error: {e}");
            writeln!(out, "{}", renderer.tint(&message, Tone::Poor))?;
            return Ok(());
        }
    }

    renderer.render(&browser.display(), out)
}

fn write_draft<W: Write>(browser: &Browser, renderer: &Renderer, out: &mut W) -> io::Result<()> {
    let draft = browser.draft();
    for field in DraftField::ALL {
        let value = draft.get(field);
        let shown = if value.is_empty() {
            renderer.tint("(empty)", Tone::Muted)
        } else {
            value.to_string()
        };
        writeln!(out, "{:<8} {shown}", field.name())?;
    }
    Ok(())
}

fn show_prompt<W: Write>(renderer: &Renderer, out: &mut W, prompt: bool) -> io::Result<()> {
    if prompt {
        write!(out, "{}", renderer.tint("> ", Tone::Muted))?;
        out.flush()?;
    }
    Ok(())
}
