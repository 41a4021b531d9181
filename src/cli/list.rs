use std::io;

use clap::Parser;
use reviews::{Config, Intent, MinRating, SortOption};
use tracing::instrument;

use super::{
    render::{RenderArgs, Renderer},
    terminal::Terminal,
};

/// Command arguments for `rvw list`.
#[derive(Debug, Parser, Default)]
#[command(about = "List reviews with filters")]
pub struct List {
    /// Case-insensitive substring match against product, comment and author.
    #[arg(long, value_name = "TEXT")]
    search: Option<String>,

    /// Only show reviews rated at least this many stars (0 = all).
    #[arg(long, value_name = "N", value_parser = parse_min_rating)]
    min_rating: Option<MinRating>,

    /// Case-insensitive substring match against tags.
    #[arg(long, value_name = "TEXT")]
    tag: Option<String>,

    /// Sort order (newest, oldest, highest, lowest).
    #[arg(long, value_name = "ORDER")]
    sort: Option<SortOption>,

    #[command(flatten)]
    render: RenderArgs,
}

impl List {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let mut browser = super::browser(config);
        for intent in self.intents() {
            browser.dispatch(intent)?;
        }

        let renderer = Renderer::new(&self.render, config, Terminal::detect());
        renderer.render(&browser.display(), &mut io::stdout().lock())
    }

    /// The filter intents equivalent to the given flags.
    fn intents(&self) -> Vec<Intent> {
        let mut intents = Vec::new();
        if let Some(search) = &self.search {
            intents.push(Intent::SetSearchTerm(search.clone()));
        }
        if let Some(min_rating) = self.min_rating {
            intents.push(Intent::SetMinRating(min_rating));
        }
        if let Some(tag) = &self.tag {
            intents.push(Intent::SetTagFilter(tag.clone()));
        }
        if let Some(sort) = self.sort {
            intents.push(Intent::SetSortOption(sort));
        }
        intents
    }
}

fn parse_min_rating(value: &str) -> Result<MinRating, String> {
    value.parse().map_err(|e| format!("{e}"))
}
