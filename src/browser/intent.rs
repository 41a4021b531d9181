use std::str::FromStr;

use crate::{
    DraftField, MinRating, SortOption,
    domain::{draft::DraftFieldError, filter::ParseSortOptionError},
};

/// A user action emitted by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Replace the search term. An empty term disables the search filter.
    SetSearchTerm(String),
    /// Replace the minimum rating.
    SetMinRating(MinRating),
    /// Replace the tag filter. An empty tag disables the tag filter.
    SetTagFilter(String),
    /// Change the sort mode.
    SetSortOption(SortOption),
    /// Overwrite one field of the draft form.
    UpdateDraftField(DraftField, String),
    /// Submit the draft form.
    SubmitDraft,
    /// Clear all filters.
    ResetFilters,
    /// Clear the draft form.
    ResetDraft,
}

/// Errors returned when parsing an [`Intent`] from text.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseIntentError {
    /// The line was blank.
    #[error("empty input")]
    Empty,

    /// The first word is not a known command.
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// A command that needs an argument was given none.
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    /// `reset` was followed by something other than `filters` or `draft`.
    #[error("cannot reset '{0}': expected 'filters' or 'draft'")]
    UnknownResetTarget(String),

    /// Unknown sort mode.
    #[error(transparent)]
    Sort(#[from] ParseSortOptionError),

    /// Unknown draft field.
    #[error(transparent)]
    Field(#[from] DraftFieldError),
}

impl FromStr for Intent {
    type Err = ParseIntentError;

    /// Parses the line-oriented form used by interactive sessions:
    ///
    /// ```text
    /// search <text>          tag <text>
    /// min-rating <0-5>       sort <newest|oldest|highest|lowest>
    /// draft <field> <value>  submit
    /// reset filters          reset draft
    /// ```
    ///
    /// The command word is separated from its argument by a single
    /// whitespace character. The `search`, `tag` and `draft` values are taken
    /// verbatim after that, so they may start or end with spaces. `search`
    /// and `tag` without text clear their filter. A `min-rating` that is not a
    /// whole number from 0 to 5 turns the rating filter off.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (command, rest) = split_word(s.trim_start());

        match command.to_ascii_lowercase().as_str() {
            "" => Err(ParseIntentError::Empty),
            "search" => Ok(Self::SetSearchTerm(rest.to_string())),
            "tag" => Ok(Self::SetTagFilter(rest.to_string())),
            "min-rating" => Ok(Self::SetMinRating(MinRating::parse_lenient(rest))),
            "sort" => {
                let sort = required(rest.trim(), "sort")?.parse()?;
                Ok(Self::SetSortOption(sort))
            }
            "draft" => {
                let (field, value) = split_word(required(rest.trim_start(), "draft")?);
                Ok(Self::UpdateDraftField(field.parse()?, value.to_string()))
            }
            "submit" => Ok(Self::SubmitDraft),
            "reset" => {
                let target = required(rest.trim(), "reset")?;
                match target.to_ascii_lowercase().as_str() {
                    "filters" => Ok(Self::ResetFilters),
                    "draft" => Ok(Self::ResetDraft),
                    _ => Err(ParseIntentError::UnknownResetTarget(target.to_string())),
                }
            }
            _ => Err(ParseIntentError::UnknownCommand(command.to_string())),
        }
    }
}

/// Splits off the first word and drops the one whitespace character after it.
fn split_word(text: &str) -> (&str, &str) {
    text.split_once(char::is_whitespace).unwrap_or((text, ""))
}

fn required<'a>(rest: &'a str, command: &'static str) -> Result<&'a str, ParseIntentError> {
    if rest.is_empty() {
        Err(ParseIntentError::MissingArgument(command))
    } else {
        Ok(rest)
    }
}
