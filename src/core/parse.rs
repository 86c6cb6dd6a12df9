// src/core/parse.rs

use crate::{
    constants::{CSV_SEPARATOR, KEY_LABEL_SEPARATOR},
    models::{OptionList, StaticOptions},
};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Static blocks are split the way the definition form captured them:
    // on `\n` or `\r\n`, whichever the author's platform produced.
    static ref LINE_BREAK_RE: Regex = Regex::new(r"\r?\n").unwrap();
}

/// Drops empty fields from the tail of a split, keeping interior ones.
/// An entirely empty input stays empty: a blank block or a blank output
/// line means "no options", not one blank option.
fn drop_trailing_empties(mut fields: Vec<String>) -> Vec<String> {
    while fields.last().is_some_and(String::is_empty) {
        fields.pop();
    }
    fields
}

/// Resolves a static option block into its ordered lines.
/// An explicit list is taken verbatim; a text block is split on line breaks.
pub fn static_lines(options: &StaticOptions) -> Vec<String> {
    match options {
        StaticOptions::Lines(lines) => lines.clone(),
        StaticOptions::Block(text) => split_block(text),
    }
}

/// Splits a text block on line breaks. Interior blank lines become
/// empty-string entries; trailing blank lines are not entries.
pub fn split_block(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    drop_trailing_empties(
        LINE_BREAK_RE
            .split(text)
            .map(ToString::to_string)
            .collect(),
    )
}

/// Splits a command's first output line into option labels on commas.
/// No whitespace trimming is performed around separators.
pub fn split_csv_line(line: &str) -> OptionList {
    if line.is_empty() {
        return Vec::new();
    }
    drop_trailing_empties(line.split(CSV_SEPARATOR).map(ToString::to_string).collect())
}

/// Collects the labels of all `key:label` entries whose key equals the chosen
/// primary value exactly. A value that is merely a prefix of another key does
/// not match it. The label is everything after the first separator, so labels
/// may themselves contain separators. Entries without a separator are skipped.
pub fn match_secondary_entries(entries: &[String], chosen: &str) -> OptionList {
    let mut labels = Vec::new();
    for entry in entries {
        match entry.split_once(KEY_LABEL_SEPARATOR) {
            Some((key, label)) if key == chosen => labels.push(label.to_string()),
            Some(_) => {}
            None => {
                log::debug!("Skipping static secondary entry without a separator: '{entry}'");
            }
        }
    }
    labels
}

// MARK: --- UNIT TESTS ---
