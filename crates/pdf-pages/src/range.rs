//! Page range expressions such as `1-3,5,7-9`
//!
//! Tokens are separated by commas. A token is either a 1-based page number or an
//! inclusive `start-end` range. Tokens that do not parse are skipped; only an
//! expression that yields no pages at all is an error.

use crate::types::*;
use std::ops::RangeInclusive;

/// Inclusive span of zero-based page indices
pub type PageRange = RangeInclusive<usize>;

/// Parse a range expression into spans of zero-based page indices.
///
/// Spans keep the order of their tokens. Nothing is checked against a
/// document's length here and no span is expanded, so `1-99999999999` costs
/// one entry.
pub fn parse_page_ranges(expression: &str) -> Result<Vec<PageRange>> {
    let mut ranges = Vec::new();

    for token in expression.split(',') {
        let token = token.trim();

        if let Some((start, end)) = token.split_once('-') {
            match (parse_page(start), parse_page(end)) {
                // Page 0 has no index; a range starting there begins at page 1
                (Some(start), Some(end)) if start.max(1) <= end => {
                    ranges.push(start.max(1) - 1..=end - 1);
                }
                (Some(_), Some(_)) => log::debug!("Skipping empty range '{}'", token),
                _ => log::debug!("Skipping unparsable range '{}'", token),
            }
        } else {
            match parse_page(token) {
                Some(page) if page >= 1 => ranges.push(page - 1..=page - 1),
                _ => log::debug!("Skipping unparsable page '{}'", token),
            }
        }
    }

    if ranges.is_empty() {
        return Err(ExtractError::NoValidRanges);
    }
    Ok(ranges)
}

/// Expand spans into page indices once they are known to fit the document.
///
/// The first span reaching past the end fails the whole selection with the
/// first page number that does not exist. Duplicates are kept.
pub fn resolve_page_ranges(ranges: &[PageRange], page_count: usize) -> Result<Vec<usize>> {
    if let Some(range) = ranges.iter().find(|range| *range.end() >= page_count) {
        return Err(ExtractError::PageOutOfRange {
            page: (*range.start()).max(page_count) + 1,
            page_count,
        });
    }
    Ok(ranges.iter().cloned().flatten().collect())
}

fn parse_page(text: &str) -> Option<usize> {
    text.trim().parse().ok()
}
