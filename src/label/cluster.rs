//! Spatial grouping of fragments into label lines

use crate::models::Fragment;

use super::normalize::LineNormalizer;

/// A fragment that survived filtering, reduced to what grouping needs
#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    text: &'a str,
    x0: f64,
    cy: f64,
}

/// Group fragments into raw (un-normalized) lines, top to bottom
///
/// Fragments without a score, below `score_min` or without a usable box
/// are dropped one by one. A
/// fragment joins the current line while its vertical center is within
/// `tolerance` of the previous fragment's center, so a slightly tilted row
/// still reads as one line.
pub fn group_lines(fragments: &[Fragment], score_min: f64, tolerance: f64) -> Vec<String> {
    let mut tokens: Vec<Token<'_>> = fragments
        .iter()
        .filter(|f| f.score.is_some_and(|s| s > 0.0 && s >= score_min))
        .filter_map(|f| {
            let rect = f.bbox.to_rect()?;
            Some(Token {
                text: f.text.trim(),
                x0: rect.left,
                cy: rect.center_y(),
            })
        })
        .collect();

    tokens.sort_by(|a, b| a.cy.total_cmp(&b.cy).then(a.x0.total_cmp(&b.x0)));

    let mut lines = Vec::new();
    let mut current: Vec<Token<'_>> = Vec::new();
    let mut last_cy: Option<f64> = None;

    for token in tokens {
        if let Some(prev) = last_cy {
            if (token.cy - prev).abs() > tolerance {
                lines.push(join_line(&mut current));
            }
        }
        current.push(token);
        last_cy = Some(token.cy);
    }
    if !current.is_empty() {
        lines.push(join_line(&mut current));
    }

    tracing::debug!("Grouped {} fragments into {} lines", fragments.len(), lines.len());
    lines
}

/// Group fragments and run the result through the normalizer
pub fn cluster_lines(
    fragments: &[Fragment],
    score_min: f64,
    tolerance: f64,
    normalizer: &LineNormalizer<'_>,
) -> Vec<String> {
    normalizer.normalize(&group_lines(fragments, score_min, tolerance))
}

fn join_line(tokens: &mut Vec<Token<'_>>) -> String {
    tokens.sort_by(|a, b| a.x0.total_cmp(&b.x0));
    let line = tokens.iter().map(|t| t.text).collect::<Vec<_>>().join(" ");
    tokens.clear();
    line
}
