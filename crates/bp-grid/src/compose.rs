//! Post-processing shared by the encoders: row joining, frames and fades.

/// Vertical fade applied to the solid block, top to bottom.
pub const FADE_LEVELS: &[&str] = &["█", "▓", "▒", "░", " "];

/// Pool for [`scatter_gradient`].
pub const SCATTER_CHARS: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Join rows with `\n`, trimming trailing whitespace per row and at the end.
///
/// # Example
/// ```
/// use bp_grid::compose::join_rows;
/// let rows = vec!["ab  ".to_string(), "c".to_string(), "   ".to_string()];
/// assert_eq!(join_rows(&rows), "ab\nc");
/// ```
#[must_use]
pub fn join_rows(rows: &[String]) -> String {
    let joined = rows
        .iter()
        .map(|r| r.trim_end())
        .collect::<Vec<_>>()
        .join("\n");
    joined.trim_end().to_string()
}

fn width(line: &str) -> usize {
    line.chars().count()
}

/// Frame `text` with `symbol`.
///
/// The top and bottom lines are `symbol` repeated `max_width + 4` times.
/// Each interior line is right-padded to `max_width` and wrapped in
/// `symbol + ' '` / `' ' + symbol`.
///
/// # Example
/// ```
/// use bp_grid::compose::add_border;
/// assert_eq!(add_border("ab\nc", "#"), "######\n# ab #\n# c  #\n######");
/// ```
#[must_use]
pub fn add_border(text: &str, symbol: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let max_width = lines.iter().map(|l| width(l)).max().unwrap_or(0);
    let edge = symbol.repeat(max_width + 4);

    let mut out = Vec::with_capacity(lines.len() + 2);
    out.push(edge.clone());
    for line in lines {
        let pad = " ".repeat(max_width - width(line));
        out.push(format!("{symbol} {line}{pad} {symbol}"));
    }
    out.push(edge);
    out.join("\n")
}

/// Remove one frame added by [`add_border`]. Padding is trimmed from the
/// right of each interior line.
///
/// Returns `None` when `text` is not framed by `symbol`.
///
/// # Example
/// ```
/// use bp_grid::compose::{add_border, strip_border};
/// let framed = add_border("ab\nc", "#");
/// assert_eq!(strip_border(&framed, "#").as_deref(), Some("ab\nc"));
/// assert_eq!(strip_border("plain", "#"), None);
/// ```
#[must_use]
pub fn strip_border(text: &str, symbol: &str) -> Option<String> {
    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() < 3 || symbol.is_empty() {
        return None;
    }
    let is_edge = |l: &str| !l.is_empty() && l.replace(symbol, "").is_empty();
    if !is_edge(lines[0]) || !is_edge(lines[lines.len() - 1]) {
        return None;
    }

    let mut inner = Vec::with_capacity(lines.len() - 2);
    for line in &lines[1..lines.len() - 1] {
        let body = line
            .strip_prefix(symbol)?
            .strip_prefix(' ')?
            .strip_suffix(symbol)?
            .strip_suffix(' ')?;
        inner.push(body.trim_end_matches(' '));
    }
    Some(inner.join("\n"))
}

/// Deterministic top-to-bottom fade.
///
/// Line `i` of `n` replaces every `solid` with
/// `levels[floor(i / n · (levels.len() − 1))]`.
///
/// # Example
/// ```
/// use bp_grid::compose::{FADE_LEVELS, apply_gradient};
/// let faded = apply_gradient("██\n██\n██\n██", "█", FADE_LEVELS);
/// assert_eq!(faded, "██\n▓▓\n▒▒\n░░");
/// ```
#[must_use]
pub fn apply_gradient(text: &str, solid: &str, levels: &[&str]) -> String {
    if levels.is_empty() || solid.is_empty() {
        return text.to_string();
    }
    let lines: Vec<&str> = text.split('\n').collect();
    let total = lines.len();
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let bucket = (i * (levels.len() - 1) / total).min(levels.len() - 1);
            line.replace(solid, levels[bucket])
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Decorative scatter: every non-whitespace character becomes a random pick
/// from `chars`. Whitespace and line breaks are kept.
///
/// NON-DETERMINISTIC unless `rng` was seeded. Only used when the caller opts
/// in with the `scatter` flag.
///
/// # Example
/// ```
/// use bp_grid::compose::{SCATTER_CHARS, scatter_gradient};
/// let mut rng = fastrand::Rng::with_seed(7);
/// let out = scatter_gradient("██ █\n█", SCATTER_CHARS, &mut rng);
/// assert_eq!(out.chars().nth(2), Some(' '));
/// assert_eq!(out.lines().count(), 2);
/// ```
#[must_use]
pub fn scatter_gradient(text: &str, chars: &[char], rng: &mut fastrand::Rng) -> String {
    if chars.is_empty() {
        return text.to_string();
    }
    text.chars()
        .map(|c| {
            if c.is_whitespace() {
                c
            } else {
                chars[rng.usize(..chars.len())]
            }
        })
        .collect()
}
