//! Text preparation: punctuation normalization, WinAnsi encoding and
//! greedy line wrapping against the static metric tables.

use super::metrics::FontMetricTable;

/// Replaces typographic punctuation with plain ASCII. The standard Type1
/// fonts are addressed through WinAnsi, so everything we place goes through
/// here first.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' => out.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' => out.push('"'),
            '\u{2013}' | '\u{2014}' | '\u{2212}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            '\u{00A0}' => out.push(' '),
            other => out.push(other),
        }
    }
    out
}

/// Encodes sanitized text as WinAnsi bytes for a literal string operand.
/// Anything without a WinAnsi code point becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{2022}' => 0x95,
            '\u{20AC}' => 0x80,
            c if (c as u32) < 0x80 => c as u8,
            c if (0xA0..=0xFF).contains(&(c as u32)) => c as u8,
            _ => b'?',
        })
        .collect()
}

/// Greedy word wrap. Leading whitespace of `text` is kept on the first line
/// so nested list entries stay indented; words wider than the line are
/// broken by character.
pub fn wrap_text(
    text: &str,
    max_width_mm: f32,
    table: &FontMetricTable,
    size_pt: f32,
) -> Vec<String> {
    let body = text.trim_start();
    let indent = &text[..text.len() - body.len()];
    let space_w = table.measure_mm(" ", size_pt);

    let mut lines = Vec::new();
    let mut current = String::from(indent);
    let mut current_w = table.measure_mm(indent, size_pt);
    let mut has_word = false;

    for word in body.split_whitespace() {
        let word_w = table.measure_mm(word, size_pt);
        let gap = if has_word { space_w } else { 0.0 };

        if current_w + gap + word_w <= max_width_mm {
            if has_word {
                current.push(' ');
            }
            current.push_str(word);
            current_w += gap + word_w;
            has_word = true;
            continue;
        }

        if has_word {
            lines.push(std::mem::take(&mut current));
            current_w = 0.0;
            has_word = false;
        }

        if current_w + word_w <= max_width_mm {
            current.push_str(word);
            current_w += word_w;
            has_word = true;
            continue;
        }

        // Word does not fit on an empty line: break by character.
        for c in word.chars() {
            let mut buf = [0u8; 4];
            let c_w = table.measure_mm(c.encode_utf8(&mut buf), size_pt);
            if has_word && current_w + c_w > max_width_mm {
                lines.push(std::mem::take(&mut current));
                current_w = 0.0;
            }
            current.push(c);
            current_w += c_w;
            has_word = true;
        }
    }

    if has_word || lines.is_empty() {
        lines.push(current);
    }
    lines
}
