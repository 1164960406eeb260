//! PDF rendering for generated artifacts.
//!
//! Pure transformation from artifact text to a byte stream: Times-Roman 12pt
//! on US letter with 1" margins, greedy word-wrap, paginated. Empty or
//! missing text renders a placeholder instead of failing.

use std::io::BufWriter;

use printpdf::{BuiltinFont, Mm, PdfDocument};
use thiserror::Error;

const PAGE_WIDTH_MM: f32 = 215.9;
const PAGE_HEIGHT_MM: f32 = 279.4;
const MARGIN_MM: f32 = 25.4;
const FONT_SIZE_PT: f32 = 12.0;
const LINE_HEIGHT_MM: f32 = 5.5;
/// Approximate character budget for 12pt Times on a 6.5" text column.
const MAX_CHARS_PER_LINE: usize = 90;

const PLACEHOLDER: &str = "No content found";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("pdf generation failed: {0}")]
    Pdf(String),
}

/// Renders artifact text into a single PDF byte buffer.
pub fn render_pdf(text: &str, title: &str) -> Result<Vec<u8>, RenderError> {
    let lines = layout_lines(text);

    let (doc, page, layer) = PdfDocument::new(
        title,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::TimesRoman)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    let lines_per_page =
        ((PAGE_HEIGHT_MM - 2.0 * MARGIN_MM) / LINE_HEIGHT_MM).floor().max(1.0) as usize;

    let mut current_layer = doc.get_page(page).get_layer(layer);
    let mut line_on_page = 0usize;

    for line in &lines {
        if line_on_page == lines_per_page {
            let (next_page, next_layer) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            current_layer = doc.get_page(next_page).get_layer(next_layer);
            line_on_page = 0;
        }
        if !line.is_empty() {
            let y = PAGE_HEIGHT_MM - MARGIN_MM - (line_on_page as f32) * LINE_HEIGHT_MM;
            current_layer.use_text(line.clone(), FONT_SIZE_PT, Mm(MARGIN_MM), Mm(y), &font);
        }
        line_on_page += 1;
    }

    let mut bytes = Vec::new();
    doc.save(&mut BufWriter::new(&mut bytes))
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    Ok(bytes)
}

/// Normalizes line endings and word-wraps the text into printable lines.
fn layout_lines(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let source = if normalized.trim().is_empty() {
        PLACEHOLDER
    } else {
        normalized.as_str()
    };

    let mut lines = Vec::new();
    for paragraph in source.split('\n') {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        lines.extend(wrap_line(paragraph.trim_end(), MAX_CHARS_PER_LINE));
    }
    lines
}

/// Greedy word-wrap by character count. Words longer than the budget are
/// hard-split so a single token can never overflow the page.
fn wrap_line(line: &str, max_chars: usize) -> Vec<String> {
    let mut wrapped = Vec::new();
    let mut current = String::new();

    for word in line.split_whitespace() {
        for chunk in split_long_word(word, max_chars) {
            let needed = if current.is_empty() {
                chunk.chars().count()
            } else {
                current.chars().count() + 1 + chunk.chars().count()
            };
            if needed > max_chars && !current.is_empty() {
                wrapped.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&chunk);
        }
    }

    if !current.is_empty() {
        wrapped.push(current);
    }
    if wrapped.is_empty() {
        wrapped.push(String::new());
    }
    wrapped
}

fn split_long_word(word: &str, max_chars: usize) -> Vec<String> {
    if word.chars().count() <= max_chars {
        return vec![word.to_string()];
    }
    word.chars()
        .collect::<Vec<_>>()
        .chunks(max_chars)
        .map(|chunk| chunk.iter().collect())
        .collect()
}
