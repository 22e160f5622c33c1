//! One-page prescription rendering via `printpdf` builtin fonts.

use std::io::BufWriter;

use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::entities::medicine::MedicineRecord;
use crate::error::MedFinderError;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const TITLE: &str = "Doctor's Prescription";
const TITLE_PT: f32 = 16.0;
const BODY_PT: f32 = 12.0;
const WRAP_COLUMNS: usize = 80;

/// Structural content of the prescription, top to bottom. The first line is
/// the title, an empty line marks vertical spacing.
///
/// Split out of the PDF writer so the layout stays testable as plain text.
pub(crate) fn prescription_lines(medicine: &MedicineRecord) -> Vec<String> {
    let mut lines = vec![TITLE.to_string(), String::new()];
    lines.extend(wrap_text(
        &format!("Selected Medicine: {}", medicine.name),
        WRAP_COLUMNS,
    ));
    lines.push(format!("Brand: {}", medicine.brand));
    lines.push(format!("RxCUI Code: {}", medicine.code));
    lines
}

/// Renders exactly one medicine into a single-page A4 PDF byte stream.
pub(crate) fn prescription_pdf(medicine: &MedicineRecord) -> Result<Vec<u8>, MedFinderError> {
    let (doc, page, layer) = PdfDocument::new(
        TITLE,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let layer = doc.get_page(page).get_layer(layer);
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| MedFinderError::Pdf(format!("font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| MedFinderError::Pdf(format!("font error: {e}")))?;

    let mut y = Mm(PAGE_HEIGHT_MM - MARGIN_MM);
    let mut lines = prescription_lines(medicine).into_iter();

    if let Some(title) = lines.next() {
        layer.use_text(&title, TITLE_PT, Mm(centered_x(&title, TITLE_PT)), y, &bold);
        y -= Mm(6.0);
    }

    for line in lines {
        if line.is_empty() {
            y -= Mm(6.0);
            continue;
        }
        layer.use_text(&line, BODY_PT, Mm(MARGIN_MM), y, &font);
        y -= Mm(8.0);
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| MedFinderError::Pdf(format!("save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| MedFinderError::Pdf(format!("buffer error: {e}")))
}

/// Rough horizontal centering for builtin Helvetica: average glyph width is
/// close to half the point size.
fn centered_x(text: &str, size_pt: f32) -> f32 {
    const PT_TO_MM: f32 = 0.3528;
    let width_mm = text.chars().count() as f32 * size_pt * 0.5 * PT_TO_MM;
    ((PAGE_WIDTH_MM - width_mm) / 2.0).max(MARGIN_MM)
}

fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + word.len() + 1 > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
