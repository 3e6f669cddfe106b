// PDF output via printpdf
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::{
    BuiltinFont, Color, Line, Mm, PdfDocument, PdfLayerReference, Point, Rgb as PdfRgb,
};
use tracing::info;

use crate::error::{DocumentError, DocumentResult};
use crate::layout::{Element, Layout, Rgb, Weight, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};

fn color(rgb: Rgb) -> Color {
    let Rgb(r, g, b) = rgb;
    Color::Rgb(PdfRgb::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        None,
    ))
}

/// Layout coordinates run from the top edge, PDF coordinates from the bottom
fn flip(y: f32) -> Mm {
    Mm(PAGE_HEIGHT_MM - y)
}

fn stroke(layer: &PdfLayerReference, points: &[(f32, f32)], closed: bool) {
    layer.add_line(Line {
        points: points
            .iter()
            .map(|&(x, y)| (Point::new(Mm(x), flip(y)), false))
            .collect(),
        is_closed: closed,
    });
}

/// Render `layout` to PDF bytes
pub fn render(layout: &Layout) -> DocumentResult<Vec<u8>> {
    let (doc, page1, layer1) = PdfDocument::new(
        &layout.title,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let layer = doc.get_page(page1).get_layer(layer1);
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| DocumentError::Font(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| DocumentError::Font(e.to_string()))?;

    for element in &layout.elements {
        match element {
            Element::Text {
                text,
                size,
                x,
                y,
                weight,
                color: rgb,
            } => {
                layer.set_fill_color(color(*rgb));
                let face = match weight {
                    Weight::Regular => &font,
                    Weight::Bold => &bold,
                };
                layer.use_text(text.as_str(), *size, Mm(*x), flip(*y), face);
            }
            Element::Rule { x1, x2, y, thickness } => {
                layer.set_outline_color(color(Rgb::BLACK));
                layer.set_outline_thickness(*thickness);
                stroke(&layer, &[(*x1, *y), (*x2, *y)], false);
            }
            Element::Frame {
                x,
                y,
                width,
                height,
                color: rgb,
            } => {
                layer.set_outline_color(color(*rgb));
                layer.set_outline_thickness(0.5);
                stroke(
                    &layer,
                    &[
                        (*x, *y),
                        (x + width, *y),
                        (x + width, y + height),
                        (*x, y + height),
                    ],
                    true,
                );
            }
        }
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| DocumentError::Save(e.to_string()))?;
    buf.into_inner()
        .map_err(|e| DocumentError::Save(e.to_string()))
}

/// Write `bytes` as `file_name` under `dir`, creating the directory if needed
pub fn export(dir: &Path, file_name: &str, bytes: &[u8]) -> DocumentResult<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    std::fs::write(&path, bytes)?;
    info!(path = %path.display(), size = bytes.len(), "Document exported");
    Ok(path)
}
