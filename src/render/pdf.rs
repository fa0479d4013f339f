// src/render/pdf.rs
//! A single-page `DocumentBuilder` on top of `lopdf`.
//!
//! Text is drawn with the PDF standard Type 1 fonts, so nothing has to be
//! embedded apart from the images registered through `embed_image`.

use super::fonts::{self, FontSpec, StandardFont};
use super::{Cell, CellContent, DocumentBuilder, HAlign, ImageRef, RowStyle, TextLine};
use crate::error::RenderError;
use crate::layout::{CELL_PADDING, CONTENT_INSET, FitBox};
use crate::resource::RasterImage;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use std::io;

/// Line box height of stacked text, as a multiple of the font size.
const LEADING: f32 = 1.5;

pub struct LopdfBuilder {
    document: Document,
    title: String,
    page: Option<PageContext>,
    images: Vec<(String, ObjectId)>,
}

impl LopdfBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            document: Document::with_version("1.7"),
            title: title.into(),
            page: None,
            images: Vec::new(),
        }
    }

    fn page_mut(&mut self) -> Result<&mut PageContext, RenderError> {
        self.page
            .as_mut()
            .ok_or_else(|| RenderError::Other("Page not created".into()))
    }
}

impl DocumentBuilder for LopdfBuilder {
    fn create_page(&mut self, width: f32, height: f32) -> Result<(), RenderError> {
        if self.page.is_some() {
            return Err(RenderError::Other("Receipts have exactly one page".into()));
        }
        if width <= 2.0 * CONTENT_INSET || height <= 0.0 {
            return Err(RenderError::Other(format!(
                "Invalid page size {}x{}",
                width, height
            )));
        }
        self.page = Some(PageContext::new(width, height));
        Ok(())
    }

    fn embed_image(&mut self, image: &RasterImage, fit: FitBox) -> Result<ImageRef, RenderError> {
        let expected = image.width as usize * image.height as usize;
        if expected == 0 || image.rgb.len() != expected * 3 {
            return Err(RenderError::Other(format!(
                "Image data does not match its {}x{} dimensions",
                image.width, image.height
            )));
        }

        let mut dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => Object::Integer(image.width as i64),
            "Height" => Object::Integer(image.height as i64),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => Object::Integer(8),
        };
        if let Some(alpha) = &image.alpha {
            let smask = dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => Object::Integer(image.width as i64),
                "Height" => Object::Integer(image.height as i64),
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => Object::Integer(8),
            };
            let smask_id = self.document.add_object(Stream::new(smask, alpha.clone()));
            dict.set("SMask", smask_id);
        }
        let id = self.document.add_object(Stream::new(dict, image.rgb.clone()));

        let (width, height) = fit.fit(image.width as f32, image.height as f32);
        log::debug!(
            "Embedded {}x{} image scaled to {:.1}x{:.1}",
            image.width, image.height, width, height
        );
        let name = format!("Im{}", self.images.len() + 1);
        self.images.push((name.clone(), id));
        Ok(ImageRef { name, width, height })
    }

    fn add_block(&mut self, cells: &[Cell], widths: &[f32]) -> Result<(), RenderError> {
        let total: f32 = widths.iter().sum();
        if cells.len() != widths.len() || total <= 0.0 {
            return Err(RenderError::Other(format!(
                "Block has {} cells but {} column widths",
                cells.len(),
                widths.len()
            )));
        }
        let page = self.page_mut()?;
        let content_width = page.content_width();
        let height = cells.iter().map(cell_height).fold(0.0_f32, f32::max);
        let top = page.reserve(height)?;

        let mut x = CONTENT_INSET;
        for (cell, weight) in cells.iter().zip(widths) {
            let cell_width = content_width * weight / total;
            let left = x + CELL_PADDING;
            let right = x + cell_width - CELL_PADDING;
            match &cell.content {
                CellContent::Image(image) => {
                    let ix = aligned_x(cell.align, left, right, image.width);
                    page.draw_image(image, ix, top + CELL_PADDING);
                }
                CellContent::Lines(lines) => {
                    let mut line_top = top + CELL_PADDING;
                    for line in lines {
                        let line_height = line.font.size * LEADING;
                        let text_top = line_top + (line_height - line.font.size) / 2.0;
                        page.draw_text(line, left, right, text_top);
                        line_top += line_height;
                    }
                }
            }
            x += cell_width;
        }
        Ok(())
    }

    fn add_spacer(&mut self, height: f32) -> Result<(), RenderError> {
        self.page_mut()?.reserve(height)?;
        Ok(())
    }

    fn add_two_column_row(
        &mut self,
        label: &str,
        value: &str,
        style: &RowStyle,
    ) -> Result<(), RenderError> {
        let page = self.page_mut()?;
        let column_width = page.content_width() / 2.0;
        let inner_width = column_width - 2.0 * CELL_PADDING;
        let columns = [
            (CONTENT_INSET, wrap(label, style.font, inner_width), style.label_align),
            (CONTENT_INSET + column_width, wrap(value, style.font, inner_width), style.value_align),
        ];
        let line_count = columns.iter().map(|(_, lines, _)| lines.len()).max().unwrap_or(0).max(1);
        if line_count > 1 {
            log::debug!("Row {:?} wraps onto {} lines", label, line_count);
        }

        let top = page.reserve(style.height * line_count as f32)?;
        let first_text_top = top + (style.height - style.font.size) / 2.0;
        for (x, lines, align) in columns {
            for (i, text) in lines.into_iter().enumerate() {
                let line = TextLine::new(text, style.font, align);
                let text_top = first_text_top + i as f32 * style.height;
                page.draw_text(&line, x + CELL_PADDING, x + column_width - CELL_PADDING, text_top);
            }
        }
        Ok(())
    }

    fn finish<W: io::Write>(mut self, mut writer: W) -> Result<W, RenderError> {
        let page = self
            .page
            .take()
            .ok_or_else(|| RenderError::Other("Document has no page".into()))?;

        let content_id = self
            .document
            .add_object(Stream::new(dictionary! {}, page.content.encode()?));

        let mut fonts = Dictionary::new();
        for face in StandardFont::ALL {
            fonts.set(
                face.resource_name(),
                dictionary! {
                    "Type" => "Font",
                    "Subtype" => "Type1",
                    "BaseFont" => face.base_font(),
                    "Encoding" => "WinAnsiEncoding",
                },
            );
        }
        let mut resources = dictionary! { "Font" => fonts };
        if !self.images.is_empty() {
            let mut xobjects = Dictionary::new();
            for (name, id) in &self.images {
                xobjects.set(name.as_str(), *id);
            }
            resources.set("XObject", xobjects);
        }
        let resources_id = self.document.add_object(resources);

        let pages_id = self.document.new_object_id();
        let page_id = self.document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::from(page.width),
                Object::from(page.height),
            ],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        self.document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_id)],
                "Count" => Object::Integer(1),
            }),
        );
        let catalog_id = self.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = self.document.add_object(dictionary! {
            "Title" => Object::string_literal(self.title.as_str()),
            "Producer" => Object::string_literal(concat!("fund-receipt ", env!("CARGO_PKG_VERSION"))),
        });
        self.document.trailer.set("Root", catalog_id);
        self.document.trailer.set("Info", info_id);

        self.document.compress();
        self.document.save_to(&mut writer)?;
        Ok(writer)
    }
}

fn cell_height(cell: &Cell) -> f32 {
    let inner = match &cell.content {
        CellContent::Image(image) => image.height,
        CellContent::Lines(lines) => lines.iter().map(|l| l.font.size * LEADING).sum(),
    };
    inner + 2.0 * CELL_PADDING
}

/// Breaks `text` into lines no wider than `max_width`, at spaces where
/// possible and inside a word only when the word alone is too wide. Text that
/// already fits is returned untouched.
fn wrap(text: &str, font: FontSpec, max_width: f32) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    if font.width_of(text) <= max_width {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if font.width_of(&candidate) <= max_width {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        for c in word.chars() {
            current.push(c);
            if font.width_of(&current) > max_width && current.chars().count() > 1 {
                current.pop();
                lines.push(std::mem::replace(&mut current, c.to_string()));
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn aligned_x(align: HAlign, left: f32, right: f32, width: f32) -> f32 {
    match align {
        HAlign::Left => left,
        HAlign::Right => right - width,
    }
}

// --- Internal Page Drawing Context ---

struct PageContext {
    width: f32,
    height: f32,
    /// Distance from the top edge to the next free line of the flow.
    cursor: f32,
    content: Content,
    state: TextState,
}

#[derive(Default, Clone, PartialEq)]
struct TextState {
    font_name: String,
    font_size: f32,
}

impl PageContext {
    fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            cursor: CONTENT_INSET,
            content: Content { operations: vec![] },
            state: TextState::default(),
        }
    }

    fn content_width(&self) -> f32 {
        self.width - 2.0 * CONTENT_INSET
    }

    /// Claims `needed` units of the flow and returns the top of the claimed
    /// band.
    fn reserve(&mut self, needed: f32) -> Result<f32, RenderError> {
        if self.cursor + needed > self.height {
            return Err(RenderError::PageOverflow { cursor: self.cursor, needed });
        }
        let top = self.cursor;
        self.cursor += needed;
        Ok(top)
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn set_font(&mut self, face: StandardFont, size: f32) {
        let name = face.resource_name();
        if self.state.font_name != name || self.state.font_size != size {
            self.push(
                "Tf",
                vec![Object::Name(name.as_bytes().to_vec()), Object::from(size)],
            );
            self.state.font_name = name.to_string();
            self.state.font_size = size;
        }
    }

    /// Draws one line between `left` and `right`, its glyph box starting at
    /// `top`.
    fn draw_text(&mut self, line: &TextLine, left: f32, right: f32, top: f32) {
        if line.text.trim().is_empty() {
            return;
        }
        let x = aligned_x(line.align, left, right, line.font.width_of(&line.text));
        let baseline_y = top + line.font.size * 0.8;
        let pdf_y = self.height - baseline_y;

        self.push("BT", vec![]);
        self.set_font(line.font.face, line.font.size);
        self.push("Td", vec![Object::from(x), Object::from(pdf_y)]);
        self.push(
            "Tj",
            vec![Object::String(to_win_ansi(&line.text), StringFormat::Literal)],
        );
        self.push("ET", vec![]);
    }

    fn draw_image(&mut self, image: &ImageRef, x: f32, top: f32) {
        let y = self.height - (top + image.height);
        self.push("q", vec![]);
        self.push(
            "cm",
            vec![
                Object::from(image.width),
                Object::Integer(0),
                Object::Integer(0),
                Object::from(image.height),
                Object::from(x),
                Object::from(y),
            ],
        );
        self.push("Do", vec![Object::Name(image.name.as_bytes().to_vec())]);
        self.push("Q", vec![]);
    }
}

fn to_win_ansi(s: &str) -> Vec<u8> {
    if s.chars().any(|c| fonts::win_ansi_code(c).is_none()) {
        log::warn!("Replacing characters outside WinAnsi in {:?}", s);
    }
    fonts::encode_win_ansi(s)
}
