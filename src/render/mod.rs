// src/render/mod.rs
use crate::error::RenderError;
use crate::layout::FitBox;
use crate::resource::RasterImage;
use std::io;

pub mod fonts;
pub mod pdf;

pub use fonts::{FontSpec, StandardFont};
pub use pdf::LopdfBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Right,
}

/// Handle to an image registered with [`DocumentBuilder::embed_image`],
/// carrying the size it was fitted to.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRef {
    pub(crate) name: String,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub font: FontSpec,
    pub align: HAlign,
}

impl TextLine {
    pub fn new(text: impl Into<String>, font: FontSpec, align: HAlign) -> Self {
        Self { text: text.into(), font, align }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    Image(ImageRef),
    /// Lines stacked top to bottom.
    Lines(Vec<TextLine>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub content: CellContent,
    pub align: HAlign,
}

/// Styling shared by every row of a two-column table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowStyle {
    pub font: FontSpec,
    pub height: f32,
    pub label_align: HAlign,
    pub value_align: HAlign,
}

/// Drawing primitives a receipt is assembled from.
///
/// Content flows top to bottom on a single page: every `add_*` call places
/// its content below the previous one. Nothing is ruled; cells and rows are
/// borderless.
pub trait DocumentBuilder {
    /// Starts the one page of the document. Must be called first.
    fn create_page(&mut self, width: f32, height: f32) -> Result<(), RenderError>;

    /// Registers an image scaled to fit `fit`, for later use in a cell.
    fn embed_image(&mut self, image: &RasterImage, fit: FitBox) -> Result<ImageRef, RenderError>;

    /// Adds a band of side-by-side cells. `widths` are relative weights, one
    /// per cell.
    fn add_block(&mut self, cells: &[Cell], widths: &[f32]) -> Result<(), RenderError>;

    /// Advances the flow by `height` units.
    fn add_spacer(&mut self, height: f32) -> Result<(), RenderError>;

    /// Adds one label/value row spanning the content width in two equal
    /// columns. Text wider than its column wraps, and the row grows by
    /// `style.height` per extra line.
    fn add_two_column_row(
        &mut self,
        label: &str,
        value: &str,
        style: &RowStyle,
    ) -> Result<(), RenderError>;

    /// Serializes the finished document into `writer`.
    fn finish<W: io::Write>(self, writer: W) -> Result<W, RenderError>
    where
        Self: Sized;
}
