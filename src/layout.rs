//! Page geometry for a receipt.
//!
//! The page is a single custom-sized sheet: A4 wide, and exactly as tall as
//! the header plus the details rows need. The height is always derived from
//! the number of rows actually emitted, so the two can never drift apart.

/// A4 portrait width in points.
pub const A4_WIDTH: f32 = 595.0;

pub const ROW_HEIGHT: f32 = 20.0;
pub const LOGO_BLOCK_HEIGHT: f32 = 100.0;
pub const HEADER_BLOCK_HEIGHT: f32 = 40.0;
pub const PAGE_MARGIN: f32 = 50.0;

/// Logo bounding box; the image is scaled to fit, keeping its aspect ratio.
pub const LOGO_FIT_BOX: FitBox = FitBox { width: 150.0, height: 100.0 };

/// Inset between the page edge and the content flow.
pub const CONTENT_INSET: f32 = 36.0;

/// Inner padding of every table cell.
pub const CELL_PADDING: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutPlan {
    pub page_width: f32,
    pub page_height: f32,
    pub row_height: f32,
    pub row_count: usize,
}

impl LayoutPlan {
    pub fn for_rows(row_count: usize) -> Self {
        let page_height = LOGO_BLOCK_HEIGHT
            + HEADER_BLOCK_HEIGHT
            + row_count as f32 * ROW_HEIGHT
            + PAGE_MARGIN;
        Self {
            page_width: A4_WIDTH,
            page_height,
            row_height: ROW_HEIGHT,
            row_count,
        }
    }

    /// Width available to content between the left and right insets.
    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * CONTENT_INSET
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitBox {
    pub width: f32,
    pub height: f32,
}

impl FitBox {
    /// Scales `(width, height)` down or up so it fits inside the box with the
    /// aspect ratio kept.
    pub fn fit(&self, width: f32, height: f32) -> (f32, f32) {
        if width <= 0.0 || height <= 0.0 {
            return (0.0, 0.0);
        }
        let scale = (self.width / width).min(self.height / height);
        (width * scale, height * scale)
    }

    pub fn narrowed_to(&self, max_width: f32) -> FitBox {
        FitBox { width: self.width.min(max_width), height: self.height }
    }
}
