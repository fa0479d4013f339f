//! Receipt assembly and the render entry points.
//!
//! A render call goes through two phases:
//! 1. **Layout sizing**: the details rows are assembled first and the page
//!    geometry is derived from how many there are.
//! 2. **Content assembly**: the header band (logo, timestamp, title) and the
//!    details table are handed to a [`DocumentBuilder`], and the finished PDF
//!    is committed to the output directory.
//!
//! The document is built entirely in memory and only then persisted, so an
//! asset or render failure never creates a file at the target path.

use crate::config::ReceiptConfig;
use crate::error::{ReceiptError, RenderError};
use crate::layout::{CELL_PADDING, LOGO_FIT_BOX, LayoutPlan};
use crate::model::{RenderedReceipt, TransactionRecord, TransferStatus, transaction_type_label};
use crate::render::{
    Cell, CellContent, DocumentBuilder, FontSpec, HAlign, LopdfBuilder, RowStyle,
    StandardFont, TextLine,
};
use crate::resource::RasterImage;
use chrono::{DateTime, FixedOffset, Local};
use std::io::Write;
use std::path::Path;

pub const RECEIPT_TITLE: &str = "Payment Receipt";
pub const FILE_PREFIX: &str = "Fund_Transfer";
pub const NARRATION_PLACEHOLDER: &str = "N/A";
pub const DETAIL_ROW_COUNT: usize = 10;

const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M";
const HEADER_TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %:z %Y";
const TRANSACTION_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub const TITLE_FONT: FontSpec = FontSpec::new(StandardFont::TimesBold, 20.0);
pub const DATE_FONT: FontSpec = FontSpec::new(StandardFont::HelveticaBold, 10.0);
pub const DETAIL_FONT: FontSpec = FontSpec::new(StandardFont::Courier, 13.0);

/// Logo column to text column.
const HEADER_COLUMN_WIDTHS: [f32; 2] = [1.0, 4.0];
const DETAILS_SPACING_BEFORE: f32 = 20.0;

/// `Fund_Transfer_<reference>_<YYYYMMDDhhmm>.pdf`
///
/// Minute resolution: two receipts for the same reference within one minute
/// share a name, and the later one replaces the earlier.
pub fn receipt_file_name(reference_number: &str, now: &DateTime<FixedOffset>) -> String {
    format!(
        "{}_{}_{}.pdf",
        FILE_PREFIX,
        reference_number,
        now.format(FILE_TIMESTAMP_FORMAT)
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    /// Empty for continuation rows (account labels).
    pub label: &'static str,
    pub value: String,
}

impl DetailRow {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self { label, value: value.into() }
    }

    /// The label as printed, with its trailing colon.
    pub fn display_label(&self) -> String {
        if self.label.is_empty() {
            String::new()
        } else {
            format!("{}:", self.label)
        }
    }
}

/// The ten rows of the details table, in print order.
pub fn detail_rows(
    record: &TransactionRecord,
    status: &TransferStatus,
) -> [DetailRow; DETAIL_ROW_COUNT] {
    let narration = record
        .narration
        .clone()
        .unwrap_or_else(|| NARRATION_PLACEHOLDER.to_string());
    [
        DetailRow::new("Aux No", record.reference_number.as_str()),
        DetailRow::new("Transaction Type", transaction_type_label(&record.type_code)),
        DetailRow::new("From Account", record.from_account.id.as_str()),
        DetailRow::new("", record.from_account.label.as_str()),
        DetailRow::new("To Account", record.to_account.id.as_str()),
        DetailRow::new("", record.to_account.label.as_str()),
        DetailRow::new(
            "Transaction Amount",
            format!("{}_{}", record.currency, record.amount),
        ),
        DetailRow::new("Narration", narration),
        DetailRow::new(
            "Transaction Date",
            record.created_at.format(TRANSACTION_DATE_FORMAT).to_string(),
        ),
        DetailRow::new("Fund Transfer Status", status.message.as_str()),
    ]
}

/// Everything printed on a receipt, independent of the output backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptDocument {
    pub timestamp: String,
    pub title: &'static str,
    pub details: [DetailRow; DETAIL_ROW_COUNT],
}

impl ReceiptDocument {
    pub fn assemble(
        record: &TransactionRecord,
        status: &TransferStatus,
        now: &DateTime<FixedOffset>,
    ) -> Self {
        Self {
            timestamp: now.format(HEADER_TIMESTAMP_FORMAT).to_string(),
            title: RECEIPT_TITLE,
            details: detail_rows(record, status),
        }
    }

    pub fn layout_plan(&self) -> LayoutPlan {
        LayoutPlan::for_rows(self.details.len())
    }

    /// Emits the page, header band and details table into `builder`.
    pub fn draw<B: DocumentBuilder>(
        &self,
        builder: &mut B,
        logo: &RasterImage,
    ) -> Result<LayoutPlan, RenderError> {
        let plan = self.layout_plan();
        builder.create_page(plan.page_width, plan.page_height)?;

        let weights: f32 = HEADER_COLUMN_WIDTHS.iter().sum();
        let logo_column = plan.content_width() * HEADER_COLUMN_WIDTHS[0] / weights;
        let logo_ref =
            builder.embed_image(logo, LOGO_FIT_BOX.narrowed_to(logo_column - 2.0 * CELL_PADDING))?;

        let header = [
            Cell { content: CellContent::Image(logo_ref), align: HAlign::Left },
            Cell {
                content: CellContent::Lines(vec![
                    TextLine::new(self.timestamp.as_str(), DATE_FONT, HAlign::Right),
                    TextLine::new(self.title, TITLE_FONT, HAlign::Right),
                ]),
                align: HAlign::Right,
            },
        ];
        builder.add_block(&header, &HEADER_COLUMN_WIDTHS)?;

        builder.add_spacer(DETAILS_SPACING_BEFORE)?;
        let style = RowStyle {
            font: DETAIL_FONT,
            height: plan.row_height,
            label_align: HAlign::Left,
            value_align: HAlign::Right,
        };
        for row in &self.details {
            builder.add_two_column_row(&row.display_label(), &row.value, &style)?;
        }
        Ok(plan)
    }
}

/// Renders receipts into a configured output directory.
#[derive(Debug, Clone)]
pub struct ReceiptRenderer {
    config: ReceiptConfig,
}

impl ReceiptRenderer {
    pub fn new(config: ReceiptConfig) -> Self {
        Self { config }
    }

    pub fn render(
        &self,
        record: &TransactionRecord,
        status: &TransferStatus,
    ) -> Result<RenderedReceipt, ReceiptError> {
        self.render_at(record, status, Local::now().fixed_offset())
    }

    /// Like [`render`](Self::render), with the clock reading supplied.
    pub fn render_at(
        &self,
        record: &TransactionRecord,
        status: &TransferStatus,
        now: DateTime<FixedOffset>,
    ) -> Result<RenderedReceipt, ReceiptError> {
        let file_name = receipt_file_name(&record.reference_number, &now);
        let target = self.config.output_dir.join(&file_name);
        log::info!("Receipt output path: {}", target.display());

        let logo = RasterImage::load(&self.config.logo_path)?;
        let document = ReceiptDocument::assemble(record, status, &now);

        let mut builder =
            LopdfBuilder::new(format!("{} {}", RECEIPT_TITLE, record.reference_number));
        let plan = document.draw(&mut builder, &logo)?;
        log::debug!(
            "Laid out {} rows on a {}x{} page",
            plan.row_count, plan.page_width, plan.page_height
        );
        let bytes = builder.finish(Vec::new())?;

        persist(&self.config.output_dir, &target, &bytes)?;
        log::info!("Generated receipt {}", file_name);
        Ok(RenderedReceipt { file_name })
    }
}

/// One-shot render without holding a [`ReceiptRenderer`].
pub fn render(
    record: &TransactionRecord,
    status: &TransferStatus,
    output_dir: impl AsRef<Path>,
    logo_asset_path: impl AsRef<Path>,
) -> Result<RenderedReceipt, ReceiptError> {
    ReceiptRenderer::new(ReceiptConfig::new(output_dir, logo_asset_path)).render(record, status)
}

/// Writes into a temporary sibling and renames it over `target`, so the
/// target is either absent, the previous file, or complete.
fn persist(dir: &Path, target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut tmp = tempfile::Builder::new()
        .prefix(".receipt-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(target).map_err(|e| e.error)?;
    Ok(())
}
