#![allow(dead_code)]

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use fund_receipt::{Account, ReceiptConfig, ReceiptRenderer, TransactionRecord};
use image::{Rgb, RgbImage};
use lopdf::{Document as LopdfDocument, Object};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let bytes = std::fs::read(path)?;
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// All text on the page, in drawing order.
    pub fn text(&self) -> String {
        self.doc.extract_text(&[1]).unwrap_or_default()
    }

    /// `(width, height)` from the first page's MediaBox.
    pub fn page_size(&self) -> (f32, f32) {
        let pages = self.doc.get_pages();
        let page = self.doc.get_dictionary(pages[&1]).expect("page dictionary");
        let media_box = page
            .get(b"MediaBox")
            .and_then(Object::as_array)
            .expect("MediaBox");
        (number(&media_box[2]), number(&media_box[3]))
    }

    pub fn image_count(&self) -> usize {
        self.doc
            .objects
            .values()
            .filter_map(|obj| match obj {
                Object::Stream(stream) => Some(&stream.dict),
                _ => None,
            })
            .filter(|dict| {
                dict.get(b"Subtype").and_then(Object::as_name).ok() == Some(b"Image".as_slice())
                    && dict.get(b"ColorSpace").and_then(Object::as_name).ok()
                        == Some(b"DeviceRGB".as_slice())
            })
            .count()
    }

    pub fn has_soft_mask(&self) -> bool {
        self.doc.objects.values().any(|obj| match obj {
            Object::Stream(stream) => stream.dict.has(b"SMask"),
            _ => false,
        })
    }
}

fn number(obj: &Object) -> f32 {
    match obj {
        Object::Integer(i) => *i as f32,
        Object::Real(r) => *r as f32,
        other => panic!("expected a number, got {other:?}"),
    }
}

/// Scratch output directory plus a logo on disk.
pub struct Fixture {
    pub output: TempDir,
    pub assets: TempDir,
    pub logo: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let output = tempfile::tempdir().expect("output dir");
        let assets = tempfile::tempdir().expect("assets dir");
        let logo = assets.path().join("logo.png");
        RgbImage::from_pixel(60, 40, Rgb([0, 70, 140]))
            .save(&logo)
            .expect("write logo");
        Self { output, assets, logo }
    }

    pub fn renderer(&self) -> ReceiptRenderer {
        ReceiptRenderer::new(ReceiptConfig::new(self.output.path(), &self.logo))
    }

    pub fn output_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.output.path())
            .expect("read output dir")
            .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    pub fn load(&self, file_name: &str) -> GeneratedPdf {
        GeneratedPdf::from_file(&self.output.path().join(file_name)).expect("load pdf")
    }
}

pub fn sample_record() -> TransactionRecord {
    TransactionRecord {
        reference_number: "AX123".to_string(),
        type_code: "2".to_string(),
        from_account: Account::new("001", "Alice"),
        to_account: Account::new("002", "Bob"),
        currency: "USD".to_string(),
        amount: "500.00".to_string(),
        narration: None,
        created_at: NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap(),
    }
}

pub fn at(hour: u32, minute: u32, second: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(2 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 6, 30, hour, minute, second)
        .unwrap()
}

/// `Fund_Transfer_<reference>_<12 digits>.pdf`
pub fn is_receipt_name(name: &str, reference: &str) -> bool {
    let prefix = format!("Fund_Transfer_{}_", reference);
    match name.strip_prefix(&prefix).and_then(|rest| rest.strip_suffix(".pdf")) {
        Some(stamp) => stamp.len() == 12 && stamp.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}
