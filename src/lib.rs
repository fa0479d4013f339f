//! Single-page PDF receipts for completed fund transfers.
//!
//! ```ignore
//! let renderer = ReceiptRenderer::new(ReceiptConfig::from_env()?);
//! let receipt = renderer.render(&record, &TransferStatus::new("SUCCESS"))?;
//! println!("{}", receipt.file_name);
//! ```

pub mod config;
pub mod error;
pub mod layout;
pub mod model;
pub mod receipt;
pub mod render;
pub mod resource;

pub use config::{PartialConfig, ReceiptConfig};
pub use error::{AssetError, ConfigError, ReceiptError, RenderError};
pub use layout::LayoutPlan;
pub use model::{
    Account, RenderedReceipt, TransactionRecord, TransactionType, TransferStatus,
    transaction_type_label,
};
pub use receipt::{ReceiptDocument, ReceiptRenderer, receipt_file_name, render};
