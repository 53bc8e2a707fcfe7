mod colour;
pub use colour::*;

mod content;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

mod info;
pub use info::*;

/// Turning analysis text into positioned runs of text on report pages
pub mod layout;

mod outline;
pub use outline::*;

mod page;
pub use page::*;

/// Standard page sizes
pub mod pagesize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod report;
pub use report::*;

mod request;
pub use request::*;

/// Submitting résumés to the remote analysis service
#[cfg(feature = "service")]
pub mod service;

mod units;
pub use units::*;

/// Re-export PDF-writer functionality, mostly for custom [pdf_writer::Content] generation
pub use pdf_writer;
