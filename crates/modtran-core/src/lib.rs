//! Fixed-width codec for the MODTRAN4 control file and scanned report.
//!
//! The crate covers the two textual ends of a remote simulator run: the
//! [`tape5`] encoder renders a validated parameter set into the card-based
//! control file, and the [`tape7`] decoder slices the fixed-column report
//! back into numeric columns. Shipping the text to the simulator and back
//! is the caller's concern; both halves here are pure functions over
//! in-memory text.

pub mod domain;
pub mod format;
pub mod tape5;
pub mod tape7;

pub use domain::{
    ErrorCategory, FixedSettings, ModtranError, ModtranResult, SurfaceReflectance, Tape5Config,
};
pub use format::PrecisionWarning;
pub use tape5::{Tape5Document, encode};
pub use tape7::{ReportColumn, ScanReport, parse_report};
