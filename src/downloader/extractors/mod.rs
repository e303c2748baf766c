// Extractor module - the external video-extraction collaborator
//
// The rest of the crate only sees the `Extractor` trait: one metadata
// operation and one download operation. `CliExtractor` implements it on top
// of the yt-dlp binary; tests substitute an in-memory fake.

mod cli;
mod diagnostics;
mod traits;

pub use cli::{parse_formats_json, CliExtractor, OUTPUT_TEMPLATE};
pub use diagnostics::{diagnose_error, FailureReason};
pub use traits::{Extractor, ExtractorConfig};
