//! Brain-dump analysis: prompt, tolerant reply parsing and fallback.
//!
//! The flow for one request:
//!
//! ```text
//! brain dump ──build_prompt──► provider ──reply──► parse_analysis_response ──► AnalysisResult
//!                                 │ error                    │ unrecoverable
//!                                 └──────────► fallback_analysis ◄┘
//! ```
//!
//! Everything here is synchronous and pure apart from the date stamped into
//! the fallback calendar event.

pub mod extraction;
pub mod fallback;
pub mod prompt;
pub mod types;

pub use extraction::{RecoveryError, parse_analysis_response, recover_analysis};
pub use fallback::{fallback_analysis, fallback_analysis_on};
pub use prompt::{Prompt, build_prompt};
pub use types::{AnalysisResult, CalendarEvent};
