//! mhx core engine: decodes MHTML archives into typed resources, mines the
//! primary HTML document for scripts, and writes selected resources to disk.

pub mod config;
pub mod logging;

pub mod classify;
pub mod decoder;
pub mod extract;
pub mod fetch;
pub mod multipart;
pub mod naming;
pub mod resource;
pub mod scripts;
pub mod storage;

pub use decoder::{parse, DecodeError, Decoder};
pub use extract::{extract_resources, ExtractError};
pub use resource::{Origin, ParseResult, Resource};
