//! Gallery engine: page fetching and effect execution.
mod decode;
mod engine;
mod fetch;
mod types;

pub use decode::{decode_page, DecodeError};
pub use engine::EngineHandle;
pub use fetch::{FetchSettings, PageSource, ReqwestPageSource};
pub use types::{
    EngineEvent, FailureKind, FetchError, ImagePage, ImageRecord, PageRequest, RequestId,
};
