//! Client code for codefetch.
//!
//! This crate provides the code extraction pipeline, the candidate fallback
//! driver, the HTTP fetch client and the SerpAPI search client shared by the
//! server surfaces.

pub mod extract;
pub mod fetch;
pub mod resolve;
pub mod serp;

pub use extract::{
    BlockOrigin, CleanBlock, CodeExtractor, ExtractConfig, Extractor, RawBlock, aggregate, extract_code,
    looks_like_code, normalize, scan,
};

pub use fetch::{FetchClient, FetchConfig, FetchResponse, PageFetcher};
pub use resolve::{AttemptOutcome, CandidateAttempt, CandidateResolver, ExtractionResult, ResolveConfig};
pub use serp::{CandidateSource, SearchOutcome, SerpClient, SerpConfig, SerpError, SerpMeta};
