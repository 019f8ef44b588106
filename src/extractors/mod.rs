//! Semantic fact extractors
//!
//! Pure functions over a borrowed quoted tree (see `crate::ast`). Each extractor
//! walks a module body once and returns freshly allocated records; none of them
//! hold state between calls, so they are safe to run on many trees at once.
//!
//! # Architecture
//!
//! - `base` - record types, options and errors shared by every extractor
//! - `classifier` - closed node classification and the exclusion tables
//! - `signatures` - `@spec`/`@callback` decomposition and union flattening
//! - `behaviour` - contracts a module declares (callbacks, docs, optionals)
//! - `conformance` - contracts a module fulfils (`@behaviour`, definitions)
//! - `calls` - depth-bounded call-site walk
//! - `manager` - whole-module and batch entry points

pub mod base;
pub mod behaviour;
pub mod calls;
pub mod classifier;
pub mod conformance;
pub mod manager;
pub mod signatures;

pub use behaviour::{defines_behaviour, extract_contracts};
pub use calls::{extract_calls, extract_calls_from, extract_calls_with_report};
pub use conformance::{definition_ids, extract_conformance};
pub use manager::{extract_batch, extract_file, extract_module, ModuleFacts};
pub use signatures::{extract_signatures, find_signature, flatten_union};
