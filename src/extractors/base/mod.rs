// Base types shared by every extractor
//
// - types.rs: record shapes handed to the assembly layer
// - errors.rs: the three failure kinds of the checked constructors
// - options.rs: per-entry-point configuration

pub mod errors;
pub mod options;
pub mod types;

pub use errors::{ErrorKind, ExtractError};
pub use options::{CallOptions, ExtractOptions, FactsOptions, DEFAULT_MAX_DEPTH};
pub use types::{
    CallExtraction, CallKind, CallbackKind, CallbackRecord, ConformanceDeclaration,
    ConformanceSet, ContractSet, FunctionCall, FunctionId, FunctionSignature, ImplAnnotation,
    ImplTarget, Location, OverrideMarker, OverrideSource, SpecKind,
};
