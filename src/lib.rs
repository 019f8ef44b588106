// Quoted Facts - semantic fact extraction over Elixir quoted syntax trees
//
// An upstream parser produces the quoted tree (as JSON or built in code); this
// crate classifies its nodes and extracts behaviour contracts, conformance
// claims, type signatures and call sites for an ontology-assembly layer.

pub mod ast;
pub mod extractors;

pub use ast::{load_tree, Node};
pub use extractors::base::{
    CallExtraction, CallKind, CallOptions, CallbackKind, CallbackRecord, ConformanceDeclaration,
    ConformanceSet, ContractSet, ErrorKind, ExtractError, ExtractOptions, FactsOptions,
    FunctionCall, FunctionId, FunctionSignature, ImplAnnotation, ImplTarget, Location,
    OverrideMarker, OverrideSource, SpecKind,
};
pub use extractors::{
    defines_behaviour, extract_batch, extract_calls, extract_calls_from,
    extract_calls_with_report, extract_conformance, extract_contracts, extract_file,
    extract_module, extract_signatures, ModuleFacts,
};
