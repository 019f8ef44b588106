// Per-entry-point configuration
//
// Plain structs with `Default`, loadable from JSON by the assembly layer.

use serde::{Deserialize, Serialize};

/// Default recursion bound of the call-site walk
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Options for contract, conformance and signature extraction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExtractOptions {
    /// Attach source locations to records when the tree carries them
    pub include_location: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            include_location: true,
        }
    }
}

/// Options for call-site extraction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CallOptions {
    pub include_location: bool,
    /// Nodes deeper than this many plies below the input are not visited
    pub max_depth: usize,
    /// Also emit `Module.fun(...)` calls as remote call records
    pub include_remote: bool,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            include_location: true,
            max_depth: DEFAULT_MAX_DEPTH,
            include_remote: false,
        }
    }
}

/// Options for whole-module extraction
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FactsOptions {
    pub extract: ExtractOptions,
    pub calls: CallOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CallOptions::default();
        assert!(options.include_location);
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
        assert!(!options.include_remote);
        assert!(ExtractOptions::default().include_location);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let options: FactsOptions =
            serde_json::from_str(r#"{"calls": {"max_depth": 3}}"#).unwrap();
        assert_eq!(options.calls.max_depth, 3);
        assert!(options.calls.include_location);
        assert!(options.extract.include_location);
    }
}
