// Read-only queries over a ConformanceSet
//
// Sequence-returning queries keep the order of the list they were given.

use crate::extractors::base::{
    ConformanceSet, ContractSet, FunctionId, ImplTarget, OverrideSource,
};

impl ConformanceSet {
    pub fn has_behaviour(&self, target: &str) -> bool {
        self.declarations
            .iter()
            .any(|declaration| declaration.target == target)
    }

    pub fn has_function(&self, name: &str, arity: usize) -> bool {
        self.functions
            .iter()
            .any(|id| id.name == name && id.arity == arity)
    }

    /// Explicitly listed as overridable; module references never match
    pub fn is_overridable(&self, name: &str, arity: usize) -> bool {
        self.overrides.iter().any(|marker| {
            marker.source == OverrideSource::ExplicitList
                && marker.name == name
                && marker.arity == Some(arity)
        })
    }

    /// Modules whose functions were all declared overridable
    pub fn overridable_modules(&self) -> Vec<&str> {
        self.overrides
            .iter()
            .filter(|marker| marker.source == OverrideSource::ModuleReference)
            .map(|marker| marker.name.as_str())
            .collect()
    }

    /// Entries of `required` this module does not define
    pub fn missing_callbacks(&self, required: &[FunctionId]) -> Vec<FunctionId> {
        required
            .iter()
            .filter(|id| !self.has_function(&id.name, id.arity))
            .cloned()
            .collect()
    }

    /// Entries of `required` this module defines
    pub fn matching_callbacks(&self, required: &[FunctionId]) -> Vec<FunctionId> {
        required
            .iter()
            .filter(|id| self.has_function(&id.name, id.arity))
            .cloned()
            .collect()
    }

    /// Non-optional callbacks of `contract` this module does not define
    pub fn unmet_contract(&self, contract: &ContractSet) -> Vec<FunctionId> {
        self.missing_callbacks(&contract.required_callbacks())
    }

    /// Callbacks of `contract`, optional or not, this module defines
    pub fn satisfied_contract(&self, contract: &ContractSet) -> Vec<FunctionId> {
        let all: Vec<FunctionId> = contract.all_callbacks().map(|record| record.id()).collect();
        self.matching_callbacks(&all)
    }

    /// `@impl` target recorded for a definition
    pub fn impl_for(&self, name: &str, arity: usize) -> Option<&ImplTarget> {
        self.impls
            .iter()
            .find(|annotation| annotation.function.name == name && annotation.function.arity == arity)
            .map(|annotation| &annotation.target)
    }
}
