use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use super::args::parse_function_call;
use crate::error::MappingError;
use crate::mapping::MappingEntry;

/// Formatting function: `(value, args) -> formatted value`.
///
/// `Ok(None)` means the function produced no value for this input.
pub type FormattingFn =
    Arc<dyn Fn(&str, &[String]) -> Result<Option<String>, MappingError> + Send + Sync>;

/// Wraps a closure as a [`FormattingFn`].
pub fn formatting_fn<F>(function: F) -> FormattingFn
where
    F: Fn(&str, &[String]) -> Result<Option<String>, MappingError> + Send + Sync + 'static,
{
    Arc::new(function)
}

/// Registry of named formatting functions.
#[derive(Default)]
pub struct FormattingRegistry {
    functions: RwLock<HashMap<String, FormattingFn>>,
}

impl fmt::Debug for FormattingRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormattingRegistry")
            .field("functions", &self.function_names())
            .finish()
    }
}

impl FormattingRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a function under `name`.
    ///
    /// # Returns
    /// `Err(MappingError::FunctionAlreadyRegistered)` if the name is taken.
    pub fn register(&self, name: &str, function: FormattingFn) -> Result<(), MappingError> {
        let mut functions = self
            .functions
            .write()
            .map_err(|_| MappingError::LockPoisoned)?;
        if functions.contains_key(name) {
            return Err(MappingError::FunctionAlreadyRegistered {
                name: name.to_string(),
            });
        }
        functions.insert(name.to_string(), function);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        match self.functions.read() {
            Ok(functions) => functions.contains_key(name),
            Err(_) => false,
        }
    }

    /// Returns the registered function names, sorted.
    pub fn function_names(&self) -> Vec<String> {
        let functions = match self.functions.read() {
            Ok(guard) => guard,
            Err(_) => return Vec::new(),
        };
        let mut names: Vec<String> = functions.keys().cloned().collect();
        names.sort();
        names
    }

    /// Calls function `name` on `value`.
    pub fn apply(
        &self,
        name: &str,
        value: &str,
        args: &[String],
    ) -> Result<Option<String>, MappingError> {
        let function = {
            let functions = self
                .functions
                .read()
                .map_err(|_| MappingError::LockPoisoned)?;
            functions
                .get(name)
                .cloned()
                .ok_or_else(|| MappingError::UnknownFormattingFunction {
                    name: name.to_string(),
                })?
        };
        function(value, args)
    }

    /// Applies the formatting function configured on `entry`, if any.
    ///
    /// Entries without a formatting function return `value` unchanged.
    pub fn apply_entry(
        &self,
        entry: &MappingEntry,
        value: &str,
    ) -> Result<Option<String>, MappingError> {
        let Some(function) = entry.formatting_function() else {
            return Ok(Some(value.to_string()));
        };
        let (name, args) = parse_function_call(function, entry.function_parameters.as_deref())?;
        self.apply(&name, value, &args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upper() -> FormattingFn {
        formatting_fn(|value, _| Ok(Some(value.to_uppercase())))
    }

    #[test]
    fn test_register_and_apply() {
        let registry = FormattingRegistry::new();
        registry.register("upper", upper()).unwrap();
        assert!(registry.contains("upper"));
        assert_eq!(
            registry.apply("upper", "abc", &[]).unwrap(),
            Some("ABC".to_string())
        );
    }

    #[test]
    fn test_duplicate_registration() {
        let registry = FormattingRegistry::new();
        registry.register("upper", upper()).unwrap();
        assert!(matches!(
            registry.register("upper", upper()),
            Err(MappingError::FunctionAlreadyRegistered { .. })
        ));
    }

    #[test]
    fn test_unknown_function() {
        let registry = FormattingRegistry::new();
        assert!(matches!(
            registry.apply("nope", "x", &[]),
            Err(MappingError::UnknownFormattingFunction { .. })
        ));
    }

    #[test]
    fn test_apply_entry_without_function() {
        let registry = FormattingRegistry::new();
        let entry = MappingEntry::new("city", "city");
        assert_eq!(
            registry.apply_entry(&entry, "Pune").unwrap(),
            Some("Pune".to_string())
        );
    }
}
