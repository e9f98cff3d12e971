use std::collections::HashMap;

use crate::errors::errors::ErrorImpl;

/// One frame of bindings. Variables are keyed by name and functions by
/// `(name, arity)`.
#[derive(Debug)]
pub struct Environment<V, F> {
    pub variable_lookup: HashMap<String, V>,
    pub function_lookup: HashMap<(String, usize), F>,
    parent: Option<usize>,
}

impl<V, F> Environment<V, F> {
    fn new(parent: Option<usize>) -> Self {
        Environment {
            variable_lookup: HashMap::new(),
            function_lookup: HashMap::new(),
            parent,
        }
    }
}

/// Marks the environment that was current before a frame was entered.
/// Handing it back to [`Scopes::exit`] discards every frame pushed since.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct ScopeMark {
    current: usize,
    len: usize,
}

/// A stack of environments with index-based parent links.
///
/// Frame 0 is the global environment and lives as long as the scopes do.
/// Block frames link to the frame that was current when they were entered;
/// function frames link straight to the global frame, so a callee never
/// sees its caller's locals.
#[derive(Debug)]
pub struct Scopes<V, F> {
    environments: Vec<Environment<V, F>>,
    current: usize,
}

impl<V, F> Default for Scopes<V, F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, F> Scopes<V, F> {
    pub fn new() -> Self {
        Scopes {
            environments: vec![Environment::new(None)],
            current: 0,
        }
    }

    /// Pushes a block frame whose parent is the current frame.
    pub fn enter(&mut self) -> ScopeMark {
        self.push(Some(self.current))
    }

    /// Pushes a function frame whose parent is the global frame.
    pub fn enter_function(&mut self) -> ScopeMark {
        self.push(Some(0))
    }

    fn push(&mut self, parent: Option<usize>) -> ScopeMark {
        let mark = ScopeMark {
            current: self.current,
            len: self.environments.len(),
        };
        self.environments.push(Environment::new(parent));
        self.current = self.environments.len() - 1;
        mark
    }

    pub fn exit(&mut self, mark: ScopeMark) {
        self.environments.truncate(mark.len.max(1));
        self.current = mark.current;
    }

    /// Number of live frames, the global frame included.
    pub fn depth(&self) -> usize {
        self.environments.len()
    }

    pub fn is_global(&self) -> bool {
        self.current == 0
    }

    fn current_environment(&mut self) -> &mut Environment<V, F> {
        &mut self.environments[self.current]
    }

    /// Binds `name` in the current frame. Shadowing an outer frame is fine,
    /// a second binding in the same frame is not.
    pub fn declare_variable(&mut self, name: &str, variable: V) -> Result<(), ErrorImpl> {
        let environment = self.current_environment();
        if environment.variable_lookup.contains_key(name) {
            return Err(ErrorImpl::VariableAlreadyDeclared { variable: name.to_string() });
        }

        environment.variable_lookup.insert(name.to_string(), variable);
        Ok(())
    }

    pub fn declare_function(&mut self, name: &str, arity: usize, function: F) -> Result<(), ErrorImpl> {
        let key = (name.to_string(), arity);
        let environment = self.current_environment();
        if environment.function_lookup.contains_key(&key) {
            return Err(ErrorImpl::FunctionAlreadyDeclared {
                function: name.to_string(),
                arity,
            });
        }

        environment.function_lookup.insert(key, function);
        Ok(())
    }

    /// Index of the nearest frame, walking outward, that binds `name`.
    fn find_variable(&self, name: &str) -> Option<usize> {
        let mut index = Some(self.current);
        while let Some(current) = index {
            let environment = &self.environments[current];
            if environment.variable_lookup.contains_key(name) {
                return Some(current);
            }
            index = environment.parent;
        }
        None
    }

    pub fn get_variable(&self, name: &str) -> Option<&V> {
        let index = self.find_variable(name)?;
        self.environments[index].variable_lookup.get(name)
    }

    pub fn get_variable_mut(&mut self, name: &str) -> Option<&mut V> {
        let index = self.find_variable(name)?;
        self.environments[index].variable_lookup.get_mut(name)
    }

    pub fn get_function(&self, name: &str, arity: usize) -> Option<&F> {
        let key = (name.to_string(), arity);
        let mut index = Some(self.current);
        while let Some(current) = index {
            let environment = &self.environments[current];
            if let Some(function) = environment.function_lookup.get(&key) {
                return Some(function);
            }
            index = environment.parent;
        }
        None
    }
}
