/*
 * ==========================================================================
 * TALLY - Count on it.
 * ==========================================================================
 *
 * Author:   Sam Wilcox
 *
 * License:
 * This file is part of the TALLY scripting engine project.
 *
 * TALLY is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use std::collections::HashMap;
use std::f64::consts;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use tracing::trace;

use crate::ast::FunctionDefinition;
use crate::config::{Config, Scoping};
use crate::error::RuntimeError;

#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    Variable(f64),
    Function(Rc<FunctionDefinition>),
}

/// Runtime limits enforced while evaluating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits {
    pub max_call_depth: usize,
    pub max_nesting_depth: usize,
    pub max_loop_iterations: Option<u64>,
}

impl Default for Limits {
    fn default() -> Self {
        let config = Config::default();
        Self {
            max_call_depth: config.max_call_depth,
            max_nesting_depth: config.max_nesting_depth,
            max_loop_iterations: config.max_loop_iterations,
        }
    }
}

type Frame = HashMap<String, Binding>;

/// Every binding visible to a running program.
///
/// `frames[0]` is the global frame. Under `Scoping::Frames` each active
/// call adds one frame on top holding its parameters; names resolve from
/// the innermost frame outward. Under `Scoping::Shared` there is only ever
/// the global frame.
///
/// Within one frame a name maps to at most one binding, variable or
/// function.
#[derive(Debug, Clone)]
pub struct Environment {
    frames: Vec<Frame>,
    scoping: Scoping,
    limits: Limits,
    call_depth: usize,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        Self::with_scoping(Scoping::Shared)
    }

    /// A fresh environment holding only the built-in constants `PI` and `E`.
    pub fn with_scoping(scoping: Scoping) -> Self {
        let mut env = Self {
            frames: vec![Frame::new()],
            scoping,
            limits: Limits::default(),
            call_depth: 0,
        };

        env.define_variable("PI", consts::PI);
        env.define_variable("E", consts::E);
        env
    }

    pub fn from_config(config: &Config) -> Self {
        let mut env = Self::with_scoping(config.scoping);
        env.limits = Limits {
            max_call_depth: config.max_call_depth,
            max_nesting_depth: config.max_nesting_depth,
            max_loop_iterations: config.max_loop_iterations,
        };

        for (name, value) in &config.constants {
            env.define_variable(name, *value);
        }

        env
    }

    pub fn scoping(&self) -> Scoping {
        self.scoping
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Number of calls currently in progress.
    pub fn call_depth(&self) -> usize {
        self.call_depth
    }

    /// Number of frames, the global frame included.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Binds `name` in the innermost frame, replacing whatever was there.
    pub fn define(&mut self, name: impl Into<String>, binding: Binding) {
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name.into(), binding);
        }
    }

    pub fn define_variable(&mut self, name: impl Into<String>, value: f64) {
        self.define(name, Binding::Variable(value));
    }

    /// Binds `name` the way `ref` and `fn` do.
    ///
    /// A call frame that already binds `name` (one of its parameters) is
    /// rebound in place. Anything else goes to the global frame, where it
    /// outlives the call that made it.
    pub fn declare(&mut self, name: impl Into<String>, binding: Binding) {
        let name = name.into();
        let index = match self.frames.last() {
            Some(frame) if self.frames.len() > 1 && frame.contains_key(&name) => {
                self.frames.len() - 1
            }
            _ => 0,
        };

        if let Some(frame) = self.frames.get_mut(index) {
            frame.insert(name, binding);
        }
    }

    pub fn declare_variable(&mut self, name: impl Into<String>, value: f64) {
        self.declare(name, Binding::Variable(value));
    }

    pub fn declare_function(&mut self, function: Rc<FunctionDefinition>) {
        self.declare(function.name.clone(), Binding::Function(function));
    }

    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Resolves a variable. A function of that name does not count.
    pub fn lookup_variable(&self, name: &str) -> Result<f64, RuntimeError> {
        match self.lookup(name) {
            Some(Binding::Variable(value)) => Ok(*value),
            _ => Err(RuntimeError::NotDefined(name.to_string())),
        }
    }

    /// Resolves a function. A variable of that name does not count.
    pub fn lookup_function(&self, name: &str) -> Result<Rc<FunctionDefinition>, RuntimeError> {
        match self.lookup(name) {
            Some(Binding::Function(function)) => Ok(Rc::clone(function)),
            _ => Err(RuntimeError::NotDefined(name.to_string())),
        }
    }

    /// Removes `name` from the innermost frame that binds it.
    pub fn remove(&mut self, name: &str) -> Option<Binding> {
        self.frames
            .iter_mut()
            .rev()
            .find_map(|frame| frame.remove(name))
    }

    /// Binds a call's parameters and returns a guard that releases them.
    ///
    /// The guard derefs to the environment, so the body is evaluated
    /// through it. Dropping the guard undoes the binding whatever the
    /// outcome of the body: the call frame is popped (`Frames`) or every
    /// parameter name is removed from the global table (`Shared`).
    pub fn enter_call(
        &mut self,
        function: &FunctionDefinition,
        arguments: Vec<f64>,
    ) -> Result<CallScope<'_>, RuntimeError> {
        if self.call_depth >= self.limits.max_call_depth {
            return Err(RuntimeError::CallDepthExceeded {
                name: function.name.clone(),
                limit: self.limits.max_call_depth,
            });
        }

        if self.scoping == Scoping::Frames {
            self.frames.push(Frame::new());
        }

        for (param, value) in function.params.iter().zip(arguments) {
            self.define_variable(param.clone(), value);
        }

        self.call_depth += 1;
        trace!(function = %function.name, depth = self.call_depth, "entered call");

        Ok(CallScope {
            env: self,
            params: function.params.clone(),
        })
    }
}

/// Parameter bindings of one active call. See `Environment::enter_call`.
pub struct CallScope<'env> {
    env: &'env mut Environment,
    params: Vec<String>,
}

impl Deref for CallScope<'_> {
    type Target = Environment;

    fn deref(&self) -> &Environment {
        &*self.env
    }
}

impl DerefMut for CallScope<'_> {
    fn deref_mut(&mut self) -> &mut Environment {
        &mut *self.env
    }
}

impl Drop for CallScope<'_> {
    fn drop(&mut self) {
        match self.env.scoping {
            Scoping::Frames => {
                if self.env.frames.len() > 1 {
                    self.env.frames.pop();
                }
            }
            Scoping::Shared => {
                for param in &self.params {
                    self.env.remove(param);
                }
            }
        }

        self.env.call_depth -= 1;
        trace!(depth = self.env.call_depth, "left call");
    }
}
