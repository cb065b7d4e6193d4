/*
 * ==========================================================================
 * TALLY - Count on it.
 * ==========================================================================
 *
 * File:     node.rs
 * Purpose:  Defines the TALLY abstract syntax tree.
 *
 * These are produced by:
 *  - parser/statements.rs and parser/expressions.rs
 *
 * And consumed by:
 *  - interpreter/mod.rs (evaluate)
 *
 * --------------------------------------------------------------------------
 * Author:   Sam Wilcox
 *
 * License:
 * This file is part of the TALLY scripting engine project.
 *
 * TALLY is dual-licensed under the terms of:
 *   - The MIT License
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

use serde::Serialize;

use crate::ast::Operator;

/// One constituent of the syntax tree.
///
/// The node set is closed: the evaluator matches on it exhaustively, so a
/// new variant cannot be added without teaching the interpreter about it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Node {
    /* ----------------------------- */
    /* EXPRESSIONS                   */
    /* ----------------------------- */

    Literal(f64),

    Identifier(String),

    Infix {
        operator: Operator,
        left: Box<Node>,
        right: Box<Node>,
    },

    FunctionCall {
        name: String,
        arguments: Vec<Node>,
    },

    /* ----------------------------- */
    /* DECLARATIONS                  */
    /* ----------------------------- */

    /// `ref name = value`
    VariableDeclaration {
        name: String,
        value: Box<Node>,
    },

    /// `fn name(a, b) { ... }`
    FunctionDefinition(FunctionDefinition),

    /* ----------------------------- */
    /* CONTROL FLOW                  */
    /* ----------------------------- */

    /// `if c1 { ... } else if c2 { ... } else { ... }`
    ///
    /// `else if` chains are flattened into `branches`, tried in order.
    If {
        branches: Vec<Branch>,
        else_body: Option<Block>,
    },

    /// `while c { ... }`
    ///
    /// The grammar always supplies one condition; the loop runs while
    /// **every** condition is truthy.
    While {
        conditions: Vec<Node>,
        body: Block,
    },

    Block(Block),
}

impl Node {
    pub fn infix(operator: Operator, left: Node, right: Node) -> Node {
        Node::Infix {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn identifier(name: impl Into<String>) -> Node {
        Node::Identifier(name.into())
    }
}

/// A user function as written in source.
///
/// Registered in the environment, unchanged, when its definition runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub params: Vec<String>,
    pub body: Block,
}

/// One `condition { body }` arm of an `if` chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Branch {
    pub condition: Node,
    pub body: Block,
}

/// A braced statement list, or the whole program.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Block {
    pub statements: Vec<Node>,
}

impl Block {
    pub fn new(statements: Vec<Node>) -> Self {
        Self { statements }
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
