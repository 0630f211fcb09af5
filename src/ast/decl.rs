// Top-level declaration nodes

use super::expr::Expr;
use super::stmt::Stmt;
use super::types::{DataType, SourceLocation};

/// Function parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub param_type: DataType,
}

impl Param {
    pub fn new(name: &str, param_type: DataType) -> Self {
        Param {
            name: name.to_owned(),
            param_type,
        }
    }
}

/// Declaration variants
///
/// Derived `Clone`, `PartialEq` and `Debug` recurse like those of [`Stmt`].
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Function {
        name: String,
        return_type: DataType,
        params: Vec<Param>,
        body: Vec<Stmt>,
        location: SourceLocation,
    },
    GlobalVar {
        name: String,
        var_type: DataType,
        initializer: Option<Box<Expr>>,
        location: SourceLocation,
    },
}

impl Decl {
    pub fn function(
        name: &str,
        return_type: DataType,
        params: Vec<Param>,
        body: Vec<Stmt>,
        location: SourceLocation,
    ) -> Self {
        Decl::Function {
            name: name.to_owned(),
            return_type,
            params,
            body,
            location,
        }
    }

    pub fn global_var(
        name: &str,
        var_type: DataType,
        initializer: Option<Expr>,
        location: SourceLocation,
    ) -> Self {
        Decl::GlobalVar {
            name: name.to_owned(),
            var_type,
            initializer: initializer.map(Box::new),
            location,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Decl::Function { name, .. } => name,
            Decl::GlobalVar { name, .. } => name,
        }
    }

    /// Get the source location of this declaration
    pub fn location(&self) -> &SourceLocation {
        match self {
            Decl::Function { location, .. } => location,
            Decl::GlobalVar { location, .. } => location,
        }
    }

    pub(crate) fn vacant() -> Self {
        Decl::GlobalVar {
            name: String::new(),
            var_type: DataType::Void,
            initializer: None,
            location: SourceLocation::default(),
        }
    }
}
