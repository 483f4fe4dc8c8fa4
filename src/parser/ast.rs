// AST (Abstract Syntax Tree) definitions for the C subset

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Base types supported by the interpreter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseType {
    Int,
    Void,
}

/// Type representation with const qualifiers and pointer depth.
///
/// `is_const` qualifies the object itself; `pointee_const` qualifies the object
/// one dereference away. `const int *p` has `pointee_const`, `int *const p`
/// has `is_const`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Type {
    pub base: BaseType,
    pub is_const: bool,
    pub pointee_const: bool,
    pub pointer_depth: usize, // 0 = not pointer, 1 = *, 2 = **, etc.
}

impl Type {
    pub fn new(base: BaseType) -> Self {
        Type {
            base,
            is_const: false,
            pointee_const: false,
            pointer_depth: 0,
        }
    }

    pub fn with_const(mut self) -> Self {
        self.is_const = true;
        self
    }

    /// Add one level of indirection. The current constness moves to the pointee.
    pub fn with_pointer(mut self) -> Self {
        self.pointee_const = self.is_const;
        self.is_const = false;
        self.pointer_depth += 1;
        self
    }

    pub fn is_pointer(&self) -> bool {
        self.pointer_depth > 0
    }

    /// The type obtained by dereferencing once. Qualifiers deeper than the
    /// pointee are not tracked.
    pub fn pointee(&self) -> Option<Type> {
        if self.pointer_depth == 0 {
            return None;
        }
        Some(Type {
            base: self.base.clone(),
            is_const: self.pointee_const,
            pointee_const: false,
            pointer_depth: self.pointer_depth - 1,
        })
    }

    /// Same base type and depth, ignoring qualifiers
    pub fn same_shape(&self, other: &Type) -> bool {
        self.base == other.base && self.pointer_depth == other.pointer_depth
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let base_const = match self.pointer_depth {
            0 => self.is_const,
            1 => self.pointee_const,
            _ => false,
        };
        if base_const {
            write!(f, "const ")?;
        }
        match self.base {
            BaseType::Int => write!(f, "int")?,
            BaseType::Void => write!(f, "void")?,
        }
        for level in 1..=self.pointer_depth {
            write!(f, "*")?;
            let qualified = (level == self.pointer_depth && self.is_const)
                || (level + 1 == self.pointer_depth && self.pointee_const);
            if qualified {
                write!(f, " const")?;
            }
        }
        Ok(())
    }
}

/// Function parameter
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub param_type: Type,
}

/// AST nodes representing statements and expressions
#[derive(Debug, Clone)]
pub enum AstNode {
    // Top-level declarations
    FunctionDef {
        name: String,
        params: Vec<Param>,
        body: Vec<AstNode>,
        return_type: Type,
        location: SourceLocation,
    },

    // Statements
    VarDecl {
        name: String,
        var_type: Type,
        init: Option<Box<AstNode>>,
        location: SourceLocation,
    },
    Assignment {
        lhs: Box<AstNode>,
        rhs: Box<AstNode>,
        location: SourceLocation,
    },
    Return {
        expr: Option<Box<AstNode>>,
        location: SourceLocation,
    },
    ExpressionStatement {
        expr: Box<AstNode>,
        location: SourceLocation,
    },

    // Expressions
    IntLiteral(i32, SourceLocation),
    Null {
        location: SourceLocation,
    },
    Variable(String, SourceLocation),
    Deref {
        operand: Box<AstNode>,
        location: SourceLocation,
    },
    AddressOf {
        operand: Box<AstNode>,
        location: SourceLocation,
    },
    FunctionCall {
        name: String,
        args: Vec<AstNode>,
        location: SourceLocation,
    },
}

impl AstNode {
    /// Get the source location of this node
    pub fn location(&self) -> &SourceLocation {
        match self {
            AstNode::FunctionDef { location, .. } => location,
            AstNode::VarDecl { location, .. } => location,
            AstNode::Assignment { location, .. } => location,
            AstNode::Return { location, .. } => location,
            AstNode::ExpressionStatement { location, .. } => location,
            AstNode::IntLiteral(_, loc) => loc,
            AstNode::Null { location } => location,
            AstNode::Variable(_, loc) => loc,
            AstNode::Deref { location, .. } => location,
            AstNode::AddressOf { location, .. } => location,
            AstNode::FunctionCall { location, .. } => location,
        }
    }
}

/// Top-level program structure
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub nodes: Vec<AstNode>, // Function definitions, global declarations and top-level statements
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }
}
