use super::datatype::DataType;
use super::literal::Literal;
use super::operators::{AddOp, LogicOp, MulOp, PostfixOp, RelOp, UnaryOp};

/// A declared name inside a `declaration_list`. Both forms can appear mixed
/// within the same comma-separated list; each is classified independently
/// (see SPEC_FULL §4.2).
#[derive(Debug, Clone)]
pub enum Declarator {
    Scalar(String),
    Array(String, u32),
}

impl Declarator {
    pub fn name(&self) -> &str {
        match self {
            Declarator::Scalar(name) => name,
            Declarator::Array(name, _) => name,
        }
    }
}

/// A function parameter as written in a `parameter_list`. The formal name is
/// optional because prototype-only parameter lists (`int f(int, float)`) are
/// valid per SPEC_FULL §3.
#[derive(Debug, Clone)]
pub struct Parameter {
    pub datatype: DataType,
    pub name: Option<String>,
}

#[cfg_attr(doctest, doc = " ````no_test")]
#[derive(Debug, Clone)]
#[allow(non_camel_case_types)]
pub enum ASTNode {
    /// A bare identifier used as a value, e.g. the `x` in `x + 1`.
    VarRef(String),

    /// `id [ expression ]` used as a value.
    ArrayRef {
        name: String,
        index: Box<ASTNode>,
    },

    Literal(Literal),

    /// Parenthesized sub-expression. Inherits the inner type (§4.4).
    Paren(Box<ASTNode>),

    Unary {
        op: UnaryOp,
        expression: Box<ASTNode>,
    },

    /// Post-increment/decrement. Inherits operand type (§4.4).
    Postfix {
        op: PostfixOp,
        expression: Box<ASTNode>,
    },

    Add {
        op: AddOp,
        lhs: Box<ASTNode>,
        rhs: Box<ASTNode>,
    },

    Mul {
        op: MulOp,
        lhs: Box<ASTNode>,
        rhs: Box<ASTNode>,
    },

    Rel {
        op: RelOp,
        lhs: Box<ASTNode>,
        rhs: Box<ASTNode>,
    },

    Logic {
        op: LogicOp,
        lhs: Box<ASTNode>,
        rhs: Box<ASTNode>,
    },

    /// `variable = expression` or `id [ expression ] = expression`.
    Assignment {
        name: String,
        array_index: Option<Box<ASTNode>>,
        expression: Box<ASTNode>,
    },

    /// `id ( argument_list )` used as a value.
    Call {
        name: String,
        arguments: Vec<ASTNode>,
    },

    /// A declaration statement: `type_specifier declaration_list ;`
    Declaration {
        datatype: DataType,
        declarators: Vec<Declarator>,
    },

    /// `type_specifier id ( parameter_list ) compound_statement`
    FunctionDef {
        name: String,
        return_type: DataType,
        parameters: Vec<Parameter>,
        body: Box<ASTNode>,
    },

    /// `{ statement* }` — a compound statement. Opens and closes its own
    /// scope (see Decision D6 in DESIGN.md).
    Block(Vec<ASTNode>),

    /// An expression used in statement position, e.g. a naked call `f();`.
    ExprStatement(Box<ASTNode>),

    /// `printf ( id ) ;`
    Print(String),

    Return(Box<ASTNode>),

    If {
        condition: Box<ASTNode>,
        then_branch: Box<ASTNode>,
        else_branch: Option<Box<ASTNode>>,
    },

    While {
        condition: Box<ASTNode>,
        body: Box<ASTNode>,
    },

    For {
        init: Option<Box<ASTNode>>,
        condition: Box<ASTNode>,
        advance: Box<ASTNode>,
        body: Box<ASTNode>,
    },

    /// The whole translation unit: a sequence of top-level declarations and
    /// function definitions.
    Program(Vec<ASTNode>),

    /// Wraps any statement-level node with the source line its reduction
    /// fired on, so the analysis context can set `line_number` before
    /// dispatching into the inner node (SPEC_FULL §4.8).
    Stmt {
        line: u32,
        inner: Box<ASTNode>,
    },
}

impl ASTNode {
    /// True for a node that is a direct, unparenthesized `CONST_INT` literal
    /// spelled `0`. Division/modulus-by-zero detection is this textual
    /// check, never constant folding (Decision D4).
    pub fn is_literal_zero(&self) -> bool {
        matches!(self, ASTNode::Literal(literal) if literal.is_zero())
    }

    /// The grammar production name for a statement-level node, used by the
    /// log's reduction trace (§4.9/§6: `At line no: <N> <production> :
    /// <rhs>`). Only meaningful for the variants `Stmt` can wrap.
    pub fn production_name(&self) -> &'static str {
        match self {
            ASTNode::Declaration { .. } => "declaration_statement",
            ASTNode::FunctionDef { .. } => "function_definition",
            ASTNode::Block(_) => "compound_statement",
            ASTNode::If { .. } => "if_statement",
            ASTNode::While { .. } => "while_statement",
            ASTNode::For { .. } => "for_statement",
            ASTNode::Return(_) => "return_statement",
            ASTNode::Print(_) => "print_statement",
            ASTNode::ExprStatement(_) => "expression_statement",
            other => panic!("production_name called on a non-statement node: {:?}", other),
        }
    }

    /// Walks every `Stmt`-wrapped node in document order, including those
    /// nested inside blocks and control-flow bodies, yielding `(line,
    /// production, rendered)` triples for the log's reduction trace.
    pub fn each_statement(&self, visit: &mut dyn FnMut(u32, &'static str, String)) {
        match self {
            ASTNode::Program(items) => {
                for item in items {
                    item.each_statement(visit);
                }
            }
            ASTNode::Stmt { line, inner } => {
                visit(*line, inner.production_name(), inner.to_string());
                match inner.as_ref() {
                    ASTNode::Block(statements) => {
                        for statement in statements {
                            statement.each_statement(visit);
                        }
                    }
                    ASTNode::If {
                        then_branch,
                        else_branch,
                        ..
                    } => {
                        then_branch.each_statement(visit);
                        if let Some(else_branch) = else_branch {
                            else_branch.each_statement(visit);
                        }
                    }
                    ASTNode::While { body, .. } => body.each_statement(visit),
                    ASTNode::For { body, .. } => body.each_statement(visit),
                    ASTNode::FunctionDef { body, .. } => body.each_statement(visit),
                    _ => {}
                }
            }
            other => panic!("each_statement called on a non-program, non-statement node: {:?}", other),
        }
    }
}

impl std::fmt::Display for ASTNode {
    /// Reconstructs the surface syntax an `ASTNode` tree was parsed from.
    /// Used both for the log's "pretty-printed reconstruction" (§4.9) and
    /// for rendering a call argument's text for the analysis context's
    /// argument buffer (§4.6).
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ASTNode::VarRef(name) => write!(f, "{}", name),
            ASTNode::ArrayRef { name, index } => write!(f, "{}[{}]", name, index),
            ASTNode::Literal(literal) => write!(f, "{}", literal),
            ASTNode::Paren(inner) => write!(f, "({})", inner),
            ASTNode::Unary { op, expression } => write!(f, "{}{}", op.spelling(), expression),
            ASTNode::Postfix { op, expression } => write!(f, "{}{}", expression, op.spelling()),
            ASTNode::Add { op, lhs, rhs } => write!(f, "{} {} {}", lhs, op.spelling(), rhs),
            ASTNode::Mul { op, lhs, rhs } => write!(f, "{} {} {}", lhs, op.spelling(), rhs),
            ASTNode::Rel { op, lhs, rhs } => write!(f, "{} {} {}", lhs, op.spelling(), rhs),
            ASTNode::Logic { op, lhs, rhs } => write!(f, "{} {} {}", lhs, op.spelling(), rhs),
            ASTNode::Assignment {
                name,
                array_index,
                expression,
            } => match array_index {
                Some(index) => write!(f, "{}[{}] = {}", name, index, expression),
                None => write!(f, "{} = {}", name, expression),
            },
            ASTNode::Call { name, arguments } => {
                let rendered: Vec<String> = arguments.iter().map(|argument| argument.to_string()).collect();
                write!(f, "{}({})", name, rendered.join(", "))
            }
            ASTNode::Declaration { datatype, declarators } => {
                let rendered: Vec<String> = declarators
                    .iter()
                    .map(|declarator| match declarator {
                        Declarator::Scalar(name) => name.clone(),
                        Declarator::Array(name, size) => format!("{}[{}]", name, size),
                    })
                    .collect();
                write!(f, "{} {};", datatype, rendered.join(", "))
            }
            ASTNode::FunctionDef {
                name,
                return_type,
                parameters,
                body,
            } => {
                let rendered: Vec<String> = parameters
                    .iter()
                    .map(|parameter| match &parameter.name {
                        Some(parameter_name) => format!("{} {}", parameter.datatype, parameter_name),
                        None => parameter.datatype.to_string(),
                    })
                    .collect();
                write!(f, "{} {}({}) {}", return_type, name, rendered.join(", "), body)
            }
            ASTNode::Block(statements) => {
                writeln!(f, "{{")?;
                for statement in statements {
                    writeln!(f, "  {}", statement)?;
                }
                write!(f, "}}")
            }
            ASTNode::ExprStatement(inner) => write!(f, "{};", inner),
            ASTNode::Print(name) => write!(f, "printf({});", name),
            ASTNode::Return(expression) => write!(f, "return {};", expression),
            ASTNode::If {
                condition,
                then_branch,
                else_branch,
            } => match else_branch {
                Some(else_branch) => write!(f, "if ({}) {} else {}", condition, then_branch, else_branch),
                None => write!(f, "if ({}) {}", condition, then_branch),
            },
            ASTNode::While { condition, body } => write!(f, "while ({}) {}", condition, body),
            ASTNode::For {
                init,
                condition,
                advance,
                body,
            } => {
                let init_text = init
                    .as_ref()
                    .map(|init| init.to_string())
                    .unwrap_or_default();
                write!(f, "for ({}; {}; {}) {}", init_text, condition, advance, body)
            }
            ASTNode::Program(items) => {
                for item in items {
                    writeln!(f, "{}", item)?;
                }
                Ok(())
            }
            ASTNode::Stmt { inner, .. } => write!(f, "{}", inner),
        }
    }
}
