use crate::analyzer::ast::{AddOp, ASTNode, DataType, Declarator, MulOp, Parameter};
use crate::analyzer::context::AnalysisContext;
use crate::analyzer::symtab::{Symbol, SymbolTable};

use super::function_tracker::{CallCheck, FunctionSignature};

fn combine_arith_type(lhs: DataType, rhs: DataType) -> DataType {
    if lhs == DataType::Float || rhs == DataType::Float {
        DataType::Float
    } else if lhs == DataType::Int && rhs == DataType::Int {
        DataType::Int
    } else {
        lhs
    }
}

fn unwrap_stmt(node: &ASTNode) -> &ASTNode {
    match node {
        ASTNode::Stmt { inner, .. } => unwrap_stmt(inner),
        other => other,
    }
}

/// Walks a parsed `ASTNode` tree, maintaining a `SymbolTable` and an
/// `AnalysisContext`, enforcing the static rules named in SPEC_FULL §4.
/// Grounded on the teacher's `BarracudaSemanticAnalyser`
/// (`compiler/src/compiler/semantic_analyser/barracuda_pest_semantic_analyser.rs`),
/// whose `analyse_node`/`analyse_*` dispatch is the direct model for
/// `analyse_statement`/`analyse_expression` and their siblings below.
///
/// Departs from the teacher in one respect: the teacher's semantic actions
/// rewrite and return a new, type-annotated `ASTNode`; since this spec has
/// no code-generation consumer for such a tree (a Non-goal), these actions
/// are side-effecting instead — they push diagnostics and populate the
/// symbol table, and expression handlers return only the propagated
/// `DataType` the caller needs for further checks.
pub struct SemanticAnalyzer {
    pub symbols: SymbolTable,
    pub context: AnalysisContext,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        SemanticAnalyzer {
            symbols: SymbolTable::new(),
            context: AnalysisContext::new(),
        }
    }

    pub fn analyse(&mut self, root: &ASTNode) {
        self.analyse_statement(root);
    }

    fn analyse_statement(&mut self, node: &ASTNode) {
        match node {
            ASTNode::Stmt { line, inner } => {
                self.context.line_number = *line;
                self.analyse_statement(inner);
            }
            ASTNode::Program(items) => {
                for item in items {
                    self.analyse_statement(item);
                }
            }
            ASTNode::Declaration { datatype, declarators } => {
                self.analyse_declaration(*datatype, declarators);
            }
            ASTNode::FunctionDef {
                name,
                return_type,
                parameters,
                body,
            } => self.analyse_function_def(name, *return_type, parameters, body),
            ASTNode::Block(statements) => self.analyse_block(statements),
            ASTNode::ExprStatement(expression) => {
                self.analyse_expression(expression);
            }
            ASTNode::Print(name) => self.analyse_print(name),
            ASTNode::Return(expression) => {
                self.analyse_expression(expression);
            }
            ASTNode::If {
                condition,
                then_branch,
                else_branch,
            } => self.analyse_if(condition, then_branch, else_branch.as_deref()),
            ASTNode::While { condition, body } => self.analyse_while(condition, body),
            ASTNode::For {
                init,
                condition,
                advance,
                body,
            } => self.analyse_for(init.as_deref(), condition, advance, body),
            other => panic!("analyse_statement called on a non-statement node: {:?}", other),
        }
    }

    fn analyse_declaration(&mut self, datatype: DataType, declarators: &[Declarator]) {
        for declarator in declarators {
            match declarator {
                Declarator::Scalar(name) => {
                    if self.symbols.lookup_current_scope(name).is_some() {
                        self.context.emit(format!("Multiple declaration of variable {}", name));
                        continue;
                    }
                    if datatype == DataType::Void {
                        self.context.emit("variable type can not be void");
                        continue;
                    }
                    self.symbols.insert(Symbol::variable(name.clone(), datatype));
                }
                Declarator::Array(name, size) => {
                    if self.symbols.lookup_current_scope(name).is_some() {
                        self.context.emit(format!("Multiple declaration of array {}", name));
                        continue;
                    }
                    if datatype == DataType::Void {
                        self.context.emit("variable type can not be void");
                        continue;
                    }
                    self.symbols.insert(Symbol::array(name.clone(), datatype, *size));
                }
            }
        }
    }

    fn analyse_function_def(&mut self, name: &str, return_type: DataType, parameters: &[Parameter], body: &ASTNode) {
        self.context.current_func_name = Some(name.to_string());

        for parameter in parameters {
            // Every parameter occupies a slot in the signature, named or not
            // (SPEC_FULL §3's prototype-only form, `int f(int, float)`), so
            // arity and positional-type checks at the call site stay correct.
            let parameter_name = parameter.name.clone().unwrap_or_default();
            self.context.push_formal(parameter.datatype, parameter_name.clone());
            if parameter.name.is_some() && self.context.formal_has_duplicate(&parameter_name) {
                self.context.emit(format!(
                    "Multiple declaration of parameter {} in a parameter of {}",
                    parameter_name, name
                ));
            }
        }
        let formals = self.context.take_formals();

        if self.symbols.lookup_current_scope(name).is_some() {
            self.context.emit(format!("Multiple declaration of function {}", name));
        } else {
            self.symbols
                .insert(Symbol::function(name.to_string(), return_type, formals.clone()));
        }

        self.symbols.enter_scope();
        for (parameter_type, parameter_name) in &formals {
            // A prototype-only parameter has no name to bind in the body's
            // scope; it still occupies a slot in `formals` for the signature.
            if !parameter_name.is_empty() {
                self.symbols
                    .insert(Symbol::variable(parameter_name.clone(), *parameter_type));
            }
        }
        match unwrap_stmt(body) {
            ASTNode::Block(statements) => {
                for statement in statements {
                    self.analyse_statement(statement);
                }
            }
            other => panic!("function body must be a compound statement, found {:?}", other),
        }
        self.symbols.exit_scope();

        self.context.current_func_name = None;
    }

    /// A compound statement opens and closes its own scope, whether it is a
    /// function body (handled separately in `analyse_function_def` so the
    /// parameter scope and the body scope are the same scope) or a nested
    /// `{ ... }` inside an `if`/`while`/`for` (Decision D6 in DESIGN.md).
    fn analyse_block(&mut self, statements: &[ASTNode]) {
        self.symbols.enter_scope();
        for statement in statements {
            self.analyse_statement(statement);
        }
        self.symbols.exit_scope();
    }

    fn analyse_print(&mut self, name: &str) {
        if self.symbols.lookup(name).is_none() {
            self.context.emit("Undeclared variable");
        }
    }

    fn analyse_if(&mut self, condition: &ASTNode, then_branch: &ASTNode, else_branch: Option<&ASTNode>) {
        self.check_not_void_condition(condition);
        self.analyse_statement(then_branch);
        if let Some(else_branch) = else_branch {
            self.analyse_statement(else_branch);
        }
    }

    fn analyse_while(&mut self, condition: &ASTNode, body: &ASTNode) {
        self.check_not_void_condition(condition);
        self.analyse_statement(body);
    }

    fn analyse_for(&mut self, init: Option<&ASTNode>, condition: &ASTNode, advance: &ASTNode, body: &ASTNode) {
        if let Some(init) = init {
            self.analyse_expression(init);
        }
        self.check_not_void_condition(condition);
        let advance_type = self.analyse_expression(advance);
        if advance_type == DataType::Void {
            self.context
                .emit("A void function cannot be called as a part of an expression");
        }
        self.analyse_statement(body);
    }

    fn check_not_void_condition(&mut self, condition: &ASTNode) {
        let condition_type = self.analyse_expression(condition);
        if condition_type == DataType::Void {
            self.context
                .emit("A void function cannot be called as a part of an expression");
        }
    }

    fn analyse_expression(&mut self, node: &ASTNode) -> DataType {
        match node {
            ASTNode::Literal(literal) => match literal {
                crate::analyzer::ast::Literal::Integer(_) => DataType::Int,
                crate::analyzer::ast::Literal::Float(_) => DataType::Float,
            },
            ASTNode::VarRef(name) => self.analyse_var_ref(name),
            ASTNode::ArrayRef { name, index } => self.analyse_array_ref(name, index),
            ASTNode::Paren(inner) => self.analyse_expression(inner),
            ASTNode::Unary { expression, .. } => self.analyse_expression(expression),
            ASTNode::Postfix { expression, .. } => self.analyse_expression(expression),
            ASTNode::Add { op, lhs, rhs } => self.analyse_add(*op, lhs, rhs),
            ASTNode::Mul { op, lhs, rhs } => self.analyse_mul(*op, lhs, rhs),
            ASTNode::Rel { lhs, rhs, .. } => {
                self.analyse_expression(lhs);
                self.analyse_expression(rhs);
                DataType::Int
            }
            ASTNode::Logic { lhs, rhs, .. } => {
                self.analyse_expression(lhs);
                self.analyse_expression(rhs);
                DataType::Int
            }
            ASTNode::Assignment {
                name,
                array_index,
                expression,
            } => self.analyse_assignment(name, array_index.as_deref(), expression),
            ASTNode::Call { name, arguments } => self.analyse_call(name, arguments),
            other => panic!("analyse_expression called on a non-expression node: {:?}", other),
        }
    }

    fn analyse_var_ref(&mut self, name: &str) -> DataType {
        match self.symbols.lookup(name) {
            None => {
                self.context.emit(format!("Undeclared variable: {}", name));
                DataType::Int
            }
            Some(symbol) => {
                if symbol.is_array() {
                    self.context.emit("variable is of array type");
                }
                symbol.data_type
            }
        }
    }

    fn analyse_array_ref(&mut self, name: &str, index: &ASTNode) -> DataType {
        let index_type = self.analyse_expression(index);
        match self.symbols.lookup(name) {
            Some(symbol) if symbol.is_array() => {
                if index_type != DataType::Int {
                    self.context.emit(format!("array index is not of integer type : {}", name));
                }
                symbol.data_type
            }
            _ => {
                self.context.emit("variable is not of array type");
                DataType::Int
            }
        }
    }

    fn analyse_add(&mut self, op: AddOp, lhs: &ASTNode, rhs: &ASTNode) -> DataType {
        let _ = op;
        let lhs_type = self.analyse_expression(lhs);
        let rhs_type = self.analyse_expression(rhs);
        combine_arith_type(lhs_type, rhs_type)
    }

    fn analyse_mul(&mut self, op: MulOp, lhs: &ASTNode, rhs: &ASTNode) -> DataType {
        let lhs_type = self.analyse_expression(lhs);
        let rhs_type = self.analyse_expression(rhs);
        match op {
            MulOp::Mul => combine_arith_type(lhs_type, rhs_type),
            MulOp::Div => {
                if rhs.is_literal_zero() {
                    self.context.emit("Division by 0");
                }
                combine_arith_type(lhs_type, rhs_type)
            }
            MulOp::Mod => {
                if rhs.is_literal_zero() {
                    self.context.emit("Modulus by 0");
                }
                if lhs_type != DataType::Int || rhs_type != DataType::Int {
                    self.context.emit("Modulus operator on non integer type");
                }
                DataType::Int
            }
        }
    }

    fn analyse_assignment(&mut self, name: &str, array_index: Option<&ASTNode>, expression: &ASTNode) -> DataType {
        let rhs_type = self.analyse_expression(expression);
        let index_type = array_index.map(|index| self.analyse_expression(index));

        let lhs_type = match self.symbols.lookup(name) {
            None => {
                self.context.emit(format!("Undeclared variable: {}", name));
                DataType::Int
            }
            Some(symbol) => match index_type {
                Some(index_type) if symbol.is_array() => {
                    if index_type != DataType::Int {
                        self.context.emit(format!("array index is not of integer type : {}", name));
                    }
                    symbol.data_type
                }
                Some(_) => {
                    self.context.emit("variable is not of array type");
                    symbol.data_type
                }
                None => {
                    if symbol.is_array() {
                        self.context.emit("variable is of array type");
                    }
                    symbol.data_type
                }
            },
        };

        if rhs_type == DataType::Void {
            self.context.emit("operation on void type");
        } else if lhs_type != rhs_type {
            if lhs_type == DataType::Int && rhs_type == DataType::Float {
                self.context
                    .emit("Warning: Assignment of float value into variable of integer type");
            } else {
                self.context
                    .emit(format!("Type mismatch in assignment: {} and {}", lhs_type, rhs_type));
            }
        }
        lhs_type
    }

    fn analyse_call(&mut self, name: &str, arguments: &[ASTNode]) -> DataType {
        self.context.enter_call();
        for argument in arguments {
            let argument_type = self.analyse_expression(argument);
            let rendered = argument.to_string();
            self.context.push_argument(rendered, argument_type);
        }
        let call_arguments = self.context.take_call();

        match self.symbols.lookup(name) {
            None => {
                self.context.emit(format!("Undeclared function: {}", name));
                DataType::Int
            }
            Some(symbol) if !symbol.is_function() => {
                self.context.emit(format!(
                    "A function call cannot be made with non-function type identifier: {}",
                    name
                ));
                DataType::Int
            }
            Some(symbol) => {
                let signature = FunctionSignature {
                    name: symbol.name.clone(),
                    return_type: symbol.return_type.unwrap_or(DataType::Void),
                    parameters: symbol.parameters.clone(),
                };
                match signature.check_call(&call_arguments) {
                    CallCheck::Ok => {}
                    CallCheck::ArityMismatch => {
                        self.context.emit(format!(
                            "Inconsistencies in number of arguments in function call: {}",
                            name
                        ));
                    }
                    CallCheck::ArgumentMismatch(index) => {
                        self.context
                            .emit(format!("argument {} type mismatch in function call: {}", index, name));
                    }
                }
                signature.return_type
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::ast::{Literal, UnaryOp};

    fn stmt(line: u32, inner: ASTNode) -> ASTNode {
        ASTNode::Stmt {
            line,
            inner: Box::new(inner),
        }
    }

    #[test]
    fn undeclared_variable_still_yields_a_placeholder_type() {
        let mut analyzer = SemanticAnalyzer::new();
        let declaration_line = 1;
        let program = ASTNode::Program(vec![stmt(
            declaration_line,
            ASTNode::ExprStatement(Box::new(ASTNode::Assignment {
                name: "missing".to_string(),
                array_index: None,
                expression: Box::new(ASTNode::Literal(Literal::Integer(1))),
            })),
        )]);
        analyzer.analyse(&program);
        assert_eq!(analyzer.context.error_count(), 1);
        assert_eq!(
            analyzer.context.diagnostics.iter().next().unwrap().message,
            "Undeclared variable: missing"
        );
    }

    #[test]
    fn multiple_declaration_in_same_scope_is_reported_once() {
        let mut analyzer = SemanticAnalyzer::new();
        let program = ASTNode::Program(vec![
            stmt(
                1,
                ASTNode::Declaration {
                    datatype: DataType::Int,
                    declarators: vec![Declarator::Scalar("x".to_string())],
                },
            ),
            stmt(
                2,
                ASTNode::Declaration {
                    datatype: DataType::Float,
                    declarators: vec![Declarator::Scalar("x".to_string())],
                },
            ),
        ]);
        analyzer.analyse(&program);
        assert_eq!(analyzer.context.error_count(), 1);
        assert_eq!(
            analyzer.context.diagnostics.iter().next().unwrap().message,
            "Multiple declaration of variable x"
        );
        assert_eq!(analyzer.symbols.lookup("x").unwrap().data_type, DataType::Int);
    }

    #[test]
    fn division_by_literal_zero_is_flagged() {
        let mut analyzer = SemanticAnalyzer::new();
        let program = ASTNode::Program(vec![stmt(
            1,
            ASTNode::ExprStatement(Box::new(ASTNode::Add {
                op: AddOp::Add,
                lhs: Box::new(ASTNode::Literal(Literal::Integer(1))),
                rhs: Box::new(ASTNode::Mul {
                    op: MulOp::Div,
                    lhs: Box::new(ASTNode::Literal(Literal::Integer(4))),
                    rhs: Box::new(ASTNode::Literal(Literal::Integer(0))),
                }),
            })),
        )]);
        analyzer.analyse(&program);
        assert_eq!(analyzer.context.diagnostics.iter().next().unwrap().message, "Division by 0");
    }

    #[test]
    fn float_to_int_assignment_is_a_warning_but_still_counts() {
        let mut analyzer = SemanticAnalyzer::new();
        let program = ASTNode::Program(vec![
            stmt(
                1,
                ASTNode::Declaration {
                    datatype: DataType::Int,
                    declarators: vec![Declarator::Scalar("x".to_string())],
                },
            ),
            stmt(
                2,
                ASTNode::ExprStatement(Box::new(ASTNode::Assignment {
                    name: "x".to_string(),
                    array_index: None,
                    expression: Box::new(ASTNode::Literal(Literal::Float(1.5))),
                })),
            ),
        ]);
        analyzer.analyse(&program);
        assert_eq!(analyzer.context.error_count(), 1);
        assert_eq!(
            analyzer.context.diagnostics.iter().next().unwrap().message,
            "Warning: Assignment of float value into variable of integer type"
        );
    }

    #[test]
    fn block_scope_closes_after_if_branch() {
        let mut analyzer = SemanticAnalyzer::new();
        let program = ASTNode::Program(vec![stmt(
            1,
            ASTNode::If {
                condition: Box::new(ASTNode::Literal(Literal::Integer(1))),
                then_branch: Box::new(ASTNode::Block(vec![stmt(
                    2,
                    ASTNode::Declaration {
                        datatype: DataType::Int,
                        declarators: vec![Declarator::Scalar("inner".to_string())],
                    },
                )])),
                else_branch: None,
            },
        )]);
        analyzer.analyse(&program);
        assert_eq!(analyzer.context.error_count(), 0);
        assert!(analyzer.symbols.lookup("inner").is_none());
    }

    #[test]
    fn call_with_wrong_argument_type_reports_one_indexed_position() {
        let mut analyzer = SemanticAnalyzer::new();
        let program = ASTNode::Program(vec![
            stmt(
                1,
                ASTNode::FunctionDef {
                    name: "add".to_string(),
                    return_type: DataType::Int,
                    parameters: vec![
                        Parameter {
                            datatype: DataType::Int,
                            name: Some("a".to_string()),
                        },
                        Parameter {
                            datatype: DataType::Int,
                            name: Some("b".to_string()),
                        },
                    ],
                    body: Box::new(ASTNode::Block(vec![stmt(
                        1,
                        ASTNode::Return(Box::new(ASTNode::VarRef("a".to_string()))),
                    )])),
                },
            ),
            stmt(
                5,
                ASTNode::ExprStatement(Box::new(ASTNode::Call {
                    name: "add".to_string(),
                    arguments: vec![
                        ASTNode::Literal(Literal::Integer(1)),
                        ASTNode::Literal(Literal::Float(2.0)),
                    ],
                })),
            ),
        ]);
        analyzer.analyse(&program);
        assert_eq!(
            analyzer.context.diagnostics.iter().next().unwrap().message,
            "argument 2 type mismatch in function call: add"
        );
    }

    #[test]
    fn unary_operator_inherits_operand_type() {
        let mut analyzer = SemanticAnalyzer::new();
        let result = analyzer.analyse_expression(&ASTNode::Unary {
            op: UnaryOp::Negate,
            expression: Box::new(ASTNode::Literal(Literal::Float(2.0))),
        });
        assert_eq!(result, DataType::Float);
    }

    #[test]
    fn prototype_only_parameter_still_occupies_an_arity_slot() {
        let mut analyzer = SemanticAnalyzer::new();
        let program = ASTNode::Program(vec![
            stmt(
                1,
                ASTNode::FunctionDef {
                    name: "add".to_string(),
                    return_type: DataType::Int,
                    parameters: vec![
                        Parameter {
                            datatype: DataType::Int,
                            name: Some("a".to_string()),
                        },
                        Parameter {
                            datatype: DataType::Float,
                            name: None,
                        },
                    ],
                    body: Box::new(ASTNode::Block(vec![stmt(
                        1,
                        ASTNode::Return(Box::new(ASTNode::VarRef("a".to_string()))),
                    )])),
                },
            ),
            stmt(
                5,
                ASTNode::ExprStatement(Box::new(ASTNode::Call {
                    name: "add".to_string(),
                    arguments: vec![ASTNode::Literal(Literal::Integer(1))],
                })),
            ),
        ]);
        analyzer.analyse(&program);
        assert_eq!(
            analyzer.context.diagnostics.iter().next().unwrap().message,
            "Inconsistencies in number of arguments in function call: add"
        );
    }

    #[test]
    fn assigning_to_a_bare_array_name_is_flagged() {
        let mut analyzer = SemanticAnalyzer::new();
        let program = ASTNode::Program(vec![
            stmt(
                1,
                ASTNode::Declaration {
                    datatype: DataType::Int,
                    declarators: vec![Declarator::Array("a".to_string(), 10)],
                },
            ),
            stmt(
                2,
                ASTNode::ExprStatement(Box::new(ASTNode::Assignment {
                    name: "a".to_string(),
                    array_index: None,
                    expression: Box::new(ASTNode::Literal(Literal::Integer(5))),
                })),
            ),
        ]);
        analyzer.analyse(&program);
        assert_eq!(
            analyzer.context.diagnostics.iter().next().unwrap().message,
            "variable is of array type"
        );
    }

    #[test]
    fn indexing_a_non_array_on_assignment_lhs_is_flagged() {
        let mut analyzer = SemanticAnalyzer::new();
        let program = ASTNode::Program(vec![
            stmt(
                1,
                ASTNode::Declaration {
                    datatype: DataType::Int,
                    declarators: vec![Declarator::Scalar("x".to_string())],
                },
            ),
            stmt(
                2,
                ASTNode::ExprStatement(Box::new(ASTNode::Assignment {
                    name: "x".to_string(),
                    array_index: Some(Box::new(ASTNode::Literal(Literal::Integer(0)))),
                    expression: Box::new(ASTNode::Literal(Literal::Integer(5))),
                })),
            ),
        ]);
        analyzer.analyse(&program);
        assert_eq!(
            analyzer.context.diagnostics.iter().next().unwrap().message,
            "variable is not of array type"
        );
    }
}
