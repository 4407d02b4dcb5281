use pest::iterators::Pair;
use pest::Parser;

use crate::analyzer::ast::{AddOp, ASTNode, DataType, Declarator, Literal, LogicOp, MulOp, Parameter, PostfixOp, RelOp, UnaryOp};

use super::AstParser;

/// Grammar productions live in `grammar.pest`, mirroring the reference
/// crate's `#[derive(Parser)] #[grammar = "barracuda.pest"]` struct
/// (`compiler/src/compiler/parser/barracuda_pest_parser.rs`).
#[derive(Parser)]
#[grammar = "analyzer/parser/grammar.pest"]
struct LanguageParser;

/// A concrete `AstParser` built on `pest`. Grounded on the reference
/// crate's `PestBarracudaParser` for the one-rule-per-production dispatch
/// style (`parse_pair_node`'s big match), narrowed here into one
/// `parse_*` method per grammar production rather than a single giant
/// dispatcher, since this grammar's rule set is small enough that each
/// caller already knows which production it expects next.
pub struct PestAstParser;

impl AstParser for PestAstParser {
    fn default() -> Self {
        PestAstParser
    }

    /// Parses a source string into an `ASTNode::Program`. Panics on a
    /// syntax error, exactly as the reference parser does — a syntactically
    /// invalid program is outside this spec's scope (Non-goal: no parser
    /// error recovery).
    fn parse(&self, source: &str) -> ASTNode {
        let mut pairs = LanguageParser::parse(Rule::program, source)
            .unwrap_or_else(|error| panic!("Syntax Error: {}", error));
        let program_pair = pairs.next().expect("program rule always produces exactly one pair");
        let statement_list_pair = program_pair
            .into_inner()
            .find(|pair| pair.as_rule() == Rule::statement_list)
            .expect("program always contains a statement_list");
        let statements = statement_list_pair
            .into_inner()
            .map(|statement_pair| self.parse_statement(statement_pair))
            .collect();
        ASTNode::Program(statements)
    }
}

impl PestAstParser {
    /// Threads the current source line through every produced node by
    /// wrapping it in `ASTNode::Stmt`, reading the line from the pair's own
    /// span before descending into its specific production (§4.8).
    fn parse_statement(&self, pair: Pair<Rule>) -> ASTNode {
        let line = pair.as_span().start_pos().line_col().0 as u32;
        let inner = pair.into_inner().next().expect("statement always wraps exactly one production");
        let node = match inner.as_rule() {
            Rule::declaration_statement => self.parse_declaration_statement(inner),
            Rule::function_definition => self.parse_function_definition(inner),
            Rule::compound_statement => self.parse_compound_statement(inner),
            Rule::if_statement => self.parse_if_statement(inner),
            Rule::while_statement => self.parse_while_statement(inner),
            Rule::for_statement => self.parse_for_statement(inner),
            Rule::return_statement => self.parse_return_statement(inner),
            Rule::print_statement => self.parse_print_statement(inner),
            Rule::expression_statement => self.parse_expression_statement(inner),
            other => panic!("Whoops! Unprocessed statement rule: {:?}", other),
        };
        ASTNode::Stmt {
            line,
            inner: Box::new(node),
        }
    }

    fn parse_declaration_statement(&self, pair: Pair<Rule>) -> ASTNode {
        let mut inner = pair.into_inner();
        let datatype = parse_type_specifier(inner.next().unwrap());
        let declaration_list = inner.next().expect("declaration_statement always has a declaration_list");
        let declarators = declaration_list
            .into_inner()
            .map(|declarator_pair| self.parse_declarator(declarator_pair))
            .collect();
        ASTNode::Declaration { datatype, declarators }
    }

    fn parse_declarator(&self, pair: Pair<Rule>) -> Declarator {
        let mut inner = pair.into_inner();
        let name = inner.next().expect("declarator always has an id").as_str().to_string();
        match inner.next() {
            Some(size_pair) => Declarator::Array(name, size_pair.as_str().parse().expect("const_int is ASCII_DIGIT+")),
            None => Declarator::Scalar(name),
        }
    }

    fn parse_function_definition(&self, pair: Pair<Rule>) -> ASTNode {
        let mut inner = pair.into_inner();
        let return_type = parse_type_specifier(inner.next().unwrap());
        let name = inner.next().expect("function_definition always has an id").as_str().to_string();
        let parameter_list = inner.next().expect("function_definition always has a parameter_list");
        let parameters = parameter_list
            .into_inner()
            .map(|parameter_pair| self.parse_parameter(parameter_pair))
            .collect();
        let body_pair = inner.next().expect("function_definition always has a compound_statement");
        let body = self.parse_compound_statement(body_pair);
        ASTNode::FunctionDef {
            name,
            return_type,
            parameters,
            body: Box::new(body),
        }
    }

    fn parse_parameter(&self, pair: Pair<Rule>) -> Parameter {
        let mut inner = pair.into_inner();
        let datatype = parse_type_specifier(inner.next().unwrap());
        let name = inner.next().map(|name_pair| name_pair.as_str().to_string());
        Parameter { datatype, name }
    }

    fn parse_compound_statement(&self, pair: Pair<Rule>) -> ASTNode {
        let statements = pair
            .into_inner()
            .map(|statement_pair| self.parse_statement(statement_pair))
            .collect();
        ASTNode::Block(statements)
    }

    fn parse_if_statement(&self, pair: Pair<Rule>) -> ASTNode {
        let mut inner = pair.into_inner();
        let condition = self.parse_expression(inner.next().unwrap());
        let then_branch = self.parse_statement(inner.next().expect("if_statement always has a then branch"));
        let else_branch = inner.next().map(|else_pair| Box::new(self.parse_statement(else_pair)));
        ASTNode::If {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch,
        }
    }

    fn parse_while_statement(&self, pair: Pair<Rule>) -> ASTNode {
        let mut inner = pair.into_inner();
        let condition = self.parse_expression(inner.next().unwrap());
        let body = self.parse_statement(inner.next().expect("while_statement always has a body"));
        ASTNode::While {
            condition: Box::new(condition),
            body: Box::new(body),
        }
    }

    fn parse_for_statement(&self, pair: Pair<Rule>) -> ASTNode {
        let mut inner = pair.into_inner();
        let mut next = inner.next().expect("for_statement always has at least a condition");
        let init = if next.as_rule() == Rule::for_init {
            let assignment_pair = next
                .into_inner()
                .next()
                .expect("for_init always wraps an assignment_expression");
            let init_node = self.parse_assignment_expression(assignment_pair);
            next = inner.next().expect("for_statement always has a condition after for_init");
            Some(Box::new(init_node))
        } else {
            None
        };
        let condition = self.parse_expression(next);
        let advance = self.parse_expression(inner.next().expect("for_statement always has an advance expression"));
        let body = self.parse_statement(inner.next().expect("for_statement always has a body"));
        ASTNode::For {
            init,
            condition: Box::new(condition),
            advance: Box::new(advance),
            body: Box::new(body),
        }
    }

    fn parse_return_statement(&self, pair: Pair<Rule>) -> ASTNode {
        match pair.into_inner().next() {
            Some(expression_pair) => ASTNode::Return(Box::new(self.parse_expression(expression_pair))),
            None => ASTNode::Return(Box::new(ASTNode::Literal(Literal::Integer(0)))),
        }
    }

    fn parse_print_statement(&self, pair: Pair<Rule>) -> ASTNode {
        let name = pair
            .into_inner()
            .next()
            .expect("print_statement always has an id")
            .as_str()
            .to_string();
        ASTNode::Print(name)
    }

    fn parse_expression_statement(&self, pair: Pair<Rule>) -> ASTNode {
        let expression_pair = pair.into_inner().next().expect("expression_statement always wraps an expression");
        ASTNode::ExprStatement(Box::new(self.parse_expression(expression_pair)))
    }

    fn parse_expression(&self, pair: Pair<Rule>) -> ASTNode {
        let assignment_pair = pair.into_inner().next().expect("expression always wraps an assignment_expression");
        self.parse_assignment_expression(assignment_pair)
    }

    fn parse_assignment_expression(&self, pair: Pair<Rule>) -> ASTNode {
        let mut inner = pair.into_inner();
        let first = inner.next().expect("assignment_expression is never empty");
        match first.as_rule() {
            Rule::id => {
                let name = first.as_str().to_string();
                let mut next = inner.next().expect("an id-led assignment_expression always has a target");
                let array_index = if next.as_rule() == Rule::expression {
                    let index = self.parse_expression(next);
                    next = inner.next().expect("an indexed assignment always has a right-hand side");
                    Some(Box::new(index))
                } else {
                    None
                };
                let expression = self.parse_assignment_expression(next);
                ASTNode::Assignment {
                    name,
                    array_index,
                    expression: Box::new(expression),
                }
            }
            Rule::logic_expression => self.parse_logic_expression(first),
            other => panic!("Whoops! Unprocessed assignment_expression rule: {:?}", other),
        }
    }

    fn parse_logic_expression(&self, pair: Pair<Rule>) -> ASTNode {
        let mut inner = pair.into_inner();
        let mut node = self.parse_rel_expression(inner.next().unwrap());
        while let Some(op_pair) = inner.next() {
            let op = parse_logicop(op_pair.as_str());
            let rhs = self.parse_rel_expression(inner.next().expect("logicop is always followed by an operand"));
            node = ASTNode::Logic {
                op,
                lhs: Box::new(node),
                rhs: Box::new(rhs),
            };
        }
        node
    }

    fn parse_rel_expression(&self, pair: Pair<Rule>) -> ASTNode {
        let mut inner = pair.into_inner();
        let lhs = self.parse_add_expression(inner.next().unwrap());
        match inner.next() {
            Some(op_pair) => {
                let op = parse_relop(op_pair.as_str());
                let rhs = self.parse_add_expression(inner.next().expect("relop is always followed by an operand"));
                ASTNode::Rel {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                }
            }
            None => lhs,
        }
    }

    fn parse_add_expression(&self, pair: Pair<Rule>) -> ASTNode {
        let mut inner = pair.into_inner();
        let mut node = self.parse_mul_expression(inner.next().unwrap());
        while let Some(op_pair) = inner.next() {
            let op = parse_addop(op_pair.as_str());
            let rhs = self.parse_mul_expression(inner.next().expect("addop is always followed by an operand"));
            node = ASTNode::Add {
                op,
                lhs: Box::new(node),
                rhs: Box::new(rhs),
            };
        }
        node
    }

    fn parse_mul_expression(&self, pair: Pair<Rule>) -> ASTNode {
        let mut inner = pair.into_inner();
        let mut node = self.parse_unary_expression(inner.next().unwrap());
        while let Some(op_pair) = inner.next() {
            let op = parse_mulop(op_pair.as_str());
            let rhs = self.parse_unary_expression(inner.next().expect("mulop is always followed by an operand"));
            node = ASTNode::Mul {
                op,
                lhs: Box::new(node),
                rhs: Box::new(rhs),
            };
        }
        node
    }

    fn parse_unary_expression(&self, pair: Pair<Rule>) -> ASTNode {
        let mut inner = pair.into_inner();
        let first = inner.next().expect("unary_expression is never empty");
        match first.as_rule() {
            Rule::unaryop => {
                let op = parse_unaryop(first.as_str());
                let expression = self.parse_unary_expression(inner.next().expect("unaryop is always followed by an operand"));
                ASTNode::Unary {
                    op,
                    expression: Box::new(expression),
                }
            }
            Rule::postfix_expression => self.parse_postfix_expression(first),
            other => panic!("Whoops! Unprocessed unary_expression rule: {:?}", other),
        }
    }

    fn parse_postfix_expression(&self, pair: Pair<Rule>) -> ASTNode {
        let mut inner = pair.into_inner();
        let factor = self.parse_factor(inner.next().unwrap());
        match inner.next() {
            Some(op_pair) => ASTNode::Postfix {
                op: parse_postfixop(op_pair.as_str()),
                expression: Box::new(factor),
            },
            None => factor,
        }
    }

    fn parse_factor(&self, pair: Pair<Rule>) -> ASTNode {
        let mut inner = pair.into_inner();
        let first = inner.next().expect("factor is never empty");
        match first.as_rule() {
            Rule::call_expression => self.parse_call_expression(first),
            Rule::array_reference => self.parse_array_reference(first),
            Rule::expression => ASTNode::Paren(Box::new(self.parse_expression(first))),
            Rule::const_float => ASTNode::Literal(Literal::Float(first.as_str().parse().expect("const_float grammar matches f64 syntax"))),
            Rule::const_int => ASTNode::Literal(Literal::Integer(first.as_str().parse().expect("const_int grammar matches i64 syntax"))),
            Rule::id => ASTNode::VarRef(first.as_str().to_string()),
            other => panic!("Whoops! Unprocessed factor rule: {:?}", other),
        }
    }

    fn parse_call_expression(&self, pair: Pair<Rule>) -> ASTNode {
        let mut inner = pair.into_inner();
        let name = inner.next().expect("call_expression always has an id").as_str().to_string();
        let argument_list = inner.next().expect("call_expression always has an argument_list");
        let arguments = argument_list
            .into_inner()
            .map(|expression_pair| self.parse_expression(expression_pair))
            .collect();
        ASTNode::Call { name, arguments }
    }

    fn parse_array_reference(&self, pair: Pair<Rule>) -> ASTNode {
        let mut inner = pair.into_inner();
        let name = inner.next().expect("array_reference always has an id").as_str().to_string();
        let index = self.parse_expression(inner.next().expect("array_reference always has an index expression"));
        ASTNode::ArrayRef {
            name,
            index: Box::new(index),
        }
    }
}

fn parse_type_specifier(pair: Pair<Rule>) -> DataType {
    DataType::parse(pair.as_str()).expect("type_specifier grammar only admits int | float | void")
}

fn parse_addop(spelling: &str) -> AddOp {
    match spelling {
        "+" => AddOp::Add,
        "-" => AddOp::Sub,
        other => panic!("Whoops! Unprocessed addop spelling: {:?}", other),
    }
}

fn parse_mulop(spelling: &str) -> MulOp {
    match spelling {
        "*" => MulOp::Mul,
        "/" => MulOp::Div,
        "%" => MulOp::Mod,
        other => panic!("Whoops! Unprocessed mulop spelling: {:?}", other),
    }
}

fn parse_relop(spelling: &str) -> RelOp {
    match spelling {
        "<" => RelOp::LessThan,
        ">" => RelOp::GreaterThan,
        "<=" => RelOp::LessEqual,
        ">=" => RelOp::GreaterEqual,
        "==" => RelOp::Equal,
        "!=" => RelOp::NotEqual,
        other => panic!("Whoops! Unprocessed relop spelling: {:?}", other),
    }
}

fn parse_logicop(spelling: &str) -> LogicOp {
    match spelling {
        "&&" => LogicOp::And,
        "||" => LogicOp::Or,
        other => panic!("Whoops! Unprocessed logicop spelling: {:?}", other),
    }
}

fn parse_unaryop(spelling: &str) -> UnaryOp {
    match spelling {
        "+" => UnaryOp::Plus,
        "-" => UnaryOp::Negate,
        "!" => UnaryOp::Not,
        other => panic!("Whoops! Unprocessed unaryop spelling: {:?}", other),
    }
}

fn parse_postfixop(spelling: &str) -> PostfixOp {
    match spelling {
        "++" => PostfixOp::Increment,
        "--" => PostfixOp::Decrement,
        other => panic!("Whoops! Unprocessed postfixop spelling: {:?}", other),
    }
}
