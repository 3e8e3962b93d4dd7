//! Unit tests for the type checker module.
//!
//! This module contains tests for node construction including:
//! - Type mapping and spellings
//! - Symbol table resolution and binding
//! - Expression typing, promotion and rendering
//! - Statement validation and rendering
//! - Lowering from the syntax tree

use std::rc::Rc;

use super::{
    operators::Operator,
    symbols::{BindingMode, SymbolTable},
    type_checker::lower_block,
    typed_expr::{TypedExpr, TypedExprKind},
    typed_stmt::{AssignTarget, StmtText, TypedStmt},
    types::{to_semantic, to_target, ReturnType, SemanticType, TargetType},
};
use crate::{
    ast::{expressions::Literal, types::TypeAnnotation},
    errors::errors::ErrorImpl,
    lexer::lexer::tokenize,
    parser::parser::parse,
    Position, Span,
};

fn int(value: i64) -> TypedExpr {
    TypedExpr::constant(Literal::Int(value), Span::null()).unwrap()
}

fn float(value: f64) -> TypedExpr {
    TypedExpr::constant(Literal::Float(value), Span::null()).unwrap()
}

fn boolean(value: bool) -> TypedExpr {
    TypedExpr::constant(Literal::Bool(value), Span::null()).unwrap()
}

fn symbols_with(parameters: &[(&str, SemanticType)]) -> SymbolTable {
    let mut symbols = SymbolTable::new();
    for (name, ty) in parameters {
        symbols.declare_parameter(name.to_string(), *ty);
    }
    symbols
}

fn var(symbols: &SymbolTable, name: &str) -> TypedExpr {
    TypedExpr::variable(symbols, name, Span::null()).unwrap()
}

fn line(stmt: &TypedStmt) -> &str {
    match stmt.text() {
        StmtText::Line(line) => line,
        StmtText::Block { .. } => panic!("expected a single line"),
    }
}

/// Lowers the body of the first function in `source`.
fn lower(source: &str, parameters: &[(&str, SemanticType)]) -> Result<Vec<TypedStmt>, crate::errors::errors::Error> {
    let tokens = tokenize(source.to_string(), Some("test.py".to_string())).unwrap();
    let module = parse(tokens, Rc::new("test.py".to_string())).1.unwrap();
    let mut symbols = symbols_with(parameters);
    lower_block(&mut symbols, &module.functions[0].body)
}

fn symbol(name: &str) -> TypeAnnotation {
    TypeAnnotation::Symbol {
        name: name.to_string(),
        position: Position::null(),
    }
}

fn list_of(name: &str, element: &str) -> TypeAnnotation {
    TypeAnnotation::Generic {
        base: Box::new(symbol(name)),
        arguments: vec![symbol(element)],
        position: Position::null(),
    }
}

#[test]
fn test_to_semantic_accepts_supported_types() {
    assert_eq!(to_semantic(&symbol("bool")).unwrap(), SemanticType::Bool);
    assert_eq!(to_semantic(&symbol("int")).unwrap(), SemanticType::Int);
    assert_eq!(to_semantic(&symbol("float")).unwrap(), SemanticType::Float);
    assert_eq!(to_semantic(&list_of("list", "int")).unwrap(), SemanticType::IntList);
    assert_eq!(to_semantic(&list_of("List", "float")).unwrap(), SemanticType::FloatList);
}

#[test]
fn test_to_semantic_rejects_unsupported_types() {
    let error = to_semantic(&symbol("str")).unwrap_err();
    assert_eq!(
        error.kind(),
        &ErrorImpl::UnsupportedType {
            type_: "str".to_string()
        }
    );

    assert!(to_semantic(&list_of("list", "bool")).is_err());
    assert!(to_semantic(&list_of("dict", "int")).is_err());
}

#[test]
fn test_to_target_table() {
    assert_eq!(to_target(SemanticType::Bool), TargetType::Bool);
    assert_eq!(to_target(SemanticType::Int), TargetType::Int);
    assert_eq!(to_target(SemanticType::Float), TargetType::Double);
    assert_eq!(to_target(SemanticType::IntList), TargetType::IntArray);
    assert_eq!(to_target(SemanticType::FloatList), TargetType::DoubleArray);
}

#[test]
fn test_type_spellings() {
    assert_eq!(TargetType::Int.declaration("i", None).unwrap(), "int i");
    assert_eq!(TargetType::DoubleArray.declaration("xs", Some(3)).unwrap(), "double xs[3]");
    assert_eq!(TargetType::IntArray.declaration("xs", None), None);
    assert_eq!(TargetType::DoubleArray.parameter("a"), "double *a");
    assert_eq!(TargetType::Bool.parameter("flag"), "bool flag");
    assert_eq!(ReturnType::Value(SemanticType::IntList).spelling(), "int *");
    assert_eq!(ReturnType::Value(SemanticType::Float).spelling(), "double");
    assert_eq!(ReturnType::Void.spelling(), "void");
}

#[test]
fn test_operator_spellings() {
    assert_eq!(Operator::FloorDiv.spelling(), "/");
    assert_eq!(Operator::Mod.spelling(), "%");
    assert_eq!(Operator::Not.spelling(), "!");
    assert_eq!(Operator::And.spelling(), "&&");
    assert_eq!(Operator::Or.spelling(), "||");
    assert_eq!(Operator::USub.spelling(), "-");
    assert_eq!(Operator::FloorDiv.to_string(), "//");
}

#[test]
fn test_resolve_reference_of_unknown_name() {
    let symbols = SymbolTable::new();
    let error = symbols.resolve_reference("x", Position::null()).unwrap_err();

    assert_eq!(
        error.kind(),
        &ErrorImpl::UndefinedVariable {
            variable: "x".to_string()
        }
    );
}

#[test]
fn test_resolve_binding_target_modes() {
    let mut symbols = symbols_with(&[("n", SemanticType::Int)]);

    let existing = symbols.resolve_binding_target("n");
    assert_eq!(existing.mode, BindingMode::Reuse);
    assert_eq!(existing.ty, Some(SemanticType::Int));

    let fresh = symbols.resolve_binding_target("x");
    assert_eq!(fresh.mode, BindingMode::New);
    assert_eq!(fresh.ty, None);

    // pending entries are not readable until bound
    assert!(symbols.resolve_reference("x", Position::null()).is_err());
    symbols.bind("x", SemanticType::Float, None, Position::null()).unwrap();
    assert_eq!(
        symbols.resolve_reference("x", Position::null()).unwrap().ty,
        Some(SemanticType::Float)
    );
}

#[test]
fn test_bound_variables_are_not_retyped() {
    let mut symbols = SymbolTable::new();
    symbols.resolve_binding_target("x");
    symbols.bind("x", SemanticType::Int, None, Position::null()).unwrap();

    assert!(symbols.bind("x", SemanticType::Float, None, Position::null()).is_err());
    assert_eq!(symbols.lookup("x").unwrap().ty, Some(SemanticType::Int));
}

#[test]
fn test_constant_rendering() {
    assert_eq!(boolean(true).text(), "true");
    assert_eq!(boolean(false).text(), "false");
    assert_eq!(int(42).text(), "42");
    assert_eq!(float(2.0).text(), "2.0");
    assert_eq!(float(1.23).text(), "1.23");
    assert_eq!(float(2.0).ty(), Some(SemanticType::Float));
}

#[test]
fn test_array_literal() {
    let array = TypedExpr::array(vec![Literal::Int(1), Literal::Int(2), Literal::Int(3)], Span::null()).unwrap();

    assert_eq!(array.text(), "{1, 2, 3}");
    assert_eq!(array.ty(), Some(SemanticType::IntList));
    assert!(matches!(array.kind(), TypedExprKind::Array { size: 3, .. }));
}

#[test]
fn test_array_literal_errors() {
    let empty = TypedExpr::array(vec![], Span::null()).unwrap_err();
    assert_eq!(empty.kind(), &ErrorImpl::EmptyArrayLiteral);

    let mixed = TypedExpr::array(vec![Literal::Int(1), Literal::Float(2.0)], Span::null()).unwrap_err();
    assert_eq!(mixed.get_error_name(), "MixedArrayLiteral");

    let booleans = TypedExpr::array(vec![Literal::Bool(true)], Span::null()).unwrap_err();
    assert_eq!(booleans.get_error_name(), "UnsupportedType");
}

#[test]
fn test_compare_chain_rendering() {
    let symbols = symbols_with(&[("a", SemanticType::Int), ("b", SemanticType::Int), ("c", SemanticType::Int)]);

    let chain = TypedExpr::compare(
        var(&symbols, "a"),
        vec![Operator::Lt, Operator::LtE],
        vec![var(&symbols, "b"), var(&symbols, "c")],
        Span::null(),
    )
    .unwrap();
    assert_eq!(chain.text(), "(a < b && b <= c)");
    assert_eq!(chain.ty(), Some(SemanticType::Bool));

    let single = TypedExpr::compare(var(&symbols, "a"), vec![Operator::Eq], vec![var(&symbols, "b")], Span::null()).unwrap();
    assert_eq!(single.text(), "(a == b)");
}

#[test]
fn test_compare_chain_shape_is_checked() {
    let error = TypedExpr::compare(int(1), vec![Operator::Lt], vec![], Span::null()).unwrap_err();
    assert_eq!(error.get_error_name(), "MalformedNode");

    let error = TypedExpr::compare(int(1), vec![Operator::Add], vec![int(2)], Span::null()).unwrap_err();
    assert_eq!(error.get_error_name(), "MalformedNode");
}

#[test]
fn test_binary_promotion_is_commutative() {
    for op in [Operator::Add, Operator::Sub, Operator::Mult] {
        let both_int = TypedExpr::binary(int(1), op, int(2), Span::null()).unwrap();
        assert_eq!(both_int.ty(), Some(SemanticType::Int));

        let left_float = TypedExpr::binary(float(1.0), op, int(2), Span::null()).unwrap();
        let right_float = TypedExpr::binary(int(1), op, float(2.0), Span::null()).unwrap();
        assert_eq!(left_float.ty(), Some(SemanticType::Float));
        assert_eq!(right_float.ty(), Some(SemanticType::Float));
    }
}

#[test]
fn test_int_division_casts_left_operand() {
    let division = TypedExpr::binary(int(7), Operator::Div, int(2), Span::null()).unwrap();
    assert_eq!(division.text(), "((double)7 / 2)");
    assert_eq!(division.ty(), Some(SemanticType::Float));

    let mixed = TypedExpr::binary(float(7.0), Operator::Div, int(2), Span::null()).unwrap();
    assert_eq!(mixed.text(), "(7.0 / 2)");
}

#[test]
fn test_floor_division_has_no_cast() {
    let division = TypedExpr::binary(int(7), Operator::FloorDiv, int(2), Span::null()).unwrap();
    assert_eq!(division.text(), "(7 / 2)");
    assert_eq!(division.ty(), Some(SemanticType::Int));
}

#[test]
fn test_floor_division_and_modulo_reject_floats() {
    for op in [Operator::FloorDiv, Operator::Mod] {
        for (left, right) in [(float(1.0), int(2)), (int(1), float(2.0)), (float(1.0), float(2.0))] {
            let error = TypedExpr::binary(left, op, right, Span::null()).unwrap_err();
            assert_eq!(error.get_error_name(), "UnsupportedOperation");
        }
    }
}

#[test]
fn test_binary_rejects_non_numeric_operands() {
    let error = TypedExpr::binary(boolean(true), Operator::Add, int(1), Span::null()).unwrap_err();

    assert_eq!(
        error.kind(),
        &ErrorImpl::InvalidOperandTypes {
            operator: "+".to_string(),
            left: "bool".to_string(),
            right: "int".to_string(),
        }
    );
}

#[test]
fn test_unary_keeps_operand_type() {
    let negated = TypedExpr::unary(Operator::USub, float(1.0), Span::null()).unwrap();
    assert_eq!(negated.text(), "(-1.0)");
    assert_eq!(negated.ty(), Some(SemanticType::Float));

    let not = TypedExpr::unary(Operator::Not, boolean(false), Span::null()).unwrap();
    assert_eq!(not.text(), "(!false)");
}

#[test]
fn test_bool_chain_rendering() {
    let symbols = symbols_with(&[("a", SemanticType::Bool), ("b", SemanticType::Bool), ("c", SemanticType::Bool)]);
    let chain = TypedExpr::bool_chain(
        Operator::Or,
        vec![var(&symbols, "a"), var(&symbols, "b"), var(&symbols, "c")],
        Span::null(),
    )
    .unwrap();

    assert_eq!(chain.text(), "(a || b || c)");
    assert_eq!(chain.ty(), Some(SemanticType::Bool));

    let error = TypedExpr::bool_chain(Operator::And, vec![var(&symbols, "a")], Span::null()).unwrap_err();
    assert_eq!(error.get_error_name(), "MalformedNode");
}

#[test]
fn test_subscript_and_index() {
    let symbols = symbols_with(&[("a", SemanticType::FloatList), ("i", SemanticType::Int), ("x", SemanticType::Float)]);

    let index = TypedExpr::index(var(&symbols, "i")).unwrap();
    let subscript = TypedExpr::subscript(var(&symbols, "a"), index, Span::null()).unwrap();
    assert_eq!(subscript.text(), "a[i]");
    assert_eq!(subscript.ty(), Some(SemanticType::Float));

    let error = TypedExpr::index(var(&symbols, "x")).unwrap_err();
    assert_eq!(
        error.kind(),
        &ErrorImpl::InvalidIndexType {
            received: "float".to_string()
        }
    );

    let error = TypedExpr::subscript(var(&symbols, "x"), TypedExpr::index(int(0)).unwrap(), Span::null()).unwrap_err();
    assert_eq!(error.get_error_name(), "UnsupportedType");
}

#[test]
fn test_call_typing() {
    let mut symbols = symbols_with(&[("x", SemanticType::Float)]);
    symbols.declare_function("sqrt".to_string(), ReturnType::Value(SemanticType::Float));

    let known = TypedExpr::call(&symbols, "sqrt", vec![var(&symbols, "x")], Span::null()).unwrap();
    assert_eq!(known.text(), "sqrt(x)");
    assert_eq!(known.ty(), Some(SemanticType::Float));

    let unknown = TypedExpr::call(&symbols, "helper", vec![var(&symbols, "x"), int(3)], Span::null()).unwrap();
    assert_eq!(unknown.text(), "helper(x, 3)");
    assert_eq!(unknown.ty(), None);
}

#[test]
fn test_unresolved_call_in_typed_position() {
    let symbols = SymbolTable::new();
    let call = TypedExpr::call(&symbols, "helper", vec![], Span::null()).unwrap();
    let error = TypedExpr::binary(call, Operator::Add, int(1), Span::null()).unwrap_err();

    assert_eq!(
        error.kind(),
        &ErrorImpl::UnresolvedReturnType {
            function: "helper".to_string()
        }
    );

    // negation keeps the call unresolved
    let call = TypedExpr::call(&symbols, "helper", vec![], Span::null()).unwrap();
    let negated = TypedExpr::unary(Operator::USub, call, Span::null()).unwrap();
    assert_eq!(negated.resolved_type().unwrap_err().get_error_name(), "UnresolvedReturnType");
}

#[test]
fn test_assign_new_variable_is_declared() {
    let mut symbols = SymbolTable::new();
    let target = AssignTarget::Variable(symbols.resolve_binding_target("i"));
    let stmt = TypedStmt::assign(&mut symbols, vec![target], int(0), Span::null()).unwrap();

    assert_eq!(line(&stmt), "int i = 0;");
    assert_eq!(symbols.lookup("i").unwrap().ty, Some(SemanticType::Int));
}

#[test]
fn test_assign_array_sets_size() {
    let mut symbols = SymbolTable::new();
    let value = TypedExpr::array(vec![Literal::Float(1.5), Literal::Float(2.5)], Span::null()).unwrap();
    let target = AssignTarget::Variable(symbols.resolve_binding_target("xs"));
    let stmt = TypedStmt::assign(&mut symbols, vec![target], value, Span::null()).unwrap();

    assert_eq!(line(&stmt), "double xs[2] = {1.5, 2.5};");
    assert_eq!(symbols.lookup("xs").unwrap().size, Some(2));
}

#[test]
fn test_assign_new_array_without_literal() {
    let mut symbols = symbols_with(&[("a", SemanticType::IntList)]);
    let value = var(&symbols, "a");
    let target = AssignTarget::Variable(symbols.resolve_binding_target("b"));
    let error = TypedStmt::assign(&mut symbols, vec![target], value, Span::null()).unwrap_err();

    assert_eq!(
        error.kind(),
        &ErrorImpl::ArrayWithoutSize {
            variable: "b".to_string()
        }
    );
}

#[test]
fn test_assign_reuse_requires_exact_type() {
    let mut symbols = symbols_with(&[("i", SemanticType::Int)]);
    let target = AssignTarget::Variable(symbols.resolve_binding_target("i"));
    let error = TypedStmt::assign(&mut symbols, vec![target], float(1.0), Span::null()).unwrap_err();

    assert_eq!(
        error.kind(),
        &ErrorImpl::ImplicitCastNotSupported {
            from: "float".to_string(),
            to: "int".to_string(),
        }
    );

    let target = AssignTarget::Variable(symbols.resolve_binding_target("i"));
    let stmt = TypedStmt::assign(&mut symbols, vec![target], int(5), Span::null()).unwrap();
    assert_eq!(line(&stmt), "i = 5;");
}

#[test]
fn test_assign_multiple_targets() {
    let mut symbols = symbols_with(&[("a", SemanticType::Int), ("b", SemanticType::Int)]);
    let targets = vec![
        AssignTarget::Variable(symbols.resolve_binding_target("a")),
        AssignTarget::Variable(symbols.resolve_binding_target("b")),
    ];
    let stmt = TypedStmt::assign(&mut symbols, targets, int(1), Span::null()).unwrap();
    assert_eq!(line(&stmt), "a = b = 1;");

    let targets = vec![
        AssignTarget::Variable(symbols.resolve_binding_target("a")),
        AssignTarget::Variable(symbols.resolve_binding_target("fresh")),
    ];
    let error = TypedStmt::assign(&mut symbols, targets, int(1), Span::null()).unwrap_err();
    assert_eq!(error.get_error_name(), "MultipleTargetsNotSupported");
}

#[test]
fn test_aug_assign_rules() {
    let symbols = symbols_with(&[("i", SemanticType::Int), ("x", SemanticType::Float)]);

    let stmt = TypedStmt::aug_assign(var(&symbols, "i"), Operator::FloorDiv, int(4), Span::null()).unwrap();
    assert_eq!(line(&stmt), "i /= 4;");

    let stmt = TypedStmt::aug_assign(var(&symbols, "x"), Operator::Div, float(4.0), Span::null()).unwrap();
    assert_eq!(line(&stmt), "x /= 4.0;");

    let error = TypedStmt::aug_assign(var(&symbols, "i"), Operator::Add, float(1.0), Span::null()).unwrap_err();
    assert_eq!(error.get_error_name(), "ImplicitCastNotSupported");

    let error = TypedStmt::aug_assign(var(&symbols, "i"), Operator::Div, int(2), Span::null()).unwrap_err();
    assert_eq!(error.get_error_name(), "UnsupportedOperation");

    let error = TypedStmt::aug_assign(var(&symbols, "x"), Operator::Mod, int(2), Span::null()).unwrap_err();
    assert_eq!(error.get_error_name(), "UnsupportedOperation");
}

#[test]
fn test_return_statement() {
    let stmt = TypedStmt::return_stmt(Some(float(1.0)), Span::null()).unwrap();
    assert_eq!(line(&stmt), "return 1.0;");

    let bare = TypedStmt::return_stmt(None, Span::null()).unwrap();
    assert_eq!(line(&bare), "return;");
}

#[test]
fn test_lower_if_block() {
    let body = lower(
        "def f(x: int):\n    if x > 0:\n        y = 1\n    return x\n",
        &[("x", SemanticType::Int)],
    )
    .unwrap();

    match body[0].text() {
        StmtText::Block { header, tail } => {
            assert_eq!(header, "if (x > 0) {");
            assert_eq!(tail, "}");
        }
        StmtText::Line(_) => panic!("expected a block"),
    }
    assert_eq!(line(&body[0].body()[0]), "int y = 1;");
    assert_eq!(line(&body[1]), "return x;");
}

#[test]
fn test_lower_condition_is_parenthesized() {
    let body = lower("def f(flag: bool):\n    while flag:\n        flag = False\n", &[("flag", SemanticType::Bool)]).unwrap();

    match body[0].text() {
        StmtText::Block { header, .. } => assert_eq!(header, "while (flag) {"),
        StmtText::Line(_) => panic!("expected a block"),
    }
}

#[test]
fn test_lower_else_branch_is_rejected() {
    let error = lower("def f(x: int):\n    if x > 0:\n        x = 1\n    else:\n        x = 2\n", &[("x", SemanticType::Int)])
        .unwrap_err();

    assert_eq!(error.kind(), &ErrorImpl::UnsupportedElseBranch);
}

#[test]
fn test_lower_undefined_variable() {
    let error = lower("def f():\n    y = x + 1\n", &[]).unwrap_err();

    assert_eq!(
        error.kind(),
        &ErrorImpl::UndefinedVariable {
            variable: "x".to_string()
        }
    );
}

#[test]
fn test_lower_negative_array_elements() {
    let body = lower("def f():\n    xs = [-1, 2, -3]\n", &[]).unwrap();

    assert_eq!(line(&body[0]), "int xs[3] = {-1, 2, -3};");
}

#[test]
fn test_lower_subscript_assignment_rejects_implicit_cast() {
    let error = lower("def f(a: list[float]):\n    a[1] = 100\n", &[("a", SemanticType::FloatList)]).unwrap_err();

    assert_eq!(
        error.kind(),
        &ErrorImpl::ImplicitCastNotSupported {
            from: "int".to_string(),
            to: "float".to_string(),
        }
    );
}

#[test]
fn test_lower_aug_assign_requires_existing_target() {
    let error = lower("def f():\n    total += 1\n", &[]).unwrap_err();

    assert_eq!(error.get_error_name(), "UndefinedVariable");
}

#[test]
fn test_subscript_of_array_literal_is_rejected() {
    let literal = TypedExpr::array(vec![Literal::Int(1), Literal::Int(2)], Span::null()).unwrap();
    let index = TypedExpr::index(int(0)).unwrap();
    let error = TypedExpr::subscript(literal, index, Span::null()).unwrap_err();

    assert_eq!(error.get_error_name(), "UnsupportedOperation");

    let error = lower("def f():\n    x = [1, 2][0]\n    return x\n", &[]).unwrap_err();
    assert_eq!(
        error.kind(),
        &ErrorImpl::UnsupportedOperation {
            operator: "[]".to_string(),
            operands: "`list[int]` values other than variables".to_string()
        }
    );
}
