//! Integration tests for end-to-end transpilation.
//!
//! These tests drive the complete pipeline from Python source through
//! tokenization, parsing, lowering and rendering.

use transpiler::{
    compiler::compiler::{IndentStyle, TranspileOptions},
    errors::errors::ErrorImpl,
    format_error, transpile_source,
    type_checker::types::{ReturnType, SemanticType},
};

const SAMPLE: &str = r#"from_typing_is_not_needed = None

def sample_func(a, n):
    ### definitions
    ## define int variable
    i = 0
    ## define float variable
    out = 1.23
    ## define bool variable
    flag = True
    ## define list of int
    array_int = [1, 2, 3, 4, 5]
    ## define list of float
    array_float = [1.23, 4.56, 7.89]

    ### arithmetics
    ## int
    i = 1 + (2 - 3) * 4
    i = 4 // 2 + 5 % 3
    i = -2
    ## float
    out = 1.2 + (3.4 - 5.6) * 7.8 / 9.0
    out = -1.0
    ## int and float
    out = 1 + 2.0 + (3 - 4.0) * 5 / 6.0

    ### Assign/AugAssign
    ## int
    i += 1
    i -= 2
    i *= 3
    i //= 4
    i %= 5
    ## float
    out += -1.0
    out -= 2.0
    out *= 3.0
    out /= 4.0

    ### Array Operations
    array_int[1] = 100
    array_float[2] = 123.456
    i = array_int[0] + array_int[1]
    out = array_float[0] + array_float[2]

    ### Boolean / Logical Operations
    is_ok = True
    is_ng = False
    ## And, Not, Or
    if is_ok or is_ng:
        return 1.0 + 1
    if is_ok and not is_ng:
        return out

    # Nested Comparisons
    if i == 1 and out == 1.0 or out != 2.0:
        out += 1.0
    # Multiple Comparisons
    if i == 1 and out == 1.0 and out != 2.0:
        out += 1.0
    # Multiple Comparators
    if 1 < 2 < i < 4 <= 6:
        out += 1.0
    # Multiple Comparators (rare case)
    if 1 > -1 < i >= 100:
        out += 1.0

    ### While Statement
    i = 0
    while i < n:
        out += a[i]
        i += 1

    ### Func Call
    sample_func(array_float, 3)

    return out
"#;

const SAMPLE_OUTPUT: &str = "double sample_func(double *a, int n) {
\tint i = 0;
\tdouble out = 1.23;
\tbool flag = true;
\tint array_int[5] = {1, 2, 3, 4, 5};
\tdouble array_float[3] = {1.23, 4.56, 7.89};
\ti = (1 + ((2 - 3) * 4));
\ti = ((4 / 2) + (5 % 3));
\ti = (-2);
\tout = (1.2 + (((3.4 - 5.6) * 7.8) / 9.0));
\tout = (-1.0);
\tout = ((1 + 2.0) + (((3 - 4.0) * 5) / 6.0));
\ti += 1;
\ti -= 2;
\ti *= 3;
\ti /= 4;
\ti %= 5;
\tout += (-1.0);
\tout -= 2.0;
\tout *= 3.0;
\tout /= 4.0;
\tarray_int[1] = 100;
\tarray_float[2] = 123.456;
\ti = (array_int[0] + array_int[1]);
\tout = (array_float[0] + array_float[2]);
\tbool is_ok = true;
\tbool is_ng = false;
\tif (is_ok || is_ng) {
\t\treturn (1.0 + 1);
\t}
\tif (is_ok && (!is_ng)) {
\t\treturn out;
\t}
\tif (((i == 1) && (out == 1.0)) || (out != 2.0)) {
\t\tout += 1.0;
\t}
\tif ((i == 1) && (out == 1.0) && (out != 2.0)) {
\t\tout += 1.0;
\t}
\tif (1 < 2 && 2 < i && i < 4 && 4 <= 6) {
\t\tout += 1.0;
\t}
\tif (1 > (-1) && (-1) < i && i >= 100) {
\t\tout += 1.0;
\t}
\ti = 0;
\twhile (i < n) {
\t\tout += a[i];
\t\ti += 1;
\t}
\tsample_func(array_float, 3);
\treturn out;
}
";

fn sample_source() -> String {
    // the first line only proves top-level statements are rejected
    SAMPLE.lines().skip(2).map(|line| format!("{}\n", line)).collect()
}

fn with_arg_types(types: Vec<SemanticType>) -> TranspileOptions {
    TranspileOptions {
        param_types: Some(types),
        ..TranspileOptions::default()
    }
}

#[test]
fn test_arithmetic_with_parentheses() {
    let source = "def f():\n    i = 1 + (2 - 3) * 4\n    return i\n";
    let out = transpile_source(source, "f.py", None, &TranspileOptions::default()).unwrap();

    assert_eq!(out, "int f() {\n\tint i = (1 + ((2 - 3) * 4));\n\treturn i;\n}\n");
}

#[test]
fn test_mixed_arithmetic_declares_double() {
    let source = "def f():\n    out = 1 + 2.0\n    return out\n";
    let out = transpile_source(source, "f.py", None, &TranspileOptions::default()).unwrap();

    assert_eq!(out, "double f() {\n\tdouble out = (1 + 2.0);\n\treturn out;\n}\n");
}

#[test]
fn test_subscript_assignment_needs_matching_type() {
    let source = "def f(a):\n    a[1] = 100\n";
    let error = transpile_source(source, "f.py", None, &with_arg_types(vec![SemanticType::FloatList])).unwrap_err();

    assert_eq!(
        error.kind(),
        &ErrorImpl::ImplicitCastNotSupported {
            from: "int".to_string(),
            to: "float".to_string()
        }
    );
}

#[test]
fn test_sample_function() {
    let options = with_arg_types(vec![SemanticType::FloatList, SemanticType::Int]);
    let out = transpile_source(&sample_source(), "sample.py", Some("sample_func"), &options).unwrap();

    assert_eq!(out, SAMPLE_OUTPUT);
}

#[test]
fn test_sample_function_needs_parameter_types() {
    let error = transpile_source(&sample_source(), "sample.py", None, &TranspileOptions::default()).unwrap_err();

    assert_eq!(
        error.kind(),
        &ErrorImpl::MissingParameterType {
            parameter: "a".to_string()
        }
    );
}

#[test]
fn test_top_level_statements_are_rejected() {
    let error = transpile_source(SAMPLE, "sample.py", None, &TranspileOptions::default()).unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
    assert_eq!(error.get_position().0, 0);
}

#[test]
fn test_function_selection() {
    let source = "def f():\n    return 1\n\ndef g(x: float):\n    return x\n";

    let out = transpile_source(source, "m.py", Some("g"), &TranspileOptions::default()).unwrap();
    assert_eq!(out, "double g(double x) {\n\treturn x;\n}\n");

    let error = transpile_source(source, "m.py", Some("h"), &TranspileOptions::default()).unwrap_err();
    assert_eq!(
        error.kind(),
        &ErrorImpl::FunctionNotFound {
            function: "h".to_string()
        }
    );
}

#[test]
fn test_extern_call_and_space_indent() {
    let source = "def f(xs: list[float], n: int) -> float:\n    total = 0.0\n    i = 0\n    while i < n:\n        total += weight(i) * xs[i]\n        i += 1\n    return total\n";
    let options = TranspileOptions {
        externs: vec![("weight".to_string(), ReturnType::Value(SemanticType::Float))],
        indent: IndentStyle::Spaces(2),
        ..TranspileOptions::default()
    };
    let out = transpile_source(source, "f.py", None, &options).unwrap();

    assert_eq!(
        out,
        "double f(double *xs, int n) {\n  double total = 0.0;\n  int i = 0;\n  while (i < n) {\n    total += (weight(i) * xs[i]);\n    i += 1;\n  }\n  return total;\n}\n"
    );
}

#[test]
fn test_unknown_callee_in_expression() {
    let source = "def f(x: int):\n    y = g(x) + 1\n";
    let error = transpile_source(source, "f.py", None, &TranspileOptions::default()).unwrap_err();

    assert_eq!(
        error.kind(),
        &ErrorImpl::UnresolvedReturnType {
            function: "g".to_string()
        }
    );
}

#[test]
fn test_floor_division_of_floats_is_rejected() {
    let source = "def f(x: float):\n    return x // 2.0\n";
    let error = transpile_source(source, "f.py", None, &TranspileOptions::default()).unwrap_err();

    assert_eq!(error.get_error_name(), "UnsupportedOperation");
}

#[test]
fn test_true_division_of_ints_casts() {
    let source = "def f(a: int, b: int):\n    return a / b\n";
    let out = transpile_source(source, "f.py", None, &TranspileOptions::default()).unwrap();

    assert_eq!(out, "double f(int a, int b) {\n\treturn ((double)a / b);\n}\n");
}

#[test]
fn test_else_branch_is_rejected() {
    let source = "def f(x: int):\n    if x > 0:\n        x = 1\n    else:\n        x = 2\n";
    let error = transpile_source(source, "f.py", None, &TranspileOptions::default()).unwrap_err();

    assert_eq!(error.kind(), &ErrorImpl::UnsupportedElseBranch);
}

#[test]
fn test_error_diagnostic_points_at_source() {
    let source = "def f():\n    return y\n";
    let error = transpile_source(source, "f.py", None, &TranspileOptions::default()).unwrap_err();
    let rendered = format_error(&error, source);

    assert!(rendered.starts_with("Error: UndefinedVariable"));
    assert!(rendered.contains("-> f.py"));
    assert!(rendered.contains("2 | return y"));
}

#[test]
fn test_lexer_errors_surface() {
    let error = transpile_source("def f():\n    x = 1 $ 2\n", "f.py", None, &TranspileOptions::default()).unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
}

#[test]
fn test_inconsistent_indentation() {
    let source = "def f():\n        x = 1\n    return x\n";
    let error = transpile_source(source, "f.py", None, &TranspileOptions::default()).unwrap_err();

    assert_eq!(error.kind(), &ErrorImpl::InconsistentIndentation);
}

#[test]
fn test_local_bound_inside_block_is_declared_there() {
    // the declaration lands inside the `if`, while the table stays flat
    let source = "def f(c: bool):\n    if c:\n        x = 1\n    return x\n";
    let out = transpile_source(source, "f.py", None, &TranspileOptions::default()).unwrap();

    assert_eq!(out, "int f(bool c) {\n\tif (c) {\n\t\tint x = 1;\n\t}\n\treturn x;\n}\n");
}

#[test]
fn test_indexing_a_list_literal_is_rejected() {
    let source = "def f():\n    x = [1, 2][0]\n    return x\n";
    let error = transpile_source(source, "f.py", None, &TranspileOptions::default()).unwrap_err();

    assert_eq!(error.get_error_name(), "UnsupportedOperation");
}
