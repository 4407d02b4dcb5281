use minic_sema::{Analyzer, PestAstParser};

fn analyse(source: &str) -> Vec<String> {
    let analyzer: Analyzer<PestAstParser> = Analyzer::default();
    let outcome = analyzer.analyse_str(source);
    outcome.diagnostics.iter().map(|diagnostic| diagnostic.render()).collect()
}

#[test]
fn s1_duplicate_top_level_declaration() {
    let diagnostics = analyse("int x; int x;");
    assert_eq!(diagnostics, vec!["At line no: 1 Multiple declaration of variable x"]);
}

#[test]
fn s2_non_integer_array_index() {
    let diagnostics = analyse("int main(){ int a[10]; a[2.5] = 3; }");
    assert!(diagnostics
        .iter()
        .any(|line| line.contains("array index is not of integer type : a")));
}

#[test]
fn s3_void_function_used_as_a_value() {
    let diagnostics = analyse("void f(){} int main(){ int x; x = f(); }");
    assert!(diagnostics.iter().any(|line| line.contains("operation on void type")));
}

#[test]
fn s4_call_arity_then_argument_type_mismatch() {
    let diagnostics = analyse("int add(int a, float b){ return a+3; } int main(){ add(1); add(1,2); }");
    assert!(diagnostics
        .iter()
        .any(|line| line.contains("Inconsistencies in number of arguments in function call: add")));
    assert!(diagnostics
        .iter()
        .any(|line| line.contains("argument 2 type mismatch in function call: add")));
}

#[test]
fn s5_float_to_int_assignment_is_a_warning() {
    let diagnostics = analyse("int main(){ int x; float y; y=1.5; x=y; }");
    assert!(diagnostics
        .iter()
        .any(|line| line.contains("Warning: Assignment of float value into variable of integer type")));
}

#[test]
fn s6_division_and_modulus_diagnostics() {
    let diagnostics = analyse("int main(){ int x; x = 5/0; x = 5%2.5; }");
    assert!(diagnostics.iter().any(|line| line.contains("Division by 0")));
    assert!(diagnostics
        .iter()
        .any(|line| line.contains("Modulus operator on non integer type")));
}

#[test]
fn clean_program_reports_zero_errors() {
    let diagnostics = analyse("int add(int a, int b){ return a+b; } int main(){ int x; x = add(1,2); }");
    assert!(diagnostics.is_empty());
}

#[test]
fn shadowing_survives_a_full_parse_and_analyse_pass() {
    let diagnostics = analyse("int x; int main(){ float x; x = 1.5; }");
    assert!(diagnostics.is_empty());
}
