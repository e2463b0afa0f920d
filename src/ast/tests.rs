use super::expression::Expression;

#[test]
fn test_prenex_symbol() {
    let expr = Expression::from_prenex("a").unwrap();
    assert_eq!(expr, Expression::Symbol('a'));
}

#[test]
fn test_prenex_operand_order() {
    let expr = Expression::from_prenex("CONCAT a b").unwrap();
    assert_eq!(
        expr,
        Expression::concat(Expression::Symbol('a'), Expression::Symbol('b'))
    );

    let expr = Expression::from_prenex("UNION a b").unwrap();
    assert_eq!(
        expr,
        Expression::union(Expression::Symbol('a'), Expression::Symbol('b'))
    );
}

#[test]
fn test_prenex_nested() {
    let expr = Expression::from_prenex("UNION CONCAT a b STAR c").unwrap();
    assert_eq!(expr.to_string(), "Union(Concat(Symbol(a), Symbol(b)), Star(Symbol(c)))");
}

#[test]
fn test_prenex_plus_and_escape() {
    let expr = Expression::from_prenex("PLUS \\n").unwrap();
    assert_eq!(expr, Expression::plus(Expression::Symbol('\n')));
    assert_eq!(expr.to_string(), "Plus(Symbol(\\n))");
}

#[test]
fn test_prenex_missing_operand() {
    let error = Expression::from_prenex("CONCAT a").unwrap_err();
    assert_eq!(error.get_error_name(), "MalformedPrenex");
}

#[test]
fn test_prenex_leftover_operands() {
    let error = Expression::from_prenex("a b").unwrap_err();
    assert_eq!(error.get_error_name(), "MalformedPrenex");
}

#[test]
fn test_prenex_empty() {
    let error = Expression::from_prenex("   ").unwrap_err();
    assert_eq!(error.get_error_name(), "EmptyPattern");
}

#[test]
fn test_prenex_multi_char_symbol_rejected() {
    let error = Expression::from_prenex("CONCAT ab c").unwrap_err();
    assert_eq!(error.get_error_name(), "MalformedPrenex");
}

#[test]
fn test_any_of() {
    let expr = Expression::any_of("abc").unwrap();
    assert_eq!(expr.to_string(), "Union(Symbol(a), Union(Symbol(b), Symbol(c)))");
    assert!(Expression::any_of("").is_none());
}
