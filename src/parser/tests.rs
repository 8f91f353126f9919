//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs including:
//! - The precedence chain and assignment
//! - Function and method definitions, annotations
//! - Values: literals, calls, containers, lambdas
//! - Control flow and statement separation
//! - Error reporting

use super::parser::{parse, Parser};
use crate::{
    ast::ast::{Node, NodeKind},
    errors::errors::{Error, ErrorImpl},
    Position, Span, EVAL_SOURCE,
};

fn parse_ok(source: &str) -> Node {
    match parse(source, "test.cyas") {
        Ok(node) => node,
        Err(error) => panic!("unexpected parse error: {}", error),
    }
}

fn sexpr(source: &str) -> String {
    parse_ok(source).to_string()
}

fn parse_err(source: &str) -> Error {
    match parse(source, "test.cyas") {
        Ok(node) => panic!("expected a parse error, got {}", node),
        Err(error) => error,
    }
}

/// Source text between two positions, found by rescanning the source.
fn slice(source: &str, span: Span) -> &str {
    let index_of = |position: Position| {
        let (mut line, mut column) = (1, 1);
        for (index, ch) in source.char_indices() {
            if line == position.line && column == position.column {
                return index;
            }
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        source.len()
    };

    &source[index_of(span.start)..index_of(span.end)]
}

#[test]
fn test_parse_empty_program() {
    let file = parse_ok("");

    assert_eq!(file.kind, NodeKind::File);
    assert!(file.children.is_empty());
    assert_eq!(file.span, Span::point(Position::new(1, 1)));
}

#[test]
fn test_parse_whitespace_and_comments_only() {
    let file = parse_ok("  // nothing here\n\n/* or here */\n");

    assert!(file.children.is_empty());
}

#[test]
fn test_multiplicative_binds_tighter_than_additive() {
    let file = parse_ok("1*2+3");
    let additive = &file.children[0];

    assert_eq!(additive.kind, NodeKind::Additive);
    assert_eq!(
        additive.child_kinds(),
        vec![NodeKind::Multiplicative, NodeKind::Str, NodeKind::Int]
    );
    assert_eq!(additive.children[0].to_string(), "(Multiplicative 1 * 2)");
    assert_eq!(file.to_string(), "(File (Additive (Multiplicative 1 * 2) + 3))");
}

#[test]
fn test_assignment_is_right_associative() {
    assert_eq!(sexpr("a=b=1"), "(File (Equation a = (Equation b = 1)))");
}

#[test]
fn test_single_operand_is_not_wrapped() {
    let file = parse_ok("x");

    assert_eq!(file.child_kinds(), vec![NodeKind::Id]);
    assert_eq!(file.children[0].text, "x");
}

#[test]
fn test_levels_collapse_left_to_right() {
    assert_eq!(sexpr("x.y.z"), "(File (Dot_Access x . y . z))");
    assert_eq!(sexpr("a || b && c"), "(File (Expression a || b && c))");
    assert_eq!(sexpr("a < b == c"), "(File (Comparison a < b == c))");
    assert_eq!(sexpr("8 / 4 % 3"), "(File (Multiplicative 8 / 4 % 3))");
}

#[test]
fn test_full_precedence_chain() {
    assert_eq!(
        sexpr("a + b < c * d && e"),
        "(File (Expression (Comparison (Additive a + b) < (Multiplicative c * d)) && e))"
    );
}

#[test]
fn test_compound_assignment_operators() {
    assert_eq!(sexpr("x += 1"), "(File (Equation x += 1))");
    assert_eq!(sexpr("x -= 1"), "(File (Equation x -= 1))");
    assert_eq!(sexpr("x *= 2"), "(File (Equation x *= 2))");
    assert_eq!(sexpr("x /= 2"), "(File (Equation x /= 2))");
    assert_eq!(sexpr("x := 1"), "(File (Equation x := 1))");
}

#[test]
fn test_equality_is_not_assignment() {
    let file = parse_ok("a == b");

    assert_eq!(file.children[0].kind, NodeKind::Comparison);
    assert_eq!(file.children[0].children[1].text, "==");
}

#[test]
fn test_incomplete_binary_expressions() {
    let error = parse_err("1 +");
    assert_eq!(error.get_reason(), "Incomplete additive expression");
    assert_eq!(*error.get_position(), Position::new(1, 4));

    assert_eq!(parse_err("2 *").get_reason(), "Incomplete multiplicative expression");
    assert_eq!(parse_err("a.").get_reason(), "Incomplete dot access expression");
    assert_eq!(parse_err("a <").get_reason(), "Incomplete comparison expression");
    assert_eq!(parse_err("a &&").get_reason(), "Incomplete expression");
    assert_eq!(parse_err("a =").get_reason(), "Incomplete equation");
}

#[test]
fn test_two_definitions_on_one_line() {
    let error = parse_err("fun a() fun b()");

    assert_eq!(
        error.get_reason(),
        "Two function definitions missing line separator"
    );
    assert_eq!(*error.get_position(), Position::new(1, 13));
}

#[test]
fn test_two_expressions_on_one_line() {
    let error = parse_err("a = 1 b = 2");

    assert_eq!(error.get_impl(), &ErrorImpl::ExpressionsMissingSeparator);
    assert_eq!(*error.get_position(), Position::new(1, 7));
}

#[test]
fn test_expression_after_block_needs_separator() {
    let error = parse_err("if (a) { } b = 1");

    assert_eq!(error.get_impl(), &ErrorImpl::ExpressionsMissingSeparator);
    assert_eq!(*error.get_position(), Position::new(1, 12));
}

#[test]
fn test_separators() {
    let file = parse_ok("a = 1; b = 2\nc = 3\r\nd = 4");

    assert_eq!(file.children.len(), 4);
    assert_eq!(file.children[3].start(), Position::new(3, 1));
}

#[test]
fn test_line_comment_separates_statements() {
    let file = parse_ok("a = 1 // first\nb = 2");

    assert_eq!(file.to_string(), "(File (Equation a = 1) (Equation b = 2))");
}

#[test]
fn test_block_comment_across_lines_separates_statements() {
    assert_eq!(sexpr("a /* x\n */ b"), "(File a b)");
    assert_eq!(sexpr("fun a() /* c\n */ fun b()"), "(File (Def a (Arg_List)) (Def b (Arg_List)))");
}

#[test]
fn test_line_comment_separates_definitions() {
    assert_eq!(sexpr("fun a() // c\nfun b()"), "(File (Def a (Arg_List)) (Def b (Arg_List)))");
}

#[test]
fn test_comment_on_one_line_is_not_a_separator() {
    let error = parse_err("a = 1 /* x */ b = 2");

    assert_eq!(error.get_impl(), &ErrorImpl::ExpressionsMissingSeparator);
    assert_eq!(*error.get_position(), Position::new(1, 15));
}

#[test]
fn test_unparsed_input() {
    let error = parse_err("a = 1 )");

    assert_eq!(error.get_reason(), "Unparsed input");
    assert_eq!(*error.get_position(), Position::new(1, 7));
}

#[test]
fn test_shebang_is_skipped() {
    let file = parse_ok("#!/usr/bin/env cyascript\nx = 1");

    assert_eq!(file.to_string(), "(File (Equation x = 1))");
    assert_eq!(file.children[0].start(), Position::new(2, 1));
}

#[test]
fn test_unterminated_block_comment_is_accepted() {
    let file = parse_ok("a = 1 /* never closed\nstill comment");

    assert_eq!(file.to_string(), "(File (Equation a = 1))");
}

#[test]
fn test_function_definition() {
    let file = parse_ok("fun add(a, b) {\n  a + b\n}");
    let def = &file.children[0];

    assert_eq!(def.kind, NodeKind::Def);
    assert_eq!(
        file.to_string(),
        "(File (Def add (Arg_List a b) (Block (Additive a + b))))"
    );
    assert!(def.annotation.is_none());
}

#[test]
fn test_function_declaration_without_body() {
    assert_eq!(sexpr("fun a\nfun b()"), "(File (Def a) (Def b (Arg_List)))");
}

#[test]
fn test_method_definition_with_annotation() {
    let file = parse_ok("# adds two values\nfun Point::add(x, y) {\n  x + y\n}");
    let method = &file.children[0];

    assert_eq!(file.children.len(), 1);
    assert_eq!(method.kind, NodeKind::Method);
    assert_eq!(
        method.to_string(),
        "(Method Point add (Arg_List x y) (Block (Additive x + y)))"
    );

    let annotation = method.annotation.as_ref().expect("annotation attached");
    assert_eq!(annotation.kind, NodeKind::Annotation);
    assert_eq!(annotation.text, "# adds two values\n");
    assert!(method.children.iter().all(|c| c.kind != NodeKind::Annotation));
}

#[test]
fn test_multi_line_annotation_and_blank_lines() {
    let file = parse_ok("## first\n# second\n\nfun f");
    let annotation = file.children[0].annotation.as_ref().expect("annotation");

    assert_eq!(annotation.text, "## first\n# second\n");
    assert_eq!(annotation.start(), Position::new(1, 1));
    assert_eq!(annotation.end(), Position::new(3, 1));
}

#[test]
fn test_annotation_without_definition_backtracks() {
    let error = parse_err("# note\nx = 1");

    assert_eq!(error.get_impl(), &ErrorImpl::UnparsedInput);
    assert_eq!(*error.get_position(), Position::new(1, 1));
}

#[test]
fn test_missing_function_name() {
    let error = parse_err("fun");

    assert_eq!(error.get_reason(), "Missing function name in definition");
    assert_eq!(*error.get_position(), Position::new(1, 4));
}

#[test]
fn test_missing_method_name() {
    let error = parse_err("fun Foo::");

    assert_eq!(error.get_reason(), "Missing method name in definition");
    assert_eq!(*error.get_position(), Position::new(1, 10));
}

#[test]
fn test_bad_parameter_list() {
    let error = parse_err("fun f(a b) { }");

    assert_eq!(error.get_impl(), &ErrorImpl::UnexpectedParameter);
}

#[test]
fn test_incomplete_block() {
    let error = parse_err("fun f() {\n x = 1\n");

    assert_eq!(error.get_reason(), "Incomplete block");
    assert_eq!(*error.get_position(), Position::new(3, 1));
}

#[test]
fn test_if_else_chain() {
    let source = "if (a < b) {\n  x = 1\n} else if (c) {\n  x = 2\n} else {\n  x = 3\n}";

    assert_eq!(
        sexpr(source),
        "(File (If (Comparison a < b) (Block (Equation x = 1)) c (Block (Equation x = 2)) (Block (Equation x = 3))))"
    );
}

#[test]
fn test_else_on_next_line() {
    assert_eq!(sexpr("if (a) {\n}\nelse {\n}"), "(File (If a (Block) (Block)))");
}

#[test]
fn test_incomplete_if() {
    assert_eq!(parse_err("if a { }").get_reason(), "Incomplete 'if' expression");
    assert_eq!(parse_err("if (a) b").get_reason(), "Incomplete 'if' block");
    assert_eq!(parse_err("if (a) { } else").get_reason(), "Incomplete 'else' block");
}

#[test]
fn test_while_loop() {
    assert_eq!(
        sexpr("while (i < 10) { i += 1 }"),
        "(File (While (Comparison i < 10) (Block (Equation i += 1))))"
    );
}

#[test]
fn test_for_loop() {
    assert_eq!(
        sexpr("for (i = 0; i < 3; ++i) { print(i) }"),
        "(File (For (Equation i = 0) (Comparison i < 3) (Prefix ++ i) (Block (Fun_Call print (Arg_List i)))))"
    );
    assert_eq!(parse_err("for (i = 0; i < 3) { }").get_reason(), "Incomplete 'for' expression");
}

#[test]
fn test_try_catch_finally() {
    let source = "try {\n  risky()\n} catch (e) {\n  log(e)\n} finally {\n  done()\n}";

    assert_eq!(
        sexpr(source),
        "(File (Try (Block (Fun_Call risky (Arg_List))) (Catch (Arg_List e) (Block (Fun_Call log (Arg_List e)))) (Finally (Block (Fun_Call done (Arg_List))))))"
    );
}

#[test]
fn test_return_and_break() {
    let source = "fun f(x) {\n  if (x) { return x }\n  while (true) { break }\n  return\n}";

    assert_eq!(
        sexpr(source),
        "(File (Def f (Arg_List x) (Block (If x (Block (Return x))) (While true (Block break)) (Return))))"
    );
}

#[test]
fn test_inline_containers() {
    assert_eq!(
        sexpr("a = [1, 2.5, \"s\"]"),
        "(File (Equation a = (Inline_Array 1 2.5 \"s\")))"
    );
    assert_eq!(
        sexpr("m = [\"a\": 1,\n     \"b\": 2]"),
        "(File (Equation m = (Inline_Map (Map_Pair \"a\" 1) (Map_Pair \"b\" 2))))"
    );
    assert_eq!(sexpr("[1..10]"), "(File (Inline_Range (Value_Range 1 10)))");
    assert_eq!(sexpr("x = [1..\n  2]"), "(File (Equation x = (Inline_Range (Value_Range 1 2))))");
    assert_eq!(sexpr("[]"), "(File (Inline_Array))");
    assert_eq!(sexpr("[:]"), "(File (Inline_Map))");
}

#[test]
fn test_incomplete_containers() {
    assert_eq!(parse_err("[1, ]").get_reason(), "Incomplete inline array");
    assert_eq!(parse_err("[1, 2").get_reason(), "Incomplete inline array");
    assert_eq!(parse_err("[\"a\": ]").get_reason(), "Incomplete inline map");
    assert_eq!(parse_err("[1..]").get_reason(), "Incomplete inline range");
}

#[test]
fn test_calls_and_indexing() {
    assert_eq!(
        sexpr("obj.method(1, x)[0]"),
        "(File (Dot_Access obj . (Array_Call (Fun_Call method (Arg_List 1 x)) 0)))"
    );
    assert_eq!(sexpr("f(1)(2)"), "(File (Fun_Call (Fun_Call f (Arg_List 1)) (Arg_List 2)))");
    assert_eq!(parse_err("f(1,)").get_reason(), "Incomplete function call");
    assert_eq!(parse_err("a[1").get_reason(), "Incomplete array access");
}

#[test]
fn test_empty_argument_list_sits_at_cursor() {
    let file = parse_ok("f()");
    let args = &file.children[0].children[1];

    assert_eq!(args.kind, NodeKind::ArgList);
    assert!(args.children.is_empty());
    assert_eq!(args.span, Span::point(Position::new(1, 3)));
}

#[test]
fn test_lambda() {
    assert_eq!(
        sexpr("f = fun(x, y) { x * y }"),
        "(File (Equation f = (Lambda (Arg_List x y) (Block (Multiplicative x * y)))))"
    );
    assert_eq!(parse_err("f = fun x").get_reason(), "Incomplete anonymous function");
}

#[test]
fn test_var_and_attr_declarations() {
    assert_eq!(sexpr("var x = 3"), "(File (Equation (Var_Decl x) = 3))");
    assert_eq!(sexpr("attr Point::x"), "(File (Attr_Decl Point x))");
    assert_eq!(parse_err("var").get_reason(), "Incomplete variable declaration");
}

#[test]
fn test_prefix_operators() {
    assert_eq!(
        sexpr("-a.b * !c"),
        "(File (Multiplicative (Negate (Dot_Access a . b)) * (Not c)))"
    );
    assert_eq!(sexpr("--n"), "(File (Prefix -- n))");
}

#[test]
fn test_parentheses_pass_through() {
    assert_eq!(sexpr("(1 + 2) * 3"), "(File (Multiplicative (Additive 1 + 2) * 3))");
    assert_eq!(parse_err("(1 + 2").get_reason(), "Incomplete parenthesized expression");
}

#[test]
fn test_literal_kinds() {
    let file = parse_ok("x = [1, 0x1F, 0b101, 2.5e3, \"s\", 'c', 123abc]");
    let array = &file.children[0].children[2];

    assert_eq!(
        array.child_kinds(),
        vec![
            NodeKind::Int,
            NodeKind::Int,
            NodeKind::Int,
            NodeKind::Float,
            NodeKind::QuotedString,
            NodeKind::SingleQuotedString,
            NodeKind::Id,
        ]
    );
}

#[test]
fn test_reserved_words_are_not_values() {
    assert_eq!(parse_err("x = while").get_reason(), "Incomplete equation");
}

#[test]
fn test_unclosed_string() {
    let error = parse_err("s = \"abc");

    assert_eq!(error.get_impl(), &ErrorImpl::UnclosedString);
    assert_eq!(*error.get_position(), Position::new(1, 5));
}

#[test]
fn test_error_during_evaluation() {
    let error = parse("fun", EVAL_SOURCE).unwrap_err();

    assert_eq!(
        error.to_string(),
        "[Error] Missing function name in definition \" during evaluation at (1, 4)"
    );
}

#[test]
fn test_parser_reuse_resets_state() {
    let mut parser = Parser::new();

    assert!(parser.parse("a = (1 +", "first.cyas").is_err());
    let reused = parser.parse("b = 2\nc = b * 3", "second.cyas").unwrap();
    let fresh = parse("b = 2\nc = b * 3", "second.cyas").unwrap();

    assert_eq!(reused, fresh);
    assert_eq!(reused.children[0].start(), Position::new(1, 1));
    assert_eq!(reused.file.as_str(), "second.cyas");
}

#[test]
fn test_leaf_spans_reproduce_source() {
    let source = "# greet\nfun greet(name) {\n  msg = \"hi \" + name\n  print(msg)\n}\nlist = [1, 2]\nr = [0..2]\nx = list[0] * -4 // tail\n";
    let file = parse_ok(source);

    let mut leaves = 0;
    file.walk(&mut |node| {
        assert!(node.end() >= node.start(), "{} ends before it starts", node.kind);
        if node.is_leaf() {
            leaves += 1;
            assert_eq!(slice(source, node.span), node.text);
        }
    });
    assert!(leaves > 10);

    let annotation = file.children[0].annotation.as_ref().expect("annotation");
    assert_eq!(slice(source, annotation.span), annotation.text);
}

#[test]
fn test_children_follow_source_order() {
    let file = parse_ok("a = b + c * d - e");

    let mut starts = Vec::new();
    file.walk(&mut |node| {
        if node.is_leaf() {
            starts.push(node.start());
        }
    });

    let mut sorted = starts.clone();
    sorted.sort();
    assert_eq!(starts, sorted);
}
