use crate::{
    ast::ast::NodeKind,
    errors::errors::{Error, ErrorImpl},
    lexer::{lexer::Scan, tokens::is_reserved},
};

use super::{
    lookups::{BindingPower, ASSIGNMENT_OPERATORS, LEVEL_LOOKUP, PREFIX_OPERATORS},
    parser::Parser,
    stmt::{parse_block, parse_param_list},
};

/// Assignment, the loosest level. Right-associative: the right-hand side is
/// another equation, so `a = b = 1` nests as `a = (b = 1)`.
pub fn parse_equation(parser: &mut Parser) -> Result<bool, Error> {
    let watermark = parser.depth();

    if !parse_expr(parser, BindingPower::Logical)? {
        return Ok(false);
    }

    if parser.match_any_operator(ASSIGNMENT_OPERATORS) {
        if !parse_equation(parser)? {
            return Err(parser.incomplete("equation"));
        }
        parser.build_match(NodeKind::Equation, watermark);
    }

    Ok(true)
}

/// One left-associative level of the chain, and everything tighter.
///
/// A lone operand is left on the stack as it is; a composite of the level's
/// kind only appears once an operator matched.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<bool, Error> {
    let Some(level) = LEVEL_LOOKUP.get(&bp) else {
        return parse_value(parser);
    };

    let watermark = parser.depth();
    if !parse_expr(parser, bp.tighter())? {
        return Ok(false);
    }

    let mut matched = false;
    while parser.match_any_operator(level.operators) {
        matched = true;
        if !parse_expr(parser, bp.tighter())? {
            return Err(parser.incomplete(level.construct));
        }
    }

    if matched {
        parser.build_match(level.kind, watermark);
    }

    Ok(true)
}

/// A primary value followed by any number of call `( )` and index `[ ]`
/// suffixes.
pub fn parse_value(parser: &mut Parser) -> Result<bool, Error> {
    let watermark = parser.depth();

    if !parse_primary(parser)? {
        return Ok(false);
    }

    loop {
        if parser.symbol("(") {
            parse_arg_list(parser)?;
            if !parser.symbol(")") {
                return Err(parser.incomplete("function call"));
            }
            parser.build_match(NodeKind::FunCall, watermark);
        } else if parser.symbol("[") {
            parser.skip_newlines();
            if !parse_equation(parser)? {
                return Err(parser.incomplete("array access"));
            }
            parser.skip_newlines();
            if !parser.symbol("]") {
                return Err(parser.incomplete("array access"));
            }
            parser.build_match(NodeKind::ArrayCall, watermark);
        } else {
            break;
        }
    }

    Ok(true)
}

fn parse_primary(parser: &mut Parser) -> Result<bool, Error> {
    Ok(parse_number(parser)
        || parse_quoted(parser)?
        || parse_lambda(parser)?
        || parse_var_decl(parser)?
        || parse_attr_decl(parser)?
        || parse_prefix(parser)?
        || parse_paren(parser)?
        || parse_inline_container(parser)?
        || parse_id(parser))
}

fn parse_number(parser: &mut Parser) -> bool {
    let entry = parser.checkpoint();
    parser.lexer().skip_whitespace();
    let start = parser.lexer().cursor();

    match parser.lexer().number() {
        Some(kind) => {
            parser.capture(start, kind);
            true
        }
        None => {
            parser.restore(entry);
            false
        }
    }
}

fn parse_quoted(parser: &mut Parser) -> Result<bool, Error> {
    let entry = parser.checkpoint();
    parser.lexer().skip_whitespace();
    let start = parser.lexer().cursor();

    for (quote, kind, unclosed) in [
        ('"', NodeKind::QuotedString, ErrorImpl::UnclosedString),
        ('\'', NodeKind::SingleQuotedString, ErrorImpl::UnclosedSingleQuotedString),
    ] {
        match parser.lexer().quoted(quote) {
            Scan::Matched => {
                parser.capture(start, kind);
                return Ok(true);
            }
            Scan::Unterminated => return Err(parser.error_at(unclosed, start.position())),
            Scan::NoMatch => {}
        }
    }

    parser.restore(entry);
    Ok(false)
}

/// `fun (params) { ... }` in value position.
fn parse_lambda(parser: &mut Parser) -> Result<bool, Error> {
    let watermark = parser.depth();

    if !parser.keyword("fun") {
        return Ok(false);
    }

    if !parser.symbol("(") {
        return Err(parser.incomplete("anonymous function"));
    }
    parse_param_list(parser)?;
    if !parser.symbol(")") {
        return Err(parser.incomplete("anonymous function"));
    }
    if !parse_block(parser)? {
        return Err(parser.incomplete("anonymous function"));
    }

    parser.build_match(NodeKind::Lambda, watermark);
    Ok(true)
}

fn parse_var_decl(parser: &mut Parser) -> Result<bool, Error> {
    let watermark = parser.depth();

    if !parser.keyword("var") {
        return Ok(false);
    }
    if !parser.capture_id() {
        return Err(parser.incomplete("variable declaration"));
    }

    parser.build_match(NodeKind::VarDecl, watermark);
    Ok(true)
}

/// `attr Class::name`
fn parse_attr_decl(parser: &mut Parser) -> Result<bool, Error> {
    let watermark = parser.depth();

    if !parser.keyword("attr") {
        return Ok(false);
    }
    if !parser.capture_id() || !parser.symbol("::") || !parser.capture_id() {
        return Err(parser.incomplete("attribute declaration"));
    }

    parser.build_match(NodeKind::AttrDecl, watermark);
    Ok(true)
}

/// `++x`, `--x`, `-x` and `!x`. The operand binds like a dot access, so
/// `-a.b` negates the whole access.
fn parse_prefix(parser: &mut Parser) -> Result<bool, Error> {
    let watermark = parser.depth();

    let (kind, construct) = if parser.match_any_operator(PREFIX_OPERATORS) {
        (NodeKind::Prefix, "prefix expression")
    } else if parser.match_operator("-", false, false) {
        (NodeKind::Negate, "negation expression")
    } else if parser.match_operator("!", false, false) {
        (NodeKind::Not, "'!' expression")
    } else {
        return Ok(false);
    };

    if !parse_expr(parser, BindingPower::Member)? {
        return Err(parser.incomplete(construct));
    }

    parser.build_match(kind, watermark);
    Ok(true)
}

/// `( equation )`; the inner node is passed through unwrapped.
fn parse_paren(parser: &mut Parser) -> Result<bool, Error> {
    if !parser.symbol("(") {
        return Ok(false);
    }

    parser.skip_newlines();
    if !parse_equation(parser)? {
        return Err(parser.incomplete("parenthesized expression"));
    }
    parser.skip_newlines();
    if !parser.symbol(")") {
        return Err(parser.incomplete("parenthesized expression"));
    }

    Ok(true)
}

/// Bracketed literals: `[a, b]`, `[k: v, ...]`, `[a..b]`, `[]` and `[:]`.
fn parse_inline_container(parser: &mut Parser) -> Result<bool, Error> {
    let watermark = parser.depth();

    if !parser.symbol("[") {
        return Ok(false);
    }
    parser.skip_newlines();

    if parser.symbol("]") {
        parser.build_match(NodeKind::InlineArray, watermark);
        return Ok(true);
    }

    if parser.match_operator(":", false, false) {
        parser.skip_newlines();
        if !parser.symbol("]") {
            return Err(parser.incomplete("inline map"));
        }
        parser.build_match(NodeKind::InlineMap, watermark);
        return Ok(true);
    }

    if !parse_equation(parser)? {
        return Err(parser.incomplete("inline array"));
    }

    if parser.symbol("..") {
        parser.skip_newlines();
        if !parse_equation(parser)? {
            return Err(parser.incomplete("inline range"));
        }
        parser.build_match(NodeKind::ValueRange, watermark);
        parser.skip_newlines();
        if !parser.symbol("]") {
            return Err(parser.incomplete("inline range"));
        }
        parser.build_match(NodeKind::InlineRange, watermark);
        return Ok(true);
    }

    if parser.match_operator(":", false, false) {
        parse_map_value(parser, watermark)?;
        loop {
            parser.skip_newlines();
            if !parser.symbol(",") {
                break;
            }
            parser.skip_newlines();

            let pair_watermark = parser.depth();
            if !parse_equation(parser)? || !parser.match_operator(":", false, false) {
                return Err(parser.incomplete("inline map"));
            }
            parse_map_value(parser, pair_watermark)?;
        }
        if !parser.symbol("]") {
            return Err(parser.incomplete("inline map"));
        }
        parser.build_match(NodeKind::InlineMap, watermark);
        return Ok(true);
    }

    loop {
        parser.skip_newlines();
        if !parser.symbol(",") {
            break;
        }
        parser.skip_newlines();
        if !parse_equation(parser)? {
            return Err(parser.incomplete("inline array"));
        }
    }
    if !parser.symbol("]") {
        return Err(parser.incomplete("inline array"));
    }

    parser.build_match(NodeKind::InlineArray, watermark);
    Ok(true)
}

/// The value half of a map pair, whose key is already on the stack.
fn parse_map_value(parser: &mut Parser, watermark: usize) -> Result<(), Error> {
    parser.skip_newlines();
    if !parse_equation(parser)? {
        return Err(parser.incomplete("inline map"));
    }
    parser.build_match(NodeKind::MapPair, watermark);
    Ok(())
}

/// Identifier that is not a reserved word.
fn parse_id(parser: &mut Parser) -> bool {
    let entry = parser.checkpoint();

    if !parser.capture_id() {
        return false;
    }

    let reserved = parser
        .last()
        .is_some_and(|node| is_reserved(&node.text));
    if reserved {
        parser.restore(entry);
        return false;
    }

    true
}

/// Call arguments, collected into one `Arg_List` (possibly empty).
pub fn parse_arg_list(parser: &mut Parser) -> Result<(), Error> {
    let watermark = parser.depth();
    parser.skip_newlines();

    if parse_equation(parser)? {
        loop {
            parser.skip_newlines();
            if !parser.symbol(",") {
                break;
            }
            parser.skip_newlines();
            if !parse_equation(parser)? {
                return Err(parser.incomplete("function call"));
            }
        }
    }
    parser.skip_newlines();

    parser.build_match(NodeKind::ArgList, watermark);
    Ok(())
}
