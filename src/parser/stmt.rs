use crate::{
    ast::ast::NodeKind,
    errors::errors::{Error, ErrorImpl},
};

use super::{
    expr::parse_equation,
    parser::{parse_statements, Parser},
};

/// `fun name`, `fun Class::name`, each with an optional parameter list and an
/// optional body, optionally preceded by an annotation.
///
/// The annotation is taken off the build stack and attached to the
/// definition node instead of becoming one of its children. An annotation
/// without a following `fun` is not a definition at all.
pub fn parse_def(parser: &mut Parser) -> Result<bool, Error> {
    let entry = parser.checkpoint();

    let mut annotation = None;
    if parser.annotation() {
        while parser.separator() {}
        annotation = parser.pop();
    }

    let watermark = parser.depth();
    if !parser.keyword("fun") {
        parser.restore(entry);
        return Ok(false);
    }

    if !parser.capture_id() {
        return Err(parser.error(ErrorImpl::MissingFunctionName));
    }

    let mut kind = NodeKind::Def;
    if parser.symbol("::") {
        kind = NodeKind::Method;
        if !parser.capture_id() {
            return Err(parser.error(ErrorImpl::MissingMethodName));
        }
    }

    if parser.symbol("(") {
        parse_param_list(parser)?;
        if !parser.symbol(")") {
            return Err(parser.incomplete("function definition"));
        }
    }

    parse_block(parser)?;

    parser.build_match(kind, watermark);
    if let Some(annotation) = annotation {
        if let Some(definition) = parser.last_mut() {
            definition.annotation = Some(Box::new(annotation));
        }
    }

    Ok(true)
}

/// Comma separated identifiers, collected into one `Arg_List`.
pub fn parse_param_list(parser: &mut Parser) -> Result<(), Error> {
    let watermark = parser.depth();
    parser.skip_newlines();

    if parser.capture_id() {
        loop {
            parser.skip_newlines();
            if !parser.symbol(",") {
                break;
            }
            parser.skip_newlines();
            if !parser.capture_id() {
                return Err(parser.error(ErrorImpl::UnexpectedParameter));
            }
        }
    }
    parser.skip_newlines();

    let closed = parser.checkpoint();
    if !parser.symbol(")") {
        return Err(parser.error(ErrorImpl::UnexpectedParameter));
    }
    parser.restore(closed);

    parser.build_match(NodeKind::ArgList, watermark);
    Ok(())
}

/// `{ statements }`
pub fn parse_block(parser: &mut Parser) -> Result<bool, Error> {
    let watermark = parser.depth();

    if !parser.symbol("{") {
        return Ok(false);
    }

    parse_statements(parser)?;

    if !parser.symbol("}") {
        return Err(parser.incomplete("block"));
    }

    parser.build_match(NodeKind::Block, watermark);
    Ok(true)
}

/// `( equation )` as used by `if` and `while`.
fn parse_condition(parser: &mut Parser, construct: &'static str) -> Result<(), Error> {
    if !parser.symbol("(") {
        return Err(parser.incomplete(construct));
    }
    parser.skip_newlines();
    if !parse_equation(parser)? {
        return Err(parser.incomplete(construct));
    }
    parser.skip_newlines();
    if !parser.symbol(")") {
        return Err(parser.incomplete(construct));
    }
    Ok(())
}

/// Looks past line breaks for `word`; backs out if it is not there.
fn keyword_after_newlines(parser: &mut Parser, word: &str) -> bool {
    let entry = parser.checkpoint();
    parser.skip_newlines();
    if parser.keyword(word) {
        true
    } else {
        parser.restore(entry);
        false
    }
}

/// `if (c) { } else if (c) { } else { }`
pub fn parse_if(parser: &mut Parser) -> Result<bool, Error> {
    let watermark = parser.depth();

    if !parser.keyword("if") {
        return Ok(false);
    }

    parse_condition(parser, "'if' expression")?;
    if !parse_block(parser)? {
        return Err(parser.incomplete("'if' block"));
    }

    while keyword_after_newlines(parser, "else") {
        if parser.keyword("if") {
            parse_condition(parser, "'else if' expression")?;
            if !parse_block(parser)? {
                return Err(parser.incomplete("'else if' block"));
            }
        } else {
            if !parse_block(parser)? {
                return Err(parser.incomplete("'else' block"));
            }
            break;
        }
    }

    parser.build_match(NodeKind::If, watermark);
    Ok(true)
}

/// `while (c) { }`
pub fn parse_while(parser: &mut Parser) -> Result<bool, Error> {
    let watermark = parser.depth();

    if !parser.keyword("while") {
        return Ok(false);
    }

    parse_condition(parser, "'while' expression")?;
    if !parse_block(parser)? {
        return Err(parser.incomplete("'while' block"));
    }

    parser.build_match(NodeKind::While, watermark);
    Ok(true)
}

/// `for (init; condition; step) { }`
pub fn parse_for(parser: &mut Parser) -> Result<bool, Error> {
    let watermark = parser.depth();

    if !parser.keyword("for") {
        return Ok(false);
    }

    if !parser.symbol("(") {
        return Err(parser.incomplete("'for' expression"));
    }
    for terminator in [";", ";", ")"] {
        if !parse_equation(parser)? || !parser.symbol(terminator) {
            return Err(parser.incomplete("'for' expression"));
        }
    }

    if !parse_block(parser)? {
        return Err(parser.incomplete("'for' block"));
    }

    parser.build_match(NodeKind::For, watermark);
    Ok(true)
}

/// `try { } catch (e) { } finally { }`
pub fn parse_try(parser: &mut Parser) -> Result<bool, Error> {
    let watermark = parser.depth();

    if !parser.keyword("try") {
        return Ok(false);
    }

    if !parse_block(parser)? {
        return Err(parser.incomplete("'try' block"));
    }

    while keyword_after_newlines(parser, "catch") {
        let catch_watermark = parser.depth();
        if parser.symbol("(") {
            let list_watermark = parser.depth();
            if !parser.capture_id() || !parser.symbol(")") {
                return Err(parser.incomplete("'catch' expression"));
            }
            parser.build_match(NodeKind::ArgList, list_watermark);
        }
        if !parse_block(parser)? {
            return Err(parser.incomplete("'catch' block"));
        }
        parser.build_match(NodeKind::Catch, catch_watermark);
    }

    if keyword_after_newlines(parser, "finally") {
        let finally_watermark = parser.depth();
        if !parse_block(parser)? {
            return Err(parser.incomplete("'finally' block"));
        }
        parser.build_match(NodeKind::Finally, finally_watermark);
    }

    parser.build_match(NodeKind::Try, watermark);
    Ok(true)
}

/// `return` with an optional value.
pub fn parse_return(parser: &mut Parser) -> Result<bool, Error> {
    let watermark = parser.depth();

    if !parser.keyword("return") {
        return Ok(false);
    }

    parse_equation(parser)?;

    parser.build_match(NodeKind::Return, watermark);
    Ok(true)
}

pub fn parse_break(parser: &mut Parser) -> Result<bool, Error> {
    Ok(parser.capture_keyword("break", NodeKind::Break))
}
