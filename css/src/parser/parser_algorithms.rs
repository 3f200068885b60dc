use crate::tokenizer::Token;

use super::token_streams::{Step, TokenStream};
use super::types::{AtRule, ComponentValue, Declaration, Function, QualifiedRule, Rule, SimpleBlock};

/// 5.5.1. Consume a stylesheet's contents
///
/// https://drafts.csswg.org/css-syntax-3/#consume-a-stylesheets-contents
pub(crate) fn consume_a_stylesheets_contents(input: &TokenStream) -> Vec<Rule> {
    let mut rules = vec![];

    input.process(|token| match token {
        Token::Whitespace | Token::Cdo | Token::Cdc => {
            input.discard_a_token();
            Step::Continue
        }
        Token::EndOfFile => Step::Done(std::mem::take(&mut rules)),
        Token::AtKeyword { .. } => {
            // Consume an at-rule from input. If anything is returned, append it to rules.
            if let Some(at_rule) = consume_an_at_rule(input, false) {
                rules.push(Rule::AtRule(at_rule));
            }
            Step::Continue
        }
        _ => {
            // Consume a qualified rule from input. If a rule is returned, append it to rules.
            if let Some(qualified_rule) = consume_a_qualified_rule(input, None, false) {
                rules.push(Rule::QualifiedRule(qualified_rule));
            }
            Step::Continue
        }
    })
}

/// 5.5.2. Consume an at-rule
///
/// https://drafts.csswg.org/css-syntax-3/#consume-at-rule
pub(crate) fn consume_an_at_rule(input: &TokenStream, nested: bool) -> Option<AtRule> {
    // Assert: The next token is an <at-keyword-token>.
    let Token::AtKeyword { value } = input.consume_a_token() else {
        log_parse_error!("expected an at-keyword");
        return None;
    };

    let mut rule = AtRule {
        name: value.clone(),
        prelude: vec![],
        declarations: vec![],
        child_rules: vec![],
        has_block: false,
    };

    input.process(|token| match token {
        Token::Semicolon | Token::EndOfFile => {
            input.discard_a_token();
            Step::Done(Some(rule.clone()))
        }
        Token::RightCurlyBracket => {
            if nested {
                return Step::Done(Some(rule.clone()));
            }
            log_parse_error!("unexpected '}' in at-rule prelude");
            rule.prelude
                .push(ComponentValue::PreservedToken(input.consume_a_token().clone()));
            Step::Continue
        }
        Token::LeftCurlyBracket => {
            let (declarations, child_rules) = consume_a_block(input);
            rule.declarations = declarations;
            rule.child_rules = child_rules;
            rule.has_block = true;
            Step::Done(Some(rule.clone()))
        }
        _ => {
            rule.prelude.push(consume_a_component_value(input));
            Step::Continue
        }
    })
}

/// 5.5.3. Consume a qualified rule
///
/// https://drafts.csswg.org/css-syntax-3/#consume-qualified-rule
pub(crate) fn consume_a_qualified_rule(
    input: &TokenStream,
    stop_token: Option<&Token>,
    nested: bool,
) -> Option<QualifiedRule> {
    let mut rule = QualifiedRule {
        prelude: vec![],
        declarations: vec![],
        child_rules: vec![],
    };

    input.process(|token| match token {
        token if token == &Token::EndOfFile || Some(token) == stop_token => {
            log_parse_error!("unexpected end of qualified rule");
            Step::Done(None)
        }
        Token::RightCurlyBracket => {
            log_parse_error!("unexpected '}' while parsing a qualified rule");
            if nested {
                return Step::Done(None);
            }
            rule.prelude
                .push(ComponentValue::PreservedToken(input.consume_a_token().clone()));
            Step::Continue
        }
        Token::LeftCurlyBracket => {
            // If the first two non-<whitespace-token> values of rule’s prelude are an <ident-token> whose value
            // starts with "--" followed by a <colon-token>, consume the remnants of a bad declaration from input,
            // with nested, and return nothing.
            let mut significant = rule.prelude.iter().filter(|value| !value.is_whitespace());
            if let (
                Some(ComponentValue::PreservedToken(Token::Ident { value })),
                Some(ComponentValue::PreservedToken(Token::Colon)),
            ) = (significant.next(), significant.next())
            {
                if value.starts_with("--") {
                    consume_the_remnants_of_a_bad_declaration(input, nested);
                    return Step::Done(None);
                }
            }

            let (declarations, child_rules) = consume_a_block(input);
            rule.declarations = declarations;
            rule.child_rules = child_rules;
            Step::Done(Some(rule.clone()))
        }
        _ => {
            rule.prelude.push(consume_a_component_value(input));
            Step::Continue
        }
    })
}

/// 5.5.4. Consume a block
///
/// https://drafts.csswg.org/css-syntax-3/#consume-block
pub(crate) fn consume_a_block(input: &TokenStream) -> (Vec<Declaration>, Vec<Rule>) {
    // Assert: The next token is a <{-token>.
    debug_assert_eq!(input.next_token(), &Token::LeftCurlyBracket);

    input.discard_a_token();
    let (declarations, rules) = consume_a_blocks_contents(input);
    input.discard_a_token();

    (declarations, rules)
}

/// 5.5.5. Consume a block's contents
///
/// https://drafts.csswg.org/css-syntax-3/#consume-block-contents
pub(crate) fn consume_a_blocks_contents(input: &TokenStream) -> (Vec<Declaration>, Vec<Rule>) {
    let mut declarations = vec![];
    let mut rules = vec![];

    input.process(|token| match token {
        Token::Whitespace | Token::Semicolon => {
            input.discard_a_token();
            Step::Continue
        }
        Token::EndOfFile | Token::RightCurlyBracket => {
            Step::Done((std::mem::take(&mut declarations), std::mem::take(&mut rules)))
        }
        Token::AtKeyword { .. } => {
            if let Some(at_rule) = consume_an_at_rule(input, true) {
                rules.push(Rule::AtRule(at_rule));
            }
            Step::Continue
        }
        _ => {
            input.mark();

            if let Some(declaration) = consume_a_declaration(input, true) {
                declarations.push(declaration);
                input.discard_a_mark();
                return Step::Continue;
            }

            // Otherwise, restore a mark from input, then consume a qualified rule from input,
            // with nested set to true, and <semicolon-token> as the stop token.
            input.restore_a_mark();
            if let Some(qualified_rule) =
                consume_a_qualified_rule(input, Some(&Token::Semicolon), true)
            {
                rules.push(Rule::QualifiedRule(qualified_rule));
            }
            Step::Continue
        }
    })
}

/// 5.5.6. Consume a declaration
///
/// https://drafts.csswg.org/css-syntax-3/#consume-declaration
pub(crate) fn consume_a_declaration(input: &TokenStream, nested: bool) -> Option<Declaration> {
    // 1. If the next token is an <ident-token>, consume a token from input and set decl’s name to the token’s value.
    let name = match input.next_token() {
        Token::Ident { value } => value.clone(),
        _ => {
            consume_the_remnants_of_a_bad_declaration(input, nested);
            return None;
        }
    };
    input.discard_a_token();

    // 2. Discard whitespace from input.
    input.discard_whitespace();

    // 3. If the next token is a <colon-token>, discard a token from input.
    if input.next_token() != &Token::Colon {
        consume_the_remnants_of_a_bad_declaration(input, nested);
        return None;
    }
    input.discard_a_token();

    // 4. Discard whitespace from input.
    input.discard_whitespace();

    // 5. Consume a list of component values from input, with nested, and with <semicolon-token> as the stop token.
    let mut value = consume_a_list_of_component_values(input, Some(&Token::Semicolon), nested);

    // 6. If the last two non-<whitespace-token>s in decl’s value are a <delim-token> with the value "!"
    //    followed by an <ident-token> with a value that is an ASCII case-insensitive match for "important",
    //    remove them from decl’s value and set decl’s important flag.
    let significant: Vec<usize> = value
        .iter()
        .enumerate()
        .filter(|(_, value)| !value.is_whitespace())
        .map(|(index, _)| index)
        .rev()
        .take(2)
        .collect();
    let mut important = false;
    if let [ident_index, delim_index] = significant[..] {
        let is_bang = value[delim_index]
            == ComponentValue::PreservedToken(Token::Delim { value: '!' });
        let is_important = matches!(
            &value[ident_index],
            ComponentValue::PreservedToken(Token::Ident { value }) if value.eq_ignore_ascii_case("important")
        );
        if is_bang && is_important {
            value.truncate(delim_index);
            important = true;
        }
    }

    // 7. While the last item in decl’s value is a <whitespace-token>, remove that token.
    while value.last().is_some_and(|value| value.is_whitespace()) {
        value.pop();
    }

    // 8. Otherwise, if decl’s value contains a top-level simple block with an associated token of <{-token>,
    //    and also contains any other non-<whitespace-token> value, return nothing.
    let has_curly_block = value.iter().any(|value| {
        matches!(value, ComponentValue::SimpleBlock(block) if block.associated_token == Token::LeftCurlyBracket)
    });
    if has_curly_block && !name.starts_with("--") && value.len() > 1 {
        return None;
    }

    Some(Declaration {
        name,
        value,
        important,
    })
}

/// 5.5.7. Consume the remnants of a bad declaration
///
/// https://drafts.csswg.org/css-syntax-3/#consume-the-remnants-of-a-bad-declaration
pub(crate) fn consume_the_remnants_of_a_bad_declaration(input: &TokenStream, nested: bool) {
    input.process(|token| match token {
        Token::EndOfFile | Token::Semicolon => {
            input.discard_a_token();
            Step::Done(())
        }
        Token::RightCurlyBracket => {
            if nested {
                return Step::Done(());
            }
            input.discard_a_token();
            Step::Continue
        }
        _ => {
            consume_a_component_value(input);
            Step::Continue
        }
    })
}

/// 5.5.8. Consume a list of component values
///
/// https://drafts.csswg.org/css-syntax-3/#consume-list-of-components
pub(crate) fn consume_a_list_of_component_values(
    input: &TokenStream,
    stop_token: Option<&Token>,
    nested: bool,
) -> Vec<ComponentValue> {
    let mut values = vec![];

    input.process(|token| match token {
        token if token == &Token::EndOfFile || Some(token) == stop_token => {
            Step::Done(std::mem::take(&mut values))
        }
        Token::RightCurlyBracket => {
            if nested {
                return Step::Done(std::mem::take(&mut values));
            }
            log_parse_error!("unexpected '}' in a list of component values");
            values.push(ComponentValue::PreservedToken(input.consume_a_token().clone()));
            Step::Continue
        }
        _ => {
            values.push(consume_a_component_value(input));
            Step::Continue
        }
    })
}

/// 5.5.9. Consume a component value
///
/// https://drafts.csswg.org/css-syntax-3/#consume-component-value
pub(crate) fn consume_a_component_value(input: &TokenStream) -> ComponentValue {
    match input.next_token() {
        Token::LeftCurlyBracket | Token::LeftSquareBracket | Token::LeftParenthesis => {
            ComponentValue::SimpleBlock(consume_a_simple_block(input))
        }
        Token::Function { .. } => ComponentValue::Function(consume_a_function(input)),
        _ => ComponentValue::PreservedToken(input.consume_a_token().clone()),
    }
}

/// 5.5.10. Consume a simple block
///
/// https://drafts.csswg.org/css-syntax-3/#consume-simple-block
pub(crate) fn consume_a_simple_block(input: &TokenStream) -> SimpleBlock {
    let associated_token = input.consume_a_token().clone();
    // Let ending token be the mirror variant of the next token.
    let ending_token = associated_token.mirror();

    let mut block = SimpleBlock {
        associated_token,
        values: vec![],
    };

    input.process(|token| match token {
        Token::EndOfFile => {
            log_parse_error!("EOF in simple block");
            Step::Done(block.clone())
        }
        token if Some(token) == ending_token.as_ref() => {
            input.discard_a_token();
            Step::Done(block.clone())
        }
        _ => {
            block.values.push(consume_a_component_value(input));
            Step::Continue
        }
    })
}

/// 5.5.11. Consume a function
///
/// https://drafts.csswg.org/css-syntax-3/#consume-function
pub(crate) fn consume_a_function(input: &TokenStream) -> Function {
    let name = match input.consume_a_token() {
        Token::Function { value } => value.clone(),
        token => {
            log_parse_error!(format!("expected a function token, got {token:?}"));
            String::new()
        }
    };

    let mut function = Function {
        name,
        value: vec![],
    };

    input.process(|token| match token {
        Token::EndOfFile => {
            log_parse_error!("EOF in function");
            Step::Done(function.clone())
        }
        Token::RightParenthesis => {
            input.discard_a_token();
            Step::Done(function.clone())
        }
        _ => {
            function.value.push(consume_a_component_value(input));
            Step::Continue
        }
    })
}
