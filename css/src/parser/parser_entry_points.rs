use crate::tokenizer::{Token, Tokenizer};

use super::parser_algorithms::{
    consume_a_qualified_rule, consume_a_stylesheets_contents, consume_an_at_rule,
};
use super::token_streams::TokenStream;
use super::types::{Rule, StyleSheet};
use super::Parser;

/// 5.4. Parser Entry Points
///
/// https://www.w3.org/TR/css-syntax-3/#parser-entry-points
impl Parser {
    /// 5.4.3. Parse a stylesheet
    ///
    /// https://www.w3.org/TR/css-syntax-3/#parse-stylesheet
    pub fn parse_a_stylesheet(input: &TokenStream, location: Option<&str>) -> StyleSheet {
        // 3. Create a new stylesheet, with its location set to location (or null, if location was not passed).
        let mut stylesheet = StyleSheet::new(location);

        // 4. Consume a stylesheet’s contents from input, and set the stylesheet’s rules to the result.
        stylesheet.rules = consume_a_stylesheets_contents(input);

        stylesheet
    }

    /// 5.4.5. Parse a rule
    ///
    /// Returns `None` when the input holds anything other than exactly one rule.
    ///
    /// https://www.w3.org/TR/css-syntax-3/#parse-rule
    pub fn parse_a_rule(input: &TokenStream) -> Option<Rule> {
        // 2. Discard whitespace from input.
        input.discard_whitespace();

        // 3. If the next token from input is an <EOF-token>, return a syntax error.
        let rule = match input.next_token() {
            Token::EndOfFile => return None,
            // Otherwise, if the next token from input is an <at-keyword-token>,
            // consume an at-rule from input, and let rule be the return value.
            Token::AtKeyword { .. } => consume_an_at_rule(input, false).map(Rule::AtRule),
            // Otherwise, consume a qualified rule from input and let rule be the return value.
            _ => consume_a_qualified_rule(input, None, false).map(Rule::QualifiedRule),
        }?;

        // 4. Discard whitespace from input.
        input.discard_whitespace();

        // 5. If the next token from input is an <EOF-token>, return rule. Otherwise, return a syntax error.
        if !input.empty() {
            log_parse_error!("trailing input after rule");
            return None;
        }
        Some(rule)
    }

    /// Tokenizes `text` and parses it as a stylesheet.
    pub fn parse_a_stylesheet_from_str(text: &str, location: Option<&str>) -> StyleSheet {
        let tokens = Tokenizer::new(text).tokenize();
        Parser::parse_a_stylesheet(&TokenStream::new(tokens), location)
    }

    pub fn parse_a_rule_from_str(text: &str) -> Option<Rule> {
        let tokens = Tokenizer::new(text).tokenize();
        Parser::parse_a_rule(&TokenStream::new(tokens))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::types::{serialize_component_values, Rule};
    use crate::parser::Parser;

    #[test]
    fn parse_qualified_rules() {
        let stylesheet = Parser::parse_a_stylesheet_from_str(
            "*, *::before { box-sizing: border-box; } :host { outline: 2px solid #00FF00 !important }",
            None,
        );
        assert_eq!(stylesheet.rules.len(), 2);

        let Rule::QualifiedRule(host) = &stylesheet.rules[1] else {
            panic!("expected a qualified rule");
        };
        assert_eq!(serialize_component_values(&host.prelude), ":host");
        assert_eq!(host.declarations.len(), 1);
        assert_eq!(host.declarations[0].name, "outline");
        assert_eq!(
            serialize_component_values(&host.declarations[0].value),
            "2px solid #00FF00"
        );
        assert!(host.declarations[0].important);
    }

    #[test]
    fn parse_at_rules() {
        let stylesheet = Parser::parse_a_stylesheet_from_str(
            "@import url(a.css); @media (min-width: 10px) { p { color: red } }",
            None,
        );
        assert_eq!(stylesheet.rules.len(), 2);

        let Rule::AtRule(import) = &stylesheet.rules[0] else {
            panic!("expected an at-rule");
        };
        assert_eq!(import.name, "import");
        assert!(!import.has_block);

        let Rule::AtRule(media) = &stylesheet.rules[1] else {
            panic!("expected an at-rule");
        };
        assert_eq!(serialize_component_values(&media.prelude), "(min-width: 10px)");
        assert_eq!(media.child_rules.len(), 1);
    }

    #[test]
    fn bad_declarations_are_skipped() {
        let stylesheet = Parser::parse_a_stylesheet_from_str("p { 12: x; color: red; }", None);
        let Rule::QualifiedRule(rule) = &stylesheet.rules[0] else {
            panic!("expected a qualified rule");
        };
        assert_eq!(rule.declarations.len(), 1);
        assert_eq!(rule.declarations[0].name, "color");
    }

    #[test]
    fn nested_rules() {
        let stylesheet = Parser::parse_a_stylesheet_from_str("div { color: red; a:hover { color: blue } }", None);
        let Rule::QualifiedRule(rule) = &stylesheet.rules[0] else {
            panic!("expected a qualified rule");
        };
        assert_eq!(rule.declarations.len(), 1);
        assert_eq!(rule.child_rules.len(), 1);
    }

    #[test]
    fn parse_a_single_rule() {
        assert!(Parser::parse_a_rule_from_str(" p { color: red } ").is_some());
        assert!(Parser::parse_a_rule_from_str("p { } q { }").is_none());
        assert!(Parser::parse_a_rule_from_str("   ").is_none());
    }
}
