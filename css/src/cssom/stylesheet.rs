use crate::parser::Parser;
use crate::CssError;

use super::CssRule;

/// 6.1.2. The CSSStyleSheet interface
/// https://drafts.csswg.org/cssom/#the-cssstylesheet-interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssStyleSheet {
    location: Option<String>,
    title: Option<String>,
    disabled: bool,
    css_rules: Vec<CssRule>,
    constructed: bool,
}

impl Default for CssStyleSheet {
    fn default() -> Self {
        Self::new()
    }
}

impl CssStyleSheet {
    // https://drafts.csswg.org/cssom/#dom-cssstylesheet-cssstylesheet
    pub fn new() -> Self {
        Self {
            location: None,
            title: None,
            disabled: false,
            css_rules: vec![],
            constructed: true,
        }
    }

    /// Creates a constructed stylesheet and fills it from `text`.
    pub fn parse(text: &str) -> Self {
        let mut stylesheet = Self::new();
        stylesheet.replace_rules(text);
        stylesheet
    }

    /// A stylesheet that came from a file or `<style>` element rather than the constructor.
    pub fn from_location(location: &str, text: &str) -> Self {
        let stylesheet = Parser::parse_a_stylesheet_from_str(text, Some(location));
        Self {
            location: stylesheet.location.clone(),
            css_rules: stylesheet.rules.iter().map(CssRule::from).collect(),
            constructed: false,
            ..Self::new()
        }
    }

    // https://drafts.csswg.org/cssom/#concept-css-style-sheet-type
    pub fn type_(&self) -> &str {
        "text/css"
    }

    // https://drafts.csswg.org/cssom/#concept-css-style-sheet-location
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    // https://drafts.csswg.org/cssom/#concept-css-style-sheet-title
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: Option<&str>) {
        self.title = title.map(|s| s.to_string());
    }

    // https://drafts.csswg.org/cssom/#concept-css-style-sheet-disabled-flag
    pub fn disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    // https://drafts.csswg.org/cssom/#concept-css-style-sheet-constructed-flag
    pub fn constructed(&self) -> bool {
        self.constructed
    }

    // https://drafts.csswg.org/cssom/#dom-cssstylesheet-cssrules
    pub fn css_rules(&self) -> &[CssRule] {
        &self.css_rules
    }

    // https://drafts.csswg.org/cssom/#dom-cssstylesheet-insertrule
    pub fn insert_rule(&mut self, rule: &str, index: usize) -> Result<usize, CssError> {
        // 2. Let parsed rule be the return value of invoking parse a rule with rule.
        // 3. If parsed rule is a syntax error, return parsed rule.
        let parsed_rule = Parser::parse_a_rule_from_str(rule)
            .map(|rule| CssRule::from(&rule))
            .ok_or_else(|| CssError::Syntax(rule.to_string()))?;

        // 4. If parsed rule is an @import rule, and the constructed flag is set, throw a SyntaxError DOMException.
        if parsed_rule.is_import() && self.constructed {
            return Err(CssError::Syntax(rule.to_string()));
        }

        // 5. Return the result of invoking insert a CSS rule rule in the CSS rules at index.
        // https://drafts.csswg.org/cssom/#insert-a-css-rule
        if index > self.css_rules.len() {
            return Err(CssError::IndexSize {
                index,
                length: self.css_rules.len(),
            });
        }
        self.css_rules.insert(index, parsed_rule);
        Ok(index)
    }

    // https://drafts.csswg.org/cssom/#dom-cssstylesheet-deleterule
    pub fn delete_rule(&mut self, index: usize) -> Result<(), CssError> {
        // https://drafts.csswg.org/cssom/#remove-a-css-rule
        if index >= self.css_rules.len() {
            return Err(CssError::IndexSize {
                index,
                length: self.css_rules.len(),
            });
        }
        self.css_rules.remove(index);
        Ok(())
    }

    // https://drafts.csswg.org/cssom/#dom-cssstylesheet-replacesync
    pub fn replace_sync(&mut self, text: &str) -> Result<(), CssError> {
        // 1. If the constructed flag is not set, throw a NotAllowedError DOMException.
        if !self.constructed {
            return Err(CssError::NotAllowed(
                "only constructed stylesheets can be replaced",
            ));
        }

        self.replace_rules(text);
        Ok(())
    }

    fn replace_rules(&mut self, text: &str) {
        // 2. Let rules be the result of running parse a stylesheet’s contents from text.
        let stylesheet = Parser::parse_a_stylesheet_from_str(text, None);

        // 3. If rules contains one or more @import rules, remove those rules from rules.
        let rules: Vec<CssRule> = stylesheet
            .rules
            .iter()
            .map(CssRule::from)
            .filter(|rule| {
                if rule.is_import() {
                    tracing::warn!(target: "css", "@import rules are not allowed in constructed stylesheets");
                    return false;
                }
                true
            })
            .collect();

        // 4. Set sheet’s CSS rules to rules.
        self.css_rules = rules;
        tracing::debug!(target: "css", rules = self.css_rules.len(), "replaced stylesheet rules");
    }

    /// Serializes every rule, one per line.
    pub fn css_text(&self) -> String {
        self.css_rules
            .iter()
            .map(|rule| rule.css_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use crate::{CssError, CssRule, CssStyleSheet};

    const STARTER_CSS: &str = r#"
        *,
        *::before,
        *::after {
            box-sizing: border-box;
        }
        :host {
            color-scheme: light dark;
            color: rgba(255, 255, 255, 0.87);
            outline: 2px solid #00FF00;
        }
        /* web-component styles */
    "#;

    #[test]
    fn replace_sync_parses_rules() {
        let mut stylesheet = CssStyleSheet::new();
        stylesheet.replace_sync(STARTER_CSS).unwrap();

        assert_eq!(stylesheet.css_rules().len(), 2);
        let universal = stylesheet.css_rules()[0].as_style_rule().unwrap();
        assert_eq!(universal.selector_text, "*, *::before, *::after");
        assert_eq!(
            universal.style.get_property_value("box-sizing"),
            Some("border-box")
        );

        let host = stylesheet.css_rules()[1].as_style_rule().unwrap();
        assert_eq!(host.selector_text, ":host");
        assert_eq!(
            host.style.get_property_value("color"),
            Some("rgba(255, 255, 255, 0.87)")
        );
        assert_eq!(host.style.get_property_value("COLOR-SCHEME"), Some("light dark"));
    }

    #[test]
    fn replace_sync_replaces_and_drops_imports() {
        let mut stylesheet = CssStyleSheet::parse("a { color: red }");
        stylesheet
            .replace_sync("@import url(x.css); b { color: blue }")
            .unwrap();
        assert_eq!(stylesheet.css_rules().len(), 1);
        assert_eq!(stylesheet.css_text(), "b { color: blue; }");
    }

    #[test]
    fn replace_sync_requires_constructed_sheet() {
        let mut stylesheet = CssStyleSheet::from_location("component.css", "a { }");
        assert!(matches!(
            stylesheet.replace_sync("b { }"),
            Err(CssError::NotAllowed(_))
        ));
        assert_eq!(stylesheet.location(), Some("component.css"));
    }

    #[test]
    fn located_sheets_accept_rule_edits() {
        let mut stylesheet = CssStyleSheet::from_location("component.css", "a { color: red }");
        assert_eq!(stylesheet.insert_rule("b { color: blue }", 1), Ok(1));
        stylesheet.delete_rule(0).unwrap();
        assert_eq!(stylesheet.css_text(), "b { color: blue; }");
    }

    #[test]
    fn insert_and_delete_rules() {
        let mut stylesheet = CssStyleSheet::parse("a { color: red }");
        assert_eq!(stylesheet.insert_rule("b { color: blue !important }", 0), Ok(0));
        assert_eq!(stylesheet.css_rules().len(), 2);
        assert_eq!(
            stylesheet.css_rules()[0].css_text(),
            "b { color: blue !important; }"
        );

        assert_eq!(
            stylesheet.insert_rule("c { }", 5),
            Err(CssError::IndexSize {
                index: 5,
                length: 2
            })
        );
        assert!(matches!(
            stylesheet.insert_rule("a { } b { }", 0),
            Err(CssError::Syntax(_))
        ));
        assert!(matches!(
            stylesheet.insert_rule("@import url(x.css);", 0),
            Err(CssError::Syntax(_))
        ));

        stylesheet.delete_rule(0).unwrap();
        assert_eq!(stylesheet.css_text(), "a { color: red; }");
        assert!(stylesheet.delete_rule(1).is_err());
    }

    #[test]
    fn at_rules_serialize_with_their_blocks() {
        let stylesheet =
            CssStyleSheet::parse("@media (prefers-color-scheme: light) { :host { color: #213547 } }");
        let rule = &stylesheet.css_rules()[0];
        assert!(matches!(rule, CssRule::At(at) if at.name == "media"));
        assert_eq!(
            rule.css_text(),
            "@media (prefers-color-scheme: light) { :host { color: #213547; } }"
        );
    }
}
