use tokenizer::{Token, Tokenizer};

use crate::arena::NodeRef;
use crate::document::Document;
use crate::element::{is_valid_attribute_name, is_valid_element_name};
use crate::{Attribute, DomException};

macro_rules! log_parse_error {
    ($message:expr) => {
        tracing::warn!(target: "template", "parse error: {}", $message)
    };
}

/// https://html.spec.whatwg.org/multipage/syntax.html#void-elements
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Immutable template content that lives outside any document.
///
/// A template is parsed once and can then be instantiated into any number of
/// documents. Every instantiation creates fresh nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    content: Vec<TemplateNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateNode {
    Element {
        local_name: String,
        attributes: Vec<Attribute>,
        children: Vec<TemplateNode>,
    },
    Text(String),
    Comment(String),
}

impl Template {
    pub fn new(content: Vec<TemplateNode>) -> Self {
        Self { content }
    }

    /// Builds the content tree for `markup`.
    ///
    /// Markup errors never fail: unknown end tags are ignored, elements left
    /// open are closed at the end of the input, and doctypes are dropped, as
    /// are tags and attributes whose names an element could not carry. Every
    /// parsed template can therefore be instantiated.
    pub fn parse(markup: &str) -> Self {
        let mut builder = TreeBuilder::default();
        for token in Tokenizer::new(markup) {
            tracing::trace!(?token, "template token");
            builder.process(token);
        }
        builder.finish()
    }

    pub fn content(&self) -> &[TemplateNode] {
        &self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Creates a document fragment in `document` holding a copy of the content.
    ///
    /// Elements are created through the document, so custom elements nested in
    /// the template are constructed with their own shadow roots.
    pub fn instantiate<'a>(&self, document: Document<'a>) -> Result<NodeRef<'a>, DomException> {
        let fragment = document.create_document_fragment();
        for node in &self.content {
            let child = node.instantiate(document)?;
            fragment.append_child(child)?;
        }
        Ok(fragment)
    }
}

impl TemplateNode {
    fn instantiate<'a>(&self, document: Document<'a>) -> Result<NodeRef<'a>, DomException> {
        match self {
            TemplateNode::Element {
                local_name,
                attributes,
                children,
            } => {
                let element = document.create_element(local_name)?;
                for attribute in attributes {
                    element.set_attribute(&attribute.name, &attribute.value)?;
                }
                for child in children {
                    element.append_child(child.instantiate(document)?)?;
                }
                Ok(element)
            }
            TemplateNode::Text(data) => Ok(document.create_text_node(data)),
            TemplateNode::Comment(data) => Ok(document.create_comment(data)),
        }
    }
}

struct OpenElement {
    local_name: String,
    attributes: Vec<Attribute>,
    children: Vec<TemplateNode>,
}

impl From<OpenElement> for TemplateNode {
    fn from(value: OpenElement) -> Self {
        TemplateNode::Element {
            local_name: value.local_name,
            attributes: value.attributes,
            children: value.children,
        }
    }
}

#[derive(Default)]
struct TreeBuilder {
    stack_of_open_elements: Vec<OpenElement>,
    content: Vec<TemplateNode>,
}

impl TreeBuilder {
    fn current_children(&mut self) -> &mut Vec<TemplateNode> {
        match self.stack_of_open_elements.last_mut() {
            Some(element) => &mut element.children,
            None => &mut self.content,
        }
    }

    fn insert_character(&mut self, c: char) {
        let children = self.current_children();
        match children.last_mut() {
            Some(TemplateNode::Text(text)) => text.push(c),
            _ => children.push(TemplateNode::Text(c.to_string())),
        }
    }

    fn pop_current_element(&mut self) {
        if let Some(element) = self.stack_of_open_elements.pop() {
            self.current_children().push(element.into());
        }
    }

    fn process(&mut self, token: Token) {
        match token {
            Token::Character { data } => self.insert_character(data),
            Token::Comment { data } => self.current_children().push(TemplateNode::Comment(data)),
            Token::Doctype { .. } => log_parse_error!("doctype in template content"),
            Token::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                if !is_valid_element_name(&name) {
                    log_parse_error!(format!("dropped tag with invalid name <{name}>"));
                    return;
                }

                let is_void = VOID_ELEMENTS.contains(&name.as_str());
                if self_closing && !is_void {
                    log_parse_error!(format!("non-void element <{name}/> treated as closed"));
                }

                let element = OpenElement {
                    local_name: name,
                    attributes: attributes
                        .into_iter()
                        .filter(|attribute| {
                            let valid = is_valid_attribute_name(&attribute.name);
                            if !valid {
                                log_parse_error!(format!(
                                    "dropped attribute with invalid name '{}'",
                                    attribute.name
                                ));
                            }
                            valid
                        })
                        .map(Attribute::from)
                        .collect(),
                    children: Vec::new(),
                };
                if is_void || self_closing {
                    self.current_children().push(element.into());
                } else {
                    self.stack_of_open_elements.push(element);
                }
            }
            Token::EndTag { name } => {
                let Some(position) = self
                    .stack_of_open_elements
                    .iter()
                    .rposition(|element| element.local_name == name)
                else {
                    log_parse_error!(format!("stray end tag </{name}>"));
                    return;
                };

                if position + 1 != self.stack_of_open_elements.len() {
                    log_parse_error!(format!("</{name}> closes elements that are still open"));
                }
                while self.stack_of_open_elements.len() > position {
                    self.pop_current_element();
                }
            }
            Token::EndOfFile => {
                if !self.stack_of_open_elements.is_empty() {
                    log_parse_error!("elements left open at the end of the template");
                }
                while !self.stack_of_open_elements.is_empty() {
                    self.pop_current_element();
                }
            }
        }
    }

    fn finish(mut self) -> Template {
        while !self.stack_of_open_elements.is_empty() {
            self.pop_current_element();
        }
        Template::new(self.content)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use pretty_assertions::assert_eq;
    use typed_arena::Arena;

    use super::{Template, TemplateNode};
    use crate::{Attribute, CustomElementRegistry, Document};

    fn element(local_name: &str, children: Vec<TemplateNode>) -> TemplateNode {
        TemplateNode::Element {
            local_name: local_name.to_string(),
            attributes: vec![],
            children,
        }
    }

    #[test]
    fn parses_nested_elements() {
        let template = Template::parse("<div><h1>MY COMPONENT</h1></div>");
        assert_eq!(
            template.content(),
            [element(
                "div",
                vec![element(
                    "h1",
                    vec![TemplateNode::Text("MY COMPONENT".to_string())]
                )]
            )]
        );
    }

    #[test]
    fn keeps_attributes_and_comments() {
        let template = Template::parse("<slot name=\"title\"></slot><!-- fallback -->");
        assert_eq!(
            template.content(),
            [
                TemplateNode::Element {
                    local_name: "slot".to_string(),
                    attributes: vec![Attribute::new("name", "title")],
                    children: vec![],
                },
                TemplateNode::Comment(" fallback ".to_string()),
            ]
        );
    }

    #[test]
    fn void_and_self_closing_elements_have_no_children() {
        let template = Template::parse("<p>a<br>b<span/>c</p>");
        assert_eq!(
            template.content(),
            [element(
                "p",
                vec![
                    TemplateNode::Text("a".to_string()),
                    element("br", vec![]),
                    TemplateNode::Text("b".to_string()),
                    element("span", vec![]),
                    TemplateNode::Text("c".to_string()),
                ]
            )]
        );
    }

    #[test]
    fn recovers_from_unbalanced_markup() {
        let template = Template::parse("</em><ul><li>one<li>two</ul><p>open");
        assert_eq!(
            template.content(),
            [
                element(
                    "ul",
                    vec![element(
                        "li",
                        vec![
                            TemplateNode::Text("one".to_string()),
                            element("li", vec![TemplateNode::Text("two".to_string())]),
                        ]
                    )]
                ),
                element("p", vec![TemplateNode::Text("open".to_string())]),
            ]
        );
    }

    #[test]
    fn drops_attributes_an_element_can_not_carry() {
        let template = Template::parse("<div =x class=a>hi</div>");
        assert_eq!(
            template.content(),
            [TemplateNode::Element {
                local_name: "div".to_string(),
                attributes: vec![Attribute::new("class", "a")],
                children: vec![TemplateNode::Text("hi".to_string())],
            }]
        );
    }

    #[test]
    fn recovered_markup_always_instantiates() {
        let arena = Arena::new();
        let document = Document::new(&arena, Rc::new(CustomElementRegistry::new()));

        for markup in [
            "<div =x>hi</div>",
            "<<xxb= = \"><",
            "<p\rclass=a>line\r\n</p>",
            "<a/b=c></a>",
            "</><!doctype html><br/>",
        ] {
            let fragment = Template::parse(markup).instantiate(document);
            assert!(fragment.is_ok(), "{markup:?}: {fragment:?}");
        }
    }

    #[test]
    fn instances_are_equal_but_distinct() {
        let arena = Arena::new();
        let document = Document::new(&arena, Rc::new(CustomElementRegistry::new()));
        let template = Template::parse("<div class=\"a\"><h1>Title</h1></div>");

        let first = template.instantiate(document).unwrap();
        let second = template.instantiate(document).unwrap();

        assert_eq!(first, second);
        assert!(!first.is_same_node(second));
        assert!(!first
            .first_child()
            .unwrap()
            .is_same_node(second.first_child().unwrap()));

        first.first_child().unwrap().set_attribute("class", "b").unwrap();
        assert_ne!(first, second);
        assert_eq!(
            second.first_child().unwrap().get_attribute("class").as_deref(),
            Some("a")
        );
    }
}
