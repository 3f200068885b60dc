use std::cell::Cell;
use std::rc::Rc;

use css::CssStyleSheet;

use crate::shadow_root::ShadowRootMode;
use crate::template::Template;

use super::LifecycleCallbacks;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ElementDefinitionOptions {
    /// Mode of the shadow root each instance gets on construction.
    pub shadow_root_mode: ShadowRootMode,
}

/// https://html.spec.whatwg.org/multipage/custom-elements.html#custom-element-definition
///
/// Besides the name and hooks a definition owns the resources every instance
/// shares: one stylesheet, adopted by each instance's shadow root, and one
/// template whose content is cloned into it.
#[derive(Debug, Clone)]
pub struct CustomElementDefinition {
    name: String,
    local_name: String,
    observed_attributes: Vec<String>,
    callbacks: LifecycleCallbacks,
    style_sheet: Rc<CssStyleSheet>,
    template: Rc<Template>,
    options: ElementDefinitionOptions,
    pub(crate) constructing: Cell<bool>,
}

impl CustomElementDefinition {
    pub fn new(
        name: &str,
        style_sheet: impl Into<Rc<CssStyleSheet>>,
        template: impl Into<Rc<Template>>,
    ) -> Self {
        Self {
            name: name.to_string(),
            local_name: name.to_string(),
            observed_attributes: Vec::new(),
            callbacks: LifecycleCallbacks::default(),
            style_sheet: style_sheet.into(),
            template: template.into(),
            options: ElementDefinitionOptions::default(),
            constructing: Cell::new(false),
        }
    }

    /// Attribute names are lowercased and deduplicated.
    pub fn observed_attributes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.observed_attributes.clear();
        for name in names {
            let name = name.as_ref().to_ascii_lowercase();
            if !self.observed_attributes.contains(&name) {
                self.observed_attributes.push(name);
            }
        }
        self
    }

    pub fn callbacks(mut self, callbacks: LifecycleCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub fn options(mut self, options: ElementDefinitionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    pub fn observed_attribute_names(&self) -> &[String] {
        &self.observed_attributes
    }

    pub fn observes(&self, name: &str) -> bool {
        self.observed_attributes.iter().any(|observed| observed == name)
    }

    pub fn lifecycle_callbacks(&self) -> &LifecycleCallbacks {
        &self.callbacks
    }

    pub fn style_sheet(&self) -> &Rc<CssStyleSheet> {
        &self.style_sheet
    }

    pub fn template(&self) -> &Rc<Template> {
        &self.template
    }

    pub fn element_options(&self) -> ElementDefinitionOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
use std::rc::Rc;

    use css::CssStyleSheet;

    use super::CustomElementDefinition;
    use crate::Template;

    #[test]
    fn observed_attributes_are_normalized() {
        let definition =
            CustomElementDefinition::new("web-component", CssStyleSheet::new(), Template::default())
                .observed_attributes(["Data-Attr", "data-attr", "title"]);

        assert_eq!(definition.observed_attribute_names(), ["data-attr", "title"]);
        assert!(definition.observes("data-attr"));
        assert!(!definition.observes("class"));
    }

    #[test]
    fn resources_are_shared() {
        let style_sheet = Rc::new(CssStyleSheet::parse(":host { display: block; }"));
        let definition =
            CustomElementDefinition::new("web-component", style_sheet.clone(), Template::default());

        assert!(Rc::ptr_eq(definition.style_sheet(), &style_sheet));
    }
}
