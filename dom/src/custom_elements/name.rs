/// Names that match the custom element production but are taken by SVG and MathML.
const RESERVED_NAMES: &[&str] = &[
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

/// https://html.spec.whatwg.org/multipage/custom-elements.html#valid-custom-element-name
pub fn is_valid_custom_element_name(name: &str) -> bool {
    is_potential_custom_element_name(name) && !RESERVED_NAMES.contains(&name)
}

/// https://html.spec.whatwg.org/multipage/custom-elements.html#prod-potentialcustomelementname
fn is_potential_custom_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    if !chars.next().is_some_and(|c| c.is_ascii_lowercase()) {
        return false;
    }

    let mut has_hyphen = false;
    for c in chars {
        if c == '-' {
            has_hyphen = true;
        } else if !is_pcen_char(c) {
            return false;
        }
    }
    has_hyphen
}

/// https://html.spec.whatwg.org/multipage/custom-elements.html#prod-pcenchar
fn is_pcen_char(c: char) -> bool {
    matches!(c,
        '-' | '.' | '0'..='9' | '_' | 'a'..='z'
        | '\u{B7}'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{203F}'..='\u{2040}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}'
    )
}

#[cfg(test)]
mod tests {
    use super::is_valid_custom_element_name;

    #[test]
    fn valid_names() {
        assert!(is_valid_custom_element_name("web-component"));
        assert!(is_valid_custom_element_name("x-"));
        assert!(is_valid_custom_element_name("my-element.v2"));
        assert!(is_valid_custom_element_name("emotion-😍"));
    }

    #[test]
    fn invalid_names() {
        assert!(!is_valid_custom_element_name("div"));
        assert!(!is_valid_custom_element_name(""));
        assert!(!is_valid_custom_element_name("-web-component"));
        assert!(!is_valid_custom_element_name("Web-Component"));
        assert!(!is_valid_custom_element_name("web-Component"));
        assert!(!is_valid_custom_element_name("1-component"));
        assert!(!is_valid_custom_element_name("web component"));
    }

    #[test]
    fn reserved_names() {
        assert!(!is_valid_custom_element_name("font-face"));
        assert!(!is_valid_custom_element_name("annotation-xml"));
        assert!(!is_valid_custom_element_name("missing-glyph"));
    }
}
