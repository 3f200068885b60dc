// https://html.spec.whatwg.org/multipage/named-characters.html
// FIXME: Only the references that show up in component markup are listed.
pub(crate) const NAMED_CHARACTER_REFERENCES: &[(&str, &str)] = &[
    ("amp;", "&"),
    ("lt;", "<"),
    ("gt;", ">"),
    ("quot;", "\""),
    ("apos;", "'"),
    ("nbsp;", "\u{00A0}"),
    ("copy;", "\u{00A9}"),
    ("reg;", "\u{00AE}"),
    ("hellip;", "\u{2026}"),
    ("mdash;", "\u{2014}"),
    ("ndash;", "\u{2013}"),
];
