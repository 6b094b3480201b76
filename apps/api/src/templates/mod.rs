//! Template store: the fixed catalog of letter templates.
//!
//! Templates are immutable and loaded at compile time. Consumers look them up
//! by their stable string id; an unknown id yields `None` and callers no-op.

mod bodies;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Matches `[Bracketed Text]`, runs of three or more underscores, and `{BRACE}` tokens.
static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[[^\[\]<>]+\]|_{3,}|\{[A-Za-z0-9_ ]+\}").expect("valid placeholder regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateIcon {
    Briefcase,
    Alert,
    Trending,
    File,
}

#[derive(Debug)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: TemplateIcon,
    pub body: &'static str,
}

/// Gallery entry: everything but the body.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateSummary {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: TemplateIcon,
}

static TEMPLATES: [Template; 4] = [
    Template {
        id: "OFFER_LETTER",
        name: "Offer Letter",
        description: "Formal job offer with salary table",
        icon: TemplateIcon::Briefcase,
        body: bodies::OFFER_LETTER,
    },
    Template {
        id: "WARNING_LETTER",
        name: "Warning Notice",
        description: "Disciplinary action form",
        icon: TemplateIcon::Alert,
        body: bodies::WARNING_LETTER,
    },
    Template {
        id: "PIP",
        name: "Performance Plan",
        description: "Improvement goals and timeline",
        icon: TemplateIcon::Trending,
        body: bodies::PIP,
    },
    Template {
        id: "RESIGNATION",
        name: "Resignation",
        description: "Standard resignation letter",
        icon: TemplateIcon::File,
        body: bodies::RESIGNATION,
    },
];

pub fn find(id: &str) -> Option<&'static Template> {
    all().iter().find(|t| t.id == id)
}

pub fn all() -> &'static [Template] {
    &TEMPLATES
}

pub fn catalog() -> Vec<TemplateSummary> {
    all()
        .iter()
        .map(|t| TemplateSummary {
            id: t.id,
            name: t.name,
            description: t.description,
            icon: t.icon,
        })
        .collect()
}

/// Placeholder tokens still present in `html`, in document order.
pub fn placeholders(html: &str) -> Vec<&str> {
    PLACEHOLDER_RE.find_iter(html).map(|m| m.as_str()).collect()
}

/// Opening and closing tag names in document order, e.g. `["div", "p", "/p", "/div"]`.
#[cfg(test)]
pub fn tag_sequence(html: &str) -> Vec<String> {
    static TAG_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"<(/?[A-Za-z][A-Za-z0-9]*)").expect("valid tag regex"));
    TAG_RE
        .captures_iter(html)
        .map(|c| c[1].to_ascii_lowercase())
        .collect()
}
