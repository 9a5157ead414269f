//! Field classification.
//!
//! A layout element is categorized by an ordered rule table: the first rule whose type
//! filter and matcher accept the element decides its role. The table is plain data so it
//! can be versioned and tested on its own.

use crate::models::elements::{ElementType, LayoutElement};

/// Semantic category of a layout element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Title,
    Description,
    Bullet,
    Logo,
    Image,
    Data,
    Shape,
    /// No label: the element is left out of the editable form.
    Unknown,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Title => "title",
            Category::Description => "description",
            Category::Bullet => "bullet",
            Category::Logo => "logo",
            Category::Image => "image",
            Category::Data => "data",
            Category::Shape => "shape",
            Category::Unknown => "unknown",
        }
    }
}

/// Finer-grained result of classification. `Tagline` is a description variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRole {
    Title,
    Tagline,
    Description,
    Bullet,
    Logo,
    Image,
    Data,
    Shape,
}

impl FieldRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldRole::Tagline => "tagline",
            other => other.category().as_str(),
        }
    }

    pub fn category(&self) -> Category {
        match self {
            FieldRole::Title => Category::Title,
            FieldRole::Tagline | FieldRole::Description => Category::Description,
            FieldRole::Bullet => Category::Bullet,
            FieldRole::Logo => Category::Logo,
            FieldRole::Image => Category::Image,
            FieldRole::Data => Category::Data,
            FieldRole::Shape => Category::Shape,
        }
    }
}

impl From<Option<FieldRole>> for Category {
    fn from(role: Option<FieldRole>) -> Self {
        role.map_or(Category::Unknown, |r| r.category())
    }
}

/// How a rule inspects an element once its type filter matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Accepts every element.
    Any,
    /// Lowercased label contains one of the keywords.
    LabelKeywords(&'static [&'static str]),
    /// `config.mediaType == "logo"` or the id mentions "logo".
    LogoMarker,
}

/// One `(type filter, matcher, role)` entry of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationRule {
    pub types: &'static [ElementType],
    pub matcher: Matcher,
    pub role: FieldRole,
}

impl ClassificationRule {
    fn accepts(&self, element: &LayoutElement, label: &str) -> bool {
        if !self.types.contains(&element.element_type()) {
            return false;
        }
        match self.matcher {
            Matcher::Any => true,
            Matcher::LabelKeywords(keywords) => keywords.iter().any(|k| label.contains(k)),
            Matcher::LogoMarker => {
                element
                    .media_type()
                    .is_some_and(|m| m.eq_ignore_ascii_case("logo"))
                    || element.id.to_lowercase().contains("logo")
            }
        }
    }
}

/// An ordered, versioned classification table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleTable {
    pub version: u32,
    /// Evaluated before the blank-label filter.
    pub unlabeled: &'static [ClassificationRule],
    /// Evaluated only for elements with a non-blank label.
    pub labeled: &'static [ClassificationRule],
}

const TEXT: &[ElementType] = &[ElementType::Text];
const MEDIA: &[ElementType] = &[ElementType::Image, ElementType::Logo];

pub const DEFAULT_RULES: RuleTable = RuleTable {
    version: 1,
    unlabeled: &[ClassificationRule {
        types: &[ElementType::Shape],
        matcher: Matcher::Any,
        role: FieldRole::Shape,
    }],
    labeled: &[
        ClassificationRule {
            types: TEXT,
            matcher: Matcher::LabelKeywords(&["title", "headline"]),
            role: FieldRole::Title,
        },
        ClassificationRule {
            types: TEXT,
            matcher: Matcher::LabelKeywords(&["tagline"]),
            role: FieldRole::Tagline,
        },
        ClassificationRule {
            types: TEXT,
            matcher: Matcher::LabelKeywords(&["bullet", "point", "feature", "stat"]),
            role: FieldRole::Bullet,
        },
        ClassificationRule {
            types: TEXT,
            matcher: Matcher::Any,
            role: FieldRole::Description,
        },
        ClassificationRule {
            types: MEDIA,
            matcher: Matcher::LogoMarker,
            role: FieldRole::Logo,
        },
        ClassificationRule {
            types: MEDIA,
            matcher: Matcher::Any,
            role: FieldRole::Image,
        },
        ClassificationRule {
            types: &[ElementType::Data],
            matcher: Matcher::Any,
            role: FieldRole::Data,
        },
    ],
};

impl RuleTable {
    /// Role of an editable element, or `None` when it is left out of the form.
    pub fn classify_role(&self, element: &LayoutElement) -> Option<FieldRole> {
        let label = element.label().unwrap_or("").trim().to_lowercase();
        if let Some(rule) = self.unlabeled.iter().find(|r| r.accepts(element, &label)) {
            return Some(rule.role);
        }
        if label.is_empty() {
            return None;
        }
        self.first_labeled_match(element, &label)
    }

    /// Role used when rendering. Unlabeled elements still render, as if their label
    /// matched no keyword.
    pub fn render_role(&self, element: &LayoutElement) -> FieldRole {
        let label = element.label().unwrap_or("").trim().to_lowercase();
        self.unlabeled
            .iter()
            .find(|r| r.accepts(element, &label))
            .map(|r| r.role)
            .or_else(|| self.first_labeled_match(element, &label))
            .unwrap_or(match element.element_type() {
                ElementType::Text => FieldRole::Description,
                ElementType::Image => FieldRole::Image,
                ElementType::Logo => FieldRole::Logo,
                ElementType::Data => FieldRole::Data,
                ElementType::Shape => FieldRole::Shape,
            })
    }

    pub fn classify(&self, element: &LayoutElement) -> Category {
        self.classify_role(element).into()
    }

    fn first_labeled_match(&self, element: &LayoutElement, label: &str) -> Option<FieldRole> {
        self.labeled
            .iter()
            .find(|r| r.accepts(element, label))
            .map(|r| r.role)
    }
}

/// Classifies `element` with [`DEFAULT_RULES`].
pub fn classify(element: &LayoutElement) -> Category {
    DEFAULT_RULES.classify(element)
}

/// Classifies `element` with [`DEFAULT_RULES`], keeping the tagline distinction.
pub fn classify_role(element: &LayoutElement) -> Option<FieldRole> {
    DEFAULT_RULES.classify_role(element)
}
