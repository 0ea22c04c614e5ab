//! Background Tag Catalog
//!
//! Fixed Korean tag labels grouped by category, each mapped to the English
//! value the image API expects, plus the bounded selection used by the tag
//! selector modal.

/// Maximum number of tags a background request may carry
pub const MAX_TAGS: usize = 3;

/// One selectable tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagDef {
    /// Label shown to the user
    pub label: &'static str,
    /// Value sent to the API
    pub value: &'static str,
    /// Shows the "hot" marker
    pub hot: bool,
}

const fn tag(label: &'static str, value: &'static str, hot: bool) -> TagDef {
    TagDef { label, value, hot }
}

const MOOD_TAGS: &[TagDef] = &[
    tag("고전", "classic", false),
    tag("귀여움", "cute", false),
    tag("꽃무늬", "floral", false),
    tag("네온", "neon", true),
    tag("도시", "city", false),
    tag("시골", "countryside", false),
    tag("밝은", "bright", true),
    tag("어두운", "dark", false),
    tag("빈티지", "vintage", false),
    tag("심플", "simple", true),
    tag("럭셔리", "luxury", false),
    tag("자연친화적", "eco-friendly", false),
];

const COLOR_TAGS: &[TagDef] = &[
    tag("블루", "blue", false),
    tag("그린", "green", true),
    tag("레드", "red", false),
    tag("옐로우", "yellow", false),
    tag("퍼플", "purple", false),
    tag("블랙", "black", false),
    tag("화이트", "white", true),
    tag("흑백", "monochrome", false),
];

const SEASON_TAGS: &[TagDef] = &[
    tag("봄", "spring", false),
    tag("여름", "summer", false),
    tag("가을", "autumn", false),
    tag("겨울", "winter", true),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagCategory {
    Mood,
    Color,
    Season,
}

impl TagCategory {
    pub const ALL: [TagCategory; 3] = [TagCategory::Mood, TagCategory::Color, TagCategory::Season];

    pub fn title(self) -> &'static str {
        match self {
            TagCategory::Mood => "분위기",
            TagCategory::Color => "색상",
            TagCategory::Season => "계절",
        }
    }

    pub fn tags(self) -> &'static [TagDef] {
        match self {
            TagCategory::Mood => MOOD_TAGS,
            TagCategory::Color => COLOR_TAGS,
            TagCategory::Season => SEASON_TAGS,
        }
    }
}

/// Look up a tag by its Korean label
pub fn find_by_label(label: &str) -> Option<&'static TagDef> {
    TagCategory::ALL
        .iter()
        .flat_map(|category| category.tags().iter())
        .find(|def| def.label == label)
}

/// English value for a Korean label
pub fn translate(label: &str) -> Option<&'static str> {
    find_by_label(label).map(|def| def.value)
}

/// Korean label for an API value; unknown values are shown as-is
pub fn label_for_value(value: &str) -> &str {
    TagCategory::ALL
        .iter()
        .flat_map(|c| c.tags())
        .find(|def| def.value == value)
        .map(|def| def.label)
        .unwrap_or(value)
}

/// Ordered, capacity-bounded set of translated tag values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSelection {
    tags: Vec<String>,
    /// Latched after a rejected add, cleared by the next successful toggle
    warning: bool,
}

impl TagSelection {
    /// Start from previously chosen tags, translating any Korean labels
    pub fn from_selected(initial: &[String]) -> Self {
        let tags = initial
            .iter()
            .map(|t| translate(t).map(str::to_string).unwrap_or_else(|| t.clone()))
            .collect();
        Self { tags, warning: false }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn into_tags(self) -> Vec<String> {
        self.tags
    }

    pub fn warning(&self) -> bool {
        self.warning
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Whether the tag behind `label` is currently selected
    pub fn contains_label(&self, label: &str) -> bool {
        translate(label).is_some_and(|value| self.tags.iter().any(|t| t == value))
    }

    /// Toggle membership of the tag behind `label`. Unknown labels are ignored.
    pub fn toggle(&mut self, label: &str) {
        let Some(value) = translate(label) else {
            return;
        };

        if let Some(pos) = self.tags.iter().position(|t| t == value) {
            self.tags.remove(pos);
            self.warning = false;
        } else if self.tags.len() < MAX_TAGS {
            self.tags.push(value.to_string());
            self.warning = false;
        } else {
            self.warning = true;
        }
    }
}

pub fn max_tags_warning() -> String {
    format!("태그는 최대 {}개까지 선택 가능합니다.", MAX_TAGS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_label_is_unique_and_translated() {
        let mut labels: Vec<_> = TagCategory::ALL.iter().flat_map(|c| c.tags()).map(|d| d.label).collect();
        let total = labels.len();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), total);
        assert_eq!(total, 24);
    }

    #[test]
    fn test_hot_tags() {
        let hot: Vec<_> = TagCategory::ALL
            .iter()
            .flat_map(|c| c.tags())
            .filter(|d| d.hot)
            .map(|d| d.label)
            .collect();
        assert_eq!(hot, vec!["네온", "밝은", "심플", "그린", "화이트", "겨울"]);
    }

    #[test]
    fn test_fourth_tag_is_rejected_with_warning() {
        let mut selection = TagSelection::default();
        selection.toggle("네온");
        selection.toggle("겨울");
        selection.toggle("그린");
        selection.toggle("밝은");

        assert_eq!(selection.tags(), &["neon", "winter", "green"]);
        assert!(selection.warning());
    }

    #[test]
    fn test_removal_works_at_capacity_and_clears_warning() {
        let mut selection = TagSelection::default();
        for label in ["네온", "겨울", "그린", "밝은"] {
            selection.toggle(label);
        }
        selection.toggle("겨울");

        assert_eq!(selection.tags(), &["neon", "green"]);
        assert!(!selection.warning());
        assert!(!selection.contains_label("겨울"));
    }

    #[test]
    fn test_warning_stays_latched_until_successful_toggle() {
        let mut selection = TagSelection::from_selected(&["neon".into(), "green".into(), "red".into()]);
        selection.toggle("봄");
        assert!(selection.warning());
        selection.toggle("봄");
        assert!(selection.warning());
        selection.toggle("레드");
        assert!(!selection.warning());
    }

    #[test]
    fn test_unknown_label_is_ignored() {
        let mut selection = TagSelection::default();
        selection.toggle("없는태그");
        assert!(selection.is_empty());
        assert!(!selection.warning());
    }

    #[test]
    fn test_initial_tags_are_translated() {
        let selection = TagSelection::from_selected(&["네온".to_string(), "custom".to_string()]);
        assert_eq!(selection.tags(), &["neon", "custom"]);
        assert!(selection.contains_label("네온"));
    }

    #[test]
    fn test_label_for_value() {
        assert_eq!(label_for_value("winter"), "겨울");
        assert_eq!(label_for_value("plaid"), "plaid");
    }
}
