//! Category Selector Component
//!
//! Ticket category buttons for background generation.

use leptos::prelude::*;

/// Background categories: (wire value, label)
pub const CATEGORIES: &[(&str, &str)] = &[
    ("concert", "콘서트"),
    ("entrance", "출입증"),
    ("restaurant", "식당 메뉴판"),
    ("exhibition", "전시회"),
    ("wedding", "청첩장"),
];

/// Category selector buttons
#[component]
pub fn CategorySelector(
    #[prop(into)] current: Signal<String>,
    on_change: impl Fn(String) + Copy + 'static,
) -> impl IntoView {
    view! {
        <div class="category-selector">
            {CATEGORIES.iter().map(|(value, label)| {
                let val = value.to_string();
                let val_clone = val.clone();
                let is_selected = move || current.with(|c| *c == val);
                view! {
                    <button
                        type="button"
                        class=move || if is_selected() { "category-btn active" } else { "category-btn" }
                        on:click=move |_| on_change(val_clone.clone())
                    >
                        {*label}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}

/// Label for a category value, falling back to the value itself
pub fn category_label(value: &str) -> &str {
    CATEGORIES
        .iter()
        .find(|(v, _)| *v == value)
        .map(|(_, label)| *label)
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_label() {
        assert_eq!(category_label("wedding"), "청첩장");
        assert_eq!(category_label("birthday"), "birthday");
    }
}
