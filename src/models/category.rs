/// The fixed set of expense categories, in display order.
pub const CATEGORIES: [&str; 10] = [
    "Transportation",
    "Education",
    "Medical",
    "Essentials",
    "Clothes",
    "Phone",
    "Eat-out",
    "Savings",
    "Date",
    "Work Out",
];

/// Find the canonical spelling of a known category (case-insensitive).
pub fn find_category(name: &str) -> Option<&'static str> {
    let lower = name.trim().to_lowercase();
    CATEGORIES
        .iter()
        .copied()
        .find(|c| c.to_lowercase() == lower)
}

/// Resolve user input to a category name. Known categories are canonicalized;
/// anything else is kept as typed so legacy labels still work.
pub fn resolve_category(name: &str) -> String {
    find_category(name)
        .map(str::to_string)
        .unwrap_or_else(|| name.trim().to_string())
}

pub fn is_known_category(name: &str) -> bool {
    CATEGORIES.contains(&name)
}
