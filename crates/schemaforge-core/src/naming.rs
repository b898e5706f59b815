//! Identifier conventions shared by the resolver and the code generators.
//!
//! Descriptor names are snake_case (`booking_items`); generated code uses
//! camelCase properties (`bookingItems`) and PascalCase types (`BookingItem`).

/// Check whether a name is a plain identifier (`[A-Za-z_][A-Za-z0-9_]*`).
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Check whether an enum value is safe to use as a literal member.
///
/// Enum values may additionally contain `-` (`in-progress`).
pub fn is_enum_value(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn words(name: &str) -> impl Iterator<Item = &str> {
    name.split(|c: char| c == '_' || c == '-' || c == ' ')
        .filter(|w| !w.is_empty())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Convert `booking_items` to `BookingItems`.
pub fn to_pascal_case(name: &str) -> String {
    words(name).map(capitalize).collect()
}

/// Convert `booking_items` to `bookingItems`.
pub fn to_camel_case(name: &str) -> String {
    let pascal = to_pascal_case(name);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Singularize a snake_case table name (`categories` -> `category`).
///
/// Only the last word is changed. Irregular plurals are not handled.
pub fn singularize(name: &str) -> String {
    let (head, last) = match name.rfind('_') {
        Some(idx) => name.split_at(idx + 1),
        None => ("", name),
    };

    let singular = if let Some(stem) = last.strip_suffix("ies") {
        if stem.is_empty() {
            last.to_string()
        } else {
            format!("{}y", stem)
        }
    } else if ["sses", "shes", "ches", "xes", "zes"]
        .iter()
        .any(|suffix| last.ends_with(suffix))
    {
        last[..last.len() - 2].to_string()
    } else if is_latin_us_plural(last) {
        last[..last.len() - 2].to_string()
    } else if last.ends_with("ss") || last.ends_with("us") || last.ends_with("is") {
        last.to_string()
    } else if let Some(stem) = last.strip_suffix('s') {
        if stem.is_empty() {
            last.to_string()
        } else {
            stem.to_string()
        }
    } else {
        last.to_string()
    };

    format!("{}{}", head, singular)
}

/// `statuses`, `bonuses`, `campuses`: a consonant before `uses`. Words like
/// `houses` and `causes` keep their `e`.
fn is_latin_us_plural(word: &str) -> bool {
    word.strip_suffix("uses")
        .and_then(|stem| stem.chars().last())
        .is_some_and(|c| !"aeiou".contains(c))
}

/// Pluralize a name for an inverse relation: append `s` unless it already ends in `s`.
pub fn pluralize(name: &str) -> String {
    if name.ends_with('s') {
        name.to_string()
    } else {
        format!("{}s", name)
    }
}

/// Turn a value into a display label (`in_progress` -> `In Progress`).
pub fn humanize(value: &str) -> String {
    words(value).map(capitalize).collect::<Vec<_>>().join(" ")
}
