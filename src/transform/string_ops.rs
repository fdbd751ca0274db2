use std::borrow::Cow;

use heck::ToSnakeCase;

/// Returns a lowercase representation, reusing the input if it is already lowercase.
pub fn lowercase(input: &str) -> Cow<'_, str> {
    if input.chars().all(|ch| !ch.is_uppercase()) {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(input.to_lowercase())
    }
}

/// Returns an uppercase representation, avoiding allocation when unnecessary.
pub fn uppercase(input: &str) -> Cow<'_, str> {
    if input.chars().all(|ch| !ch.is_lowercase()) {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(input.to_uppercase())
    }
}

/// Trims leading/trailing whitespace while borrowing the input.
pub fn trim(input: &str) -> Cow<'_, str> {
    Cow::Borrowed(input.trim())
}

/// Converts identifiers such as capability labels to `snake_case`.
pub fn snake_case(input: &str) -> Cow<'_, str> {
    let converted = input.to_snake_case();
    if converted == input {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(converted)
    }
}

/// Collapses runs of whitespace into single spaces, e.g. `"Router  Switch"`.
pub fn collapse_whitespace(input: &str) -> Cow<'_, str> {
    let mut previous_space = false;
    let needs_work = input.chars().any(|ch| {
        let space = ch.is_whitespace();
        let collapse = space && (previous_space || ch != ' ');
        previous_space = space;
        collapse
    });
    if !needs_work {
        return Cow::Borrowed(input);
    }
    Cow::Owned(input.split_whitespace().collect::<Vec<_>>().join(" "))
}
