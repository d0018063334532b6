use std::{borrow::Cow, collections::HashSet};

/// The identifier a column name is matched against.
///
/// Characters that cannot appear in a Rust identifier become `_`, an empty
/// name becomes `Column` and a leading digit gets an `_` prefix.
pub fn column_identifier(name: &str) -> Cow<'_, str> {
    if name.is_empty() {
        return Cow::Borrowed("Column");
    }
    let valid = |c: char| c.is_alphanumeric() || c == '_';
    let leading_digit = name.starts_with(|c: char| c.is_ascii_digit());
    if !leading_digit && name.chars().all(valid) {
        return Cow::Borrowed(name);
    }
    let mut result = String::with_capacity(name.len() + 1);
    if leading_digit {
        result.push('_');
    }
    result.extend(name.chars().map(|c| if valid(c) { c } else { '_' }));
    Cow::Owned(result)
}

/// Make every name unique.
///
/// The first occurrence keeps its name, the following ones get `_2`, `_3`,
/// ... appended, skipping any candidate already used by another column.
pub fn unique_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let names: Vec<Cow<str>> = names.into_iter().map(column_identifier).collect();
    let reserved: HashSet<&str> = names.iter().map(|v| &**v).collect();
    let mut taken: HashSet<String> = HashSet::with_capacity(names.len());
    names
        .iter()
        .map(|name| {
            let name: &str = name;
            if taken.insert(name.to_string()) {
                return name.to_string();
            }
            let mut n = 2;
            loop {
                let candidate = format!("{}_{}", name, n);
                if !reserved.contains(candidate.as_str()) && taken.insert(candidate.clone()) {
                    break candidate;
                }
                n += 1;
            }
        })
        .collect()
}
