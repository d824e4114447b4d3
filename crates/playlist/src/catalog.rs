use std::collections::HashMap;

/// Category of items without a group title.
pub const UNDEFINED_CATEGORY: &str = "Undefined";

/// Items grouped by category, categories kept in first-seen order.
#[derive(Debug, Clone)]
pub struct Catalog<T> {
    categories: Vec<(String, Vec<T>)>,
    index: HashMap<String, usize>,
}

impl<T> Default for Catalog<T> {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> Catalog<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `item` under `category`; `None` or empty goes to [`UNDEFINED_CATEGORY`].
    pub fn insert(&mut self, category: Option<&str>, item: T) {
        let name = category
            .filter(|c| !c.is_empty())
            .unwrap_or(UNDEFINED_CATEGORY);

        match self.index.get(name) {
            Some(&slot) => self.categories[slot].1.push(item),
            None => {
                self.index.insert(name.to_owned(), self.categories.len());
                self.categories.push((name.to_owned(), vec![item]));
            }
        }
    }

    pub fn get(&self, category: &str) -> Option<&[T]> {
        self.index
            .get(category)
            .map(|&slot| self.categories[slot].1.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[T])> {
        self.categories
            .iter()
            .map(|(name, items)| (name.as_str(), items.as_slice()))
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn into_categories(self) -> Vec<(String, Vec<T>)> {
        self.categories
    }
}

/// File name for a category: lowercase ASCII alphanumerics, everything else `-`.
///
/// Replacement is per UTF-16 code unit, so a character outside the BMP
/// (most emoji) becomes `--`.
pub fn sanitize_filename(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .flat_map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                std::iter::repeat_n(c, 1)
            } else {
                std::iter::repeat_n('-', c.len_utf16())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn keeps_first_seen_order() {
        let mut catalog = Catalog::new();
        catalog.insert(Some("Sports"), 1);
        catalog.insert(None, 2);
        catalog.insert(Some("News"), 3);
        catalog.insert(Some("Sports"), 4);
        catalog.insert(Some(""), 5);

        let names: Vec<_> = catalog.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["Sports", UNDEFINED_CATEGORY, "News"]);
        assert_eq!(catalog.get("Sports"), Some(&[1, 4][..]));
        assert_eq!(catalog.get(UNDEFINED_CATEGORY), Some(&[2, 5][..]));
        assert_eq!(catalog.len(), 3);
    }

    #[rstest]
    #[case("News", "news")]
    #[case("Kids & Family", "kids---family")]
    #[case("Música", "m-sica")]
    #[case("24/7", "24-7")]
    #[case("📺 Live", "---live")]
    fn sanitizes_category_names(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_filename(input), expected);
    }
}
