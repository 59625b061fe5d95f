//! Biography search builder.

use super::Query;

/// Filters for `GET /biography/search`.
#[derive(Clone, Debug, Default)]
pub struct BiographySearch {
    search: Option<String>,
    tag: Option<String>,
}

impl BiographySearch {
    /// Free-text search over name and notes.
    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }

    /// Restricts results to biographies carrying this tag.
    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_string());
        self
    }
}

impl Query for BiographySearch {
    fn route(&self) -> &'static str {
        "/biography/search"
    }

    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        if let Some(tag) = self.tag.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("tag", tag.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn no_filters() {
        insta::assert_snapshot!(BiographySearch::default().to_path(), @"/biography/search");
    }

    #[test]
    fn search_and_tag() {
        insta::assert_snapshot!(
            BiographySearch::default()
                .with_search("ana maria")
                .with_tag("work")
                .to_path(),
            @"/biography/search?search=ana+maria&tag=work"
        );
    }

    #[test]
    fn empty_values_are_dropped() {
        insta::assert_snapshot!(
            BiographySearch::default().with_search("").with_tag("família").to_path(),
            @"/biography/search?tag=fam%C3%ADlia"
        );
    }
}
