use mongodb::bson::{bson, doc, Bson, Document};

/// Case-insensitive substring match of `query` across the given fields.
/// Empty queries produce no filter.
pub fn text_filter(query: &str, fields: &[&str]) -> Option<Bson> {
    if query.trim().is_empty() {
        return None;
    }
    let pattern = regex::escape(query.trim());
    let clauses: Vec<Document> = fields
        .iter()
        .map(|field| doc! { *field: { "$regex": &pattern, "$options": "i" } })
        .collect();
    Some(bson!(clauses))
}

/// Exact (case-insensitive) membership test for a tag-list field such as
/// `interests` or `cuisine`. `"all"` and empty values are no-ops.
pub fn tag_filter(value: &str) -> Option<Document> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("all") {
        return None;
    }
    Some(doc! { "$elemMatch": { "$regex": format!("^{}$", regex::escape(value)), "$options": "i" } })
}

/// Exact (case-insensitive) equality for a scalar field such as `continent`
/// or `priceRange`. `"all"` and empty values are no-ops.
pub fn exact_filter(value: &str) -> Option<Document> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("all") {
        return None;
    }
    Some(doc! { "$regex": format!("^{}$", regex::escape(value)), "$options": "i" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_produces_no_text_filter() {
        assert!(text_filter("", &["name"]).is_none());
        assert!(text_filter("   ", &["name", "description"]).is_none());
    }

    #[test]
    fn text_filter_covers_every_field_case_insensitively() {
        let clauses = text_filter("paris", &["name", "country", "description"]).unwrap();
        let clauses = clauses.as_array().unwrap();

        assert_eq!(clauses.len(), 3);
        let first = clauses[0].as_document().unwrap();
        let name = first.get_document("name").unwrap();
        assert_eq!(name.get_str("$regex").unwrap(), "paris");
        assert_eq!(name.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn text_filter_escapes_regex_metacharacters() {
        let clauses = text_filter("st. john's (old)", &["name"]).unwrap();
        let pattern = clauses.as_array().unwrap()[0]
            .as_document()
            .unwrap()
            .get_document("name")
            .unwrap()
            .get_str("$regex")
            .unwrap()
            .to_string();

        assert!(pattern.contains(r"\."));
        assert!(pattern.contains(r"\("));
    }

    #[test]
    fn all_and_empty_are_filter_no_ops() {
        assert!(tag_filter("all").is_none());
        assert!(tag_filter("ALL").is_none());
        assert!(tag_filter("").is_none());
        assert!(exact_filter("all").is_none());
        assert!(exact_filter("  ").is_none());
    }

    #[test]
    fn tag_filter_requires_exact_membership() {
        let filter = tag_filter("Food").unwrap();
        let inner = filter.get_document("$elemMatch").unwrap();
        assert_eq!(inner.get_str("$regex").unwrap(), "^Food$");
        assert_eq!(inner.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn exact_filter_anchors_the_whole_value() {
        let filter = exact_filter("$$").unwrap();
        assert_eq!(filter.get_str("$regex").unwrap(), r"^\$\$$");
    }
}
