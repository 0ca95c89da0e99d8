use serde::Deserialize;

/// One page of a server-paginated listing. The backend owns filtering and
/// pagination; the client only renders what comes back.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(rename = "totalPages", default)]
    pub total_pages: i64,
    #[serde(rename = "totalElements", default)]
    pub total_elements: i64,
    /// Zero-based index of this page.
    #[serde(default)]
    pub number: i64,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_spring_style_page() {
        let json = r#"{"content": [1, 2, 3], "totalPages": 4, "totalElements": 31, "number": 0}"#;
        let page: Page<i32> = serde_json::from_str(json).unwrap();
        assert_eq!(page.content, vec![1, 2, 3]);
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.total_elements, 31);
        assert!(!page.is_empty());
    }
}
