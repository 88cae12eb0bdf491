//! The category list.

use super::{CategoriesResponse, Endpoint};
use crate::protocol::query::Query;

/// All categories known to the index.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct List;

impl Endpoint for List {
    const PATH: &'static str = "categories/list";
    type Response = CategoriesResponse;

    fn query(&self) -> Query {
        Query::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::podcast::{Category, CategoryId};

    #[test]
    fn decodes_category_list() {
        let response: CategoriesResponse = serde_json::from_str(
            r#"{"status": "true", "feeds": [{"id": 1, "name": "Arts"}, {"id": 2, "name": "Books"}],
                "count": 2, "description": "Categories"}"#,
        )
        .unwrap();
        assert_eq!(
            response.feeds,
            vec![
                Category {
                    id: CategoryId(1),
                    name: "Arts".to_string()
                },
                Category {
                    id: CategoryId(2),
                    name: "Books".to_string()
                },
            ]
        );
        assert_eq!(response.count, Some(2));
    }
}
