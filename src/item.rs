use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body shared by the item routes. `name` and `price` are required;
/// the other fields default to absent.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Item {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub tax: Option<f64>,
}

/// Item echoed back with its tax-inclusive total.
#[derive(Debug, Serialize, ToSchema)]
pub struct PricedItem {
    #[serde(flatten)]
    pub item: Item,
    pub price_with_tax: f64,
}

/// Item merged with the identifier taken from the request path.
#[derive(Debug, Serialize, ToSchema)]
pub struct ItemWithId {
    pub item_id: i64,
    #[serde(flatten)]
    pub item: Item,
}

/// Item merged with its path identifier and, when supplied, the `q` query
/// parameter. An absent `q` produces no key at all rather than a null.
#[derive(Debug, Serialize, ToSchema)]
pub struct ItemWithQuery {
    pub item_id: i64,
    #[serde(flatten)]
    pub item: Item,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_default_to_none() {
        let item: Item = serde_json::from_str(r#"{"name":"Foo","price":10.0}"#).unwrap();
        assert_eq!(item.name, "Foo");
        assert_eq!(item.price, 10.0);
        assert!(item.description.is_none());
        assert!(item.tax.is_none());
    }

    #[test]
    fn test_missing_price_fails_deserialization() {
        let result = serde_json::from_str::<Item>(r#"{"name":"Foo"}"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("price"));
    }

    #[test]
    fn test_priced_item_flattens_fields() {
        let item = Item {
            name: "Foo".to_string(),
            description: None,
            price: 10.0,
            tax: Some(1.5),
        };
        let value = serde_json::to_value(PricedItem {
            item,
            price_with_tax: 11.5,
        })
        .unwrap();
        assert_eq!(value["name"], "Foo");
        assert_eq!(value["price_with_tax"], 11.5);
        // Absent optional fields serialize as explicit nulls, like the body echo.
        assert!(value["description"].is_null());
    }

    #[test]
    fn test_item_with_query_omits_absent_q() {
        let item = Item {
            name: "Bar".to_string(),
            description: Some("a bar".to_string()),
            price: 2.0,
            tax: None,
        };
        let value = serde_json::to_value(ItemWithQuery {
            item_id: 5,
            item,
            q: None,
        })
        .unwrap();
        assert_eq!(value["item_id"], 5);
        assert!(value.get("q").is_none());
    }
}
