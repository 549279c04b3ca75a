use serde_json::{Value, json};

/// A single list-query clause: an equality predicate or an ordering.
///
/// Mirrors the subset of the store's query language this API uses. Clauses are
/// combined with AND semantics by [`DocumentStore::list`](crate::DocumentStore::list).
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// `attribute == value`
    Equal(String, Value),
    /// Sort ascending by attribute.
    OrderAsc(String),
    /// Sort descending by attribute.
    OrderDesc(String),
}

impl Query {
    pub fn equal(attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Equal(attribute.into(), value.into())
    }

    pub fn order_asc(attribute: impl Into<String>) -> Self {
        Self::OrderAsc(attribute.into())
    }

    pub fn order_desc(attribute: impl Into<String>) -> Self {
        Self::OrderDesc(attribute.into())
    }

    /// Encodes the clause in Appwrite's JSON query syntax.
    pub(crate) fn to_wire(&self) -> String {
        let value = match self {
            Self::Equal(attribute, value) => json!({
                "method": "equal",
                "attribute": attribute,
                "values": [value],
            }),
            Self::OrderAsc(attribute) => json!({
                "method": "orderAsc",
                "attribute": attribute,
            }),
            Self::OrderDesc(attribute) => json!({
                "method": "orderDesc",
                "attribute": attribute,
            }),
        };
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_encodes_attribute_and_values() {
        let wire = Query::equal("courseId", "COURSE_1").to_wire();
        let parsed: Value = serde_json::from_str(&wire).unwrap();
        assert_eq!(parsed["method"], "equal");
        assert_eq!(parsed["attribute"], "courseId");
        assert_eq!(parsed["values"], json!(["COURSE_1"]));
    }

    #[test]
    fn order_clauses_carry_no_values() {
        let parsed: Value = serde_json::from_str(&Query::order_desc("$createdAt").to_wire()).unwrap();
        assert_eq!(parsed["method"], "orderDesc");
        assert_eq!(parsed["attribute"], "$createdAt");
        assert!(parsed.get("values").is_none());
    }
}
