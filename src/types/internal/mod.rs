/// Validated item fields, ready to be written to the store
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFields {
    pub name: String,
    pub description: String,
    pub price: f64,
}
