/// Custom actions for Product entities.
///
/// These are the supplier-side operations that go beyond a plain patch.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Marks the product as available or sold out.
    SetStock(bool),
    /// Changes the pack price. The new price must be positive.
    Reprice(f64),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    /// Previous stock flag.
    SetStock(bool),
    /// Previous price.
    Reprice(f64),
}
