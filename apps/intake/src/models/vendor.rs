use sqlx::FromRow;

/// Vendor as exposed to the rest of the service. The admin secret stays in
/// the store and is only ever compared there.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct VendorRow {
    pub id: i64,
    pub name: String,
}
