/// Produces globally unique, creation-ordered identifiers.
pub trait IdentityProvider: Send + Sync {
    fn id(&self) -> String;
}

/// Identity provider backed by xid: sortable, globally unique, and cheap
/// to generate. Suitable for production stores that do not rely on the
/// reference pagination scheme.
#[derive(Debug, Default, Clone, Copy)]
pub struct XidProvider;

impl IdentityProvider for XidProvider {
    fn id(&self) -> String {
        xid::new().to_string()
    }
}
