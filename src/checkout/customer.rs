//! Customer delivery details.

/// Delivery details as entered at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerInfo {
    /// Customer name
    pub name: String,

    /// Contact phone number
    pub phone: String,

    /// Full delivery address
    pub address: String,

    /// Free-form delivery instructions, e.g. "Call before delivery"
    pub notes: Option<String>,
}

impl CustomerInfo {
    /// Check that name, phone and address are all non-empty.
    pub fn has_delivery_details(&self) -> bool {
        !self.name.is_empty() && !self.phone.is_empty() && !self.address.is_empty()
    }

    /// Notes, if any non-blank ones were given.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref().filter(|notes| !notes.trim().is_empty())
    }
}
