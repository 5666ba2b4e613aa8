#[macro_export]
macro_rules! impl_builder_methods {
    ($builder:ident, $($field:ident: $field_type:ty),*) => {
        impl $builder {
            $(
                pub fn $field(mut self, $field: $field_type) -> Self {
                    self.$field = Some($field);
                    self
                }
            )*
        }
    };
}

/// Revision sent in the `anthropic-version` header.
pub const API_VERSION: &str = "2023-06-01";

pub const API_KEY_HEADER: &str = "x-api-key";
pub const VERSION_HEADER: &str = "anthropic-version";

/// Name of the event carrying one completion token.
pub const COMPLETION_EVENT: &str = "completion";

/// Name of the event carrying an upstream-reported error.
pub const ERROR_EVENT: &str = "error";
