//! `define_port_error!` builds the error enums exposed by record ports.
//!
//! Every variant carries named fields and gets a snake_case constructor whose
//! arguments accept `impl Into<T>`, so adapters can write
//! `RepositoryError::query("database error")` or
//! `RepositoryError::not_found(id)`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),+ $(,)? } => $message:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field: $ty),+ },
            )+
        }

        impl $name {
            $(
                ::paste::paste! {
                    /// Build this variant from values convertible into its fields.
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                        Self::$variant { $($field: $field.into()),+ }
                    }
                }
            )+
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Constructor coverage for generated port errors.

    use crate::domain::RecordId;
    use uuid::Uuid;

    define_port_error! {
        pub enum SamplePortError {
            Rejected { reason: String } => "rejected: {reason}",
            Missing { id: RecordId, attempts: u32 } => "missing {id} after {attempts} attempts",
        }
    }

    #[test]
    fn string_fields_accept_str() {
        let err = SamplePortError::rejected("duplicate name");
        assert_eq!(err.to_string(), "rejected: duplicate name");
    }

    #[test]
    fn typed_fields_accept_conversions() {
        let err = SamplePortError::missing(Uuid::nil(), 3_u32);
        assert_eq!(
            err.to_string(),
            "missing 00000000-0000-0000-0000-000000000000 after 3 attempts"
        );
    }
}
