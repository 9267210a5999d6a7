//! Macros for reducing boilerplate when defining stored records
//!
//! Every collection record carries the same envelope: a string key field and
//! `created_at`/`updated_at` timestamps. `impl_document!` generates the struct
//! with that envelope and the [`Document`](crate::core::entity::Document)
//! implementation.

/// Define a stored record type
///
/// # Example
/// ```rust,ignore
/// impl_document!(
///     Table,
///     collection = "table",
///     entity_type = "table",
///     key = table_id,
///     {
///         number_of_guests: i64,
///         table_number: i64,
///     }
/// );
///
/// let table = Table::new(4, 7);
/// assert_eq!(Table::collection(), "table");
/// ```
#[macro_export]
macro_rules! impl_document {
    (
        $type:ident,
        collection = $collection:expr,
        entity_type = $entity_type:expr,
        key = $key:ident,
        {
            $( $(#[$meta:meta])* $field:ident : $field_type:ty ),* $(,)?
        }
    ) => {
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $type {
            /// Record key, unique within the collection
            pub $key: String,
            $( $(#[$meta])* pub $field : $field_type, )*
            /// When this record was created
            pub created_at: ::chrono::DateTime<::chrono::Utc>,
            /// When this record was last updated
            pub updated_at: ::chrono::DateTime<::chrono::Utc>,
        }

        impl $crate::core::entity::Document for $type {
            fn collection() -> &'static str {
                $collection
            }

            fn key_field() -> &'static str {
                stringify!($key)
            }

            fn entity_type() -> &'static str {
                $entity_type
            }

            fn key(&self) -> &str {
                &self.$key
            }

            fn created_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.created_at
            }

            fn updated_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.updated_at
            }
        }

        impl $type {
            /// Create a new record with a fresh key and current timestamps
            #[allow(clippy::too_many_arguments)]
            pub fn new($( $field: $field_type ),*) -> Self {
                let now = $crate::core::entity::now();
                Self {
                    $key: $crate::core::entity::new_key(),
                    $( $field, )*
                    created_at: now,
                    updated_at: now,
                }
            }
        }
    };
}
