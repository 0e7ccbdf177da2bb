//! `define_port_error!` generates a `thiserror` enum plus one snake_case
//! constructor per variant, so adapters build errors as
//! `SnippetPersistenceError::query("...")`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        // Braced construction is accepted for unit variants too, so one
        // template covers every variant shape.
        ::paste::paste! {
            impl $name {
                $(
                    pub fn [<$variant:snake>]($( $($field: impl Into<$ty>),* )?) -> Self {
                        Self::$variant { $( $($field: $field.into()),* )? }
                    }
                )*
            }
        }
    };
}

pub(crate) use define_port_error;
