//! String newtypes.
//!
//! Every cryptographic value crosses the oracle boundary as text, and every id
//! is a ledger key. Wrapping each kind separately makes it a type error to pass
//! a token where a ciphertext is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

/// Implements `Debug` and `Display` showing the raw value (identifiers only).
macro_rules! plain_display {
    ($($name:ident),*) => {
        $(
            impl fmt::Debug for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}({:?})", stringify!($name), self.0)
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }
        )*
    };
}

/// Implements a `Debug` that only shows the length. Keeps secrets out of logs.
macro_rules! redacted_debug {
    ($($name:ident),*) => {
        $(
            impl fmt::Debug for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}(<{} chars>)", stringify!($name), self.0.len())
                }
            }
        )*
    };
}

string_newtype!(
    /// Ledger key of a subject record
    RecordId
);
string_newtype!(
    /// Ledger key of a proposal, chosen by the caller
    ProposalId
);
string_newtype!(
    /// Ledger key of a re-keyed result, always derived from a proposal id
    ResultId
);
string_newtype!(
    /// Names the encryption key a ciphertext is under
    KeyId
);
string_newtype!(
    /// Opaque ciphertext under the homomorphic scheme
    Ciphertext
);
string_newtype!(
    /// One half of the token pair authorizing a key switch
    ReKeyToken
);
string_newtype!(
    /// Arithmetic modulus handed through to the oracle
    Modulus
);

plain_display!(RecordId, ProposalId, ResultId, KeyId, Modulus);
redacted_debug!(Ciphertext, ReKeyToken);
