//! Type-safe identifier wrappers around database `BIGINT` keys.
//!
//! Meets, races, users and crews are all keyed by integers in `PostgreSQL`.
//! Wrapping them prevents passing a race id where a meet id is expected.
//! Ids are always assigned by the store (`BIGSERIAL`); there is no
//! app-side generation.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Generates a newtype wrapper around [`i64`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[serde(transparent)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(#[ts(type = "number")] pub i64);

        impl $name {
            /// Return the inner [`i64`] value.
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Identifier of a meet.
    MeetId
}

define_id! {
    /// Identifier of a race.
    RaceId
}

define_id! {
    /// Identifier of a registered user (owned by the auth service).
    UserId
}

define_id! {
    /// Identifier of a crew. Crews are managed outside this workspace.
    CrewId
}
