//! Typed identifiers for clinic records.
//!
//! Every record is keyed by a UUID. Fresh ids are v7 (time-sortable); a nil
//! UUID is treated as an "empty" identifier by request validation.

/// Declare a UUID-backed id newtype with `Display`, `FromStr` and serde support.
macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub uuid::Uuid);

        impl $name {
            /// Create a new id using UUID v7.
            pub fn new() -> Self {
                Self(uuid::Uuid::now_v7())
            }

            /// Wrap an existing UUID.
            pub fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// The nil id, used by clients to mean "not provided".
            pub fn nil() -> Self {
                Self(uuid::Uuid::nil())
            }

            pub fn is_nil(&self) -> bool {
                self.0.is_nil()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(uuid::Uuid::parse_str(s)?))
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for an owner (client).
    OwnerId
);
uuid_id!(
    /// Unique identifier for an animal (patient).
    AnimalId
);
uuid_id!(
    /// Unique identifier for a veterinarian.
    VeterinarianId
);
uuid_id!(
    /// Unique identifier for an appointment.
    AppointmentId
);
