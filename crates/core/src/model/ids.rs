use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error type for parsing an ID from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
}

impl ParseIdError {
    /// Name of the id type that failed to parse.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            #[must_use]
            pub fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the underlying u64 value
            #[must_use]
            pub fn value(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u64>()
                    .map($name::new)
                    .map_err(|_| ParseIdError {
                        kind: stringify!($name),
                    })
            }
        }
    };
}

entity_id!(
    /// Unique identifier for a User
    UserId
);
entity_id!(
    /// Unique identifier for a Goal
    GoalId
);
entity_id!(
    /// Unique identifier for a MuscleGroup
    MuscleGroupId
);
entity_id!(
    /// Unique identifier for an Equipment item
    EquipmentId
);
entity_id!(
    /// Unique identifier for an IntensityLevel
    IntensityLevelId
);
entity_id!(
    /// Unique identifier for a Workout
    WorkoutId
);
entity_id!(
    /// Unique identifier for a recorded ProgressEntry
    ProgressId
);

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_display() {
        let id = UserId::new(42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_debug_names_the_type() {
        assert_eq!(format!("{:?}", WorkoutId::new(7)), "WorkoutId(7)");
        assert_eq!(format!("{:?}", ProgressId::new(3)), "ProgressId(3)");
    }

    #[test]
    fn test_goal_id_from_str() {
        let id: GoalId = "123".parse().unwrap();
        assert_eq!(id, GoalId::new(123));
    }

    #[test]
    fn test_from_str_trims_whitespace() {
        let id: EquipmentId = " 9 ".parse().unwrap();
        assert_eq!(id, EquipmentId::new(9));
    }

    #[test]
    fn test_from_str_invalid_reports_kind() {
        let err = "not-a-number".parse::<MuscleGroupId>().unwrap_err();
        assert_eq!(err.kind(), "MuscleGroupId");
        assert_eq!(err.to_string(), "failed to parse MuscleGroupId from string");
    }

    #[test]
    fn test_negative_is_rejected() {
        assert!("-1".parse::<IntensityLevelId>().is_err());
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&UserId::new(5)).unwrap();
        assert_eq!(json, "5");
        let back: UserId = serde_json::from_str("5").unwrap();
        assert_eq!(back, UserId::new(5));
    }
}
