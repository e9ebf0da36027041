use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which matrix drives the arc cost. Every vehicle shares the same objective.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Objective {
    #[default]
    Distance,
    Time,
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Objective::Distance => write!(f, "distance"),
            Objective::Time => write!(f, "time"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_lowercase() {
        let objective: Objective = serde_json::from_str("\"time\"").unwrap();
        assert_eq!(objective, Objective::Time);

        let objective: Objective = serde_json::from_str("\"distance\"").unwrap();
        assert_eq!(objective, Objective::Distance);

        assert!(serde_json::from_str::<Objective>("\"cost\"").is_err());
    }

    #[test]
    fn test_default_is_distance() {
        assert_eq!(Objective::default(), Objective::Distance);
    }
}
