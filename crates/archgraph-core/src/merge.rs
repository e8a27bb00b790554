//! # Fact Merge Engine
//!
//! Partial update and key removal on a `Facts` bag.
//!
//! - Upsert sets every slot the partial provides and leaves the rest alone
//! - Removal unsets the named slots; absent slots are ignored
//! - The partial is only borrowed; values are cloned into the target

use crate::{Entity, FactKey, Facts};

/// Stateless merge operations on facts.
pub struct FactMerge;

macro_rules! upsert_slots {
    ($target:expr, $partial:expr, [$($slot:ident => $key:ident),* $(,)?]) => {
        $(
            if let Some(value) = &$partial.$slot {
                $target.$slot = Some(value.clone());
                $target.other.remove(FactKey::$key.as_str());
            }
        )*
    };
}

impl FactMerge {
    /// Overwrite every slot set in `partial`; leave the others untouched.
    pub fn upsert(target: &mut Facts, partial: &Facts) {
        upsert_slots!(
            target,
            partial,
            [
                business_capabilities => BusinessCapabilities,
                cmdb_facts => CmdbFacts,
                git => Git,
                tech_stack => TechStack,
                documents => Documents,
                links => Links,
                api_specifications => ApiSpecifications,
                quality_metrics => QualityMetrics,
                platforms => Platforms,
                team => Team,
                kafka => Kafka,
                journey_step => JourneyStep,
            ]
        );
        for (key, value) in &partial.other {
            // A raw value for a known key replaces the typed one.
            target.clear(&FactKey::from(key.as_str()));
            target.other.insert(key.clone(), value.clone());
        }
    }

    /// Unset every key in `keys`. Returns how many were actually set.
    pub fn remove(target: &mut Facts, keys: &[FactKey]) -> usize {
        keys.iter().filter(|key| target.clear(key)).count()
    }

    /// Upsert into an entity's facts.
    pub fn upsert_entity<E: Entity>(entity: &mut E, partial: &Facts) {
        Self::upsert(entity.facts_mut(), partial);
    }

    /// Remove keys from an entity's facts.
    pub fn remove_entity<E: Entity>(entity: &mut E, keys: &[FactKey]) -> usize {
        Self::remove(entity.facts_mut(), keys)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Component, Team};

    fn team(name: &str) -> Team {
        Team {
            team_name: name.to_string(),
            ..Team::default()
        }
    }

    #[test]
    fn upsert_keeps_unspecified_slots() {
        let mut facts = Facts {
            business_capabilities: Some(vec!["Payments".to_string()]),
            ..Facts::default()
        };
        let partial = Facts {
            team: Some(team("Core")),
            ..Facts::default()
        };

        FactMerge::upsert(&mut facts, &partial);

        assert_eq!(
            facts.business_capabilities,
            Some(vec!["Payments".to_string()])
        );
        assert_eq!(facts.team, Some(team("Core")));
    }

    #[test]
    fn upsert_overwrites_provided_slots() {
        let mut facts = Facts {
            team: Some(team("Old")),
            ..Facts::default()
        };
        let partial = Facts {
            team: Some(team("New")),
            ..Facts::default()
        };

        FactMerge::upsert(&mut facts, &partial);
        assert_eq!(facts.team, Some(team("New")));
    }

    #[test]
    fn upsert_merges_other_keys_individually() {
        let mut facts = Facts::default();
        facts.other.insert("a".to_string(), serde_json::json!(1));
        facts.other.insert("b".to_string(), serde_json::json!(2));

        let mut partial = Facts::default();
        partial.other.insert("b".to_string(), serde_json::json!(3));

        FactMerge::upsert(&mut facts, &partial);

        assert_eq!(facts.other.get("a"), Some(&serde_json::json!(1)));
        assert_eq!(facts.other.get("b"), Some(&serde_json::json!(3)));
    }

    #[test]
    fn typed_and_raw_values_replace_each_other() {
        let mut facts: Facts = serde_json::from_str(r#"{"team": "Core"}"#).expect("parse");

        FactMerge::upsert(
            &mut facts,
            &Facts {
                team: Some(team("Core")),
                ..Facts::default()
            },
        );
        assert_eq!(facts.team, Some(team("Core")));
        assert!(facts.other.is_empty());

        let raw: Facts = serde_json::from_str(r#"{"team": 7}"#).expect("parse");
        FactMerge::upsert(&mut facts, &raw);
        assert!(facts.team.is_none());
        assert_eq!(facts.other.get("team"), Some(&serde_json::json!(7)));
    }

    #[test]
    fn remove_ignores_absent_keys() {
        let mut facts = Facts {
            team: Some(team("Core")),
            ..Facts::default()
        };
        let before = facts.clone();

        let removed = FactMerge::remove(&mut facts, &[FactKey::Kafka, FactKey::from("missing")]);

        assert_eq!(removed, 0);
        assert_eq!(facts, before);
    }

    #[test]
    fn remove_unsets_present_keys() {
        let mut component = Component::new("A", "Alpha");
        component.facts.team = Some(team("Core"));
        component.facts.links = Some(Vec::new());

        let removed = FactMerge::remove_entity(&mut component, &[FactKey::Team]);

        assert_eq!(removed, 1);
        assert!(component.facts.team.is_none());
        assert!(component.facts.links.is_some());
    }

    #[test]
    fn partial_is_not_aliased() {
        let mut component = Component::new("A", "Alpha");
        let mut partial = Facts {
            business_capabilities: Some(vec!["X".to_string()]),
            ..Facts::default()
        };

        FactMerge::upsert_entity(&mut component, &partial);
        if let Some(caps) = partial.business_capabilities.as_mut() {
            caps.push("Y".to_string());
        }

        assert_eq!(
            component.facts.business_capabilities,
            Some(vec!["X".to_string()])
        );
    }
}
