//! # Fact Types
//!
//! Typed metadata attached to components, groups and edges.
//!
//! The set of fact keys is fixed (`FactKey`) and each key has a concrete value
//! shape. Keys outside the fixed set are kept verbatim in `Facts::other` so a
//! document written by a newer tool still round-trips through the store.
//!
//! Loading never rejects a document over fact contents: a known key whose
//! value does not fit its shape is kept raw in `Facts::other` under the same
//! key, and enum fields carry an `Unknown` catch-all.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// FACT KEYS
// =============================================================================

/// Identifier of one fact slot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FactKey {
    BusinessCapabilities,
    CmdbFacts,
    Git,
    TechStack,
    Documents,
    Links,
    ApiSpecifications,
    QualityMetrics,
    Platforms,
    Team,
    Kafka,
    JourneyStep,
    /// A key outside the fixed set, stored in `Facts::other`.
    Other(String),
}

impl FactKey {
    /// Every key of the fixed set, in document order.
    pub const KNOWN: [FactKey; 12] = [
        Self::BusinessCapabilities,
        Self::CmdbFacts,
        Self::Git,
        Self::TechStack,
        Self::Documents,
        Self::Links,
        Self::ApiSpecifications,
        Self::QualityMetrics,
        Self::Platforms,
        Self::Team,
        Self::Kafka,
        Self::JourneyStep,
    ];

    /// The JSON key of this fact.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::BusinessCapabilities => "businessCapabilities",
            Self::CmdbFacts => "cmdbFacts",
            Self::Git => "git",
            Self::TechStack => "techStack",
            Self::Documents => "documents",
            Self::Links => "links",
            Self::ApiSpecifications => "apiSpecifications",
            Self::QualityMetrics => "qualityMetrics",
            Self::Platforms => "platforms",
            Self::Team => "team",
            Self::Kafka => "kafka",
            Self::JourneyStep => "journeyStep",
            Self::Other(key) => key,
        }
    }
}

impl From<&str> for FactKey {
    fn from(key: &str) -> Self {
        Self::KNOWN
            .iter()
            .find(|known| known.as_str() == key)
            .cloned()
            .unwrap_or_else(|| Self::Other(key.to_string()))
    }
}

impl From<String> for FactKey {
    fn from(key: String) -> Self {
        Self::from(key.as_str())
    }
}

impl From<FactKey> for String {
    fn from(key: FactKey) -> Self {
        match key {
            FactKey::Other(key) => key,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// FACTS BAG
// =============================================================================

/// All facts of one entity. Every slot is optional; an unset slot is absent
/// from the JSON form.
///
/// A known key may also sit in `other` when its stored value is off-shape.
/// It then counts as set and is written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Facts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_capabilities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmdb_facts: Option<CmdbFacts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git: Option<GitInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_stack: Option<Vec<TechStackItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<Document>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Link>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_specifications: Option<Vec<ApiSpecification>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_metrics: Option<QualityMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platforms: Option<Vec<Platform>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<Team>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kafka: Option<KafkaInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub journey_step: Option<JourneyStepFacts>,
    /// Keys outside the fixed set, and known keys holding off-shape values.
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_json::Value>,
}

impl Facts {
    /// Create an empty facts bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no slot is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys().is_empty()
    }

    /// Check whether a slot is set.
    #[must_use]
    pub fn contains(&self, key: &FactKey) -> bool {
        if self.other.contains_key(key.as_str()) {
            return true;
        }
        match key {
            FactKey::BusinessCapabilities => self.business_capabilities.is_some(),
            FactKey::CmdbFacts => self.cmdb_facts.is_some(),
            FactKey::Git => self.git.is_some(),
            FactKey::TechStack => self.tech_stack.is_some(),
            FactKey::Documents => self.documents.is_some(),
            FactKey::Links => self.links.is_some(),
            FactKey::ApiSpecifications => self.api_specifications.is_some(),
            FactKey::QualityMetrics => self.quality_metrics.is_some(),
            FactKey::Platforms => self.platforms.is_some(),
            FactKey::Team => self.team.is_some(),
            FactKey::Kafka => self.kafka.is_some(),
            FactKey::JourneyStep => self.journey_step.is_some(),
            FactKey::Other(_) => false,
        }
    }

    /// The keys currently set, known keys first in document order.
    #[must_use]
    pub fn keys(&self) -> Vec<FactKey> {
        FactKey::KNOWN
            .iter()
            .filter(|key| self.contains(key))
            .cloned()
            .chain(
                self.other
                    .keys()
                    .map(|key| FactKey::from(key.as_str()))
                    .filter(|key| matches!(key, FactKey::Other(_))),
            )
            .collect()
    }

    /// Unset a slot. Returns whether it was set.
    pub fn clear(&mut self, key: &FactKey) -> bool {
        let raw = self.other.remove(key.as_str()).is_some();
        let typed = match key {
            FactKey::BusinessCapabilities => self.business_capabilities.take().is_some(),
            FactKey::CmdbFacts => self.cmdb_facts.take().is_some(),
            FactKey::Git => self.git.take().is_some(),
            FactKey::TechStack => self.tech_stack.take().is_some(),
            FactKey::Documents => self.documents.take().is_some(),
            FactKey::Links => self.links.take().is_some(),
            FactKey::ApiSpecifications => self.api_specifications.take().is_some(),
            FactKey::QualityMetrics => self.quality_metrics.take().is_some(),
            FactKey::Platforms => self.platforms.take().is_some(),
            FactKey::Team => self.team.take().is_some(),
            FactKey::Kafka => self.kafka.take().is_some(),
            FactKey::JourneyStep => self.journey_step.take().is_some(),
            FactKey::Other(_) => false,
        };
        raw || typed
    }

    /// Store `value` under `key`, typed when it fits the key's shape.
    fn absorb(&mut self, key: String, value: serde_json::Value) {
        let other = &mut self.other;
        match FactKey::from(key.as_str()) {
            FactKey::BusinessCapabilities => {
                typed_or_raw(&mut self.business_capabilities, other, key, value);
            }
            FactKey::CmdbFacts => typed_or_raw(&mut self.cmdb_facts, other, key, value),
            FactKey::Git => typed_or_raw(&mut self.git, other, key, value),
            FactKey::TechStack => typed_or_raw(&mut self.tech_stack, other, key, value),
            FactKey::Documents => typed_or_raw(&mut self.documents, other, key, value),
            FactKey::Links => typed_or_raw(&mut self.links, other, key, value),
            FactKey::ApiSpecifications => {
                typed_or_raw(&mut self.api_specifications, other, key, value);
            }
            FactKey::QualityMetrics => typed_or_raw(&mut self.quality_metrics, other, key, value),
            FactKey::Platforms => typed_or_raw(&mut self.platforms, other, key, value),
            FactKey::Team => typed_or_raw(&mut self.team, other, key, value),
            FactKey::Kafka => typed_or_raw(&mut self.kafka, other, key, value),
            FactKey::JourneyStep => typed_or_raw(&mut self.journey_step, other, key, value),
            FactKey::Other(_) => {
                other.insert(key, value);
            }
        }
    }
}

/// Parse `value` into `slot`, or keep it raw in `other` when it does not fit.
/// `null` leaves the slot unset.
fn typed_or_raw<T: DeserializeOwned>(
    slot: &mut Option<T>,
    other: &mut BTreeMap<String, serde_json::Value>,
    key: String,
    value: serde_json::Value,
) {
    if value.is_null() {
        return;
    }
    match serde_json::from_value::<T>(value.clone()) {
        Ok(typed) => *slot = Some(typed),
        Err(_) => {
            other.insert(key, value);
        }
    }
}

impl<'de> Deserialize<'de> for Facts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
        let mut facts = Self::default();
        for (key, value) in entries {
            facts.absorb(key, value);
        }
        Ok(facts)
    }
}

// =============================================================================
// FACT VALUE SHAPES
// =============================================================================

/// Configuration-management record of a component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CmdbFacts {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Vec<String>>,
    pub solution: Solution,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcomponents: Option<Vec<Subcomponent>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_cost: Option<AnnualCost>,
}

/// The CMDB solution a component belongs to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Solution {
    pub id: String,
    pub name: String,
    pub link: String,
}

/// A CMDB subcomponent, id pattern `XX-00`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subcomponent {
    pub id: String,
    pub description: String,
    pub link: String,
}

/// Yearly running cost.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnualCost {
    pub amount: f64,
    pub currency: String,
}

/// Source control activity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GitInfo {
    pub repositories: Vec<Repository>,
    pub last_commit: String,
    pub top_contributors: Vec<Contributor>,
}

/// One repository and its commit history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Repository {
    pub url: String,
    pub description: String,
    pub monthly_commits: MonthlyCommits,
}

/// Commit counts bucketed per month.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthlyCommits {
    pub period: String,
    pub data: Vec<MonthCommitCount>,
}

/// Commits in one month.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthCommitCount {
    pub month: String,
    pub commits: u64,
}

/// A repository contributor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contributor {
    pub name: String,
    pub email: String,
    pub avatar_url: String,
}

/// A library, framework or runtime used by a component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechStackItem {
    pub name: String,
    pub version: String,
    pub source: String,
}

/// A linked document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub url: String,
    pub description: String,
}

/// A typed link (BRD, wiki, dashboard, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    #[serde(rename = "type")]
    pub link_type: String,
    pub url: String,
}

/// API style of a specification. Unlisted spellings are kept as `Unknown`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiType {
    #[default]
    #[serde(rename = "REST")]
    Rest,
    #[serde(rename = "GraphQL")]
    GraphQl,
    #[serde(rename = "SOAP")]
    Soap,
    #[serde(rename = "other")]
    Other,
    #[serde(untagged)]
    Unknown(String),
}

/// A published API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiSpecification {
    pub api_type: ApiType,
    pub api_space: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specification: Option<String>,
}

/// Code quality indicators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QualityMetrics {
    pub code_coverage_percentage: f64,
    pub link_to_coverage_report: String,
    pub api_linting_issues: LintingIssues,
}

/// API linting findings by severity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintingIssues {
    pub minor: u32,
    pub major: u32,
}

/// Hosting platform kind. Unlisted kinds are kept as `Unknown`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformType {
    Mainframe,
    #[default]
    Onprem,
    Azure,
    #[serde(untagged)]
    Unknown(String),
}

/// A platform the component runs on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Platform {
    #[serde(rename = "type")]
    pub platform_type: PlatformType,
    pub comment: String,
}

/// The architect responsible for a team's solutions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SolutionArchitect {
    pub name: String,
    pub email: String,
    pub avatar_url: String,
}

/// Owning team.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Team {
    pub team_name: String,
    pub kb_space_link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution_architect: Option<SolutionArchitect>,
}

/// Messaging topics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KafkaInfo {
    pub publishing_to_topics: Vec<String>,
    pub listening_to_topics: Vec<String>,
}

/// A step of a customer journey drawn on the graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JourneyStepFacts {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fact_key_string_mapping() {
        assert_eq!(FactKey::from("team"), FactKey::Team);
        assert_eq!(FactKey::from("cmdbFacts"), FactKey::CmdbFacts);
        assert_eq!(
            FactKey::from("sla"),
            FactKey::Other("sla".to_string())
        );
        assert_eq!(String::from(FactKey::ApiSpecifications), "apiSpecifications");
    }

    #[test]
    fn unknown_keys_land_in_other() {
        let json = r#"{"businessCapabilities":["Payments"],"sla":{"tier":1}}"#;
        let facts: Facts = serde_json::from_str(json).expect("parse");

        assert_eq!(
            facts.business_capabilities,
            Some(vec!["Payments".to_string()])
        );
        assert_eq!(facts.other.get("sla"), Some(&serde_json::json!({"tier": 1})));
        assert_eq!(
            facts.keys(),
            vec![FactKey::BusinessCapabilities, FactKey::Other("sla".to_string())]
        );

        let back = serde_json::to_value(&facts).expect("serialize");
        assert_eq!(back["sla"]["tier"], 1);
    }

    #[test]
    fn clear_reports_presence() {
        let mut facts = Facts {
            team: Some(Team::default()),
            ..Facts::default()
        };

        assert!(facts.clear(&FactKey::Team));
        assert!(!facts.clear(&FactKey::Team));
        assert!(facts.is_empty());
    }

    #[test]
    fn link_and_platform_use_type_key() {
        let link: Link =
            serde_json::from_str(r#"{"type":"BRD","url":"https://x"}"#).expect("parse");
        assert_eq!(link.link_type, "BRD");

        let platform: Platform =
            serde_json::from_str(r#"{"type":"azure","comment":"prod"}"#).expect("parse");
        assert_eq!(platform.platform_type, PlatformType::Azure);
    }

    #[test]
    fn unlisted_enum_values_are_kept() {
        let json = r#"{
            "platforms": [{"type": "aws", "comment": ""}],
            "apiSpecifications": [{"apiType": "gRPC", "apiSpace": "orders"}]
        }"#;
        let facts: Facts = serde_json::from_str(json).expect("parse");

        let platforms = facts.platforms.clone().expect("platforms");
        assert_eq!(platforms[0].platform_type, PlatformType::Unknown("aws".to_string()));
        let specs = facts.api_specifications.clone().expect("specs");
        assert_eq!(specs[0].api_type, ApiType::Unknown("gRPC".to_string()));

        let back = serde_json::to_value(&facts).expect("serialize");
        assert_eq!(back["platforms"][0]["type"], "aws");
        assert_eq!(back["apiSpecifications"][0]["apiType"], "gRPC");
    }

    #[test]
    fn off_shape_known_key_kept_raw() {
        let json = r#"{"team": "Core", "kafka": {"publishingToTopics": ["orders"]}}"#;
        let mut facts: Facts = serde_json::from_str(json).expect("parse");

        assert!(facts.team.is_none());
        assert_eq!(facts.other.get("team"), Some(&serde_json::json!("Core")));
        assert!(facts.contains(&FactKey::Team));
        assert_eq!(facts.keys(), vec![FactKey::Team, FactKey::Kafka]);

        let back = serde_json::to_value(&facts).expect("serialize");
        assert_eq!(back["team"], "Core");
        assert_eq!(back["kafka"]["publishingToTopics"][0], "orders");

        assert!(facts.clear(&FactKey::Team));
        assert!(!facts.contains(&FactKey::Team));
    }

    #[test]
    fn api_type_uses_source_spelling() {
        let spec: ApiSpecification =
            serde_json::from_str(r#"{"apiType":"GraphQL","apiSpace":"orders"}"#).expect("parse");
        assert_eq!(spec.api_type, ApiType::GraphQl);
        assert!(spec.specification.is_none());
    }
}
