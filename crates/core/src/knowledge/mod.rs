//! Symptom knowledge base and red-flag table.
//!
//! Both tables are built once (from the built-in data or a YAML knowledge pack) and are read-only
//! afterwards. The engine receives them as `Arc`s, so any number of analyses can share them.
//!
//! Knowledge pack layout:
//!
//! ```yaml
//! symptoms:
//!   - key: chest pain
//!     label: Chest Pain
//!     severity: critical
//!     conditions:
//!       - name: Angina
//!         code: I20.9
//!         probability: 0.25
//!         description: Reduced blood flow to the heart muscle.
//!         typical_symptoms: [chest pain, shortness of breath]
//!         red_flags: [chest pain at rest]
//! red_flags:
//!   - symptom: chest pain
//!     warning: Chest pain can signal a heart attack.
//!     recommendation: Call emergency services.
//! ```

mod builtin;

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use triage_types::SymptomKey;

use crate::types::SeverityClass;
use crate::{TriageError, TriageResult};

/// A condition that a knowledge-base symptom may point to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelatedCondition {
    pub name: String,
    pub code: String,
    /// Prior probability in `[0, 1]`.
    pub probability: f64,
    pub description: String,
    pub typical_symptoms: Vec<String>,
    pub red_flags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KnowledgeEntry {
    pub key: SymptomKey,
    pub label: String,
    pub severity: SeverityClass,
    #[serde(default)]
    pub conditions: Vec<RelatedCondition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RedFlagRule {
    /// Standardised label this rule fires on (compared lowercased).
    pub symptom: String,
    pub warning: String,
    pub recommendation: String,
}

/// Ordered symptom table. Lookup order is table order, so specific keys must precede general
/// ones (`severe headache` before `headache`).
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
    index: HashMap<SymptomKey, usize>,
}

impl KnowledgeBase {
    /// Builds a knowledge base after checking its invariants.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::InvalidKnowledge` if a key is duplicated or contains an earlier key,
    /// a label is blank, a prior falls outside `[0, 1]`, or a condition has an empty
    /// typical-symptom or red-flag list.
    pub fn new(entries: Vec<KnowledgeEntry>) -> TriageResult<Self> {
        let mut index = HashMap::with_capacity(entries.len());

        for (position, entry) in entries.iter().enumerate() {
            validate_entry(entry)?;
            if index.insert(entry.key.clone(), position).is_some() {
                return Err(TriageError::InvalidKnowledge(format!(
                    "duplicate symptom key '{}'",
                    entry.key
                )));
            }
            // A later key containing an earlier one is unreachable through containment lookup.
            if let Some(earlier) = entries[..position]
                .iter()
                .find(|earlier| entry.key.as_str().contains(earlier.key.as_str()))
            {
                return Err(TriageError::InvalidKnowledge(format!(
                    "key '{}' is shadowed by earlier key '{}'",
                    entry.key, earlier.key
                )));
            }
        }

        Ok(Self { entries, index })
    }

    /// The built-in table shipped with the engine.
    pub fn builtin() -> Self {
        let entries = builtin::entries();
        let index = entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.key.clone(), position))
            .collect();
        Self { entries, index }
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact lookup by canonical key.
    pub fn get(&self, key: &SymptomKey) -> Option<&KnowledgeEntry> {
        self.index.get(key).map(|&position| &self.entries[position])
    }

    /// Resolves free text to an entry: an exact key match wins, otherwise the first entry whose
    /// key contains, or is contained in, the trimmed lowercase input. Blank input never matches.
    pub fn resolve(&self, raw: &str) -> Option<&KnowledgeEntry> {
        let key = SymptomKey::new(raw).ok()?;
        self.get(&key).or_else(|| {
            self.entries
                .iter()
                .find(|entry| entry.key.overlaps(key.as_str()))
        })
    }

    /// All recognised symptom keys in table order.
    pub fn symptom_keys(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.key.as_str()).collect()
    }

    /// Keys matching a partial query: prefix hits first, then other substring hits, each group in
    /// table order. A blank query matches nothing.
    pub fn search(&self, query: &str) -> Vec<&str> {
        let Ok(query) = SymptomKey::new(query) else {
            return Vec::new();
        };
        let (prefix, substring): (Vec<&str>, Vec<&str>) = self
            .symptom_keys()
            .into_iter()
            .filter(|key| key.contains(query.as_str()))
            .partition(|key| key.starts_with(query.as_str()));

        prefix.into_iter().chain(substring).collect()
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate_entry(entry: &KnowledgeEntry) -> TriageResult<()> {
    if entry.label.trim().is_empty() {
        return Err(TriageError::InvalidKnowledge(format!(
            "symptom '{}' has an empty label",
            entry.key
        )));
    }

    for condition in &entry.conditions {
        let context = format!("condition '{}' under '{}'", condition.name, entry.key);
        if condition.name.trim().is_empty() {
            return Err(TriageError::InvalidKnowledge(format!(
                "symptom '{}' has a condition with an empty name",
                entry.key
            )));
        }
        if !(0.0..=1.0).contains(&condition.probability) {
            return Err(TriageError::InvalidKnowledge(format!(
                "{context} has probability {} outside [0, 1]",
                condition.probability
            )));
        }
        if !is_non_empty_text_set(&condition.typical_symptoms) {
            return Err(TriageError::InvalidKnowledge(format!(
                "{context} needs at least one typical symptom and no blank entries"
            )));
        }
        if !is_non_empty_text_set(&condition.red_flags) {
            return Err(TriageError::InvalidKnowledge(format!(
                "{context} needs at least one red flag and no blank entries"
            )));
        }
    }

    Ok(())
}

fn is_non_empty_text_set(values: &[String]) -> bool {
    !values.is_empty() && values.iter().all(|v| !v.trim().is_empty())
}

/// Red-flag warnings keyed by lowercase standardised label.
#[derive(Debug, Clone)]
pub struct RedFlagTable {
    rules: HashMap<String, RedFlagRule>,
}

impl RedFlagTable {
    /// # Errors
    ///
    /// Returns `TriageError::InvalidKnowledge` for blank fields or a symptom listed twice.
    pub fn new(rules: Vec<RedFlagRule>) -> TriageResult<Self> {
        let mut seen = HashSet::new();
        let mut table = HashMap::with_capacity(rules.len());

        for rule in rules {
            let symptom = rule.symptom.trim().to_lowercase();
            if symptom.is_empty()
                || rule.warning.trim().is_empty()
                || rule.recommendation.trim().is_empty()
            {
                return Err(TriageError::InvalidKnowledge(
                    "red flag rules need a symptom, a warning and a recommendation".into(),
                ));
            }
            if !seen.insert(symptom.clone()) {
                return Err(TriageError::InvalidKnowledge(format!(
                    "duplicate red flag for '{symptom}'"
                )));
            }
            table.insert(symptom, rule);
        }

        Ok(Self { rules: table })
    }

    pub fn builtin() -> Self {
        let rules = builtin::red_flags()
            .into_iter()
            .map(|rule| (rule.symptom.to_lowercase(), rule))
            .collect();
        Self { rules }
    }

    /// Looks up the rule for a standardised label, ignoring case and surrounding whitespace.
    pub fn get(&self, label: &str) -> Option<&RedFlagRule> {
        self.rules.get(&label.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RedFlagTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct KnowledgePackFile {
    symptoms: Vec<KnowledgeEntry>,
    #[serde(default)]
    red_flags: Vec<RedFlagRule>,
}

/// Parses a YAML knowledge pack into validated tables.
///
/// # Errors
///
/// Returns `TriageError::KnowledgeParse` (with the offending path) for malformed YAML, unknown
/// keys or wrong types, and `TriageError::InvalidKnowledge` when the tables break an invariant.
pub fn parse_knowledge_pack(yaml: &str) -> TriageResult<(KnowledgeBase, RedFlagTable)> {
    let deserializer = serde_yaml::Deserializer::from_str(yaml);
    let pack: KnowledgePackFile = serde_path_to_error::deserialize(deserializer)
        .map_err(|e| TriageError::KnowledgeParse(e.to_string()))?;

    if pack.symptoms.is_empty() {
        return Err(TriageError::InvalidKnowledge(
            "knowledge pack must define at least one symptom".into(),
        ));
    }

    Ok((
        KnowledgeBase::new(pack.symptoms)?,
        RedFlagTable::new(pack.red_flags)?,
    ))
}

/// Reads and parses a YAML knowledge pack from disk.
pub fn load_knowledge_pack(path: &Path) -> TriageResult<(KnowledgeBase, RedFlagTable)> {
    let contents = std::fs::read_to_string(path).map_err(TriageError::FileRead)?;
    let (knowledge, red_flags) = parse_knowledge_pack(&contents)?;
    tracing::info!(
        path = %path.display(),
        symptoms = knowledge.len(),
        red_flags = red_flags.len(),
        "loaded knowledge pack"
    );
    Ok((knowledge, red_flags))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SMALL_PACK: &str = r#"
symptoms:
  - key: Wheezing
    label: Wheezing
    severity: medium
    conditions:
      - name: Asthma
        code: J45.909
        probability: 0.4
        description: Chronic airway inflammation.
        typical_symptoms: [wheezing, cough]
        red_flags: [unable to speak in full sentences]
  - key: itching
    label: Itching
    severity: low
red_flags:
  - symptom: Wheezing
    warning: Severe wheezing can block airways.
    recommendation: Use a rescue inhaler and seek care if it does not help.
"#;

    #[test]
    fn builtin_tables_satisfy_invariants() {
        let builtin = KnowledgeBase::builtin();
        let rebuilt = KnowledgeBase::new(builtin.entries().to_vec()).expect("valid builtin");
        assert_eq!(rebuilt.len(), builtin.len());

        let rules = builtin::red_flags();
        let count = rules.len();
        let table = RedFlagTable::new(rules).expect("valid red flags");
        assert_eq!(table.len(), count);
    }

    #[test]
    fn builtin_lists_specific_keys_before_general_ones() {
        let kb = KnowledgeBase::builtin();
        let keys = kb.symptom_keys();
        for (i, general) in keys.iter().enumerate() {
            for specific in &keys[i + 1..] {
                assert!(
                    !specific.contains(general),
                    "'{specific}' is shadowed by earlier key '{general}'"
                );
            }
        }
    }

    #[test]
    fn resolve_prefers_exact_match() {
        let kb = KnowledgeBase::builtin();
        let entry = kb.resolve("  HEADACHE ").expect("recognised");
        assert_eq!(entry.key.as_str(), "headache");
    }

    #[test]
    fn resolve_uses_containment_in_either_direction() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(
            kb.resolve("sudden severe headache").map(|e| e.key.as_str()),
            Some("severe headache")
        );
        assert_eq!(
            kb.resolve("coughing").map(|e| e.key.as_str()),
            Some("cough")
        );
        assert_eq!(
            kb.resolve("shortness").map(|e| e.key.as_str()),
            Some("shortness of breath")
        );
    }

    #[test]
    fn resolve_ignores_unknown_and_blank_text() {
        let kb = KnowledgeBase::builtin();
        assert!(kb.resolve("purple aura sensation").is_none());
        assert!(kb.resolve("   ").is_none());
    }

    #[test]
    fn search_returns_prefix_hits_before_substring_hits() {
        let kb = KnowledgeBase::builtin();
        let hits = kb.search("pain");
        assert!(hits.contains(&"chest pain"));
        assert!(hits.contains(&"abdominal pain"));

        let hits = kb.search("fe");
        assert_eq!(hits.first(), Some(&"fever"));
        assert!(hits.contains(&"high fever"));
    }

    #[test]
    fn search_with_blank_query_is_empty() {
        assert!(KnowledgeBase::builtin().search("  ").is_empty());
    }

    #[test]
    fn new_rejects_duplicate_keys() {
        let entry = KnowledgeBase::builtin().entries()[0].clone();
        let err = KnowledgeBase::new(vec![entry.clone(), entry]).expect_err("duplicate");
        assert!(matches!(err, TriageError::InvalidKnowledge(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn new_rejects_condition_without_red_flags() {
        let mut entry = KnowledgeBase::builtin().entries()[0].clone();
        entry.conditions[0].red_flags.clear();
        let err = KnowledgeBase::new(vec![entry]).expect_err("missing red flags");
        assert!(matches!(err, TriageError::InvalidKnowledge(msg) if msg.contains("red flag")));
    }

    #[test]
    fn new_rejects_out_of_range_prior() {
        let mut entry = KnowledgeBase::builtin().entries()[0].clone();
        entry.conditions[0].probability = 1.5;
        let err = KnowledgeBase::new(vec![entry]).expect_err("bad prior");
        assert!(matches!(err, TriageError::InvalidKnowledge(msg) if msg.contains("outside")));
    }

    #[test]
    fn parses_small_pack() {
        let (kb, red_flags) = parse_knowledge_pack(SMALL_PACK).expect("valid pack");
        assert_eq!(kb.symptom_keys(), vec!["wheezing", "itching"]);
        assert!(red_flags.get("WHEEZING").is_some());
        assert!(kb.resolve("itching").expect("known").conditions.is_empty());
    }

    #[test]
    fn parse_rejects_unknown_keys_with_path() {
        let yaml = "symptoms:\n  - key: rash\n    label: Rash\n    severity: low\n    colour: red\n";
        let err = parse_knowledge_pack(yaml).expect_err("unknown key");
        match err {
            TriageError::KnowledgeParse(msg) => assert!(msg.contains("colour")),
            other => panic!("expected KnowledgeParse error, got {other:?}"),
        }
    }

    #[test]
    fn parse_rejects_general_key_listed_before_specific_one() {
        let yaml = r#"
symptoms:
  - key: headache
    label: Headache
    severity: medium
  - key: severe headache
    label: Severe Headache
    severity: critical
"#;
        let err = parse_knowledge_pack(yaml).expect_err("shadowed key");
        match err {
            TriageError::InvalidKnowledge(msg) => assert_eq!(
                msg,
                "key 'severe headache' is shadowed by earlier key 'headache'"
            ),
            other => panic!("expected InvalidKnowledge error, got {other:?}"),
        }
    }

    #[test]
    fn parse_accepts_specific_key_listed_first() {
        let yaml = r#"
symptoms:
  - key: severe headache
    label: Severe Headache
    severity: critical
  - key: headache
    label: Headache
    severity: medium
"#;
        let (kb, _) = parse_knowledge_pack(yaml).expect("valid pack");
        assert_eq!(
            kb.resolve("sudden severe headache").map(|e| e.label.as_str()),
            Some("Severe Headache")
        );
    }

    #[test]
    fn red_flag_table_rejects_blank_recommendation() {
        let err = RedFlagTable::new(vec![RedFlagRule {
            symptom: "chest pain".into(),
            warning: "Chest pain can signal a heart attack.".into(),
            recommendation: "   ".into(),
        }])
        .expect_err("blank recommendation");
        assert!(matches!(err, TriageError::InvalidKnowledge(msg) if msg.contains("recommendation")));
    }

    #[test]
    fn parse_rejects_empty_symptom_list() {
        let err = parse_knowledge_pack("symptoms: []\n").expect_err("empty");
        assert!(matches!(err, TriageError::InvalidKnowledge(_)));
    }

    #[test]
    fn loads_pack_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(SMALL_PACK.as_bytes()).expect("write pack");

        let (kb, red_flags) = load_knowledge_pack(file.path()).expect("load pack");
        assert_eq!(kb.len(), 2);
        assert_eq!(red_flags.len(), 1);
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = load_knowledge_pack(&dir.path().join("missing.yaml")).expect_err("missing");
        assert!(matches!(err, TriageError::FileRead(_)));
    }
}
