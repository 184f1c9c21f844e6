//! Built-in symptom table and red-flag rules.
//!
//! Keys are listed specific-first: resolution walks the table in order, so a general key placed
//! before a more specific one would shadow it.

use triage_types::SymptomKey;

use super::{KnowledgeEntry, RedFlagRule, RelatedCondition};
use crate::types::SeverityClass::{self, Critical, High, Low, Medium};

fn entry(
    key: &'static str,
    label: &str,
    severity: SeverityClass,
    conditions: Vec<RelatedCondition>,
) -> KnowledgeEntry {
    KnowledgeEntry {
        key: SymptomKey::from_static(key),
        label: label.to_string(),
        severity,
        conditions,
    }
}

fn condition(
    name: &str,
    code: &str,
    probability: f64,
    description: &str,
    typical_symptoms: &[&str],
    red_flags: &[&str],
) -> RelatedCondition {
    RelatedCondition {
        name: name.to_string(),
        code: code.to_string(),
        probability,
        description: description.to_string(),
        typical_symptoms: typical_symptoms.iter().map(|s| s.to_string()).collect(),
        red_flags: red_flags.iter().map(|s| s.to_string()).collect(),
    }
}

fn myocardial_infarction() -> RelatedCondition {
    condition(
        "Myocardial Infarction",
        "I21.9",
        0.15,
        "Blockage of blood flow to part of the heart muscle (heart attack).",
        &["chest pain", "shortness of breath", "sweating", "nausea", "arm pain"],
        &["crushing chest pain", "pain spreading to arm or jaw", "cold sweat"],
    )
}

fn angina() -> RelatedCondition {
    condition(
        "Angina",
        "I20.9",
        0.25,
        "Chest discomfort caused by reduced blood flow to the heart.",
        &["chest pain", "shortness of breath", "fatigue"],
        &["chest pain at rest", "pain lasting more than 15 minutes"],
    )
}

fn pneumonia() -> RelatedCondition {
    condition(
        "Pneumonia",
        "J18.9",
        0.2,
        "Infection that inflames the air sacs of one or both lungs.",
        &["shortness of breath", "fever", "cough", "fatigue", "chills"],
        &["bluish lips", "confusion", "rapid breathing"],
    )
}

fn migraine() -> RelatedCondition {
    condition(
        "Migraine",
        "G43.909",
        0.25,
        "Recurrent headache often accompanied by nausea and light sensitivity.",
        &["headache", "nausea", "sensitivity to light", "visual disturbance"],
        &["worst headache of life", "headache with weakness or numbness"],
    )
}

fn influenza() -> RelatedCondition {
    condition(
        "Influenza",
        "J11.1",
        0.3,
        "Viral respiratory infection with abrupt onset of fever and aches.",
        &["fever", "cough", "body aches", "fatigue", "chills"],
        &["difficulty breathing", "persistent chest pressure"],
    )
}

fn bronchitis() -> RelatedCondition {
    condition(
        "Acute Bronchitis",
        "J20.9",
        0.3,
        "Inflammation of the bronchial tubes, usually after a cold.",
        &["cough", "mucus", "fatigue", "chest discomfort"],
        &["coughing blood", "cough lasting more than three weeks"],
    )
}

fn common_cold() -> RelatedCondition {
    condition(
        "Common Cold",
        "J00",
        0.45,
        "Mild viral infection of the nose and throat.",
        &["runny nose", "sore throat", "cough", "sneezing"],
        &["high fever", "symptoms lasting more than ten days"],
    )
}

fn gastroenteritis() -> RelatedCondition {
    condition(
        "Gastroenteritis",
        "A09",
        0.35,
        "Inflammation of the stomach and intestines, often infectious.",
        &["abdominal pain", "nausea", "vomiting", "diarrhea"],
        &["blood in stool", "signs of dehydration"],
    )
}

fn dehydration() -> RelatedCondition {
    condition(
        "Dehydration",
        "E86.0",
        0.25,
        "Loss of more fluid than is taken in.",
        &["dizziness", "thirst", "fatigue", "dark urine"],
        &["no urine for eight hours", "fainting"],
    )
}

pub(super) fn entries() -> Vec<KnowledgeEntry> {
    vec![
        entry(
            "chest pain",
            "Chest Pain",
            Critical,
            vec![
                myocardial_infarction(),
                angina(),
                condition(
                    "Gastroesophageal Reflux",
                    "K21.9",
                    0.3,
                    "Stomach acid flowing back into the oesophagus.",
                    &["chest pain", "heartburn", "nausea", "sour taste"],
                    &["difficulty swallowing", "vomiting blood"],
                ),
                condition(
                    "Costochondritis",
                    "M94.0",
                    0.2,
                    "Inflammation of the cartilage joining ribs to the breastbone.",
                    &["chest pain", "chest tenderness"],
                    &["chest pain with fever", "swelling over the ribs"],
                ),
            ],
        ),
        entry(
            "shortness of breath",
            "Shortness of Breath",
            Critical,
            vec![
                condition(
                    "Asthma",
                    "J45.909",
                    0.3,
                    "Chronic inflammation that narrows the airways.",
                    &["shortness of breath", "wheezing", "cough", "chest tightness"],
                    &["unable to speak in full sentences", "bluish lips"],
                ),
                pneumonia(),
                condition(
                    "Pulmonary Embolism",
                    "I26.99",
                    0.05,
                    "Blood clot blocking an artery in the lungs.",
                    &["shortness of breath", "chest pain", "rapid heartbeat", "leg swelling"],
                    &["sudden breathlessness", "coughing blood"],
                ),
                angina(),
            ],
        ),
        entry(
            "severe headache",
            "Severe Headache",
            Critical,
            vec![
                condition(
                    "Subarachnoid Hemorrhage",
                    "I60.9",
                    0.02,
                    "Bleeding into the space surrounding the brain.",
                    &["severe headache", "stiff neck", "confusion", "vomiting"],
                    &["thunderclap headache", "loss of consciousness"],
                ),
                migraine(),
            ],
        ),
        entry(
            "headache",
            "Headache",
            Medium,
            vec![
                condition(
                    "Tension Headache",
                    "G44.209",
                    0.4,
                    "Band-like head pain commonly linked to stress or posture.",
                    &["headache", "neck pain", "stress"],
                    &["headache after head injury", "headache with fever and stiff neck"],
                ),
                migraine(),
                condition(
                    "Sinusitis",
                    "J32.9",
                    0.15,
                    "Inflammation of the sinus lining.",
                    &["headache", "nasal congestion", "facial pain", "fever"],
                    &["swelling around the eyes", "severe headache"],
                ),
            ],
        ),
        entry(
            "high fever",
            "High Fever",
            High,
            vec![
                condition(
                    "Sepsis",
                    "A41.9",
                    0.03,
                    "Life-threatening organ dysfunction caused by infection.",
                    &["high fever", "confusion", "rapid heartbeat", "chills"],
                    &["mottled skin", "very low blood pressure"],
                ),
                influenza(),
            ],
        ),
        entry(
            "fever",
            "Fever",
            Medium,
            vec![
                influenza(),
                condition(
                    "COVID-19",
                    "U07.1",
                    0.2,
                    "Respiratory illness caused by SARS-CoV-2.",
                    &["fever", "cough", "fatigue", "loss of taste"],
                    &["difficulty breathing", "persistent chest pressure"],
                ),
                condition(
                    "Urinary Tract Infection",
                    "N39.0",
                    0.15,
                    "Bacterial infection of the urinary system.",
                    &["fever", "painful urination", "frequent urination"],
                    &["flank pain", "blood in urine"],
                ),
            ],
        ),
        entry(
            "confusion",
            "Confusion",
            Critical,
            vec![
                condition(
                    "Stroke",
                    "I63.9",
                    0.1,
                    "Interrupted blood supply to part of the brain.",
                    &["confusion", "slurred speech", "facial drooping", "weakness"],
                    &["sudden numbness on one side", "sudden loss of vision"],
                ),
                condition(
                    "Hypoglycemia",
                    "E16.2",
                    0.15,
                    "Abnormally low blood sugar.",
                    &["confusion", "sweating", "shakiness", "dizziness"],
                    &["seizure", "loss of consciousness"],
                ),
            ],
        ),
        entry(
            "persistent cough",
            "Persistent Cough",
            High,
            vec![bronchitis(), pneumonia()],
        ),
        entry(
            "cough",
            "Cough",
            Low,
            vec![common_cold(), bronchitis()],
        ),
        entry("severe pain", "Severe Pain", High, Vec::new()),
        entry(
            "abdominal pain",
            "Abdominal Pain",
            Medium,
            vec![
                gastroenteritis(),
                condition(
                    "Appendicitis",
                    "K35.80",
                    0.05,
                    "Inflammation of the appendix.",
                    &["abdominal pain", "fever", "nausea", "loss of appetite"],
                    &["pain in lower right abdomen", "rigid abdomen"],
                ),
            ],
        ),
        entry("nausea", "Nausea", Low, vec![gastroenteritis(), migraine()]),
        entry(
            "fatigue",
            "Fatigue",
            Low,
            vec![
                condition(
                    "Iron Deficiency Anemia",
                    "D50.9",
                    0.2,
                    "Too few healthy red blood cells due to low iron.",
                    &["fatigue", "weakness", "dizziness", "pale skin"],
                    &["fainting", "racing heartbeat at rest"],
                ),
                condition(
                    "Hypothyroidism",
                    "E03.9",
                    0.1,
                    "Underactive thyroid gland.",
                    &["fatigue", "weight gain", "cold intolerance", "dry skin"],
                    &["extreme drowsiness", "swelling of the face"],
                ),
            ],
        ),
        entry(
            "dizziness",
            "Dizziness",
            Medium,
            vec![
                condition(
                    "Benign Paroxysmal Positional Vertigo",
                    "H81.10",
                    0.25,
                    "Brief spinning sensations triggered by head movement.",
                    &["dizziness", "nausea", "loss of balance"],
                    &["dizziness with slurred speech", "new hearing loss"],
                ),
                dehydration(),
            ],
        ),
        entry(
            "sore throat",
            "Sore Throat",
            Low,
            vec![
                common_cold(),
                condition(
                    "Streptococcal Pharyngitis",
                    "J02.0",
                    0.2,
                    "Bacterial infection of the throat.",
                    &["sore throat", "fever", "swollen lymph nodes"],
                    &["difficulty swallowing saliva", "muffled voice"],
                ),
            ],
        ),
        entry(
            "runny nose",
            "Runny Nose",
            Low,
            vec![
                common_cold(),
                condition(
                    "Allergic Rhinitis",
                    "J30.9",
                    0.3,
                    "Allergic inflammation of the nasal passages.",
                    &["runny nose", "sneezing", "itchy eyes"],
                    &["wheezing", "facial swelling"],
                ),
            ],
        ),
        entry(
            "rash",
            "Rash",
            Low,
            vec![condition(
                "Contact Dermatitis",
                "L25.9",
                0.4,
                "Skin reaction to an irritant or allergen.",
                &["rash", "itching", "redness"],
                &["rash with swelling of lips or tongue", "rash spreading rapidly"],
            )],
        ),
        entry(
            "back pain",
            "Back Pain",
            Medium,
            vec![condition(
                "Lumbar Strain",
                "S39.012A",
                0.5,
                "Stretched or torn muscle in the lower back.",
                &["back pain", "muscle spasm", "stiffness"],
                &["loss of bladder control", "numbness in the groin"],
            )],
        ),
    ]
}

fn red_flag(symptom: &str, warning: &str, recommendation: &str) -> RedFlagRule {
    RedFlagRule {
        symptom: symptom.to_string(),
        warning: warning.to_string(),
        recommendation: recommendation.to_string(),
    }
}

pub(super) fn red_flags() -> Vec<RedFlagRule> {
    vec![
        red_flag(
            "chest pain",
            "Chest pain may indicate a heart attack or other serious cardiac event.",
            "Call emergency services immediately; do not drive yourself to hospital.",
        ),
        red_flag(
            "shortness of breath",
            "Difficulty breathing can indicate a serious heart or lung problem.",
            "Seek emergency care now, especially if breathing is getting worse.",
        ),
        red_flag(
            "severe headache",
            "A sudden, severe headache may signal bleeding in the brain.",
            "Seek emergency care, particularly if this is the worst headache you have had.",
        ),
        red_flag(
            "high fever",
            "A very high temperature can indicate a serious infection.",
            "Seek urgent medical attention, especially with confusion or a stiff neck.",
        ),
        red_flag(
            "confusion",
            "New confusion can be a sign of stroke, infection or low blood sugar.",
            "Call emergency services; note when the confusion started.",
        ),
    ]
}
