use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::TonnageClass;

/// Required qualifications for one onboard position on one vessel tonnage class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualificationRequirement {
    pub tonnage_class: TonnageClass,
    pub position: String,
    pub required_qualifications: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read qualification catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid qualification catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate catalog entry for {position} on {tonnage_class}")]
    Duplicate {
        tonnage_class: TonnageClass,
        position: String,
    },
    #[error("catalog entry for {tonnage_class} has a blank position")]
    BlankPosition { tonnage_class: TonnageClass },
}

/// Immutable lookup of position requirements keyed by (tonnage class, position).
///
/// Built once at startup; there is no mutation API.
#[derive(Debug, Clone)]
pub struct QualificationCatalog {
    entries: Vec<QualificationRequirement>,
    index: HashMap<(TonnageClass, String), usize>,
}

impl QualificationCatalog {
    pub fn standard() -> Self {
        let entries = STANDARD_REQUIREMENTS
            .iter()
            .map(|(tonnage_class, position, qualifications)| QualificationRequirement {
                tonnage_class: *tonnage_class,
                position: (*position).to_string(),
                required_qualifications: qualifications.iter().map(|q| q.to_string()).collect(),
            })
            .collect::<Vec<_>>();

        let index = entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| ((entry.tonnage_class, position_key(&entry.position)), idx))
            .collect();

        Self { entries, index }
    }

    pub fn from_requirements(
        entries: Vec<QualificationRequirement>,
    ) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            let key = position_key(&entry.position);
            if key.is_empty() {
                return Err(CatalogError::BlankPosition {
                    tonnage_class: entry.tonnage_class,
                });
            }
            if index.insert((entry.tonnage_class, key), idx).is_some() {
                return Err(CatalogError::Duplicate {
                    tonnage_class: entry.tonnage_class,
                    position: entry.position.clone(),
                });
            }
        }

        Ok(Self { entries, index })
    }

    /// Load a catalog resource: a JSON array of requirement entries.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let entries: Vec<QualificationRequirement> = serde_json::from_reader(reader)?;
        Self::from_requirements(entries)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let catalog = Self::from_reader(BufReader::new(file))?;
        info!(
            path = %path.display(),
            entries = catalog.entries.len(),
            "loaded qualification catalog"
        );
        Ok(catalog)
    }

    /// Ordered requirement names; empty when the pair is not in the catalog.
    pub fn requirements_for(&self, tonnage_class: TonnageClass, position: &str) -> &[String] {
        self.index
            .get(&(tonnage_class, position_key(position)))
            .map(|idx| self.entries[*idx].required_qualifications.as_slice())
            .unwrap_or(&[])
    }

    /// Whether the position is defined for any tonnage class.
    pub fn knows_position(&self, position: &str) -> bool {
        let key = position_key(position);
        self.entries
            .iter()
            .any(|entry| position_key(&entry.position) == key)
    }

    pub fn positions_for(&self, tonnage_class: TonnageClass) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.tonnage_class == tonnage_class)
            .map(|entry| entry.position.as_str())
            .collect()
    }

    pub fn entries(&self) -> &[QualificationRequirement] {
        &self.entries
    }
}

impl Default for QualificationCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

pub(crate) fn position_key(position: &str) -> String {
    position.trim().to_ascii_lowercase()
}

const STCW: &str = "STCW Basic Training";
const ENG1: &str = "ENG1 Medical";
const PDSD: &str = "Proficiency in Designated Security Duties";
const SECURITY_AWARENESS: &str = "Security Awareness";
const GMDSS_GOC: &str = "GMDSS General Operator Certificate";
const FOOD_HYGIENE_2: &str = "Food Hygiene Level 2";
const MEDICAL_FIRST_AID: &str = "Medical First Aid";
const POWERBOAT_2: &str = "Powerboat Level 2";
const ADVANCED_FIRE_FIGHTING: &str = "Advanced Fire Fighting";

type RequirementRow = (TonnageClass, &'static str, &'static [&'static str]);

const STANDARD_REQUIREMENTS: &[RequirementRow] = &[
    (
        TonnageClass::Under200,
        "Captain",
        &[
            STCW,
            ENG1,
            "Yachtmaster Offshore",
            "GMDSS Short Range Certificate",
            "Elementary First Aid",
            PDSD,
        ],
    ),
    (
        TonnageClass::Under200,
        "First Officer",
        &[
            STCW,
            ENG1,
            "Yachtmaster Coastal",
            "VHF Short Range Certificate",
            POWERBOAT_2,
        ],
    ),
    (
        TonnageClass::Under200,
        "Engineer",
        &[
            STCW,
            ENG1,
            "Approved Engine Course 1",
            "Approved Engine Course 2",
        ],
    ),
    (
        TonnageClass::Under200,
        "Deckhand",
        &[STCW, ENG1, POWERBOAT_2, "Personal Watercraft Proficiency"],
    ),
    (TonnageClass::Under200, "Stewardess", &[STCW, ENG1, FOOD_HYGIENE_2]),
    (
        TonnageClass::Under500,
        "Captain",
        &[
            STCW,
            ENG1,
            "Master (Yachts) 500GT",
            GMDSS_GOC,
            "Medical Care",
            "HELM (Management)",
            PDSD,
        ],
    ),
    (
        TonnageClass::Under500,
        "First Officer",
        &[
            STCW,
            ENG1,
            "Officer of the Watch (Yachts) 3000GT",
            GMDSS_GOC,
            MEDICAL_FIRST_AID,
            "HELM (Operational)",
        ],
    ),
    (
        TonnageClass::Under500,
        "Bosun",
        &[
            STCW,
            ENG1,
            "Yachtmaster Offshore",
            POWERBOAT_2,
            SECURITY_AWARENESS,
        ],
    ),
    (
        TonnageClass::Under500,
        "Deckhand",
        &[STCW, ENG1, POWERBOAT_2, SECURITY_AWARENESS],
    ),
    (
        TonnageClass::Under500,
        "Chief Engineer",
        &[
            STCW,
            ENG1,
            "Y4 Engineer",
            MEDICAL_FIRST_AID,
            SECURITY_AWARENESS,
        ],
    ),
    (
        TonnageClass::Under500,
        "Second Engineer",
        &[
            STCW,
            ENG1,
            "Approved Engine Course 1",
            "Approved Engine Course 2",
            SECURITY_AWARENESS,
        ],
    ),
    (
        TonnageClass::Under500,
        "Chief Stewardess",
        &[
            STCW,
            ENG1,
            FOOD_HYGIENE_2,
            MEDICAL_FIRST_AID,
            SECURITY_AWARENESS,
        ],
    ),
    (
        TonnageClass::Under500,
        "Stewardess",
        &[STCW, ENG1, FOOD_HYGIENE_2, SECURITY_AWARENESS],
    ),
    (
        TonnageClass::Under500,
        "Chef",
        &[
            STCW,
            ENG1,
            "Ship's Cook Certificate",
            FOOD_HYGIENE_2,
            SECURITY_AWARENESS,
        ],
    ),
    (
        TonnageClass::Under3000,
        "Captain",
        &[
            STCW,
            ENG1,
            "Master (Yachts) 3000GT",
            GMDSS_GOC,
            "Medical Care",
            "HELM (Management)",
            "Ship Security Officer",
        ],
    ),
    (
        TonnageClass::Under3000,
        "First Officer",
        &[
            STCW,
            ENG1,
            "Chief Mate (Yachts) 3000GT",
            GMDSS_GOC,
            "Medical Care",
            "HELM (Management)",
            ADVANCED_FIRE_FIGHTING,
        ],
    ),
    (
        TonnageClass::Under3000,
        "Second Officer",
        &[
            STCW,
            ENG1,
            "Officer of the Watch (Yachts) 3000GT",
            GMDSS_GOC,
            "HELM (Operational)",
            ADVANCED_FIRE_FIGHTING,
        ],
    ),
    (
        TonnageClass::Under3000,
        "Third Officer",
        &[
            STCW,
            ENG1,
            "Officer of the Watch (Yachts) 3000GT",
            GMDSS_GOC,
            MEDICAL_FIRST_AID,
        ],
    ),
    (
        TonnageClass::Under3000,
        "Bosun",
        &[STCW, ENG1, "Yachtmaster Offshore", POWERBOAT_2, PDSD],
    ),
    (
        TonnageClass::Under3000,
        "Deckhand",
        &[STCW, ENG1, POWERBOAT_2, PDSD],
    ),
    (
        TonnageClass::Under3000,
        "Chief Engineer",
        &[
            STCW,
            ENG1,
            "Y2 Engineer",
            ADVANCED_FIRE_FIGHTING,
            MEDICAL_FIRST_AID,
            "HELM (Management)",
        ],
    ),
    (
        TonnageClass::Under3000,
        "Second Engineer",
        &[
            STCW,
            ENG1,
            "Y3 Engineer",
            ADVANCED_FIRE_FIGHTING,
            "HELM (Operational)",
        ],
    ),
    (
        TonnageClass::Under3000,
        "Chief Stewardess",
        &[
            STCW,
            ENG1,
            FOOD_HYGIENE_2,
            MEDICAL_FIRST_AID,
            PDSD,
            "Crowd Management",
        ],
    ),
    (
        TonnageClass::Under3000,
        "Stewardess",
        &[STCW, ENG1, FOOD_HYGIENE_2, PDSD],
    ),
    (
        TonnageClass::Under3000,
        "Head Chef",
        &[
            STCW,
            ENG1,
            "Ship's Cook Certificate",
            "Food Hygiene Level 3",
            PDSD,
        ],
    ),
    (
        TonnageClass::Under3000,
        "Chef",
        &[STCW, ENG1, "Ship's Cook Certificate", FOOD_HYGIENE_2],
    ),
];
