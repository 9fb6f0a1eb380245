//! Industry taxonomy: a closed, two-level category tree and a free-text classifier.
//!
//! Sector names, program categories, keywords and ministry/agency names all map
//! onto [`IndustryCategory`]. Classification is a pure lookup against static
//! alias tables; nothing is learned or cached.

use serde::{Deserialize, Serialize};

/// Top-level grouping used for partial industry credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sector {
    Digital,
    BioHealth,
    Manufacturing,
    EnergyEnvironment,
    Mobility,
    AgriFood,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IndustryCategory {
    AiSoftware,
    Ict,
    BioPharma,
    MedicalDevice,
    Semiconductor,
    Machinery,
    Materials,
    Energy,
    Environment,
    Automotive,
    Aerospace,
    AgriFood,
}

impl IndustryCategory {
    pub const ALL: [IndustryCategory; 12] = [
        IndustryCategory::AiSoftware,
        IndustryCategory::Ict,
        IndustryCategory::BioPharma,
        IndustryCategory::MedicalDevice,
        IndustryCategory::Semiconductor,
        IndustryCategory::Machinery,
        IndustryCategory::Materials,
        IndustryCategory::Energy,
        IndustryCategory::Environment,
        IndustryCategory::Automotive,
        IndustryCategory::Aerospace,
        IndustryCategory::AgriFood,
    ];

    pub fn sector(&self) -> Sector {
        match self {
            IndustryCategory::AiSoftware | IndustryCategory::Ict => Sector::Digital,
            IndustryCategory::BioPharma | IndustryCategory::MedicalDevice => Sector::BioHealth,
            IndustryCategory::Semiconductor
            | IndustryCategory::Machinery
            | IndustryCategory::Materials => Sector::Manufacturing,
            IndustryCategory::Energy | IndustryCategory::Environment => {
                Sector::EnergyEnvironment
            }
            IndustryCategory::Automotive | IndustryCategory::Aerospace => Sector::Mobility,
            IndustryCategory::AgriFood => Sector::AgriFood,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IndustryCategory::AiSoftware => "AI/SW",
            IndustryCategory::Ict => "ICT",
            IndustryCategory::BioPharma => "Bio/Pharma",
            IndustryCategory::MedicalDevice => "Medical devices",
            IndustryCategory::Semiconductor => "Semiconductor/Display",
            IndustryCategory::Machinery => "Machinery/Robotics",
            IndustryCategory::Materials => "Materials/Components",
            IndustryCategory::Energy => "Energy",
            IndustryCategory::Environment => "Environment",
            IndustryCategory::Automotive => "Automotive/Mobility",
            IndustryCategory::Aerospace => "Aerospace",
            IndustryCategory::AgriFood => "Agri-food",
        }
    }

    /// Lowercase aliases, including the ministries and agencies that fund the field.
    fn aliases(&self) -> &'static [&'static str] {
        match self {
            IndustryCategory::AiSoftware => &[
                "ai/sw",
                "ai",
                "sw",
                "인공지능",
                "소프트웨어",
                "software",
                "artificial intelligence",
                "machine learning",
                "머신러닝",
                "딥러닝",
                "deep learning",
                "빅데이터",
                "big data",
                "클라우드",
                "cloud",
            ],
            IndustryCategory::Ict => &[
                "ict",
                "정보통신",
                "통신",
                "5g",
                "6g",
                "네트워크",
                "network",
                "iot",
                "사물인터넷",
                "과학기술정보통신부",
                "과기정통부",
                "정보통신기획평가원",
                "iitp",
            ],
            IndustryCategory::BioPharma => &[
                "바이오",
                "bio",
                "biotech",
                "제약",
                "신약",
                "의약",
                "pharma",
                "보건복지부",
                "한국보건산업진흥원",
            ],
            IndustryCategory::MedicalDevice => &[
                "의료기기",
                "medical device",
                "헬스케어",
                "healthcare",
                "디지털헬스",
            ],
            IndustryCategory::Semiconductor => &[
                "반도체",
                "semiconductor",
                "디스플레이",
                "display",
            ],
            IndustryCategory::Machinery => &[
                "기계",
                "로봇",
                "robot",
                "robotics",
                "제조",
                "manufacturing",
                "스마트공장",
                "산업통상자원부",
                "산업부",
                "한국산업기술평가관리원",
                "keit",
            ],
            IndustryCategory::Materials => &[
                "소재",
                "부품",
                "materials",
                "화학",
                "chemical",
            ],
            IndustryCategory::Energy => &[
                "에너지",
                "energy",
                "수소",
                "hydrogen",
                "태양광",
                "solar",
                "배터리",
                "battery",
                "2차전지",
                "한국에너지기술평가원",
                "ketep",
            ],
            IndustryCategory::Environment => &[
                "환경",
                "environment",
                "탄소",
                "carbon",
                "기후",
                "climate",
                "환경부",
            ],
            IndustryCategory::Automotive => &[
                "자동차",
                "automotive",
                "모빌리티",
                "mobility",
                "자율주행",
                "autonomous",
                "국토교통부",
            ],
            IndustryCategory::Aerospace => &[
                "항공",
                "우주",
                "aerospace",
                "space",
                "드론",
                "drone",
            ],
            IndustryCategory::AgriFood => &[
                "농업",
                "agri",
                "agriculture",
                "식품",
                "food",
                "스마트팜",
                "농림축산식품부",
            ],
        }
    }
}

impl std::fmt::Display for IndustryCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Lowercases and collapses runs of whitespace.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

fn tokens(normalized: &str) -> impl Iterator<Item = &str> {
    normalized
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
}

/// Short ASCII aliases ("ai", "sw", "5g") only match whole tokens; everything
/// else matches as a substring so Korean compounds still classify.
fn alias_matches(normalized: &str, alias: &str) -> bool {
    if alias.is_ascii() && alias.len() <= 3 {
        tokens(normalized).any(|t| t == alias)
    } else {
        normalized.contains(alias)
    }
}

/// Maps free text to its single best category.
///
/// The longest matching alias wins; equal lengths resolve to the category
/// declared first in [`IndustryCategory::ALL`].
pub fn classify(text: &str) -> Option<IndustryCategory> {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return None;
    }

    let mut best: Option<(usize, IndustryCategory)> = None;
    for category in IndustryCategory::ALL {
        for alias in category.aliases() {
            if !alias_matches(&normalized, alias) {
                continue;
            }
            let len = alias.chars().count();
            if best.is_none_or(|(best_len, _)| len > best_len) {
                best = Some((len, category));
            }
        }
    }
    best.map(|(_, category)| category)
}

/// Classifies each text and returns the distinct categories in first-seen order.
pub fn classify_all<'a, I>(texts: I) -> Vec<IndustryCategory>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = Vec::new();
    for category in texts.into_iter().filter_map(classify) {
        if !out.contains(&category) {
            out.push(category);
        }
    }
    out
}

/// How closely two classified industries relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndustryRelation {
    Same,
    SameSector,
    Unrelated,
}

pub fn relation(a: IndustryCategory, b: IndustryCategory) -> IndustryRelation {
    if a == b {
        IndustryRelation::Same
    } else if a.sector() == b.sector() {
        IndustryRelation::SameSector
    } else {
        IndustryRelation::Unrelated
    }
}
