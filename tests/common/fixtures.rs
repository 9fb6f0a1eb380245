//! Test fixtures for integration tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use fundmatch::{
    EligibilityRequirement, FundingProgram, Organization, OrganizationType, TrlConfidence,
};

pub fn as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
}

pub struct OrganizationBuilder {
    org: Organization,
}

impl OrganizationBuilder {
    pub fn company(name: &str) -> Self {
        Self {
            org: Organization::new(name, OrganizationType::Company, "AI/SW"),
        }
    }

    pub fn institute(name: &str) -> Self {
        Self {
            org: Organization::new(name, OrganizationType::ResearchInstitute, "AI/SW"),
        }
    }

    pub fn sector(mut self, sector: &str) -> Self {
        self.org.industry_sector = sector.to_string();
        self
    }

    pub fn trl(mut self, trl: u8) -> Self {
        self.org.technology_readiness_level = Some(trl);
        self
    }

    pub fn technology(mut self, term: &str) -> Self {
        self.org.key_technologies.insert(term.to_string());
        self
    }

    pub fn wants(mut self, term: &str) -> Self {
        self.org.desired_technologies.insert(term.to_string());
        self
    }

    pub fn track_record(mut self, projects: u32) -> Self {
        self.org.rd_experience = true;
        self.org.past_project_count = projects;
        self
    }

    pub fn build(self) -> Organization {
        self.org
    }
}

pub struct ProgramBuilder {
    program: FundingProgram,
}

impl ProgramBuilder {
    pub fn new(title: &str) -> Self {
        Self {
            program: FundingProgram::new(
                title,
                "과학기술정보통신부",
                TrlConfidence::Explicit,
            ),
        }
    }

    pub fn confidence(mut self, confidence: TrlConfidence) -> Self {
        self.program.trl_confidence = confidence;
        self
    }

    pub fn trl_range(mut self, min: u8, max: u8) -> Self {
        self.program.min_trl = Some(min);
        self.program.max_trl = Some(max);
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.program.category = category.to_string();
        self
    }

    pub fn keyword(mut self, keyword: &str) -> Self {
        self.program.keywords.insert(keyword.to_string());
        self
    }

    pub fn for_type(mut self, org_type: OrganizationType) -> Self {
        self.program.target_type.insert(org_type);
        self
    }

    pub fn due_in_days(mut self, days: i64) -> Self {
        self.program.deadline = Some(as_of() + Duration::days(days));
        self
    }

    pub fn requires(mut self, requirement: EligibilityRequirement) -> Self {
        self.program.eligibility.push(requirement);
        self
    }

    pub fn build(self) -> FundingProgram {
        self.program
    }
}

/// Mid-sized AI company at TRL 7 with one core technology.
pub fn ai_company() -> Organization {
    OrganizationBuilder::company("Acme AI")
        .trl(7)
        .technology("인공지능")
        .build()
}

/// Open AI program for companies, TRL 5-8, due in 10 days.
pub fn ai_program(title: &str) -> FundingProgram {
    ProgramBuilder::new(title)
        .trl_range(5, 8)
        .category("AI/SW")
        .keyword("인공지능")
        .for_type(OrganizationType::Company)
        .due_in_days(10)
        .build()
}
