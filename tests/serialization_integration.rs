//! JSON shapes accepted by the CLI.

use fundmatch::{
    EligibilityRequirement, FundingProgram, Organization, OrganizationType, ProgramStatus,
    TrlConfidence,
};

#[test]
fn test_organization_from_camel_case_json() {
    let org: Organization = serde_json::from_str(
        r#"{
            "id": "6f1c1d9e-8a4b-4c1e-9d8e-2b7f4a1c0e11",
            "name": "Acme AI",
            "type": "COMPANY",
            "industrySector": "AI/SW",
            "technologyReadinessLevel": 7,
            "targetResearchTRL": 8,
            "keyTechnologies": ["인공지능"],
            "rdExperience": true,
            "pastProjectCount": 4
        }"#,
    )
    .unwrap();

    assert_eq!(org.org_type, OrganizationType::Company);
    assert_eq!(org.matching_trl(), Some(8));
    assert_eq!(org.current_trl(), Some(7));
    assert!(org.key_technologies.contains("인공지능"));
    assert!(org.desired_technologies.is_empty());
}

#[test]
fn test_program_from_json_with_eligibility() {
    let program: FundingProgram = serde_json::from_str(
        r#"{
            "id": "0d3f6b2a-1c4e-4f5a-8b9c-7e6d5c4b3a21",
            "agencyId": "과학기술정보통신부",
            "title": "AI Core Technology",
            "status": "ACTIVE",
            "minTrl": 5,
            "maxTrl": 8,
            "trlConfidence": "INFERRED",
            "targetType": ["COMPANY"],
            "deadline": "2025-03-20T00:00:00Z",
            "eligibility": [
                { "kind": "CERTIFICATION", "name": "벤처기업" },
                { "kind": "NOTES", "text": "consortium of at least two" }
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(program.status, ProgramStatus::Active);
    assert_eq!(program.trl_confidence, TrlConfidence::Inferred);
    assert!(program.accepts(OrganizationType::Company));
    assert!(!program.accepts(OrganizationType::ResearchInstitute));
    assert_eq!(program.eligibility.len(), 2);
    assert!(matches!(
        program.eligibility[0],
        EligibilityRequirement::Certification { .. }
    ));
    assert!(program.keywords.is_empty());
}
