use super::*;
use crate::matching::ScoringPool;
use crate::model::{EmployeeCount, Organization, OrganizationType, RevenueRange};

fn org(name: &str, org_type: OrganizationType, sector: &str, trl: Option<u8>) -> Organization {
    let mut org = Organization::new(name, org_type, sector);
    org.technology_readiness_level = trl;
    org
}

fn terms(items: &[&str]) -> std::collections::BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_complementary_pair_beats_identical_pair() {
    let company = org("Acme", OrganizationType::Company, "AI/SW", Some(8));
    let institute = org("KIST Lab", OrganizationType::ResearchInstitute, "AI/SW", Some(2));
    let twin = org("Twin", OrganizationType::Company, "농업", Some(8));

    let complementary = compatibility(&company, &institute);
    let identical = compatibility(&company, &twin);

    assert_eq!(complementary.score, 67);
    assert_eq!(identical.score, 17);
    assert!(complementary.score > identical.score);
}

#[test]
fn test_stage_bands() {
    let c = |trl| org("c", OrganizationType::Company, "AI/SW", Some(trl));
    assert_eq!(stage_score(&c(2), &c(8)), 30);
    assert_eq!(stage_score(&c(5), &c(8)), 25);
    assert_eq!(stage_score(&c(5), &c(6)), 20);
    assert_eq!(stage_score(&c(1), &c(3)), 5);
    assert_eq!(stage_score(&c(8), &c(9)), 5);
}

#[test]
fn test_stage_type_bonus_depends_on_who_leads() {
    let company_late = org("c", OrganizationType::Company, "AI/SW", Some(8));
    let company_early = org("c", OrganizationType::Company, "AI/SW", Some(2));
    let institute_early = org("r", OrganizationType::ResearchInstitute, "AI/SW", Some(2));
    let institute_late = org("r", OrganizationType::ResearchInstitute, "AI/SW", Some(8));

    assert_eq!(stage_score(&company_late, &institute_early), 35);
    assert_eq!(stage_score(&institute_early, &company_late), 35);
    assert_eq!(stage_score(&company_early, &institute_late), 32);
}

#[test]
fn test_stage_partner_preference_bonus_is_capped() {
    let mut a = org("a", OrganizationType::Company, "AI/SW", Some(5));
    let mut b = org("b", OrganizationType::Company, "AI/SW", Some(6));
    assert_eq!(stage_score(&a, &b), 20);

    a.target_partner_trl = Some(7);
    assert_eq!(stage_score(&a, &b), 23);
    b.target_partner_trl = Some(4);
    assert_eq!(stage_score(&a, &b), 26);

    let mut company = org("c", OrganizationType::Company, "AI/SW", Some(8));
    let mut institute = org("r", OrganizationType::ResearchInstitute, "AI/SW", Some(2));
    company.target_partner_trl = Some(2);
    institute.target_partner_trl = Some(8);
    assert_eq!(stage_score(&company, &institute), 35);
}

#[test]
fn test_stage_missing_trl_is_neutral() {
    let known = org("a", OrganizationType::Company, "AI/SW", Some(5));
    let unknown = org("b", OrganizationType::Company, "AI/SW", None);
    let invalid = org("c", OrganizationType::Company, "AI/SW", Some(12));
    assert_eq!(stage_score(&known, &unknown), 15);
    assert_eq!(stage_score(&known, &invalid), 15);
}

#[test]
fn test_industry_relation() {
    let ai = org("a", OrganizationType::Company, "AI/SW", None);
    let ai_again = org("b", OrganizationType::Company, "ai/sw", None);
    let farm = org("c", OrganizationType::Company, "농업", None);
    let blank = org("d", OrganizationType::Company, "", None);

    assert_eq!(industry_score(&ai, &ai_again), 20);
    assert_eq!(industry_score(&ai, &farm), 0);
    assert_eq!(industry_score(&blank, &blank), 0);
}

#[test]
fn test_desired_consortium_field_credits_unrelated_industry() {
    let ai = org("a", OrganizationType::Company, "AI/SW", Some(8));
    let mut farm = org("c", OrganizationType::Company, "농업", Some(8));
    assert_eq!(industry_score(&ai, &farm), 0);

    farm.desired_consortium_fields = terms(&["인공지능"]);
    assert_eq!(industry_score(&ai, &farm), 10);
    assert_eq!(industry_score(&farm, &ai), 10);

    let result = compatibility(&ai, &farm);
    assert!(
        result
            .reasons
            .iter()
            .any(|r| r == "Works in a sought consortium field (AI/SW)")
    );

    farm.desired_consortium_fields = terms(&["ai/sw"]);
    assert_eq!(industry_score(&ai, &farm), 10);

    let same = org("b", OrganizationType::Company, "AI/SW", None);
    let mut seeker = ai.clone();
    seeker.desired_consortium_fields = terms(&["농업"]);
    assert_eq!(industry_score(&seeker, &same), 20);
}

#[test]
fn test_technology_directional_matching() {
    let mut a = org("a", OrganizationType::Company, "AI/SW", None);
    let mut b = org("b", OrganizationType::ResearchInstitute, "AI/SW", None);
    a.desired_technologies = terms(&["딥러닝", "로봇"]);
    b.key_technologies = terms(&["딥러닝 모델", "협동로봇", "센서"]);

    // Two of a's wishes covered: 8 + 4.
    assert_eq!(technology_score(&a, &b), 12);

    a.key_technologies = terms(&["센서"]);
    b.desired_technologies = terms(&["센서"]);
    // 12 + 8 + mutual bonus.
    assert_eq!(technology_score(&a, &b), 21);
}

#[test]
fn test_technology_falls_back_to_shared_keys() {
    let mut a = org("a", OrganizationType::Company, "AI/SW", None);
    let mut b = org("b", OrganizationType::Company, "AI/SW", None);
    a.key_technologies = terms(&["배터리", "센서", "라이다"]);
    b.key_technologies = terms(&["배터리", "센서", "라이다"]);
    assert_eq!(technology_score(&a, &b), 8);

    b.key_technologies = terms(&["배터리"]);
    assert_eq!(technology_score(&a, &b), 4);

    b.key_technologies.clear();
    assert_eq!(technology_score(&a, &b), 0);
}

#[test]
fn test_technology_short_ascii_terms_need_exact_match() {
    let mut a = org("a", OrganizationType::Company, "AI/SW", None);
    let mut b = org("b", OrganizationType::Company, "AI/SW", None);
    a.desired_technologies = terms(&["ai"]);
    b.key_technologies = terms(&["retail analytics"]);
    assert_eq!(technology_score(&a, &b), 0);
}

#[test]
fn test_scale_preferences() {
    let mut a = org("a", OrganizationType::Company, "AI/SW", None);
    let mut b = org("b", OrganizationType::Company, "AI/SW", None);
    assert_eq!(scale_score(&a, &b), 12);

    a.target_org_scale.insert(EmployeeCount::Over300);
    b.employee_count = Some(EmployeeCount::Over300);
    assert_eq!(scale_score(&a, &b), 14);

    a.target_org_revenue.insert(RevenueRange::Over100B);
    b.revenue_range = Some(RevenueRange::Under1B);
    assert_eq!(scale_score(&a, &b), 11);

    b.revenue_range = Some(RevenueRange::Over100B);
    b.target_org_scale.insert(EmployeeCount::Under10);
    b.target_org_revenue.insert(RevenueRange::None);
    a.employee_count = Some(EmployeeCount::Under10);
    a.revenue_range = Some(RevenueRange::None);
    assert_eq!(scale_score(&a, &b), 20);
}

#[test]
fn test_breakdown_sums_and_stays_bounded() {
    let mut a = org("a", OrganizationType::Company, "AI/SW", Some(8));
    let mut b = org("b", OrganizationType::ResearchInstitute, "AI/SW", Some(2));
    a.desired_technologies = terms(&["딥러닝", "로봇", "센서", "비전"]);
    b.key_technologies = terms(&["딥러닝", "로봇", "센서", "비전"]);
    b.desired_technologies = terms(&["양산"]);
    a.key_technologies = terms(&["양산 공정"]);

    let result = compatibility(&a, &b);
    for (factor, points) in result.breakdown.factors() {
        assert!(points <= factor.max(), "{factor:?} = {points}");
    }
    assert_eq!(result.score, result.breakdown.total());
    assert!(result.score <= 100);
}

#[test]
fn test_reasons_pick_top_two_non_zero_factors() {
    let company = org("Acme", OrganizationType::Company, "AI/SW", Some(8));
    let institute = org("Lab", OrganizationType::ResearchInstitute, "AI/SW", Some(2));

    let result = compatibility(&company, &institute);
    assert_eq!(result.reasons.len(), 2);
    assert_eq!(
        result.reasons[0],
        "Complementary development stages (company at TRL 8, research institute at TRL 2)"
    );
    assert!(result.reasons[1].contains("Same industry"));
    assert!(result.explanation.starts_with("Acme and Lab are 67% compatible"));
}

#[test]
fn test_reasons_skip_zero_factors() {
    let mut a = org("a", OrganizationType::Company, "AI/SW", Some(8));
    let b = org("b", OrganizationType::Company, "농업", Some(8));
    a.target_org_scale.insert(EmployeeCount::Over300);
    a.target_org_revenue.insert(RevenueRange::Over100B);

    let result = compatibility(&a, &b);
    // stage 5, scale 6, industry and technology 0.
    assert_eq!(result.breakdown.industry, 0);
    assert_eq!(result.breakdown.technology, 0);
    assert_eq!(result.reasons.len(), 2);
    assert!(result.reasons[0].contains("scale"));
}

#[test]
fn test_compatibility_is_deterministic() {
    let a = org("a", OrganizationType::Company, "AI/SW", Some(6));
    let b = org("b", OrganizationType::ResearchInstitute, "반도체", Some(3));
    assert_eq!(compatibility(&a, &b), compatibility(&a, &b));
}

#[test]
fn test_recommend_partners_excludes_self_and_sorts() {
    let pool = ScoringPool::new(2).unwrap();
    let me = org("me", OrganizationType::Company, "AI/SW", Some(8));
    let candidates = vec![
        me.clone(),
        org("twin", OrganizationType::Company, "농업", Some(8)),
        org("lab", OrganizationType::ResearchInstitute, "AI/SW", Some(2)),
        org("lab-2", OrganizationType::ResearchInstitute, "AI/SW", Some(2)),
    ];

    let ranked = recommend_partners(&pool, &me, &candidates, 10);
    let names: Vec<&str> = ranked.iter().map(|r| r.organization.name.as_str()).collect();
    assert_eq!(names, vec!["lab", "lab-2", "twin"]);

    let top = recommend_partners(&pool, &me, &candidates, 1);
    assert_eq!(top.len(), 1);
    assert!(recommend_partners(&pool, &me, &candidates, 0).is_empty());
}
