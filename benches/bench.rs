// Criterion benchmarks for Sprout Algo

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sprout_algo::models::{
    Answers, CommunicationPreference, ExperienceLevel, HoursBracket, MatchThresholds,
    MotivationTag, PillarWeights, ProjectCountBracket, Region, SkillCategory, StructurePreference,
};
use sprout_algo::{compute_pair_score, Matcher};
use std::collections::HashMap;

fn synthetic_answers(i: usize) -> Answers {
    let skills = [
        SkillCategory::Technical,
        SkillCategory::Business,
        SkillCategory::Design,
        SkillCategory::Marketing,
        SkillCategory::Finance,
        SkillCategory::Other,
    ];
    let hours = [
        HoursBracket::Under5,
        HoursBracket::FiveToTen,
        HoursBracket::TenToTwenty,
        HoursBracket::TwentyPlus,
    ];
    let regions = [Region::NaEast, Region::NaWest, Region::Europe, Region::EastAsia];
    let motivations = [
        MotivationTag::Build,
        MotivationTag::Learn,
        MotivationTag::Meet,
        MotivationTag::Win,
    ];

    Answers {
        primary_skill: Some(skills[i % skills.len()]),
        project_count: Some(ProjectCountBracket::OneToTwo),
        experience_level: Some(ExperienceLevel::SomeExperience),
        weekly_hours: Some(hours[i % hours.len()]),
        region: Some(regions[i % regions.len()]),
        structure_preference: Some(StructurePreference::MostlyStructured),
        planner_executor: Some((i % 5 + 1) as u8),
        communication_preference: Some(CommunicationPreference::Mix),
        deadline_strictness: Some((i % 5 + 1) as u8),
        ambiguity_tolerance: None,
        motivations: vec![motivations[i % motivations.len()]],
    }
}

fn bench_pair_score(c: &mut Criterion) {
    let weights = PillarWeights::default();
    let thresholds = MatchThresholds::default();
    let a = synthetic_answers(0);
    let b = synthetic_answers(1);

    c.bench_function("compute_pair_score", |bench| {
        bench.iter(|| compute_pair_score(black_box(&a), black_box(&b), &weights, &thresholds));
    });
}

fn bench_run_matching(c: &mut Criterion) {
    let matcher = Matcher::with_defaults();

    let mut group = c.benchmark_group("run_matching");

    for participant_count in [10, 50, 100].iter() {
        let ids: Vec<String> = (0..*participant_count).map(|i| format!("user_{}", i)).collect();
        let answers: HashMap<String, Answers> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), synthetic_answers(i)))
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(participant_count),
            participant_count,
            |bench, _| {
                bench.iter(|| matcher.run_matching(black_box(&ids), black_box(&answers)).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_pair_score, bench_run_matching);
criterion_main!(benches);
