// Criterion benchmarks for Shidduch Match

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use shidduch_match::core::{age_on, Matcher, MatchingRules};
use shidduch_match::models::{Gender, Profile, RelocationStance};

const ETHNICITIES: &[&str] = &["Ashkenazi", "Sephardi", "Teimani", "Mixed"];
const HASHKAFOS: &[&str] = &["Yeshivish", "Modern Orthodox", "Chassidish", "Litvish"];

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn create_candidate(id: usize) -> Profile {
    Profile {
        id: id.to_string(),
        gender: if id % 2 == 0 { Gender::Female } else { Gender::Male },
        date_of_birth: NaiveDate::from_ymd_opt(1990 + (id % 12) as i32, 1 + (id % 12) as u32, 10),
        location: Some(if id % 3 == 0 { "Lakewood, NJ" } else { "Brooklyn, NY" }.to_string()),
        willing_to_relocate: if id % 4 == 0 { RelocationStance::No } else { RelocationStance::Maybe },
        ethnicity: vec![ETHNICITIES[id % ETHNICITIES.len()].to_string()],
        religious_affiliation: vec![HASHKAFOS[id % HASHKAFOS.len()].to_string()],
        head_covering: Some(if id % 5 == 0 { "Flexible" } else { "Wig" }.to_string()),
        ..Default::default()
    }
}

fn create_subject() -> Profile {
    Profile {
        id: "subject".to_string(),
        gender: Gender::Male,
        date_of_birth: NaiveDate::from_ymd_opt(1994, 4, 20),
        location: Some("Brooklyn, NY".to_string()),
        willing_to_relocate: RelocationStance::No,
        age_gap_preference: vec!["0-3 years".to_string(), "5-10 years".to_string()],
        preferred_ethnicities: vec!["Ashkenazi".to_string(), "Sephardi".to_string()],
        preferred_hashkafos: vec!["Yeshivish".to_string(), "Litvish".to_string()],
        expected_head_covering: Some("Wig".to_string()),
        ..Default::default()
    }
}

fn bench_age(c: &mut Criterion) {
    let dob = NaiveDate::from_ymd_opt(1994, 4, 20).unwrap();
    c.bench_function("age_on", |b| {
        b.iter(|| age_on(black_box(dob), black_box(today())));
    });
}

fn bench_wildcard_detection(c: &mut Criterion) {
    let rules = MatchingRules::default();
    c.bench_function("is_wildcard", |b| {
        b.iter(|| rules.is_wildcard(black_box("Modern Orthodox")));
    });
}

fn bench_matching(c: &mut Criterion) {
    let matcher = Matcher::with_default_rules();
    let subject = create_subject();

    let mut group = c.benchmark_group("matching");

    for candidate_count in [10, 100, 1000, 10000].iter() {
        let pool: Vec<Profile> = (0..*candidate_count).map(create_candidate).collect();

        group.bench_with_input(
            BenchmarkId::new("find_matches", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    matcher
                        .find_matches_on(black_box(&subject), black_box(&pool), today())
                        .map(|result| result.matches.len())
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("find_matches_parallel", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    matcher
                        .find_matches_parallel_on(black_box(&subject), black_box(&pool), today())
                        .map(|result| result.matches.len())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_age, bench_wildcard_detection, bench_matching);

criterion_main!(benches);
