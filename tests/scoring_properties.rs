use proptest::prelude::*;

use repolens::github::types::{Event, RepositorySummary, UserProfile};
use repolens::scoring::{
    compute_report, portfolio_score, score_consistency, score_first_impression, score_impact,
    score_technical_depth,
};

const LANGUAGES: [&str; 6] = ["Rust", "Go", "Python", "TypeScript", "C", "Zig"];
const DESCRIPTIONS: [&str; 5] = ["", "a toy", "production api", "scalable system", "docker tool"];

fn repo_strategy() -> impl Strategy<Value = RepositorySummary> {
    (
        proptest::option::of(0..LANGUAGES.len()),
        proptest::option::of(0..DESCRIPTIONS.len()),
        0u64..50_000,
        0u64..1_000,
        0u64..500,
    )
        .prop_map(|(language, description, size_kb, stars, forks)| RepositorySummary {
            name: "repo".to_string(),
            full_name: "user/repo".to_string(),
            language: language.map(|i| LANGUAGES[i].to_string()),
            description: description.map(|i| DESCRIPTIONS[i].to_string()),
            size_kb,
            stargazer_count: stars,
            fork_count: forks,
            ..Default::default()
        })
}

fn repos_strategy() -> impl Strategy<Value = Vec<RepositorySummary>> {
    proptest::collection::vec(repo_strategy(), 0..40)
}

fn profile_strategy() -> impl Strategy<Value = UserProfile> {
    let field = || proptest::option::of(prop_oneof![Just(String::new()), Just("set".to_string())]);
    (field(), field(), field(), field(), field(), field()).prop_map(
        |(name, avatar_url, bio, location, company, blog)| UserProfile {
            login: "user".to_string(),
            name,
            avatar_url,
            bio,
            location,
            company,
            blog,
            ..Default::default()
        },
    )
}

fn events(n: usize) -> Vec<Event> {
    (0..n)
        .map(|i| Event {
            id: i.to_string(),
            ..Default::default()
        })
        .collect()
}

proptest! {
    #[test]
    fn sub_scores_stay_in_range(
        profile in profile_strategy(),
        repos in repos_strategy(),
        n_events in 0usize..200,
        recruiter in any::<u8>(),
    ) {
        let report = compute_report(&profile, &repos, &events(n_events), recruiter);
        for (_, value) in report.components() {
            prop_assert!(value <= 100);
        }
        prop_assert!(report.portfolio_score <= 100);
    }

    #[test]
    fn scoring_is_deterministic(profile in profile_strategy(), repos in repos_strategy()) {
        let first = compute_report(&profile, &repos, &[], 50);
        let second = compute_report(&profile, &repos, &[], 50);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn consistency_is_monotonic(n in 0usize..150) {
        prop_assert!(score_consistency(&events(n)) <= score_consistency(&events(n + 1)));
    }

    #[test]
    fn consistency_saturates(n in 50usize..500) {
        prop_assert_eq!(score_consistency(&events(n)), 100);
    }

    #[test]
    fn adding_stars_never_lowers_impact(repos in repos_strategy(), extra in 0u64..100) {
        let mut boosted = repos.clone();
        if let Some(first) = boosted.first_mut() {
            first.stargazer_count += extra;
        }
        prop_assert!(score_impact(&repos) <= score_impact(&boosted));
    }

    #[test]
    fn adding_forks_never_lowers_impact(repos in repos_strategy(), extra in 0u64..100) {
        let mut boosted = repos.clone();
        if let Some(first) = boosted.first_mut() {
            first.fork_count += extra;
        }
        prop_assert!(score_impact(&repos) <= score_impact(&boosted));
    }

    #[test]
    fn adding_a_repository_never_lowers_impact(
        repos in proptest::collection::vec(repo_strategy(), 1..40),
        repo in repo_strategy(),
    ) {
        let mut more = repos.clone();
        more.push(repo);
        prop_assert!(score_impact(&repos) <= score_impact(&more));
    }

    #[test]
    fn adding_a_repository_never_lowers_depth(repos in repos_strategy(), repo in repo_strategy()) {
        let mut more = repos.clone();
        more.push(repo);
        prop_assert!(score_technical_depth(&repos) <= score_technical_depth(&more));
    }

    #[test]
    fn description_coverage_uses_fixed_divisor(n in 1usize..5) {
        let repos: Vec<_> = (0..n)
            .map(|_| RepositorySummary {
                description: Some("described".to_string()),
                ..Default::default()
            })
            .collect();
        let expected = (n as f64 / 5.0 * 30.0) as u8;
        prop_assert_eq!(score_first_impression(&UserProfile::default(), &repos), expected);
    }

    #[test]
    fn portfolio_is_monotonic_in_each_component(
        scores in proptest::array::uniform5(0u8..=99),
        which in 0usize..5,
    ) {
        let mut raised = scores;
        raised[which] += 1;
        let base = portfolio_score(scores[0], scores[1], scores[2], scores[3], scores[4]);
        let up = portfolio_score(raised[0], raised[1], raised[2], raised[3], raised[4]);
        prop_assert!(base <= up);
    }
}

#[test]
fn empty_inputs_score_zero() {
    assert_eq!(score_technical_depth(&[]), 0);
    assert_eq!(score_consistency(&[]), 0);
    assert_eq!(score_impact(&[]), 0);
    assert_eq!(score_first_impression(&UserProfile::default(), &[]), 0);
}

#[test]
fn portfolio_extremes() {
    assert_eq!(portfolio_score(0, 0, 0, 0, 0), 0);
    assert_eq!(portfolio_score(100, 100, 100, 100, 100), 100);
}
