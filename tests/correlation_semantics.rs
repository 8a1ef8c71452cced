//! The graph contract from the outside: reusing a value reuses its draw,
//! clones stay perfectly correlated, and the functional layer deliberately
//! severs that tie.

use aleator::{Compare, LogicalOps, Variate};

#[test]
fn adding_a_value_to_itself_doubles_every_draw() {
    let x = Variate::uniform(0.0, 1.0);
    let doubled = x.clone() + x;

    for _ in 0..1000 {
        let value = doubled.sample();
        assert!(
            (0.0..2.0).contains(&value),
            "doubled draw {value} escaped [0, 2)"
        );
    }

    let mean = doubled.expected_value(5000);
    assert!((mean - 1.0).abs() < 0.05, "E[x + x] = {mean}, want ~1.0");
}

#[test]
fn correlated_and_independent_sums_differ_by_a_factor_of_two() {
    let x = Variate::uniform(0.0, 1.0);
    let correlated = x.clone() + x.clone();
    let independent = x + Variate::uniform(0.0, 1.0);

    // Var[x + x] = 4 Var[x] but Var[x + x'] = 2 Var[x].
    let var_correlated = correlated.variance(4000);
    let var_independent = independent.variance(4000);
    let ratio = var_correlated / var_independent;

    assert!(
        ratio > 1.5 && ratio < 2.6,
        "variance ratio {ratio} should sit near 2"
    );
}

#[test]
fn subtracting_a_value_from_itself_is_exactly_zero() {
    let x = Variate::normal(100.0, 15.0);
    let delta = x.clone() - x;

    for _ in 0..500 {
        assert!(delta.sample().abs() < f64::EPSILON);
    }
}

#[test]
fn map_does_not_correlate_with_its_source() {
    let x = Variate::uniform(0.0, 1.0);
    let through_map = x.map(|v| v) + x.clone();
    let through_graph = x.clone() + x;

    // The mapped copy buries its source inside a fresh leaf, so the sum
    // behaves like a sum of independent draws: half the variance of the
    // graph-shared sum. The means still agree.
    let var_map = through_map.variance(4000);
    let var_graph = through_graph.variance(4000);
    assert!(
        var_graph / var_map > 1.5,
        "expected Var {var_graph} to be about twice {var_map}"
    );

    let mean = through_map.expected_value(4000);
    assert!((mean - 1.0).abs() < 0.05);
}

#[test]
fn arithmetic_over_shared_terms_cancels_algebraically() {
    let base = Variate::normal(50.0, 10.0);
    let offset = Variate::uniform(0.0, 5.0);

    // (base + offset) - base leaves only the offset for every draw.
    let reconstructed = (base.clone() + offset) - base;
    for _ in 0..500 {
        let value = reconstructed.sample();
        assert!(
            value > -1e-9 && value < 5.0 + 1e-9,
            "residual {value} not in [0, 5)"
        );
    }
}

#[test]
fn a_predicate_and_its_negation_partition_every_draw() {
    let reading = Variate::normal(5.0, 3.0);
    let above = reading.gt(5.0);
    let either = above.or(&above.not());
    let neither = above.and(&above.not());

    for _ in 0..1000 {
        assert!(either.sample());
        assert!(!neither.sample());
    }
}

#[test]
fn comparing_a_value_against_itself_is_constant() {
    let x = Variate::uniform(0.0, 100.0);
    let strictly_greater = x.gt_var(&x);
    let equal = x.eq_var(&x);

    for _ in 0..500 {
        assert!(!strictly_greater.sample());
        assert!(equal.sample());
    }
}

#[test]
fn conditional_probabilities_follow_the_shared_graph() {
    // For one shared draw, x > 7 implies x > 3; evidence for the
    // implication is certainty.
    let x = Variate::uniform(0.0, 10.0);
    let strict = x.gt(7.0);
    let loose = x.gt(3.0);
    let implication = strict.implies(&loose);

    for _ in 0..1000 {
        assert!(implication.sample());
    }
}
