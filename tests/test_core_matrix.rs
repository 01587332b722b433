use bench_figures::{
    formats::c2c::{self, smt_sibling_mapping, C2cRun, CoreMatrix},
    Error,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::path::Path;

mod common;
use common::{c2c_lower_triangle, populate_c2c, Scratch};

fn random_matrix(rng: &mut StdRng, n: usize) -> CoreMatrix {
    let rows = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| (j < i).then(|| rng.gen_range(20.0..400.0)))
                .collect()
        })
        .collect();
    CoreMatrix::from_rows(rows).symmetrize()
}

fn present_values(m: &CoreMatrix) -> Vec<f64> {
    let mut values: Vec<f64> = (0..m.size())
        .flat_map(|i| (0..m.size()).filter_map(move |j| m.get(i, j)))
        .collect();
    values.sort_by(f64::total_cmp);
    values
}

#[test]
fn test_smt_sibling_mapping() {
    assert_eq!(smt_sibling_mapping(8), [0, 2, 4, 6, 1, 3, 5, 7]);
    assert_eq!(smt_sibling_mapping(5), [0, 2, 1, 3, 4]);
    assert!(smt_sibling_mapping(0).is_empty());
}

#[test]
fn test_symmetrize_fills_from_transpose() {
    let mut rng = StdRng::seed_from_u64(7);
    let m = random_matrix(&mut rng, 12);
    for i in 0..12 {
        assert_eq!(m.get(i, i), None);
        for j in 0..12 {
            assert_eq!(m.get(i, j), m.get(j, i), "({i}, {j})");
        }
    }
}

#[test]
fn test_from_rows_pads_ragged_rows() {
    let m = CoreMatrix::from_rows(vec![vec![None], vec![Some(1.0), None, Some(2.0)]]);
    assert_eq!(m.size(), 3);
    assert_eq!(m.get(1, 2), Some(2.0));
    assert_eq!(m.get(2, 2), None);
    assert_eq!(m.get(3, 0), None);
}

#[test]
fn test_merge_with_itself_is_identity() {
    let mut rng = StdRng::seed_from_u64(11);
    let m = random_matrix(&mut rng, 10);
    assert_eq!(m.merge(&m).unwrap(), m);
}

#[test]
fn test_merge_averages_and_checks_shape() {
    let text = |v: f64| c2c_lower_triangle(4, move |_, _| v);
    let a = c2c::parse(Path::new("a.csv"), &text(100.0)).unwrap();
    let b = c2c::parse(Path::new("b.csv"), &text(120.0)).unwrap();
    let merged = a.merge(&b).unwrap();
    assert_eq!(merged.get(3, 1), Some(110.0));
    assert_eq!(merged.get(1, 3), Some(110.0));
    assert_eq!(merged.get(2, 2), None);

    let small = c2c::parse(Path::new("c.csv"), &c2c_lower_triangle(3, |_, _| 1.0)).unwrap();
    let err = a.merge(&small).unwrap_err();
    assert!(
        matches!(err, Error::ShapeMismatch { left: (4, 4), right: (3, 3) }),
        "{err:?}"
    );
}

#[test]
fn test_reorder_is_a_value_preserving_permutation() {
    let mut rng = StdRng::seed_from_u64(42);
    for n in [2, 8, 9, 24] {
        let m = random_matrix(&mut rng, n);
        let r = m.reorder();
        let mapping = smt_sibling_mapping(n);

        assert_eq!(r.size(), n);
        assert_eq!(present_values(&r), present_values(&m));
        for i in 0..n {
            for j in 0..n {
                assert_eq!(r.get(mapping[i], mapping[j]), m.get(i, j), "n={n} ({i}, {j})");
            }
        }
    }
}

#[test]
fn test_reorder_places_siblings_next_to_each_other() {
    // Cores c and c + 4 are SMT siblings with the lowest latency.
    let text = c2c_lower_triangle(8, |i, j| if i - j == 4 { 10.0 } else { 100.0 });
    let m = c2c::parse(Path::new("smt.csv"), &text).unwrap().reorder();
    for c in 0..4 {
        assert_eq!(m.get(2 * c, 2 * c + 1), Some(10.0), "core {c}");
    }
    assert_eq!(m.get(0, 2), Some(100.0));
}

#[test]
fn test_to_crosstab_labels() {
    let mut rng = StdRng::seed_from_u64(3);
    let m = random_matrix(&mut rng, 5);
    let ct = m.to_crosstab();
    assert_eq!(ct.rows(), ["0", "1", "2", "3", "4"]);
    assert_eq!(ct.cols(), ct.rows());
    assert_eq!(ct.get(4, 1), m.get(4, 1));
    assert_eq!(ct.n_rows(), 5);
    assert_eq!(ct.n_cols(), 5);
    for i in 0..5 {
        assert_eq!(ct.get(i, i), None);
    }
}

#[test]
fn test_load_runs_and_merge() {
    let scratch = Scratch::new();
    populate_c2c(scratch.data());
    let runs = c2c::load_runs(&scratch.data().join("c2c")).unwrap();
    let names: Vec<&str> = runs.keys().map(String::as_str).collect();
    assert_eq!(names, ["cn03c1_run1", "cn03c1_run2", "infra2c1"]);

    let merged: C2cRun = runs
        .require("cn03c1_run1")
        .unwrap()
        .clone()
        .set_arch("Ampere Altra Max")
        .merge(runs.require("cn03c1_run2").unwrap())
        .unwrap()
        .set_name("cn03c1");
    assert_eq!(merged.name, "cn03c1");
    assert_eq!(merged.arch, "Ampere Altra Max");
    assert_eq!(merged.matrix.get(3, 1), Some(109.0));

    let err = runs
        .require("cn03c1_run1")
        .unwrap()
        .clone()
        .merge(runs.require("infra2c1").unwrap())
        .unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch { .. }));
}
