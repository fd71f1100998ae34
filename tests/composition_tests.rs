use bench_curves::aggregator::Direction;
use bench_curves::composition::{
    CurveAggregation, Dimension, Element, Experiment, ExperimentSet, RunSet, Scope,
};
use bench_curves::functions::UnaryFunction;
use bench_curves::matrix::Matrix;
use bench_curves::stats::StatisticalParameter;
use bench_curves::utils::error::{ConfigError, CurveError};
use pretty_assertions::assert_eq;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn time() -> Dimension {
    Dimension::new(0, "time", Direction::Increasing).unwrap()
}

fn quality() -> Dimension {
    Dimension::new(1, "f", Direction::Decreasing).unwrap()
}

fn run(points: &[(i64, i64)]) -> Matrix {
    Matrix::from_rows(points.iter().map(|&(x, y)| vec![x, y])).unwrap()
}

fn points(curve: &Matrix) -> Vec<(f64, f64)> {
    (0..curve.row_count())
        .map(|row| (curve.get_double(row, 0), curve.get_double(row, 1)))
        .collect()
}

fn aggregation(primary: StatisticalParameter) -> CurveAggregation {
    CurveAggregation::builder()
        .x_dimension(time())
        .y_dimension(quality())
        .primary(primary)
        .build()
        .unwrap()
}

fn hash_of(value: &CurveAggregation) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn sample_runs() -> Vec<Matrix> {
    vec![
        run(&[(1, 50), (10, 30), (100, 20)]),
        run(&[(2, 60), (20, 25)]),
        run(&[(1, 45), (50, 40), (200, 10)]),
    ]
}

#[test]
fn test_single_run_set_collection_matches_run_set() {
    let curve = aggregation(StatisticalParameter::Minimum);
    let run_set = RunSet::new("tsp-01", sample_runs());
    let set = ExperimentSet::new(
        vec![time(), quality()],
        vec![Experiment::new("hill-climber", vec![run_set.clone()])],
    );

    let direct = curve.compute(Element::RunSet(&run_set)).unwrap();
    let experiment = curve
        .compute(Element::Experiment(&set.experiments()[0]))
        .unwrap();
    let collection = curve.compute(Element::ExperimentSet(&set)).unwrap();

    assert!(!direct.is_empty());
    assert_eq!(experiment, direct);
    assert_eq!(collection, direct);
}

#[test]
fn test_experiment_pools_run_sets() {
    let curve = aggregation(StatisticalParameter::Minimum);
    let experiment = Experiment::new(
        "ea",
        vec![
            RunSet::new("a", vec![run(&[(0, 10), (5, 4)])]),
            RunSet::new("b", vec![run(&[(0, 20), (5, 8)])]),
            RunSet::new("c", vec![run(&[(0, 30), (9, 6)])]),
        ],
    );

    let result = curve.compute(Element::Experiment(&experiment)).unwrap();
    // Median over the instances' minimum curves
    assert_eq!(
        points(&result),
        vec![(0.0, 20.0), (5.0, 8.0), (9.0, 6.0)]
    );
}

#[test]
fn test_collection_ignores_experiment_boundaries() {
    let curve = CurveAggregation::builder()
        .x_dimension(time())
        .y_dimension(quality())
        .primary(StatisticalParameter::Minimum)
        .secondary(StatisticalParameter::Maximum)
        .build()
        .unwrap();
    let set = ExperimentSet::new(
        vec![time(), quality()],
        vec![
            Experiment::new("a", vec![RunSet::new("i1", vec![run(&[(0, 3)])])]),
            Experiment::new(
                "b",
                vec![
                    RunSet::new("i1", vec![run(&[(0, 7)])]),
                    RunSet::new("i2", vec![run(&[(0, 5), (4, 1)])]),
                ],
            ),
        ],
    );

    let result = curve.compute(Element::ExperimentSet(&set)).unwrap();
    assert_eq!(points(&result), vec![(0.0, 7.0), (4.0, 7.0)]);
}

#[test]
fn test_transforms_applied_per_scope() {
    let curve = CurveAggregation::builder()
        .x_dimension(time())
        .y_dimension(quality())
        .primary(StatisticalParameter::Maximum)
        .x_transform(UnaryFunction::Log10)
        .y_input_transform(UnaryFunction::Negate)
        .y_output_transform(UnaryFunction::Scale(2.0))
        .build()
        .unwrap();
    let run_set = RunSet::new("i1", vec![run(&[(1, 5), (100, 3)]), run(&[(10, 4)])]);

    let result = curve.compute(Element::RunSet(&run_set)).unwrap();
    // x: log10(time); y: 2 * max(-f)
    assert_eq!(
        points(&result),
        vec![(0.0, -10.0), (1.0, -8.0), (2.0, -6.0)]
    );
}

#[test]
fn test_order_reversing_transform_flips_direction() {
    let curve = CurveAggregation::builder()
        .x_dimension(time())
        .y_dimension(quality())
        .primary(StatisticalParameter::Minimum)
        .x_transform(UnaryFunction::Negate)
        .build()
        .unwrap();
    assert_eq!(curve.x_direction(), Direction::Decreasing);

    let run_set = RunSet::new("i1", vec![run(&[(1, 5), (3, 2)])]);
    let result = curve.compute(Element::RunSet(&run_set)).unwrap();
    assert_eq!(points(&result), vec![(-1.0, 5.0), (-3.0, 2.0)]);
}

#[test]
fn test_unsupported_elements() {
    let curve = aggregation(StatisticalParameter::Median);
    let single = run(&[(0, 1)]);

    assert!(matches!(
        curve.compute(Element::Run(&single)),
        Err(CurveError::UnsupportedElement("run"))
    ));
    assert!(matches!(
        curve.compute(Element::Instance("tsp-01")),
        Err(CurveError::UnsupportedElement("instance"))
    ));
}

#[test]
fn test_equality_by_secondary() {
    let median = aggregation(StatisticalParameter::Minimum);
    let maximum = CurveAggregation::builder()
        .x_dimension(time())
        .y_dimension(quality())
        .primary(StatisticalParameter::Minimum)
        .secondary(StatisticalParameter::Maximum)
        .build()
        .unwrap();

    assert_ne!(median, maximum);
    assert_eq!(median.run_set_key(), maximum.run_set_key());
}

#[test]
fn test_identical_specifications_equal_and_hash_alike() {
    let a = aggregation(StatisticalParameter::quantile(90).unwrap());
    let b = aggregation(StatisticalParameter::quantile(90).unwrap());
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
}

#[test]
fn test_output_transform_outside_identity() {
    let plain = aggregation(StatisticalParameter::Mean);
    let scaled = CurveAggregation::builder()
        .x_dimension(time())
        .y_dimension(quality())
        .primary(StatisticalParameter::Mean)
        .y_output_transform(UnaryFunction::Log10)
        .build()
        .unwrap();
    assert_eq!(plain, scaled);
    assert_eq!(hash_of(&plain), hash_of(&scaled));
}

#[test]
fn test_builder_validation() {
    assert_eq!(
        CurveAggregation::builder()
            .x_dimension(time())
            .primary(StatisticalParameter::Median)
            .build()
            .unwrap_err(),
        ConfigError::MissingYDimension
    );
    assert_eq!(
        CurveAggregation::builder()
            .x_dimension(time())
            .y_dimension(quality())
            .build()
            .unwrap_err(),
        ConfigError::MissingPrimaryParameter
    );
    assert_eq!(
        aggregation(StatisticalParameter::Minimum).secondary(),
        StatisticalParameter::Median
    );
}

#[test]
fn test_labels() {
    let curve = CurveAggregation::builder()
        .x_dimension(time())
        .y_dimension(quality())
        .primary(StatisticalParameter::Minimum)
        .x_transform(UnaryFunction::Log10)
        .build()
        .unwrap();

    assert_eq!(curve.x_axis_label(), "log10(time)");
    assert_eq!(curve.y_axis_label(Scope::RunSet), "min(f)");
    assert_eq!(curve.y_axis_label(Scope::Experiment), "med(min(f))");
    assert_eq!(curve.path_name(Scope::Experiment), "med_min_f_over_log10_time");
}
