use bench_curves::aggregator::{CurveAggregator, Direction, SeriesCursor};
use bench_curves::functions::UnaryFunction;
use bench_curves::matrix::{Matrix, NumericValue};
use bench_curves::stats::StatisticalParameter;
use bench_curves::utils::error::CurveError;
use pretty_assertions::assert_eq;

fn run(points: &[(i64, i64)]) -> Matrix {
    Matrix::from_rows(points.iter().map(|&(x, y)| vec![x, y])).unwrap()
}

fn points(curve: &Matrix) -> Vec<(f64, f64)> {
    (0..curve.row_count())
        .map(|row| (curve.get_double(row, 0), curve.get_double(row, 1)))
        .collect()
}

fn median(runs: &[Matrix]) -> Matrix {
    StatisticalParameter::Median
        .aggregate_columns(runs, 0, 1, Direction::Increasing, &UnaryFunction::Identity)
        .unwrap()
}

#[test]
fn test_point_reduction_emits_only_changes() {
    let steady = run(&[(0, 5), (2, 5), (4, 5), (6, 5), (8, 5), (10, 5)]);
    let improving = run(&[(0, 5), (2, 5), (4, 5), (6, 5), (8, 5), (10, 7)]);

    let curve = median(&[steady, improving]);
    assert_eq!(points(&curve), vec![(0.0, 5.0), (10.0, 6.0)]);
    assert!(curve.is_integer_valued());
}

#[test]
fn test_median_of_three_keeps_majority() {
    let runs = vec![
        run(&[(0, 5), (10, 5)]),
        run(&[(0, 5), (10, 5)]),
        run(&[(0, 5), (10, 7)]),
    ];

    // Median stays at 5; the end point is still reported
    assert_eq!(points(&median(&runs)), vec![(0.0, 5.0), (10.0, 5.0)]);
}

#[test]
fn test_last_point_guarantee() {
    let runs = vec![
        run(&[(1, 3), (4, 3), (9, 3)]),
        run(&[(2, 3), (7, 3)]),
    ];
    let curve = median(&runs);
    assert_eq!(points(&curve), vec![(1.0, 3.0), (9.0, 3.0)]);
}

#[test]
fn test_single_point_not_duplicated() {
    let curve = median(&[run(&[(4, 1)])]);
    assert_eq!(points(&curve), vec![(4.0, 1.0)]);
}

#[test]
fn test_no_rows_gives_empty_curve() {
    let curve = median(&[Matrix::empty(2), Matrix::empty(2)]);
    assert!(curve.is_empty());
    assert_eq!(curve.column_count(), 2);

    let none: Vec<Matrix> = Vec::new();
    assert!(median(&none).is_empty());
}

#[test]
fn test_minimum_step_function() {
    let runs = vec![
        run(&[(0, 10), (5, 6), (8, 2)]),
        run(&[(1, 9), (3, 4)]),
    ];
    let curve = StatisticalParameter::Minimum
        .aggregate_columns(&runs, 0, 1, Direction::Increasing, &UnaryFunction::Identity)
        .unwrap();

    // x=5 and x=1 do not change the minimum
    assert_eq!(
        points(&curve),
        vec![(0.0, 10.0), (1.0, 9.0), (3.0, 4.0), (8.0, 2.0)]
    );
}

#[test]
fn test_decreasing_axis_visits_high_x_first() {
    let runs = vec![run(&[(10, 1), (5, 2), (0, 3)])];
    let curve = StatisticalParameter::Maximum
        .aggregate_columns(&runs, 0, 1, Direction::Decreasing, &UnaryFunction::Identity)
        .unwrap();
    assert_eq!(points(&curve), vec![(10.0, 1.0), (5.0, 2.0), (0.0, 3.0)]);
}

#[test]
fn test_output_transform_applies_to_aggregate() {
    let runs = vec![run(&[(0, 100), (1, 10)]), run(&[(0, 100), (1, 1000)])];
    let curve = StatisticalParameter::Median
        .aggregate_columns(&runs, 0, 1, Direction::Increasing, &UnaryFunction::Log10)
        .unwrap();
    // log10 of the median, not the median of log10
    assert_eq!(points(&curve), vec![(0.0, 2.0), (1.0, 505.0_f64.log10())]);
}

#[test]
fn test_overflow_written_as_infinity() {
    let runs = vec![run(&[(0, 1000), (1, 1000)])];
    let curve = StatisticalParameter::Median
        .aggregate_columns(&runs, 0, 1, Direction::Increasing, &UnaryFunction::Exp)
        .unwrap();
    assert_eq!(curve.get(0, 1), NumericValue::PositiveInfinity);
    assert_eq!(curve.row_count(), 2);
}

#[test]
fn test_missing_column_rejected() {
    let runs = vec![run(&[(0, 1)])];
    let cursor = SeriesCursor::new(&runs, 0, 2, Direction::Increasing);
    assert!(matches!(
        cursor,
        Err(CurveError::ColumnOutOfRange { column: 2, columns: 2 })
    ));
}

#[test]
fn test_aggregator_with_explicit_cursor() {
    let runs = vec![run(&[(0, 4), (3, 8)]), run(&[(0, 6)])];
    let cursor = SeriesCursor::new(&runs, 0, 1, Direction::Increasing).unwrap();
    let curve = CurveAggregator::new(
        cursor,
        StatisticalParameter::Mean.fresh_accumulator(),
        UnaryFunction::Identity,
    )
    .aggregate()
    .unwrap();
    assert_eq!(points(&curve), vec![(0.0, 5.0), (3.0, 7.0)]);
}

#[test]
fn test_no_value_steps_encoded_as_nan_and_merged() {
    let late = Matrix::from_rows(vec![
        vec![0.0, f64::NAN],
        vec![2.0, f64::NAN],
        vec![5.0, 3.0],
    ])
    .unwrap();
    let fractional = Matrix::from_rows(vec![vec![5.5, 4.5]]).unwrap();
    let integral = run(&[(5, 9)]);
    assert!(integral.is_integer_valued());
    assert!(!fractional.is_integer_valued());

    let curve = StatisticalParameter::Maximum
        .aggregate_columns(
            &[late, fractional, integral],
            0,
            1,
            Direction::Increasing,
            &UnaryFunction::Identity,
        )
        .unwrap();

    // x=2 repeats the empty step at x=0; x=5 and x=5.0 form one step
    assert_eq!(curve.row_count(), 3);
    assert_eq!(curve.get_double(0, 0), 0.0);
    assert!(curve.get(0, 1).is_no_value());
    assert!(curve.get_double(0, 1).is_nan());
    assert_eq!(points(&curve)[1..].to_vec(), vec![(5.0, 9.0), (5.5, 9.0)]);
}
