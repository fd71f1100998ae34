use bench_curves::matrix::{Matrix, MatrixBuilder, NumericValue, Scalar, StorageKind};
use bench_curves::utils::error::MatrixError;
use pretty_assertions::assert_eq;

#[test]
fn test_storage_promotes_along_ladder() {
    let mut builder = MatrixBuilder::new();
    let steps: Vec<(Scalar, StorageKind)> = vec![
        (Scalar::from(1), StorageKind::Byte),
        (Scalar::from(300), StorageKind::Short),
        (Scalar::from(70_000), StorageKind::Int),
        (Scalar::from((1_i64 << 40) + 1), StorageKind::Long),
        (Scalar::from(0.5_f64), StorageKind::Double),
        (Scalar::from(2), StorageKind::Double),
    ];

    let mut previous = builder.storage_kind();
    for (value, expected) in steps {
        builder.append(value);
        let kind = builder.storage_kind();
        assert_eq!(kind, expected);
        assert!(kind >= previous, "storage never narrows");
        previous = kind;
    }

    let matrix = builder.finalize().unwrap();
    assert_eq!(matrix.get_long(0, 0), 1);
    assert_eq!(matrix.get_long(1, 0), 300);
    assert_eq!(matrix.get_long(2, 0), 70_000);
    assert_eq!(matrix.get_long(3, 0), (1_i64 << 40) + 1);
    assert_eq!(matrix.get_double(4, 0), 0.5);
    assert_eq!(matrix.get_long(5, 0), 2);
}

#[test]
fn test_float_exact_values_use_float_storage() {
    let mut builder = MatrixBuilder::new();
    builder.append(70_000);
    builder.append(0.5_f64);
    assert_eq!(builder.storage_kind(), StorageKind::Float);
}

#[test]
fn test_small_integers_then_float() {
    let mut builder = MatrixBuilder::new();
    builder.append(3);
    builder.append(0.25_f32);
    assert_eq!(builder.storage_kind(), StorageKind::Float);
    builder.append(0.1_f64);
    assert_eq!(builder.storage_kind(), StorageKind::Double);

    let matrix = builder.finalize().unwrap();
    assert_eq!(matrix.get_double(0, 0), 3.0);
    assert_eq!(matrix.get_double(1, 0), 0.25);
    assert_eq!(matrix.get_double(2, 0), 0.1);
}

#[test]
fn test_integral_doubles_stay_integer() {
    let mut builder = MatrixBuilder::new();
    builder.append(5.0_f64);
    builder.append(-12.0_f32);
    assert_eq!(builder.storage_kind(), StorageKind::Byte);
    assert!(builder.finalize().unwrap().is_integer_valued());
}

#[test]
fn test_large_long_is_exact_after_float_storage() {
    let big = (1_i64 << 40) + 1;
    let mut builder = MatrixBuilder::new();
    builder.append(0.5_f32);
    builder.append(big);
    assert_eq!(builder.storage_kind(), StorageKind::Double);
    let matrix = builder.finalize().unwrap();
    assert_eq!(matrix.get_double(0, 0), 0.5);
    assert_eq!(matrix.get_long(1, 0), big);
}

#[test]
fn test_many_values_survive_growth() {
    let mut builder = MatrixBuilder::with_columns(2).unwrap();
    for i in 0..1000_i64 {
        builder.append(i);
        builder.append(i * 1000);
    }
    let matrix = builder.finalize().unwrap();
    assert_eq!(matrix.row_count(), 1000);
    assert_eq!(matrix.storage_kind(), StorageKind::Int);
    assert_eq!(matrix.get_long(999, 1), 999_000);
}

#[test]
fn test_infer_columns_from_rows() {
    let mut builder = MatrixBuilder::new();
    builder.set_row_count(3).unwrap();
    for value in 1..=9 {
        builder.append(value);
    }
    let matrix = builder.finalize().unwrap();
    assert_eq!((matrix.row_count(), matrix.column_count()), (3, 3));
    assert_eq!(matrix.get_long(1, 2), 6);
}

#[test]
fn test_no_dimension_gives_single_column() {
    let mut builder = MatrixBuilder::new();
    for value in 0..5 {
        builder.append(value);
    }
    let matrix = builder.finalize().unwrap();
    assert_eq!((matrix.row_count(), matrix.column_count()), (5, 1));
}

#[test]
fn test_fixed_dimensions_size_mismatch() {
    let mut builder = MatrixBuilder::new();
    builder.set_row_count(2).unwrap();
    builder.set_column_count(3).unwrap();
    for value in 0..5 {
        builder.append(value);
    }
    assert!(matches!(
        builder.finalize(),
        Err(MatrixError::SizeMismatch {
            expected: 6,
            actual: 5,
            ..
        })
    ));
}

#[test]
fn test_uneven_count_rejected() {
    let mut builder = MatrixBuilder::with_columns(2).unwrap();
    for value in 0..3 {
        builder.append(value);
    }
    assert!(matches!(
        builder.finalize(),
        Err(MatrixError::UnevenElementCount { count: 3, fixed: 2, .. })
    ));
}

#[test]
fn test_dimension_set_after_overfill() {
    let mut builder = MatrixBuilder::new();
    for value in 0..7 {
        builder.append(value);
    }
    builder.set_row_count(2).unwrap();
    assert!(matches!(
        builder.set_column_count(3),
        Err(MatrixError::TooManyElements { stored: 7, .. })
    ));
}

#[test]
fn test_append_str_parses_numbers() {
    let mut builder = MatrixBuilder::new();
    builder.append_str("42").unwrap();
    builder.append_str(" -7 ").unwrap();
    assert_eq!(builder.storage_kind(), StorageKind::Byte);
    builder.append_str("1.5e3").unwrap();
    builder.append_str("inf").unwrap();
    assert!(builder.append_str("forty-two").is_err());
    assert_eq!(builder.len(), 4);

    let matrix = builder.finalize().unwrap();
    assert!(matrix.get(1, 0).numeric_eq(&NumericValue::Integer(-7)));
    assert_eq!(matrix.get_double(2, 0), 1500.0);
    assert_eq!(matrix.get(3, 0), NumericValue::PositiveInfinity);
}

#[test]
fn test_columns_and_rows_iterators() {
    let matrix = Matrix::from_rows(vec![vec![1, 10], vec![2, 20], vec![3, 30]]).unwrap();
    let xs: Vec<i64> = matrix.column(0).map(|v| v.as_long()).collect();
    assert_eq!(xs, vec![1, 2, 3]);
    let row: Vec<i64> = matrix.row(2).map(|v| v.as_long()).collect();
    assert_eq!(row, vec![3, 30]);
}
