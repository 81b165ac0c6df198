use super::*;
use graphgrad_core::Tensor;

fn xy() -> Result<(NdArray, NdArray), GraphGradError> {
    let data = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![3, 2])?.value();
    let label = Tensor::from_vec(vec![0.0, 1.0, 2.0], vec![3])?.value();
    Ok((data, label))
}

#[test]
fn test_get_returns_rows() -> Result<(), GraphGradError> {
    let (data, label) = xy()?;
    let dataset = ArrayDataset::new(data, label)?;
    assert_eq!(dataset.len(), 3);
    assert!(!dataset.is_empty());

    let (x, t) = dataset.get(1)?;
    assert_eq!(x.iter().copied().collect::<Vec<_>>(), vec![3.0, 4.0]);
    assert_eq!(x.shape(), &[2]);
    assert_eq!(t.ndim(), 0);
    assert_eq!(t.sum(), 1.0);
    Ok(())
}

#[test]
fn test_get_out_of_bounds() -> Result<(), GraphGradError> {
    let (data, label) = xy()?;
    let dataset = ArrayDataset::new(data, label)?;
    assert!(matches!(
        dataset.get(3),
        Err(GraphGradError::IndexOutOfBounds { .. })
    ));
    Ok(())
}

#[test]
fn test_transforms_apply_in_order() -> Result<(), GraphGradError> {
    let (data, label) = xy()?;
    let dataset = ArrayDataset::new(data, label)?
        .with_data_transform(|x| x + 1.0)
        .with_data_transform(|x| x * 10.0)
        .with_label_transform(|t| t * 2.0);
    let (x, t) = dataset.get(0)?;
    assert_eq!(x.iter().copied().collect::<Vec<_>>(), vec![20.0, 30.0]);
    assert_eq!(t.sum(), 0.0);
    let (_, t) = dataset.get(2)?;
    assert_eq!(t.sum(), 4.0);

    // The stored arrays are untouched.
    assert_eq!(dataset.data()[[0, 0]], 1.0);
    Ok(())
}

#[test]
fn test_mismatched_lengths() -> Result<(), GraphGradError> {
    let (data, _) = xy()?;
    let label = Tensor::from_vec(vec![0.0, 1.0], vec![2])?.value();
    assert!(matches!(
        ArrayDataset::new(data, label),
        Err(GraphGradError::ShapeMismatch { .. })
    ));
    Ok(())
}
