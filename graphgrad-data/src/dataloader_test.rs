use super::*;
use crate::datasets::ArrayDataset;
use ndarray::{Array1, Array2};

/// Ten samples: data row `i` is `[i, 10 * i]`, label `i`.
fn counting_dataset(n: usize) -> Result<ArrayDataset, GraphGradError> {
    let data = Array2::from_shape_fn((n, 2), |(i, j)| (i * if j == 0 { 1 } else { 10 }) as f64);
    let label = Array1::from_shape_fn(n, |i| i as f64);
    ArrayDataset::new(data.into_dyn(), label.into_dyn())
}

#[test]
fn test_sequential_batches_and_short_last_batch() -> Result<(), GraphGradError> {
    let mut loader = DataLoader::new(counting_dataset(10)?, 4, false)?;
    assert_eq!(loader.max_iteration(), 3);

    let (x, t) = loader.batch_at(0)?;
    assert_eq!(x.shape(), &[4, 2]);
    assert_eq!(t.shape(), &[4]);
    assert_eq!(t.iter().copied().collect::<Vec<_>>(), vec![0.0, 1.0, 2.0, 3.0]);
    assert_eq!(x[[3, 1]], 30.0);

    let (x, t) = loader.batch_at(2)?;
    assert_eq!(x.shape(), &[2, 2]);
    assert_eq!(t.iter().copied().collect::<Vec<_>>(), vec![8.0, 9.0]);
    Ok(())
}

#[test]
fn test_batch_index_out_of_range() -> Result<(), GraphGradError> {
    let mut loader = DataLoader::new(counting_dataset(10)?, 5, false)?;
    assert!(matches!(
        loader.batch_at(2),
        Err(GraphGradError::IndexOutOfBounds { .. })
    ));
    Ok(())
}

#[test]
fn test_zero_batch_size_is_rejected() -> Result<(), GraphGradError> {
    assert!(matches!(
        DataLoader::new(counting_dataset(4)?, 0, false),
        Err(GraphGradError::InvalidConfiguration(_))
    ));
    Ok(())
}

#[test]
fn test_stride_keeps_every_nth_sample() -> Result<(), GraphGradError> {
    let loader = DataLoader::new(counting_dataset(10)?, 2, false)?.with_stride(5)?;
    assert_eq!(loader.indices(), &[0, 5]);
    assert_eq!(loader.max_iteration(), 1);

    let loader = DataLoader::new(counting_dataset(10)?, 2, false)?;
    assert!(matches!(
        loader.with_stride(3),
        Err(GraphGradError::InvalidConfiguration(_))
    ));
    Ok(())
}

#[test]
fn test_shuffle_is_a_seeded_permutation() -> Result<(), GraphGradError> {
    let a = DataLoader::new(counting_dataset(30)?, 8, true)?.with_seed(3);
    let b = DataLoader::new(counting_dataset(30)?, 8, true)?.with_seed(3);
    assert_eq!(a.indices(), b.indices());

    let mut sorted = a.indices().to_vec();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..30).collect::<Vec<_>>());
    assert_ne!(a.indices(), sorted.as_slice());
    Ok(())
}

#[test]
fn test_last_batch_starts_a_new_shuffled_pass() -> Result<(), GraphGradError> {
    let mut loader = DataLoader::new(counting_dataset(30)?, 10, true)?.with_seed(11);
    let first_pass = loader.indices().to_vec();
    loader.batch_at(0)?;
    assert_eq!(loader.indices(), first_pass.as_slice());
    loader.batch_at(2)?;
    assert_ne!(loader.indices(), first_pass.as_slice());
    Ok(())
}

#[test]
fn test_iterator_yields_one_pass_then_restarts() -> Result<(), GraphGradError> {
    let mut loader = DataLoader::new(counting_dataset(10)?, 3, false)?;
    let sizes: Vec<usize> = loader
        .by_ref()
        .map(|batch| batch.map(|(x, _)| x.shape()[0]))
        .collect::<Result<_, _>>()?;
    assert_eq!(sizes, vec![3, 3, 3, 1]);

    let seen: usize = loader
        .by_ref()
        .map(|batch| batch.map(|(_, t)| t.len()))
        .sum::<Result<usize, _>>()?;
    assert_eq!(seen, 10);
    Ok(())
}
