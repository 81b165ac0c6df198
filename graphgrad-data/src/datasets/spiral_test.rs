use super::*;

#[test]
fn test_spiral_shapes_and_labels() -> Result<(), GraphGradError> {
    let spiral = Spiral::new(true)?;
    assert_eq!(spiral.len(), 300);
    assert_eq!(spiral.data().shape(), &[300, 2]);
    assert_eq!(spiral.label().shape(), &[300]);

    for class in 0..3 {
        let count = spiral.label().iter().filter(|&&t| t == class as f64).count();
        assert_eq!(count, 100);
    }
    Ok(())
}

#[test]
fn test_spiral_points_lie_inside_unit_disk() -> Result<(), GraphGradError> {
    let spiral = Spiral::new(false)?;
    for i in 0..spiral.len() {
        let (x, _) = spiral.get(i)?;
        let r = (x[[0]] * x[[0]] + x[[1]] * x[[1]]).sqrt();
        assert!(r < 1.0);
    }
    Ok(())
}

#[test]
fn test_spiral_is_deterministic_per_split() -> Result<(), GraphGradError> {
    let a = Spiral::new(true)?;
    let b = Spiral::new(true)?;
    let test = Spiral::new(false)?;
    assert_eq!(a.data(), b.data());
    assert_eq!(a.label(), b.label());
    assert_ne!(a.data(), test.data());
    Ok(())
}

#[test]
fn test_spiral_is_shuffled() -> Result<(), GraphGradError> {
    let spiral = Spiral::new(true)?;
    let first_hundred_single_class = spiral
        .label()
        .iter()
        .take(100)
        .all(|&t| t == spiral.label()[[0]]);
    assert!(!first_hundred_single_class);
    Ok(())
}
