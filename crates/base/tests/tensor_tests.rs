use base::{Tensor, TensorError};

#[test]
fn test_new_validates_length() {
    let err = Tensor::new(vec![1, 3, 2, 2], vec![0.0f32; 11]).unwrap_err();
    assert_eq!(err, TensorError::ShapeMismatch { expected: 12, got: 11 });
}

#[test]
fn test_new_detects_overflow() {
    let err = Tensor::<u8>::new(vec![usize::MAX, 2], vec![]).unwrap_err();
    assert_eq!(err, TensorError::ShapeOverflow);
}

#[test]
fn test_zeros() {
    let t = Tensor::<f32>::zeros(vec![1, 3, 4, 4]).unwrap();
    assert_eq!(t.len(), 48);
    assert_eq!(t.ndim(), 4);
    assert!(t.data.iter().all(|&v| v == 0.0));
}

#[test]
fn test_debug_omits_data() {
    let t = Tensor::new(vec![2], vec![1u8, 2]).unwrap();
    assert_eq!(format!("{:?}", t), "Tensor { shape: [2], len: 2 }");
}
