use defmac::defmac;
use ndshare::prelude::*;

fn test_oper(op: BinaryOp, a: &[f32], b: &[f32], c: &[f32]) {
    let aa = arr1(a);
    let bb = arr1(b);
    let cc = arr1(c);
    test_oper_arr(op, &aa, &bb, &cc);
    let reshape = |x: &ArrayHandle, shape: &[usize]| {
        ArrayHandle::from_shape_vec(shape, x.to_vec::<f32>().unwrap()).unwrap()
    };
    for shape in [&[2, 2][..], &[1, 2, 1, 2][..]] {
        test_oper_arr(op, &reshape(&aa, shape), &reshape(&bb, shape), &reshape(&cc, shape));
    }
}

fn test_oper_arr(op: BinaryOp, aa: &ArrayHandle, bb: &ArrayHandle, cc: &ArrayHandle) {
    let out = aa.elementwise(op, bb).unwrap();
    assert_eq!(&out, cc);
    assert!(!out.shares_buffer(aa) && !out.shares_buffer(bb));

    let target = aa.shallow_copy();
    let alias = target.bind();
    target.elementwise_inplace(op, bb).unwrap();
    assert_eq!(&target, cc);
    assert_eq!(&alias, cc);
    assert_ne!(aa, cc);
}

#[test]
fn operations() {
    test_oper(BinaryOp::Add, &[1.0, 2.0, 3.0, 4.0], &[0.0, 1.0, 2.0, 3.0], &[1.0, 3.0, 5.0, 7.0]);
    test_oper(BinaryOp::Sub, &[1.0, 2.0, 3.0, 4.0], &[0.0, 1.0, 2.0, 3.0], &[1.0, 1.0, 1.0, 1.0]);
    test_oper(BinaryOp::Mul, &[1.0, 2.0, 3.0, 4.0], &[0.0, 1.0, 2.0, 3.0], &[0.0, 2.0, 6.0, 12.0]);
    test_oper(BinaryOp::Div, &[1.0, 2.0, 3.0, 4.0], &[1.0, 1.0, 2.0, 4.0], &[1.0, 2.0, 1.5, 1.0]);
}

#[test]
fn adding_zero_makes_an_independent_buffer() {
    let a = arr1(&[1, 2, 3, 4, 5]);
    let b = a.add(0).unwrap();
    assert!(!shares_buffer(&a, &b));

    b.set(&[3], 10).unwrap();
    assert_eq!(a, arr1(&[1, 2, 3, 4, 5]));
    assert_eq!(b, arr1(&[1, 2, 3, 10, 5]));
}

#[test]
fn scalar_operations() {
    defmac!(apply a, op, x => a.elementwise(op, x).unwrap().to_vec::<i64>().unwrap());
    let a = &arr1(&[4i64, 8, -6]);
    assert_eq!(apply!(a, BinaryOp::Add, 1i64), vec![5, 9, -5]);
    assert_eq!(apply!(a, BinaryOp::Sub, 1i32), vec![3, 7, -7]);
    assert_eq!(apply!(a, BinaryOp::Mul, -2i64), vec![-8, -16, 12]);
    assert_eq!(apply!(a, BinaryOp::Div, 4i64), vec![1, 2, -1]);
    assert_eq!(apply!(a, BinaryOp::Div, 0i64), vec![0, 0, 0]);
}

#[test]
fn operations_on_views_allocate_the_view_shape() {
    let a = ArrayHandle::arange::<f64>(8);
    let v = a.slice(s![1..;3]).unwrap();
    let out = v.mul(10.).unwrap();
    assert_eq!(out.to_vec::<f64>().unwrap(), vec![10., 40., 70.]);
    assert_eq!(out.buffer_len(), 3);
    assert!(!out.is_view());
}

#[test]
fn broadcasting() {
    let a = arr2(&[[1, 2, 3], [4, 5, 6]]);
    let row = arr1(&[10, 20, 30]);
    let col = arr2(&[[100], [200]]);
    assert_eq!(a.add(&row).unwrap(), arr2(&[[11, 22, 33], [14, 25, 36]]));
    assert_eq!(a.add(&col).unwrap(), arr2(&[[101, 102, 103], [204, 205, 206]]));
    assert_eq!(a.mul(&arr0(2)).unwrap(), arr2(&[[2, 4, 6], [8, 10, 12]]));
}

#[test]
fn shape_mismatch_produces_no_result() {
    let a = arr2(&[[1., 2., 3.], [4., 5., 6.]]);
    let b = arr1(&[1., 2.]);
    let before = a.handle_count();
    let err = a.add(&b).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
    assert_eq!(a.handle_count(), before);

    let err = a.elementwise_inplace(BinaryOp::Add, &b).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
    assert_eq!(a, arr2(&[[1., 2., 3.], [4., 5., 6.]]));
}

#[test]
fn type_mismatch_needs_an_explicit_cast() {
    let f = arr1(&[1.0f64, 2.0]);
    let i = arr1(&[1i64, 2]);
    assert_eq!(f.add(&i).unwrap_err().kind(), ErrorKind::TypeMismatch);
    assert_eq!(f.add(1i64).unwrap_err().kind(), ErrorKind::TypeMismatch);
    assert_eq!(
        f.elementwise_inplace(BinaryOp::Mul, &i).unwrap_err().kind(),
        ErrorKind::TypeMismatch
    );
    assert_eq!(f, arr1(&[1.0, 2.0]));

    let sum = f.add(&i.cast(DType::F64).unwrap()).unwrap();
    assert_eq!(sum, arr1(&[2.0, 4.0]));
}

#[test]
fn augmented_assignment_writes_through_every_alias() {
    let a = ArrayHandle::arange::<i32>(4);
    let view = a.slice(s![2..]).unwrap();
    view.elementwise_inplace(BinaryOp::Add, 100).unwrap();
    assert_eq!(a.to_vec::<i32>().unwrap(), vec![0, 1, 102, 103]);

    // rebinding to a fresh result leaves the old buffer alone
    let b = a.add(1).unwrap();
    assert_eq!(a.to_vec::<i32>().unwrap(), vec![0, 1, 102, 103]);
    assert_eq!(b.to_vec::<i32>().unwrap(), vec![1, 2, 103, 104]);
}

#[test]
fn integer_division_wraps_on_overflow() {
    let a = arr1(&[i64::MIN, 7, -7]);
    assert_eq!(a.div(-1i64).unwrap(), arr1(&[i64::MIN, -7, 7]));
    assert_eq!(a.div(0i64).unwrap(), arr1(&[0i64, 0, 0]));

    let b = arr1(&[i32::MIN]);
    b.elementwise_inplace(BinaryOp::Div, &arr1(&[-1i32])).unwrap();
    assert_eq!(b, arr1(&[i32::MIN]));
}

#[test]
fn float_narrowing_must_be_representable() {
    let a = arr1(&[1.0f32, 2.0]);
    assert_eq!(a.add(1e300f64).unwrap_err().kind(), ErrorKind::TypeMismatch);
    assert_eq!(a.fill(-1e300f64).unwrap_err().kind(), ErrorKind::TypeMismatch);
    assert_eq!(a, arr1(&[1.0f32, 2.0]));
    assert_eq!(a.add(0.5f64).unwrap(), arr1(&[1.5f32, 2.5]));

    let wide = arr1(&[1.0f64, 1e300]);
    assert_eq!(wide.cast(DType::F32).unwrap_err().kind(), ErrorKind::TypeMismatch);
    let ok = wide.slice(s![..1]).unwrap().cast(DType::F32).unwrap();
    assert_eq!(ok, arr1(&[1.0f32]));
}

#[test]
#[cfg(target_pointer_width = "64")]
fn broadcast_shape_must_fit() {
    let tall = ArrayHandle::zeros(DType::F64, &[1 << 40, 1, 0]).unwrap();
    let wide = ArrayHandle::zeros(DType::F64, &[1, 1 << 40, 0]).unwrap();
    assert_eq!(tall.add(&wide).unwrap_err().kind(), ErrorKind::ShapeMismatch);
    assert_eq!(tall.add(&tall).unwrap().shape(), &[1 << 40, 1, 0]);
}
