use ndshare::prelude::*;
use quickcheck::{quickcheck, TestResult};

quickcheck! {
    fn bind_sees_every_write(xs: Vec<i64>, index: usize, value: i64) -> TestResult {
        if xs.is_empty() {
            return TestResult::discard();
        }
        let index = index % xs.len();
        let a = arr1(&xs);
        let b = a.bind();
        b.set(&[index], value).unwrap();
        let mut expected = xs;
        expected[index] = value;
        TestResult::from_bool(
            shares_buffer(&a, &b) && a.to_vec::<i64>().unwrap() == expected
        )
    }

    fn slice_writes_land_in_the_source(xs: Vec<i32>, start: usize, len: usize) -> TestResult {
        if xs.is_empty() {
            return TestResult::discard();
        }
        let start = start % xs.len();
        let end = start + len % (xs.len() - start + 1);
        let a = arr1(&xs);
        let v = a.slice(s![start..end]).unwrap();
        v.fill(i32::MIN).unwrap();
        let got = a.to_vec::<i32>().unwrap();
        let ok = got.iter().enumerate().all(|(i, &x)| {
            if (start..end).contains(&i) { x == i32::MIN } else { x == xs[i] }
        });
        TestResult::from_bool(shares_buffer(&a, &v) && ok)
    }

    fn arithmetic_never_aliases(xs: Vec<i64>, k: i64) -> bool {
        let a = arr1(&xs);
        let b = a.add(k).unwrap();
        let c = a.mul(&a).unwrap();
        b.fill(0i64).unwrap();
        c.fill(0i64).unwrap();
        !shares_buffer(&a, &b) && !shares_buffer(&a, &c) && a.to_vec::<i64>().unwrap() == xs
    }

    fn copies_keep_values_not_storage(xs: Vec<f64>) -> bool {
        let a = arr1(&xs);
        let shallow = a.shallow_copy();
        let deep = a.deep_copy();
        let same_values = shallow.to_f64_vec() == a.to_f64_vec() || xs.iter().any(|x| x.is_nan());
        a.fill(1.0).unwrap();
        same_values
            && !shares_buffer(&a, &shallow)
            && !shares_buffer(&a, &deep)
            && deep.to_vec::<f64>().unwrap().iter().zip(&xs).all(|(d, x)| d.to_bits() == x.to_bits())
    }

    fn out_of_range_slices_fail(len: usize, extra: usize) -> bool {
        let len = len % 64;
        let a = ArrayHandle::zeros(DType::I32, &[len]).unwrap();
        let end = len + 1 + extra % 8;
        a.slice(s![0..end]).map_err(|e| e.kind()) == Err(ErrorKind::IndexOutOfRange)
            && a.is_unique()
    }
}
