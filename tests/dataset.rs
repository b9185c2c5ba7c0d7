use ndshare::prelude::*;
use ndshare_gen::dataset_builder::DatasetBuilder;

fn sample() -> Dataset {
    let mut ds = DatasetBuilder::new()
        .dim("time", 4)
        .dim("x", 3)
        .var("temperature")
        .var("salinity")
        .build();
    ds.attrs_mut().insert("source".into(), "synthetic".into());
    ds
}

#[test]
fn shallow_copy_shares_every_nested_buffer() {
    let ds = sample();
    let shallow = ds.shallow_copy();
    for ((_, a), (_, b)) in ds.data_vars().zip(shallow.data_vars()) {
        assert!(shares_buffer(a.data(), b.data()));
    }
    for ((_, a), (_, b)) in ds.coords().zip(shallow.coords()) {
        assert!(shares_buffer(a.data(), b.data()));
    }

    shallow.var("temperature").unwrap().data().set(&[0, 0], 99.0).unwrap();
    assert_eq!(
        ds.var("temperature").unwrap().data().get(&[0, 0]).unwrap(),
        Scalar::F64(99.0)
    );
}

#[test]
fn shallow_copy_has_its_own_container() {
    let ds = sample();
    let mut shallow = ds.shallow_copy();
    shallow.remove_var("salinity");
    shallow.attrs_mut().insert("source".into(), "edited".into());
    assert!(ds.var("salinity").is_some());
    assert_eq!(ds.attrs().get("source"), Some(&AttrValue::from("synthetic")));
}

#[test]
fn deep_copy_shares_nothing() {
    let ds = sample();
    let deep = ds.deep_copy();
    assert_eq!(deep, ds);
    assert!(!deep.shares_buffer_with(&ds));
    for a in ds.handles() {
        for b in deep.handles() {
            assert!(!shares_buffer(a, b));
        }
    }

    deep.var("salinity").unwrap().data().fill(0.0).unwrap();
    deep.coord("time").unwrap().data().fill(-1i64).unwrap();
    assert_ne!(deep, ds);
    assert_eq!(
        ds.coord("time").unwrap().data().to_vec::<i64>().unwrap(),
        vec![0, 1, 2, 3]
    );
    assert_eq!(ds.var("salinity").unwrap().data().get(&[3, 2]).unwrap(), Scalar::F64(11.0));
}

#[test]
fn deep_copy_splits_variables_that_shared_a_buffer() {
    let data = arr1(&[1.0, 2.0, 3.0]);
    let mut ds = Dataset::new();
    ds.insert_var("a", Variable::new(["x"], data.bind()).unwrap()).unwrap();
    ds.insert_var("b", Variable::new(["x"], data.bind()).unwrap()).unwrap();

    let deep = ds.deep_copy();
    let (a, b) = (deep.var("a").unwrap().data(), deep.var("b").unwrap().data());
    assert!(!shares_buffer(a, b));
    assert!(!shares_buffer(a, &data));
}

#[test]
fn attributes_are_copied_with_variables() {
    let var = Variable::new(["x"], arr1(&[1i32, 2]))
        .unwrap()
        .with_attr("units", "m")
        .with_attr("scale", 0.5);
    let deep = var.deep_copy();
    assert_eq!(deep.attrs().get("units"), Some(&AttrValue::Str("m".into())));
    assert_eq!(deep.attrs().get("scale"), Some(&AttrValue::Float(0.5)));
    assert!(!shares_buffer(var.data(), deep.data()));
    assert!(shares_buffer(var.data(), var.shallow_copy().data()));
}

#[test]
fn isel_views_every_variable_on_the_dimension() {
    let ds = sample();
    let first_two = ds.isel("time", ..2).unwrap();
    assert_eq!(first_two.dims().get("time"), Some(&2));
    assert_eq!(first_two.dims().get("x"), Some(&3));

    let x = first_two.coord("x").unwrap().data();
    let full_x = ds.coord("x").unwrap().data();
    assert!(shares_buffer(x, full_x));
    assert!(!x.is_view());

    let t = first_two.var("temperature").unwrap().data();
    assert!(t.is_view());
    t.fill(0.0).unwrap();
    let full = ds.var("temperature").unwrap().data();
    assert_eq!(full.get(&[1, 2]).unwrap(), Scalar::F64(0.0));
    assert_eq!(full.get(&[2, 0]).unwrap(), Scalar::F64(6.0));
}

#[test]
fn lookup_prefers_data_variables() {
    let mut ds = sample();
    let time_var = Variable::new(["time"], arr1(&[0.5, 1.5, 2.5, 3.5])).unwrap();
    ds.insert_var("time", time_var).unwrap();
    assert_eq!(ds.get("time").unwrap().data().dtype(), DType::F64);
    assert_eq!(ds.coord("time").unwrap().data().dtype(), DType::I64);
    assert_eq!(ds.len(), 3);
}
