use bplist_core::{navigator, NavError, PathError, PlistValue};

fn sample() -> PlistValue {
    PlistValue::dict([
        (
            "devices",
            PlistValue::array([
                PlistValue::dict([("name", PlistValue::Str("alpha".into()))]),
                PlistValue::dict([("name", PlistValue::Str("beta".into()))]),
            ]),
        ),
        ("count", PlistValue::Integer(2)),
        ("a/b", PlistValue::Bool(true)),
    ])
}

#[test]
fn get_matrix() {
    let tree = sample();

    assert_eq!(navigator::get(&tree, "").unwrap(), &tree);
    assert_eq!(
        navigator::get(&tree, "/count").unwrap(),
        &PlistValue::Integer(2)
    );
    assert_eq!(
        navigator::get(&tree, "/devices/1/name").unwrap(),
        &PlistValue::Str("beta".into())
    );
    // relaxed form without the leading slash
    assert_eq!(
        navigator::get(&tree, "devices/0/name").unwrap(),
        &PlistValue::Str("alpha".into())
    );
    // escaped key containing a slash
    assert_eq!(
        navigator::get(&tree, "/a~1b").unwrap(),
        &PlistValue::Bool(true)
    );
}

#[test]
fn get_miss_matrix() {
    let tree = sample();

    assert_eq!(navigator::get(&tree, "/nope"), Err(NavError::NotFound));
    assert_eq!(navigator::get(&tree, "/devices/7"), Err(NavError::NotFound));
    // array step that is not an index
    assert_eq!(
        navigator::get(&tree, "/devices/first"),
        Err(NavError::NotFound)
    );
    // descending into a scalar
    assert_eq!(
        navigator::get(&tree, "/count/0"),
        Err(NavError::NotFound)
    );
}

#[test]
fn set_replaces_and_inserts() {
    let mut tree = sample();

    navigator::set(&mut tree, "/count", PlistValue::Integer(3)).unwrap();
    assert_eq!(
        navigator::get(&tree, "/count").unwrap(),
        &PlistValue::Integer(3)
    );

    // new dict key appends
    navigator::set(&mut tree, "/label", PlistValue::Str("x".into())).unwrap();
    let keys: Vec<&str> = tree
        .as_dict()
        .unwrap()
        .iter()
        .map(|(k, _)| k.as_str())
        .collect();
    assert_eq!(keys, vec!["devices", "count", "a/b", "label"]);

    // array element replace and tail append
    navigator::set(&mut tree, "/devices/0", PlistValue::Null).unwrap();
    navigator::set(&mut tree, "/devices/2", PlistValue::Bool(false)).unwrap();
    assert_eq!(
        navigator::get(&tree, "/devices/2").unwrap(),
        &PlistValue::Bool(false)
    );

    // past-the-tail insert misses
    assert_eq!(
        navigator::set(&mut tree, "/devices/9", PlistValue::Null),
        Err(NavError::NotFound)
    );
    // missing parents are not created
    assert_eq!(
        navigator::set(&mut tree, "/missing/child", PlistValue::Null),
        Err(NavError::NotFound)
    );
}

#[test]
fn set_empty_path_replaces_root() {
    let mut tree = sample();
    navigator::set(&mut tree, "", PlistValue::Integer(1)).unwrap();
    assert_eq!(tree, PlistValue::Integer(1));
}

#[test]
fn remove_matrix() {
    let mut tree = sample();

    assert_eq!(
        navigator::remove(&mut tree, "/count").unwrap(),
        PlistValue::Integer(2)
    );
    assert_eq!(navigator::remove(&mut tree, "/count"), Err(NavError::NotFound));

    let first = navigator::remove(&mut tree, "/devices/0").unwrap();
    assert_eq!(
        first.dict_get("name"),
        Some(&PlistValue::Str("alpha".into()))
    );
    // remaining element shifted down
    assert_eq!(
        navigator::get(&tree, "/devices/0/name").unwrap(),
        &PlistValue::Str("beta".into())
    );

    assert_eq!(navigator::remove(&mut tree, ""), Err(NavError::NotFound));
}

#[test]
fn get_mut_allows_in_place_edits() {
    let mut tree = sample();
    let name = navigator::get_mut(&mut tree, "/devices/1/name").unwrap();
    *name = PlistValue::Str("gamma".into());
    assert_eq!(
        navigator::get(&tree, "/devices/1/name").unwrap(),
        &PlistValue::Str("gamma".into())
    );
}

#[test]
fn malformed_path_is_a_path_error() {
    let tree = sample();
    // parse_plist_path is strict about absoluteness; the navigator's
    // relaxed entry points accept relative paths, so only the strict
    // parser reports NotAbsolute
    assert_eq!(
        bplist_core::parse_plist_path("count"),
        Err(PathError::NotAbsolute)
    );
    assert!(navigator::get(&tree, "count").is_ok());
}
