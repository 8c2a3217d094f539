//! Path-based navigation and mutation over plist trees.
//!
//! A path component is matched against the container it lands on: in a
//! dictionary it is a key, in an array it must parse as a base-10
//! index. Navigation is read-only borrow in, borrow out; mutation goes
//! through [`set`] and [`remove`].

use bplist_codec::PlistValue;
use bplist_path::{parse_plist_path_relaxed, PathError};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavError {
    #[error("path does not resolve to a value")]
    NotFound,
    #[error(transparent)]
    Path(#[from] PathError),
}

/// Resolves a path string against a tree.
pub fn get<'a>(root: &'a PlistValue, path: &str) -> Result<&'a PlistValue, NavError> {
    let components = parse_plist_path_relaxed(path)?;
    find(root, &components)
}

/// Resolves a path string against a tree, mutably.
pub fn get_mut<'a>(root: &'a mut PlistValue, path: &str) -> Result<&'a mut PlistValue, NavError> {
    let components = parse_plist_path_relaxed(path)?;
    find_mut(root, &components)
}

/// Resolves parsed components against a tree.
pub fn find<'a>(root: &'a PlistValue, components: &[String]) -> Result<&'a PlistValue, NavError> {
    let mut current = root;
    for component in components {
        current = step(current, component).ok_or(NavError::NotFound)?;
    }
    Ok(current)
}

/// Resolves parsed components against a tree, mutably.
pub fn find_mut<'a>(
    root: &'a mut PlistValue,
    components: &[String],
) -> Result<&'a mut PlistValue, NavError> {
    let mut current = root;
    for component in components {
        current = step_mut(current, component).ok_or(NavError::NotFound)?;
    }
    Ok(current)
}

/// Replaces the value at `path`, or inserts it when the final component
/// names a new dictionary key or the array tail position.
///
/// Every intermediate component must already resolve; missing parents
/// are not created.
pub fn set(root: &mut PlistValue, path: &str, value: PlistValue) -> Result<(), NavError> {
    let components = parse_plist_path_relaxed(path)?;
    let Some((last, parents)) = components.split_last() else {
        *root = value;
        return Ok(());
    };
    match find_mut(root, parents)? {
        PlistValue::Dict(pairs) => {
            for (key, val) in pairs.iter_mut() {
                if key == last {
                    *val = value;
                    return Ok(());
                }
            }
            pairs.push((last.clone(), value));
            Ok(())
        }
        PlistValue::Array(items) => {
            let index: usize = last.parse().map_err(|_| NavError::NotFound)?;
            if index < items.len() {
                items[index] = value;
                Ok(())
            } else if index == items.len() {
                items.push(value);
                Ok(())
            } else {
                Err(NavError::NotFound)
            }
        }
        _ => Err(NavError::NotFound),
    }
}

/// Removes and returns the value at `path`.
pub fn remove(root: &mut PlistValue, path: &str) -> Result<PlistValue, NavError> {
    let components = parse_plist_path_relaxed(path)?;
    let Some((last, parents)) = components.split_last() else {
        return Err(NavError::NotFound);
    };
    match find_mut(root, parents)? {
        PlistValue::Dict(pairs) => match pairs.iter().position(|(key, _)| key == last) {
            Some(index) => Ok(pairs.remove(index).1),
            None => Err(NavError::NotFound),
        },
        PlistValue::Array(items) => {
            let index: usize = last.parse().map_err(|_| NavError::NotFound)?;
            if index < items.len() {
                Ok(items.remove(index))
            } else {
                Err(NavError::NotFound)
            }
        }
        _ => Err(NavError::NotFound),
    }
}

fn step<'a>(value: &'a PlistValue, component: &str) -> Option<&'a PlistValue> {
    match value {
        PlistValue::Dict(_) => value.dict_get(component),
        PlistValue::Array(items) => component
            .parse::<usize>()
            .ok()
            .and_then(|index| items.get(index)),
        _ => None,
    }
}

fn step_mut<'a>(value: &'a mut PlistValue, component: &str) -> Option<&'a mut PlistValue> {
    match value {
        PlistValue::Dict(pairs) => pairs
            .iter_mut()
            .find(|(key, _)| key == component)
            .map(|(_, val)| val),
        PlistValue::Array(items) => component
            .parse::<usize>()
            .ok()
            .and_then(move |index| items.get_mut(index)),
        _ => None,
    }
}
