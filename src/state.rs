//! Core state types shared by every component.
//!
//! A source's state is a plain ordered map from item key to item. Using a
//! `BTreeMap` gives deterministic ascending-key iteration, which is what makes
//! diff output and terminal reports reproducible.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Unique identifier of an item within one source's state.
///
/// Keys are assigned by the fetcher and are opaque to the core.
pub type ItemKey = String;

/// Complete key → item snapshot of one source at one instant.
pub type State<T> = BTreeMap<ItemKey, T>;

/// Bounds required of a monitored item type.
///
/// The core never inspects items beyond structural equality (update
/// detection) and serde round-tripping (snapshot persistence). Everything
/// else about the item shape is the fetcher's business.
pub trait Item: Clone + PartialEq + Serialize + DeserializeOwned + Send + 'static {}

impl<T> Item for T where T: Clone + PartialEq + Serialize + DeserializeOwned + Send + 'static {}
