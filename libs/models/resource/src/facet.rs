//! Facet filtering over the resource catalog
//!
//! The facet maps are derivative state: their key sets always mirror the
//! distinct `type` and `generation` values present in the catalog. They
//! are rebuilt by [`FacetSelection::reconcile`] on every catalog change
//! and never written to from anywhere else.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Resource;

/// A filter dimension over the catalog
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetKind {
	Types,
	Generations,
}

impl fmt::Display for FacetKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Types => write!(f, "types"),
			Self::Generations => write!(f, "generations"),
		}
	}
}

/// Per-value inclusion flags for both facet dimensions
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct FacetSelection {
	pub types:       BTreeMap<String, bool>,
	pub generations: BTreeMap<String, bool>,
}

impl FacetSelection {
	/// Rebuild the facet maps for a new catalog snapshot
	///
	/// Values appearing for the first time default to included; values no
	/// longer observed in the catalog are pruned. Flags for surviving
	/// values carry over, so reconciling twice against the same catalog is
	/// a no-op.
	#[must_use]
	pub fn reconcile(catalog: &[Resource], previous: &Self) -> Self {
		Self {
			types:       Self::reconcile_dimension(
				catalog.iter().map(|r| &r.kind),
				&previous.types,
			),
			generations: Self::reconcile_dimension(
				catalog.iter().map(|r| &r.generation),
				&previous.generations,
			),
		}
	}

	fn reconcile_dimension<'v>(
		observed: impl Iterator<Item = &'v String>,
		previous: &BTreeMap<String, bool>,
	) -> BTreeMap<String, bool> {
		observed
			.map(|value| {
				let included = previous.get(value).copied().unwrap_or(true);

				(value.clone(), included)
			})
			.collect()
	}

	/// Flip the inclusion flag for a single facet value
	///
	/// Returns false when the value is not part of the catalog; the key
	/// sets are owned by [`reconcile`](Self::reconcile) alone.
	pub fn toggle(
		&mut self,
		kind: FacetKind,
		name: &str,
		checked: bool,
	) -> bool {
		let dimension = match kind {
			FacetKind::Types => &mut self.types,
			FacetKind::Generations => &mut self.generations,
		};

		match dimension.get_mut(name) {
			Some(included) => {
				*included = checked;

				true
			},
			None => false,
		}
	}

	/// Derive the visible subset of the catalog
	///
	/// A resource is visible when both its type flag and its generation
	/// flag are set.
	#[must_use]
	pub fn visible(&self, catalog: &[Resource]) -> Vec<Resource> {
		catalog
			.iter()
			.filter(|r| {
				self.types.get(&r.kind).copied().unwrap_or(false)
					&& self
						.generations
						.get(&r.generation)
						.copied()
						.unwrap_or(false)
			})
			.cloned()
			.collect()
	}
}
