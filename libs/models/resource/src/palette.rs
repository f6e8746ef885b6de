//! The fixed display color palette
//!
//! A resource's `display_color` is an index into this palette, never a
//! color value itself. Hex colors are derived by rotating the hue wheel
//! from a configurable base hue, so stored indices survive a re-skin.

use crate::Resource;

/// Number of assignable display colors
pub const PALETTE_SIZE: i32 = 24;

const SATURATION: f32 = 0.55;
const LIGHTNESS: f32 = 0.55;

/// The ordered display color palette
#[derive(Clone, Copy, Debug)]
pub struct Palette {
	base_hue: f32,
}

impl Palette {
	#[must_use]
	pub fn new(base_hue: f32) -> Self { Self { base_hue } }

	/// The css hex color at the given palette index
	#[must_use]
	pub fn color(&self, index: i32) -> Option<String> {
		if !(0..PALETTE_SIZE).contains(&index) {
			return None;
		}

		#[allow(clippy::cast_precision_loss)]
		let step = 360.0 / PALETTE_SIZE as f32;
		#[allow(clippy::cast_precision_loss)]
		let hue = (self.base_hue + index as f32 * step).rem_euclid(360.0);

		Some(hex_of_hue(hue))
	}

	/// Palette indices not used by any resource in the catalog
	///
	/// `keep` names an index that stays available even when taken, so a
	/// resource being edited keeps access to its own current color.
	#[must_use]
	pub fn free_indices(
		&self,
		catalog: &[Resource],
		keep: Option<i32>,
	) -> Vec<i32> {
		(0..PALETTE_SIZE)
			.filter(|index| {
				Some(*index) == keep
					|| !catalog.iter().any(|r| r.display_color == *index)
			})
			.collect()
	}

	/// The first palette index not used by any resource in the catalog
	#[must_use]
	pub fn first_free(&self, catalog: &[Resource]) -> Option<i32> {
		self.free_indices(catalog, None).into_iter().next()
	}
}

/// Convert a hue on the color wheel to a css hex string at the palette's
/// fixed saturation and lightness
fn hex_of_hue(hue: f32) -> String {
	let chroma = (1.0 - (2.0 * LIGHTNESS - 1.0).abs()) * SATURATION;
	let section = hue / 60.0;
	let x = chroma * (1.0 - (section.rem_euclid(2.0) - 1.0).abs());

	let (r, g, b) = match section as u32 {
		0 => (chroma, x, 0.0),
		1 => (x, chroma, 0.0),
		2 => (0.0, chroma, x),
		3 => (0.0, x, chroma),
		4 => (x, 0.0, chroma),
		_ => (chroma, 0.0, x),
	};

	let offset = LIGHTNESS - chroma / 2.0;
	#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
	let channel = |v: f32| ((v + offset) * 255.0).round() as u8;

	format!("#{:02x}{:02x}{:02x}", channel(r), channel(g), channel(b))
}
