use resource::{PALETTE_SIZE, Palette, Resource};

fn resource_with_color(id: i32, display_color: i32) -> Resource {
	Resource {
		id,
		name: format!("resource {id}"),
		kind: "Grid".to_string(),
		generation: "5".to_string(),
		display_color,
		note: String::new(),
	}
}

#[test]
fn every_index_yields_a_hex_color() {
	let palette = Palette::new(5.0);

	for index in 0..PALETTE_SIZE {
		let color = palette.color(index).unwrap();

		assert_eq!(color.len(), 7);
		assert!(color.starts_with('#'));
	}
}

#[test]
fn palette_colors_are_distinct() {
	let palette = Palette::new(5.0);

	let mut colors: Vec<String> =
		(0..PALETTE_SIZE).filter_map(|index| palette.color(index)).collect();
	colors.sort();
	colors.dedup();

	assert_eq!(colors.len(), PALETTE_SIZE as usize);
}

#[test]
fn indices_outside_the_palette_have_no_color() {
	let palette = Palette::new(5.0);

	assert!(palette.color(-1).is_none());
	assert!(palette.color(PALETTE_SIZE).is_none());
}

#[test]
fn taken_colors_are_not_free() {
	let palette = Palette::new(5.0);
	let catalog =
		vec![resource_with_color(1, 0), resource_with_color(2, 3)];

	let free = palette.free_indices(&catalog, None);

	assert_eq!(free.len(), (PALETTE_SIZE - 2) as usize);
	assert!(!free.contains(&0));
	assert!(!free.contains(&3));
	assert_eq!(palette.first_free(&catalog), Some(1));
}

#[test]
fn an_edited_resource_keeps_access_to_its_own_color() {
	let palette = Palette::new(5.0);
	let catalog = vec![resource_with_color(1, 0)];

	assert!(palette.free_indices(&catalog, Some(0)).contains(&0));
	assert!(!palette.free_indices(&catalog, None).contains(&0));
}

#[test]
fn a_full_catalog_exhausts_the_palette() {
	let palette = Palette::new(5.0);
	let catalog: Vec<Resource> = (0..PALETTE_SIZE)
		.map(|index| resource_with_color(index + 1, index))
		.collect();

	assert!(palette.free_indices(&catalog, None).is_empty());
	assert_eq!(palette.first_free(&catalog), None);
}
