use datastore::timestamp::to_date_string;
use datastore::{
	Datastore,
	DatastoreError,
	EventChanges,
	MemoryDatastore,
	NewEventRow,
	NewResourceRow,
};
use uuid::Uuid;

fn new_resource(name: &str, display_color: i32) -> NewResourceRow {
	NewResourceRow {
		name: name.to_string(),
		kind: "Grid".to_string(),
		generation: "5".to_string(),
		display_color,
		note: String::new(),
	}
}

fn new_event(resource_id: i32, start: i64, end: i64) -> NewEventRow {
	NewEventRow {
		title: "calibration run".to_string(),
		start: to_date_string(start).unwrap(),
		end: to_date_string(end).unwrap(),
		color: "#aa4433".to_string(),
		resource_id,
		user_id: Uuid::nil(),
	}
}

#[tokio::test]
async fn rows_are_listed_most_recent_first() {
	let store = MemoryDatastore::default();

	store.insert_resource(new_resource("older", 0)).await.unwrap();
	store.insert_resource(new_resource("newer", 1)).await.unwrap();

	let rows = store.list_resources().await.unwrap();

	assert_eq!(rows[0].name, "newer");
	assert_eq!(rows[1].name, "older");
}

#[tokio::test]
async fn duplicate_display_colors_are_rejected() {
	let store = MemoryDatastore::default();

	store.insert_resource(new_resource("first", 0)).await.unwrap();

	let result = store.insert_resource(new_resource("second", 0)).await;

	assert!(matches!(
		result,
		Err(DatastoreError::UniqueViolation { .. })
	));
}

#[tokio::test]
async fn events_need_an_existing_resource() {
	let store = MemoryDatastore::default();

	let result = store.insert_event(new_event(7, 0, 3_600_000)).await;

	assert!(matches!(
		result,
		Err(DatastoreError::ForeignKeyViolation { .. })
	));
}

#[tokio::test]
async fn a_referenced_resource_cannot_be_deleted() {
	let store = MemoryDatastore::default();

	let resource =
		store.insert_resource(new_resource("analyzer", 0)).await.unwrap();
	store.insert_event(new_event(resource.id, 0, 3_600_000)).await.unwrap();

	let result = store.delete_resource(resource.id).await;

	assert!(matches!(
		result,
		Err(DatastoreError::ForeignKeyViolation { .. })
	));

	let event = store.list_events(None).await.unwrap().remove(0);
	store.delete_event(event.id).await.unwrap();

	store.delete_resource(resource.id).await.unwrap();
}

#[tokio::test]
async fn overlapping_windows_are_excluded() {
	let store = MemoryDatastore::default();

	let resource =
		store.insert_resource(new_resource("analyzer", 0)).await.unwrap();
	let existing = store
		.insert_event(new_event(resource.id, 100_000, 200_000))
		.await
		.unwrap();

	let result =
		store.insert_event(new_event(resource.id, 150_000, 250_000)).await;

	match result {
		Err(DatastoreError::ExclusionViolation { conflicting_id, .. }) => {
			assert_eq!(conflicting_id, existing.id);
		},
		other => panic!("expected an exclusion violation, got {other:?}"),
	}

	// Touching windows are fine, the windows are half open
	store
		.insert_event(new_event(resource.id, 200_000, 300_000))
		.await
		.unwrap();
}

#[tokio::test]
async fn updates_skip_their_own_window() {
	let store = MemoryDatastore::default();

	let resource =
		store.insert_resource(new_resource("analyzer", 0)).await.unwrap();
	let event = store
		.insert_event(new_event(resource.id, 100_000, 200_000))
		.await
		.unwrap();

	let changes = EventChanges {
		start: Some(to_date_string(150_000).unwrap()),
		end: Some(to_date_string(250_000).unwrap()),
		..EventChanges::default()
	};

	let updated = store.update_event(event.id, changes).await.unwrap();

	assert_eq!(updated.start, to_date_string(150_000).unwrap());
}

#[tokio::test]
async fn the_window_filter_is_inclusive_of_the_bound() {
	let store = MemoryDatastore::default();

	let resource =
		store.insert_resource(new_resource("analyzer", 0)).await.unwrap();
	store
		.insert_event(new_event(resource.id, 100_000, 200_000))
		.await
		.unwrap();

	assert_eq!(store.list_events(Some(200_000)).await.unwrap().len(), 1);
	assert_eq!(store.list_events(Some(200_001)).await.unwrap().len(), 0);
	assert_eq!(store.list_events(None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn sessions_expire() {
	let store = MemoryDatastore::default();

	let session = store.create_session("test", 3600).await.unwrap();

	assert!(store.get_session(session.id).await.unwrap().is_some());

	let expired = store.create_session("test", 0).await.unwrap();

	assert!(store.get_session(expired.id).await.unwrap().is_none());

	store.delete_session(session.id).await.unwrap();

	assert!(store.get_session(session.id).await.unwrap().is_none());
}

#[tokio::test]
async fn a_username_maps_to_one_user_id() {
	let store = MemoryDatastore::default();

	let first = store.create_session("test", 3600).await.unwrap();
	let second = store.create_session("test", 3600).await.unwrap();
	let other = store.create_session("other", 3600).await.unwrap();

	assert_eq!(first.user_id, second.user_id);
	assert_ne!(first.user_id, other.user_id);
}
