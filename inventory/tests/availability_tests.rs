//! Integration tests for the availability service against mock stores.

use chrono::{Duration, NaiveDate, Utc};
use stayhub_inventory::mocks::{
    MockAccessPolicy, MockAvailabilityLedger, MockHotelDirectory, MockRoomCatalog,
};
use stayhub_inventory::providers::{
    AccessPolicy, AvailabilityLedger, CachedAccessPolicy, OwnerOrAdminPolicy,
};
use stayhub_inventory::{
    Actor, AvailabilityService, Hotel, HotelId, HotelRooms, HotelStatus, InventoryConfig,
    InventoryError, Role, Room, RoomId, UserId,
};

type MockService = AvailabilityService<MockAvailabilityLedger, MockRoomCatalog, MockAccessPolicy>;

/// Create a test service plus handles to its mock stores.
fn create_test_service() -> (
    MockService,
    MockAvailabilityLedger,
    MockRoomCatalog,
    MockAccessPolicy,
) {
    let ledger = MockAvailabilityLedger::new();
    let catalog = MockRoomCatalog::new();
    let policy = MockAccessPolicy::new();
    let service = AvailabilityService::new(
        ledger.clone(),
        catalog.clone(),
        policy.clone(),
        InventoryConfig::default(),
    );
    (service, ledger, catalog, policy)
}

/// Seed a room and return it.
#[allow(clippy::unwrap_used)]
fn seed_room(catalog: &MockRoomCatalog, hotel_id: HotelId, quantity: i32, base_price: f64) -> Room {
    let room = Room {
        id: RoomId::new(),
        hotel_id,
        room_type: "Deluxe Double".to_string(),
        quantity,
        max_occupancy: 3,
        base_price,
    };
    catalog.insert_room(room.clone()).unwrap();
    room
}

fn owner_actor() -> Actor {
    Actor::new(UserId::new(), vec![Role::HotelOwner])
}

fn day(offset: i64) -> NaiveDate {
    Utc::now().date_naive() + Duration::days(offset)
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_initialize_writes_full_horizon() {
    let (service, ledger, catalog, _) = create_test_service();
    let room = seed_room(&catalog, HotelId::new(), 2, 100.0);

    service
        .initialize_room_availability(&owner_actor(), room.id, 2)
        .await
        .unwrap();

    // One row per day from today through today + horizon.
    assert_eq!(ledger.row_count().unwrap(), 366);
}

#[tokio::test]
async fn test_initialize_unknown_room_is_not_found() {
    let (service, _, _, _) = create_test_service();
    let missing = RoomId::new();

    let err = service
        .initialize_room_availability(&owner_actor(), missing, 2)
        .await;
    assert_eq!(
        err,
        Err(InventoryError::RoomNotFound { room_id: missing.0 })
    );
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_available_then_sold_out_scenario() {
    let (service, _, catalog, _) = create_test_service();
    let room = seed_room(&catalog, HotelId::new(), 2, 100.0);
    let actor = owner_actor();

    service
        .initialize_room_availability(&actor, room.id, 2)
        .await
        .unwrap();

    // Two guests for tonight: available.
    assert!(service
        .is_room_available(room.id, day(0), day(1), 2)
        .await
        .unwrap());

    // Sell out tonight, same check flips to false.
    service
        .set_availability(&actor, room.id, day(0), 0)
        .await
        .unwrap();
    assert!(!service
        .is_room_available(room.id, day(0), day(1), 2)
        .await
        .unwrap());
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_checkout_night_is_excluded() {
    let (service, _, catalog, _) = create_test_service();
    let room = seed_room(&catalog, HotelId::new(), 1, 100.0);
    let actor = owner_actor();

    // Sell out the checkout date only.
    service
        .set_availability(&actor, room.id, day(3), 0)
        .await
        .unwrap();

    // A stay departing on day 3 does not occupy night 3.
    assert!(service
        .is_room_available(room.id, day(1), day(3), 1)
        .await
        .unwrap());

    // A stay spanning night 3 does.
    assert!(!service
        .is_room_available(room.id, day(1), day(4), 1)
        .await
        .unwrap());
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_no_ledger_rows_means_available() {
    let (service, ledger, catalog, _) = create_test_service();
    let room = seed_room(&catalog, HotelId::new(), 2, 100.0);

    // No initialization, no rows at all.
    assert_eq!(ledger.row_count().unwrap(), 0);
    assert!(service
        .is_room_available(room.id, day(10), day(12), 2)
        .await
        .unwrap());
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_unknown_room_is_unavailable_not_error() {
    let (service, _, _, _) = create_test_service();

    assert!(!service
        .is_room_available(RoomId::new(), day(1), day(2), 1)
        .await
        .unwrap());
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_occupancy_filter() {
    let (service, _, catalog, _) = create_test_service();
    let room = seed_room(&catalog, HotelId::new(), 5, 100.0);

    // max_occupancy is 3.
    assert!(!service
        .is_room_available(room.id, day(1), day(2), 4)
        .await
        .unwrap());
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_block_unblock_round_trip() {
    let (service, _, catalog, _) = create_test_service();
    let room = seed_room(&catalog, HotelId::new(), 3, 100.0);
    let actor = owner_actor();

    service
        .block_dates(
            &actor,
            room.id,
            day(5),
            day(8),
            Some("renovation".to_string()),
        )
        .await
        .unwrap();

    let calendar = service
        .get_availability_calendar(room.id, day(5), day(7))
        .await
        .unwrap();
    assert!(calendar
        .iter()
        .all(|d| d.is_blocked && d.available_count == 0));
    assert_eq!(calendar[0].block_reason.as_deref(), Some("renovation"));

    service
        .unblock_dates(&actor, room.id, day(5), day(8))
        .await
        .unwrap();

    let calendar = service
        .get_availability_calendar(room.id, day(5), day(7))
        .await
        .unwrap();
    assert!(calendar
        .iter()
        .all(|d| !d.is_blocked && d.available_count == 3 && d.block_reason.is_none()));
}

#[tokio::test]
async fn test_block_rejects_empty_range() {
    let (service, _, catalog, _) = create_test_service();
    let room = seed_room(&catalog, HotelId::new(), 3, 100.0);
    let actor = owner_actor();

    // start == end is an error, not a silent no-op.
    let result = service
        .block_dates(&actor, room.id, day(5), day(5), None)
        .await;
    assert!(matches!(result, Err(InventoryError::InvalidRange { .. })));

    let result = service.unblock_dates(&actor, room.id, day(6), day(5)).await;
    assert!(matches!(result, Err(InventoryError::InvalidRange { .. })));
}

#[tokio::test]
async fn test_block_unknown_room_is_not_found() {
    let (service, _, _, _) = create_test_service();
    let missing = RoomId::new();

    let result = service
        .block_dates(&owner_actor(), missing, day(1), day(2), None)
        .await;
    assert_eq!(
        result,
        Err(InventoryError::RoomNotFound { room_id: missing.0 })
    );
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_set_availability_capacity_bound() {
    let (service, ledger, catalog, _) = create_test_service();
    let room = seed_room(&catalog, HotelId::new(), 3, 100.0);
    let actor = owner_actor();

    for bad in [-1, 4] {
        let result = service
            .set_availability(&actor, room.id, day(1), bad)
            .await;
        assert!(matches!(result, Err(InventoryError::InvalidRange { .. })));
    }
    // Rejected writes leave no row behind.
    assert_eq!(ledger.row_count().unwrap(), 0);

    service
        .set_availability(&actor, room.id, day(1), 3)
        .await
        .unwrap();
    let row = ledger.get(room.id, day(1)).await.unwrap().unwrap();
    assert_eq!(row.available_count, 3);
    assert!(!row.is_blocked);
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_set_availability_zero_derives_block_flag() {
    let (service, ledger, catalog, _) = create_test_service();
    let room = seed_room(&catalog, HotelId::new(), 3, 100.0);

    service
        .set_availability(&owner_actor(), room.id, day(1), 0)
        .await
        .unwrap();

    let row = ledger.get(room.id, day(1)).await.unwrap().unwrap();
    assert!(row.is_blocked);
    assert_eq!(row.available_count, 0);
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_calendar_fills_gaps_with_default() {
    let (service, _, catalog, _) = create_test_service();
    let room = seed_room(&catalog, HotelId::new(), 4, 100.0);
    let actor = owner_actor();

    // Only day 2 has a materialized row.
    service
        .set_availability(&actor, room.id, day(2), 1)
        .await
        .unwrap();

    let calendar = service
        .get_availability_calendar(room.id, day(1), day(3))
        .await
        .unwrap();
    assert_eq!(calendar.len(), 3);
    assert_eq!(calendar[0].available_count, 4);
    assert_eq!(calendar[1].available_count, 1);
    assert_eq!(calendar[2].available_count, 4);
    assert!(calendar.iter().all(|d| d.total_count == 4));
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_get_available_rooms_naive_path() {
    let (service, _, catalog, _) = create_test_service();
    let hotel_id = HotelId::new();
    let open = seed_room(&catalog, hotel_id, 2, 80.0);
    let sold = seed_room(&catalog, hotel_id, 2, 60.0);
    let actor = owner_actor();

    service
        .set_availability(&actor, sold.id, day(1), 0)
        .await
        .unwrap();

    let rooms = service
        .get_available_rooms(hotel_id, day(1), day(3), 2)
        .await
        .unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].id, open.id);
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_batch_check_matches_metadata_and_ledger() {
    let (service, _, catalog, _) = create_test_service();
    let hotel_id = HotelId::new();
    let open = seed_room(&catalog, hotel_id, 2, 80.0);
    let sold = seed_room(&catalog, hotel_id, 2, 60.0);
    let small = seed_room(&catalog, hotel_id, 2, 40.0); // occupancy 3 < 4 guests
    let unknown = RoomId::new();
    let actor = owner_actor();

    service
        .set_availability(&actor, sold.id, day(2), 0)
        .await
        .unwrap();

    let snapshots = service
        .batch_check_room_availability(&[open.id, sold.id, small.id, unknown], day(1), day(4), 2)
        .await
        .unwrap();

    assert!(snapshots[&open.id].is_available);
    assert!(!snapshots[&sold.id].is_available);
    assert!(snapshots[&small.id].is_available);
    assert!(!snapshots.contains_key(&unknown));

    // Same inputs, four guests: the small room falls to the occupancy filter.
    let snapshots = service
        .batch_check_room_availability(&[open.id, small.id], day(1), day(4), 4)
        .await
        .unwrap();
    assert!(!snapshots[&small.id].is_available);
    assert!(!snapshots[&open.id].is_available);
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_hotels_with_availability_regroups_and_takes_min_price() {
    let (service, _, catalog, _) = create_test_service();
    let actor = owner_actor();

    let hotel_a = HotelId::new();
    let a_cheap = seed_room(&catalog, hotel_a, 2, 50.0);
    let a_pricey = seed_room(&catalog, hotel_a, 2, 90.0);

    let hotel_b = HotelId::new();
    let b_only = seed_room(&catalog, hotel_b, 1, 70.0);

    // Hotel B's only room is sold out for the stay.
    service
        .set_availability(&actor, b_only.id, day(1), 0)
        .await
        .unwrap();

    let hotels = vec![
        HotelRooms {
            hotel_id: hotel_a,
            rooms: vec![a_cheap.clone(), a_pricey.clone()],
        },
        HotelRooms {
            hotel_id: hotel_b,
            rooms: vec![b_only.clone()],
        },
    ];

    let result = service
        .hotels_with_availability(&hotels, day(1), day(3), 2)
        .await
        .unwrap();

    assert_eq!(result.len(), 1);
    assert!((result[&hotel_a].min_base_price - 50.0).abs() < f64::EPSILON);
    assert!(!result.contains_key(&hotel_b));
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_write_paths_enforce_access_policy() {
    let (service, _, catalog, policy) = create_test_service();
    let room = seed_room(&catalog, HotelId::new(), 2, 100.0);

    let denied = owner_actor();
    policy.deny(denied.user_id).unwrap();

    let result = service
        .block_dates(&denied, room.id, day(1), day(2), None)
        .await;
    assert!(matches!(result, Err(InventoryError::Forbidden { .. })));

    let result = service.set_availability(&denied, room.id, day(1), 1).await;
    assert!(matches!(result, Err(InventoryError::Forbidden { .. })));

    // Re-initialization overwrites blocks, so it is gated the same way.
    let result = service
        .initialize_room_availability(&denied, room.id, 2)
        .await;
    assert!(matches!(result, Err(InventoryError::Forbidden { .. })));
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_owner_or_admin_policy() {
    let catalog = MockRoomCatalog::new();
    let directory = MockHotelDirectory::new();

    let owner = UserId::new();
    let hotel = Hotel {
        id: HotelId::new(),
        owner_id: owner,
        name: "Harbor View".to_string(),
        city: "mumbai".to_string(),
        status: HotelStatus::Approved,
        hotel_type: "HOTEL".to_string(),
    };
    directory.insert_hotel(hotel.clone()).unwrap();
    let room = seed_room(&catalog, hotel.id, 2, 100.0);

    let policy = OwnerOrAdminPolicy::new(catalog, directory);

    let owning_actor = Actor::new(owner, vec![Role::HotelOwner]);
    assert!(policy
        .authorize_room_write(&owning_actor, room.id)
        .await
        .is_ok());

    let stranger = Actor::new(UserId::new(), vec![Role::HotelOwner]);
    assert!(matches!(
        policy.authorize_room_write(&stranger, room.id).await,
        Err(InventoryError::Forbidden { .. })
    ));

    let admin = Actor::new(UserId::new(), vec![Role::Admin]);
    assert!(policy.authorize_room_write(&admin, room.id).await.is_ok());
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_cached_policy_memoizes_and_invalidates() {
    let inner = MockAccessPolicy::new();
    let cached = CachedAccessPolicy::new(
        inner.clone(),
        std::time::Duration::from_secs(60),
        128,
    );

    let actor = owner_actor();
    let room_id = RoomId::new();

    for _ in 0..5 {
        cached.authorize_room_write(&actor, room_id).await.unwrap();
    }
    assert_eq!(inner.check_count(), 1);

    // Invalidation forces a fresh decision.
    cached.invalidate_actor(actor.user_id).unwrap();
    cached.authorize_room_write(&actor, room_id).await.unwrap();
    assert_eq!(inner.check_count(), 2);
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_cached_policy_expires_entries() {
    let inner = MockAccessPolicy::new();
    let cached = CachedAccessPolicy::new(
        inner.clone(),
        std::time::Duration::from_millis(10),
        128,
    );

    let actor = owner_actor();
    let room_id = RoomId::new();

    cached.authorize_room_write(&actor, room_id).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(25)).await;
    cached.authorize_room_write(&actor, room_id).await.unwrap();

    assert_eq!(inner.check_count(), 2);
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_cached_policy_caches_denials() {
    let inner = MockAccessPolicy::new();
    let cached = CachedAccessPolicy::new(
        inner.clone(),
        std::time::Duration::from_secs(60),
        128,
    );

    let actor = owner_actor();
    inner.deny(actor.user_id).unwrap();
    let room_id = RoomId::new();

    for _ in 0..3 {
        let result = cached.authorize_room_write(&actor, room_id).await;
        assert!(matches!(result, Err(InventoryError::Forbidden { .. })));
    }
    assert_eq!(inner.check_count(), 1);
}
