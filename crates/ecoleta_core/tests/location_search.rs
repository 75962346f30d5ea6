use ecoleta_core::db::open_db_in_memory;
use ecoleta_core::{
    Location, LocationFilter, LocationService, NewLocation, SqliteLocationRepository,
};
use std::collections::BTreeSet;

fn input(name: &str, city: &str, uf: &str, item_ids: Vec<i64>) -> NewLocation {
    NewLocation {
        name: name.to_string(),
        email: format!("{}@coleta.org", name.to_lowercase().replace(' ', ".")),
        whatsapp: "47999990000".to_string(),
        latitude: -27.2142,
        longitude: -49.6431,
        city: city.to_string(),
        uf: uf.to_string(),
        item_ids,
    }
}

fn filtered(city: &str, uf: &str, item_ids: &[i64]) -> LocationFilter {
    LocationFilter::Filtered {
        city: city.to_string(),
        uf: uf.to_string(),
        item_ids: item_ids.iter().copied().collect::<BTreeSet<_>>(),
    }
}

fn ids(locations: &[Location]) -> Vec<i64> {
    locations.iter().map(|location| location.id).collect()
}

#[test]
fn filtered_search_matches_any_requested_item() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = LocationService::new(SqliteLocationRepository::try_new(&mut conn).unwrap());
    let l1 = service
        .register(&input("Ponto Um", "Rio do Sul", "SC", vec![1]))
        .unwrap();
    let l2 = service
        .register(&input("Ponto Dois", "Rio do Sul", "SC", vec![1, 2]))
        .unwrap();

    let only_batteries = service.search(&filtered("Rio do Sul", "SC", &[2])).unwrap();
    assert_eq!(only_batteries, vec![l2.clone()]);

    let lamps = service.search(&filtered("Rio do Sul", "SC", &[1])).unwrap();
    assert_eq!(ids(&lamps), vec![l1.id, l2.id]);
}

#[test]
fn filtered_search_never_duplicates_a_location() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = LocationService::new(SqliteLocationRepository::try_new(&mut conn).unwrap());
    let l1 = service
        .register(&input("Ponto Um", "Rio do Sul", "SC", vec![1]))
        .unwrap();
    let l2 = service
        .register(&input("Ponto Dois", "Rio do Sul", "SC", vec![1, 2, 3]))
        .unwrap();

    let found = service
        .search(&filtered("Rio do Sul", "SC", &[1, 2, 3]))
        .unwrap();
    assert_eq!(ids(&found), vec![l1.id, l2.id]);
}

#[test]
fn filtered_search_requires_exact_city_and_uf() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = LocationService::new(SqliteLocationRepository::try_new(&mut conn).unwrap());
    let blumenau = service
        .register(&input("Ponto Norte", "Blumenau", "SC", vec![4]))
        .unwrap();
    service
        .register(&input("Ponto Sul", "Blumenau", "PR", vec![4]))
        .unwrap();

    let found = service.search(&filtered("Blumenau", "SC", &[4])).unwrap();
    assert_eq!(ids(&found), vec![blumenau.id]);

    assert!(service
        .search(&filtered("blumenau", "SC", &[4]))
        .unwrap()
        .is_empty());
    assert!(service
        .search(&filtered("Blumenau", "sc", &[4]))
        .unwrap()
        .is_empty());
    assert!(service
        .search(&filtered("Blumenau", "SC", &[5, 6]))
        .unwrap()
        .is_empty());
}

#[test]
fn unfiltered_search_returns_every_location() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = LocationService::new(SqliteLocationRepository::try_new(&mut conn).unwrap());
    assert!(service.search(&LocationFilter::Unfiltered).unwrap().is_empty());

    let a = service
        .register(&input("Ponto A", "Rio do Sul", "SC", vec![1]))
        .unwrap();
    let b = service
        .register(&input("Ponto B", "Curitiba", "PR", vec![2, 5]))
        .unwrap();

    let all = service.search(&LocationFilter::Unfiltered).unwrap();
    assert_eq!(all, vec![a, b]);
}

#[test]
fn filter_built_from_partial_parts_browses_all() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = LocationService::new(SqliteLocationRepository::try_new(&mut conn).unwrap());
    service
        .register(&input("Ponto A", "Rio do Sul", "SC", vec![1]))
        .unwrap();
    service
        .register(&input("Ponto B", "Curitiba", "PR", vec![2]))
        .unwrap();

    let filter = LocationFilter::from_parts(Some("Curitiba".to_string()), None, None);
    assert_eq!(service.search(&filter).unwrap().len(), 2);
}

#[test]
fn filtered_search_with_empty_item_set_matches_nothing() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = LocationService::new(SqliteLocationRepository::try_new(&mut conn).unwrap());
    service
        .register(&input("Ponto A", "Rio do Sul", "SC", vec![1]))
        .unwrap();

    assert!(service
        .search(&filtered("Rio do Sul", "SC", &[]))
        .unwrap()
        .is_empty());
}

#[test]
fn oversized_item_set_searches_without_error() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = LocationService::new(SqliteLocationRepository::try_new(&mut conn).unwrap());
    let l1 = service
        .register(&input("Ponto Um", "Rio do Sul", "SC", vec![1]))
        .unwrap();

    let mut item_ids = vec![1];
    item_ids.extend(1000..41000);

    assert!(service
        .search(&filtered("X", "SC", &item_ids))
        .unwrap()
        .is_empty());
    let found = service
        .search(&filtered("Rio do Sul", "SC", &item_ids))
        .unwrap();
    assert_eq!(ids(&found), vec![l1.id]);
}
