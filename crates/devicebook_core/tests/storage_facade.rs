use devicebook_core::db::open_db_in_memory;
use devicebook_core::{
    BlobRecordRepository, ByteStore, MemoryByteStore, Record, RecordStorage, RepoError,
    SqliteByteStore, StorageFacade,
};
use std::collections::HashSet;

fn memory_facade(store: &MemoryByteStore) -> StorageFacade<BlobRecordRepository<&MemoryByteStore>> {
    StorageFacade::new(BlobRecordRepository::new(store))
}

#[test]
fn imei_walkthrough() {
    let store = MemoryByteStore::new();
    let facade = memory_facade(&store);
    let model_x = Record::new("IMEI1", "Model X");
    let model_y = Record::new("IMEI1", "Model Y");

    assert_eq!(facade.save(&model_x).unwrap(), model_x);

    let err = facade.save(&model_y).unwrap_err();
    assert!(matches!(err, RepoError::AlreadyExists(_)));
    assert_eq!(err.to_string(), "record already exists: IMEI1");

    assert!(!facade.exists(&model_y));
    assert!(facade.exists(&model_x));

    facade.delete(&model_y).unwrap();
    assert!(facade.get_all().is_empty());
}

#[test]
fn save_then_find_by_id_round_trips() {
    let conn = open_db_in_memory().unwrap();
    let facade = StorageFacade::new(BlobRecordRepository::new(SqliteByteStore::new(&conn)));

    for record in [
        Record::new("IMEI1", "Model X"),
        Record::new("IMEI2", "Model X"),
        Record::new("IMEI3", ""),
    ] {
        facade.save(&record).unwrap();
        assert_eq!(facade.find_by_id(&record.id), Some(record));
    }
    assert_eq!(facade.find_by_id("IMEI4"), None);
}

#[test]
fn get_all_returns_every_record() {
    let store = MemoryByteStore::new();
    let facade = memory_facade(&store);
    let records: HashSet<Record> = [
        Record::new("A", "one"),
        Record::new("B", "two"),
        Record::new("C", "two"),
    ]
    .into_iter()
    .collect();

    for record in &records {
        facade.save(record).unwrap();
    }
    assert_eq!(facade.get_all(), records);
}

#[test]
fn rejected_calls_leave_set_unchanged() {
    let store = MemoryByteStore::new();
    let facade = memory_facade(&store);
    facade.save(&Record::new("A", "one")).unwrap();
    let before = facade.get_all();

    assert!(matches!(
        facade.save(&Record::new("A", "two")),
        Err(RepoError::AlreadyExists(_))
    ));
    let err = facade.delete(&Record::new("B", "one")).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(ref id) if id == "B"));
    assert_eq!(err.to_string(), "record not found: B");

    assert_eq!(facade.get_all(), before);
}

#[test]
fn corrupt_blob_yields_empty_results() {
    let store = MemoryByteStore::new();
    store.store("mobiles", b"{ definitely not json").unwrap();
    let facade = memory_facade(&store);

    assert!(facade.get_all().is_empty());
    assert_eq!(facade.find_by_id("IMEI1"), None);
    assert!(!facade.exists(&Record::new("IMEI1", "Model X")));
}

#[test]
fn facades_sharing_a_store_see_each_others_writes() {
    let store = MemoryByteStore::new();
    let writer = memory_facade(&store);
    let reader = memory_facade(&store);

    writer.save(&Record::new("IMEI1", "Model X")).unwrap();
    assert!(reader.exists(&Record::new("IMEI1", "Model X")));
    reader.delete(&Record::new("IMEI1", "Model X")).unwrap();
    assert!(writer.get_all().is_empty());
}
