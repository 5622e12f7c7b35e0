use memo_core::db::open_db_in_memory;
use memo_core::{Memo, MemoService, Priority, SqliteMemoRepository};

fn create_with_priorities(
    service: &MemoService<SqliteMemoRepository<'_>>,
    counts: &[(Priority, usize)],
) {
    for (priority, count) in counts {
        for index in 0..*count {
            service
                .create(&Memo::with_priority(
                    format!("{priority} {index}"),
                    None,
                    *priority,
                ))
                .unwrap();
        }
    }
}

#[test]
fn statistics_count_per_priority_and_total() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteMemoRepository::try_new(&mut conn).unwrap();
    let service = MemoService::new(repo);

    create_with_priorities(
        &service,
        &[
            (Priority::High, 3),
            (Priority::Medium, 5),
            (Priority::Low, 2),
            (Priority::None, 1),
        ],
    );

    let stats = service.priority_statistics().unwrap();
    assert_eq!(stats.priority_counts[&Priority::High], 3);
    assert_eq!(stats.priority_counts[&Priority::Medium], 5);
    assert_eq!(stats.priority_counts[&Priority::Low], 2);
    assert_eq!(stats.priority_counts[&Priority::None], 1);
    assert_eq!(stats.total_memos, 11);
    assert_eq!(stats.most_common_priority, Priority::Medium);
}

#[test]
fn statistics_on_empty_storage_default_to_none() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteMemoRepository::try_new(&mut conn).unwrap();
    let service = MemoService::new(repo);

    let stats = service.priority_statistics().unwrap();
    assert_eq!(stats.total_memos, 0);
    assert_eq!(stats.most_common_priority, Priority::None);
    for priority in Priority::ALL {
        assert_eq!(stats.priority_counts[&priority], 0);
    }
}

#[test]
fn statistics_tie_goes_to_the_higher_priority() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteMemoRepository::try_new(&mut conn).unwrap();
    let service = MemoService::new(repo);

    create_with_priorities(&service, &[(Priority::Low, 2), (Priority::High, 2)]);

    let stats = service.priority_statistics().unwrap();
    assert_eq!(stats.most_common_priority, Priority::High);
}

#[test]
fn statistics_serialization_uses_expected_wire_fields() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteMemoRepository::try_new(&mut conn).unwrap();
    let service = MemoService::new(repo);

    create_with_priorities(&service, &[(Priority::High, 1)]);

    let stats = service.priority_statistics().unwrap();
    let json = serde_json::to_value(&stats).unwrap();

    assert_eq!(json["priorityCounts"]["HIGH"], 1);
    assert_eq!(json["priorityCounts"]["NONE"], 0);
    assert_eq!(json["totalMemos"], 1);
    assert_eq!(json["mostCommonPriority"], "HIGH");
}
