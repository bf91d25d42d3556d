//! 이벤트 모델 통합 테스트
//!
//! - 태그 버킷 공유와 참조 카운트
//! - 필드 값 개수 제한
//! - 가상 필드 `event.tags`

use std::rc::Rc;

use ceelog_core::{CeeError, Context, EVENT_TAGS_FIELD, Event, Field, MAX_VALUES_PER_FIELD, TagBucket};
use proptest::prelude::*;

#[test]
fn sample_event_with_two_valued_field() {
    let ctx = Context::new();
    let mut event = Event::new(&ctx);

    let mut field1 = Field::new();
    field1.set_name("field1").unwrap();
    field1.add_string_value("value1").unwrap();
    field1.add_string_value("value2").unwrap();
    event.add_field(field1).unwrap();
    event.add_string_field("field2", "other").unwrap();

    assert_eq!(event.field("field1").unwrap().value_count(), 2);
    assert_eq!(event.field("field2").unwrap().value_count(), 1);
    let names: Vec<&str> = event.fields().unwrap().names().collect();
    assert_eq!(names, vec!["field1", "field2"]);
}

#[test]
fn tagbucket_shared_between_events_is_freed_with_last_reference() {
    let ctx = Context::new();
    let bucket = TagBucket::new(&ctx);
    bucket.add_tag("login").unwrap();

    let events: Vec<Event> = (0..3)
        .map(|_| {
            let mut e = Event::new(&ctx);
            e.assign_tagbucket(bucket.add_ref()).unwrap();
            e
        })
        .collect();
    assert_eq!(bucket.ref_count(), 4);
    assert!(events.iter().all(|e| e.has_tag("login")));

    drop(events);
    assert_eq!(bucket.ref_count(), 1);
}

#[test]
fn context_is_released_after_all_objects() {
    let ctx = Context::new();
    let weak = Rc::downgrade(&ctx);
    let mut event = Event::new(&ctx);
    event.add_tag("x").unwrap();
    drop(ctx);
    assert!(weak.upgrade().is_some(), "event keeps its context alive");
    drop(event);
    assert!(weak.upgrade().is_none());
}

#[test]
fn event_tags_pseudo_field_reflects_shared_bucket() {
    let ctx = Context::new();
    let bucket = TagBucket::new(&ctx);
    let mut event = Event::new(&ctx);
    event.assign_tagbucket(bucket.add_ref()).unwrap();

    bucket.add_tag("a").unwrap();
    bucket.add_tag("b").unwrap();

    let mut acc = String::new();
    event.field_as_string(EVENT_TAGS_FIELD, &mut acc).unwrap();
    assert_eq!(acc, "a,b");
}

#[test]
fn too_many_values_error_code() {
    let mut field = Field::with_name_value("f", "0").unwrap();
    for i in 1..MAX_VALUES_PER_FIELD {
        field.add_string_value(i.to_string()).unwrap();
    }
    let err = field.add_string_value("x").unwrap_err();
    assert!(matches!(err, CeeError::TooManyValues { .. }));
    assert_eq!(err.code(), -6);
}

proptest! {
    #[test]
    fn has_tag_stable_across_add_ref_and_release(
        tags in proptest::collection::vec("[a-z]{1,8}", 0..10),
        probe in "[a-z]{1,8}",
        refs in 0usize..5,
    ) {
        let ctx = Context::new();
        let bucket = TagBucket::new(&ctx);
        for tag in &tags {
            bucket.add_tag(tag).unwrap();
        }
        let expected = tags.contains(&probe);

        let handles: Vec<TagBucket> = (0..refs).map(|_| bucket.add_ref()).collect();
        prop_assert_eq!(bucket.ref_count(), refs + 1);
        for handle in &handles {
            prop_assert_eq!(handle.has_tag(&probe), expected);
        }
        drop(handles);
        prop_assert_eq!(bucket.ref_count(), 1);
        prop_assert_eq!(bucket.has_tag(&probe), expected);
    }

    #[test]
    fn cursor_visits_every_tag_once(tags in proptest::collection::vec("[a-z]{1,8}", 0..20)) {
        let ctx = Context::new();
        let bucket = TagBucket::new(&ctx);
        for tag in &tags {
            bucket.add_tag(tag).unwrap();
        }

        let mut cursor = None;
        let mut seen = Vec::new();
        while let Some(tag) = bucket.next_tag(&mut cursor) {
            seen.push(tag);
        }
        prop_assert_eq!(seen, tags);
        prop_assert!(cursor.is_none());
    }
}
