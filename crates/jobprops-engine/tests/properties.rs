use jobprops_engine::prelude::*;
use jobprops_engine::ErrorKind;
use jobprops_test_utils::{empty_locator_manifest, replicated_job_manifest};
use proptest::prelude::*;

fn key() -> impl Strategy<Value = String> {
    "[a-z][a-z_]{0,7}"
}

fn path() -> impl Strategy<Value = String> {
    proptest::collection::vec(key(), 1..5).prop_map(|keys| keys.join("/"))
}

fn scalar() -> impl Strategy<Value = DynamicValue> {
    prop_oneof![
        any::<i64>().prop_map(DynamicValue::from),
        any::<bool>().prop_map(DynamicValue::from),
        "[a-zA-Z0-9 ._-]{0,16}".prop_map(DynamicValue::from),
    ]
}

proptest! {
    #[test]
    fn prop_locate_selects_every_occurrence(groups in 1..6usize) {
        let mut manifest = replicated_job_manifest("agent", groups);
        let selector = EntitySelector::new(&mut manifest).locate("agent");
        prop_assert!(selector.error().is_none());
        prop_assert_eq!(selector.match_count(), groups);

        let groups_in_order: Vec<_> = selector.matches().iter().map(|index| index.group).collect();
        prop_assert_eq!(groups_in_order, (0..groups).collect::<Vec<_>>());
    }

    #[test]
    fn prop_unique_job_selects_one(groups in 1..6usize, pick in 0..6usize) {
        let pick = pick % groups;
        let mut manifest = replicated_job_manifest("agent", groups);
        let selector = EntitySelector::new(&mut manifest).locate(&format!("sidecar-{pick}"));
        prop_assert!(selector.error().is_none());
        prop_assert_eq!(selector.match_count(), 1);
    }

    #[test]
    fn prop_multiple_matches_fan_out_but_refuse_reads(groups in 2..6usize, value in any::<i64>()) {
        let mut manifest = replicated_job_manifest("agent", groups);
        let mut selector = EntitySelector::new(&mut manifest)
            .locate("agent")
            .add_property("agent/value", value);
        let error = selector.get_int("agent/value").unwrap_err();
        prop_assert_eq!(error.kind(), ErrorKind::MultipleMatchesUnsupported);
        drop(selector);

        let written = manifest
            .jobs()
            .filter(|job| job.name == "agent")
            .filter(|job| {
                job.properties.map_get("agent").and_then(|agent| agent.map_get("value"))
                    == Some(&DynamicValue::from(value))
            })
            .count();
        prop_assert_eq!(written, groups);
    }

    #[test]
    fn prop_set_then_get_round_trips(path in path(), value in scalar()) {
        let mut manifest = empty_locator_manifest();
        let mut selector = EntitySelector::new(&mut manifest)
            .locate("gemfire-locator")
            .add_property(&path, value.clone());
        prop_assert_eq!(selector.get_value(&path), Ok(value.clone()));

        match &value {
            DynamicValue::Scalar(jobprops_value::Scalar::Int(i)) => {
                prop_assert_eq!(selector.get_int(&path), Ok(*i));
            }
            DynamicValue::Scalar(jobprops_value::Scalar::Bool(b)) => {
                prop_assert_eq!(selector.get_bool(&path), Ok(*b));
            }
            DynamicValue::Scalar(jobprops_value::Scalar::String(s)) => {
                prop_assert_eq!(selector.get_string(&path), Ok(s.clone()));
            }
            _ => {}
        }
    }

    #[test]
    fn prop_repeated_set_is_idempotent(path in path(), value in scalar()) {
        let mut once = empty_locator_manifest();
        EntitySelector::new(&mut once)
            .locate("gemfire-locator")
            .add_property(&path, value.clone())
            .into_result()
            .unwrap();

        let mut twice = empty_locator_manifest();
        EntitySelector::new(&mut twice)
            .locate("gemfire-locator")
            .add_property(&path, value.clone())
            .add_property(&path, value)
            .into_result()
            .unwrap();

        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_sequence_index_bounds(len in 0..8usize, index in 0..16usize) {
        let mut manifest = empty_locator_manifest();
        let items: Vec<DynamicValue> = (0..len).map(|i| DynamicValue::from(i64::try_from(i).unwrap())).collect();
        let mut selector = EntitySelector::new(&mut manifest)
            .locate("gemfire-locator")
            .add_property("list/items", items);

        let result = selector.get_int(&format!("list/items/{index}"));
        if index < len {
            prop_assert_eq!(result, Ok(i64::try_from(index).unwrap()));
        } else {
            let error = result.unwrap_err();
            prop_assert_eq!(error.kind(), ErrorKind::IndexOutOfRange);
            let expected = format!("only has {len} values");
            prop_assert!(error.to_string().contains(&expected));
        }
    }
}
