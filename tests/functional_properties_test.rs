use serde_json::{json, Value};
use small_fx::functional::{SequenceExt, SetExt, ValueKind};
use std::collections::HashSet;

fn samples() -> Vec<Vec<i32>> {
    vec![
        vec![],
        vec![7],
        vec![1, 2, 3, 4],
        vec![5, 5, 1, 5, 2],
        vec![-3, 0, 9, 12, -8, 4],
    ]
}

/// 恆等映射回傳相同元素與順序
#[test]
fn test_identity_map_is_noop() {
    for sequence in samples() {
        assert_eq!(sequence.map_with(|x| *x), sequence);
    }
}

#[test]
fn test_constant_filters() {
    for sequence in samples() {
        assert_eq!(sequence.filter_with(|_| true), sequence);
        assert!(sequence.filter_with(|_| false).is_empty());
    }
}

/// 以單元素序列展平等同於映射
#[test]
fn test_flatten_singletons_equals_map() {
    for sequence in samples() {
        assert_eq!(sequence.flatten_with(|x| vec![*x]), sequence.map_with(|x| *x));
    }
}

#[test]
fn test_first_matching_is_minimum_index() {
    let predicates: [fn(&i32) -> bool; 4] = [
        |x| x % 2 == 0,
        |x| *x > 4,
        |x| *x < -100,
        |_| true,
    ];

    for sequence in samples() {
        for predicate in &predicates {
            let expected = sequence.iter().position(|x| predicate(x)).map(|i| &sequence[i]);
            let found = sequence.first_matching(predicate);

            assert_eq!(found, expected);
            assert_eq!(sequence.contains_matching(predicate), found.is_some());
        }
    }
}

#[test]
fn test_set_map_cardinality() {
    for sequence in samples() {
        let set: HashSet<i32> = sequence.iter().copied().collect();

        let collapsed = set.map_with(|x| x.abs() % 3);
        assert!(collapsed.len() <= set.len());

        let shifted = set.map_with(|x| x + 1);
        assert_eq!(shifted.len(), set.len());
    }
}

#[test]
fn test_worked_examples() {
    let numbers = vec![1, 2, 3, 4];
    assert_eq!(numbers.filter_with(|x| x % 2 == 0), vec![2, 4]);
    assert_eq!(numbers.first_matching(|x| x % 2 == 0), Some(&2));
    assert!(numbers.contains_matching(|x| x % 2 == 0));

    let nested = vec![vec![1, 2], vec![3], vec![]];
    assert_eq!(nested.flatten_with(|inner| inner.clone()), vec![1, 2, 3]);
}

#[test]
fn test_empty_inputs_return_empty_containers() {
    let empty: Vec<Value> = Vec::new();

    assert!(empty.map_with(Value::to_string).is_empty());
    assert!(empty.filter_with(|_| true).is_empty());
    assert!(empty.flatten_with(|v| v.as_array().cloned()).is_empty());
    assert!(empty
        .map_to_dictionary(|v| Some((v.to_string(), v.clone())))
        .is_empty());
    assert!(empty.objects_of_kind(ValueKind::Object).is_empty());
    assert!(empty.objects_of_type::<String>().is_empty());
    assert!(empty.first_matching(|_| true).is_none());
    assert!(!empty.contains_matching(|_| true));

    let empty_set: HashSet<String> = HashSet::new();
    assert!(empty_set.map_with(|s| s.len()).is_empty());
    assert!(empty_set.any_matching(|_| true).is_none());
}

/// 鍵衝突時以最後一個為準
#[test]
fn test_map_to_dictionary_collision_policy() {
    let records = vec![
        json!({"id": "a", "v": 1}),
        json!({"id": "b", "v": 2}),
        json!({"v": 99}),
        json!({"id": "a", "v": 3}),
    ];

    let by_id = records.map_to_dictionary(|r| {
        r.get("id")
            .and_then(Value::as_str)
            .map(|id| (id.to_string(), r["v"].clone()))
    });

    assert_eq!(by_id.len(), 2);
    assert_eq!(by_id["a"], json!(3));
    assert_eq!(by_id["b"], json!(2));
}
