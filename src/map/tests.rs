use super::{IdMap, ItemId};
use crate::ErrorKind;
use std::sync::Arc;

#[test]
fn ids_are_one_based_and_dense() {
    let mut map = IdMap::new();

    let a = Arc::new('a');
    let b = Arc::new('b');
    let c = Arc::new('c');

    assert_eq!(map.allocate(a).get(), 1);
    assert_eq!(map.allocate(b).get(), 2);
    assert_eq!(map.allocate(c).get(), 3);
    assert_eq!(map.len(), 3);
}

#[test]
fn release_recycles_the_slot() {
    let mut map = IdMap::new();

    let a = Arc::new('a');
    let b = Arc::new('b');
    let c = Arc::new('c');
    let d = Arc::new('d');

    let id_a = map.allocate(a.clone());
    let id_b = map.allocate(b.clone());
    let id_c = map.allocate(c.clone());

    map.release(&b, id_b).unwrap();

    let id_d = map.allocate(d.clone());
    assert_eq!(id_d, id_b);

    assert!(Arc::ptr_eq(map.lookup(1).unwrap(), &a));
    assert!(Arc::ptr_eq(map.lookup(2).unwrap(), &d));
    assert!(Arc::ptr_eq(map.lookup(3).unwrap(), &c));

    map.release(&a, id_a).unwrap();
    map.release(&c, id_c).unwrap();
    map.release(&d, id_d).unwrap();

    assert!(map.lookup(1).is_none());
    assert!(map.lookup(2).is_none());
    assert!(map.lookup(3).is_none());
    assert!(map.is_empty());
}

#[test]
fn reuse_is_lifo() {
    let mut map = IdMap::new();

    let a = Arc::new('a');
    let b = Arc::new('b');
    let c = Arc::new('c');

    let id_a = map.allocate(a.clone());
    let id_b = map.allocate(b.clone());
    map.allocate(c);

    map.release(&a, id_a).unwrap();
    map.release(&b, id_b).unwrap();

    // most recently freed first
    assert_eq!(map.allocate(Arc::new('d')), id_b);
    assert_eq!(map.allocate(Arc::new('e')), id_a);
}

#[test]
fn ids_are_stable_until_released() {
    let mut map = IdMap::new();

    let nodes: Vec<_> = (0..8u8).map(Arc::new).collect();
    let ids: Vec<_> = nodes.iter().map(|n| map.allocate(n.clone())).collect();

    for i in [1usize, 3, 5] {
        map.release(&nodes[i], ids[i]).unwrap();
    }
    map.allocate(Arc::new(100));
    map.allocate(Arc::new(101));

    for i in [0usize, 2, 4, 6, 7] {
        assert!(Arc::ptr_eq(map.get(ids[i]).unwrap(), &nodes[i]));
    }
}

#[test]
fn table_growth_is_bounded_by_peak() {
    let mut map = IdMap::new();

    for _ in 0..100 {
        let node = Arc::new(0u8);
        let id = map.allocate(node.clone());
        map.release(&node, id).unwrap();
    }
    assert_eq!(map.slot_count(), 1);

    let nodes: Vec<_> = (0..8u8).map(Arc::new).collect();
    let ids: Vec<_> = nodes.iter().map(|n| map.allocate(n.clone())).collect();
    for (node, id) in nodes.iter().zip(&ids) {
        map.release(node, *id).unwrap();
    }
    for _ in 0..10 {
        let batch: Vec<_> = (0..8u8).map(Arc::new).collect();
        let batch_ids: Vec<_> = batch.iter().map(|n| map.allocate(n.clone())).collect();
        for (node, id) in batch.iter().zip(&batch_ids) {
            map.release(node, *id).unwrap();
        }
    }
    assert_eq!(map.slot_count(), 8);
}

#[test]
fn invalid_release_is_rejected_without_damage() {
    let mut map = IdMap::new();

    let a = Arc::new('a');
    let b = Arc::new('b');

    let id_a = map.allocate(a.clone());
    let id_b = map.allocate(b.clone());

    // id never issued
    let stray = ItemId::from_raw(17).unwrap();
    assert_eq!(map.release(&a, stray).unwrap_err().kind(), ErrorKind::InvalidState);

    // id belonging to a different node
    assert_eq!(map.release(&a, id_b).unwrap_err().kind(), ErrorKind::InvalidState);

    // double release
    map.release(&b, id_b).unwrap();
    assert_eq!(map.release(&b, id_b).unwrap_err().kind(), ErrorKind::InvalidState);

    // the table is intact and keeps working
    assert!(Arc::ptr_eq(map.get(id_a).unwrap(), &a));
    assert_eq!(map.allocate(Arc::new('c')), id_b);
    map.release(&a, id_a).unwrap();
    assert!(map.get(id_a).is_none());
}

#[test]
fn zero_is_never_a_handle() {
    let map = IdMap::<Arc<u8>>::new();

    assert!(ItemId::from_raw(0).is_none());
    assert!(map.lookup(0).is_none());
}

#[test]
#[should_panic(expected = "already registered")]
fn duplicate_allocation_panics() {
    let mut map = IdMap::new();

    let node = Arc::new('a');
    map.allocate(node.clone());
    map.allocate(node);
}

#[test]
fn released_node_may_be_allocated_again() {
    let mut map = IdMap::new();

    let node = Arc::new('a');
    let first = map.allocate(node.clone());
    map.release(&node, first).unwrap();

    let second = map.allocate(node.clone());
    assert_eq!(first, second);
    assert!(Arc::ptr_eq(map.get(second).unwrap(), &node));
}
