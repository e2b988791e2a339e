use super::*;

fn leaf(key: i32, black: bool) -> Box<Node<i32, i32>> {
    let mut node = Box::new(Node::new(key, key * 10));
    node.black = black;
    node
}

fn join(
    key: i32,
    black: bool,
    left: Option<Box<Node<i32, i32>>>,
    right: Option<Box<Node<i32, i32>>>,
) -> Box<Node<i32, i32>> {
    let mut node = leaf(key, black);
    node.left = left;
    node.right = right;
    node.update_size();
    node
}

fn build(keys: &[i32]) -> Option<Box<Node<i32, i32>>> {
    let mut root = None;
    for key in keys.iter() {
        let (mut node, _) = put(root.take(), *key, key * 10);
        node.set_black();
        root = Some(node);
    }
    root
}

// pre-order snapshot of (key, black, size)
fn shape(node: Option<&Node<i32, i32>>, acc: &mut Vec<(i32, bool, usize)>) {
    if let Some(node) = node {
        acc.push((node.key, node.black, node.size));
        shape(node.as_left_ref(), acc);
        shape(node.as_right_ref(), acc);
    }
}

#[test]
fn test_is_red() {
    assert!(!is_red::<i32, i32>(None));
    assert!(is_black::<i32, i32>(None));
    assert!(is_red(Some(&*leaf(1, false))));
    assert!(!is_red(Some(&*leaf(1, true))));
}

#[test]
fn test_rotate_left() {
    let node = join(1, true, None, Some(leaf(2, false)));
    let x = rotate_left(node);

    assert_eq!(x.key, 2);
    assert!(x.is_black());
    assert_eq!(x.size, 2);
    let left = x.as_left_ref().unwrap();
    assert_eq!(left.key, 1);
    assert!(!left.is_black());
    assert_eq!(left.size, 1);
    assert!(x.right.is_none());
}

#[test]
fn test_rotate_right() {
    let node = join(2, true, Some(leaf(1, false)), Some(leaf(3, true)));
    let x = rotate_right(node);

    assert_eq!(x.key, 1);
    assert!(x.is_black());
    assert_eq!(x.size, 3);
    let right = x.as_right_ref().unwrap();
    assert_eq!(right.key, 2);
    assert!(!right.is_black());
    assert_eq!(right.size, 2);
    assert_eq!(right.as_right_ref().unwrap().key, 3);
}

#[test]
#[should_panic(expected = "rotating a black link")]
fn test_rotate_black_link() {
    let node = join(1, true, None, Some(leaf(2, true)));
    rotate_left(node);
}

#[test]
fn test_flip() {
    let mut node = join(2, true, Some(leaf(1, false)), Some(leaf(3, false)));
    flip(&mut node);
    assert!(!node.is_black());
    assert!(node.as_left_ref().unwrap().is_black());
    assert!(node.as_right_ref().unwrap().is_black());

    flip(&mut node);
    assert!(node.is_black());
    assert!(!node.as_left_ref().unwrap().is_black());
    assert!(!node.as_right_ref().unwrap().is_black());
}

#[test]
fn test_move_red_left() {
    // no rotation when right.left is black
    let node = join(2, false, Some(leaf(1, true)), Some(leaf(3, true)));
    let node = move_red_left(node);
    assert_eq!(node.key, 2);
    assert!(node.is_black());
    assert!(!node.as_left_ref().unwrap().is_black());
    assert!(!node.as_right_ref().unwrap().is_black());

    // borrow from the right sibling
    let right = join(4, true, Some(leaf(3, false)), None);
    let node = join(2, false, Some(leaf(1, true)), Some(right));
    let node = move_red_left(node);

    let mut acc = vec![];
    shape(Some(&*node), &mut acc);
    assert_eq!(acc, vec![(3, false, 4), (2, true, 2), (1, false, 1), (4, true, 1)]);
}

#[test]
fn test_move_red_right() {
    // no rotation when left.left is black
    let node = join(2, false, Some(leaf(1, true)), Some(leaf(3, true)));
    let node = move_red_right(node);
    assert_eq!(node.key, 2);
    assert!(node.is_black());

    // borrow from the left sibling
    let left = join(2, true, Some(leaf(1, false)), None);
    let node = join(3, false, Some(left), Some(leaf(4, true)));
    let node = move_red_right(node);

    let mut acc = vec![];
    shape(Some(&*node), &mut acc);
    assert_eq!(acc, vec![(2, false, 4), (1, true, 1), (3, true, 2), (4, false, 1)]);
}

#[test]
fn test_balance() {
    // right leaning red link is rotated to the left
    let node = join(1, true, None, Some(leaf(2, false)));
    let node = balance(node);
    let mut acc = vec![];
    shape(Some(&*node), &mut acc);
    assert_eq!(acc, vec![(2, true, 2), (1, false, 1)]);

    // two reds in a row on the left are split into a 4-node and flipped
    let left = join(2, false, Some(leaf(1, false)), None);
    let node = join(3, true, Some(left), None);
    let node = balance(node);
    let mut acc = vec![];
    shape(Some(&*node), &mut acc);
    assert_eq!(acc, vec![(2, false, 3), (1, true, 1), (3, true, 1)]);
}

#[test]
fn test_walkup() {
    // 4-node is split by a color flip
    let node = join(2, true, Some(leaf(1, false)), Some(leaf(3, false)));
    let node = walkup(node);
    let mut acc = vec![];
    shape(Some(&*node), &mut acc);
    assert_eq!(acc, vec![(2, false, 3), (1, true, 1), (3, true, 1)]);

    // red right link next to a red left link is left for the flip
    let left = join(2, false, Some(leaf(1, false)), None);
    let node = join(3, true, Some(left), Some(leaf(4, false)));
    let node = walkup(node);
    let mut acc = vec![];
    shape(Some(&*node), &mut acc);
    assert_eq!(acc, vec![(2, false, 4), (1, true, 1), (3, true, 2), (4, false, 1)]);
}

#[test]
fn test_balance_after_delete() {
    // left, left-left and right links all red
    let left = join(2, false, Some(leaf(1, false)), None);
    let node = join(3, true, Some(left), Some(leaf(4, false)));
    let node = balance(node);
    let mut acc = vec![];
    shape(Some(&*node), &mut acc);
    assert_eq!(acc, vec![(3, false, 4), (2, true, 2), (1, false, 1), (4, true, 1)]);
}

#[test]
fn test_balance_idempotent() {
    let keys: Vec<i32> = (0..100).collect();
    let root = build(&keys).unwrap();

    let mut before = vec![];
    shape(Some(&*root), &mut before);
    let root = balance(root);
    let mut after = vec![];
    shape(Some(&*root), &mut after);

    assert_eq!(before, after);
}

#[test]
fn test_put() {
    let (node, old) = put(None, 1, 10);
    assert!(old.is_none());
    assert!(!node.is_black());
    assert_eq!(node.size, 1);

    let keys = [5, 3, 8, 1, 4, 7, 9, 2, 6];
    let mut root = build(&keys).unwrap();
    assert_eq!(root.size, keys.len());

    let (mut node, old) = put(Some(root), 4, 400);
    node.set_black();
    assert_eq!(old, Some(40));
    assert_eq!(node.size, keys.len());
    root = node;
    assert_eq!(get(Some(&*root), &4).map(|n| n.value), Some(400));
}

#[test]
fn test_get() {
    let root = build(&[20, 10, 30]);
    assert_eq!(get(root.as_deref(), &10).map(|n| n.value), Some(100));
    assert!(get(root.as_deref(), &15).is_none());
    assert!(get::<i32, i32, i32>(None, &15).is_none());

    let mut root = root;
    if let Some(node) = get_mut(root.as_deref_mut(), &30) {
        node.value = 31;
    }
    assert_eq!(get(root.as_deref(), &30).map(|n| n.value), Some(31));
}

#[test]
fn test_min_max() {
    let root = build(&[50, 20, 80, 10, 90]).unwrap();
    assert_eq!(min(&root).key, 10);
    assert_eq!(max(&root).key, 90);
}

#[test]
fn test_height() {
    assert_eq!(height::<i32, i32>(None), 0);
    assert_eq!(height(Some(&*leaf(1, true))), 1);
    let root = build(&[2, 1, 3]);
    assert_eq!(height(root.as_deref()), 2);
}

#[test]
fn test_floor_ceiling() {
    let keys: Vec<i32> = (1..=10).map(|i| i * 10).collect();
    let root = build(&keys);
    let root = root.as_deref();

    assert_eq!(floor(root, &35).map(|n| n.key), Some(30));
    assert_eq!(floor(root, &40).map(|n| n.key), Some(40));
    assert_eq!(floor(root, &5).map(|n| n.key), None);
    assert_eq!(floor(root, &500).map(|n| n.key), Some(100));

    assert_eq!(ceiling(root, &35).map(|n| n.key), Some(40));
    assert_eq!(ceiling(root, &40).map(|n| n.key), Some(40));
    assert_eq!(ceiling(root, &5).map(|n| n.key), Some(10));
    assert_eq!(ceiling(root, &500).map(|n| n.key), None);
}

#[test]
fn test_select_rank() {
    let keys: Vec<i32> = (0..64).map(|i| i * 2).collect();
    let root = build(&keys);
    let root = root.as_deref();

    for (i, key) in keys.iter().enumerate() {
        assert_eq!(select(root, i).map(|n| n.key), Some(*key));
        assert_eq!(rank(root, key), i);
        assert_eq!(rank(root, &(key + 1)), i + 1);
    }
    assert!(select(root, keys.len()).is_none());
    assert_eq!(rank(root, &-1), 0);
}
