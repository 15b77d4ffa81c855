use super::*;
use crate::{AttrValue, Attrs};

#[test]
fn sweep_releases_detached_nodes_and_their_entries() {
    let mut dom = Dom::new();
    let node = dom.document_mut().create_element("div");
    let child = dom.document_mut().create_text("x");
    dom.document_mut().append_child(node, child).expect("append");
    dom.tables_mut().set_attrs(node, Attrs::default());
    dom.data_mut().set(node, AttrValue::from("payload"));

    dom.schedule_release(node);
    dom.sweep();

    assert!(dom.document().is_empty());
    assert_eq!(dom.tables().tracked(), 0);
    assert!(dom.data().get(node).is_none());
}

#[test]
fn sweep_keeps_reattached_nodes() {
    let mut dom = Dom::new();
    let root = dom.document_mut().create_element("body");
    let node = dom.document_mut().create_element("p");
    dom.schedule_release(node);
    dom.document_mut().append_child(root, node).expect("append");

    dom.sweep();

    assert!(dom.document().contains(node));
    assert_eq!(dom.document().parent(node), Ok(Some(root)));
}

#[test]
fn sweep_skips_nodes_that_are_already_gone() {
    let mut dom = Dom::new();
    let parent = dom.document_mut().create_element("ul");
    let item = dom.document_mut().create_element("li");
    dom.document_mut().append_child(parent, item).expect("append");
    let other = dom.document_mut().create_element("p");

    // `item` goes with its parent, so its own entry finds nothing to free.
    dom.schedule_release(parent);
    dom.schedule_release(item);
    dom.schedule_release(item);
    dom.schedule_release(other);
    dom.sweep();

    assert!(dom.document().is_empty());

    dom.sweep();
    assert!(dom.document().is_empty());
}
