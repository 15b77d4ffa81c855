use easel_core::{Declaration, NodeError, RenderError};
use easel_testing::{Op, RenderTestRule};

fn item(label: &str) -> Declaration {
    Declaration::new("li").text(label)
}

fn list(labels: &[&str]) -> Declaration {
    Declaration::new("ul")
        .attr("class", "items")
        .children_from(labels.iter().map(|label| item(label)))
}

#[test]
fn first_render_builds_the_tree() {
    let mut rule = RenderTestRule::new();
    rule.render(list(&["a", "b"])).expect("render");

    assert_eq!(
        rule.html().expect("html"),
        r#"<ul class="items"><li>a</li><li>b</li></ul>"#
    );
    assert_eq!(rule.ops().creates(), 3);
    assert_eq!(rule.ops().mounts(), 3);
    assert_eq!(rule.ops().unmounts(), 0);
}

#[test]
fn rendering_the_same_tree_twice_changes_nothing() {
    let mut rule = RenderTestRule::new();
    rule.set_content(|| list(&["a", "b"]).into())
        .expect("first render");
    let ul = rule.root_node().expect("ul");
    let items = rule.document().child_nodes(ul).expect("items").to_vec();
    let before = rule.html().expect("html");
    rule.ops().clear();

    rule.rerender().expect("second render");

    assert!(rule.ops().is_empty(), "unexpected ops: {:?}", rule.ops().ops());
    assert_eq!(rule.root_node(), Some(ul));
    assert_eq!(rule.document().child_nodes(ul).expect("items"), &items[..]);
    assert_eq!(rule.html().expect("html"), before);
}

#[test]
fn changing_one_attribute_keeps_identity_and_touches_only_it() {
    let mut rule = RenderTestRule::new();
    rule.render(
        Declaration::new("div")
            .attr("id", "main")
            .child(Declaration::new("p").attr("class", "a").text("x")),
    )
    .expect("first render");
    let div = rule.root_node().expect("div");
    let p = rule.document().child_at(div, 0).expect("p").expect("p");
    rule.ops().clear();

    rule.render(
        Declaration::new("div")
            .attr("id", "main")
            .child(Declaration::new("p").attr("class", "b").text("x")),
    )
    .expect("second render");

    assert_eq!(
        rule.ops().ops(),
        vec![Op::SetAttribute {
            node: p,
            name: "class".into(),
            cleared: false,
        }]
    );
    assert_eq!(rule.root_node(), Some(div));
    assert_eq!(rule.document().attribute(p, "class"), Some("b"));
}

#[test]
fn dropped_attributes_are_cleared() {
    let mut rule = RenderTestRule::new();
    rule.render(Declaration::new("input").attr("disabled", true).attr("value", 3))
        .expect("first render");
    let input = rule.root_node().expect("input");
    rule.ops().clear();

    rule.render(Declaration::new("input").attr("value", 3))
        .expect("second render");

    assert_eq!(
        rule.ops().ops(),
        vec![Op::SetAttribute {
            node: input,
            name: "disabled".into(),
            cleared: true,
        }]
    );
    assert_eq!(rule.html().expect("html"), r#"<input value="3">"#);
}

#[test]
fn tag_change_replaces_the_node_in_place() {
    let mut rule = RenderTestRule::new();
    rule.render(list(&["a", "b", "c"])).expect("first render");
    let ul = rule.root_node().expect("ul");
    let old = rule.document().child_nodes(ul).expect("items").to_vec();
    rule.ops().clear();

    rule.render(
        Declaration::new("ul")
            .attr("class", "items")
            .child(item("a"))
            .child(Declaration::new("p").text("b"))
            .child(item("c")),
    )
    .expect("second render");

    let now = rule.document().child_nodes(ul).expect("items").to_vec();
    assert_eq!(now[0], old[0]);
    assert_ne!(now[1], old[1]);
    assert_eq!(now[2], old[2]);
    assert!(rule.ops().ops().contains(&Op::Mount {
        node: now[1],
        parent: ul,
        before: Some(old[2]),
    }));
    assert_eq!(rule.outline().expect("outline"), r#"ul(li("a") p("b") li("c"))"#);
    assert!(!rule.document().contains(old[1]));
}

#[test]
fn tags_match_case_insensitively() {
    let mut rule = RenderTestRule::new();
    rule.render(Declaration::new("DIV")).expect("first render");
    let div = rule.root_node().expect("div");
    rule.ops().clear();

    rule.render(Declaration::new("div")).expect("second render");

    assert_eq!(rule.root_node(), Some(div));
    assert_eq!(rule.ops().creates(), 0);
}

#[test]
fn shrinking_a_list_removes_trailing_children() {
    let mut rule = RenderTestRule::new();
    rule.render(list(&["a", "b", "c"])).expect("first render");
    let ul = rule.root_node().expect("ul");
    let old = rule.document().child_nodes(ul).expect("items").to_vec();
    rule.ops().clear();

    rule.render(list(&["a"])).expect("second render");

    assert_eq!(
        rule.ops().ops(),
        vec![
            Op::Unmount {
                node: old[2],
                parent: ul
            },
            Op::Unmount {
                node: old[1],
                parent: ul
            },
        ]
    );
    assert_eq!(
        rule.html().expect("html"),
        r#"<ul class="items"><li>a</li></ul>"#
    );
}

#[test]
fn removing_one_item_unmounts_exactly_once() {
    let mut rule = RenderTestRule::new();
    rule.render(list(&["a", "b"])).expect("first render");
    rule.ops().clear();

    rule.render(list(&["a"])).expect("second render");

    assert_eq!(rule.ops().unmounts(), 1);
    assert_eq!(rule.ops().creates(), 0);
    assert_eq!(
        rule.html().expect("html"),
        r#"<ul class="items"><li>a</li></ul>"#
    );
}

#[test]
fn growing_a_list_appends() {
    let mut rule = RenderTestRule::new();
    rule.render(list(&["a"])).expect("first render");
    let ul = rule.root_node().expect("ul");
    let first = rule.document().child_at(ul, 0).expect("li").expect("li");
    rule.ops().clear();

    rule.render(list(&["a", "b"])).expect("second render");

    assert_eq!(rule.ops().creates(), 1);
    assert_eq!(rule.document().child_at(ul, 0).expect("li"), Some(first));
    assert_eq!(rule.outline().expect("outline"), r#"ul(li("a") li("b"))"#);
}

#[test]
fn text_updates_in_place_of_the_old_text() {
    let mut rule = RenderTestRule::new();
    rule.render(Declaration::new("p").text("before")).expect("first render");
    let p = rule.root_node().expect("p");
    rule.ops().clear();

    rule.render(Declaration::new("p").text("after")).expect("second render");

    assert_eq!(rule.root_node(), Some(p));
    assert_eq!(rule.document().text_content(p).expect("text"), "after");
    assert_eq!(rule.document().child_nodes(p).expect("children").len(), 1);
    assert!(rule.ops().is_empty());
}

#[test]
fn text_child_is_replaced_by_an_element() {
    let mut rule = RenderTestRule::new();
    rule.render(Declaration::new("p").text("plain")).expect("first render");
    let p = rule.root_node().expect("p");
    let text = rule.document().child_at(p, 0).expect("text").expect("text");

    rule.render(Declaration::new("p").child(Declaration::new("b").text("bold")))
        .expect("second render");

    assert_eq!(rule.outline().expect("outline"), r#"p(b("bold"))"#);
    assert!(rule.ops().ops().contains(&Op::Unmount {
        node: text,
        parent: p
    }));
}

#[test]
fn blank_text_between_children_is_dropped() {
    let mut rule = RenderTestRule::new();
    rule.render(Declaration::new("div").child(Declaration::new("p")))
        .expect("first render");
    let div = rule.root_node().expect("div");
    let p = rule.document().child_at(div, 0).expect("p").expect("p");

    let blank = rule.renderer_mut().document_mut().create_text("\n   ");
    rule.renderer_mut()
        .document_mut()
        .insert_before(div, blank, Some(p))
        .expect("insert blank");

    rule.render(Declaration::new("div").child(Declaration::new("p")))
        .expect("second render");

    assert_eq!(rule.document().child_nodes(div).expect("children"), &[p]);
    assert!(!rule.document().contains(blank));
}

#[test]
fn several_text_children_are_rejected_before_any_mutation() {
    let mut rule = RenderTestRule::new();
    rule.render(list(&["a"])).expect("first render");
    let before = rule.html().expect("html");
    rule.ops().clear();

    let result = rule.render(
        Declaration::new("ul")
            .attr("class", "changed")
            .child(Declaration::new("li").text("a").text("b")),
    );

    assert_eq!(
        result,
        Err(RenderError::MalformedDeclaration {
            tag: "li".into(),
            reason: "only one text node is possible",
        })
    );
    assert!(rule.ops().is_empty());
    assert_eq!(rule.html().expect("html"), before);
}

#[test]
fn text_mixed_with_elements_is_rejected() {
    let mut rule = RenderTestRule::new();
    let result = rule.render(
        Declaration::new("p")
            .text("label")
            .child(Declaration::new("b")),
    );
    assert!(matches!(
        result,
        Err(RenderError::MalformedDeclaration { .. })
    ));
    assert_eq!(rule.root_node(), None);
}

#[test]
fn render_into_something_that_is_not_an_element_fails() {
    let mut rule = RenderTestRule::new();
    let text = rule.renderer_mut().document_mut().create_text("t");
    assert_eq!(
        rule.renderer_mut().render(text, Declaration::new("div")),
        Err(RenderError::InvalidTarget { id: text })
    );
    assert_eq!(
        rule.renderer_mut().render(9_999, Declaration::new("div")),
        Err(RenderError::InvalidTarget { id: 9_999 })
    );
}

#[test]
fn replaced_nodes_are_released_after_the_pass() {
    let mut rule = RenderTestRule::new();
    rule.render(Declaration::new("div").attr("id", "x")).expect("first render");
    let div = rule.root_node().expect("div");
    assert!(rule.renderer().attrs(div).is_some());

    rule.render(Declaration::new("span")).expect("second render");

    assert!(!rule.document().contains(div));
    assert!(rule.renderer().attrs(div).is_none());
    assert_eq!(
        rule.document().parent(div),
        Err(NodeError::Missing { id: div })
    );
}
