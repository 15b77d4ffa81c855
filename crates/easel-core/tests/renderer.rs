use easel_core::{h, AttrValue, Child, Declaration, Plugins, RenderError, Renderer, RendererConfig};
use easel_testing::{outline, run_test_render, OpLog};

#[test]
fn render_to_string_produces_markup_and_cleans_up() {
    let mut renderer = Renderer::new();
    let markup = renderer
        .render_to_string(h(
            "ul",
            [("class", "menu")],
            [h("li", [("data-id", 1)], ["Home & away"]), h("li", [("data-id", 2)], ["<About>"])],
        ))
        .expect("markup");

    assert_eq!(
        markup,
        r#"<ul class="menu"><li data-id="1">Home &amp; away</li><li data-id="2">&lt;About&gt;</li></ul>"#
    );
    assert!(renderer.document().is_empty());
    assert_eq!(renderer.dom().tables().tracked(), 0);
}

#[test]
fn grouped_attributes_render_as_declarations() {
    let mut renderer = Renderer::new();
    let markup = renderer
        .render_to_string(
            Declaration::new("div")
                .attr("style", AttrValue::group([("width", "300px"), ("height", "200px")])),
        )
        .expect("markup");
    assert_eq!(markup, r#"<div style="width: 300px; height: 200px"></div>"#);
}

#[test]
fn snapshot_container_tag_is_configurable() {
    let mut renderer = Renderer::with_config(RendererConfig::new().snapshot_container_tag("template"));
    assert_eq!(
        renderer.render_to_string("just text").expect("markup"),
        "just text"
    );
}

#[test]
fn render_children_reconciles_the_whole_child_list() {
    let mut renderer = Renderer::new();
    let ops = OpLog::attach(&mut renderer).expect("idle renderer");
    let list = renderer.create_container("ol");
    let items = |labels: &[&str]| -> Vec<Child> {
        labels
            .iter()
            .map(|label| Declaration::new("li").text(*label).into())
            .collect()
    };

    renderer
        .render_children(list, &items(&["a", "b", "c"]))
        .expect("first render");
    let first = renderer.document().child_nodes(list).expect("items").to_vec();
    ops.clear();

    renderer
        .render_children(list, &items(&["a", "x"]))
        .expect("second render");

    assert_eq!(outline(renderer.document(), list).expect("outline"), r#"ol(li("a") li("x"))"#);
    assert_eq!(
        renderer.document().child_nodes(list).expect("items"),
        &first[..2]
    );
    assert_eq!(ops.unmounts(), 1);
    assert_eq!(ops.creates(), 0);

    renderer.render_children(list, &[]).expect("clear");
    assert!(renderer.document().child_nodes(list).expect("items").is_empty());
}

#[test]
fn render_children_validates_the_sequence() {
    let mut renderer = Renderer::new();
    let list = renderer.create_container("p");
    let result = renderer.render_children(list, &[Child::from("a"), Child::from("b")]);
    assert_eq!(
        result,
        Err(RenderError::MalformedDeclaration {
            tag: "p".into(),
            reason: "only one text node is possible",
        })
    );
}

#[test]
fn text_only_children_set_the_text() {
    let mut renderer = Renderer::new();
    let label = renderer.create_container("label");
    renderer
        .render_children(label, &[Child::from("Name")])
        .expect("render");
    assert_eq!(renderer.document().text_content(label).expect("text"), "Name");
}

#[test]
fn empty_pipelines_report_exhaustion() {
    let mut renderer = Renderer::with_plugins(Plugins::empty());
    let target = renderer.create_container("div");
    assert_eq!(
        renderer.render(target, Declaration::new("span")),
        Err(RenderError::PipelineExhausted { pipeline: "create" })
    );
}

#[test]
fn baseline_plugins_render_reserved_names_as_markup() {
    let mut renderer = Renderer::with_plugins(Plugins::baseline());
    let markup = renderer
        .render_to_string(Declaration::new("div").attr("onclick", "go()"))
        .expect("markup");
    assert_eq!(markup, r#"<div onclick="go()"></div>"#);
}

#[test]
fn renderers_do_not_share_state() {
    let mut first = Renderer::new();
    let mut second = Renderer::new();
    let a = first.create_container("div");
    let b = second.create_container("div");
    first.render(a, Declaration::new("p").native()).expect("first");
    second.render(b, Declaration::new("p")).expect("second");

    let p_first = first.document().child_at(a, 0).expect("p").expect("p");
    let p_second = second.document().child_at(b, 0).expect("p").expect("p");
    assert!(first.is_native(p_first));
    assert!(!second.is_native(p_second));
}

#[test]
fn the_test_rule_reuses_installed_content() {
    run_test_render(|rule| {
        rule.set_content(|| h("p", [("class", "x")], ["hi"]).into())
            .expect("render");
        let p = rule.root_node().expect("p");
        rule.rerender().expect("rerender");
        assert_eq!(rule.root_node(), Some(p));
        assert_eq!(rule.html().expect("html"), r#"<p class="x">hi</p>"#);
    });
}
