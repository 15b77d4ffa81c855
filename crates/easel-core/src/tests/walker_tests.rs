use super::*;
use crate::Declaration;

/// Hands out fresh ids and records every visit as
/// `(label, parent, index, sibling count)`.
#[derive(Default)]
struct Recorder {
    next: NodeId,
    visits: Vec<(String, NodeId, usize, usize)>,
    opaque: Vec<NodeId>,
    fail_on: Option<&'static str>,
}

impl Visitor for Recorder {
    type Error = String;

    fn visit(
        &mut self,
        child: &Child,
        parent: NodeId,
        index: usize,
        siblings: &[Child],
    ) -> Result<Visit, String> {
        let label = match child {
            Child::Element(declaration) => declaration.tag.clone(),
            Child::Text(text) => format!("{text:?}"),
        };
        if self.fail_on == Some(label.as_str()) {
            return Err(label);
        }
        self.visits.push((label, parent, index, siblings.len()));
        match child {
            Child::Element(_) => {
                self.next += 1;
                Ok(Visit::Descend(self.next))
            }
            Child::Text(_) => Ok(Visit::Skip),
        }
    }

    fn is_opaque(&self, node: NodeId) -> bool {
        self.opaque.contains(&node)
    }
}

fn sample() -> Child {
    Declaration::new("div")
        .child(Declaration::new("p").text("a"))
        .child(
            Declaration::new("span")
                .child(Declaration::new("b"))
                .child(Declaration::new("i")),
        )
        .into()
}

fn labels(recorder: &Recorder) -> Vec<&str> {
    recorder
        .visits
        .iter()
        .map(|(label, ..)| label.as_str())
        .collect()
}

#[test]
fn visits_parent_before_children_in_order() {
    let mut recorder = Recorder::default();
    walk_tree(&sample(), 0, &mut recorder).expect("walk");
    assert_eq!(
        recorder.visits,
        vec![
            ("div".to_string(), 0, 0, 1),
            ("p".to_string(), 1, 0, 2),
            ("\"a\"".to_string(), 2, 0, 1),
            ("span".to_string(), 1, 1, 2),
            ("b".to_string(), 3, 0, 2),
            ("i".to_string(), 3, 1, 2),
        ]
    );
}

#[test]
fn opaque_nodes_are_not_descended_into() {
    let mut recorder = Recorder {
        opaque: vec![3],
        ..Recorder::default()
    };
    walk_tree(&sample(), 0, &mut recorder).expect("walk");
    assert_eq!(labels(&recorder), ["div", "p", "\"a\"", "span"]);
}

#[test]
fn skip_stops_descent() {
    struct SkipAll(usize);
    impl Visitor for SkipAll {
        type Error = ();
        fn visit(&mut self, _: &Child, _: NodeId, _: usize, _: &[Child]) -> Result<Visit, ()> {
            self.0 += 1;
            Ok(Visit::Skip)
        }
    }
    let mut visitor = SkipAll(0);
    walk_tree(&sample(), 0, &mut visitor).expect("walk");
    assert_eq!(visitor.0, 1);
}

#[test]
fn errors_stop_the_walk() {
    let mut recorder = Recorder {
        fail_on: Some("p"),
        ..Recorder::default()
    };
    assert_eq!(walk_tree(&sample(), 0, &mut recorder), Err("p".to_string()));
    assert_eq!(labels(&recorder), ["div"]);
}

#[test]
fn walk_passes_the_given_position() {
    let siblings: Vec<Child> = vec![Declaration::new("a").into(), Declaration::new("b").into()];
    let mut recorder = Recorder::default();
    walk(&siblings[1], 7, &mut recorder, 1, &siblings).expect("walk");
    assert_eq!(recorder.visits, vec![("b".to_string(), 7, 1, 2)]);
}
