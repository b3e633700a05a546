//! The classic stateful counter, driven headlessly from `main`.

use linden_core::{
    children, h, props, render, text, use_state, Component, Document, NodeId, Props, VNode,
};

fn counter(_props: Props) -> VNode {
    let (count, set_count) = use_state(|| 0);
    h(
        "div",
        props!(class: "counter-container"),
        children![
            h("h1", Props::new(), children!["Counter"]),
            h(
                "p",
                Props::new(),
                children![text(format!("The count is: {count}"))],
            ),
            h(
                "button",
                Props::new().on("click", move |_| set_count.set(count + 1)),
                children!["Increment"],
            ),
        ],
    )
}

fn find_tag(document: &Document, from: NodeId, tag: &str) -> Option<NodeId> {
    if document.tag_of(from).as_deref() == Some(tag) {
        return Some(from);
    }
    document
        .children_of(from)
        .into_iter()
        .find_map(|child| find_tag(document, child, tag))
}

fn main() {
    env_logger::init();

    let document = Document::new();
    let container = document.create_element("app");
    let app = render(Component::new(counter), &document, container);

    println!("initial:\n{}", document.dump_tree(Some(app.container())));

    let button = find_tag(&document, container, "button").expect("counter renders a button");
    for _ in 0..3 {
        document
            .dispatch(button, "click", None)
            .expect("button should be live");
    }

    log::info!("dispatched 3 clicks");
    println!("after three clicks:\n{}", document.dump_tree(Some(app.container())));
}
