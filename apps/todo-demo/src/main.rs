//! A to-do list behind the router, driven headlessly from `main`.

use linden_core::{
    children, h, props, render, text, use_state, Component, Document, NodeId, PropValue, Props,
    VNode,
};
use linden_router::{router, Location, Route};

/// One list entry. Receives its label as the `text` property and the delete
/// callback as an `onDelete` handler in its bag.
fn todo_item(props: Props) -> VNode {
    let label = match props.get("text") {
        Some(PropValue::Attr(value)) => value.clone(),
        _ => String::new(),
    };
    let mut button_props = Props::new().attr("class", "delete-btn");
    if let Some(on_delete @ PropValue::Handler(_)) = props.get("onDelete") {
        button_props.insert("onclick", on_delete.clone());
    }
    h(
        "li",
        Props::new(),
        children![
            text(label),
            h("button", button_props, children!["Delete"]),
        ],
    )
}

fn todo_list(_props: Props) -> VNode {
    let (todos, set_todos) = use_state(|| {
        vec![
            "Learn Linden".to_string(),
            "Build a to-do app".to_string(),
        ]
    });
    let (input_value, set_input) = use_state(String::new);

    let add_todos = todos.clone();
    let add_value = input_value.clone();
    let add_setter = set_todos.clone();
    let add_input_setter = set_input.clone();
    let handle_add = move |_: &linden_core::Event| {
        if add_value.trim().is_empty() {
            return;
        }
        let mut next = add_todos.clone();
        next.push(add_value.clone());
        add_setter.set(next);
        add_input_setter.set(String::new());
    };

    let items: Vec<VNode> = todos
        .iter()
        .enumerate()
        .map(|(index, todo)| {
            let delete_todos = todos.clone();
            let delete_setter = set_todos.clone();
            let mut item_props = Props::new().attr("text", todo.clone());
            item_props.insert(
                "onDelete",
                PropValue::Handler(linden_core::EventHandler::new(move |_| {
                    let mut next = delete_todos.clone();
                    next.remove(index);
                    delete_setter.set(next);
                })),
            );
            h(Component::new(todo_item), item_props, children![])
        })
        .collect();

    h(
        "div",
        props!(class: "todo-app"),
        children![
            h("h1", Props::new(), children!["My To-Do List"]),
            h(
                "div",
                props!(class: "add-todo"),
                children![
                    h(
                        "input",
                        props!(value: input_value.clone())
                            .attr("type", "text")
                            .on("input", move |event| {
                                set_input.set(event.value.clone().unwrap_or_default())
                            }),
                        children![],
                    ),
                    h(
                        "button",
                        Props::new().on("click", handle_add),
                        children!["Add"],
                    ),
                ],
            ),
            h("ul", Props::new(), children![items]),
        ],
    )
}

fn not_found(_props: Props) -> VNode {
    h("p", props!(class: "missing"), children!["Page not found"])
}

fn find_all(document: &Document, from: NodeId, tag: &str, found: &mut Vec<NodeId>) {
    if document.tag_of(from).as_deref() == Some(tag) {
        found.push(from);
    }
    for child in document.children_of(from) {
        find_all(document, child, tag, found);
    }
}

fn find_tag(document: &Document, from: NodeId, tag: &str) -> Option<NodeId> {
    let mut found = Vec::new();
    find_all(document, from, tag, &mut found);
    found.into_iter().next()
}

fn main() {
    env_logger::init();

    let location = Location::new();
    let routes = vec![
        Route::new("/", Component::new(todo_list)),
        Route::new("*", Component::new(not_found)),
    ];
    let routed = router(location.clone(), routes).expect("route table carries a fallback");

    let document = Document::new();
    let container = document.create_element("app");
    let app = render(routed, &document, container);

    println!("initial:\n{}", document.dump_tree(Some(app.container())));

    // Type into the input and press Add.
    let input = find_tag(&document, container, "input").expect("todo list renders an input");
    document
        .dispatch(input, "input", Some("Walk the dog"))
        .expect("input should be live");
    let add = find_tag(&document, container, "button").expect("the first button is Add");
    document.dispatch(add, "click", None).expect("add button");
    println!("after adding:\n{}", document.dump_tree(Some(app.container())));

    // Delete the first remaining entry.
    let mut buttons = Vec::new();
    find_all(&document, container, "button", &mut buttons);
    let first_delete = buttons
        .into_iter()
        .find(|&button| document.attribute(button, "class").as_deref() == Some("delete-btn"))
        .expect("items render delete buttons");
    document.dispatch(first_delete, "click", None).expect("delete button");
    println!("after deleting:\n{}", document.dump_tree(Some(app.container())));

    // Navigate somewhere unrouted and back.
    location.assign("/nowhere");
    log::info!("navigated to /nowhere");
    println!("fallback:\n{}", document.dump_tree(Some(app.container())));
    location.assign("/");
    println!("home again:\n{}", document.dump_tree(Some(app.container())));
}
