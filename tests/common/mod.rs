//! Shared fixtures for integration tests.

use pathwalk::tree::Node;

pub fn leaf(id: &str) -> Node {
    Node::leaf(id).unwrap()
}

/// root -> {user -> {name: "Sergey", age: "27"},
///          pets -> [{type: "cat", name: "Tom"}, {type: "dog", name: "Rex"}]}
pub fn sample_tree() -> Node {
    let user = Node::object("user", [("name", leaf("Sergey")), ("age", leaf("27"))]).unwrap();
    let tom = Node::object("Tom(obj)", [("type", leaf("cat")), ("name", leaf("Tom"))]).unwrap();
    let rex = Node::object("Rex(obj)", [("type", leaf("dog")), ("name", leaf("Rex"))]).unwrap();
    let pets = Node::array("pets", [tom, rex]).unwrap();
    Node::object("root", [("user", user), ("pets", pets)]).unwrap()
}
