//! `divvy show` — print one task tree.

use crate::store::TaskStore;
use crate::task::Task;

/// Loads a tree and prints its indented rendering.
///
/// # Errors
///
/// Returns an error string when the tree is missing or unreadable.
pub fn run(store: &TaskStore<'_>, root: &str) -> Result<(), String> {
    crate::ident::validate(root).map_err(|e| format!("invalid identifier '{root}': {e}"))?;
    let tree = store.load(root).map_err(|e| e.to_string())?;
    println!("{}", render_tree(&tree));
    Ok(())
}

/// Renders a tree as indented text, one node per line:
/// `id [status] goal`, children indented two spaces per level.
#[must_use]
pub fn render_tree(tree: &Task) -> String {
    let mut lines = Vec::new();
    render_node(tree, 0, &mut lines);
    lines.join("\n")
}

fn render_node(task: &Task, depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    lines.push(format!("{indent}{} [{}] {}", task.id, task.status, task.goal));
    for child in &task.tasks {
        render_node(child, depth + 1, lines);
    }
}

#[cfg(test)]
mod tests {
    use super::render_tree;
    use crate::task::{Status, Task};

    #[test]
    fn renders_nested_nodes_with_indentation() {
        let mut root = Task::new("proj-x", "Ship it", "a");
        let mut step = Task::new("step-1", "First", "a");
        step.status = Status::Done;
        step.tasks.push(Task::new("step-1a", "Detail", "a"));
        root.tasks.push(step);

        let rendered = render_tree(&root);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "proj-x [init] Ship it");
        assert_eq!(lines[1], "  step-1 [done] First");
        assert_eq!(lines[2], "    step-1a [init] Detail");
    }
}
