//! Tool policy: which items are tools, and how they scale attacks and gathers.

use wildcraft_game::Tool;

/// Tool stats for a held item, or `None` if the item is not a tool.
pub fn tool_for_item(item_type: &str) -> Option<Tool> {
    let gather_bonus = match item_type {
        "axe" | "pickaxe" => 2.0,
        "sickle" => 1.5,
        "spear" => 1.0,
        _ => return None,
    };
    Some(Tool {
        tool_type: item_type.to_string(),
        gather_bonus,
    })
}

/// Damage multiplier for an attack made with `tool`.
pub fn attack_multiplier(tool: Option<&Tool>) -> f32 {
    match tool.map(|t| t.tool_type.as_str()) {
        Some("spear") => 2.5,
        Some("axe") => 1.5,
        Some("pickaxe") => 1.2,
        _ => 1.0,
    }
}

/// Whether `tool_type` is the right tool for `node_type`.
pub fn suits(tool_type: &str, node_type: &str) -> bool {
    matches!(
        (tool_type, node_type),
        ("axe", "tree") | ("pickaxe", "rock") | ("sickle", "plant")
    )
}

/// Gather multiplier: the tool's bonus when it suits the node, otherwise 1.
pub fn gather_multiplier(tool: Option<&Tool>, node_type: &str) -> f32 {
    match tool {
        Some(t) if suits(&t.tool_type, node_type) => t.gather_bonus,
        _ => 1.0,
    }
}

/// Preferred tool item for a node type.
pub fn tool_for_node(node_type: &str) -> Option<&'static str> {
    match node_type {
        "tree" => Some("axe"),
        "rock" => Some("pickaxe"),
        "plant" => Some("sickle"),
        _ => None,
    }
}
