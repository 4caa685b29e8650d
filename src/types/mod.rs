//! Shared types used throughout the library.

mod direction;

pub use direction::Direction;

/// The namespace assumed for unqualified resource locations.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Blocks that never get a color entry. The two aliases share the canonical
/// air state ID.
pub const AIR_BLOCKS: [&str; 3] = ["minecraft:air", "minecraft:void_air", "minecraft:cave_air"];

/// Air variants whose state ID is forced to 0.
pub const AIR_ALIASES: [&str; 2] = ["minecraft:void_air", "minecraft:cave_air"];

/// Check if a block name is one of the air blocks.
pub fn is_air(name: &str) -> bool {
    AIR_BLOCKS.contains(&name)
}

/// Remove the `minecraft:` namespace from a resource location.
/// "minecraft:block/stone" -> "block/stone"
/// "mymod:block/custom" -> "mymod:block/custom"
pub fn strip_namespace(location: &str) -> &str {
    location
        .strip_prefix(DEFAULT_NAMESPACE)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(location)
}

/// Split a resource location into namespace and path.
/// "minecraft:block/stone" -> ("minecraft", "block/stone")
/// "block/stone" -> ("minecraft", "block/stone")
pub fn parse_resource_location(location: &str) -> (&str, &str) {
    if let Some((namespace, path)) = location.split_once(':') {
        (namespace, path)
    } else {
        (DEFAULT_NAMESPACE, location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_namespace() {
        assert_eq!(strip_namespace("minecraft:block/stone"), "block/stone");
        assert_eq!(strip_namespace("block/stone"), "block/stone");
        assert_eq!(strip_namespace("mymod:block/custom"), "mymod:block/custom");
        assert_eq!(strip_namespace("minecraftish:x"), "minecraftish:x");
    }

    #[test]
    fn test_parse_resource_location() {
        assert_eq!(
            parse_resource_location("minecraft:block/stone"),
            ("minecraft", "block/stone")
        );
        assert_eq!(
            parse_resource_location("mymod:block/custom"),
            ("mymod", "block/custom")
        );
        assert_eq!(
            parse_resource_location("block/stone"),
            ("minecraft", "block/stone")
        );
    }

    #[test]
    fn test_is_air() {
        assert!(is_air("minecraft:air"));
        assert!(is_air("minecraft:cave_air"));
        assert!(!is_air("minecraft:stone"));
    }
}
