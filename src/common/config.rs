//! Configuration constants for rolodb.

/// Smallest legal minimum degree for a B-tree.
///
/// With `t = 2` every node holds between 1 and 3 entries, which is the
/// smallest shape that still satisfies the B-tree balance rules. Anything
/// below that cannot split or merge correctly:
/// - `t = 0` makes the entry bounds `[-1, -1]`, which is meaningless
/// - `t = 1` allows empty non-root nodes and zero-entry splits
pub const MIN_DEGREE_FLOOR: usize = 2;

/// Default minimum degree used by the contact directory.
///
/// # Node Shape
/// With `t = 3`:
/// - Entries per node: 2 to 5 (root may hold 0 to 5)
/// - Children per internal node: 3 to 6
///
/// Small enough that rebalancing shows up in modest datasets, large enough
/// that a few dozen contacts fit in two levels.
pub const DEFAULT_MIN_DEGREE: usize = 3;

/// Default CSV file for the contact dataset.
pub const DEFAULT_CONTACTS_FILE: &str = "contacts.csv";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_floor_is_two() {
        assert_eq!(MIN_DEGREE_FLOOR, 2);
    }

    #[test]
    fn test_default_degree_above_floor() {
        assert!(DEFAULT_MIN_DEGREE >= MIN_DEGREE_FLOOR);
    }

    #[test]
    fn test_default_node_bounds() {
        // entries per non-root node: [t-1, 2t-1]
        assert_eq!(DEFAULT_MIN_DEGREE - 1, 2);
        assert_eq!(2 * DEFAULT_MIN_DEGREE - 1, 5);
    }
}
