//! Ordering options shared by the shaping transforms.

use serde::Serialize;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum OrderDirection {
    /// Ascending (smallest first)
    #[default]
    Ascending,
    /// Descending (largest first)
    Descending,
}

impl OrderDirection {
    /// Apply the direction to an ascending comparison result.
    pub fn apply(self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            OrderDirection::Ascending => ordering,
            OrderDirection::Descending => ordering.reverse(),
        }
    }
}

/// Ordering by a named column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ordering {
    /// Column to order by
    pub by: &'static str,
    /// Sort direction
    pub direction: OrderDirection,
}

impl Ordering {
    /// Order by `column`, ascending.
    pub const fn by(column: &'static str) -> Self {
        Self {
            by: column,
            direction: OrderDirection::Ascending,
        }
    }

    /// Set sort direction to ascending
    pub const fn ascending(mut self) -> Self {
        self.direction = OrderDirection::Ascending;
        self
    }

    /// Set sort direction to descending
    pub const fn descending(mut self) -> Self {
        self.direction = OrderDirection::Descending;
        self
    }
}
