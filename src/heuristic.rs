use crate::{Cost, Point, EDGE_COST};

/// The [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) between two
/// positions scaled by the edge cost. Admissible and consistent for unit-cost moves on a
/// 4-neighbourhood; a Euclidean or Chebyshev estimate would need its own argument.
pub fn manhattan(p1: &Point, p2: &Point) -> Cost {
    p1.manhattan_distance(p2) * EDGE_COST
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetric_and_zero_on_self() {
        let a = Point::new(0, 0);
        let b = Point::new(4, 3);
        assert_eq!(manhattan(&a, &b), 7);
        assert_eq!(manhattan(&b, &a), 7);
        assert_eq!(manhattan(&b, &b), 0);
    }
}
