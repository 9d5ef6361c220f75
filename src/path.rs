use crate::grid::Grid;
use crate::node::Mark;
use crate::search::Step;
use crate::{Cost, Point, EDGE_COST};

/// Direction in which a [Path] lists its points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PathOrder {
    #[default]
    StartToEnd,
    EndToStart,
}

/// An optimal path produced by a successful search. Both endpoints are included, so a path
/// between adjacent nodes has two points and a [cost](Self::cost) of one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    points: Vec<Point>,
    order: PathOrder,
}

impl Path {
    /// Builds a path from points listed end first, as they come out of the predecessor walk.
    pub(crate) fn from_trail(mut trail: Vec<Point>, order: PathOrder) -> Path {
        if order == PathOrder::StartToEnd {
            trail.reverse();
        }
        Path {
            points: trail,
            order,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
    pub fn order(&self) -> PathOrder {
        self.order
    }
    /// Number of points, endpoints included.
    pub fn len(&self) -> usize {
        self.points.len()
    }
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
    pub fn first(&self) -> Option<&Point> {
        self.points.first()
    }
    pub fn last(&self) -> Option<&Point> {
        self.points.last()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Number of edges walked, which is also the path cost on a unit-cost grid.
    pub fn cost(&self) -> Cost {
        self.points.len().saturating_sub(1) as Cost * EDGE_COST
    }

    /// Compresses the path to its endpoints and the points where it changes direction. Walking
    /// straight lines between consecutive waypoints gives back the full path.
    pub fn waypoints(&self) -> Vec<Point> {
        let mut waypoints = Vec::new();
        for (i, p) in self.points.iter().enumerate() {
            let turns = match (i.checked_sub(1), self.points.get(i + 1)) {
                (Some(prev), Some(next)) => {
                    let prev = self.points[prev];
                    (p.x - prev.x, p.y - prev.y) != (next.x - p.x, next.y - p.y)
                }
                _ => true,
            };
            if turns {
                waypoints.push(*p);
            }
        }
        waypoints
    }
}

impl IntoIterator for Path {
    type Item = Point;
    type IntoIter = std::vec::IntoIter<Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Walks predecessor links back from `end` until a node without predecessor (the start) is
/// reached. Every node passed on the way, the start included, is marked as [Mark::Path] and
/// reported to `on_step` as [Step::Traced]. Returns the visited positions end first.
pub(crate) fn reconstruct_path<F>(grid: &mut Grid, end: usize, on_step: &mut F) -> Vec<Point>
where
    F: FnMut(&Grid, Step),
{
    let mut trail = vec![grid.point(end)];
    let mut current = end;
    while let Some(prev) = grid.nodes[current].predecessor {
        current = prev;
        grid.nodes[current].mark = Mark::Path;
        let pos = grid.point(current);
        trail.push(pos);
        on_step(grid, Step::Traced(pos));
    }
    trail
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(coords: &[(i32, i32)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn trail_is_reversed_for_start_to_end() {
        let trail = points(&[(0, 2), (0, 1), (0, 0)]);
        let path = Path::from_trail(trail.clone(), PathOrder::StartToEnd);
        assert_eq!(path.first(), Some(&Point::new(0, 0)));
        assert_eq!(path.last(), Some(&Point::new(0, 2)));
        assert_eq!(path.cost(), 2);

        let backwards = Path::from_trail(trail.clone(), PathOrder::EndToStart);
        assert_eq!(backwards.points(), trail.as_slice());
        assert_eq!(backwards.order(), PathOrder::EndToStart);
    }

    #[test]
    fn single_point_costs_nothing() {
        let path = Path::from_trail(points(&[(1, 1)]), PathOrder::StartToEnd);
        assert_eq!(path.len(), 1);
        assert_eq!(path.cost(), 0);
        assert_eq!(path.waypoints(), points(&[(1, 1)]));
    }

    #[test]
    fn waypoints_keep_turns() {
        // S**
        // ..*
        // ..E
        let trail = points(&[(2, 2), (1, 2), (0, 2), (0, 1), (0, 0)]);
        let path = Path::from_trail(trail, PathOrder::StartToEnd);
        assert_eq!(path.waypoints(), points(&[(0, 0), (0, 2), (2, 2)]));
    }

    #[test]
    fn reconstruction_marks_and_reports() {
        let mut grid = Grid::create(3);
        // (0,0) -> (0,1) -> (1,1)
        let (a, b, c) = (0, 1, 4);
        grid.nodes[b].predecessor = Some(a);
        grid.nodes[c].predecessor = Some(b);
        let mut traced = Vec::new();
        let trail = reconstruct_path(&mut grid, c, &mut |_: &Grid, step: Step| traced.push(step));
        assert_eq!(trail, points(&[(1, 1), (0, 1), (0, 0)]));
        assert_eq!(
            traced,
            vec![
                Step::Traced(Point::new(0, 1)),
                Step::Traced(Point::new(0, 0))
            ]
        );
        assert_eq!(grid.nodes[a].mark(), Mark::Path);
        assert_eq!(grid.nodes[b].mark(), Mark::Path);
        assert_eq!(grid.nodes[c].mark(), Mark::Unvisited);
    }
}
