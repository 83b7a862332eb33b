use std::fmt::Display;

use rand::Rng;

use crate::geometry::Point;
use crate::shape::{DegenerateGeometry, ShapeNode};

// Slack allowed by every geometric test, in coordinate units
pub const TOLERANCE: f64 = 3.0;

// How the two arguments of a rule sit relative to each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    // The first argument lies to the left of the second
    Adjacency,
    // The first argument lies above the second
    Stacking,
    // The first argument lies inside the second
    Containment,
}

impl Relation {
    fn holds(&self, first: &ShapeNode, second: &ShapeNode) -> bool {
        match self {
            Relation::Adjacency => first.end.x - TOLERANCE < second.start.x,
            Relation::Stacking => second.start.y - TOLERANCE < first.end.y,
            Relation::Containment => {
                first.start.x > second.start.x - TOLERANCE
                    && first.start.y - TOLERANCE < second.start.y
                    && first.end.x - TOLERANCE < second.end.x
                    && first.end.y > second.end.y - TOLERANCE
            }
        }
    }

    // Bounding box of the combined node
    fn bounds(&self, first: &ShapeNode, second: &ShapeNode) -> (Point, Point) {
        match self {
            Relation::Adjacency => (
                Point::new(first.start.x, first.start.y.max(second.start.y)),
                Point::new(second.end.x, first.end.y.min(second.end.y)),
            ),
            Relation::Stacking => (first.start, second.end),
            Relation::Containment => (second.start, second.end),
        }
    }

    // Moves the arguments so that the relation holds, with a bit of jitter
    fn arrange<R: Rng + ?Sized>(
        &self,
        first: &mut ShapeNode,
        second: &mut ShapeNode,
        rng: &mut R,
    ) -> Result<(), DegenerateGeometry> {
        match self {
            Relation::Adjacency => {
                let gap = rng.gen_range(1..10) as f64;
                second.shift(first.length() + gap, 0.0);
            }
            Relation::Stacking => {
                // Stretch the shorter argument to the longer one's length
                let (first_length, second_length) = (first.length(), second.length());
                if first_length < second_length {
                    first.check_extent(true, false)?;
                    first.scale(second_length / first_length, 1.0);
                } else {
                    second.check_extent(true, false)?;
                    second.scale(first_length / second_length, 1.0);
                }

                let gap = rng.gen_range(0..3) as f64;
                first.shift(0.0, second.start.y + gap);
            }
            Relation::Containment => {
                second.check_extent(true, true)?;
                second.scale(
                    first.length() / second.length() + 0.8,
                    first.height() / second.height() + 0.8,
                );

                let spare_x = (first.length() - second.length()).abs();
                let spare_y = (first.height() - second.height()).abs();
                let offset_x = spare_x * rng.gen_range(0.5..0.8);
                let offset_y = spare_y * rng.gen_range(0.5..0.8);
                first.shift(
                    second.start.x + offset_x - first.start.x,
                    second.end.y + offset_y - first.end.y,
                );
            }
        }

        Ok(())
    }
}

impl Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Relation::Adjacency => write!(f, "left of"),
            Relation::Stacking => write!(f, "above"),
            Relation::Containment => write!(f, "inside"),
        }
    }
}

// A binary production `start -> first second`, accepted when `relation`
// holds between the two arguments
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub start: String,
    pub first: String,
    pub second: String,
    pub relation: Relation,
}

impl Rule {
    pub fn new(start: &str, first: &str, second: &str, relation: Relation) -> Self {
        Rule {
            start: start.to_string(),
            first: first.to_string(),
            second: second.to_string(),
            relation,
        }
    }

    pub fn matches(&self, first: &ShapeNode, second: &ShapeNode) -> bool {
        first.symbol == self.first
            && second.symbol == self.second
            && self.relation.holds(first, second)
    }

    // Merges two argument nodes into a node for `start`. The inputs are left
    // as they are
    pub fn combine(&self, first: &ShapeNode, second: &ShapeNode) -> ShapeNode {
        let (start, end) = self.relation.bounds(first, second);
        let lines = first.lines.iter().chain(second.lines.iter()).copied().collect();

        ShapeNode::with_bounds(&self.start, lines, start, end)
    }

    // Places freshly generated arguments so the relation holds, then combines
    // them. Only generation goes through here
    pub fn generate_combine<R: Rng + ?Sized>(
        &self,
        mut first: ShapeNode,
        mut second: ShapeNode,
        rng: &mut R,
    ) -> Result<ShapeNode, DegenerateGeometry> {
        self.relation.arrange(&mut first, &mut second, rng)?;
        return Ok(self.combine(&first, &second));
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {} {} ({} {})", self.start, self.first, self.second, self.first, self.relation)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::geometry::Line;

    fn node(symbol: &str, x1: f64, y1: f64, x2: f64, y2: f64) -> ShapeNode {
        ShapeNode::from_line(symbol, Line::from_coords(x1, y1, x2, y2))
    }

    #[test]
    fn adjacent_lines_combine() {
        let rule = Rule::new("dash", "a1", "a1", Relation::Adjacency);
        let left = node("a1", 0.0, 0.0, 10.0, 0.0);
        let right = node("a1", 12.0, 0.0, 22.0, 0.0);

        assert!(rule.matches(&left, &right));
        assert!(!rule.matches(&right, &left));

        let combined = rule.combine(&left, &right);
        assert_eq!(combined.symbol, "dash");
        assert_eq!(combined.start, Point::new(0.0, 0.0));
        assert_eq!(combined.end, Point::new(22.0, 0.0));
        assert_eq!(combined.lines, vec![left.lines[0], right.lines[0]]);
    }

    #[test]
    fn adjacency_tolerates_small_overlap() {
        let rule = Rule::new("dash", "a1", "a1", Relation::Adjacency);
        let left = node("a1", 0.0, 0.0, 10.0, 0.0);

        assert!(rule.matches(&left, &node("a1", 7.5, 0.0, 17.5, 0.0)));
        assert!(!rule.matches(&left, &node("a1", 7.0, 0.0, 17.0, 0.0)));
    }

    #[test]
    fn symbols_must_match() {
        let rule = Rule::new("ear", "a3", "a4", Relation::Adjacency);
        let rising = node("a3", 0.0, 0.0, 10.0, 10.0);
        let falling = node("a4", 30.0, 0.0, 20.0, 10.0);

        assert!(rule.matches(&rising, &falling));
        assert!(!rule.matches(&falling, &rising));
        assert!(!rule.matches(&rising, &node("a3", 20.0, 0.0, 30.0, 10.0)));
    }

    #[test]
    fn adjacency_box_spans_both() {
        let rule = Rule::new("ear", "a3", "a4", Relation::Adjacency);
        let combined = rule.combine(
            &node("a3", 0.0, 0.0, 10.0, 12.0),
            &node("a4", 20.0, -2.0, 11.0, 10.0),
        );

        assert_eq!(combined.start, Point::new(0.0, 12.0));
        assert_eq!(combined.end, Point::new(20.0, -2.0));
    }

    #[test]
    fn stacking_relation() {
        let rule = Rule::new("eye", "ear", "a1", Relation::Stacking);
        let top = node("ear", 0.0, 2.0, 10.0, 12.0);
        let bottom = node("a1", 0.0, 4.0, 10.0, 4.0);

        assert!(rule.matches(&top, &bottom));
        assert!(!rule.matches(&top, &node("a1", 0.0, 5.0, 10.0, 5.0)));

        let combined = rule.combine(&top, &bottom);
        assert_eq!(combined.start, top.start);
        assert_eq!(combined.end, bottom.end);
    }

    #[test]
    fn containment_relation() {
        let rule = Rule::new("face", "inner", "outer", Relation::Containment);
        let outer = ShapeNode::with_bounds("outer", vec![], Point::new(0.0, 20.0), Point::new(20.0, 0.0));
        let inner = ShapeNode::with_bounds("inner", vec![], Point::new(-2.0, 22.0), Point::new(22.0, -2.0));
        let outside = ShapeNode::with_bounds("inner", vec![], Point::new(5.0, 30.0), Point::new(10.0, 24.0));

        assert!(rule.matches(&inner, &outer));
        assert!(!rule.matches(&outside, &outer));

        let combined = rule.combine(&inner, &outer);
        assert_eq!((combined.start, combined.end), (outer.start, outer.end));
    }

    #[test]
    fn generated_adjacency_holds() {
        let rule = Rule::new("ear", "a3", "a4", Relation::Adjacency);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let first = node("a3", 0.0, 0.0, 10.0, 10.0);
            let second = node("a4", 10.0, 0.0, 0.0, 10.0);
            let combined = rule.generate_combine(first, second, &mut rng).unwrap();

            let gap = combined.lines[1].to.x - 10.0;
            assert!((1.0..10.0).contains(&gap));
            assert!(rule.matches(
                &ShapeNode::from_line("a3", combined.lines[0]),
                &ShapeNode::from_line("a4", combined.lines[1])
            ));
        }
    }

    #[test]
    fn generated_stacking_equalises_length() {
        let rule = Rule::new("eye", "ear", "a1", Relation::Stacking);
        let mut rng = StdRng::seed_from_u64(3);
        let ear = ShapeNode::with_bounds(
            "ear",
            vec![Line::from_coords(0.0, 0.0, 10.0, 10.0), Line::from_coords(25.0, 0.0, 15.0, 10.0)],
            Point::new(0.0, 10.0),
            Point::new(25.0, 0.0),
        );
        let mouth = node("a1", 0.0, 0.0, 10.0, 0.0);

        let combined = rule.generate_combine(ear, mouth, &mut rng).unwrap();
        let stretched = combined.lines[2];
        assert_eq!(stretched, Line::from_coords(0.0, 0.0, 25.0, 0.0));
        assert!(combined.lines[0].from.y >= 0.0 && combined.lines[0].from.y < 3.0);
        assert_eq!(combined.length(), 25.0);
    }

    #[test]
    fn generated_containment_nests() {
        let rule = Rule::new("face", "inner", "outer", Relation::Containment);
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..20 {
            let inner = ShapeNode::with_bounds("inner", vec![], Point::new(0.0, 12.0), Point::new(30.0, 0.0));
            let outer = ShapeNode::with_bounds("outer", vec![], Point::new(0.0, 20.0), Point::new(20.0, 0.0));
            let combined = rule.generate_combine(inner.clone(), outer, &mut rng).unwrap();

            assert!(combined.length() > inner.length());
            assert!(combined.height() > inner.height());
        }
    }

    #[test]
    fn stacking_flat_pair_is_degenerate() {
        let rule = Rule::new("stack", "a2", "a2", Relation::Stacking);
        let mut rng = StdRng::seed_from_u64(0);
        let result = rule.generate_combine(
            node("a2", 0.0, 0.0, 0.0, 10.0),
            node("a2", 0.0, 0.0, 0.0, 10.0),
            &mut rng,
        );

        assert_eq!(result.unwrap_err().symbol, "a2");
    }

    #[test]
    fn containment_in_flat_container_is_degenerate() {
        let rule = Rule::new("face", "a3", "a1", Relation::Containment);
        let mut rng = StdRng::seed_from_u64(0);
        let result = rule.generate_combine(
            node("a3", 0.0, 0.0, 10.0, 10.0),
            node("a1", 0.0, 0.0, 10.0, 0.0),
            &mut rng,
        );

        assert_eq!(result, Err(DegenerateGeometry {
            symbol: "a1".to_string(),
            length: 10.0,
            height: 0.0
        }));
    }
}
