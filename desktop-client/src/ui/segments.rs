use snake_common::{Direction, SnakeSegment};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    const CLOCKWISE: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// The side of a cell the snake leaves through when moving in `direction`.
    pub fn of(direction: Direction) -> Self {
        match direction {
            Direction::Up => Side::Top,
            Direction::Right => Side::Right,
            Direction::Down => Side::Bottom,
            Direction::Left => Side::Left,
        }
    }

    fn index(self) -> usize {
        match self {
            Side::Top => 0,
            Side::Right => 1,
            Side::Bottom => 2,
            Side::Left => 3,
        }
    }

    pub fn rotated_cw(self, degrees: u16) -> Self {
        let steps = (degrees / 90) as usize;
        Self::CLOCKWISE[(self.index() + steps) % 4]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnType {
    Clockwise,
    CounterClockwise,
}

impl TurnType {
    /// `None` for straight moves and reversals.
    pub fn classify(from: Direction, to: Direction) -> Option<Self> {
        if Side::of(from).rotated_cw(90) == Side::of(to) {
            Some(TurnType::Clockwise)
        } else if Side::of(from).rotated_cw(270) == Side::of(to) {
            Some(TurnType::CounterClockwise)
        } else {
            None
        }
    }
}

pub fn rotation_degrees(direction: Direction) -> u16 {
    match direction {
        Direction::Up => 0,
        Direction::Right => 90,
        Direction::Down => 180,
        Direction::Left => 270,
    }
}

/// Rotation applied to the canonical elbow, which opens to the bottom and the left.
pub fn segment_rotation(from: Direction, turn: Option<TurnType>) -> u16 {
    let rotation = rotation_degrees(from);
    match turn {
        Some(TurnType::Clockwise) => (rotation + 270) % 360,
        _ => rotation,
    }
}

pub fn elbow_sides(from: Direction, turn: TurnType) -> (Side, Side) {
    let rotation = segment_rotation(from, Some(turn));
    (Side::Bottom.rotated_cw(rotation), Side::Left.rotated_cw(rotation))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentShape {
    Head { facing: Direction },
    Straight { direction: Direction },
    Turn { from: Direction, turn: TurnType },
    Tail { toward: Side },
}

impl SegmentShape {
    /// Sides of the cell the segment's body touches.
    pub fn connected_sides(&self) -> Vec<Side> {
        match *self {
            SegmentShape::Head { facing } => vec![Side::of(facing.reverse())],
            SegmentShape::Straight { direction } => {
                vec![Side::of(direction.reverse()), Side::of(direction)]
            }
            SegmentShape::Turn { from, turn } => {
                let (a, b) = elbow_sides(from, turn);
                vec![a, b]
            }
            SegmentShape::Tail { toward } => vec![toward],
        }
    }
}

/// Segments are ordered head first.
pub fn layout_snake(segments: &[SnakeSegment]) -> Vec<SegmentShape> {
    let last = segments.len().saturating_sub(1);
    segments
        .iter()
        .enumerate()
        .map(|(index, segment)| {
            if index == 0 {
                return SegmentShape::Head {
                    facing: segment.direction,
                };
            }
            let next_direction = segments[index - 1].direction;
            if index == last {
                return SegmentShape::Tail {
                    toward: Side::of(next_direction),
                };
            }
            match TurnType::classify(segment.direction, next_direction) {
                Some(turn) if segment.is_turn => SegmentShape::Turn {
                    from: segment.direction,
                    turn,
                },
                _ => SegmentShape::Straight {
                    direction: segment.direction,
                },
            }
        })
        .collect()
}
