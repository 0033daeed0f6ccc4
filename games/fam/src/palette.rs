use glam::Vec3;

// Components in 1/256ths.
macro_rules! rgb {
    ($r:expr, $g:expr, $b:expr) => {
        Vec3::new($r / 256.0, $g / 256.0, $b / 256.0)
    };
}

pub const WHITE: Vec3 = Vec3::ONE;
pub const GREY: Vec3 = rgb!(128.0, 128.0, 128.0);

/// Player colors, in the order they are handed out.
pub const PALETTE: [Vec3; 22] = [
    WHITE,
    Vec3::ZERO,                  // black
    GREY,
    rgb!(240.0, 50.0, 230.0),    // magenta
    rgb!(145.0, 30.0, 180.0),    // purple
    rgb!(230.0, 190.0, 256.0),   // lavender
    Vec3::new(0.0, 0.0, 0.5),    // navy
    rgb!(0.0, 130.0, 200.0),     // blue
    Vec3::new(0.0, 0.5, 0.5),    // teal
    rgb!(70.0, 240.0, 240.0),    // cyan
    rgb!(60.0, 180.0, 75.0),     // green
    rgb!(170.0, 256.0, 195.0),   // mint
    rgb!(210.0, 245.0, 60.0),    // lime
    Vec3::new(0.5, 0.5, 0.0),    // olive
    rgb!(256.0, 256.0, 25.0),    // yellow
    rgb!(256.0, 250.0, 200.0),   // beige
    rgb!(170.0, 110.0, 40.0),    // brown
    rgb!(245.0, 130.0, 48.0),    // orange
    rgb!(256.0, 215.0, 180.0),   // apricot
    Vec3::new(0.5, 0.0, 0.0),    // maroon
    rgb!(230.0, 25.0, 75.0),     // red
    rgb!(250.0, 190.0, 190.0),   // pink
];

const FIRST_COLOR: usize = 7;

/// Hands out palette colors round-robin, starting at blue.
#[derive(Debug, Clone)]
pub struct ColorCycle {
    cursor: usize,
}

impl ColorCycle {
    pub fn new() -> Self {
        Self { cursor: FIRST_COLOR }
    }

    pub fn next_color(&mut self) -> Vec3 {
        let color = PALETTE[self.cursor];
        self.cursor = (self.cursor + 1) % PALETTE.len();
        color
    }
}

impl Default for ColorCycle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_blue_and_wraps() {
        let mut cycle = ColorCycle::new();
        assert_eq!(cycle.next_color(), rgb!(0.0, 130.0, 200.0));

        let rest: Vec<Vec3> = (0..PALETTE.len() - 1).map(|_| cycle.next_color()).collect();
        assert_eq!(rest[PALETTE.len() - FIRST_COLOR - 1], WHITE);
        assert_eq!(cycle.next_color(), PALETTE[FIRST_COLOR]);
    }

    #[test]
    fn components_are_normalized() {
        for color in PALETTE {
            assert!(color.min_element() >= 0.0 && color.max_element() <= 1.0, "{color}");
        }
    }
}
