use {
    crate::*,
    bitvec::prelude::*,
    glam::IVec2,
    num::integer::lcm,
    std::{
        iter::{once, Peekable},
        str::Lines,
    },
    strum::IntoEnumIterator,
};

/// Number of traversable cells lying outside the bordered interior: the entry gap above the first
/// interior row and the exit gap below the last one.
const SENTINEL_CELLS: usize = 2_usize;

/// A bordered valley map compressed over one full blizzard cycle
///
/// Every blizzard wraps around the interior along its own axis, so its position repeats with a
/// period dividing the interior width or height. The whole occupancy pattern therefore repeats
/// every `lcm(width, height)` ticks, and one open-cell bit set per tick of that cycle is enough to
/// answer availability queries for any tick whatsoever.
///
/// Cell indices run row-major over the interior, followed by one bit each for the entry and exit
/// cells. Those two bits are never cleared: no blizzard can occupy either gap.
#[derive(Debug, PartialEq)]
pub struct PeriodicField {
    dimensions: IVec2,
    period: usize,
    open: Vec<BitVec>,
}

#[derive(Debug, PartialEq)]
pub enum ConfigurationError {
    NoLines,
    InconsistentLineLength { line: usize, expected: usize },
    DegenerateInterior(IVec2),
    UnexpectedGlyph { pos: IVec2, glyph: u8 },
}

impl PeriodicField {
    #[inline]
    pub fn width(&self) -> i32 {
        self.dimensions.x
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.dimensions.y
    }

    /// Length of the full blizzard cycle, in ticks
    #[inline]
    pub fn period(&self) -> usize {
        self.period
    }

    /// The entry cell, one row above the interior
    pub const fn start() -> IVec2 {
        IVec2::new(0_i32, -1_i32)
    }

    /// The exit cell, one row below the interior
    pub fn finish(&self) -> IVec2 {
        IVec2::new(self.dimensions.x - 1_i32, self.dimensions.y)
    }

    /// Total addressable cells: the interior plus the entry and exit gaps
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.interior_cells() + SENTINEL_CELLS
    }

    /// The bit set of cells free of blizzards at `tick`. Any non-negative tick is valid, however
    /// far past the cycle length.
    pub fn open_at(&self, tick: usize) -> &BitSlice {
        &self.open[tick % self.period]
    }

    /// Whether `pos` is a valid cell containing no blizzard at `tick`
    pub fn is_open(&self, pos: IVec2, tick: usize) -> bool {
        self.cell_index(pos)
            .map_or(false, |index: usize| self.open_at(tick)[index])
    }

    /// `pos` itself plus its four cardinal neighbors, clipped to the valid cell set. Waiting in
    /// place is a legal move, hence the cell's own membership. Availability at a given tick is the
    /// caller's concern.
    pub fn neighbors_of(&self, pos: IVec2) -> impl Iterator<Item = IVec2> + '_ {
        once(pos)
            .chain(Direction::iter().map(move |dir: Direction| pos + dir.vec()))
            .filter(|candidate: &IVec2| self.cell_index(*candidate).is_some())
    }

    /// Maps a valid cell to its bit index, or `None` for walls and out-of-bounds positions
    pub fn cell_index(&self, pos: IVec2) -> Option<usize> {
        if self.contains_interior(pos) {
            Some((pos.y * self.dimensions.x + pos.x) as usize)
        } else if pos == Self::start() {
            Some(self.interior_cells())
        } else if pos == self.finish() {
            Some(self.interior_cells() + 1_usize)
        } else {
            None
        }
    }

    /// Inverse of `cell_index`
    pub fn pos_from_index(&self, index: usize) -> IVec2 {
        let interior_cells: usize = self.interior_cells();

        if index == interior_cells {
            Self::start()
        } else if index == interior_cells + 1_usize {
            self.finish()
        } else {
            let width: usize = self.dimensions.x as usize;

            IVec2::new((index % width) as i32, (index / width) as i32)
        }
    }

    #[inline]
    fn interior_cells(&self) -> usize {
        (self.dimensions.x * self.dimensions.y) as usize
    }

    #[inline]
    fn contains_interior(&self, pos: IVec2) -> bool {
        pos.cmpge(IVec2::ZERO).all() && pos.cmplt(self.dimensions).all()
    }

    /// Clears the cell this blizzard occupies at every tick of the cycle. Two blizzards crossing
    /// the same cell at the same tick just clear the same bit twice.
    fn carve_blizzard(&mut self, origin: IVec2, dir: Direction) {
        let dir_vec: IVec2 = dir.vec();

        for tick in 0_usize..self.period {
            let pos: IVec2 = (origin + tick as i32 * dir_vec).rem_euclid(self.dimensions);
            let index: usize = (pos.y * self.dimensions.x + pos.x) as usize;

            self.open[tick].set(index, false);
        }
    }
}

impl TryFrom<&str> for PeriodicField {
    type Error = ConfigurationError;

    fn try_from(field_str: &str) -> Result<Self, Self::Error> {
        use ConfigurationError::*;

        let mut field_line_iter: Peekable<Lines> = field_str.lines().peekable();

        let expected: usize = field_line_iter.peek().ok_or(NoLines)?.len();

        let mut rows: Vec<&str> = Vec::new();

        for (line, field_line) in field_line_iter.enumerate() {
            if field_line.len() != expected {
                return Err(InconsistentLineLength { line, expected });
            }

            rows.push(field_line);
        }

        let dimensions: IVec2 = IVec2::new(expected as i32 - 2_i32, rows.len() as i32 - 2_i32);

        if dimensions.cmplt(IVec2::ONE).any() {
            return Err(DegenerateInterior(dimensions));
        }

        let period: usize = lcm(dimensions.x as usize, dimensions.y as usize);
        let cell_count: usize = (dimensions.x * dimensions.y) as usize + SENTINEL_CELLS;

        let mut field: Self = Self {
            dimensions,
            period,
            open: vec![bitvec![1; cell_count]; period],
        };

        for (y, row) in rows[1_usize..rows.len() - 1_usize].iter().enumerate() {
            let interior: &[u8] = &row.as_bytes()[1_usize..row.len() - 1_usize];

            for (x, glyph) in interior.iter().copied().enumerate() {
                if glyph != b'.' {
                    let origin: IVec2 = IVec2::new(x as i32, y as i32);
                    let dir: Direction = glyph
                        .try_into()
                        .map_err(|glyph: u8| UnexpectedGlyph { pos: origin, glyph })?;

                    field.carve_blizzard(origin, dir);
                }
            }
        }

        Ok(field)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::sync::OnceLock};

    const GUSTY_FIELD: &str = concat!(
        "#.#####\n",
        "#.....#\n",
        "#>....#\n",
        "#.....#\n",
        "#...v.#\n",
        "#.....#\n",
        "#####.#",
    );
    const CALM_FIELD: &str = concat!(
        "#.###\n",
        "#...#\n",
        "#...#\n",
        "###.#",
    );

    fn gusty_field() -> &'static PeriodicField {
        static ONCE_LOCK: OnceLock<PeriodicField> = OnceLock::new();

        ONCE_LOCK.get_or_init(|| GUSTY_FIELD.try_into().unwrap())
    }

    #[test]
    fn test_periodic_field_try_from_str() {
        let field: &PeriodicField = gusty_field();

        assert_eq!(field.width(), 5_i32);
        assert_eq!(field.height(), 5_i32);
        assert_eq!(field.period(), 5_usize);
        assert_eq!(field.cell_count(), 27_usize);
        assert_eq!(PeriodicField::start(), IVec2::new(0_i32, -1_i32));
        assert_eq!(field.finish(), IVec2::new(4_i32, 5_i32));
    }

    #[test]
    fn test_open_at_cycles() {
        let field: &PeriodicField = gusty_field();

        for tick in 0_usize..field.period() {
            assert_eq!(field.open_at(tick), field.open_at(tick + field.period()));
            assert_eq!(
                field.open_at(tick),
                field.open_at(tick + 7_usize * field.period())
            );
        }
    }

    #[test]
    fn test_sentinels_always_open() {
        let field: &PeriodicField = gusty_field();

        for tick in 0_usize..field.period() {
            assert!(field.is_open(PeriodicField::start(), tick));
            assert!(field.is_open(field.finish(), tick));
        }
    }

    #[test]
    fn test_construction_is_idempotent() {
        assert_eq!(
            PeriodicField::try_from(GUSTY_FIELD),
            PeriodicField::try_from(GUSTY_FIELD)
        );
    }

    #[test]
    fn test_blizzard_tracks() {
        let field: &PeriodicField = gusty_field();

        for tick in 0_usize..field.period() {
            // The east blizzard starting at (0, 1), and the south blizzard starting at (3, 3)
            assert!(!field.is_open(IVec2::new(tick as i32 % 5_i32, 1_i32), tick));
            assert!(!field.is_open(IVec2::new(3_i32, (3_i32 + tick as i32) % 5_i32), tick));
        }
    }

    #[test]
    fn test_neighbors_of_clips_to_valid_cells() {
        let field: &PeriodicField = gusty_field();

        assert_eq!(
            field
                .neighbors_of(PeriodicField::start())
                .collect::<Vec<IVec2>>(),
            vec![PeriodicField::start(), IVec2::new(0_i32, 0_i32)]
        );
        assert_eq!(
            field.neighbors_of(IVec2::new(2_i32, 2_i32)).count(),
            5_usize
        );
        assert_eq!(
            field.neighbors_of(IVec2::new(0_i32, 0_i32)).count(),
            4_usize
        );
    }

    #[test]
    fn test_narrow_interiors_are_legal() {
        // One-wide and one-tall interiors collapse the period onto the other dimension
        let corridor: PeriodicField = concat!("#.#\n", "#.#\n", "#v#\n", "#.#\n", "#.#")
            .try_into()
            .unwrap();

        assert_eq!(corridor.width(), 1_i32);
        assert_eq!(corridor.height(), 3_i32);
        assert_eq!(corridor.period(), 3_usize);

        let crawlspace: PeriodicField = concat!("#.###\n", "#.>.#\n", "###.#").try_into().unwrap();

        assert_eq!(crawlspace.width(), 3_i32);
        assert_eq!(crawlspace.height(), 1_i32);
        assert_eq!(crawlspace.period(), 3_usize);
    }

    #[test]
    fn test_field_without_blizzards_is_fully_open() {
        let field: PeriodicField = CALM_FIELD.try_into().unwrap();

        assert_eq!(field.period(), 6_usize);

        for tick in 0_usize..field.period() {
            assert!(field.open_at(tick).all());
        }
    }

    #[test]
    fn test_malformed_fields() {
        use ConfigurationError::*;

        assert_eq!(PeriodicField::try_from(""), Err(NoLines));
        assert_eq!(
            PeriodicField::try_from("##\n##\n##"),
            Err(DegenerateInterior(IVec2::new(0_i32, 1_i32)))
        );
        assert_eq!(
            PeriodicField::try_from("#.###\n#..#\n###.#"),
            Err(InconsistentLineLength {
                line: 1_usize,
                expected: 5_usize
            })
        );
        assert_eq!(
            PeriodicField::try_from("#.###\n#.x.#\n###.#"),
            Err(UnexpectedGlyph {
                pos: IVec2::new(1_i32, 0_i32),
                glyph: b'x'
            })
        );
    }
}
