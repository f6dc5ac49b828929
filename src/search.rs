use {crate::*, bitvec::prelude::*, glam::IVec2, std::mem::swap};

/// Raised when the search exhausts every reachable (cell, cycle tick) state without touching its
/// goal. A well-formed map never produces this; it signals a defective input.
#[derive(Debug, PartialEq)]
pub struct DeadEndError {
    /// The tick at which no unvisited state remained
    pub tick: usize,
}

/// Shortest-time traversal over a [`PeriodicField`]
///
/// The walker either steps to an orthogonally-adjacent open cell or waits in place, one tick per
/// action, while the blizzard pattern advances underneath. The field is read-only here, so one
/// search instance can serve any number of legs.
pub struct TimeIndexedSearch<'f> {
    field: &'f PeriodicField,
}

impl<'f> TimeIndexedSearch<'f> {
    pub fn new(field: &'f PeriodicField) -> Self {
        Self { field }
    }

    /// The minimum tick at which `to` can be reached from `from`, having stood at `from` since
    /// `start_tick`
    ///
    /// Tick-synchronous breadth-first sweep with an explicit current/next frontier pair: each pass
    /// expands every frontier cell into its neighbor set, keeping the cells open at the new tick.
    /// Because the open pattern repeats every `period` ticks, a (cell, tick % period) state seen
    /// once never needs revisiting; filtering against the visited table bounds the sweep to the
    /// finite periodic state space, so an unreachable goal surfaces as an emptied frontier rather
    /// than an endless loop.
    pub fn fastest_path(
        &self,
        from: IVec2,
        to: IVec2,
        start_tick: usize,
    ) -> Result<usize, DeadEndError> {
        let field: &PeriodicField = self.field;
        let period: usize = field.period();
        let cell_count: usize = field.cell_count();
        let from_index: usize = field
            .cell_index(from)
            .expect("search origin is not a valid field cell");
        let to_index: usize = field
            .cell_index(to)
            .expect("search goal is not a valid field cell");

        let mut visited: Vec<BitVec> = vec![bitvec![0; cell_count]; period];
        let mut frontier: BitVec = bitvec![0; cell_count];
        let mut next_frontier: BitVec = bitvec![0; cell_count];

        frontier.set(from_index, true);
        visited[start_tick % period].set(from_index, true);

        let mut tick: usize = start_tick;

        loop {
            tick += 1_usize;

            let open: &BitSlice = field.open_at(tick);
            let visited_now: &mut BitVec = &mut visited[tick % period];

            next_frontier.fill(false);

            for index in frontier.iter_ones() {
                for neighbor_index in field
                    .neighbors_of(field.pos_from_index(index))
                    .filter_map(|neighbor: IVec2| field.cell_index(neighbor))
                {
                    if open[neighbor_index] && !visited_now[neighbor_index] {
                        visited_now.set(neighbor_index, true);
                        next_frontier.set(neighbor_index, true);
                    }
                }
            }

            if next_frontier[to_index] {
                return Ok(tick);
            }

            if next_frontier.not_any() {
                return Err(DeadEndError { tick });
            }

            swap(&mut frontier, &mut next_frontier);
        }
    }

    /// Ticks for the single outbound leg, entry gap to exit gap, starting at tick 0
    pub fn fewest_ticks_to_finish(&self) -> Result<usize, DeadEndError> {
        self.fastest_path(PeriodicField::start(), self.field.finish(), 0_usize)
    }

    /// Outbound, back to the entry for the forgotten supplies, then outbound again. Each leg
    /// starts its clock at the tick the previous leg ended on, so the result is the cumulative
    /// tick count of the whole journey.
    pub fn fewest_ticks_with_return_trip(&self) -> Result<usize, DeadEndError> {
        let start: IVec2 = PeriodicField::start();
        let finish: IVec2 = self.field.finish();

        let there: usize = self.fastest_path(start, finish, 0_usize)?;
        let back: usize = self.fastest_path(finish, start, there)?;

        self.fastest_path(start, finish, back)
    }
}
