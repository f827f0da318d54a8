//! Per-player mutable game snapshot: rack, table, and the initial-meld flag.

use crate::tile::Tile;

/// State of a single game for one player.
///
/// Tracks the tiles placed on the table and the rack as dense per-tile
/// counts (the canonical representation used for solver arithmetic); the
/// sorted multiset views are derived from those counts rather than
/// maintained independently, so the two can never drift apart.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    tile_count: usize,
    rack: Vec<u32>,
    table: Vec<u32>,
    /// True while the player has not yet satisfied the opening threshold.
    pub initial: bool,
}

impl GameState {
    /// An empty game state over `tile_count` distinct tile identifiers
    /// (`initial = true`).
    pub fn new(tile_count: usize) -> Self {
        Self {
            tile_count,
            rack: vec![0; tile_count],
            table: vec![0; tile_count],
            initial: true,
        }
    }

    pub fn reset(&mut self) {
        self.rack.iter_mut().for_each(|c| *c = 0);
        self.table.iter_mut().for_each(|c| *c = 0);
        self.initial = true;
    }

    pub fn add_rack(&mut self, tiles: &[Tile]) {
        add_counts(&mut self.rack, tiles);
    }

    pub fn remove_rack(&mut self, tiles: &[Tile]) {
        remove_counts(&mut self.rack, tiles);
    }

    pub fn add_table(&mut self, tiles: &[Tile]) {
        add_counts(&mut self.table, tiles);
    }

    pub fn remove_table(&mut self, tiles: &[Tile]) {
        remove_counts(&mut self.table, tiles);
    }

    /// A derived state with `tiles` moved from the rack to the table.
    ///
    /// Does not mutate `self`. Per-tile counts saturate at zero if `tiles`
    /// requests more copies than the rack holds; no error is raised (see
    /// the open question on `with_move` validation).
    ///
    /// Like every other mutator on `GameState`, `initial` is left
    /// unchanged by the move itself: whether a placement actually
    /// satisfies the opening threshold is a property of the rule set's
    /// scoring, not of the state, so it is the caller's (or the rule
    /// set's orchestration layer's) responsibility to flip the flag once
    /// that's been determined.
    pub fn with_move(&self, tiles: &[Tile]) -> GameState {
        let mut next = self.clone();
        next.remove_rack(tiles);
        next.add_table(tiles);
        next
    }

    /// Per-tile counts on the rack, 0-indexed by `tile - 1`.
    pub fn rack_array(&self) -> &[u32] {
        &self.rack
    }

    /// Per-tile counts on the table, 0-indexed by `tile - 1`.
    pub fn table_array(&self) -> &[u32] {
        &self.table
    }

    pub fn rack_count(&self, tile: Tile) -> u32 {
        self.rack[tile as usize - 1]
    }

    pub fn table_count(&self, tile: Tile) -> u32 {
        self.table[tile as usize - 1]
    }

    /// The rack tiles as a sorted list (ascending tile id, repeats inline).
    pub fn sorted_rack(&self) -> Vec<Tile> {
        expand(&self.rack)
    }

    /// The table tiles as a sorted list (ascending tile id, repeats inline).
    pub fn sorted_table(&self) -> Vec<Tile> {
        expand(&self.table)
    }

    pub fn tile_count(&self) -> usize {
        self.tile_count
    }
}

fn add_counts(counts: &mut [u32], tiles: &[Tile]) {
    for &t in tiles {
        counts[t as usize - 1] += 1;
    }
}

fn remove_counts(counts: &mut [u32], tiles: &[Tile]) {
    for &t in tiles {
        let slot = &mut counts[t as usize - 1];
        *slot = slot.saturating_sub(1);
    }
}

fn expand(counts: &[u32]) -> Vec<Tile> {
    let mut out = Vec::new();
    for (i, &c) in counts.iter().enumerate() {
        for _ in 0..c {
            out.push((i + 1) as Tile);
        }
    }
    out
}
