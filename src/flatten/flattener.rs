//! The flattening engine.
//!
//! Combines a tree position, the stones on the board, a region, and an
//! optional forward move sequence into a `Flattened` diagram. Forward moves
//! are replayed onto a copy of the stone map and labeled with move numbers;
//! moves that land on occupied points are recorded as collisions.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;

use super::classify::classify;
use super::crop::{RegionInference, SubtreeBounds};
use super::flattened::{Collision, Flattened};
use super::symbol::{Symbol, SymbolPair};
use crate::board::goban::StoneSource;
use crate::board::point::{Color, Point, Stone};
use crate::board::region::{Cropping, RegionError, RegionSpec};
use crate::movetree::{MarkKind, NextMoves, TreeCursor, TreepathError, MARK_MERGE_ORDER};

/// Errors that can occur when flattening a position.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FlattenError {
    #[error("starting move number must be positive, got {0}")]
    InvalidMoveNumber(u32),

    #[error(transparent)]
    Region(#[from] RegionError),

    #[error(transparent)]
    Treepath(#[from] TreepathError),
}

/// When to overlay hints for the next moves in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VariationMode {
    #[default]
    Never,
    Always,
    /// Only when the current position has more than one continuation.
    MoreThanOne,
}

impl VariationMode {
    pub const fn name(self) -> &'static str {
        match self {
            VariationMode::Never => "NEVER",
            VariationMode::Always => "ALWAYS",
            VariationMode::MoreThanOne => "MORE_THAN_ONE",
        }
    }

    fn shows(self, child_count: usize) -> bool {
        match self {
            VariationMode::Never => false,
            VariationMode::Always => true,
            VariationMode::MoreThanOne => child_count > 1,
        }
    }
}

impl fmt::Display for VariationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned for an unrecognized variation mode name.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown variation mode: '{0}'")]
pub struct UnknownVariationMode(pub String);

impl FromStr for VariationMode {
    type Err = UnknownVariationMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEVER" => Ok(VariationMode::Never),
            "ALWAYS" => Ok(VariationMode::Always),
            "MORE_THAN_ONE" | "MORE_THAN_ONE_CHILD" => Ok(VariationMode::MoreThanOne),
            other => Err(UnknownVariationMode(other.to_string())),
        }
    }
}

/// Everything about a flatten call besides the position and the stones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenOptions {
    pub region: RegionSpec,
    pub show_variations: VariationMode,
    pub next_moves: NextMoves,
    /// Move number given to the first forward move.
    pub starting_move_num: u32,
    /// Mark the current move when no forward moves are replayed.
    pub mark_last_move: bool,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        FlattenOptions {
            region: RegionSpec::default(),
            show_variations: VariationMode::Never,
            next_moves: NextMoves::default(),
            starting_move_num: 1,
            mark_last_move: false,
        }
    }
}

/// One independent unit of work for [`Flattener::flatten_batch`].
pub struct FlattenJob<'a> {
    pub cursor: TreeCursor<'a>,
    pub stones: &'a (dyn StoneSource + Sync),
    pub options: FlattenOptions,
}

/// Letters handed out to collisions on unlabeled points: `a`..`z`, then
/// `aa`, `ab`, ...
fn collision_letter(idx: usize) -> String {
    let mut n = idx;
    let mut out = Vec::new();
    loop {
        out.push(b'a' + (n % 26) as u8);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Sparse working state built up before rasterization.
#[derive(Debug, Default)]
struct Sketch {
    stones: HashMap<Point, Stone>,
    marks: HashMap<Point, Symbol>,
    labels: BTreeMap<Point, String>,
    collisions: Vec<Collision>,
}

impl Sketch {
    fn seeded(stones: &[Stone]) -> Self {
        Sketch {
            stones: stones.iter().map(|s| (s.point, *s)).collect(),
            ..Sketch::default()
        }
    }

    fn label(&mut self, pt: Point, text: String, mark: Symbol) {
        self.labels.insert(pt, text);
        self.marks.insert(pt, mark);
    }

    /// Follows `path` from the cursor, numbering each move. Stops early at
    /// a leaf or at an index that does not exist. Returns the number of
    /// moves replayed.
    fn replay(&mut self, cursor: &mut TreeCursor<'_>, path: &[usize], first_move_num: u32) -> usize {
        let mut move_num = first_move_num;
        let mut letters = 0usize;
        let mut replayed = 0usize;

        for &index in path {
            if cursor.child_count() == 0 {
                break;
            }
            if let Err(e) = cursor.descend(index) {
                tracing::debug!(error = %e, replayed, "truncating forward moves");
                break;
            }
            replayed += 1;

            let Some(stone) = cursor.current_move().and_then(|m| m.stone()) else {
                move_num += 1;
                continue;
            };

            match self.stones.get(&stone.point).copied() {
                None => {
                    self.stones.insert(stone.point, stone);
                    self.label(stone.point, move_num.to_string(), Symbol::TextLabel);
                }
                Some(occupant) => {
                    let label = if self.labels.contains_key(&stone.point) {
                        Some(move_num.to_string())
                    } else {
                        // Typically a stone captured and replayed onto.
                        self.label(stone.point, collision_letter(letters), Symbol::TextLabel);
                        letters += 1;
                        None
                    };
                    self.collisions.push(Collision {
                        point: stone.point,
                        color: stone.color,
                        label,
                        move_num,
                        collision: occupant,
                    });
                }
            }
            move_num += 1;
        }
        replayed
    }

    /// Copies the current node's markup, overwriting anything already there.
    fn merge_annotations(&mut self, cursor: &TreeCursor<'_>) {
        for kind in MARK_MERGE_ORDER {
            let symbol = mark_symbol(kind);
            for annotation in cursor.marks(kind) {
                self.marks.insert(annotation.point, symbol);
                if let (MarkKind::Label, Some(text)) = (kind, &annotation.text) {
                    self.labels.insert(annotation.point, text.clone());
                }
            }
        }
    }

    /// Labels each child's move with its 1-based index unless already
    /// labeled, and marks it as a next variation.
    fn overlay_variations(&mut self, cursor: &TreeCursor<'_>) {
        for (i, child) in cursor.children().enumerate() {
            let Some(pt) = child.play.and_then(|m| m.point) else {
                continue;
            };
            self.labels.entry(pt).or_insert_with(|| (i + 1).to_string());
            self.marks.insert(pt, Symbol::NextVariation);
        }
    }

    fn rasterize(&self, cropping: Cropping, intersections: u8) -> Vec<Vec<SymbolPair>> {
        (cropping.top()..=cropping.bottom())
            .map(|y| {
                (cropping.left()..=cropping.right())
                    .map(|x| {
                        let pt = Point::new(x, y);
                        let stone: Option<Color> = self.stones.get(&pt).map(|s| s.color);
                        classify(pt, stone, self.marks.get(&pt).copied(), intersections)
                    })
                    .collect()
            })
            .collect()
    }
}

fn mark_symbol(kind: MarkKind) -> Symbol {
    match kind {
        MarkKind::Circle => Symbol::Circle,
        MarkKind::Cross => Symbol::XMark,
        MarkKind::Square => Symbol::Square,
        MarkKind::Triangle => Symbol::Triangle,
        MarkKind::Label => Symbol::TextLabel,
    }
}

/// Flattens positions into diagrams.
///
/// Holds only the strategy used for `AUTO` regions. Every call works on its
/// own fork of the caller's cursor.
#[derive(Debug, Clone, Default)]
pub struct Flattener<I = SubtreeBounds> {
    inference: I,
}

impl<I: RegionInference> Flattener<I> {
    pub fn new(inference: I) -> Self {
        Flattener { inference }
    }

    /// Flattens the position at `cursor`.
    pub fn flatten<S>(
        &self,
        cursor: &TreeCursor<'_>,
        stones: &S,
        options: &FlattenOptions,
    ) -> Result<Flattened, FlattenError>
    where
        S: StoneSource + ?Sized,
    {
        if options.starting_move_num == 0 {
            return Err(FlattenError::InvalidMoveNumber(options.starting_move_num));
        }
        let path = options.next_moves.decode()?;

        let mut cursor = cursor.fork();
        let intersections = cursor.intersections();
        let region = match options.region {
            RegionSpec::Fixed(region) => region,
            RegionSpec::Auto => self.inference.infer_region(&cursor),
        };
        let cropping = Cropping::from_region(region, intersections)?;

        let mut sketch = Sketch::seeded(&stones.placed_stones());
        let replayed = sketch.replay(&mut cursor, &path, options.starting_move_num);

        if options.mark_last_move && replayed == 0 {
            if let Some(pt) = cursor.current_move().and_then(|m| m.point) {
                sketch.marks.insert(pt, Symbol::LastMove);
            }
        }

        sketch.merge_annotations(&cursor);

        if options.show_variations.shows(cursor.child_count()) {
            sketch.overlay_variations(&cursor);
        }

        let symbol_pairs = sketch.rasterize(cropping, intersections);
        let comment = cursor.comment().unwrap_or_default().to_string();

        Ok(Flattened::new(
            symbol_pairs,
            sketch.labels,
            sketch.collisions,
            comment,
            region,
            cropping,
        ))
    }
}

impl<I: RegionInference + Sync> Flattener<I> {
    /// Flattens independent jobs in parallel. Results keep the input order.
    pub fn flatten_batch(&self, jobs: &[FlattenJob<'_>]) -> Vec<Result<Flattened, FlattenError>> {
        jobs.par_iter()
            .map(|job| self.flatten(&job.cursor, job.stones, &job.options))
            .collect()
    }
}

/// Flattens the position at `cursor` with the default region inference.
pub fn flatten<S>(cursor: &TreeCursor<'_>, stones: &S, options: &FlattenOptions) -> Result<Flattened, FlattenError>
where
    S: StoneSource + ?Sized,
{
    Flattener::<SubtreeBounds>::default().flatten(cursor, stones, options)
}
