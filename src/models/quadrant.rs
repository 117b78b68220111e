use rand::Rng;

use super::constants::QUADRANT_SIZE;
use super::coordinates::Coordinates;
use super::entity::EntityId;
use super::errors::{GameError, GameResult};
use super::sector::{Sector, SectorKind};

/// The 8x8 sector grid for the current quadrant.
///
/// A passive spatial store: sectors are created once at construction and
/// never reallocated, and all mutation flows through the occupancy protocol
/// (`occupy`/`vacate`/`relocate`) so the aggregate counters can never drift
/// from the grid. Rebuilt from galaxy-map data every time the Enterprise
/// enters a quadrant.
#[derive(Debug)]
pub struct Quadrant {
    /// Internal 0-based indexing: grid[y][x].
    grid: [[Sector; QUADRANT_SIZE as usize]; QUADRANT_SIZE as usize],
    klingons: i32,
    commanders: i32,
    super_commanders: i32,
    starbases: i32,
    stars: i32,
    planets: i32,
    /// Position of the starbase in this quadrant, if any.
    starbase: Option<Coordinates>,
}

impl Default for Quadrant {
    fn default() -> Self {
        Self::new()
    }
}

impl Quadrant {
    pub fn new() -> Self {
        let mut grid = [[Sector::new(Coordinates::new(0, 0)); QUADRANT_SIZE as usize];
            QUADRANT_SIZE as usize];
        for (y, row) in grid.iter_mut().enumerate() {
            for (x, sector) in row.iter_mut().enumerate() {
                *sector = Sector::new(Coordinates::new(x as i32, y as i32));
            }
        }
        Quadrant {
            grid,
            klingons: 0,
            commanders: 0,
            super_commanders: 0,
            starbases: 0,
            stars: 0,
            planets: 0,
            starbase: None,
        }
    }

    /// The sector at the given position. Pre-allocated, so this only fails
    /// on out-of-grid coordinates, never silently returns a default.
    pub fn sector(&self, coordinates: Coordinates) -> GameResult<&Sector> {
        if !coordinates.valid() {
            return Err(GameError::OutOfBounds(coordinates));
        }
        Ok(&self.grid[coordinates.y as usize][coordinates.x as usize])
    }

    fn sector_mut(&mut self, coordinates: Coordinates) -> GameResult<&mut Sector> {
        if !coordinates.valid() {
            return Err(GameError::OutOfBounds(coordinates));
        }
        Ok(&mut self.grid[coordinates.y as usize][coordinates.x as usize])
    }

    /// True iff the position is on-grid and currently Empty.
    pub fn is_sector_empty(&self, coordinates: Coordinates) -> bool {
        self.sector(coordinates).map_or(false, Sector::is_empty)
    }

    /// All 64 sectors in row-major order.
    pub fn sectors(&self) -> impl Iterator<Item = &Sector> + '_ {
        self.grid.iter().flatten()
    }

    /// Place an entity on an Empty sector, tagging it with `kind`.
    pub fn occupy(
        &mut self,
        coordinates: Coordinates,
        kind: SectorKind,
        occupant: EntityId,
    ) -> GameResult<()> {
        debug_assert!(kind != SectorKind::Empty);
        let sector = self.sector(coordinates)?;
        if !sector.is_empty() {
            return Err(GameError::SectorOccupied {
                coordinates,
                kind: sector.kind(),
            });
        }
        self.sector_mut(coordinates)?.fill(kind, occupant);
        self.note_filled(coordinates, kind);
        Ok(())
    }

    /// Clear a non-Empty sector back to Empty, returning its occupant.
    pub fn vacate(&mut self, coordinates: Coordinates) -> GameResult<EntityId> {
        let sector = self.sector(coordinates)?;
        let kind = sector.kind();
        if sector.is_empty() {
            return Err(GameError::SectorVacant(coordinates));
        }
        let occupant = self
            .sector_mut(coordinates)?
            .clear()
            .ok_or(GameError::SectorVacant(coordinates))?;
        self.note_cleared(coordinates, kind);
        Ok(occupant)
    }

    /// The atomic move step used by every mediator: both endpoints are
    /// validated before anything changes, so a failure commits nothing.
    pub fn relocate(&mut self, from: Coordinates, to: Coordinates) -> GameResult<()> {
        let source = self.sector(from)?;
        let kind = source.kind();
        let occupant = source.occupant().ok_or(GameError::SectorVacant(from))?;
        let target = self.sector(to)?;
        if !target.is_empty() {
            return Err(GameError::SectorOccupied {
                coordinates: to,
                kind: target.kind(),
            });
        }

        self.sector_mut(from)?.clear();
        self.sector_mut(to)?.fill(kind, occupant);
        if kind == SectorKind::Starbase {
            self.starbase = Some(to);
        }
        Ok(())
    }

    /// Uniformly sample one of the currently-Empty sectors.
    pub fn random_empty_sector<R: Rng>(&self, rng: &mut R) -> GameResult<Coordinates> {
        let empties: Vec<Coordinates> = self
            .sectors()
            .filter(|s| s.is_empty())
            .map(Sector::coordinates)
            .collect();
        if empties.is_empty() {
            return Err(GameError::NoEmptySector);
        }
        Ok(empties[rng.gen_range(0..empties.len())])
    }

    pub fn klingon_count(&self) -> i32 {
        self.klingons
    }

    pub fn commander_count(&self) -> i32 {
        self.commanders
    }

    pub fn super_commander_count(&self) -> i32 {
        self.super_commanders
    }

    pub fn starbase_count(&self) -> i32 {
        self.starbases
    }

    pub fn star_count(&self) -> i32 {
        self.stars
    }

    pub fn has_planet(&self) -> bool {
        self.planets > 0
    }

    pub fn hostile_count(&self) -> i32 {
        self.klingons + self.commanders + self.super_commanders
    }

    pub fn starbase(&self) -> Option<Coordinates> {
        self.starbase
    }

    /// Render one row of the grid as a 24-character string. y is 0-based.
    pub fn render_row(&self, y: i32) -> String {
        (0..QUADRANT_SIZE)
            .map(|x| {
                self.grid[y as usize][x as usize].kind().symbol()
            })
            .collect()
    }

    fn note_filled(&mut self, coordinates: Coordinates, kind: SectorKind) {
        match kind {
            SectorKind::Klingon => self.klingons += 1,
            SectorKind::Commander => self.commanders += 1,
            SectorKind::SuperCommander => self.super_commanders += 1,
            SectorKind::Starbase => {
                self.starbases += 1;
                self.starbase = Some(coordinates);
            }
            SectorKind::Star => self.stars += 1,
            SectorKind::Planet => self.planets += 1,
            SectorKind::Empty
            | SectorKind::Enterprise
            | SectorKind::BlackHole
            | SectorKind::PhotonTorpedo
            | SectorKind::KlingonTorpedo
            | SectorKind::Explosion
            | SectorKind::Miss => {}
        }
    }

    fn note_cleared(&mut self, coordinates: Coordinates, kind: SectorKind) {
        match kind {
            SectorKind::Klingon => self.klingons -= 1,
            SectorKind::Commander => self.commanders -= 1,
            SectorKind::SuperCommander => self.super_commanders -= 1,
            SectorKind::Starbase => {
                self.starbases -= 1;
                if self.starbase == Some(coordinates) {
                    self.starbase = None;
                }
            }
            SectorKind::Star => self.stars -= 1,
            SectorKind::Planet => self.planets -= 1,
            SectorKind::Empty
            | SectorKind::Enterprise
            | SectorKind::BlackHole
            | SectorKind::PhotonTorpedo
            | SectorKind::KlingonTorpedo
            | SectorKind::Explosion
            | SectorKind::Miss => {}
        }
    }
}
