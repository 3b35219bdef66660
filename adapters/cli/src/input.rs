//! Keyboard-style input scripting.
//!
//! The game is played with arrow keys, the number keys `1`-`4` and `P`.
//! Pressing a number selects the matching tower type; pressing it again while
//! that type is selected buys the tower under the cursor.

use std::{fmt, str::FromStr};

use tower_defence_core::{CellCoord, Command, Direction, TowerKind};

/// Single key press understood by the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Key {
    Arrow(Direction),
    Number(TowerKind),
    Pause,
}

impl Key {
    /// Translates the key press into a command given the current selection.
    pub(crate) fn to_command(self, selected: Option<TowerKind>) -> Command {
        match self {
            Self::Arrow(direction) => Command::MoveCursor { direction },
            Self::Number(kind) if selected == Some(kind) => Command::BuyTower,
            Self::Number(kind) => Command::SelectTowerType { kind },
            Self::Pause => Command::TogglePause,
        }
    }
}

/// Request to build a tower of `kind` on `cell` before the run starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BuildOrder {
    pub(crate) kind: TowerKind,
    pub(crate) cell: CellCoord,
}

impl BuildOrder {
    /// Key presses that walk the cursor from `cursor` to the target cell and
    /// buy the tower there.
    pub(crate) fn keys(&self, cursor: CellCoord) -> Vec<Key> {
        let columns = self.cell.column() - cursor.column();
        let rows = self.cell.row() - cursor.row();
        let horizontal = if columns < 0 {
            Direction::West
        } else {
            Direction::East
        };
        let vertical = if rows < 0 {
            Direction::North
        } else {
            Direction::South
        };

        let mut keys = Vec::new();
        keys.extend((0..columns.unsigned_abs()).map(|_| Key::Arrow(horizontal)));
        keys.extend((0..rows.unsigned_abs()).map(|_| Key::Arrow(vertical)));
        keys.push(Key::Number(self.kind));
        keys.push(Key::Number(self.kind));
        keys
    }
}

/// Reasons a `KIND@COLUMN,ROW` build order fails to parse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum BuildOrderError {
    MissingSeparator,
    UnknownKind(String),
    InvalidCell(String),
}

impl fmt::Display for BuildOrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSeparator => write!(f, "expected KIND@COLUMN,ROW"),
            Self::UnknownKind(kind) => write!(
                f,
                "unknown tower kind `{kind}` (expected normal, heavy, machine_gun or sniper)"
            ),
            Self::InvalidCell(cell) => write!(f, "invalid cell `{cell}` (expected COLUMN,ROW)"),
        }
    }
}

impl std::error::Error for BuildOrderError {}

impl FromStr for BuildOrder {
    type Err = BuildOrderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (kind, cell) = value
            .split_once('@')
            .ok_or(BuildOrderError::MissingSeparator)?;
        let kind = parse_tower_kind(kind.trim())
            .ok_or_else(|| BuildOrderError::UnknownKind(kind.to_owned()))?;

        let invalid = || BuildOrderError::InvalidCell(cell.to_owned());
        let (column, row) = cell.split_once(',').ok_or_else(invalid)?;
        let column = column.trim().parse::<i32>().map_err(|_| invalid())?;
        let row = row.trim().parse::<i32>().map_err(|_| invalid())?;

        Ok(Self {
            kind,
            cell: CellCoord::new(column, row),
        })
    }
}

fn parse_tower_kind(name: &str) -> Option<TowerKind> {
    match name.to_ascii_lowercase().replace('-', "_").as_str() {
        "normal" | "1" => Some(TowerKind::Normal),
        "heavy" | "2" => Some(TowerKind::Heavy),
        "machine_gun" | "machinegun" | "3" => Some(TowerKind::MachineGun),
        "sniper" | "4" => Some(TowerKind::Sniper),
        _ => None,
    }
}
