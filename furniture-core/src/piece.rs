use serde::{Deserialize, Serialize};

/// Functional category of a piece. Drives material lookup and decides
/// whether the piece is part of the body when looking for the floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Body,
    Top,
    Shelves,
    Fronts,
    Back,
    Legs,
    Plinth,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::Body,
        Role::Top,
        Role::Shelves,
        Role::Fronts,
        Role::Back,
        Role::Legs,
        Role::Plinth,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Role::Body => "body",
            Role::Top => "top",
            Role::Shelves => "shelves",
            Role::Fronts => "fronts",
            Role::Back => "back",
            Role::Legs => "legs",
            Role::Plinth => "plinth",
        }
    }

    pub fn from_key(s: &str) -> Option<Role> {
        match s.trim().to_ascii_lowercase().as_str() {
            "body" | "cuerpo" => Some(Role::Body),
            "top" | "tapa" | "sobre" => Some(Role::Top),
            "shelves" | "shelf" | "estantes" => Some(Role::Shelves),
            "fronts" | "front" | "frentes" => Some(Role::Fronts),
            "back" | "fondo" | "trasera" => Some(Role::Back),
            "legs" | "patas" => Some(Role::Legs),
            "plinth" | "zocalo" | "zócalo" => Some(Role::Plinth),
            _ => None,
        }
    }

    /// Legs and plinth hang below the body and are ignored when the
    /// renderer looks for the lowest body point.
    pub fn counts_toward_floor(self) -> bool {
        !matches!(self, Role::Legs | Role::Plinth)
    }
}

/// One positioned box, in model units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Piece {
    pub size: [f64; 3],
    pub center: [f64; 3],
    pub role: Role,
    pub label: String,
}

impl Piece {
    pub fn min_y(&self) -> f64 {
        self.center[1] - self.size[1] / 2.0
    }

    pub fn max_y(&self) -> f64 {
        self.center[1] + self.size[1] / 2.0
    }
}

/// Manufacturing line for one piece, in millimetres.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CutlistRow {
    pub label: String,
    pub role: Role,
    pub width_mm: f64,
    pub length_mm: f64,
    pub thickness_mm: f64,
    pub material: String,
}

/// Output of one derivation. `cutlist[i]` describes `pieces[i]`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Derived {
    pub pieces: Vec<Piece>,
    pub cutlist: Vec<CutlistRow>,
}

impl Derived {
    /// Lowest Y over pieces that belong to the body (legs and plinth
    /// excluded). `None` when there is no such piece.
    pub fn body_floor_y(&self) -> Option<f64> {
        self.pieces
            .iter()
            .filter(|p| p.role.counts_toward_floor())
            .map(Piece::min_y)
            .reduce(f64::min)
    }

    /// Lowest Y over every piece, supports included.
    pub fn ground_y(&self) -> Option<f64> {
        self.pieces.iter().map(Piece::min_y).reduce(f64::min)
    }

    pub fn count_role(&self, role: Role) -> usize {
        self.pieces.iter().filter(|p| p.role == role).count()
    }
}
