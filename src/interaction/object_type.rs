use std::fmt;

/// Placeable models. The label doubles as the asset lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    AirForce,
    ChairSwan,
    Teapot,
    ToyBiplane,
}

impl ObjectType {
    pub const ALL: [ObjectType; 4] = [
        ObjectType::AirForce,
        ObjectType::ChairSwan,
        ObjectType::Teapot,
        ObjectType::ToyBiplane,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ObjectType::AirForce => "AirForce",
            ObjectType::ChairSwan => "ChairSwan",
            ObjectType::Teapot => "Teapot",
            ObjectType::ToyBiplane => "ToyBiplane",
        }
    }

    /// Uniform scale that brings the source asset to real-world size.
    pub fn display_scale(self) -> f32 {
        match self {
            ObjectType::ChairSwan => 0.003,
            ObjectType::AirForce | ObjectType::Teapot | ObjectType::ToyBiplane => 0.01,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
