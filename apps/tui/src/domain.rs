use serde::{Serialize, Serializer};

/// Fallback colour for biomes missing from the palette.
pub const DEFAULT_BIOME_COLOR: &str = "#607D8B";
/// Fallback colour for unknown risk labels.
pub const DEFAULT_RISK_COLOR: &str = "#FF9800";

/// Fire risk category derived from the fire radiative power (FRP, in MW).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Risk {
    Low,
    Medium,
    High,
    Critical,
}

impl Risk {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    /// Thresholds are exclusive upper bounds: <10, <50, <100, everything else.
    pub fn from_frp(frp: f64) -> Self {
        if frp < 10.0 {
            Self::Low
        } else if frp < 50.0 {
            Self::Medium
        } else if frp < 100.0 {
            Self::High
        } else {
            Self::Critical
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Baixo",
            Self::Medium => "Médio",
            Self::High => "Alto",
            Self::Critical => "Crítico",
        }
    }

    pub const fn badge_class(self) -> &'static str {
        match self {
            Self::Low => "badge-baixo",
            Self::Medium => "badge-medio",
            Self::High => "badge-alto",
            Self::Critical => "badge-critico",
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            Self::Low => "#4CAF50",
            Self::Medium => "#FF9800",
            Self::High => "#F44336",
            Self::Critical => "#9C27B0",
        }
    }

    /// Accepts the labels the API emits, with or without accents.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "baixo" => Some(Self::Low),
            "médio" | "medio" => Some(Self::Medium),
            "alto" => Some(Self::High),
            "crítico" | "critico" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl Serialize for Risk {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

pub fn risk_color(label: &str) -> &'static str {
    Risk::parse(label).map_or(DEFAULT_RISK_COLOR, Risk::color)
}

pub fn biome_color(biome: &str) -> &'static str {
    match biome.trim() {
        "Amazonia" | "Amazônia" => "#009216",
        "Cerrado" => "#FBB13C",
        "Mata Atlantica" | "Mata Atlântica" => "#205B23",
        "Caatinga" => "#D4A373",
        "Pampa" => "#90CAF9",
        "Pantanal" => "#0288D1",
        _ => DEFAULT_BIOME_COLOR,
    }
}

/// Parses `#RRGGBB` (an optional trailing alpha pair is ignored).
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 && digits.len() != 8 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| {
        digits
            .get(range)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
    };
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

pub fn rgb_to_hex((r, g, b): (u8, u8, u8)) -> String {
    format!("#{r:02X}{g:02X}{b:02X}")
}
