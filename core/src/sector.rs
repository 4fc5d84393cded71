use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sector {
    Satellites,
    DefenseAndSpace,
    Communications,
    Aeronautics,
    Technology,
    Consulting,
    Energy,
    Other,
}

impl Sector {
    pub const ALL: [Sector; 8] = [
        Sector::Satellites,
        Sector::DefenseAndSpace,
        Sector::Communications,
        Sector::Aeronautics,
        Sector::Technology,
        Sector::Consulting,
        Sector::Energy,
        Sector::Other,
    ];

    /// Label as stored in the `sector` column.
    pub fn label(self) -> &'static str {
        match self {
            Sector::Satellites => "Satelites",
            Sector::DefenseAndSpace => "Defensa y Espacio",
            Sector::Communications => "Comunicaciones",
            Sector::Aeronautics => "Aeronautica",
            Sector::Technology => "Tecnologia",
            Sector::Consulting => "Consultoria",
            Sector::Energy => "Energia",
            Sector::Other => "Otro",
        }
    }

    /// Marker fill colour.
    pub fn color(self) -> &'static str {
        match self {
            Sector::Satellites => "#efd90d",
            Sector::DefenseAndSpace => "#ef0dd1",
            Sector::Communications => "#f82e0a",
            Sector::Aeronautics => "#07dfef",
            Sector::Technology => "#4e79a7",
            Sector::Consulting => "#0e53e8",
            Sector::Energy => "#66ed0d",
            Sector::Other => "#aaaaaa",
        }
    }

    /// Colour for a raw stored label; unset or unrecognised labels fall back
    /// to [`Sector::Other`].
    pub fn color_for(label: Option<&str>) -> &'static str {
        label
            .and_then(|l| l.parse::<Sector>().ok())
            .unwrap_or(Sector::Other)
            .color()
    }
}

impl std::fmt::Display for Sector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// Older rows were saved with accented labels ("Satélites", "Energía").
fn fold(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            'á' | 'Á' => 'a',
            'é' | 'É' => 'e',
            'í' | 'Í' => 'i',
            'ó' | 'Ó' => 'o',
            'ú' | 'Ú' => 'u',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

impl FromStr for Sector {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = fold(s);
        Sector::ALL
            .into_iter()
            .find(|sector| fold(sector.label()) == wanted)
            .ok_or_else(|| crate::Error::Validation(format!("unknown sector: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_accented_and_mixed_case_labels() {
        assert_eq!("Satélites".parse::<Sector>().unwrap(), Sector::Satellites);
        assert_eq!("defensa y espacio".parse::<Sector>().unwrap(), Sector::DefenseAndSpace);
        assert_eq!("ENERGÍA".parse::<Sector>().unwrap(), Sector::Energy);
        assert!("Pesca".parse::<Sector>().is_err());
    }

    #[test]
    fn unknown_labels_use_fallback_colour() {
        assert_eq!(Sector::color_for(Some("Aeronáutica")), "#07dfef");
        assert_eq!(Sector::color_for(Some("Pesca")), "#aaaaaa");
        assert_eq!(Sector::color_for(None), "#aaaaaa");
    }
}
