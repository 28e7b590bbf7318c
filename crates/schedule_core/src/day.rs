//! crates/schedule_core/src/day.rs
//!
//! Weekday normalization. The course catalog delivers day names with mixed
//! casing and with or without Spanish accents ("Miércoles", "miercoles",
//! "SÁBADO"); everything downstream compares normalized labels only.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the seven canonical weekdays.
///
/// Declaration order is the display order (lunes = 0 .. domingo = 6), which
/// the derived `Ord` exposes for sorting. Display order is never consulted by
/// conflict detection; that only ever compares same-day blocks for equality.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Lunes,
    Martes,
    Miercoles,
    Jueves,
    Viernes,
    Sabado,
    Domingo,
}

impl Weekday {
    /// Position in the display order, lunes = 0 through domingo = 6.
    pub fn order(self) -> u8 {
        self as u8
    }

    /// The canonical lower-case, accent-free spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Lunes => "lunes",
            Weekday::Martes => "martes",
            Weekday::Miercoles => "miercoles",
            Weekday::Jueves => "jueves",
            Weekday::Viernes => "viernes",
            Weekday::Sabado => "sabado",
            Weekday::Domingo => "domingo",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized day label.
///
/// Unrecognized input is carried through lower-cased and trimmed rather than
/// rejected, matching the upstream catalog contract. An unknown label only
/// ever compares equal to itself, so blocks on a misspelled day silently fail
/// to match blocks on the canonical spelling. This is a known
/// missed-conflict risk inherited from the product; see DESIGN.md.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DayLabel {
    Known(Weekday),
    Unknown(String),
}

impl fmt::Display for DayLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayLabel::Known(day) => day.fmt(f),
            DayLabel::Unknown(raw) => f.write_str(raw),
        }
    }
}

impl From<Weekday> for DayLabel {
    fn from(day: Weekday) -> Self {
        DayLabel::Known(day)
    }
}

/// Normalizes a raw weekday string from the catalog.
///
/// Case-folds, trims, strips the Spanish vowel diacritics and maps the known
/// spellings onto [`Weekday`]. Anything else comes back as
/// [`DayLabel::Unknown`] holding the lower-cased input.
pub fn normalize(raw: &str) -> DayLabel {
    let folded = raw.trim().to_lowercase();
    match strip_diacritics(&folded).as_str() {
        "lunes" => DayLabel::Known(Weekday::Lunes),
        "martes" => DayLabel::Known(Weekday::Martes),
        "miercoles" => DayLabel::Known(Weekday::Miercoles),
        "jueves" => DayLabel::Known(Weekday::Jueves),
        "viernes" => DayLabel::Known(Weekday::Viernes),
        "sabado" => DayLabel::Known(Weekday::Sabado),
        "domingo" => DayLabel::Known(Weekday::Domingo),
        _ => DayLabel::Unknown(folded),
    }
}

fn strip_diacritics(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' => 'u',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_lowercase_names() {
        assert_eq!(normalize("lunes"), DayLabel::Known(Weekday::Lunes));
        assert_eq!(normalize("viernes"), DayLabel::Known(Weekday::Viernes));
    }

    #[test]
    fn strips_accents_and_case() {
        assert_eq!(normalize("Miércoles"), DayLabel::Known(Weekday::Miercoles));
        assert_eq!(normalize("SÁBADO"), DayLabel::Known(Weekday::Sabado));
        assert_eq!(normalize("  Martes "), DayLabel::Known(Weekday::Martes));
    }

    #[test]
    fn unknown_input_passes_through_lowercased() {
        assert_eq!(
            normalize("Monday"),
            DayLabel::Unknown("monday".to_string())
        );
        // An unknown label only matches its own spelling.
        assert_ne!(normalize("Monday"), DayLabel::Known(Weekday::Lunes));
        assert_eq!(normalize("MONDAY"), normalize("monday"));
    }

    #[test]
    fn display_order_is_lunes_through_domingo() {
        assert_eq!(Weekday::Lunes.order(), 0);
        assert_eq!(Weekday::Miercoles.order(), 2);
        assert_eq!(Weekday::Domingo.order(), 6);
        assert!(Weekday::Lunes < Weekday::Sabado);
    }

    #[test]
    fn serializes_as_the_canonical_spelling() {
        let day = DayLabel::Known(Weekday::Miercoles);
        assert_eq!(serde_json::to_string(&day).unwrap(), "\"miercoles\"");
        let back: DayLabel = serde_json::from_str("\"miercoles\"").unwrap();
        assert_eq!(back, day);
        let odd: DayLabel = serde_json::from_str("\"monday\"").unwrap();
        assert_eq!(odd, DayLabel::Unknown("monday".to_string()));
    }
}
