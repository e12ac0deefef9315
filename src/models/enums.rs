//! Closed category enums for the insertion procedure.
//!
//! The outcome and difficulty classifications drive conditional follow-up
//! prompts, so they are real enums rather than free text — the stored
//! column holds the canonical label from `as_str`.

use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(InsertionOutcome {
    Facil => "fácil",
    Dificil => "difícil",
    NaoRealizada => "não realizada",
});

str_enum!(InsertionDifficulty {
    SemDificuldade => "sem dificuldade",
    DificuldadeEsperada => "dificuldade esperada",
    MaisDificil => "mais difícil que o esperado",
    NaoFoiPossivel => "não foi possível inserir",
});

/// A closed set of operator-typed labels. `parse_input` is lenient about
/// accents and case; the canonical label is what gets stored.
pub trait Category: Sized + Copy {
    fn parse_input(input: &str) -> Option<Self>;
    fn accepted_labels() -> &'static str;
    fn as_str(&self) -> &'static str;
}

impl Category for InsertionOutcome {
    fn parse_input(input: &str) -> Option<Self> {
        match input.to_lowercase().as_str() {
            "fácil" | "facil" => Some(Self::Facil),
            "difícil" | "dificil" => Some(Self::Dificil),
            "não realizada" | "nao realizada" => Some(Self::NaoRealizada),
            _ => None,
        }
    }

    fn accepted_labels() -> &'static str {
        "fácil/difícil/não realizada"
    }

    fn as_str(&self) -> &'static str {
        InsertionOutcome::as_str(self)
    }
}

impl Category for InsertionDifficulty {
    fn parse_input(input: &str) -> Option<Self> {
        match input.to_lowercase().as_str() {
            "sem dificuldade" => Some(Self::SemDificuldade),
            "dificuldade esperada" => Some(Self::DificuldadeEsperada),
            "mais difícil que o esperado" | "mais dificil que o esperado" => {
                Some(Self::MaisDificil)
            }
            "não foi possível inserir" | "nao foi possivel inserir" => Some(Self::NaoFoiPossivel),
            _ => None,
        }
    }

    fn accepted_labels() -> &'static str {
        "sem dificuldade/dificuldade esperada/mais difícil que o esperado/não foi possível inserir"
    }

    fn as_str(&self) -> &'static str {
        InsertionDifficulty::as_str(self)
    }
}

impl InsertionOutcome {
    /// An outcome other than "fácil" gets a follow-up reason prompt.
    pub fn requires_reason(&self) -> bool {
        !matches!(self, Self::Facil)
    }
}

impl InsertionDifficulty {
    /// Any classification other than "sem dificuldade" gets a follow-up
    /// reason prompt, including a failed insertion.
    pub fn requires_reason(&self) -> bool {
        !matches!(self, Self::SemDificuldade)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn insertion_outcome_round_trip() {
        for (variant, s) in [
            (InsertionOutcome::Facil, "fácil"),
            (InsertionOutcome::Dificil, "difícil"),
            (InsertionOutcome::NaoRealizada, "não realizada"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(InsertionOutcome::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn insertion_difficulty_round_trip() {
        for (variant, s) in [
            (InsertionDifficulty::SemDificuldade, "sem dificuldade"),
            (InsertionDifficulty::DificuldadeEsperada, "dificuldade esperada"),
            (InsertionDifficulty::MaisDificil, "mais difícil que o esperado"),
            (InsertionDifficulty::NaoFoiPossivel, "não foi possível inserir"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(InsertionDifficulty::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn parse_input_tolerates_missing_accents_and_case() {
        assert_eq!(
            InsertionOutcome::parse_input("FACIL"),
            Some(InsertionOutcome::Facil)
        );
        assert_eq!(
            InsertionOutcome::parse_input("nao realizada"),
            Some(InsertionOutcome::NaoRealizada)
        );
        assert_eq!(
            InsertionDifficulty::parse_input("Mais dificil que o esperado"),
            Some(InsertionDifficulty::MaisDificil)
        );
        assert_eq!(
            InsertionDifficulty::parse_input("nao foi possivel inserir"),
            Some(InsertionDifficulty::NaoFoiPossivel)
        );
    }

    #[test]
    fn parse_input_rejects_anything_else() {
        assert_eq!(InsertionOutcome::parse_input("medio"), None);
        assert_eq!(InsertionDifficulty::parse_input(""), None);
    }

    #[test]
    fn invalid_enum_returns_error() {
        assert!(InsertionOutcome::from_str("facil").is_err());
        assert!(InsertionDifficulty::from_str("unknown").is_err());
    }

    #[test]
    fn reason_triggers() {
        assert!(!InsertionOutcome::Facil.requires_reason());
        assert!(InsertionOutcome::Dificil.requires_reason());
        assert!(InsertionOutcome::NaoRealizada.requires_reason());

        assert!(!InsertionDifficulty::SemDificuldade.requires_reason());
        assert!(InsertionDifficulty::DificuldadeEsperada.requires_reason());
        assert!(InsertionDifficulty::MaisDificil.requires_reason());
        assert!(InsertionDifficulty::NaoFoiPossivel.requires_reason());
    }
}
