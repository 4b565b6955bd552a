//! Languages with a localized text table in the game's packaged data

use serde::{Deserialize, Serialize};
use std::fmt;

/// A game language.
///
/// Serialized by its upper-case name (`EN`, `PT_BR`, ...) in the settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Language {
    /// English
    #[default]
    En,
    /// Arabic
    Ar,
    /// German
    De,
    /// Spanish (Spain)
    Es,
    /// Spanish (Latin America)
    #[serde(rename = "ES_419")]
    Es419,
    /// French
    Fr,
    /// Italian
    It,
    /// Japanese
    Ja,
    /// Korean
    Ko,
    /// Polish
    Pl,
    /// Portuguese (Brazil)
    PtBr,
    /// Russian
    Ru,
    /// Turkish
    Tr,
    /// Chinese (Simplified)
    ZhCn,
    /// Chinese (Traditional)
    ZhHant,
}

impl Language {
    /// Every supported language.
    pub const ALL: [Self; 15] = [
        Self::En,
        Self::Ar,
        Self::De,
        Self::Es,
        Self::Es419,
        Self::Fr,
        Self::It,
        Self::Ja,
        Self::Ko,
        Self::Pl,
        Self::PtBr,
        Self::Ru,
        Self::Tr,
        Self::ZhCn,
        Self::ZhHant,
    ];

    /// Locale tag naming the language's localization directory.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
            Self::De => "de",
            Self::Es => "es",
            Self::Es419 => "es-419",
            Self::Fr => "fr",
            Self::It => "it",
            Self::Ja => "ja",
            Self::Ko => "ko",
            Self::Pl => "pl",
            Self::PtBr => "pt-BR",
            Self::Ru => "ru",
            Self::Tr => "tr",
            Self::ZhCn => "zh-CN",
            Self::ZhHant => "zh-Hant",
        }
    }

    /// Name as written in the settings file.
    pub const fn name(self) -> &'static str {
        match self {
            Self::En => "EN",
            Self::Ar => "AR",
            Self::De => "DE",
            Self::Es => "ES",
            Self::Es419 => "ES_419",
            Self::Fr => "FR",
            Self::It => "IT",
            Self::Ja => "JA",
            Self::Ko => "KO",
            Self::Pl => "PL",
            Self::PtBr => "PT_BR",
            Self::Ru => "RU",
            Self::Tr => "TR",
            Self::ZhCn => "ZH_CN",
            Self::ZhHant => "ZH_HANT",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
