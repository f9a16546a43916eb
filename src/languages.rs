//! Languages the chat widget offers, with a focus on Indian languages.

use serde::Serialize;

/// One supported language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    /// Name used by the widget, lowercase ("hindi").
    pub name: &'static str,
    /// ISO 639-1 code.
    pub code: &'static str,
    /// Voice id the widget passes to its text-to-speech service.
    pub voice: &'static str,
    /// Name shown in the widget's language picker.
    pub native_name: &'static str,
}

pub const ENGLISH: Language = Language {
    name: "english",
    code: "en",
    voice: "en-IN",
    native_name: "English",
};

pub static LANGUAGES: [Language; 12] = [
    ENGLISH,
    Language { name: "hindi", code: "hi", voice: "hi-IN", native_name: "हिन्दी" },
    Language { name: "tamil", code: "ta", voice: "ta-IN", native_name: "தமிழ்" },
    Language { name: "telugu", code: "te", voice: "te-IN", native_name: "తెలుగు" },
    Language { name: "kannada", code: "kn", voice: "kn-IN", native_name: "ಕನ್ನಡ" },
    Language { name: "malayalam", code: "ml", voice: "ml-IN", native_name: "മലയാളം" },
    Language { name: "marathi", code: "mr", voice: "mr-IN", native_name: "मराठी" },
    Language { name: "bengali", code: "bn", voice: "bn-IN", native_name: "বাংলা" },
    Language { name: "gujarati", code: "gu", voice: "gu-IN", native_name: "ગુજરાતી" },
    Language { name: "punjabi", code: "pa", voice: "pa-IN", native_name: "ਪੰਜਾਬੀ" },
    Language { name: "odia", code: "or", voice: "or-IN", native_name: "ଓଡ଼ିଆ" },
    Language { name: "urdu", code: "ur", voice: "ur-IN", native_name: "اردو" },
];

impl Language {
    /// Find a language by widget name or ISO code, ignoring case.
    pub fn lookup(name: &str) -> Option<Language> {
        let name = name.trim();
        LANGUAGES
            .iter()
            .find(|l| l.name.eq_ignore_ascii_case(name) || l.code.eq_ignore_ascii_case(name))
            .copied()
    }

    /// Like [`Language::lookup`], falling back to English for unknown names.
    pub fn resolve(name: &str) -> Language {
        Self::lookup(name).unwrap_or_else(|| {
            tracing::warn!(language = %name, "Unsupported language, falling back to English");
            ENGLISH
        })
    }

    pub fn is_english(&self) -> bool {
        self.code == ENGLISH.code
    }
}

impl Default for Language {
    fn default() -> Self {
        ENGLISH
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
