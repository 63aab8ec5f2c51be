use serde::{Deserialize, Serialize};

/// Voice hint for the synthesis stage. Carried as configuration; the
/// placeholder producer does not use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VoiceGender {
    Male,
    #[default]
    Female,
}

/// Per-session translation settings, as sent by the client UI.
///
/// Field names match the client payload (`inputLang`, `outputLang`,
/// `gender`); anything missing falls back to en → hi with a female voice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationSettings {
    #[serde(rename = "inputLang", default = "default_input_lang")]
    pub input_lang: String,

    #[serde(rename = "outputLang", default = "default_output_lang")]
    pub output_lang: String,

    #[serde(default)]
    pub gender: VoiceGender,
}

fn default_input_lang() -> String {
    "en".to_string()
}

fn default_output_lang() -> String {
    "hi".to_string()
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            input_lang: default_input_lang(),
            output_lang: default_output_lang(),
            gender: VoiceGender::default(),
        }
    }
}
